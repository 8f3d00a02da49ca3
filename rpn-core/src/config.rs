// Runtime settings for the broadcast wrappers

/// Nesting deeper than this is rejected rather than recursed into.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    pub max_depth: usize,
}

impl DispatchConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
