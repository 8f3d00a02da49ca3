// Fan-out buffer behind LazySequence::fork
//
// One production source, any number of branches. Each branch owns a slot
// holding a backlog of elements that some other branch already pulled from
// the source. Forking a branch adds a slot to the same shared state rather
// than stacking another buffer on top, so the cost of a pull does not grow
// with the number of forks. Backlogs are never capped: a branch that lags
// behind simply holds more.

use crate::compat::{Box, Rc, RefCell, Vec, VecDeque, vec};
use crate::sequence::{Item, Source};

/// A backlog this long logs a warning; so does every doubling after it.
pub const BACKLOG_WARN_THRESHOLD: usize = 1 << 16;

struct Shared {
    source: Source,
    // The source has returned None or an error; it is not pulled again
    done: bool,
    // None once the branch in that slot has been dropped; the slot is reused
    backlogs: Vec<Option<VecDeque<Item>>>,
    warn_at: Vec<usize>,
    // Runs once the last branch is gone
    close_hook: Option<Box<dyn FnOnce()>>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(hook) = self.close_hook.take() {
            tracing::trace!("closing shared sequence source");
            hook();
        }
    }
}

pub(crate) struct Branch {
    shared: Rc<RefCell<Shared>>,
    slot: usize,
}

// Every other live branch gets its own copy; nested sequences are forked
fn duplicate(item: &mut Item) -> Item {
    match item {
        Ok(value) => Ok(value.duplicate()),
        Err(e) => Err(e.clone()),
    }
}

// First threshold above a backlog that already holds `len` elements
fn first_warning(len: usize) -> usize {
    let mut warn_at = BACKLOG_WARN_THRESHOLD;
    while warn_at <= len {
        warn_at = warn_at.saturating_mul(2);
    }
    warn_at
}

impl Branch {
    /// The only branch over `source`.
    pub(crate) fn new(source: Source) -> Self {
        Branch {
            shared: Rc::new(RefCell::new(Shared {
                source,
                done: false,
                backlogs: vec![Some(VecDeque::new())],
                warn_at: vec![BACKLOG_WARN_THRESHOLD],
                close_hook: None,
            })),
            slot: 0,
        }
    }

    /// A new branch that yields exactly what `self` has left to yield.
    ///
    /// The new slot starts as a copy of this branch's backlog. A slot freed
    /// by a dropped branch is reused before the slot list grows.
    pub(crate) fn fork(&self) -> Branch {
        let mut shared = self.shared.borrow_mut();
        let Shared {
            backlogs, warn_at, ..
        } = &mut *shared;

        let seeded: VecDeque<Item> = match backlogs[self.slot].as_mut() {
            Some(own) => own.iter_mut().map(duplicate).collect(),
            None => VecDeque::new(),
        };
        let threshold = first_warning(seeded.len());

        let slot = match backlogs.iter().position(Option::is_none) {
            Some(free) => {
                backlogs[free] = Some(seeded);
                warn_at[free] = threshold;
                free
            }
            None => {
                backlogs.push(Some(seeded));
                warn_at.push(threshold);
                backlogs.len() - 1
            }
        };

        Branch {
            shared: self.shared.clone(),
            slot,
        }
    }

    /// Chains `hook` onto the hooks that run when the last branch is dropped.
    pub(crate) fn add_close_hook(&self, hook: Box<dyn FnOnce()>) {
        let mut shared = self.shared.borrow_mut();
        let hook: Box<dyn FnOnce()> = match shared.close_hook.take() {
            Some(previous) => Box::new(move || {
                previous();
                hook();
            }),
            None => hook,
        };
        shared.close_hook = Some(hook);
    }
}

impl Iterator for Branch {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        let mut shared = self.shared.borrow_mut();
        let Shared {
            source,
            done,
            backlogs,
            warn_at,
            ..
        } = &mut *shared;

        if let Some(item) = backlogs[self.slot].as_mut().and_then(VecDeque::pop_front) {
            return Some(item);
        }
        if *done {
            return None;
        }

        let Some(mut item) = source.next() else {
            *done = true;
            return None;
        };
        if item.is_err() {
            *done = true;
        }

        for (slot, backlog) in backlogs.iter_mut().enumerate() {
            if slot == self.slot {
                continue;
            }
            if let Some(backlog) = backlog {
                backlog.push_back(duplicate(&mut item));
                if backlog.len() >= warn_at[slot] {
                    tracing::warn!(
                        branch = slot,
                        backlog = backlog.len(),
                        "forked sequence branch is falling behind; its backlog is held in memory"
                    );
                    warn_at[slot] = warn_at[slot].saturating_mul(2);
                }
            }
        }
        Some(item)
    }
}

impl Drop for Branch {
    fn drop(&mut self) {
        // A branch dropped while its source is mid-step has nothing to release
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.backlogs[self.slot] = None;
        }
    }
}
