// Operator table: calculator tokens mapped to wrapped kernels

use crate::compat::{HashMap, Rc, String, ToString, Vec, format};
use crate::config::DispatchConfig;
use crate::dispatch::{ListAndOneArg, ListAndTwoArgs, ListArg, OneArg, TwoArg};
use crate::value::{RuntimeError, Scalar, Value};

pub type GeneratorKernel = dyn Fn(Scalar, Scalar, Scalar) -> Result<Value, RuntimeError>;

// RUST CONCEPT: One enum variant per broadcast strategy
// The variant fixes how many stack values the operator consumes.
#[derive(Clone)]
pub enum Operator {
    OneArg(OneArg),
    TwoArg(TwoArg),
    ListArg(ListArg),
    ListAndOneArg(ListAndOneArg),
    ListAndTwoArgs(ListAndTwoArgs),
    // Three plain scalars, no broadcasting
    Generator(Rc<GeneratorKernel>),
}

impl Operator {
    pub fn generator<F>(kernel: F) -> Self
    where
        F: Fn(Scalar, Scalar, Scalar) -> Result<Value, RuntimeError> + 'static,
    {
        Operator::Generator(Rc::new(kernel))
    }

    pub fn arity(&self) -> usize {
        match self {
            Operator::OneArg(_) | Operator::ListArg(_) => 1,
            Operator::TwoArg(_) | Operator::ListAndOneArg(_) => 2,
            Operator::ListAndTwoArgs(_) | Operator::Generator(_) => 3,
        }
    }

    pub fn with_config(self, config: DispatchConfig) -> Self {
        match self {
            Operator::OneArg(op) => Operator::OneArg(op.with_config(config)),
            Operator::TwoArg(op) => Operator::TwoArg(op.with_config(config)),
            Operator::ListAndOneArg(op) => Operator::ListAndOneArg(op.with_config(config)),
            Operator::ListAndTwoArgs(op) => Operator::ListAndTwoArgs(op.with_config(config)),
            // Nothing to recurse into
            other @ (Operator::ListArg(_) | Operator::Generator(_)) => other,
        }
    }

    /// Calls the operator with `args` in stack order, deepest first.
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let found = args.len();
        let wrong_count = |_| RuntimeError::ArgumentCount {
            operator: name.to_string(),
            expected: self.arity(),
            found,
        };

        match self {
            Operator::OneArg(op) => {
                let [a]: [Value; 1] = args.try_into().map_err(wrong_count)?;
                op.call(a)
            }
            Operator::ListArg(op) => {
                let [a]: [Value; 1] = args.try_into().map_err(wrong_count)?;
                op.call(a)
            }
            Operator::TwoArg(op) => {
                let [a, b]: [Value; 2] = args.try_into().map_err(wrong_count)?;
                op.call(a, b)
            }
            Operator::ListAndOneArg(op) => {
                let [items, a]: [Value; 2] = args.try_into().map_err(wrong_count)?;
                op.call(items, a)
            }
            Operator::ListAndTwoArgs(op) => {
                let [items, a, b]: [Value; 3] = args.try_into().map_err(wrong_count)?;
                op.call(items, a, b)
            }
            Operator::Generator(kernel) => {
                let [a, b, c]: [Value; 3] = args.try_into().map_err(wrong_count)?;
                kernel(scalar_arg(name, a)?, scalar_arg(name, b)?, scalar_arg(name, c)?)
            }
        }
    }
}

fn scalar_arg(name: &str, value: Value) -> Result<Scalar, RuntimeError> {
    match value.unwrap_singleton() {
        Value::Scalar(s) => Ok(s),
        other => Err(RuntimeError::TypeError(format!(
            "'{}' needs scalar arguments, got a {}",
            name,
            other.type_name()
        ))),
    }
}

pub struct OperatorEntry {
    pub operator: Operator,
    pub doc: Option<Rc<str>>, // Optional documentation string for help
}

// Implement Debug manually since the wrapped kernels are closures
impl core::fmt::Debug for OperatorEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OperatorEntry")
            .field("arity", &self.operator.arity())
            .field("doc", &self.doc)
            .finish()
    }
}

pub struct OperatorTable {
    entries: HashMap<Rc<str>, OperatorEntry>,
    config: DispatchConfig,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// An empty table whose operators all get `config` when registered.
    pub fn with_config(config: DispatchConfig) -> Self {
        OperatorTable {
            entries: HashMap::new(),
            config,
        }
    }

    /// A table holding every builtin operator.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        crate::builtins::register_builtins(&mut table);
        table
    }

    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Adds or replaces an operator.
    pub fn register(&mut self, name: &str, operator: Operator, doc: Option<&str>) {
        tracing::trace!(operator = name, arity = operator.arity(), "registering operator");
        self.entries.insert(
            Rc::from(name),
            OperatorEntry {
                operator: operator.with_config(self.config),
                doc: doc.map(Rc::<str>::from),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&OperatorEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn doc(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|entry| entry.doc.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Operator names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().map(|name| name.to_string()).collect();
        names.sort();
        names
    }

    pub fn invoke(&self, name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let entry = self
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedOperator(name.to_string()))?;
        tracing::debug!(operator = name, args = args.len(), "invoking operator");
        entry.operator.call(name, args)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new()
    }
}
