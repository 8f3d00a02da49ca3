// One collection parameter: ( coll -- f(coll) )

use crate::compat::{Rc, Vec, vec};
use crate::sequence::{ElementCount, Item, LazySequence};
use crate::value::{RuntimeError, Value};

/// What an aggregate kernel receives: a finite list, or a sequence it
/// must pull from itself.
pub enum Collection {
    List(Vec<Value>),
    Sequence(LazySequence),
}

impl Collection {
    /// A scalar becomes a one-element list; lists and sequences are kept
    /// as they are, without unwrapping singletons.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::List(items) => Collection::List(items),
            Value::Sequence(seq) => Collection::Sequence(seq),
            scalar @ Value::Scalar(_) => Collection::List(vec![scalar]),
        }
    }

    pub fn count_hint(&self) -> ElementCount {
        match self {
            Collection::List(items) => ElementCount::Exact(items.len() as u64),
            Collection::Sequence(seq) => seq.count_hint(),
        }
    }

    pub fn duplicate(&mut self) -> Collection {
        match self {
            Collection::List(items) => Collection::List(items.iter_mut().map(Value::duplicate).collect()),
            Collection::Sequence(seq) => Collection::Sequence(seq.fork()),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Collection::List(items) => Value::List(items),
            Collection::Sequence(seq) => Value::Sequence(seq),
        }
    }
}

// RUST CONCEPT: Kernels walk lists and sequences through one iterator type
impl IntoIterator for Collection {
    type Item = Item;
    type IntoIter = LazySequence;

    fn into_iter(self) -> LazySequence {
        LazySequence::wrap(self.into_value())
    }
}

pub type CollectionKernel = dyn Fn(Collection) -> Result<Value, RuntimeError>;

/// An aggregate kernel (sum, mean, …) that takes its argument whole.
#[derive(Clone)]
pub struct ListArg {
    kernel: Rc<CollectionKernel>,
}

pub fn list_arg<F>(kernel: F) -> ListArg
where
    F: Fn(Collection) -> Result<Value, RuntimeError> + 'static,
{
    ListArg {
        kernel: Rc::new(kernel),
    }
}

impl ListArg {
    pub fn call(&self, value: Value) -> Result<Value, RuntimeError> {
        (self.kernel)(Collection::from_value(value))
    }
}
