// A collection followed by broadcast parameters:
//   ( coll n -- f(coll, n) )
//   ( coll a b -- f(coll, a, b) )
//
// The collection is never broadcast over. Only the trailing parameters
// are, with the same rules as the one- and two-argument wrappers, and every
// kernel call gets its own copy of the collection.

use crate::compat::{Rc, RefCell, Vec};
use crate::config::DispatchConfig;
use crate::dispatch::list_arg::Collection;
use crate::dispatch::{BinaryKernel, UnaryKernel, broadcast_one, broadcast_two, check_depth};
use crate::value::{RuntimeError, Scalar, Value};

type CollectionUnaryKernel = dyn Fn(Collection, Scalar) -> Result<Value, RuntimeError>;
type CollectionBinaryKernel = dyn Fn(Collection, Scalar, Scalar) -> Result<Value, RuntimeError>;

// A list of lists is a batch: the kernel runs once per sub-list
fn is_batch(collection: &Value) -> bool {
    matches!(collection, Value::List(items) if matches!(items.first(), Some(Value::List(_))))
}

#[derive(Clone)]
pub struct ListAndOneArg {
    kernel: Rc<CollectionUnaryKernel>,
    config: DispatchConfig,
}

pub fn list_and_one_arg<F>(kernel: F) -> ListAndOneArg
where
    F: Fn(Collection, Scalar) -> Result<Value, RuntimeError> + 'static,
{
    ListAndOneArg {
        kernel: Rc::new(kernel),
        config: DispatchConfig::default(),
    }
}

impl ListAndOneArg {
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn call(&self, collection: Value, arg: Value) -> Result<Value, RuntimeError> {
        self.apply(collection, arg, 0)
    }

    fn apply(&self, collection: Value, mut arg: Value, depth: usize) -> Result<Value, RuntimeError> {
        check_depth(self.config, depth)?;

        if is_batch(&collection) {
            let Value::List(batch) = collection else {
                return Err(RuntimeError::TypeError("expected a list of lists".into()));
            };
            return batch
                .into_iter()
                .map(|sub| {
                    let arg = arg.duplicate();
                    self.apply(sub, arg, depth + 1)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List);
        }

        // RUST CONCEPT: Shared ownership for a lazily broadcast argument
        // When `arg` is a sequence the leaf runs long after this call returns,
        // so the collection lives behind an Rc and is copied per element.
        let shared = Rc::new(RefCell::new(Collection::from_value(collection)));
        let kernel = self.kernel.clone();
        let leaf: Rc<UnaryKernel> = Rc::new(move |n: Scalar| -> Result<Value, RuntimeError> {
            let copy = shared.borrow_mut().duplicate();
            kernel(copy, n)
        });
        broadcast_one(arg, &leaf, self.config, depth)
    }
}

#[derive(Clone)]
pub struct ListAndTwoArgs {
    kernel: Rc<CollectionBinaryKernel>,
    config: DispatchConfig,
}

pub fn list_and_two_args<F>(kernel: F) -> ListAndTwoArgs
where
    F: Fn(Collection, Scalar, Scalar) -> Result<Value, RuntimeError> + 'static,
{
    ListAndTwoArgs {
        kernel: Rc::new(kernel),
        config: DispatchConfig::default(),
    }
}

impl ListAndTwoArgs {
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn call(&self, collection: Value, a: Value, b: Value) -> Result<Value, RuntimeError> {
        self.apply(collection, a, b, 0)
    }

    fn apply(&self, collection: Value, mut a: Value, mut b: Value, depth: usize) -> Result<Value, RuntimeError> {
        check_depth(self.config, depth)?;

        if is_batch(&collection) {
            let Value::List(batch) = collection else {
                return Err(RuntimeError::TypeError("expected a list of lists".into()));
            };
            return batch
                .into_iter()
                .map(|sub| {
                    let (a, b) = (a.duplicate(), b.duplicate());
                    self.apply(sub, a, b, depth + 1)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List);
        }

        let shared = Rc::new(RefCell::new(Collection::from_value(collection)));
        let kernel = self.kernel.clone();
        let leaf: Rc<BinaryKernel> = Rc::new(move |x: Scalar, y: Scalar| -> Result<Value, RuntimeError> {
            let copy = shared.borrow_mut().duplicate();
            kernel(copy, x, y)
        });
        broadcast_two(a, b, &leaf, self.config, depth)
    }
}
