//! Broadcast wrappers: scalar kernels extended to lists and sequences.
//!
//! Every wrapper follows the same two steps at every level of a value
//! tree. First, a list holding exactly one element is replaced by that
//! element. Then the shapes decide:
//!
//! | left \ right | scalar          | list             | sequence        |
//! |--------------|-----------------|------------------|-----------------|
//! | scalar       | kernel          | list, mapped     | sequence, lazy  |
//! | list         | list, mapped    | list, zipped     | sequence, zipped|
//! | sequence     | sequence, lazy  | sequence, zipped | sequence, zipped|
//!
//! Zips truncate to the shorter side. Any pairing that involves a sequence
//! produces a sequence and pulls one element per side per step, so an
//! unbounded operand is never drained.
//!
//! Kernel errors are passed through untouched. In the eager list branches
//! the first error discards the partial result; in the lazy branches it is
//! yielded in place of the failing element and ends the sequence.

mod list_and_args;
mod list_arg;
mod one_arg;
mod two_arg;

pub use list_and_args::{ListAndOneArg, ListAndTwoArgs, list_and_one_arg, list_and_two_args};
pub use list_arg::{Collection, ListArg, list_arg};
pub use one_arg::{OneArg, one_arg};
pub use two_arg::{TwoArg, two_arg};

use crate::compat::{Rc, Vec};
use crate::config::DispatchConfig;
use crate::sequence::LazySequence;
use crate::value::{RuntimeError, Scalar, Value};

pub type UnaryKernel = dyn Fn(Scalar) -> Result<Value, RuntimeError>;
pub type BinaryKernel = dyn Fn(Scalar, Scalar) -> Result<Value, RuntimeError>;

pub(crate) fn check_depth(config: DispatchConfig, depth: usize) -> Result<(), RuntimeError> {
    if depth > config.max_depth {
        Err(RuntimeError::NestingTooDeep {
            limit: config.max_depth,
        })
    } else {
        Ok(())
    }
}

pub(crate) fn broadcast_one(
    value: Value,
    kernel: &Rc<UnaryKernel>,
    config: DispatchConfig,
    depth: usize,
) -> Result<Value, RuntimeError> {
    check_depth(config, depth)?;

    match value.unwrap_singleton() {
        Value::Scalar(s) => kernel(s),
        Value::List(items) => items
            .into_iter()
            .map(|item| broadcast_one(item, kernel, config, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Value::Sequence(seq) => {
            let kernel = kernel.clone();
            Ok(Value::Sequence(LazySequence::map(seq, move |item| {
                broadcast_one(item, &kernel, config, depth + 1)
            })))
        }
    }
}

pub(crate) fn broadcast_two(
    a: Value,
    b: Value,
    kernel: &Rc<BinaryKernel>,
    config: DispatchConfig,
    depth: usize,
) -> Result<Value, RuntimeError> {
    check_depth(config, depth)?;

    match (a.unwrap_singleton(), b.unwrap_singleton()) {
        (Value::Scalar(x), Value::Scalar(y)) => kernel(x, y),

        (Value::List(xs), Value::List(ys)) => xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| broadcast_two(x, y, kernel, config, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        (Value::List(xs), Value::Scalar(y)) => xs
            .into_iter()
            .map(|x| broadcast_two(x, Value::Scalar(y.clone()), kernel, config, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        (Value::Scalar(x), Value::List(ys)) => ys
            .into_iter()
            .map(|y| broadcast_two(Value::Scalar(x.clone()), y, kernel, config, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),

        // RUST CONCEPT: Every branch with a sequence operand stays lazy
        (Value::Sequence(xs), Value::Scalar(y)) => {
            tracing::debug!(depth, "mapping sequence against a fixed operand");
            let kernel = kernel.clone();
            Ok(Value::Sequence(LazySequence::map(xs, move |x| {
                broadcast_two(x, Value::Scalar(y.clone()), &kernel, config, depth + 1)
            })))
        }
        (Value::Scalar(x), Value::Sequence(ys)) => {
            tracing::debug!(depth, "mapping sequence against a fixed operand");
            let kernel = kernel.clone();
            Ok(Value::Sequence(LazySequence::map(ys, move |y| {
                broadcast_two(Value::Scalar(x.clone()), y, &kernel, config, depth + 1)
            })))
        }
        (xs, ys) => {
            tracing::debug!(depth, left = xs.type_name(), right = ys.type_name(), "zipping lazily");
            let kernel = kernel.clone();
            Ok(Value::Sequence(LazySequence::zip_with(
                LazySequence::wrap(xs),
                LazySequence::wrap(ys),
                move |x, y| broadcast_two(x, y, &kernel, config, depth + 1),
            )))
        }
    }
}
