//! # RPN Core
//!
//! Value broadcasting for an RPN calculator. A kernel written for plain
//! scalars is wrapped once and then accepts scalars, finite lists, and
//! lazy (possibly unbounded) sequences in any argument position.
//!
//! ## Features
//!
//! - **Five broadcast strategies**: one and two scalar arguments, one
//!   collection, and a collection followed by one or two scalar arguments
//! - **Lazy sequences**: pull-based, forkable, never drained behind your back
//! - **Ranges**: arithmetic, sized, geometric, and exponential
//! - **Multiple numeric types**: BigInt, Rational, Number, Complex, Date
//!
//! ## Example
//!
//! ```
//! use rpn_core::{Scalar, Value, arithmetic_range, numeric, two_arg};
//!
//! let add = two_arg(|a, b| numeric::add(&a, &b).map(Value::Scalar));
//!
//! // Scalars go straight to the kernel
//! assert_eq!(add.call(Value::from(2), Value::from(3)).unwrap(), Value::from(5));
//!
//! // A scalar against a list maps over the list
//! let shifted = add.call(Value::from(3), Value::from(vec![1, 2, 3])).unwrap();
//! assert_eq!(shifted, Value::from(vec![4, 5, 6]));
//!
//! // Anything against an unbounded sequence stays lazy
//! let naturals = arithmetic_range(Scalar::from(1), Scalar::Number(f64::INFINITY), Scalar::from(1)).unwrap();
//! let Value::Sequence(mut evens) = add.call(Value::Sequence(naturals), Value::from(1)).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(evens.take_list(3).unwrap(), Value::from(vec![2, 3, 4]));
//! ```

#![cfg_attr(target_os = "none", no_std)]

#[cfg(target_os = "none")]
extern crate alloc;

// Public modules
pub mod value;
pub mod numeric;
pub mod config;
pub mod sequence;
pub mod dispatch;
pub mod primitives;
pub mod operators;
pub mod builtins;

// Internal module
mod compat;

// Re-exports for convenience
pub use builtins::register_builtins;
pub use config::{DEFAULT_MAX_DEPTH, DispatchConfig};
pub use dispatch::{
    Collection, ListAndOneArg, ListAndTwoArgs, ListArg, OneArg, TwoArg, list_and_one_arg, list_and_two_args,
    list_arg, one_arg, two_arg,
};
pub use operators::{Operator, OperatorEntry, OperatorTable};
pub use sequence::{
    ElementCount, LazySequence, arithmetic_range, cartesian_product, exponential_range, geometric_range,
    permutations, sized_range,
};
pub use value::{RuntimeError, Scalar, Value};
