// Division primitive

use crate::numeric;
use crate::value::{RuntimeError, Scalar, Value};

// RUST CONCEPT: Exact division
// Integer / Integer gives a rational unless it divides evenly.
// Division: ( a b -- a/b )
pub fn div_impl(a: Scalar, b: Scalar) -> Result<Value, RuntimeError> {
    numeric::divide(&a, &b).map(Value::Scalar)
}
