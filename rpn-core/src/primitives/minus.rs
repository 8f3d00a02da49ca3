// Subtraction primitive

use crate::numeric;
use crate::value::{RuntimeError, Scalar, Value};

// Subtraction: ( a b -- a-b )
pub fn sub_impl(a: Scalar, b: Scalar) -> Result<Value, RuntimeError> {
    numeric::subtract(&a, &b).map(Value::Scalar)
}
