// Multiplication primitive

use crate::numeric;
use crate::value::{RuntimeError, Scalar, Value};

// Multiplication: ( a b -- a*b )
pub fn mul_impl(a: Scalar, b: Scalar) -> Result<Value, RuntimeError> {
    numeric::multiply(&a, &b).map(Value::Scalar)
}
