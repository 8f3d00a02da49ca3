// Addition primitive - numeric addition, string concatenation, date offsets

use crate::numeric;
use crate::value::{RuntimeError, Scalar, Value};

// Addition: ( a b -- a+b )
pub fn add_impl(a: Scalar, b: Scalar) -> Result<Value, RuntimeError> {
    numeric::add(&a, &b).map(Value::Scalar)
}
