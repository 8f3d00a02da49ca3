// Negation primitive: ( a -- -a )

use crate::numeric;
use crate::value::{RuntimeError, Scalar, Value};

pub fn neg_impl(a: Scalar) -> Result<Value, RuntimeError> {
    numeric::negate(&a).map(Value::Scalar)
}
