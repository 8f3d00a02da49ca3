// Power primitive

use crate::compat::ToString;
use crate::numeric;
use crate::value::{RuntimeError, Scalar, Value};

// RUST CONCEPT: Exponentiation with NaN/infinity checking
// ( base exponent -- base^exponent )
pub fn pow_impl(base: Scalar, exponent: Scalar) -> Result<Value, RuntimeError> {
    let result = numeric::power(&base, &exponent)?;

    // Only the inexact path can produce these
    if let Scalar::Number(n) = result {
        if n.is_nan() {
            return Err(RuntimeError::DomainError("pow result is NaN".to_string()));
        }
        if n.is_infinite() {
            return Err(RuntimeError::DomainError("pow result is infinite".to_string()));
        }
    }

    Ok(Value::Scalar(result))
}
