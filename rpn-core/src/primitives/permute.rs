// Digit permutation primitive: ( n -- seq )
//
// Every rearrangement of the decimal digits of `n`, as integers, in
// lexicographic order of digit position. Duplicate digits give duplicate
// results.

use crate::compat::{ToString, Vec, format};
use crate::sequence::{assemble_digits, permutations};
use crate::value::{RuntimeError, Scalar, Value};
use num_traits::Signed;

pub fn permute_digits_impl(n: Scalar) -> Result<Value, RuntimeError> {
    let digits: Vec<Scalar> = match &n {
        Scalar::Integer(i) if !i.is_negative() => i
            .to_string()
            .chars()
            .map(|c| Scalar::String(format!("{}", c).into()))
            .collect(),
        other => {
            return Err(RuntimeError::DomainError(format!(
                "permute_digits needs a non-negative integer, got {}",
                other
            )));
        }
    };
    Ok(Value::Sequence(permutations(digits, assemble_digits)))
}
