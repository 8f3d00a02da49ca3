// Range primitives
//
// `range` counts by one and broadcasts over its two bounds. The other
// constructors take exactly three scalars.

use crate::numeric;
use crate::sequence;
use crate::value::{RuntimeError, Scalar, Value};

// ( start end -- seq )
pub fn range_impl(start: Scalar, end: Scalar) -> Result<Value, RuntimeError> {
    sequence::arithmetic_range(start, end, Scalar::from(1)).map(Value::Sequence)
}

// ( start end step -- seq )
pub fn interval_range_impl(start: Scalar, end: Scalar, step: Scalar) -> Result<Value, RuntimeError> {
    sequence::arithmetic_range(start, end, step).map(Value::Sequence)
}

// ( start step count -- seq )
pub fn sized_range_impl(start: Scalar, step: Scalar, count: Scalar) -> Result<Value, RuntimeError> {
    let count = numeric::to_index(&count, "count")? as u64;
    Ok(Value::Sequence(sequence::sized_range(start, step, count)))
}

// ( start ratio count -- seq )
pub fn geometric_range_impl(start: Scalar, ratio: Scalar, count: Scalar) -> Result<Value, RuntimeError> {
    let count = numeric::to_index(&count, "count")? as u64;
    Ok(Value::Sequence(sequence::geometric_range(start, ratio, count)))
}

// ( start exponent count -- seq )
pub fn exponential_range_impl(start: Scalar, exponent: Scalar, count: Scalar) -> Result<Value, RuntimeError> {
    let count = numeric::to_index(&count, "count")? as u64;
    Ok(Value::Sequence(sequence::exponential_range(start, exponent, count)))
}
