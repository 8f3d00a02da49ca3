// Range constructors
//
// Each builds a LazySequence over scalars. Arithmetic ranges carry an
// estimated count, the fixed-size ranges an exact one.

use crate::numeric;
use crate::sequence::{ElementCount, LazySequence};
use crate::value::{RuntimeError, Scalar, Value};
use core::cmp::Ordering;

/// `start, start+step, …` up to and including `end`.
///
/// Counting down from a larger `start` negates a positive `step`. An
/// unbounded range is made with an infinite `end`.
pub fn arithmetic_range(start: Scalar, end: Scalar, step: Scalar) -> Result<LazySequence, RuntimeError> {
    if numeric::is_zero(&step) {
        return Err(RuntimeError::DomainError("range step cannot be zero".into()));
    }

    let step = if numeric::compare(&start, &end)? == Ordering::Greater && !numeric::is_negative(&step)? {
        numeric::negate(&step)?
    } else {
        step
    };
    let ascending = !numeric::is_negative(&step)?;
    let count = estimate_count(&start, &end, &step);

    let mut state = Some(Ok(start));
    let values = core::iter::from_fn(move || {
        let current = match state.take()? {
            Ok(current) => current,
            Err(e) => return Some(Err(e)),
        };
        let past_end = match numeric::compare(&current, &end) {
            Ok(Ordering::Greater) => ascending,
            Ok(Ordering::Less) => !ascending,
            Ok(Ordering::Equal) => false,
            Err(e) => return Some(Err(e)),
        };
        if past_end {
            return None;
        }
        state = Some(numeric::add(&current, &step));
        Some(Ok(Value::Scalar(current)))
    });

    Ok(LazySequence::new(values, count))
}

// ceil((|end - start| + 1) / |step|), when the element type can do the
// arithmetic and the answer is finite. A step pointing away from `end`
// never gets past `start`.
fn estimate_count(start: &Scalar, end: &Scalar, step: &Scalar) -> ElementCount {
    let span = match numeric::subtract(end, start) {
        Ok(span) => span,
        Err(_) => return ElementCount::Unknown,
    };
    if !numeric::is_zero(&span) {
        if let (Ok(backwards), Ok(descending)) = (numeric::is_negative(&span), numeric::is_negative(step)) {
            if backwards != descending {
                return ElementCount::Estimated(0);
            }
        }
    }

    let estimate = numeric::abs(&span)
        .and_then(|span| numeric::add(&span, &Scalar::from(1)))
        .and_then(|span| numeric::divide(&span, &numeric::abs(step)?))
        .ok()
        .and_then(|n| numeric::ceil_to_u64(&n));

    match estimate {
        Some(n) => ElementCount::Estimated(n),
        None => ElementCount::Unknown,
    }
}

/// Exactly `count` elements: `start, start+step, …, start+(count-1)*step`.
pub fn sized_range(start: Scalar, step: Scalar, count: u64) -> LazySequence {
    successive(start, count, move |current| numeric::add(current, &step))
}

/// `count` elements, each `ratio` times the previous one.
pub fn geometric_range(start: Scalar, ratio: Scalar, count: u64) -> LazySequence {
    successive(start, count, move |current| numeric::multiply(current, &ratio))
}

/// `count` elements, each the previous one raised to `exponent`.
pub fn exponential_range(start: Scalar, exponent: Scalar, count: u64) -> LazySequence {
    successive(start, count, move |current| numeric::power(current, &exponent))
}

// The next element is only computed once the current one has been handed out
fn successive<F>(start: Scalar, count: u64, mut step: F) -> LazySequence
where
    F: FnMut(&Scalar) -> Result<Scalar, RuntimeError> + 'static,
{
    let mut remaining = count;
    let mut state = Some(Ok(start));
    let values = core::iter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        remaining -= 1;
        let current = match state.take()? {
            Ok(current) => current,
            Err(e) => return Some(Err(e)),
        };
        if remaining > 0 {
            state = Some(step(&current));
        }
        Some(Ok(Value::Scalar(current)))
    });

    LazySequence::new(values, ElementCount::Exact(count))
}
