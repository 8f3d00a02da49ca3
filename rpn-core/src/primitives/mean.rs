// Arithmetic mean primitive: ( coll -- mean )

use crate::dispatch::Collection;
use crate::numeric;
use crate::primitives::sum::aggregate;
use crate::value::{RuntimeError, Scalar, Value};

pub fn mean_impl(items: Collection) -> Result<Value, RuntimeError> {
    aggregate(items, &|total: Scalar, count: u64| {
        if count == 0 {
            return Err(RuntimeError::DomainError("mean of an empty list".into()));
        }
        numeric::divide(&total, &Scalar::from(count))
    }, 0)
}
