// Element count primitive: ( coll -- n )

use crate::dispatch::Collection;
use crate::sequence::ElementCount;
use crate::value::{RuntimeError, Value};

// An exact count is trusted; anything else means walking the collection
pub fn count_impl(items: Collection) -> Result<Value, RuntimeError> {
    if let ElementCount::Exact(n) = items.count_hint() {
        return Ok(Value::from(n));
    }

    let mut n = 0u64;
    for item in items {
        item?;
        n += 1;
    }
    Ok(Value::from(n))
}
