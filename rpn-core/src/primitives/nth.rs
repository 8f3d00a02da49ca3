// Element access primitive: ( coll i -- coll[i] )

use crate::dispatch::Collection;
use crate::numeric;
use crate::value::{RuntimeError, Scalar, Value};
use num_traits::{Signed, ToPrimitive};

// Negative positions count back from the end of a list. A sequence has no
// known end, so it only takes positions from the front.
pub fn nth_impl(items: Collection, index: Scalar) -> Result<Value, RuntimeError> {
    match items {
        Collection::List(mut items) => {
            let position = match &index {
                Scalar::Integer(i) if i.is_negative() => i
                    .abs()
                    .to_usize()
                    .and_then(|back| items.len().checked_sub(back))
                    .ok_or(RuntimeError::IndexOutOfRange {
                        index: i.abs().to_usize().unwrap_or(usize::MAX),
                        available: items.len(),
                    })?,
                other => numeric::to_index(other, "index")?,
            };
            if position < items.len() {
                Ok(items.swap_remove(position))
            } else {
                Err(RuntimeError::IndexOutOfRange {
                    index: position,
                    available: items.len(),
                })
            }
        }
        Collection::Sequence(mut seq) => seq.index(numeric::to_index(&index, "index")?),
    }
}
