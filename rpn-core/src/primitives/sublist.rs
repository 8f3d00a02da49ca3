// Sublist primitive: ( coll start count -- coll[start..start+count] )
//
// A list gives a list. A sequence gives a sequence that skips and takes
// as it is pulled, so it works on unbounded input.

use crate::dispatch::Collection;
use crate::numeric;
use crate::sequence::{ElementCount, LazySequence};
use crate::value::{RuntimeError, Scalar, Value};

pub fn sublist_impl(items: Collection, start: Scalar, count: Scalar) -> Result<Value, RuntimeError> {
    let start = numeric::to_index(&start, "start")?;
    let count = numeric::to_index(&count, "count")?;

    match items {
        Collection::List(items) => Ok(Value::List(items.into_iter().skip(start).take(count).collect())),
        Collection::Sequence(seq) => {
            let remaining = match seq.count_hint() {
                ElementCount::Exact(n) => ElementCount::Exact(n.saturating_sub(start as u64)),
                ElementCount::Estimated(n) => ElementCount::Estimated(n.saturating_sub(start as u64)),
                ElementCount::Unknown => ElementCount::Unknown,
            };
            let expected = remaining.min(ElementCount::Exact(count as u64));
            Ok(Value::Sequence(LazySequence::new(seq.skip(start).take(count), expected)))
        }
    }
}
