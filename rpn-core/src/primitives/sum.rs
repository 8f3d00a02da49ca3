// Sum primitive: ( coll -- total )

use crate::compat::{Vec, format};
use crate::config::DispatchConfig;
use crate::dispatch::{Collection, check_depth};
use crate::numeric;
use crate::value::{RuntimeError, Scalar, Value};

pub fn sum_impl(items: Collection) -> Result<Value, RuntimeError> {
    aggregate(items, &|total: Scalar, _count: u64| Ok(total), 0)
}

// RUST CONCEPT: One pass, shared by every running-total primitive
// A flat collection is added up and `finish` sees the total and the element
// count. A collection whose first element is itself a collection is taken
// as rows, and each row is aggregated on its own. An empty collection
// reaches `finish` as a zero total over zero elements. Rows nest no deeper
// than the default dispatch limit.
pub(crate) fn aggregate<F>(items: Collection, finish: &F, depth: usize) -> Result<Value, RuntimeError>
where
    F: Fn(Scalar, u64) -> Result<Scalar, RuntimeError>,
{
    check_depth(DispatchConfig::default(), depth)?;
    let mut values = items.into_iter();
    let first = match values.next().transpose()? {
        Some(first) => first,
        None => return finish(Scalar::from(0), 0).map(Value::Scalar),
    };

    match first {
        Value::Scalar(first) => {
            let mut total = first;
            let mut count = 1u64;
            for item in values {
                match item? {
                    Value::Scalar(x) => total = numeric::add(&total, &x)?,
                    other => {
                        return Err(RuntimeError::TypeError(format!(
                            "Cannot add a {} to a running total",
                            other.type_name()
                        )));
                    }
                }
                count += 1;
            }
            finish(total, count).map(Value::Scalar)
        }
        row => core::iter::once(Ok(row))
            .chain(values)
            .map(|row| aggregate(Collection::from_value(row?), finish, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
    }
}
