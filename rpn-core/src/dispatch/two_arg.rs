// Two broadcast parameters: ( a b -- f(a, b) )

use crate::compat::Rc;
use crate::config::DispatchConfig;
use crate::dispatch::{BinaryKernel, broadcast_two};
use crate::value::{RuntimeError, Scalar, Value};

/// A two-argument kernel that also accepts lists and sequences.
///
/// A list against a scalar maps over the list. Two lists are zipped, and
/// the longer one's extra elements are dropped. A sequence on either side
/// makes the result a sequence that is zipped or mapped one element at a
/// time.
#[derive(Clone)]
pub struct TwoArg {
    kernel: Rc<BinaryKernel>,
    config: DispatchConfig,
}

pub fn two_arg<F>(kernel: F) -> TwoArg
where
    F: Fn(Scalar, Scalar) -> Result<Value, RuntimeError> + 'static,
{
    TwoArg {
        kernel: Rc::new(kernel),
        config: DispatchConfig::default(),
    }
}

impl TwoArg {
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn call(&self, a: Value, b: Value) -> Result<Value, RuntimeError> {
        broadcast_two(a, b, &self.kernel, self.config, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::vec;
    use crate::numeric;
    use crate::sequence::{ElementCount, LazySequence, arithmetic_range};
    use core::cell::Cell;

    fn add() -> TwoArg {
        two_arg(|a, b| numeric::add(&a, &b).map(Value::Scalar))
    }

    fn unbounded(start: i64) -> Value {
        Value::Sequence(arithmetic_range(Scalar::from(start), Scalar::Number(f64::INFINITY), Scalar::from(1)).unwrap())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(add().call(Value::from(2), Value::from(3)).unwrap(), Value::from(5));
    }

    #[test]
    fn test_singletons_unwrap_to_scalar() {
        let result = add().call(Value::from(vec![2]), Value::from(vec![3])).unwrap();
        assert_eq!(result, Value::from(5));
    }

    #[test]
    fn test_scalar_against_list() {
        assert_eq!(
            add().call(Value::from(3), Value::from(vec![1, 2, 3])).unwrap(),
            Value::from(vec![4, 5, 6])
        );
        assert_eq!(
            add().call(Value::from(vec![1, 2, 3]), Value::from(3)).unwrap(),
            Value::from(vec![4, 5, 6])
        );
    }

    #[test]
    fn test_ragged_lists_truncate() {
        assert_eq!(
            add().call(Value::from(vec![1, 2, 3]), Value::from(vec![10, 20])).unwrap(),
            Value::from(vec![11, 22])
        );
        assert_eq!(
            add().call(Value::from(vec![1, 2, 3]), Value::from(vec![10, 20, 30, 40])).unwrap(),
            Value::from(vec![11, 22, 33])
        );
    }

    #[test]
    fn test_nested_lists_pair_recursively() {
        let a = Value::from(vec![Value::from(vec![1, 2]), Value::from(3)]);
        let b = Value::from(vec![10, 20]);
        assert_eq!(
            add().call(a, b).unwrap(),
            Value::from(vec![Value::from(vec![11, 12]), Value::from(23)])
        );
    }

    #[test]
    fn test_two_unbounded_sequences() {
        let Value::Sequence(mut sums) = add().call(unbounded(1), unbounded(100)).unwrap() else {
            panic!("expected a sequence");
        };
        assert_eq!(sums.count_hint(), ElementCount::Unknown);
        assert_eq!(sums.take_list(3).unwrap(), Value::from(vec![101, 103, 105]));
    }

    #[test]
    fn test_sequence_against_scalar_is_lazy() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let counted = two_arg(move |a, b| {
            counter.set(counter.get() + 1);
            numeric::multiply(&a, &b).map(Value::Scalar)
        });

        let Value::Sequence(mut products) = counted.call(Value::from(10), unbounded(1)).unwrap() else {
            panic!("expected a sequence");
        };
        assert_eq!(calls.get(), 0);
        assert_eq!(products.take_list(2).unwrap(), Value::from(vec![10, 20]));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_sequence_against_list_zips() {
        let seq = Value::Sequence(LazySequence::wrap(Value::from(vec![1, 2, 3])));
        let result = add().call(Value::from(vec![10, 20]), seq).unwrap();
        assert_eq!(result.materialize().unwrap(), Value::from(vec![11, 22]));
    }

    #[test]
    fn test_lazy_error_surfaces_at_failing_element() {
        let divide = two_arg(|a, b| numeric::divide(&a, &b).map(Value::Scalar));
        let denominators = Value::Sequence(LazySequence::wrap(Value::from(vec![1, 0, 2])));

        let Value::Sequence(mut quotients) = divide.call(Value::from(6), denominators).unwrap() else {
            panic!("expected a sequence");
        };
        assert_eq!(quotients.next(), Some(Ok(Value::from(6))));
        assert_eq!(quotients.next(), Some(Err(RuntimeError::DivisionByZero)));
        assert_eq!(quotients.next(), None);
    }
}
