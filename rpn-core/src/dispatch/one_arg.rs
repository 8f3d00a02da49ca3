// One broadcast parameter: ( x -- f(x) )

use crate::compat::Rc;
use crate::config::DispatchConfig;
use crate::dispatch::{UnaryKernel, broadcast_one};
use crate::value::{RuntimeError, Scalar, Value};

/// A one-argument kernel that also accepts lists and sequences.
///
/// Lists come back as lists of results, nested lists included. Sequences
/// come back as sequences that call the kernel only when an element is
/// pulled.
#[derive(Clone)]
pub struct OneArg {
    kernel: Rc<UnaryKernel>,
    config: DispatchConfig,
}

pub fn one_arg<F>(kernel: F) -> OneArg
where
    F: Fn(Scalar) -> Result<Value, RuntimeError> + 'static,
{
    OneArg {
        kernel: Rc::new(kernel),
        config: DispatchConfig::default(),
    }
}

impl OneArg {
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn call(&self, value: Value) -> Result<Value, RuntimeError> {
        broadcast_one(value, &self.kernel, self.config, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::{Vec, vec};
    use crate::numeric;
    use crate::sequence::{ElementCount, LazySequence, arithmetic_range};
    use core::cell::Cell;

    fn square() -> OneArg {
        one_arg(|x| numeric::multiply(&x, &x).map(Value::Scalar))
    }

    #[test]
    fn test_scalar() {
        assert_eq!(square().call(Value::from(7)).unwrap(), Value::from(49));
    }

    #[test]
    fn test_nested_lists() {
        let input = Value::from(vec![Value::from(1), Value::from(vec![2, 3]), Value::from(Vec::<i32>::new())]);
        assert_eq!(
            square().call(input).unwrap(),
            Value::from(vec![Value::from(1), Value::from(vec![4, 9]), Value::List(Vec::new())])
        );
    }

    #[test]
    fn test_singleton_list_unwraps() {
        assert_eq!(square().call(Value::from(vec![5])).unwrap(), Value::from(25));
    }

    #[test]
    fn test_sequence_stays_lazy() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let double = one_arg(move |x| {
            counter.set(counter.get() + 1);
            numeric::add(&x, &x).map(Value::Scalar)
        });

        let seq = arithmetic_range(Scalar::from(1), Scalar::Number(f64::INFINITY), Scalar::from(1)).unwrap();
        let Value::Sequence(mut doubled) = double.call(Value::Sequence(seq)).unwrap() else {
            panic!("expected a sequence");
        };

        assert_eq!(calls.get(), 0);
        assert_eq!(doubled.take_list(3).unwrap(), Value::from(vec![2, 4, 6]));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_sequence_count_is_kept() {
        let seq = LazySequence::wrap(Value::from(vec![1, 2, 3]));
        let Value::Sequence(squared) = square().call(Value::Sequence(seq)).unwrap() else {
            panic!("expected a sequence");
        };
        assert_eq!(squared.count_hint(), ElementCount::Exact(3));
    }

    #[test]
    fn test_error_discards_eager_results() {
        let strict = one_arg(|x| match x {
            Scalar::Integer(_) => Ok(Value::Scalar(x)),
            other => Err(RuntimeError::TypeError(crate::compat::format!("{} given", other.type_name()))),
        });
        let result = strict.call(Value::from(vec![Value::from(1), Value::from("x"), Value::from(3)]));
        assert_eq!(result, Err(RuntimeError::TypeError("string given".into())));
    }
}
