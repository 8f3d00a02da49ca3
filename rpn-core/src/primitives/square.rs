// Square primitive: ( a -- a*a )

use crate::numeric;
use crate::value::{RuntimeError, Scalar, Value};

pub fn sqr_impl(a: Scalar) -> Result<Value, RuntimeError> {
    numeric::multiply(&a, &a).map(Value::Scalar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::vec;
    use crate::dispatch::one_arg;
    use crate::sequence::sized_range;

    #[test]
    fn test_sqr_impl() {
        assert_eq!(sqr_impl(Scalar::from(-3)).unwrap(), Value::from(9));
    }

    #[test]
    fn test_sqr_over_sequence() {
        let sqr = one_arg(sqr_impl);
        let seq = Value::Sequence(sized_range(Scalar::from(1), Scalar::from(1), 4));
        assert_eq!(sqr.call(seq).unwrap().materialize().unwrap(), Value::from(vec![1, 4, 9, 16]));
    }
}
