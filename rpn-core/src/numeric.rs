// RUST CONCEPT: Numeric type promotion system
// Arithmetic on scalars for the range constructors and the builtin kernels.
// Operands of different numeric types are promoted to a common type first.

use crate::compat::format;
use crate::value::{RuntimeError, Scalar};
use core::cmp::Ordering;
use num_bigint::BigInt;
#[cfg(feature = "complex_numbers")]
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

#[cfg(target_os = "none")]
use num_traits::Float;

// RUST CONCEPT: Type promotion hierarchy
// Integer < Rational (both exact) < Number (inexact) < Complex
// Mixing exact and inexact types promotes to inexact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum NumericType {
    Integer,
    Rational,
    Number,
    #[cfg(feature = "complex_numbers")]
    Complex,
}

fn numeric_type(val: &Scalar) -> Option<NumericType> {
    match val {
        Scalar::Integer(_) => Some(NumericType::Integer),
        Scalar::Rational(_) => Some(NumericType::Rational),
        Scalar::Number(_) => Some(NumericType::Number),
        #[cfg(feature = "complex_numbers")]
        Scalar::Complex(_) => Some(NumericType::Complex),
        _ => None,
    }
}

fn promote_to(val: &Scalar, target: NumericType) -> Scalar {
    match (val, target) {
        (Scalar::Integer(i), NumericType::Rational) => Scalar::Rational(BigRational::from(i.clone())),
        (Scalar::Integer(i), NumericType::Number) => Scalar::Number(i.to_f64().unwrap_or(f64::INFINITY)),
        (Scalar::Rational(r), NumericType::Number) => Scalar::Number(r.to_f64().unwrap_or(f64::NAN)),
        #[cfg(feature = "complex_numbers")]
        (_, NumericType::Complex) => match val {
            Scalar::Complex(_) => val.clone(),
            other => Scalar::Complex(Complex64::new(other.to_f64().unwrap_or(f64::NAN), 0.0)),
        },
        // Already the target type, or not a numeric promotion at all
        _ => val.clone(),
    }
}

// Returns (promoted_a, promoted_b); non-numeric operands come back unchanged
pub fn promote_pair(a: &Scalar, b: &Scalar) -> (Scalar, Scalar) {
    match (numeric_type(a), numeric_type(b)) {
        (Some(ta), Some(tb)) => {
            let target = ta.max(tb);
            (promote_to(a, target), promote_to(b, target))
        }
        _ => (a.clone(), b.clone()),
    }
}

fn mismatch(op: &str, a: &Scalar, b: &Scalar) -> RuntimeError {
    RuntimeError::TypeError(format!(
        "Cannot {} {} and {}",
        op,
        a.type_name(),
        b.type_name()
    ))
}

#[cfg(feature = "datetime")]
fn shift_date(date: &chrono::NaiveDate, days: &BigInt) -> Result<Scalar, RuntimeError> {
    days.to_i64()
        .and_then(chrono::TimeDelta::try_days)
        .and_then(|delta| date.checked_add_signed(delta))
        .map(Scalar::Date)
        .ok_or_else(|| RuntimeError::DomainError(format!("date {} + {} days is out of range", date, days)))
}

pub fn add(a: &Scalar, b: &Scalar) -> Result<Scalar, RuntimeError> {
    match (a, b) {
        // String concatenation: either side a string
        (Scalar::String(_), _) | (_, Scalar::String(_)) => {
            let text = |s: &Scalar| match s {
                Scalar::String(s) => format!("{}", s),
                other => format!("{}", other),
            };
            return Ok(Scalar::String(format!("{}{}", text(a), text(b)).into()));
        }
        #[cfg(feature = "datetime")]
        (Scalar::Date(d), Scalar::Integer(n)) | (Scalar::Integer(n), Scalar::Date(d)) => {
            return shift_date(d, n);
        }
        _ => {}
    }

    let (pa, pb) = promote_pair(a, b);
    match (&pa, &pb) {
        (Scalar::Integer(x), Scalar::Integer(y)) => Ok(Scalar::Integer(x + y)),
        (Scalar::Rational(x), Scalar::Rational(y)) => Ok(Scalar::Rational(x + y).demote()),
        (Scalar::Number(x), Scalar::Number(y)) => Ok(Scalar::Number(x + y)),
        #[cfg(feature = "complex_numbers")]
        (Scalar::Complex(x), Scalar::Complex(y)) => Ok(Scalar::Complex(x + y)),
        _ => Err(mismatch("add", a, b)),
    }
}

#[cfg(feature = "datetime")]
fn subtract_dates(a: &Scalar, b: &Scalar) -> Option<Result<Scalar, RuntimeError>> {
    match (a, b) {
        (Scalar::Date(x), Scalar::Date(y)) => Some(Ok(Scalar::Integer(BigInt::from(
            x.signed_duration_since(*y).num_days(),
        )))),
        (Scalar::Date(d), Scalar::Integer(n)) => Some(shift_date(d, &-n)),
        _ => None,
    }
}

#[cfg(not(feature = "datetime"))]
fn subtract_dates(_a: &Scalar, _b: &Scalar) -> Option<Result<Scalar, RuntimeError>> {
    None
}

pub fn subtract(a: &Scalar, b: &Scalar) -> Result<Scalar, RuntimeError> {
    if let Some(result) = subtract_dates(a, b) {
        return result;
    }

    let (pa, pb) = promote_pair(a, b);
    match (&pa, &pb) {
        (Scalar::Integer(x), Scalar::Integer(y)) => Ok(Scalar::Integer(x - y)),
        (Scalar::Rational(x), Scalar::Rational(y)) => Ok(Scalar::Rational(x - y).demote()),
        (Scalar::Number(x), Scalar::Number(y)) => Ok(Scalar::Number(x - y)),
        #[cfg(feature = "complex_numbers")]
        (Scalar::Complex(x), Scalar::Complex(y)) => Ok(Scalar::Complex(x - y)),
        _ => Err(mismatch("subtract", a, b)),
    }
}

pub fn multiply(a: &Scalar, b: &Scalar) -> Result<Scalar, RuntimeError> {
    let (pa, pb) = promote_pair(a, b);
    match (&pa, &pb) {
        (Scalar::Integer(x), Scalar::Integer(y)) => Ok(Scalar::Integer(x * y)),
        (Scalar::Rational(x), Scalar::Rational(y)) => Ok(Scalar::Rational(x * y).demote()),
        (Scalar::Number(x), Scalar::Number(y)) => Ok(Scalar::Number(x * y)),
        #[cfg(feature = "complex_numbers")]
        (Scalar::Complex(x), Scalar::Complex(y)) => Ok(Scalar::Complex(x * y)),
        _ => Err(mismatch("multiply", a, b)),
    }
}

// Integer / Integer is exact: the result is a rational, demoted when whole
pub fn divide(a: &Scalar, b: &Scalar) -> Result<Scalar, RuntimeError> {
    if is_zero(b) {
        return Err(RuntimeError::DivisionByZero);
    }

    let (pa, pb) = promote_pair(a, b);
    match (&pa, &pb) {
        (Scalar::Integer(x), Scalar::Integer(y)) => {
            Ok(Scalar::Rational(BigRational::new(x.clone(), y.clone())).demote())
        }
        (Scalar::Rational(x), Scalar::Rational(y)) => Ok(Scalar::Rational(x / y).demote()),
        (Scalar::Number(x), Scalar::Number(y)) => Ok(Scalar::Number(x / y)),
        #[cfg(feature = "complex_numbers")]
        (Scalar::Complex(x), Scalar::Complex(y)) => Ok(Scalar::Complex(x / y)),
        _ => Err(mismatch("divide", a, b)),
    }
}

fn exact_power(base: &BigRational, exponent: &BigInt) -> Result<Scalar, RuntimeError> {
    let magnitude = exponent
        .abs()
        .to_u32()
        .ok_or_else(|| RuntimeError::DomainError(format!("exponent {} is too large", exponent)))?;
    let numer = base.numer().pow(magnitude);
    let denom = base.denom().pow(magnitude);
    if exponent.is_negative() {
        if numer.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        Ok(Scalar::Rational(BigRational::new(denom, numer)).demote())
    } else {
        Ok(Scalar::Rational(BigRational::new(numer, denom)).demote())
    }
}

// Exact bases raised to integer exponents stay exact
pub fn power(a: &Scalar, b: &Scalar) -> Result<Scalar, RuntimeError> {
    match (a, b) {
        (Scalar::Integer(x), Scalar::Integer(e)) => exact_power(&BigRational::from(x.clone()), e),
        (Scalar::Rational(x), Scalar::Integer(e)) => exact_power(x, e),
        #[cfg(feature = "complex_numbers")]
        (Scalar::Complex(_), _) | (_, Scalar::Complex(_)) => {
            let (pa, pb) = promote_pair(a, b);
            match (pa, pb) {
                (Scalar::Complex(x), Scalar::Complex(y)) => Ok(Scalar::Complex(x.powc(y))),
                _ => Err(mismatch("exponentiate", a, b)),
            }
        }
        _ => match (a.to_f64(), b.to_f64()) {
            (Some(x), Some(y)) => Ok(Scalar::Number(x.powf(y))),
            _ => Err(mismatch("exponentiate", a, b)),
        },
    }
}

pub fn negate(a: &Scalar) -> Result<Scalar, RuntimeError> {
    match a {
        Scalar::Integer(x) => Ok(Scalar::Integer(-x)),
        Scalar::Rational(x) => Ok(Scalar::Rational(-x)),
        Scalar::Number(x) => Ok(Scalar::Number(-x)),
        #[cfg(feature = "complex_numbers")]
        Scalar::Complex(x) => Ok(Scalar::Complex(-x)),
        other => Err(RuntimeError::TypeError(format!("Cannot negate {}", other.type_name()))),
    }
}

pub fn abs(a: &Scalar) -> Result<Scalar, RuntimeError> {
    match a {
        Scalar::Integer(x) => Ok(Scalar::Integer(x.abs())),
        Scalar::Rational(x) => Ok(Scalar::Rational(x.abs())),
        Scalar::Number(x) => Ok(Scalar::Number(x.abs())),
        #[cfg(feature = "complex_numbers")]
        Scalar::Complex(x) => Ok(Scalar::Number(x.norm())),
        other => Err(RuntimeError::TypeError(format!(
            "Cannot take the absolute value of {}",
            other.type_name()
        ))),
    }
}

pub fn is_zero(a: &Scalar) -> bool {
    match a {
        Scalar::Integer(x) => x.is_zero(),
        Scalar::Rational(x) => x.is_zero(),
        Scalar::Number(x) => *x == 0.0,
        #[cfg(feature = "complex_numbers")]
        Scalar::Complex(x) => x.re == 0.0 && x.im == 0.0,
        _ => false,
    }
}

pub fn is_negative(a: &Scalar) -> Result<bool, RuntimeError> {
    match a {
        Scalar::Integer(x) => Ok(x.is_negative()),
        Scalar::Rational(x) => Ok(x.is_negative()),
        Scalar::Number(x) => Ok(*x < 0.0),
        other => Err(RuntimeError::TypeError(format!("{} has no sign", other.type_name()))),
    }
}

// Total order for real numbers, dates, strings and booleans
pub fn compare(a: &Scalar, b: &Scalar) -> Result<Ordering, RuntimeError> {
    match (a, b) {
        #[cfg(feature = "datetime")]
        (Scalar::Date(x), Scalar::Date(y)) => return Ok(x.cmp(y)),
        (Scalar::String(x), Scalar::String(y)) => return Ok(x.cmp(y)),
        (Scalar::Boolean(x), Scalar::Boolean(y)) => return Ok(x.cmp(y)),
        _ => {}
    }

    let (pa, pb) = promote_pair(a, b);
    match (&pa, &pb) {
        (Scalar::Integer(x), Scalar::Integer(y)) => Ok(x.cmp(y)),
        (Scalar::Rational(x), Scalar::Rational(y)) => Ok(x.cmp(y)),
        (Scalar::Number(x), Scalar::Number(y)) => x
            .partial_cmp(y)
            .ok_or_else(|| RuntimeError::DomainError(format!("Cannot order {} and {}", x, y))),
        _ => Err(mismatch("compare", a, b)),
    }
}

// Smallest whole number >= a, if it is finite and fits in a u64
pub fn ceil_to_u64(a: &Scalar) -> Option<u64> {
    match a {
        Scalar::Integer(x) => x.to_u64(),
        Scalar::Rational(x) => x.ceil().to_integer().to_u64(),
        Scalar::Number(x) if x.is_finite() => x.ceil().to_u64(),
        _ => None,
    }
}

// Integer arguments used as positions and counts
pub fn to_index(a: &Scalar, what: &str) -> Result<usize, RuntimeError> {
    match a {
        Scalar::Integer(x) if x.is_negative() => {
            Err(RuntimeError::DomainError(format!("{} must not be negative, got {}", what, x)))
        }
        Scalar::Integer(x) => x
            .to_usize()
            .ok_or_else(|| RuntimeError::DomainError(format!("{} {} is too large", what, x))),
        other => Err(RuntimeError::TypeError(format!(
            "{} must be an integer, got {}",
            what,
            other.type_name()
        ))),
    }
}
