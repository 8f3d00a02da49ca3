use crate::compat::{Rc, String, Vec, fmt};
use crate::sequence::LazySequence;

use num_bigint::BigInt;
#[cfg(feature = "complex_numbers")]
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

#[cfg(feature = "datetime")]
use chrono::NaiveDate;

// RUST CONCEPT: Scalars are the leaves of every value tree
// The dispatch engine never looks inside them; only kernels and the
// numeric helpers in `numeric.rs` do.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(BigInt),       // Arbitrary precision integer
    Rational(BigRational), // Exact rational number (fraction)
    Number(f64),           // Floating point number (inexact)
    #[cfg(feature = "complex_numbers")]
    Complex(Complex64), // Complex number (a + bi)
    #[cfg(feature = "datetime")]
    Date(NaiveDate), // Calendar date, steps are whole days
    String(Rc<str>),
    Boolean(bool),
}

impl Scalar {
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Integer(_) => "integer",
            Scalar::Rational(_) => "rational",
            Scalar::Number(_) => "number",
            #[cfg(feature = "complex_numbers")]
            Scalar::Complex(_) => "complex",
            #[cfg(feature = "datetime")]
            Scalar::Date(_) => "date",
            Scalar::String(_) => "string",
            Scalar::Boolean(_) => "boolean",
        }
    }

    // RUST CONCEPT: Keep exact results in their simplest form
    // - Rational with denominator 1 → Integer
    // - Complex with a zero imaginary part stays complex (it is inexact anyway)
    pub fn demote(self) -> Self {
        match self {
            Scalar::Rational(r) if r.numer().is_zero() => Scalar::Integer(BigInt::zero()),
            Scalar::Rational(r) if r.denom().is_one() => Scalar::Integer(r.to_integer()),
            other => other,
        }
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            Scalar::Integer(_) | Scalar::Rational(_) | Scalar::Number(_) => true,
            #[cfg(feature = "complex_numbers")]
            Scalar::Complex(_) => true,
            _ => false,
        }
    }

    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => i.to_f64(),
            Scalar::Rational(r) => r.to_f64(),
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }
}

macro_rules! scalar_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(n: $t) -> Self {
                    Scalar::Integer(BigInt::from(n))
                }
            }

            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Scalar(Scalar::from(n))
                }
            }
        )*
    };
}

scalar_from_integer!(i32, i64, u32, u64, usize);

impl From<BigInt> for Scalar {
    fn from(n: BigInt) -> Self {
        Scalar::Integer(n)
    }
}

impl From<BigRational> for Scalar {
    fn from(r: BigRational) -> Self {
        Scalar::Rational(r).demote()
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.into())
    }
}

#[cfg(feature = "complex_numbers")]
impl From<Complex64> for Scalar {
    fn from(c: Complex64) -> Self {
        Scalar::Complex(c)
    }
}

#[cfg(feature = "datetime")]
impl From<NaiveDate> for Scalar {
    fn from(d: NaiveDate) -> Self {
        Scalar::Date(d)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Scalar(Scalar::Number(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::from(s))
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<LazySequence> for Value {
    fn from(seq: LazySequence) -> Self {
        Value::Sequence(seq)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

// RUST CONCEPT: The three shapes a value can take
// Lists own their elements, so a value tree is always finite and acyclic.
// Sequences are pull-based streams and are deliberately not `Clone`:
// copying one means forking its production source (see `duplicate`).
pub enum Value {
    Scalar(Scalar),
    List(Vec<Value>),
    Sequence(LazySequence),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{:?}", s),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Sequence(seq) => write!(f, "Sequence({:?})", seq.count_hint()),
        }
    }
}

// Sequences are never equal to anything, themselves included: comparing
// them would mean draining them. Materialize first.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(s) => s.type_name(),
            Value::List(_) => "list",
            Value::Sequence(_) => "sequence",
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Strips every layer of length-1 list: `[[x]]` becomes `x`.
    pub fn unwrap_singleton(self) -> Value {
        let mut value = self;
        loop {
            match value {
                Value::List(mut items) if items.len() == 1 => {
                    value = items.pop().unwrap_or(Value::List(Vec::new()));
                }
                other => return other,
            }
        }
    }

    /// Copies the value, forking any sequence found inside it.
    ///
    /// `self` keeps yielding exactly what it would have yielded before the
    /// call; the returned copy yields the same elements independently.
    pub fn duplicate(&mut self) -> Value {
        match self {
            Value::Scalar(s) => Value::Scalar(s.clone()),
            Value::List(items) => Value::List(items.iter_mut().map(Value::duplicate).collect()),
            Value::Sequence(seq) => Value::Sequence(seq.fork()),
        }
    }

    /// Drains every nested sequence into a list.
    ///
    /// Never returns for an unbounded sequence.
    pub fn materialize(self) -> Result<Value, RuntimeError> {
        match self {
            Value::Scalar(_) => Ok(self),
            Value::List(items) => items
                .into_iter()
                .map(Value::materialize)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Value::Sequence(seq) => seq
                .map(|item| item.and_then(Value::materialize))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    TypeError(String),
    DomainError(String),
    DivisionByZero,
    IndexOutOfRange { index: usize, available: usize },
    NestingTooDeep { limit: usize },
    ArgumentCount { operator: String, expected: usize, found: usize },
    UndefinedOperator(String),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::TypeError(msg) => write!(f, "Type error: {}", msg),
            RuntimeError::DomainError(msg) => write!(f, "Domain error: {}", msg),
            RuntimeError::DivisionByZero => write!(f, "Division by zero"),
            RuntimeError::IndexOutOfRange { index, available } => write!(
                f,
                "Index {} out of range: sequence ended after {} elements",
                index, available
            ),
            RuntimeError::NestingTooDeep { limit } => {
                write!(f, "Value nesting exceeds the limit of {} levels", limit)
            }
            RuntimeError::ArgumentCount {
                operator,
                expected,
                found,
            } => write!(
                f,
                "'{}' requires {} arguments, {} given",
                operator, expected, found
            ),
            RuntimeError::UndefinedOperator(name) => write!(f, "Undefined operator: {}", name),
        }
    }
}

#[cfg(not(target_os = "none"))]
impl std::error::Error for RuntimeError {}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{}", i),
            // RUST CONCEPT: BigRational displays as "numerator/denominator"
            Scalar::Rational(r) => write!(f, "{}", r),
            Scalar::Number(n) => write!(f, "{}", n),
            #[cfg(feature = "complex_numbers")]
            Scalar::Complex(c) => {
                if c.im >= 0.0 {
                    write!(f, "{}+{}i", c.re, c.im)
                } else {
                    write!(f, "{}{}i", c.re, c.im)
                }
            }
            #[cfg(feature = "datetime")]
            Scalar::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Scalar::String(s) => write!(f, "\"{}\"", s),
            Scalar::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                let mut iter = items.iter();
                if let Some(first) = iter.next() {
                    write!(f, "{}", first)?;
                    for item in iter {
                        write!(f, " {}", item)?;
                    }
                }
                write!(f, "]")
            }
            // Displaying must not consume the stream
            Value::Sequence(seq) => match seq.count_hint().value() {
                Some(n) => write!(f, "<sequence:{}>", n),
                None => write!(f, "<sequence>"),
            },
        }
    }
}
