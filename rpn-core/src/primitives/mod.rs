// Primitives module - one scalar or collection kernel per file
//
// Each `*_impl` function is the bare kernel. The operator table decides
// which broadcast strategy wraps it.

// Arithmetic
pub mod plus;
pub mod minus;
pub mod multiply;
pub mod divide;
pub mod pow;
pub mod negate;
pub mod square;

// Aggregates
pub mod sum;
pub mod mean;
pub mod count;

// Element access
pub mod nth;
pub mod sublist;

// Generators
pub mod range;
pub mod permute;
