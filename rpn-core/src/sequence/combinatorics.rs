// Lazy permutations and cartesian products
//
// Tuples are produced in lexicographic order of input positions, one per
// pull. The caller decides what a tuple turns into through `assemble`.

use crate::compat::{String, Vec, format};
use crate::sequence::{ElementCount, LazySequence};
use crate::value::{RuntimeError, Scalar, Value};
use num_bigint::BigInt;

/// Every ordering of `items`, each handed to `assemble`.
pub fn permutations<F>(items: Vec<Scalar>, mut assemble: F) -> LazySequence
where
    F: FnMut(Vec<Scalar>) -> Result<Value, RuntimeError> + 'static,
{
    let count = (1..=items.len() as u64)
        .try_fold(1u64, |acc, n| acc.checked_mul(n))
        .map_or(ElementCount::Unknown, ElementCount::Exact);

    let tuples = PermutationIndices::new(items.len())
        .map(move |indices| assemble(indices.iter().map(|&i| items[i].clone()).collect()));
    LazySequence::new(tuples, count)
}

/// Every tuple taking one element from each source, each handed to `assemble`.
pub fn cartesian_product<F>(sources: Vec<Vec<Scalar>>, mut assemble: F) -> LazySequence
where
    F: FnMut(Vec<Scalar>) -> Result<Value, RuntimeError> + 'static,
{
    let count = sources
        .iter()
        .try_fold(1u64, |acc, source| acc.checked_mul(source.len() as u64))
        .map_or(ElementCount::Unknown, ElementCount::Exact);

    let lengths = sources.iter().map(Vec::len).collect();
    let tuples = Odometer::new(lengths).map(move |indices| {
        assemble(
            indices
                .iter()
                .zip(&sources)
                .map(|(&i, source)| source[i].clone())
                .collect(),
        )
    });
    LazySequence::new(tuples, count)
}

/// Concatenates the parts' digits and reads the result as one integer,
/// so `[1, 2, 3]` becomes `123`.
pub fn assemble_digits(parts: Vec<Scalar>) -> Result<Value, RuntimeError> {
    let mut digits = String::new();
    for part in &parts {
        match part {
            Scalar::String(s) => digits.push_str(s),
            other => digits.push_str(&format!("{}", other)),
        }
    }
    digits
        .parse::<BigInt>()
        .map(|n| Value::Scalar(Scalar::Integer(n)))
        .map_err(|_| RuntimeError::DomainError(format!("'{}' is not an integer", digits)))
}

pub fn assemble_list(parts: Vec<Scalar>) -> Result<Value, RuntimeError> {
    Ok(Value::List(parts.into_iter().map(Value::Scalar).collect()))
}

// RUST CONCEPT: Index permutations without materializing them all
// The cycle-counting scheme: each step swaps one pair of positions or
// rotates a suffix, so the whole enumeration needs O(n) state.
struct PermutationIndices {
    indices: Vec<usize>,
    cycles: Vec<usize>,
    started: bool,
    done: bool,
}

impl PermutationIndices {
    fn new(n: usize) -> Self {
        PermutationIndices {
            indices: (0..n).collect(),
            cycles: (1..=n).rev().collect(),
            started: false,
            done: false,
        }
    }
}

impl Iterator for PermutationIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let n = self.indices.len();
        for i in (0..n).rev() {
            self.cycles[i] -= 1;
            if self.cycles[i] == 0 {
                self.indices[i..].rotate_left(1);
                self.cycles[i] = n - i;
            } else {
                let j = self.cycles[i];
                self.indices.swap(i, n - j);
                return Some(self.indices.clone());
            }
        }

        self.done = true;
        None
    }
}

// Mixed-radix counter; the rightmost position turns fastest
struct Odometer {
    lengths: Vec<usize>,
    indices: Vec<usize>,
    done: bool,
}

impl Odometer {
    fn new(lengths: Vec<usize>) -> Self {
        let done = lengths.contains(&0);
        Odometer {
            indices: lengths.iter().map(|_| 0).collect(),
            lengths,
            done,
        }
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        self.done = true;
        for position in (0..self.lengths.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.lengths[position] {
                self.done = false;
                break;
            }
            self.indices[position] = 0;
        }

        Some(current)
    }
}
