//! Pull-based lazy sequences of values.
//!
//! A [`LazySequence`] wraps an iterator of `Result<Value, RuntimeError>` and
//! is single-pass: once an element has been pulled it is gone. Everything
//! that needs to look at a sequence twice goes through [`LazySequence::fork`],
//! which routes the production source through a shared fan-out buffer.
//!
//! The combinators here (`map`, `filter`, `zip_with`) are associated
//! functions rather than methods so they never shadow the `Iterator`
//! methods of the same name.

pub mod combinatorics;
mod fanout;
pub mod range;

use crate::compat::{Box, Vec};
use crate::value::{RuntimeError, Value};

pub use combinatorics::{assemble_digits, assemble_list, cartesian_product, permutations};
pub use fanout::BACKLOG_WARN_THRESHOLD;
pub use range::{arithmetic_range, exponential_range, geometric_range, sized_range};

/// One production step: a value, or the error that ended the sequence.
pub type Item = Result<Value, RuntimeError>;

type Source = Box<dyn Iterator<Item = Item>>;

// RUST CONCEPT: Where a sequence pulls from
// A sequence starts out owning its source. The first fork moves that source
// into a fan-out buffer, and every later fork of any branch joins the same
// buffer instead of wrapping another one around it.
enum Origin {
    Direct(Source),
    Fanout(fanout::Branch),
}

impl Iterator for Origin {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        match self {
            Origin::Direct(source) => source.next(),
            Origin::Fanout(branch) => branch.next(),
        }
    }
}

/// Advisory element count. Never use it as a loop bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCount {
    Exact(u64),
    Estimated(u64),
    Unknown,
}

impl ElementCount {
    pub fn value(&self) -> Option<u64> {
        match self {
            ElementCount::Exact(n) | ElementCount::Estimated(n) => Some(*n),
            ElementCount::Unknown => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, ElementCount::Exact(_))
    }

    // Count of a truncating zip: the shorter side wins, and a side with a
    // known count still bounds one without
    pub fn min(self, other: ElementCount) -> ElementCount {
        match (self, other) {
            (ElementCount::Exact(a), ElementCount::Exact(b)) => ElementCount::Exact(a.min(b)),
            (a, b) => match (a.value(), b.value()) {
                (Some(a), Some(b)) => ElementCount::Estimated(a.min(b)),
                (Some(n), None) | (None, Some(n)) => ElementCount::Estimated(n),
                (None, None) => ElementCount::Unknown,
            },
        }
    }
}

pub struct LazySequence {
    origin: Origin,
    count: ElementCount,
    finished: bool,
    close_hook: Option<Box<dyn FnOnce()>>,
}

impl LazySequence {
    pub fn new<I>(source: I, count: ElementCount) -> Self
    where
        I: Iterator<Item = Item> + 'static,
    {
        tracing::trace!(?count, "creating lazy sequence");
        LazySequence {
            origin: Origin::Direct(Box::new(source)),
            count,
            finished: false,
            close_hook: None,
        }
    }

    pub fn from_values<I>(values: I, count: ElementCount) -> Self
    where
        I: Iterator<Item = Value> + 'static,
    {
        LazySequence::new(values.map(Ok), count)
    }

    pub fn empty() -> Self {
        LazySequence::new(core::iter::empty(), ElementCount::Exact(0))
    }

    /// A scalar becomes a one-element sequence, a list a sequence over its
    /// elements. A sequence is returned as is.
    pub fn wrap(value: Value) -> Self {
        match value {
            Value::Sequence(seq) => seq,
            Value::List(items) => {
                let count = ElementCount::Exact(items.len() as u64);
                LazySequence::from_values(items.into_iter(), count)
            }
            scalar @ Value::Scalar(_) => {
                LazySequence::from_values(core::iter::once(scalar), ElementCount::Exact(1))
            }
        }
    }

    /// Advisory size of the sequence. Unlike `Iterator::count` this never
    /// pulls an element.
    pub fn count_hint(&self) -> ElementCount {
        self.count
    }

    /// Registers a hook that runs once when the sequence is dropped, whether
    /// or not it was drained. A hook registered before a fork runs when the
    /// last of the forked sequences is dropped.
    pub fn on_close<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let hook: Box<dyn FnOnce()> = match self.close_hook.take() {
            Some(previous) => Box::new(move || {
                previous();
                hook();
            }),
            None => Box::new(hook),
        };
        self.close_hook = Some(hook);
        self
    }

    /// Abandons the sequence, releasing its production step now.
    pub fn close(self) {
        drop(self);
    }

    /// Applies `f` to each element as it is pulled.
    pub fn map<F>(source: LazySequence, mut f: F) -> LazySequence
    where
        F: FnMut(Value) -> Item + 'static,
    {
        let count = source.count;
        LazySequence::new(source.map(move |item| item.and_then(&mut f)), count)
    }

    /// Keeps the elements for which `predicate(x) != invert`.
    pub fn filter<P>(source: LazySequence, mut predicate: P, invert: bool) -> LazySequence
    where
        P: FnMut(&Value) -> Result<bool, RuntimeError> + 'static,
    {
        let mut source = source;
        let filtered = core::iter::from_fn(move || {
            loop {
                let value = match source.next()? {
                    Ok(value) => value,
                    Err(e) => return Some(Err(e)),
                };
                match predicate(&value) {
                    Ok(keep) if keep != invert => return Some(Ok(value)),
                    Ok(_) => continue,
                    Err(e) => return Some(Err(e)),
                }
            }
        });
        LazySequence::new(filtered, ElementCount::Unknown)
    }

    /// Pairs the two sequences element by element and stops as soon as
    /// either side runs out.
    pub fn zip_with<F>(left: LazySequence, right: LazySequence, mut f: F) -> LazySequence
    where
        F: FnMut(Value, Value) -> Item + 'static,
    {
        let count = left.count.min(right.count);
        let (mut left, mut right) = (left, right);
        let zipped = core::iter::from_fn(move || {
            let a = match left.next()? {
                Ok(value) => value,
                Err(e) => return Some(Err(e)),
            };
            let b = match right.next()? {
                Ok(value) => value,
                Err(e) => return Some(Err(e)),
            };
            Some(f(a, b))
        });
        LazySequence::new(zipped, count)
    }

    /// Gives an independent sequence over the same remaining elements.
    ///
    /// Both `self` and the returned sequence read from one shared source;
    /// whatever one of them has pulled and the other has not yet is held in
    /// an unbounded backlog. Draining one branch far ahead of the other keeps
    /// every element in memory. Forking a fork adds one more backlog to the
    /// same buffer, and a dropped fork frees its backlog for the next one.
    pub fn fork(&mut self) -> LazySequence {
        let origin = core::mem::replace(
            &mut self.origin,
            Origin::Direct(Box::new(core::iter::empty())),
        );
        let branch = match origin {
            Origin::Fanout(branch) => branch,
            Origin::Direct(source) => fanout::Branch::new(source),
        };
        // The production step now belongs to every branch
        if let Some(hook) = self.close_hook.take() {
            branch.add_close_hook(hook);
        }
        let other = branch.fork();
        self.origin = Origin::Fanout(branch);
        LazySequence {
            origin: Origin::Fanout(other),
            count: self.count,
            finished: self.finished,
            close_hook: None,
        }
    }

    pub fn split(mut self) -> (LazySequence, LazySequence) {
        let other = self.fork();
        (self, other)
    }

    /// Element `index`, found by walking a temporary fork from the start.
    ///
    /// O(index) on every call; nothing is memoized and `self` still yields
    /// its full contents afterwards. The fork is released on return, so
    /// repeated calls do not pile up.
    pub fn index(&mut self, index: usize) -> Result<Value, RuntimeError> {
        let mut walker = self.fork();
        let mut seen = 0;
        while let Some(item) = walker.next() {
            let value = item?;
            if seen == index {
                return Ok(value);
            }
            seen += 1;
        }
        Err(RuntimeError::IndexOutOfRange {
            index,
            available: seen,
        })
    }

    /// Elements `start..end` as a list, found the same way as [`index`](Self::index).
    /// A range running past the end is cut short.
    pub fn slice(&mut self, start: usize, end: usize) -> Result<Value, RuntimeError> {
        let walker = self.fork();
        let items = walker
            .skip(start)
            .take(end.saturating_sub(start))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::List(items))
    }

    /// Pulls at most `n` elements into a list.
    pub fn take_list(&mut self, n: usize) -> Result<Value, RuntimeError> {
        let mut items = Vec::with_capacity(n.min(1024));
        for _ in 0..n {
            match self.next() {
                Some(item) => items.push(item?),
                None => break,
            }
        }
        Ok(Value::List(items))
    }

    /// Drains the sequence. Never returns for an unbounded one.
    pub fn collect_list(self) -> Result<Value, RuntimeError> {
        self.collect::<Result<Vec<_>, _>>().map(Value::List)
    }
}

impl Iterator for LazySequence {
    type Item = Item;

    // RUST CONCEPT: A failed production step ends the stream
    // Later pulls return None, the same as running off the end.
    fn next(&mut self) -> Option<Item> {
        if self.finished {
            return None;
        }
        match self.origin.next() {
            Some(Ok(value)) => Some(Ok(value)),
            Some(Err(e)) => {
                self.finished = true;
                Some(Err(e))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl Drop for LazySequence {
    fn drop(&mut self) {
        if let Some(hook) = self.close_hook.take() {
            tracing::trace!(finished = self.finished, "closing lazy sequence");
            hook();
        }
    }
}
