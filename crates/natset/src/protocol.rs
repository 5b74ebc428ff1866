//! Collection protocols.
//!
//! Three contracts let generic code treat a [`NatSet`] like any other
//! container: [`Buildable`] builds one from an arbitrary sequence,
//! [`Enumerable`] folds over it, and `Display` renders it for diagnostics.
//! The std traits (`FromIterator`, `Extend`, `IntoIterator`, `Debug`) are
//! wired up here as well.

use std::fmt;

use crate::element::Element;
use crate::error::{Result, SetError};
use crate::iter::Members;
use crate::set::NatSet;

// ============================================================
// Buildable
// ============================================================

/// A container that can be built from any finite sequence of values.
pub trait Buildable: Sized {
    /// Insert every value of `seq` in order.
    ///
    /// Values that are not valid members are rejected, never coerced.
    fn build<I>(seq: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Element;

    /// Like [`Buildable::build`], applying `transform` to each value first.
    fn build_with<I, F, T>(seq: I, transform: F) -> Result<Self>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> T,
        T: Element,
    {
        Self::build(seq.into_iter().map(transform))
    }
}

impl Buildable for NatSet {
    fn build<I>(seq: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Element,
    {
        NatSet::try_from_sequence(seq).map_err(|err| {
            tracing::trace!(%err, "rejected sequence");
            err
        })
    }
}

// ============================================================
// Enumerable
// ============================================================

/// A container that generic iteration machinery can count, query and fold.
pub trait Enumerable {
    /// Element type produced by the fold.
    type Item;

    /// Number of elements.
    fn count(&self) -> usize;

    /// Whether `element` is contained.
    fn member<E: Element>(&self, element: E) -> bool;

    /// Fold over elements in the container's natural order.
    fn reduce<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B;

    /// Take `len` elements starting at position `start`.
    ///
    /// Containers without index-addressable storage keep this default,
    /// which reports the capability as unsupported so callers can fall
    /// back to [`Enumerable::reduce`].
    fn slice(&self, start: usize, len: usize) -> Result<Vec<Self::Item>> {
        let _ = (start, len);
        Err(SetError::UnsupportedCapability { capability: "slice" })
    }
}

impl Enumerable for NatSet {
    type Item = usize;

    /// O(largest member); see [`NatSet::cardinality`].
    fn count(&self) -> usize {
        self.cardinality()
    }

    fn member<E: Element>(&self, element: E) -> bool {
        NatSet::member(self, element)
    }

    fn reduce<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, usize) -> B,
    {
        self.fold(init, f)
    }
}

// ============================================================
// Trait Implementations
// ============================================================

impl fmt::Display for NatSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NatSet[")?;
        for (i, member) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{member}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for NatSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for NatSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        NatSet::from_sequence(iter)
    }
}

impl Extend<usize> for NatSet {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        *self = self.union(&NatSet::from_sequence(iter));
    }
}

impl IntoIterator for NatSet {
    type Item = usize;
    type IntoIter = Members;

    fn into_iter(self) -> Members {
        self.iter()
    }
}

impl IntoIterator for &NatSet {
    type Item = usize;
    type IntoIter = Members;

    fn into_iter(self) -> Members {
        self.iter()
    }
}

// ============================================================
// Tests
// ============================================================
