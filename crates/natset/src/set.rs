//! Persistent sets of natural numbers.
//!
//! A [`NatSet`] is a single arbitrary-precision bit pattern: bit `k` is set
//! exactly when `k` is a member. Every operation that looks like a mutation
//! returns a new set and leaves its receiver untouched.
//!
//! # Example
//!
//! ```
//! use natset::NatSet;
//!
//! let s1 = NatSet::from_sequence([1, 2, 3, 4, 5]);
//! let s2 = NatSet::from_sequence([3, 4, 5, 6, 7]);
//!
//! let union = s1.union(&s2);
//! let intersection = s1.intersection(&s2);
//! assert_eq!(union.cardinality(), 7);
//! assert_eq!(intersection.to_list(), vec![3, 4, 5]);
//! ```
//!
//! # Memory
//!
//! Storage grows with the largest member, not with the number of members.
//! `NatSet::singleton(1 << 30)` holds one element in 128 MiB. Sparse sets
//! with a few huge members are the pathological case for this type.

use std::ops::{BitAnd, BitOr, BitXor, Sub};

use crate::bits::{out_of_memory, Bits};
use crate::element::Element;
use crate::error::{Result, SetError};
use crate::iter::Members;

// ============================================================
// Core Type
// ============================================================

/// An immutable set of natural numbers stored as a bitmap.
///
/// Two sets are equal exactly when their bit patterns are equal. Cloning is
/// O(1) and shares the underlying words.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct NatSet {
    bits: Bits,
}

// ============================================================
// Construction
// ============================================================

impl NatSet {
    /// Create an empty set.
    ///
    /// # Example
    ///
    /// ```
    /// let s = natset::NatSet::new();
    /// assert!(s.is_empty());
    /// ```
    pub fn new() -> Self {
        NatSet { bits: Bits::zero() }
    }

    /// Create an empty set. Same as [`NatSet::new`].
    pub fn empty() -> Self {
        NatSet::new()
    }

    /// Create a set with a single element.
    pub fn singleton(element: usize) -> Self {
        NatSet {
            bits: Bits::single(element),
        }
    }

    /// Wrap a raw bit pattern.
    pub fn from_bits(bits: Bits) -> Self {
        NatSet { bits }
    }

    /// Wrap a raw bit pattern given as a signed integer.
    ///
    /// Fails with [`SetError::InvalidBits`] when `raw` is negative.
    ///
    /// # Example
    ///
    /// ```
    /// let s = natset::NatSet::from_raw(0b1110).unwrap();
    /// assert_eq!(s.to_list(), vec![1, 2, 3]);
    /// assert!(natset::NatSet::from_raw(-1).is_err());
    /// ```
    pub fn from_raw(raw: i128) -> Result<Self> {
        let value = u128::try_from(raw).map_err(|_| SetError::InvalidBits {
            value: raw.to_string(),
        })?;
        Ok(NatSet::from_bits(Bits::from_u128(value)))
    }

    /// Insert every element of `seq` in order, starting from the empty set.
    ///
    /// Duplicates collapse silently.
    pub fn from_sequence<I>(seq: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        NatSet {
            bits: Bits::from_indices(seq),
        }
    }

    /// Like [`NatSet::from_sequence`], applying `transform` to each value first.
    pub fn from_sequence_with<I, F>(seq: I, transform: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> usize,
    {
        NatSet::from_sequence(seq.into_iter().map(transform))
    }

    /// Build a set from values that may not be natural numbers.
    ///
    /// Stops at the first value that is negative, non-integral, or too large
    /// to allocate a bit for, and returns [`SetError::InvalidElement`] for it.
    ///
    /// # Example
    ///
    /// ```
    /// use natset::NatSet;
    ///
    /// assert_eq!(NatSet::try_from_sequence([3i64, 1, 2]).unwrap().to_list(), vec![1, 2, 3]);
    /// assert!(NatSet::try_from_sequence([1i64, -2]).is_err());
    /// ```
    pub fn try_from_sequence<I>(seq: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Element,
    {
        let bits = Bits::try_from_indices(seq.into_iter().map(Element::to_index))?;
        Ok(NatSet { bits })
    }

    /// The raw bit pattern.
    pub fn bits(&self) -> &Bits {
        &self.bits
    }

    /// Unwrap into the raw bit pattern.
    pub fn into_bits(self) -> Bits {
        self.bits
    }
}

impl TryFrom<i64> for NatSet {
    type Error = SetError;

    fn try_from(raw: i64) -> Result<Self> {
        NatSet::from_raw(i128::from(raw))
    }
}

impl TryFrom<i128> for NatSet {
    type Error = SetError;

    fn try_from(raw: i128) -> Result<Self> {
        NatSet::from_raw(raw)
    }
}

impl From<Bits> for NatSet {
    fn from(bits: Bits) -> Self {
        NatSet::from_bits(bits)
    }
}

// ============================================================
// Query
// ============================================================

impl NatSet {
    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Number of members.
    ///
    /// Time: O(largest member). This is a population count over the whole
    /// bitmap, not a stored length.
    pub fn cardinality(&self) -> usize {
        self.bits.count_ones()
    }

    /// Check if a value is a member.
    ///
    /// Total: values that are not natural numbers are simply absent.
    ///
    /// # Example
    ///
    /// ```
    /// let s = natset::NatSet::from_sequence([1, 2, 3]);
    /// assert!(s.member(2));
    /// assert!(!s.member(4));
    /// assert!(!s.member(-1i64));
    /// ```
    pub fn member<E: Element>(&self, element: E) -> bool {
        element
            .to_index()
            .is_ok_and(|index| self.bits.test_bit(index))
    }

    /// Check if a value is not a member.
    pub fn not_member<E: Element>(&self, element: E) -> bool {
        !self.member(element)
    }

    /// Smallest member, or `None` for the empty set.
    pub fn find_min(&self) -> Option<usize> {
        self.iter().next()
    }

    /// Largest member, or `None` for the empty set.
    pub fn find_max(&self) -> Option<usize> {
        self.bits.bit_len().checked_sub(1)
    }

    /// Check if every member of this set is a member of `other`.
    pub fn is_subset_of(&self, other: &NatSet) -> bool {
        self.difference(other).is_empty()
    }

    /// Check if this set is a subset of `other` and not equal to it.
    pub fn is_proper_subset_of(&self, other: &NatSet) -> bool {
        self != other && self.is_subset_of(other)
    }

    /// Check if the sets share no member.
    pub fn disjoint(&self, other: &NatSet) -> bool {
        self.intersection(other).is_empty()
    }
}

// ============================================================
// Insertion / Deletion
// ============================================================

impl NatSet {
    /// Insert an element.
    ///
    /// If the element is already present, an equal set is returned. Storage
    /// for a huge element is allocated like any `Vec`; use
    /// [`NatSet::try_insert`] to get an error instead of an abort.
    pub fn insert(&self, element: usize) -> NatSet {
        NatSet {
            bits: self.bits.set_bit(element),
        }
    }

    /// Insert a value that may not be a natural number.
    ///
    /// Unlike [`NatSet::insert`], running out of memory for the new bit is
    /// reported as [`SetError::InvalidElement`] rather than aborting.
    pub fn try_insert<E: Element>(&self, element: E) -> Result<NatSet> {
        let index = element.to_index()?;
        let bits = self
            .bits
            .try_set_bit(index)
            .map_err(|_| out_of_memory(index))?;
        Ok(NatSet { bits })
    }

    /// Remove an element.
    ///
    /// If the element is absent, an equal set is returned.
    pub fn remove(&self, element: usize) -> NatSet {
        NatSet {
            bits: self.bits.clear_bit(element),
        }
    }

    /// Remove a value that may not be a natural number.
    pub fn try_remove<E: Element>(&self, element: E) -> Result<NatSet> {
        Ok(self.remove(element.to_index()?))
    }
}

// ============================================================
// Set Operations
// ============================================================

impl NatSet {
    /// Members of either set.
    pub fn union(&self, other: &NatSet) -> NatSet {
        NatSet {
            bits: &self.bits | &other.bits,
        }
    }

    /// Members of both sets.
    pub fn intersection(&self, other: &NatSet) -> NatSet {
        NatSet {
            bits: &self.bits & &other.bits,
        }
    }

    /// Members of this set that are not members of `other`.
    ///
    /// # Example
    ///
    /// ```
    /// use natset::NatSet;
    ///
    /// let s1 = NatSet::from_sequence([1, 2, 3, 4]);
    /// let s2 = NatSet::from_sequence([2, 3]);
    /// assert_eq!(s1.difference(&s2).to_list(), vec![1, 4]);
    /// ```
    pub fn difference(&self, other: &NatSet) -> NatSet {
        NatSet {
            bits: self.bits.and_not(&other.bits),
        }
    }

    /// Members of exactly one of the sets.
    pub fn symmetric_difference(&self, other: &NatSet) -> NatSet {
        NatSet {
            bits: &self.bits ^ &other.bits,
        }
    }

    /// Add `delta` to every member, dropping members that would go negative.
    ///
    /// Fails with [`SetError::InvalidElement`] when the shifted largest
    /// member cannot be addressed or allocated.
    pub fn translate(&self, delta: isize) -> Result<NatSet> {
        let amount = delta.unsigned_abs();
        if delta < 0 {
            return Ok(NatSet {
                bits: &self.bits >> amount,
            });
        }
        let Some(max) = self.find_max() else {
            return Ok(self.clone());
        };
        let top = max.checked_add(amount).ok_or_else(|| {
            SetError::invalid_element(max, "shifted past the addressable bit range")
        })?;
        let bits = self
            .bits
            .checked_shl(amount)
            .map_err(|_| out_of_memory(top))?;
        Ok(NatSet { bits })
    }
}

impl BitOr<&NatSet> for &NatSet {
    type Output = NatSet;

    fn bitor(self, rhs: &NatSet) -> NatSet {
        self.union(rhs)
    }
}

impl BitAnd<&NatSet> for &NatSet {
    type Output = NatSet;

    fn bitand(self, rhs: &NatSet) -> NatSet {
        self.intersection(rhs)
    }
}

impl Sub<&NatSet> for &NatSet {
    type Output = NatSet;

    fn sub(self, rhs: &NatSet) -> NatSet {
        self.difference(rhs)
    }
}

impl BitXor<&NatSet> for &NatSet {
    type Output = NatSet;

    fn bitxor(self, rhs: &NatSet) -> NatSet {
        self.symmetric_difference(rhs)
    }
}

// ============================================================
// Map / Filter / Fold
// ============================================================

impl NatSet {
    /// Map a function over all members.
    ///
    /// The result may be smaller if `f` sends several members to one value.
    pub fn map<F>(&self, f: F) -> NatSet
    where
        F: FnMut(usize) -> usize,
    {
        NatSet::from_sequence_with(self.iter(), f)
    }

    /// Keep the members satisfying `predicate`.
    ///
    /// # Example
    ///
    /// ```
    /// let s = natset::NatSet::from_sequence(1..=6);
    /// assert_eq!(s.filter(|x| x % 2 == 0).to_list(), vec![2, 4, 6]);
    /// ```
    pub fn filter<F>(&self, mut predicate: F) -> NatSet
    where
        F: FnMut(&usize) -> bool,
    {
        NatSet::from_sequence(self.iter().filter(|x| predicate(x)))
    }

    /// Split into (members satisfying `predicate`, the rest).
    pub fn partition<F>(&self, mut predicate: F) -> (NatSet, NatSet)
    where
        F: FnMut(&usize) -> bool,
    {
        let (yes, no): (Vec<usize>, Vec<usize>) = self.iter().partition(|x| predicate(x));
        (NatSet::from_sequence(yes), NatSet::from_sequence(no))
    }

    /// Fold over members in ascending order.
    pub fn fold<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, usize) -> B,
    {
        self.iter().fold(init, f)
    }

    /// Fold over members in descending order.
    pub fn fold_right<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(usize, B) -> B,
    {
        self.to_list()
            .into_iter()
            .rev()
            .fold(init, |acc, x| f(x, acc))
    }
}

// ============================================================
// Conversion
// ============================================================

impl NatSet {
    /// A fresh ascending cursor over the members.
    ///
    /// Each call starts from the smallest member; cursors never share state.
    pub fn iter(&self) -> Members {
        Members::new(&self.bits)
    }

    /// Drain a fresh cursor into an ascending list.
    pub fn to_list(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Convert to an ascending list.
    pub fn to_asc_list(&self) -> Vec<usize> {
        self.to_list()
    }

    /// Convert to a descending list.
    pub fn to_desc_list(&self) -> Vec<usize> {
        let mut list = self.to_list();
        list.reverse();
        list
    }
}

// ============================================================
// Tests
// ============================================================
