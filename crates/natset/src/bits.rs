//! Arbitrary-precision bit store.
//!
//! [`Bits`] is an unbounded non-negative integer used as a packed bitmap:
//! bit `k`, counted from the least-significant end, is the flag for the
//! natural number `k`. Storage is a little-endian run of `u64` words whose
//! highest word is never zero, so equal patterns always have identical
//! storage and zero is the empty run.
//!
//! Every operation returns a new value. Words live behind an [`Arc`], so
//! cloning (and any operation that turns out to be a no-op) shares storage
//! instead of copying it.

use std::cmp::Ordering;
use std::collections::TryReserveError;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Shl, Shr};
use std::sync::Arc;

use crate::error::{Result, SetError};

/// Number of bits held by one storage word.
pub(crate) const WORD_BITS: usize = u64::BITS as usize;

/// Growing past this many words (one megabit) is reported at debug level.
const LARGE_WORDS: usize = 1 << 14;

// ============================================================
// Core Type
// ============================================================

/// An arbitrary-precision unsigned integer viewed as a bitmap.
///
/// Memory is proportional to the position of the highest set bit, not to
/// the number of set bits: a pattern with the single bit `10_000_000` set
/// occupies over a megabyte.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bits {
    words: Arc<[u64]>,
}

#[inline]
fn word_index_and_mask(bit: usize) -> (usize, u64) {
    (bit / WORD_BITS, 1 << (bit % WORD_BITS))
}

fn normalize(mut words: Vec<u64>) -> Vec<u64> {
    while words.last() == Some(&0) {
        words.pop();
    }
    words
}

// ============================================================
// Construction
// ============================================================

impl Bits {
    /// The all-zero pattern.
    pub fn zero() -> Self {
        Bits {
            words: Arc::from(Vec::new()),
        }
    }

    /// The pattern `1`.
    pub fn one() -> Self {
        Bits::from_words(vec![1])
    }

    /// The pattern `1 << bit`.
    pub fn single(bit: usize) -> Self {
        &Bits::one() << bit
    }

    /// Wrap little-endian words, dropping high zero words.
    pub fn from_words(words: Vec<u64>) -> Self {
        Bits {
            words: Arc::from(normalize(words)),
        }
    }

    /// Widen a native integer.
    pub fn from_u128(value: u128) -> Self {
        Bits::from_words(vec![value as u64, (value >> WORD_BITS) as u64])
    }

    /// Set every bit yielded by `indices`, building the words in place.
    pub(crate) fn from_indices<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut words = Vec::new();
        for index in indices {
            let (word, mask) = word_index_and_mask(index);
            if word >= words.len() {
                grow(&mut words, word + 1, index);
            }
            words[word] |= mask;
        }
        Bits::from_words(words)
    }

    /// Like [`Bits::from_indices`], stopping at the first error.
    ///
    /// An index whose word cannot be allocated is reported as
    /// [`SetError::InvalidElement`].
    pub(crate) fn try_from_indices<I>(indices: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<usize>>,
    {
        let mut words = Vec::new();
        for index in indices {
            let index = index?;
            let (word, mask) = word_index_and_mask(index);
            if word >= words.len() {
                try_grow(&mut words, word + 1, index).map_err(|_| out_of_memory(index))?;
            }
            words[word] |= mask;
        }
        Ok(Bits::from_words(words))
    }
}

impl Default for Bits {
    fn default() -> Self {
        Bits::zero()
    }
}

impl From<u64> for Bits {
    fn from(value: u64) -> Self {
        Bits::from_words(vec![value])
    }
}

impl From<u128> for Bits {
    fn from(value: u128) -> Self {
        Bits::from_u128(value)
    }
}

pub(crate) fn out_of_memory(bit: usize) -> SetError {
    SetError::invalid_element(bit, "exceeds available memory")
}

/// Zero-extend `words` to `len`, aborting like any `Vec` if memory runs out.
fn grow(words: &mut Vec<u64>, len: usize, bit: usize) {
    if len > LARGE_WORDS && words.len() <= LARGE_WORDS {
        tracing::debug!(bit, words = len, "bit store grew past one megabit");
    }
    words.resize(len, 0);
}

/// Zero-extend `words` to `len`, failing instead of aborting if memory runs out.
fn try_grow(
    words: &mut Vec<u64>,
    len: usize,
    bit: usize,
) -> std::result::Result<(), TryReserveError> {
    if len > words.len() {
        words.try_reserve_exact(len - words.len())?;
    }
    grow(words, len, bit);
    Ok(())
}

// ============================================================
// Query
// ============================================================

impl Bits {
    /// Little-endian storage words; the last word is never zero.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub(crate) fn shared_words(&self) -> Arc<[u64]> {
        Arc::clone(&self.words)
    }

    /// Whether no bit is set.
    pub fn is_zero(&self) -> bool {
        self.words.is_empty()
    }

    /// Position of the highest set bit plus one, or zero for the zero pattern.
    pub fn bit_len(&self) -> usize {
        match self.words.last() {
            None => 0,
            Some(top) => {
                (self.words.len() - 1) * WORD_BITS + (WORD_BITS - top.leading_zeros() as usize)
            }
        }
    }

    /// `(self >> bit) & 1 == 1`.
    pub fn test_bit(&self, bit: usize) -> bool {
        let (word, mask) = word_index_and_mask(bit);
        self.words.get(word).is_some_and(|w| w & mask != 0)
    }

    /// Number of set bits.
    ///
    /// Time: O(highest set bit / 64), using the per-word hardware popcount.
    /// The result is the same as testing and shifting out one bit at a time.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Narrow to a native integer if the pattern fits.
    pub fn to_u128(&self) -> Option<u128> {
        match *self.words {
            [] => Some(0),
            [lo] => Some(u128::from(lo)),
            [lo, hi] => Some(u128::from(lo) | (u128::from(hi) << WORD_BITS)),
            _ => None,
        }
    }
}

// ============================================================
// Single-bit updates
// ============================================================

impl Bits {
    /// `self | (1 << bit)`.
    ///
    /// Returns a value sharing `self`'s storage when the bit is already set.
    pub fn set_bit(&self, bit: usize) -> Bits {
        if self.test_bit(bit) {
            return self.clone();
        }
        let (word, mask) = word_index_and_mask(bit);
        let mut words = self.words.to_vec();
        if word >= words.len() {
            grow(&mut words, word + 1, bit);
        }
        words[word] |= mask;
        Bits {
            words: Arc::from(words),
        }
    }

    /// Like [`Bits::set_bit`], failing instead of aborting when the store
    /// cannot grow to hold `bit`.
    pub fn try_set_bit(&self, bit: usize) -> std::result::Result<Bits, TryReserveError> {
        if self.test_bit(bit) {
            return Ok(self.clone());
        }
        let (word, mask) = word_index_and_mask(bit);
        let mut words = Vec::new();
        try_grow(&mut words, self.words.len().max(word + 1), bit)?;
        words[..self.words.len()].copy_from_slice(&self.words);
        words[word] |= mask;
        Ok(Bits {
            words: Arc::from(words),
        })
    }

    /// `self << amount`, failing instead of aborting when the result
    /// cannot be allocated.
    pub fn checked_shl(&self, amount: usize) -> std::result::Result<Bits, TryReserveError> {
        if self.is_zero() || amount == 0 {
            return Ok(self.clone());
        }
        let mut words = Vec::new();
        words.try_reserve_exact((amount / WORD_BITS).saturating_add(self.words.len() + 1))?;
        shift_up_into(&mut words, &self.words, amount);
        Ok(Bits::from_words(words))
    }

    /// `self & !(1 << bit)`.
    ///
    /// Returns a value sharing `self`'s storage when the bit is already clear.
    pub fn clear_bit(&self, bit: usize) -> Bits {
        if !self.test_bit(bit) {
            return self.clone();
        }
        let (word, mask) = word_index_and_mask(bit);
        let mut words = self.words.to_vec();
        words[word] &= !mask;
        Bits::from_words(words)
    }

    /// `self & !other`.
    ///
    /// Complementing an unbounded pattern only makes sense against a finite
    /// one, so the complement is fused with the AND.
    pub fn and_not(&self, other: &Bits) -> Bits {
        if self.is_zero() || other.is_zero() {
            return self.clone();
        }
        let mut words = self.words.to_vec();
        for (w, o) in words.iter_mut().zip(other.words.iter()) {
            *w &= !o;
        }
        Bits::from_words(words)
    }
}

// ============================================================
// Operators
// ============================================================

/// Combine two patterns word by word, treating missing high words as zero.
fn zip_longest(a: &Bits, b: &Bits, op: impl Fn(u64, u64) -> u64) -> Bits {
    let (long, short) = if a.words.len() >= b.words.len() {
        (a, b)
    } else {
        (b, a)
    };
    let mut words = long.words.to_vec();
    for (w, s) in words.iter_mut().zip(short.words.iter()) {
        *w = op(*w, *s);
    }
    Bits::from_words(words)
}

impl BitOr<&Bits> for &Bits {
    type Output = Bits;

    fn bitor(self, rhs: &Bits) -> Bits {
        if rhs.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return rhs.clone();
        }
        zip_longest(self, rhs, |a, b| a | b)
    }
}

impl BitAnd<&Bits> for &Bits {
    type Output = Bits;

    fn bitand(self, rhs: &Bits) -> Bits {
        let words = self
            .words
            .iter()
            .zip(rhs.words.iter())
            .map(|(a, b)| a & b)
            .collect();
        Bits::from_words(words)
    }
}

impl BitXor<&Bits> for &Bits {
    type Output = Bits;

    fn bitxor(self, rhs: &Bits) -> Bits {
        zip_longest(self, rhs, |a, b| a ^ b)
    }
}

/// Append `src << amount` to the empty `words`.
fn shift_up_into(words: &mut Vec<u64>, src: &[u64], amount: usize) {
    let word_shift = amount / WORD_BITS;
    let bit_shift = amount % WORD_BITS;
    grow(words, word_shift, amount);
    if bit_shift == 0 {
        words.extend_from_slice(src);
    } else {
        let mut carry = 0;
        for &w in src {
            words.push((w << bit_shift) | carry);
            carry = w >> (WORD_BITS - bit_shift);
        }
        words.push(carry);
    }
}

impl Shl<usize> for &Bits {
    type Output = Bits;

    /// Aborts like any `Vec` if the result cannot be allocated; see
    /// [`Bits::checked_shl`].
    fn shl(self, amount: usize) -> Bits {
        if self.is_zero() || amount == 0 {
            return self.clone();
        }
        let mut words = Vec::with_capacity(amount / WORD_BITS + self.words.len() + 1);
        shift_up_into(&mut words, &self.words, amount);
        Bits::from_words(words)
    }
}

impl Shr<usize> for &Bits {
    type Output = Bits;

    fn shr(self, amount: usize) -> Bits {
        let word_shift = amount / WORD_BITS;
        let bit_shift = amount % WORD_BITS;
        if word_shift >= self.words.len() {
            return Bits::zero();
        }
        let src = &self.words[word_shift..];
        if bit_shift == 0 {
            return Bits::from_words(src.to_vec());
        }
        let words = src
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let high = src.get(i + 1).map_or(0, |&h| h << (WORD_BITS - bit_shift));
                (w >> bit_shift) | high
            })
            .collect();
        Bits::from_words(words)
    }
}

macro_rules! forward_owned_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Bits> for Bits {
            type Output = Bits;

            fn $method(self, rhs: Bits) -> Bits {
                (&self).$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(BitOr, bitor);
forward_owned_binop!(BitAnd, bitand);
forward_owned_binop!(BitXor, bitxor);

// ============================================================
// Trait Implementations
// ============================================================

impl Ord for Bits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.words
            .len()
            .cmp(&other.words.len())
            .then_with(|| self.words.iter().rev().cmp(other.words.iter().rev()))
    }
}

impl PartialOrd for Bits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::LowerHex for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = String::new();
        match self.words.split_last() {
            None => digits.push('0'),
            Some((top, rest)) => {
                digits.push_str(&format!("{top:x}"));
                for w in rest.iter().rev() {
                    digits.push_str(&format!("{w:016x}"));
                }
            }
        }
        f.pad_integral(true, "0x", &digits)
    }
}

impl fmt::Binary for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = String::new();
        match self.words.split_last() {
            None => digits.push('0'),
            Some((top, rest)) => {
                digits.push_str(&format!("{top:b}"));
                for w in rest.iter().rev() {
                    digits.push_str(&format!("{w:064b}"));
                }
            }
        }
        f.pad_integral(true, "0b", &digits)
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits({self:#x})")
    }
}

// ============================================================
// Tests
// ============================================================
