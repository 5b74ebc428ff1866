//! Ascending enumeration of set members.

use std::iter::FusedIterator;
use std::sync::Arc;

use crate::bits::{Bits, WORD_BITS};

/// A lazy cursor over the members of a [`NatSet`](crate::NatSet), smallest first.
///
/// The cursor holds the bits not yet examined and the index of the lowest of
/// them. Each step emits the index of the lowest remaining set bit and drops
/// it; the cursor is exhausted once no set bit remains. Runs of clear bits
/// are skipped a word at a time with `trailing_zeros` instead of being
/// shifted out one by one.
///
/// The cursor owns a shared handle to the set's words, so it outlives the
/// set it came from. Cloning forks an independent cursor at the same
/// position.
#[derive(Clone, Debug)]
pub struct Members {
    words: Arc<[u64]>,
    /// Unexamined bits of the current word.
    remaining: u64,
    /// Position of the current word.
    word: usize,
}

impl Members {
    pub(crate) fn new(bits: &Bits) -> Self {
        let words = bits.shared_words();
        let remaining = words.first().copied().unwrap_or(0);
        Members {
            words,
            remaining,
            word: 0,
        }
    }
}

impl Iterator for Members {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.remaining != 0 {
                let bit = self.remaining.trailing_zeros() as usize;
                self.remaining &= self.remaining - 1;
                return Some(self.word * WORD_BITS + bit);
            }
            let next = self.word + 1;
            self.remaining = *self.words.get(next)?;
            self.word = next;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let current = self.remaining.count_ones() as usize;
        let later = self.words.len().saturating_sub(self.word + 1);
        (current, Some(current + later * WORD_BITS))
    }
}

impl FusedIterator for Members {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NatSet;

    #[test]
    fn test_empty() {
        let mut it = NatSet::new().iter();
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_ascending_across_words() {
        let s = NatSet::from_sequence([300, 0, 64, 63, 65, 128]);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 63, 64, 65, 128, 300]);
    }

    #[test]
    fn test_skips_empty_words() {
        let s = NatSet::from_sequence([1, 1000]);
        let mut it = s.iter();
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next(), Some(1000));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_restartable() {
        let s = NatSet::from_sequence([2, 4, 6]);
        let mut first = s.iter();
        assert_eq!(first.next(), Some(2));
        let second: Vec<_> = s.iter().collect();
        assert_eq!(second, vec![2, 4, 6]);
        assert_eq!(first.collect::<Vec<_>>(), vec![4, 6]);
    }

    #[test]
    fn test_clone_forks() {
        let s = NatSet::from_sequence([1, 2, 3]);
        let mut it = s.iter();
        it.next();
        let fork = it.clone();
        assert_eq!(it.collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(fork.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_outlives_set() {
        let it = {
            let s = NatSet::from_sequence([5, 70]);
            s.iter()
        };
        assert_eq!(it.collect::<Vec<_>>(), vec![5, 70]);
    }

    #[test]
    fn test_size_hint() {
        let s = NatSet::from_sequence([1, 2, 100]);
        let (lower, upper) = s.iter().size_hint();
        assert_eq!(lower, 2);
        assert_eq!(upper, Some(66));
    }
}
