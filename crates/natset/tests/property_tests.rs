//! Property tests for natset
//!
//! These tests verify the algebraic laws of `NatSet` against arbitrary inputs.

use natset::{Bits, NatSet};
use proptest::collection::vec;
use proptest::prelude::*;

/// Members spread over several words, with an occasional far outlier.
fn members() -> impl Strategy<Value = Vec<usize>> {
    vec(prop_oneof![9 => 0usize..300, 1 => 0usize..5000], 0..40)
}

fn natset() -> impl Strategy<Value = NatSet> {
    members().prop_map(NatSet::from_sequence)
}

fn sorted_dedup(mut v: Vec<usize>) -> Vec<usize> {
    v.sort_unstable();
    v.dedup();
    v
}

fn count_ones_by_shift(bits: &Bits) -> usize {
    let mut rest = bits.clone();
    let mut count = 0;
    while !rest.is_zero() {
        if rest.test_bit(0) {
            count += 1;
        }
        rest = &rest >> 1;
    }
    count
}

// ============================================================
// Construction and enumeration
// ============================================================

proptest! {
    #[test]
    fn enumeration_is_sorted_dedup(v in members()) {
        let s = NatSet::from_sequence(v.clone());
        prop_assert_eq!(s.to_list(), sorted_dedup(v));
    }

    #[test]
    fn list_round_trip(s in natset()) {
        prop_assert_eq!(NatSet::from_sequence(s.to_list()), s);
    }

    #[test]
    fn raw_round_trip(n in any::<u128>()) {
        let s = NatSet::from_bits(Bits::from_u128(n));
        prop_assert_eq!(s.bits().to_u128(), Some(n));
        if let Ok(raw) = i128::try_from(n) {
            prop_assert_eq!(NatSet::from_raw(raw).unwrap(), s);
        }
    }

    #[test]
    fn negative_raw_rejected(n in i128::MIN..0) {
        prop_assert!(NatSet::from_raw(n).is_err());
    }

    #[test]
    fn cardinality_matches_enumeration(s in natset()) {
        prop_assert_eq!(s.cardinality(), s.to_list().len());
        prop_assert_eq!(s.cardinality(), s.iter().count());
    }

    #[test]
    fn popcount_matches_shift_loop(s in natset()) {
        prop_assert_eq!(s.bits().count_ones(), count_ones_by_shift(s.bits()));
    }

    #[test]
    fn iteration_is_restartable(s in natset()) {
        let first: Vec<_> = s.iter().collect();
        let second: Vec<_> = s.iter().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn members_are_exactly_enumerated(s in natset(), probe in 0usize..6000) {
        prop_assert_eq!(s.member(probe), s.to_list().contains(&probe));
    }

    #[test]
    fn min_max_agree_with_list(s in natset()) {
        let list = s.to_list();
        prop_assert_eq!(s.find_min(), list.first().copied());
        prop_assert_eq!(s.find_max(), list.last().copied());
    }
}

// ============================================================
// Insertion and removal
// ============================================================

proptest! {
    #[test]
    fn insert_idempotent(s in natset(), x in 0usize..6000) {
        prop_assert_eq!(s.insert(x).insert(x), s.insert(x));
        prop_assert!(s.insert(x).member(x));
    }

    #[test]
    fn remove_idempotent(s in natset(), x in 0usize..6000) {
        prop_assert_eq!(s.remove(x).remove(x), s.remove(x));
        prop_assert!(!s.remove(x).member(x));
    }

    #[test]
    fn operations_leave_receiver_untouched(s in natset(), x in 0usize..6000) {
        let before = s.to_list();
        let _ = s.insert(x);
        let _ = s.remove(x);
        let _ = s.union(&NatSet::singleton(x));
        prop_assert_eq!(s.to_list(), before);
    }

    #[test]
    fn unallocatable_elements_rejected(s in natset(), x in (usize::MAX >> 3)..=usize::MAX) {
        prop_assert!(s.try_insert(x).is_err());
        prop_assert!(!s.member(x));
    }

    #[test]
    fn negative_elements_rejected(s in natset(), x in i64::MIN..0) {
        prop_assert!(s.try_insert(x).is_err());
        prop_assert!(s.try_remove(x).is_err());
        prop_assert!(!s.member(x));
    }
}

// ============================================================
// Set algebra
// ============================================================

proptest! {
    #[test]
    fn union_commutative(a in natset(), b in natset()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn intersection_commutative(a in natset(), b in natset()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn disjoint_commutative(a in natset(), b in natset()) {
        prop_assert_eq!(a.disjoint(&b), b.disjoint(&a));
    }

    #[test]
    fn intersection_is_subset(a in natset(), b in natset()) {
        let i = a.intersection(&b);
        prop_assert!(i.is_subset_of(&a));
        prop_assert!(i.is_subset_of(&b));
    }

    #[test]
    fn difference_formulas_agree(a in natset(), b in natset()) {
        let xor_form = NatSet::from_bits(a.bits() & &(a.bits() ^ b.bits()));
        prop_assert_eq!(a.difference(&b), xor_form);
    }

    #[test]
    fn disjoint_matches_bitwise_and(a in natset(), b in natset()) {
        prop_assert_eq!(a.disjoint(&b), (a.bits() & b.bits()).is_zero());
    }

    #[test]
    fn difference_matches_membership(a in natset(), b in natset()) {
        let expected: Vec<_> = a.iter().filter(|x| !b.member(*x)).collect();
        prop_assert_eq!(a.difference(&b).to_list(), expected);
    }

    #[test]
    fn subset_iff_union_absorbs(a in natset(), b in natset()) {
        prop_assert_eq!(a.is_subset_of(&b), a.union(&b) == b);
    }

    #[test]
    fn symmetric_difference_decomposes(a in natset(), b in natset()) {
        let expected = a.difference(&b).union(&b.difference(&a));
        prop_assert_eq!(a.symmetric_difference(&b), expected);
    }

    #[test]
    fn translate_round_trip(s in natset(), delta in 0isize..200) {
        let moved = s.translate(delta).unwrap();
        prop_assert_eq!(moved.translate(-delta).unwrap(), s.clone());
        let shifted: Vec<_> = s.iter().map(|x| x + delta as usize).collect();
        prop_assert_eq!(moved.to_list(), shifted);
    }
}
