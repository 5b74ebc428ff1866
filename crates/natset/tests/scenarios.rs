//! Concrete end-to-end scenarios for natset.

use natset::{Buildable, Enumerable, NatSet, SetError};

#[test]
fn test_small_sequence_bits() {
    let s = NatSet::from_sequence([1, 2, 3]);
    assert_eq!(s.bits().to_u128(), Some(0b1110));
    assert!(s.member(2));
    assert!(!s.member(4));
}

#[test]
fn test_rendering_from_raw_bits() {
    assert_eq!(NatSet::from_raw(0).unwrap().to_string(), "NatSet[]");
    assert_eq!(NatSet::from_raw(1).unwrap().to_string(), "NatSet[0]");
}

#[test]
fn test_difference_of_ranges() {
    let a = NatSet::from_sequence(1..=101);
    let b = NatSet::from_sequence(2..=100);
    assert_eq!(a.difference(&b), NatSet::from_sequence([1, 101]));
}

#[test]
fn test_cardinality_of_range() {
    assert_eq!(NatSet::from_sequence(5..=15).cardinality(), 11);
}

#[test]
fn test_build_then_iterate() {
    let s = NatSet::build([3, 1, 2]).unwrap();
    assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_disjoint_ranges() {
    let low = NatSet::from_sequence(1..=6);
    assert!(low.disjoint(&NatSet::from_sequence(8..=20)));
    assert!(!low.disjoint(&NatSet::from_sequence(5..=15)));
}

#[test]
fn test_huge_member() {
    let big = 1usize << 20;
    let s = NatSet::from_sequence([0, big]);
    assert_eq!(s.cardinality(), 2);
    assert_eq!(s.find_max(), Some(big));
    assert_eq!(s.to_list(), vec![0, big]);
    assert_eq!(s.bits().bit_len(), big + 1);
}

#[test]
fn test_slice_reports_unsupported() {
    let s = NatSet::from_sequence(0..10);
    let err = s.slice(2, 3).unwrap_err();
    assert_eq!(err, SetError::UnsupportedCapability { capability: "slice" });
    // The fold still answers the same question.
    let fallback = s.reduce(Vec::new(), |mut acc, x| {
        if (2..5).contains(&x) {
            acc.push(x);
        }
        acc
    });
    assert_eq!(fallback, vec![2, 3, 4]);
}

#[test]
fn test_shared_across_threads() {
    let s = NatSet::from_sequence((0..1000).step_by(7));
    let handles: Vec<_> = (0..4)
        .map(|offset| {
            let s = s.clone();
            std::thread::spawn(move || s.iter().filter(|x| x % 4 == offset).count())
        })
        .collect();
    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, s.cardinality());
}
