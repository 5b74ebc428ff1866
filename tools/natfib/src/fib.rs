//! Fibonacci prefixes.

use anyhow::{bail, Result};

/// The sequence 0, 1, 1, 2, 3, 5, ... in `u128`, ending before overflow.
pub struct Fibonacci {
    current: Option<u128>,
    next: Option<u128>,
}

impl Fibonacci {
    pub fn new() -> Self {
        Fibonacci {
            current: Some(0),
            next: Some(1),
        }
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Fibonacci::new()
    }
}

impl Iterator for Fibonacci {
    type Item = u128;

    fn next(&mut self) -> Option<u128> {
        let current = self.current?;
        self.current = self.next;
        self.next = self.next.and_then(|n| n.checked_add(current));
        Some(current)
    }
}

/// The first `count` terms.
pub fn first(count: usize) -> Result<Vec<u128>> {
    let terms: Vec<u128> = Fibonacci::new().take(count).collect();
    if terms.len() < count {
        bail!(
            "only the first {} Fibonacci terms fit in 128 bits, {} requested",
            terms.len(),
            count
        );
    }
    Ok(terms)
}

/// Every term not above `bound`.
pub fn up_to(bound: u128) -> Vec<u128> {
    Fibonacci::new().take_while(|&t| t <= bound).collect()
}
