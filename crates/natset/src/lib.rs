//! Persistent sets of natural numbers.
//!
//! A [`NatSet`] is an immutable set of non-negative integers represented as a
//! single arbitrary-precision bit vector: bit `k` set means `k` is a member.
//! There is no upper bound on member values; storage grows with the largest
//! member present.
//!
//! # Modules
//!
//! - `bits` - The growable bit store and its bitwise operators
//! - `set` - Construction, membership and set algebra
//! - `iter` - Lazy ascending enumeration
//! - `protocol` - `Buildable`, `Enumerable` and textual rendering
//! - `element` - Checked conversion of host values into members
//!
//! # Example
//!
//! ```
//! use natset::{Buildable, NatSet};
//!
//! let s = NatSet::build([3, 1, 2]).unwrap();
//! assert_eq!(s.to_list(), vec![1, 2, 3]);
//! assert_eq!(s.to_string(), "NatSet[1, 2, 3]");
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod bits;
pub mod element;
pub mod error;
pub mod iter;
pub mod protocol;
pub mod set;

pub use bits::Bits;
pub use element::Element;
pub use error::{Result, SetError};
pub use iter::Members;
pub use protocol::{Buildable, Enumerable};
pub use set::NatSet;
