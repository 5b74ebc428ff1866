//! Conversion of host values into bit indices.
//!
//! The typed API of [`NatSet`](crate::NatSet) takes `usize` and cannot be
//! handed a negative number. Values arriving from elsewhere (signed
//! integers, floats, wide integers) go through [`Element`], which rejects
//! anything that is not a natural number instead of coercing it.

use std::fmt::Display;

use crate::error::{Result, SetError};

/// A value that may name a natural number.
pub trait Element: Copy + Display {
    /// The bit index for this value, or `InvalidElement`.
    fn to_index(self) -> Result<usize>;
}

impl<T: Element> Element for &T {
    fn to_index(self) -> Result<usize> {
        (*self).to_index()
    }
}

macro_rules! unsigned_element {
    ($($t:ty)*) => {$(
        impl Element for $t {
            #[allow(clippy::useless_conversion)]
            fn to_index(self) -> Result<usize> {
                usize::try_from(self)
                    .map_err(|_| SetError::invalid_element(self, "exceeds the addressable bit range"))
            }
        }
    )*};
}

macro_rules! signed_element {
    ($($t:ty)*) => {$(
        impl Element for $t {
            fn to_index(self) -> Result<usize> {
                if self < 0 {
                    return Err(SetError::invalid_element(self, "negative"));
                }
                usize::try_from(self)
                    .map_err(|_| SetError::invalid_element(self, "exceeds the addressable bit range"))
            }
        }
    )*};
}

macro_rules! float_element {
    ($($t:ty)*) => {$(
        impl Element for $t {
            fn to_index(self) -> Result<usize> {
                if !self.is_finite() {
                    return Err(SetError::invalid_element(self, "not finite"));
                }
                if self.fract() != 0.0 {
                    return Err(SetError::invalid_element(self, "not integral"));
                }
                if self < 0.0 {
                    return Err(SetError::invalid_element(self, "negative"));
                }
                // usize::MAX rounds up to a power of two here, which is itself out of range.
                if self >= usize::MAX as $t {
                    return Err(SetError::invalid_element(self, "exceeds the addressable bit range"));
                }
                Ok(self as usize)
            }
        }
    )*};
}

unsigned_element!(u8 u16 u32 u64 u128 usize);
signed_element!(i8 i16 i32 i64 i128 isize);
float_element!(f32 f64);
