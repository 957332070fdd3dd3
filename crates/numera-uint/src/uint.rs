//! Arbitrary precision unsigned integers.
//!
//! A [`BigUint`] stores its magnitude as a little-endian vector of 32-bit
//! limbs. The vector is never empty, zero is the single limb `0`, and a
//! nonzero value never carries a zero most-significant limb. Every
//! operation that produces or mutates a value re-establishes that form.

use num_traits::{Num, One, Zero};
use std::fmt;

use crate::algorithms::add::trim_limbs;
use crate::error::UintError;

/// Width of one limb in bits.
pub const LIMB_BITS: u64 = 32;

/// An arbitrary precision unsigned integer.
///
/// Arithmetic never goes negative: subtracting a larger value yields zero.
#[derive(Clone, PartialEq, Eq)]
pub struct BigUint {
    pub(crate) limbs: Vec<u32>,
}

impl BigUint {
    /// Creates a big integer from a `u64`.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self::from(value)
    }

    /// Creates a big integer from little-endian limbs, dropping redundant
    /// most-significant zero limbs.
    #[must_use]
    pub fn from_limbs(limbs: Vec<u32>) -> Self {
        let mut value = Self { limbs };
        value.trim();
        value
    }

    /// Returns the little-endian limbs.
    #[must_use]
    pub fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    /// Consumes the value and returns its little-endian limbs.
    #[must_use]
    pub fn into_limbs(self) -> Vec<u32> {
        self.limbs
    }

    /// Returns the number of limbs in use (at least one).
    #[must_use]
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    /// Returns the number of significant bits: zero for zero, otherwise one
    /// more than the index of the highest set bit.
    #[must_use]
    pub fn bit_len(&self) -> u64 {
        let top = self.top_limb();
        if top == 0 {
            return 0;
        }
        (self.limbs.len() as u64 - 1) * LIMB_BITS + u64::from(u32::BITS - top.leading_zeros())
    }

    /// Returns the low 64 bits.
    #[must_use]
    pub fn low_u64(&self) -> u64 {
        let low = u64::from(self.limbs[0]);
        match self.limbs.get(1) {
            Some(&high) => low | (u64::from(high) << 32),
            None => low,
        }
    }

    /// Converts to a native integer, keeping only the low 64 bits and then
    /// truncating to the target width.
    ///
    /// ```
    /// use numera_uint::BigUint;
    ///
    /// let value = BigUint::from(0x1_0000_00ffu64);
    /// assert_eq!(value.low_bits::<u8>(), 0xff);
    /// ```
    #[must_use]
    pub fn low_bits<T: FromLowBits>(&self) -> T {
        T::from_low_bits(self.low_u64())
    }

    /// Converts to `f64` as a weighted sum of the most-significant limbs.
    ///
    /// Limbs below the target precision are skipped; values beyond the
    /// `f64` range become infinity.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.to_float(f64::MANTISSA_DIGITS)
    }

    /// Converts to `f32`; see [`BigUint::to_f64`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32(&self) -> f32 {
        self.to_float(f32::MANTISSA_DIGITS) as f32
    }

    fn to_float(&self, mantissa_digits: u32) -> f64 {
        let wanted = u64::from(mantissa_digits) + LIMB_BITS;
        let mut value = 0.0f64;
        let mut covered = 0u64;
        let mut used = 0usize;

        for &limb in self.limbs.iter().rev() {
            if covered >= wanted {
                break;
            }
            value = value * 4_294_967_296.0 + f64::from(limb);
            covered += LIMB_BITS;
            used += 1;
        }

        let skipped = (self.limbs.len() - used) as u64 * LIMB_BITS;
        let scale = i32::try_from(skipped).unwrap_or(i32::MAX);
        value * 2f64.powi(scale)
    }

    pub(crate) fn top_limb(&self) -> u32 {
        self.limbs.last().copied().unwrap_or(0)
    }

    /// Restores the canonical form after in-place limb edits.
    pub(crate) fn trim(&mut self) {
        trim_limbs(&mut self.limbs);
        if self.limbs.is_empty() {
            self.limbs.push(0);
        }
    }
}

impl Default for BigUint {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zero for BigUint {
    fn zero() -> Self {
        Self { limbs: vec![0] }
    }

    fn is_zero(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 0
    }
}

impl One for BigUint {
    fn one() -> Self {
        Self { limbs: vec![1] }
    }

    fn is_one(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 1
    }
}

impl Num for BigUint {
    type FromStrRadixErr = UintError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, UintError> {
        crate::radix::parse_radix(s, radix)
    }
}

impl fmt::Debug for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigUint({self})")
    }
}

/// Native integers obtainable from the low 64 bits of a [`BigUint`].
pub trait FromLowBits {
    /// Truncates `bits` to the width of `Self`.
    fn from_low_bits(bits: u64) -> Self;
}

macro_rules! impl_from_low_bits {
    ($($t:ty),*) => {
        $(
            impl FromLowBits for $t {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                fn from_low_bits(bits: u64) -> Self {
                    bits as $t
                }
            }
        )*
    };
}

impl_from_low_bits!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<u64> for BigUint {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: u64) -> Self {
        let mut limbs = vec![value as u32];
        if value > u64::from(u32::MAX) {
            limbs.push((value >> 32) as u32);
        }
        Self { limbs }
    }
}

impl From<u128> for BigUint {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: u128) -> Self {
        let limbs = (0..4).map(|i| (value >> (32 * i)) as u32).collect();
        Self::from_limbs(limbs)
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigUint {
                fn from(value: $t) -> Self {
                    Self::from(value as u64)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, usize);

// Signed inputs keep only their magnitude.
macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigUint {
                fn from(value: $t) -> Self {
                    Self::from(value.unsigned_abs() as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_single_limb() {
        let zero = BigUint::zero();
        assert_eq!(zero.limbs(), &[0]);
        assert_eq!(zero.bit_len(), 0);
        assert_eq!(BigUint::default(), zero);
    }

    #[test]
    fn test_from_limbs_trims() {
        let value = BigUint::from_limbs(vec![5, 0, 0]);
        assert_eq!(value.limbs(), &[5]);
        assert_eq!(BigUint::from_limbs(Vec::new()), BigUint::zero());
        assert_eq!(BigUint::from_limbs(vec![0, 0]), BigUint::zero());
    }

    #[test]
    fn test_bit_len() {
        assert_eq!(BigUint::one().bit_len(), 1);
        assert_eq!(BigUint::from(255u32).bit_len(), 8);
        assert_eq!(BigUint::from(u64::MAX).bit_len(), 64);
        assert_eq!(BigUint::from(1u128 << 100).bit_len(), 101);
    }

    #[test]
    fn test_signed_stores_magnitude() {
        assert_eq!(BigUint::from(-42i32), BigUint::from(42u32));
        assert_eq!(BigUint::from(i64::MIN), BigUint::from(1u64 << 63));
    }

    #[test]
    fn test_low_bits_truncates() {
        let value = BigUint::from(u128::MAX);
        assert_eq!(value.low_u64(), u64::MAX);
        assert_eq!(value.low_bits::<u16>(), u16::MAX);
        assert_eq!(value.low_bits::<i32>(), -1);
        assert_eq!(BigUint::from(7u8).low_bits::<u64>(), 7);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(BigUint::zero().to_f64(), 0.0);
        assert_eq!(BigUint::from(12345u32).to_f64(), 12345.0);
        assert_eq!(BigUint::from(1u128 << 100).to_f64(), 2f64.powi(100));
        assert_eq!(BigUint::from(1u64 << 40).to_f32(), 2f32.powi(40));

        let huge = BigUint::from_limbs(vec![u32::MAX; 40]);
        assert!(huge.to_f64().is_infinite());
    }
}
