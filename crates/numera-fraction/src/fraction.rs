//! Sign-magnitude rationals with a precision cap.
//!
//! A [`Fraction`] is kept in lowest terms with a nonzero denominator. Each
//! value also carries `max_bits`: when the smaller of numerator and
//! denominator grows past it, both are shifted right by the excess before
//! reduction. Results of irrational or repeating computations therefore
//! stay bounded, at the cost of becoming approximations.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use num_traits::{One, Zero};
use numera_uint::BigUint;

use crate::error::FractionError;

/// Precision cap given to fractions that do not ask for one.
pub const DEFAULT_MAX_BITS: u64 = 256;

/// A signed rational with a bounded-precision representation.
///
/// Equality, ordering and hashing look at the value only; two fractions
/// with different `max_bits` but the same value compare equal.
#[derive(Clone)]
pub struct Fraction {
    pub(crate) numerator: BigUint,
    pub(crate) denominator: BigUint,
    pub(crate) is_negative: bool,
    pub(crate) max_bits: u64,
}

impl Fraction {
    /// Creates the non-negative fraction `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::DivisionByZero`] if `denominator` is zero.
    pub fn new(numerator: BigUint, denominator: BigUint) -> Result<Self, FractionError> {
        Self::from_parts(numerator, denominator, false, DEFAULT_MAX_BITS)
    }

    /// Creates a fraction from magnitudes, a sign and a precision cap, then
    /// normalizes it.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::DivisionByZero`] if `denominator` is zero.
    pub fn from_parts(
        numerator: BigUint,
        denominator: BigUint,
        is_negative: bool,
        max_bits: u64,
    ) -> Result<Self, FractionError> {
        let mut value = Self {
            numerator,
            denominator,
            is_negative,
            max_bits: max_bits.max(1),
        };
        value.simplify()?;
        Ok(value)
    }

    /// Creates a fraction from native signed integers.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::DivisionByZero`] if `denominator` is zero.
    ///
    /// ```
    /// use numera_fraction::Fraction;
    ///
    /// let half = Fraction::from_i64(-3, -6).unwrap();
    /// assert_eq!(half, Fraction::from_i64(1, 2).unwrap());
    /// ```
    pub fn from_i64(numerator: i64, denominator: i64) -> Result<Self, FractionError> {
        Self::from_parts(
            BigUint::from(numerator),
            BigUint::from(denominator),
            (numerator < 0) != (denominator < 0),
            DEFAULT_MAX_BITS,
        )
    }

    /// Creates a non-negative integral fraction.
    #[must_use]
    pub fn from_integer(value: BigUint) -> Self {
        Self::raw(value, BigUint::one(), false, DEFAULT_MAX_BITS)
    }

    /// Zero with the given precision cap.
    #[must_use]
    pub fn zero_with_max_bits(max_bits: u64) -> Self {
        Self::raw(BigUint::zero(), BigUint::one(), false, max_bits)
    }

    /// One with the given precision cap.
    #[must_use]
    pub fn one_with_max_bits(max_bits: u64) -> Self {
        Self::raw(BigUint::one(), BigUint::one(), false, max_bits)
    }

    /// Builds a value that is already in canonical form.
    pub(crate) fn raw(
        numerator: BigUint,
        denominator: BigUint,
        is_negative: bool,
        max_bits: u64,
    ) -> Self {
        Self {
            numerator,
            denominator,
            is_negative,
            max_bits: max_bits.max(1),
        }
    }

    /// Returns the numerator magnitude.
    #[must_use]
    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    /// Returns the denominator magnitude.
    #[must_use]
    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }

    /// Returns true if the value is below zero. Zero is never negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.is_negative
    }

    /// Returns the precision cap in bits.
    #[must_use]
    pub fn max_bits(&self) -> u64 {
        self.max_bits
    }

    /// Changes the precision cap, re-normalizing when it shrinks.
    ///
    /// # Errors
    ///
    /// Propagates kernel failures from the reduction.
    pub fn set_max_bits(&mut self, max_bits: u64) -> Result<(), FractionError> {
        let max_bits = max_bits.max(1);
        let shrinks = max_bits < self.max_bits;
        self.max_bits = max_bits;
        if shrinks {
            self.simplify()?;
        }
        Ok(())
    }

    /// Consuming form of [`Fraction::set_max_bits`].
    ///
    /// # Errors
    ///
    /// Propagates kernel failures from the reduction.
    pub fn with_max_bits(mut self, max_bits: u64) -> Result<Self, FractionError> {
        self.set_max_bits(max_bits)?;
        Ok(self)
    }

    /// Returns true if the magnitude is one; the sign is not considered.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.numerator == self.denominator
    }

    /// Returns true if the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.numerator.is_zero() {
            0
        } else if self.is_negative {
            -1
        } else {
            1
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            is_negative: false,
            ..self.clone()
        }
    }

    /// Returns the reciprocal.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::DivisionByZero`] for zero.
    pub fn recip(&self) -> Result<Self, FractionError> {
        if self.numerator.is_zero() {
            return Err(FractionError::DivisionByZero);
        }
        Ok(Self {
            numerator: self.denominator.clone(),
            denominator: self.numerator.clone(),
            is_negative: self.is_negative,
            max_bits: self.max_bits,
        })
    }

    /// Multiplies by `2^exponent` with a shift instead of a multiplication.
    ///
    /// # Errors
    ///
    /// Propagates kernel failures from the reduction.
    pub fn mul_pow2(&self, exponent: i64) -> Result<Self, FractionError> {
        let shift = exponent.unsigned_abs();
        let (numerator, denominator) = match exponent.cmp(&0) {
            Ordering::Greater => (&self.numerator << shift, self.denominator.clone()),
            Ordering::Less => (self.numerator.clone(), &self.denominator << shift),
            Ordering::Equal => return Ok(self.clone()),
        };
        Self::from_parts(numerator, denominator, self.is_negative, self.max_bits)
    }

    /// Restores the canonical form.
    ///
    /// Order matters: a zero numerator is normalized before anything else
    /// so that zero is always positive, and the precision cap is applied
    /// before the GCD so that the reduction works on bounded operands.
    pub(crate) fn simplify(&mut self) -> Result<(), FractionError> {
        if self.denominator.is_zero() {
            return Err(FractionError::DivisionByZero);
        }
        if self.numerator.is_zero() {
            self.denominator = BigUint::one();
            self.is_negative = false;
            return Ok(());
        }
        if self.numerator == self.denominator {
            self.numerator = BigUint::one();
            self.denominator = BigUint::one();
            return Ok(());
        }
        if self.numerator.is_one() || self.denominator.is_one() {
            return Ok(());
        }

        let smaller = self.numerator.bit_len().min(self.denominator.bit_len());
        let excess = smaller.saturating_sub(self.max_bits);
        if excess > 0 {
            tracing::trace!(excess, max_bits = self.max_bits, "precision cap truncation");
            self.numerator >>= excess;
            self.denominator >>= excess;
        }

        let gcd = self.numerator.try_gcd(&self.denominator)?;
        if !gcd.is_one() {
            self.numerator /= &gcd;
            self.denominator /= &gcd;
        }
        Ok(())
    }

    /// Compares magnitudes by cross-multiplication.
    pub(crate) fn cmp_magnitude(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::zero_with_max_bits(DEFAULT_MAX_BITS)
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::one_with_max_bits(DEFAULT_MAX_BITS)
    }

    fn is_one(&self) -> bool {
        !self.is_negative && self.is_unit()
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.is_negative == other.is_negative
            && self.numerator == other.numerator
            && self.denominator == other.denominator
    }
}

impl Eq for Fraction {}

impl Hash for Fraction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_negative.hash(state);
        self.numerator.hash(state);
        self.denominator.hash(state);
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative, other.is_negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative { "-" } else { "" };
        write!(f, "Fraction({sign}{}/{})", self.numerator, self.denominator)
    }
}

impl From<BigUint> for Fraction {
    fn from(value: BigUint) -> Self {
        Self::from_integer(value)
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Fraction {
                fn from(value: $t) -> Self {
                    Self::from_integer(BigUint::from(value))
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Fraction {
                fn from(value: $t) -> Self {
                    Self::raw(BigUint::from(value), BigUint::one(), value < 0, DEFAULT_MAX_BITS)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::from_i64(n, d).unwrap()
    }

    #[test]
    fn test_reduction() {
        let f = frac(6, 8);
        assert_eq!(f.numerator(), &BigUint::from(3u32));
        assert_eq!(f.denominator(), &BigUint::from(4u32));
        assert!(!f.is_negative());
    }

    #[test]
    fn test_sign_from_operands() {
        assert!(frac(-1, 2).is_negative());
        assert!(frac(1, -2).is_negative());
        assert!(!frac(-1, -2).is_negative());
    }

    #[test]
    fn test_zero_is_canonical() {
        let zero = frac(0, -7);
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
        assert!(zero.denominator().is_one());
        assert_eq!(zero, Fraction::zero());
    }

    #[test]
    fn test_unit_forms() {
        let one = frac(9, 9);
        assert!(one.is_one());
        assert!(one.numerator().is_one() && one.denominator().is_one());
        let minus_one = frac(-5, 5);
        assert!(minus_one.is_unit());
        assert!(!minus_one.is_one());
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Fraction::from_i64(1, 0), Err(FractionError::DivisionByZero));
        assert_eq!(
            Fraction::new(BigUint::one(), BigUint::zero()),
            Err(FractionError::DivisionByZero)
        );
    }

    #[test]
    fn test_precision_cap_truncates() {
        // (2^80 + 1) / (2^70 + 3) with a 16-bit cap keeps 16 bits in the
        // smaller part.
        let num = &(BigUint::one() << 80) + &BigUint::one();
        let den = &(BigUint::one() << 70) + &BigUint::from(3u32);
        let f = Fraction::from_parts(num, den, false, 16).unwrap();
        assert!(f.denominator().bit_len() <= 16);
        assert!(f.numerator().bit_len() <= 26);
        assert_eq!(f.max_bits(), 16);
    }

    #[test]
    fn test_set_max_bits_resimplifies_only_when_shrinking() {
        let num = &(BigUint::one() << 100) + &BigUint::one();
        let den = &(BigUint::one() << 90) + &BigUint::from(7u32);
        let mut value = Fraction::new(num, den).unwrap();
        let before = value.clone();
        value.set_max_bits(1000).unwrap();
        assert_eq!(value, before);
        value.set_max_bits(8).unwrap();
        assert!(value.numerator().bit_len().min(value.denominator().bit_len()) <= 8);
    }

    #[test]
    fn test_ordering() {
        let mut values = vec![frac(1, 2), frac(-3, 4), frac(0, 1), frac(-1, 4), frac(5, 3)];
        values.sort();
        assert_eq!(values, vec![frac(-3, 4), frac(-1, 4), frac(0, 1), frac(1, 2), frac(5, 3)]);
    }

    #[test]
    fn test_equality_ignores_max_bits() {
        let a = frac(1, 3);
        let b = frac(1, 3).with_max_bits(64).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_recip_and_abs() {
        assert_eq!(frac(-2, 3).recip().unwrap(), frac(-3, 2));
        assert_eq!(Fraction::zero().recip(), Err(FractionError::DivisionByZero));
        assert_eq!(frac(-2, 3).abs(), frac(2, 3));
        assert_eq!(frac(-2, 3).signum(), -1);
        assert_eq!(Fraction::zero().signum(), 0);
    }

    #[test]
    fn test_mul_pow2() {
        assert_eq!(frac(3, 4).mul_pow2(2).unwrap(), frac(3, 1));
        assert_eq!(frac(3, 4).mul_pow2(-1).unwrap(), frac(3, 8));
        assert_eq!(frac(-3, 4).mul_pow2(0).unwrap(), frac(-3, 4));
    }

    #[test]
    fn test_from_native() {
        assert_eq!(Fraction::from(-7i32), frac(-7, 1));
        assert_eq!(Fraction::from(7u64), frac(7, 1));
        assert!(Fraction::from(4u8).is_integer());
    }
}
