//! Arithmetic operators and the checked entry points behind them.
//!
//! The operators are total: subtraction floors at zero and division or
//! remainder by zero yields zero. Callers that need to observe those
//! conditions use [`BigUint::div_rem`] and the `checked_*` methods.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign};

use num_traits::Zero;

use crate::algorithms::add::{add_limbs, sub_assign_limbs};
use crate::algorithms::{div, gcd, mul};
use crate::error::UintError;
use crate::BigUint;

impl BigUint {
    /// Divides by `divisor`, returning `(quotient, remainder)`.
    ///
    /// # Errors
    ///
    /// Returns [`UintError::DivisionByZero`] if `divisor` is zero.
    ///
    /// ```
    /// use numera_uint::{BigUint, UintError};
    ///
    /// let (q, r) = BigUint::from(100u32).div_rem(&BigUint::from(7u32)).unwrap();
    /// assert_eq!((q, r), (BigUint::from(14u32), BigUint::from(2u32)));
    /// assert_eq!(BigUint::from(1u32).div_rem(&BigUint::from(0u32)), Err(UintError::DivisionByZero));
    /// ```
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), UintError> {
        div::div_rem(self, divisor)
    }

    /// Divides with the bit-serial long division algorithm.
    ///
    /// Slower than [`BigUint::div_rem`] for large operands; useful as an
    /// independent check.
    ///
    /// # Errors
    ///
    /// Returns [`UintError::DivisionByZero`] if `divisor` is zero.
    pub fn div_rem_long(&self, divisor: &Self) -> Result<(Self, Self), UintError> {
        div::long_division(self, divisor)
    }

    /// Returns the quotient, or `None` for a zero divisor.
    #[must_use]
    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        self.div_rem(divisor).ok().map(|(q, _)| q)
    }

    /// Returns the remainder, or `None` for a zero divisor.
    #[must_use]
    pub fn checked_rem(&self, divisor: &Self) -> Option<Self> {
        self.div_rem(divisor).ok().map(|(_, r)| r)
    }

    /// Subtracts `rhs`, returning `None` if the result would be negative.
    #[must_use]
    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        (self >= rhs).then(|| self - rhs)
    }

    /// Greatest common divisor.
    ///
    /// # Panics
    ///
    /// Panics if the reduction loop exceeds its iteration cap, which does not
    /// happen for valid values. Use [`BigUint::try_gcd`] to get the error.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        self.try_gcd(other).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Greatest common divisor, reporting a runaway loop as an error.
    ///
    /// # Errors
    ///
    /// Returns [`UintError::ConvergenceFailure`] if the loop hits its cap.
    pub fn try_gcd(&self, other: &Self) -> Result<Self, UintError> {
        gcd::gcd(self, other)
    }

    /// Least common multiple; zero if either operand is zero.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`BigUint::try_gcd`].
    pub fn lcm(&self, other: &Self) -> Result<Self, UintError> {
        gcd::lcm(self, other)
    }

    /// Raises to a native exponent; `x.pow(0)` is one, including `0^0`.
    #[must_use]
    pub fn pow(&self, exponent: u64) -> Self {
        gcd::pow(self, exponent)
    }

    /// Multiplies with the schoolbook algorithm regardless of size.
    #[must_use]
    pub fn mul_schoolbook(&self, other: &Self) -> Self {
        Self::from_limbs(mul::schoolbook_mul(&self.limbs, &other.limbs))
    }

    /// Multiplies with Karatsuba recursion regardless of the threshold.
    #[must_use]
    pub fn mul_karatsuba(&self, other: &Self) -> Self {
        Self::from_limbs(mul::karatsuba_mul(&self.limbs, &other.limbs))
    }
}

fn add(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() {
        return b.clone();
    }
    if b.is_zero() {
        return a.clone();
    }
    BigUint::from_limbs(add_limbs(&a.limbs, &b.limbs))
}

fn sub(a: &BigUint, b: &BigUint) -> BigUint {
    if a <= b {
        return BigUint::zero();
    }
    let mut limbs = a.limbs.clone();
    sub_assign_limbs(&mut limbs, &b.limbs);
    BigUint::from_limbs(limbs)
}

fn quotient(a: &BigUint, b: &BigUint) -> BigUint {
    match div::div_rem(a, b) {
        Ok((q, _)) => q,
        Err(UintError::DivisionByZero) => BigUint::zero(),
        Err(err) => panic!("{err}"),
    }
}

fn remainder(a: &BigUint, b: &BigUint) -> BigUint {
    match div::div_rem(a, b) {
        Ok((_, r)) => r,
        Err(UintError::DivisionByZero) => BigUint::zero(),
        Err(err) => panic!("{err}"),
    }
}

// Every operator forwards to one by-reference kernel; the by-value forms
// only differ in ownership.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $kernel:path) => {
        impl $trait<&BigUint> for &BigUint {
            type Output = BigUint;

            fn $method(self, rhs: &BigUint) -> BigUint {
                $kernel(self, rhs)
            }
        }

        impl $trait<BigUint> for &BigUint {
            type Output = BigUint;

            fn $method(self, rhs: BigUint) -> BigUint {
                $kernel(self, &rhs)
            }
        }

        impl $trait<&BigUint> for BigUint {
            type Output = BigUint;

            fn $method(self, rhs: &BigUint) -> BigUint {
                $kernel(&self, rhs)
            }
        }

        impl $trait for BigUint {
            type Output = BigUint;

            fn $method(self, rhs: BigUint) -> BigUint {
                $kernel(&self, &rhs)
            }
        }

        impl $assign_trait<&BigUint> for BigUint {
            fn $assign_method(&mut self, rhs: &BigUint) {
                *self = $kernel(self, rhs);
            }
        }

        impl $assign_trait for BigUint {
            fn $assign_method(&mut self, rhs: BigUint) {
                *self = $kernel(self, &rhs);
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, add);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, sub);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, mul::multiply);
impl_binary_op!(Div, div, DivAssign, div_assign, quotient);
impl_binary_op!(Rem, rem, RemAssign, rem_assign, remainder);

impl std::iter::Sum for BigUint {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl std::iter::Product for BigUint {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(num_traits::One::one(), |acc: Self, x| acc * x)
    }
}
