//! Field arithmetic on fractions.
//!
//! The `checked_*` methods are the primitives. Operators forward to them
//! and panic on failure, which for `+`, `-` and `*` can only be a kernel
//! defect and for `/` means a zero divisor.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::Zero;

use crate::error::FractionError;
use crate::Fraction;

impl Fraction {
    /// Adds `rhs`, treating it as having sign `rhs_negative`.
    ///
    /// Same signs add magnitudes; opposite signs subtract the smaller
    /// cross product from the larger and take the sign of the larger.
    fn add_signed(&self, rhs: &Self, rhs_negative: bool) -> Result<Self, FractionError> {
        let max_bits = self.max_bits.max(rhs.max_bits);
        let left = &self.numerator * &rhs.denominator;
        let right = &rhs.numerator * &self.denominator;
        let denominator = &self.denominator * &rhs.denominator;

        let (numerator, is_negative) = if self.is_negative == rhs_negative {
            (left + right, self.is_negative)
        } else if left >= right {
            (left - right, self.is_negative)
        } else {
            (right - left, rhs_negative)
        };

        Self::from_parts(numerator, denominator, is_negative, max_bits)
    }

    /// Returns `self + rhs`.
    ///
    /// # Errors
    ///
    /// Propagates kernel failures from the reduction.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, FractionError> {
        self.add_signed(rhs, rhs.is_negative)
    }

    /// Returns `self - rhs`.
    ///
    /// # Errors
    ///
    /// Propagates kernel failures from the reduction.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, FractionError> {
        self.add_signed(rhs, !rhs.is_negative && !rhs.is_zero())
    }

    /// Returns `self * rhs`.
    ///
    /// # Errors
    ///
    /// Propagates kernel failures from the reduction.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, FractionError> {
        Self::from_parts(
            &self.numerator * &rhs.numerator,
            &self.denominator * &rhs.denominator,
            self.is_negative != rhs.is_negative,
            self.max_bits.max(rhs.max_bits),
        )
    }

    /// Returns `self / rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::DivisionByZero`] if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, FractionError> {
        if rhs.is_zero() {
            return Err(FractionError::DivisionByZero);
        }
        Self::from_parts(
            &self.numerator * &rhs.denominator,
            &self.denominator * &rhs.numerator,
            self.is_negative != rhs.is_negative,
            self.max_bits.max(rhs.max_bits),
        )
    }
}

fn expect_ok(result: Result<Fraction, FractionError>) -> Fraction {
    result.unwrap_or_else(|err| panic!("{err}"))
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $checked:ident) => {
        impl $trait<&Fraction> for &Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &Fraction) -> Fraction {
                expect_ok(self.$checked(rhs))
            }
        }

        impl $trait<&Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &Fraction) -> Fraction {
                expect_ok(self.$checked(rhs))
            }
        }

        impl $trait for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: Fraction) -> Fraction {
                expect_ok(self.$checked(&rhs))
            }
        }

        impl $assign_trait<&Fraction> for Fraction {
            fn $assign_method(&mut self, rhs: &Fraction) {
                *self = expect_ok(self.$checked(rhs));
            }
        }

        impl $assign_trait for Fraction {
            fn $assign_method(&mut self, rhs: Fraction) {
                *self = expect_ok(self.$checked(&rhs));
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, checked_add);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, checked_sub);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, checked_mul);
// Panics on a zero divisor.
impl_binary_op!(Div, div, DivAssign, div_assign, checked_div);

impl Neg for Fraction {
    type Output = Self;

    fn neg(mut self) -> Self {
        if !self.is_zero() {
            self.is_negative = !self.is_negative;
        }
        self
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        -self.clone()
    }
}
