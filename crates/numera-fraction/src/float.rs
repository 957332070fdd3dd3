//! Exact conversion from IEEE-754 bit patterns.
//!
//! A finite float is `mantissa * 2^(exponent - (digits - 1))`, so it maps
//! onto a fraction with a power-of-two denominator without any rounding.
//! Layouts wider than the native `f32`/`f64` are accepted as raw bits.

use num_traits::Zero;
use numera_uint::BigUint;

use crate::error::FractionError;
use crate::fraction::DEFAULT_MAX_BITS;
use crate::Fraction;

/// Field widths of a binary floating-point format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloatLayout {
    /// Width of the biased exponent field.
    pub exponent_bits: u32,
    /// Width of the stored mantissa field.
    pub mantissa_bits: u32,
    /// Whether the leading integer bit is stored rather than implied.
    pub explicit_integer_bit: bool,
}

impl FloatLayout {
    /// IEEE-754 binary16.
    pub const HALF: Self = Self::implicit(5, 10);
    /// IEEE-754 binary32.
    pub const SINGLE: Self = Self::implicit(8, 23);
    /// IEEE-754 binary64.
    pub const DOUBLE: Self = Self::implicit(11, 52);
    /// x87 80-bit extended precision.
    pub const EXTENDED: Self = Self {
        exponent_bits: 15,
        mantissa_bits: 64,
        explicit_integer_bit: true,
    };
    /// IEEE-754 binary128.
    pub const QUAD: Self = Self::implicit(15, 112);

    const fn implicit(exponent_bits: u32, mantissa_bits: u32) -> Self {
        Self {
            exponent_bits,
            mantissa_bits,
            explicit_integer_bit: false,
        }
    }

    /// Exponent bias, `2^(exponent_bits - 1) - 1`.
    #[must_use]
    pub const fn bias(&self) -> i64 {
        (1 << (self.exponent_bits - 1)) - 1
    }

    /// Significant binary digits, counting an implied integer bit.
    #[must_use]
    pub const fn digits(&self) -> u32 {
        if self.explicit_integer_bit {
            self.mantissa_bits
        } else {
            self.mantissa_bits + 1
        }
    }

    /// Splits a bit pattern into sign, unbiased exponent and mantissa.
    ///
    /// Subnormals report the minimum exponent and no integer bit, so they
    /// share the [`FloatClass::Finite`] path with normal numbers.
    #[must_use]
    pub fn decompose(&self, bits: u128) -> FloatParts {
        let mantissa_mask = (1u128 << self.mantissa_bits) - 1;
        let exponent_mask = (1u128 << self.exponent_bits) - 1;

        let mut mantissa = bits & mantissa_mask;
        let biased = bits >> self.mantissa_bits & exponent_mask;
        let is_negative = bits >> (self.mantissa_bits + self.exponent_bits) & 1 == 1;

        // The explicit integer bit does not take part in classifying
        // infinities and NaNs.
        let fraction_field = if self.explicit_integer_bit {
            mantissa & (mantissa_mask >> 1)
        } else {
            mantissa
        };

        let class = if biased == exponent_mask {
            if fraction_field == 0 {
                FloatClass::Infinity
            } else {
                FloatClass::NaN
            }
        } else if biased == 0 && mantissa == 0 {
            FloatClass::Zero
        } else {
            FloatClass::Finite
        };

        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let exponent = if biased == 0 {
            1 - self.bias()
        } else {
            if !self.explicit_integer_bit {
                mantissa |= 1 << self.mantissa_bits;
            }
            biased as i64 - self.bias()
        };

        FloatParts {
            class,
            is_negative,
            exponent,
            mantissa,
        }
    }
}

/// Classification of a decomposed float.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatClass {
    /// A normal or subnormal number.
    Finite,
    /// Positive or negative zero.
    Zero,
    /// Positive or negative infinity.
    Infinity,
    /// Not a number.
    NaN,
}

/// Fields of a decomposed float.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloatParts {
    /// Value class.
    pub class: FloatClass,
    /// Sign bit.
    pub is_negative: bool,
    /// Unbiased binary exponent of the leading digit.
    pub exponent: i64,
    /// Mantissa with the integer bit in place.
    pub mantissa: u128,
}

impl Fraction {
    /// Converts a raw bit pattern of `layout` exactly.
    ///
    /// Zeros of either sign become positive zero.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] for infinities and NaNs.
    pub fn from_float_bits(
        layout: FloatLayout,
        bits: u128,
        max_bits: u64,
    ) -> Result<Self, FractionError> {
        let parts = layout.decompose(bits);
        match parts.class {
            FloatClass::Zero => return Ok(Self::zero_with_max_bits(max_bits)),
            FloatClass::Infinity => return Err(FractionError::invalid("float value is infinite")),
            FloatClass::NaN => return Err(FractionError::invalid("float value is NaN")),
            FloatClass::Finite => {}
        }

        let mut numerator = BigUint::from(parts.mantissa);
        let mut denominator = BigUint::from(1u32) << u64::from(layout.digits() - 1);
        let shift = parts.exponent.unsigned_abs();
        if parts.exponent > 0 {
            numerator <<= shift;
        } else {
            denominator <<= shift;
        }

        debug_assert!(!numerator.is_zero());
        Self::from_parts(numerator, denominator, parts.is_negative, max_bits)
    }

    /// Converts an `f64` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] for infinities and NaNs.
    ///
    /// ```
    /// use numera_fraction::Fraction;
    ///
    /// assert_eq!(Fraction::from_f64(-0.75).unwrap(), Fraction::from_i64(-3, 4).unwrap());
    /// assert!(Fraction::from_f64(f64::NAN).is_err());
    /// ```
    pub fn from_f64(value: f64) -> Result<Self, FractionError> {
        Self::from_float_bits(FloatLayout::DOUBLE, u128::from(value.to_bits()), DEFAULT_MAX_BITS)
    }

    /// Converts an `f32` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] for infinities and NaNs.
    pub fn from_f32(value: f32) -> Result<Self, FractionError> {
        Self::from_float_bits(FloatLayout::SINGLE, u128::from(value.to_bits()), DEFAULT_MAX_BITS)
    }

    /// Converts a binary16 bit pattern exactly.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] for infinities and NaNs.
    pub fn from_f16_bits(bits: u16) -> Result<Self, FractionError> {
        Self::from_float_bits(FloatLayout::HALF, u128::from(bits), DEFAULT_MAX_BITS)
    }

    /// Converts an 80-bit extended bit pattern (in the low 80 bits) exactly.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] for infinities and NaNs.
    pub fn from_f80_bits(bits: u128) -> Result<Self, FractionError> {
        Self::from_float_bits(FloatLayout::EXTENDED, bits, DEFAULT_MAX_BITS)
    }

    /// Converts a binary128 bit pattern exactly.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] for infinities and NaNs.
    pub fn from_f128_bits(bits: u128) -> Result<Self, FractionError> {
        Self::from_float_bits(FloatLayout::QUAD, bits, DEFAULT_MAX_BITS)
    }
}

impl TryFrom<f64> for Fraction {
    type Error = FractionError;

    fn try_from(value: f64) -> Result<Self, FractionError> {
        Self::from_f64(value)
    }
}

impl TryFrom<f32> for Fraction {
    type Error = FractionError;

    fn try_from(value: f32) -> Result<Self, FractionError> {
        Self::from_f32(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::from_i64(n, d).unwrap()
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(FloatLayout::HALF.bias(), 15);
        assert_eq!(FloatLayout::DOUBLE.bias(), 1023);
        assert_eq!(FloatLayout::QUAD.bias(), 16383);
        assert_eq!(FloatLayout::DOUBLE.digits(), 53);
        assert_eq!(FloatLayout::EXTENDED.digits(), 64);
        assert_eq!(FloatLayout::QUAD.digits(), 113);
    }

    #[test]
    fn test_decompose_classes() {
        let d = FloatLayout::DOUBLE;
        assert_eq!(d.decompose(u128::from(0f64.to_bits())).class, FloatClass::Zero);
        assert_eq!(d.decompose(u128::from((-0f64).to_bits())).class, FloatClass::Zero);
        assert_eq!(d.decompose(u128::from(f64::INFINITY.to_bits())).class, FloatClass::Infinity);
        assert_eq!(d.decompose(u128::from(f64::NAN.to_bits())).class, FloatClass::NaN);

        let parts = d.decompose(u128::from(1.5f64.to_bits()));
        assert_eq!(parts.class, FloatClass::Finite);
        assert_eq!(parts.exponent, 0);
        assert_eq!(parts.mantissa, 3 << 51);
    }

    #[test]
    fn test_decimal_tenth_is_exact_binary() {
        let tenth = Fraction::from_f64(0.1).unwrap();
        assert_eq!(tenth.numerator(), &BigUint::from(3_602_879_701_896_397u64));
        assert_eq!(tenth.denominator(), &(BigUint::one() << 55));
    }

    #[test]
    fn test_simple_values() {
        assert_eq!(Fraction::from_f64(1.0).unwrap(), Fraction::one());
        assert_eq!(Fraction::from_f64(-2.5).unwrap(), frac(-5, 2));
        assert_eq!(Fraction::from_f64(1024.0).unwrap(), frac(1024, 1));
        assert_eq!(Fraction::from_f32(0.375).unwrap(), frac(3, 8));
        assert_eq!(Fraction::try_from(0.5f32).unwrap(), frac(1, 2));
    }

    #[test]
    fn test_negative_zero_is_positive() {
        let zero = Fraction::from_f64(-0.0).unwrap();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
    }

    #[test]
    fn test_subnormal() {
        let tiny = Fraction::from_f64(f64::from_bits(1)).unwrap();
        assert!(tiny.numerator().is_one());
        assert_eq!(tiny.denominator(), &(BigUint::one() << 1074));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            Fraction::from_f64(f64::INFINITY),
            Err(FractionError::InvalidArgument(_))
        ));
        assert!(matches!(
            Fraction::from_f32(f32::NAN),
            Err(FractionError::InvalidArgument(_))
        ));
        assert!(Fraction::from_f16_bits(0x7c00).is_err());
    }

    #[test]
    fn test_half_precision() {
        assert_eq!(Fraction::from_f16_bits(0x3c00).unwrap(), Fraction::one());
        assert_eq!(Fraction::from_f16_bits(0xc000).unwrap(), frac(-2, 1));
        assert_eq!(Fraction::from_f16_bits(0x3800).unwrap(), frac(1, 2));
        // Smallest subnormal: 2^-24.
        assert_eq!(
            Fraction::from_f16_bits(0x0001).unwrap().denominator(),
            &(BigUint::one() << 24)
        );
    }

    #[test]
    fn test_extended_precision() {
        let one = (0x3fffu128 << 64) | (1 << 63);
        assert_eq!(Fraction::from_f80_bits(one).unwrap(), Fraction::one());

        let minus_three = (0xc000u128 << 64) | (0b11 << 62);
        assert_eq!(Fraction::from_f80_bits(minus_three).unwrap(), frac(-3, 1));

        let infinity = (0x7fffu128 << 64) | (1 << 63);
        assert!(Fraction::from_f80_bits(infinity).is_err());
    }

    #[test]
    fn test_quad_precision() {
        assert_eq!(Fraction::from_f128_bits(0x3fff << 112).unwrap(), Fraction::one());
        let minus_half = (1u128 << 127) | (0x3ffe << 112);
        assert_eq!(Fraction::from_f128_bits(minus_half).unwrap(), frac(-1, 2));
        assert!(Fraction::from_f128_bits(0x7fff << 112).is_err());
    }
}
