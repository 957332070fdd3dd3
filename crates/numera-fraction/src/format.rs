//! Scientific-notation rendering and conversion to native floats.

use std::fmt;

use num_traits::Zero;
use numera_uint::{BigUint, UintError};

use crate::Fraction;

/// Digits after the point used by `Display` when no precision is given.
pub const DEFAULT_DISPLAY_DIGITS: usize = 5;

impl Fraction {
    /// Renders the value as `[-]D.DDDDe[+|-]X` with up to `precision`
    /// digits after the point.
    ///
    /// Digits past `precision` are truncated, not rounded. Without
    /// `pad_with_zeros` trailing zeros are dropped, which can leave a bare
    /// point (`1.e+2`); with it the mantissa always has exactly
    /// `precision` digits after the point.
    ///
    /// ```
    /// use numera_fraction::Fraction;
    ///
    /// let value = Fraction::from(12345);
    /// assert_eq!(value.to_scientific(2, false), "1.23e+4");
    /// assert_eq!(Fraction::from(100).to_scientific(5, false), "1.e+2");
    /// assert_eq!(Fraction::from_i64(-1, 8).unwrap().to_scientific(4, true), "-1.2500e-1");
    /// ```
    #[must_use]
    pub fn to_scientific(&self, precision: usize, pad_with_zeros: bool) -> String {
        if self.numerator.is_zero() {
            let zeros = if pad_with_zeros { precision } else { 0 };
            return format!("0.{}e+0", "0".repeat(zeros));
        }

        let ten = BigUint::from(10u32);
        let (integer, mut remainder) = self.split_integer(&self.numerator);
        let mut out = String::new();
        if self.is_negative {
            out.push('-');
        }

        let exponent: i64;
        let mut written = 0;
        if integer.is_zero() {
            // Skip leading fractional zeros; the first nonzero digit leads.
            let mut leading_zeros = 0i64;
            let lead = loop {
                let (digit, rest) = self.split_integer(&(&remainder * &ten));
                remainder = rest;
                if !digit.is_zero() {
                    break digit;
                }
                leading_zeros += 1;
            };
            exponent = -(leading_zeros + 1);
            out.push_str(&lead.to_string());
            out.push('.');
        } else {
            let digits = integer.to_string();
            exponent = i64::try_from(digits.len() - 1).unwrap_or(i64::MAX);
            out.push_str(&digits[..1]);
            out.push('.');
            let tail = &digits[1..];
            let take = tail.len().min(precision);
            out.push_str(&tail[..take]);
            written = take;
        }

        while written < precision && !remainder.is_zero() {
            let (digit, rest) = self.split_integer(&(&remainder * &ten));
            out.push_str(&digit.to_string());
            remainder = rest;
            written += 1;
        }

        if pad_with_zeros {
            out.extend(std::iter::repeat('0').take(precision - written));
        } else {
            while out.ends_with('0') {
                out.pop();
            }
        }

        let sign = if exponent < 0 { '-' } else { '+' };
        out.push('e');
        out.push(sign);
        out.push_str(&exponent.unsigned_abs().to_string());
        out
    }

    /// Splits `numerator / self.denominator` into quotient and remainder.
    fn split_integer(&self, numerator: &BigUint) -> (BigUint, BigUint) {
        // The denominator of a constructed fraction is never zero.
        numerator.div_rem(&self.denominator).unwrap_or_default()
    }

    /// Returns the numerator and denominator rendered in `radix`.
    ///
    /// # Errors
    ///
    /// Returns [`UintError::InvalidRadix`] outside `2..=36`.
    pub fn to_fraction_strings(&self, radix: u32) -> Result<(String, String), UintError> {
        Ok((
            self.numerator.to_str_radix(radix)?,
            self.denominator.to_str_radix(radix)?,
        ))
    }

    /// Converts to the nearest `f64`.
    ///
    /// The value is rendered with ten digits beyond the round-trip width of
    /// `f64` and parsed back, which rounds correctly. Values out of range
    /// become infinities or zero.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.to_native(F64_MAX_DIGITS10 + 10)
    }

    /// Converts to the nearest `f32`; see [`Fraction::to_f64`].
    #[must_use]
    pub fn to_f32(&self) -> f32 {
        self.to_native(F32_MAX_DIGITS10 + 10)
    }

    fn to_native<T: std::str::FromStr + Default>(&self, digits: usize) -> T {
        // The rendering is always a valid float literal.
        self.to_scientific(digits, false).parse().unwrap_or_default()
    }
}

// Decimal digits needed to round-trip any value of the type.
const F64_MAX_DIGITS10: usize = 17;
const F32_MAX_DIGITS10: usize = 9;

impl fmt::Display for Fraction {
    /// Scientific notation. A precision (`{:.8}`) selects the number of
    /// digits after the point and pads with zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match f.precision() {
            Some(precision) => self.to_scientific(precision, true),
            None => self.to_scientific(DEFAULT_DISPLAY_DIGITS, false),
        };
        f.pad(&text)
    }
}
