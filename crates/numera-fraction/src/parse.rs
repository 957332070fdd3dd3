//! Decimal and scientific-notation parsing.
//!
//! Accepted forms are an optional sign, digits with at most one decimal
//! point, and an optional `e`/`E` exponent with its own optional sign:
//! `42`, `-0.125`, `.5`, `3.`, `1.13e3`, `+1.e-3`. The value is read
//! exactly; the precision cap applies only through the final reduction.
//! Exponents are bounded by [`MAX_DECIMAL_EXPONENT`] since an exact
//! `10^e` costs about `3.3 * e` bits.

use std::str::FromStr;

use numera_uint::BigUint;

use crate::error::FractionError;
use crate::fraction::DEFAULT_MAX_BITS;
use crate::Fraction;

/// Largest exponent magnitude accepted by [`Fraction::parse_with_max_bits`].
pub const MAX_DECIMAL_EXPONENT: u64 = 100_000;

/// Parsed pieces of a numeral, borrowed from the input.
#[derive(Debug, PartialEq, Eq)]
struct Numeral<'a> {
    is_negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: i64,
}

fn scan(s: &str) -> Result<Numeral<'_>, FractionError> {
    if s.is_empty() {
        return Err(FractionError::invalid("numeral is empty"));
    }

    let mut signs = 0;
    let mut dot = None;
    let mut exponent_marker = None;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => {}
            '+' | '-' => {
                signs += 1;
                if signs > 2 {
                    return Err(FractionError::invalid("numeral has more than two signs"));
                }
                let after_marker = exponent_marker.is_some_and(|e| e + 1 == i);
                if i != 0 && !after_marker {
                    return Err(FractionError::invalid("sign is not at the start of a number"));
                }
            }
            '.' => {
                if dot.replace(i).is_some() {
                    return Err(FractionError::invalid("numeral has more than one decimal point"));
                }
                if exponent_marker.is_some() {
                    return Err(FractionError::invalid("exponent must be an integer"));
                }
            }
            'e' | 'E' => {
                if exponent_marker.replace(i).is_some() {
                    return Err(FractionError::invalid("numeral has more than one exponent"));
                }
            }
            _ => {
                return Err(FractionError::invalid(format!("invalid character {c:?} in numeral")));
            }
        }
    }

    let (mantissa, exponent) = match exponent_marker {
        Some(e) => (&s[..e], parse_exponent(&s[e + 1..])?),
        None => (s, 0),
    };

    let (is_negative, mantissa) = match mantissa.as_bytes().first() {
        Some(b'-') => (true, &mantissa[1..]),
        Some(b'+') => (false, &mantissa[1..]),
        _ => (false, mantissa),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if integer.is_empty() && fraction.is_empty() {
        return Err(FractionError::invalid("numeral has no digits"));
    }

    Ok(Numeral {
        is_negative,
        integer,
        fraction,
        exponent,
    })
}

fn parse_exponent(s: &str) -> Result<i64, FractionError> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() {
        return Err(FractionError::invalid("missing exponent digits"));
    }
    let exponent: i64 = s
        .parse()
        .map_err(|_| FractionError::invalid(format!("exponent {s:?} is out of range")))?;
    if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT {
        return Err(FractionError::invalid(format!(
            "exponent {exponent} exceeds the limit of {MAX_DECIMAL_EXPONENT}"
        )));
    }
    Ok(exponent)
}

impl Fraction {
    /// Parses a decimal or scientific numeral with the given precision cap.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] for malformed input and
    /// for exponents larger than [`MAX_DECIMAL_EXPONENT`] in magnitude.
    ///
    /// ```
    /// use numera_fraction::Fraction;
    ///
    /// let value = Fraction::parse_with_max_bits("-1.25e2", 128).unwrap();
    /// assert_eq!(value, Fraction::from(-125));
    /// ```
    pub fn parse_with_max_bits(s: &str, max_bits: u64) -> Result<Self, FractionError> {
        let numeral = scan(s)?;

        let digits = [numeral.integer, numeral.fraction].concat();
        let mut numerator = BigUint::from_str_radix(&digits, 10)?;
        let ten = BigUint::from(10u32);
        let mut denominator = ten.pow(numeral.fraction.len() as u64);

        let scale = ten.pow(numeral.exponent.unsigned_abs());
        if numeral.exponent > 0 {
            numerator *= scale;
        } else {
            denominator *= scale;
        }

        Self::from_parts(numerator, denominator, numeral.is_negative, max_bits)
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    /// Parses a whitespace-trimmed numeral with the default precision cap.
    fn from_str(s: &str) -> Result<Self, FractionError> {
        Self::parse_with_max_bits(s.trim(), DEFAULT_MAX_BITS)
    }
}
