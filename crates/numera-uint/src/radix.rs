//! Conversion between limb vectors and digit strings in bases 2 to 36.
//!
//! Parsing consumes the numeral in chunks of `digits` characters, folding
//! each chunk into the limbs with a single multiply-add by `radix^digits`.
//! Formatting runs the same chunking in reverse: repeated short division by
//! the chunk power yields groups of digits from least significant upwards.
//! Power-of-two radixes skip division entirely and read bit groups.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use num_traits::Zero;

use crate::algorithms::add::trim_limbs;
use crate::algorithms::div::div_rem_small;
use crate::algorithms::mul::mul_add_small;
use crate::error::UintError;
use crate::BigUint;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const INVALID_DIGIT: u8 = u8::MAX;

/// Smallest supported radix.
pub const MIN_RADIX: u32 = 2;

/// Largest supported radix.
pub const MAX_RADIX: u32 = 36;

/// Chunking constants for one radix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadixChunk {
    /// `radix^digits`, the largest power of the radix that fits in a limb.
    pub power: u32,
    /// Number of digits covered by one chunk.
    pub digits: u32,
}

/// ASCII character to digit value; letters are case-insensitive.
static DIGIT_VALUES: LazyLock<[u8; 128]> = LazyLock::new(|| {
    let mut table = [INVALID_DIGIT; 128];
    for (value, &c) in (0u8..).zip(DIGITS.iter()) {
        table[usize::from(c)] = value;
        table[usize::from(c.to_ascii_uppercase())] = value;
    }
    table
});

#[allow(clippy::cast_possible_truncation)]
static RADIX_CHUNKS: LazyLock<[RadixChunk; 37]> = LazyLock::new(|| {
    let mut table = [RadixChunk { power: 1, digits: 0 }; 37];
    for radix in MIN_RADIX..=MAX_RADIX {
        let radix_wide = u64::from(radix);
        let mut power = radix_wide;
        let mut digits = 1;
        while power * radix_wide <= u64::from(u32::MAX) {
            power *= radix_wide;
            digits += 1;
        }
        table[radix as usize] = RadixChunk { power: power as u32, digits };
    }
    table
});

/// Returns the chunking constants for `radix`.
///
/// # Errors
///
/// Returns [`UintError::InvalidRadix`] outside `2..=36`.
pub fn radix_chunk(radix: u32) -> Result<RadixChunk, UintError> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        Ok(RADIX_CHUNKS[radix as usize])
    } else {
        Err(UintError::InvalidRadix(radix))
    }
}

fn digit_value(c: char, radix: u32) -> Result<u32, UintError> {
    let value = if c.is_ascii() {
        DIGIT_VALUES[c as usize]
    } else {
        INVALID_DIGIT
    };
    if u32::from(value) < radix {
        Ok(u32::from(value))
    } else {
        Err(UintError::InvalidDigit { digit: c, radix })
    }
}

/// Parses a numeral without sign, prefix or separators.
pub(crate) fn parse_radix(s: &str, radix: u32) -> Result<BigUint, UintError> {
    let chunk = radix_chunk(radix)?;
    if s.is_empty() {
        return Err(UintError::EmptyNumeral);
    }

    let values = s
        .chars()
        .map(|c| digit_value(c, radix))
        .collect::<Result<Vec<_>, _>>()?;

    let mut limbs = Vec::with_capacity(values.len() / chunk.digits as usize + 1);
    for group in values.chunks(chunk.digits as usize) {
        let value = group.iter().fold(0u32, |acc, &d| acc * radix + d);
        let multiplier = if group.len() == chunk.digits as usize {
            chunk.power
        } else {
            group.iter().fold(1u32, |acc, _| acc * radix)
        };
        mul_add_small(&mut limbs, multiplier, value);
    }

    Ok(BigUint::from_limbs(limbs))
}

/// Formats `value` in `radix` using lowercase letters.
pub(crate) fn format_radix(value: &BigUint, radix: u32) -> Result<String, UintError> {
    let chunk = radix_chunk(radix)?;
    if value.is_zero() {
        return Ok("0".to_owned());
    }

    Ok(match radix {
        2 => format_bit_groups(value, 1),
        16 => format_bit_groups(value, 4),
        10 if value.limb_count() <= 2 => value.low_u64().to_string(),
        _ => format_chunked(value, radix, chunk),
    })
}

/// Power-of-two radixes: each digit is a fixed-width group of bits.
fn format_bit_groups(value: &BigUint, width: u64) -> String {
    let digits = value.bit_len().div_ceil(width);
    let mut out = String::with_capacity(usize::try_from(digits).unwrap_or(0));
    for i in (0..digits).rev() {
        let mut digit = 0usize;
        for bit in (0..width).rev() {
            digit = (digit << 1) | usize::from(value.bit(i * width + bit));
        }
        out.push(char::from(DIGITS[digit]));
    }
    out
}

fn format_chunked(value: &BigUint, radix: u32, chunk: RadixChunk) -> String {
    let mut limbs = value.limbs.clone();
    let mut groups = Vec::with_capacity(limbs.len() * 32 / chunk.digits as usize + 1);
    while !limbs.is_empty() {
        groups.push(div_rem_small(&mut limbs, chunk.power));
        trim_limbs(&mut limbs);
    }

    let mut out = String::with_capacity(groups.len() * chunk.digits as usize);
    let mut buffer = vec![b'0'; chunk.digits as usize];
    for (i, &group) in groups.iter().rev().enumerate() {
        let mut rest = group;
        for slot in buffer.iter_mut().rev() {
            *slot = DIGITS[(rest % radix) as usize];
            rest /= radix;
        }
        // Only the most significant group drops its leading zeros.
        let start = if i == 0 {
            buffer.iter().position(|&b| b != b'0').unwrap_or(buffer.len() - 1)
        } else {
            0
        };
        out.extend(buffer[start..].iter().map(|&b| char::from(b)));
    }
    out
}

impl BigUint {
    /// Parses a numeral in `radix` (2 to 36). Letters are case-insensitive;
    /// signs, prefixes and whitespace are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`UintError::InvalidRadix`], [`UintError::EmptyNumeral`] or
    /// [`UintError::InvalidDigit`] for malformed input.
    ///
    /// ```
    /// use numera_uint::BigUint;
    ///
    /// assert_eq!(BigUint::from_str_radix("ff", 16).unwrap(), BigUint::from(255u32));
    /// assert!(BigUint::from_str_radix("fg", 16).is_err());
    /// ```
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, UintError> {
        parse_radix(s, radix)
    }

    /// Parses a numeral, returning zero for any malformed input or radix.
    #[must_use]
    pub fn parse_lossy(s: &str, radix: u32) -> Self {
        parse_radix(s, radix).unwrap_or_default()
    }

    /// Formats the value in `radix` (2 to 36) with lowercase letters.
    ///
    /// # Errors
    ///
    /// Returns [`UintError::InvalidRadix`] outside `2..=36`.
    pub fn to_str_radix(&self, radix: u32) -> Result<String, UintError> {
        format_radix(self, radix)
    }
}

impl FromStr for BigUint {
    type Err = UintError;

    /// Parses a base-10 token, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, UintError> {
        parse_radix(s.trim(), 10)
    }
}

impl fmt::Display for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = if self.limb_count() <= 2 {
            self.low_u64().to_string()
        } else {
            format_chunked(self, 10, RADIX_CHUNKS[10])
        };
        f.pad_integral(true, "", &digits)
    }
}

impl fmt::LowerHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &hex_digits(self))
    }
}

impl fmt::UpperHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &hex_digits(self).to_ascii_uppercase())
    }
}

impl fmt::Octal for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = if self.is_zero() {
            "0".to_owned()
        } else {
            format_bit_groups(self, 3)
        };
        f.pad_integral(true, "0o", &digits)
    }
}

impl fmt::Binary for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = if self.is_zero() {
            "0".to_owned()
        } else {
            format_bit_groups(self, 1)
        };
        f.pad_integral(true, "0b", &digits)
    }
}

fn hex_digits(value: &BigUint) -> String {
    if value.is_zero() {
        "0".to_owned()
    } else {
        format_bit_groups(value, 4)
    }
}

/// Hashes the base-16 rendering, so equal values hash equally regardless
/// of how they were produced.
impl Hash for BigUint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hex_digits(self).hash(state);
    }
}
