//! # numera-fraction
//!
//! Precision-bounded rational arithmetic for Numera.
//!
//! This crate provides:
//! - [`Fraction`], a sign-magnitude rational over [`numera_uint::BigUint`]
//!   with a per-value precision cap
//! - Exact conversion from IEEE-754 half, single, double, extended and quad
//!   bit patterns
//! - Decimal and scientific-notation parsing and formatting
//! - Continued fractions and best rational approximation
//! - Square root, natural logarithm, exponential, real powers and
//!   change-of-base logarithms
//!
//! ## Precision
//!
//! Arithmetic is exact until the smaller of numerator and denominator
//! exceeds `max_bits` (default [`DEFAULT_MAX_BITS`]); both are then shifted
//! right by the excess. Results carry the larger cap of their operands.
//!
//! ```
//! use numera_fraction::Fraction;
//!
//! let a = Fraction::from_i64(1, 3).unwrap();
//! let b = Fraction::from_i64(1, 6).unwrap();
//! assert_eq!(a + b, Fraction::from_i64(1, 2).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod continued;
pub mod error;
pub mod float;
pub mod format;
pub mod fraction;
mod ops;
mod parse;
pub mod transcendental;

#[cfg(test)]
mod proptests;

pub use error::FractionError;
pub use float::{FloatClass, FloatLayout, FloatParts};
pub use format::DEFAULT_DISPLAY_DIGITS;
pub use fraction::{Fraction, DEFAULT_MAX_BITS};
pub use parse::MAX_DECIMAL_EXPONENT;
pub use transcendental::{EXP_ARGUMENT_BITS, GUARD_BITS, SQRT_ITERATION_LIMIT};
