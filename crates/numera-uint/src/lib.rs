//! # numera-uint
//!
//! Arbitrary precision unsigned integers for Numera.
//!
//! This crate provides:
//! - [`BigUint`], a little-endian vector of 32-bit limbs kept in canonical
//!   (trimmed) form
//! - Schoolbook and Karatsuba multiplication
//! - Tiered division: native, short, and Newton–Raphson with exact correction
//! - Hybrid binary GCD, LCM and exponentiation
//! - Parsing and formatting in bases 2 to 36
//!
//! ## Operator policy
//!
//! Operators are total. `a - b` with `b > a` is zero, and `a / 0` and
//! `a % 0` are zero. Use [`BigUint::div_rem`] or the `checked_*` methods to
//! observe a zero divisor.
//!
//! ```
//! use numera_uint::BigUint;
//!
//! let a = BigUint::from(10u32);
//! assert_eq!(&a / &BigUint::from(0u32), BigUint::from(0u32));
//! assert!(a.div_rem(&BigUint::from(0u32)).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithms;
mod bitwise;
pub mod error;
mod ops;
pub mod radix;
pub mod uint;

#[cfg(test)]
mod proptests;

pub use algorithms::div::{CORRECTION_LIMIT, NEWTON_ITERATION_LIMIT};
pub use algorithms::gcd::GCD_MODULO_GAP;
pub use algorithms::mul::{KARATSUBA_BASE_CASE, KARATSUBA_THRESHOLD};
pub use error::UintError;
pub use radix::{RadixChunk, MAX_RADIX, MIN_RADIX};
pub use uint::{BigUint, FromLowBits, LIMB_BITS};
