//! # Numera
//!
//! Arbitrary precision integer and rational arithmetic.
//!
//! ## Features
//!
//! - **Unsigned Big Integers**: 32-bit limbs with Karatsuba multiplication,
//!   Newton-Raphson division and hybrid binary GCD
//! - **Radix Conversion**: parsing and formatting in bases 2 through 36
//! - **Bounded Fractions**: signed rationals with a per-value precision cap
//! - **Transcendentals**: square root, logarithms, exponential and real
//!   powers at arbitrary precision
//!
//! ## Quick Start
//!
//! ```rust
//! use numera::prelude::*;
//!
//! let a: BigUint = "123456789012345678901234567890".parse().unwrap();
//! let b = BigUint::from(9u32);
//! assert_eq!((&a * &b) / &b, a);
//!
//! let two = Fraction::from(2);
//! let root = two.sqrt(128).unwrap();
//! assert!((root.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use numera_fraction as fraction;
pub use numera_uint as uint;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use numera_fraction::{Fraction, FractionError, DEFAULT_MAX_BITS};
    pub use numera_uint::{BigUint, UintError};
}
