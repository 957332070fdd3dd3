//! Limb-level arithmetic kernels.
//!
//! This module contains the algorithms behind the operators:
//! - Carry/borrow propagating addition and subtraction
//! - Schoolbook and Karatsuba multiplication
//! - Native-width, Newton–Raphson and long division
//! - Hybrid binary GCD and square-and-multiply exponentiation

pub mod add;
pub mod div;
pub mod gcd;
pub mod mul;
