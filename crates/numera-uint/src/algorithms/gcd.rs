//! Number-theoretic routines: GCD, LCM and exponentiation.

use num_traits::{One, Zero};

use super::div::div_rem;
use crate::error::UintError;
use crate::BigUint;

/// Bit-length gap above which the GCD loop reduces with a remainder
/// instead of a subtraction.
pub const GCD_MODULO_GAP: u64 = 24;

/// Binary GCD hybridized with Euclidean reduction.
///
/// The shared power of two is factored out up front and restored at the
/// end. Inside the loop both operands are odd after stripping; lopsided
/// pairs are reduced with `%` since repeated subtraction would take a
/// number of steps proportional to their ratio.
///
/// # Errors
///
/// Returns [`UintError::ConvergenceFailure`] if the loop exceeds its cap.
pub(crate) fn gcd(a: &BigUint, b: &BigUint) -> Result<BigUint, UintError> {
    if a.is_zero() {
        return Ok(b.clone());
    }
    if b.is_zero() {
        return Ok(a.clone());
    }

    let a_zeros = a.trailing_zeros();
    let shift = a_zeros.min(b.trailing_zeros());
    let mut x = a >> a_zeros;
    let mut y = b >> shift;

    // Every pass strips at least one bit from the larger operand.
    let limit = usize::try_from(a.bit_len() + b.bit_len())
        .unwrap_or(usize::MAX)
        .saturating_mul(2)
        .saturating_add(64);
    let mut iterations = 0;

    while !y.is_zero() {
        if iterations == limit {
            tracing::warn!(limit, "gcd iteration cap exceeded");
            return Err(UintError::ConvergenceFailure { routine: "binary gcd", limit });
        }
        iterations += 1;

        let zeros = y.trailing_zeros();
        y >>= zeros;
        if x > y {
            std::mem::swap(&mut x, &mut y);
        }

        if y.bit_len() - x.bit_len() > GCD_MODULO_GAP {
            y = div_rem(&y, &x)?.1;
        } else {
            y -= &x;
        }
    }

    Ok(x << shift)
}

/// Least common multiple; zero if either operand is zero.
pub(crate) fn lcm(a: &BigUint, b: &BigUint) -> Result<BigUint, UintError> {
    if a.is_zero() || b.is_zero() {
        return Ok(BigUint::zero());
    }
    let g = gcd(a, b)?;
    let (reduced, _) = div_rem(a, &g)?;
    Ok(&reduced * b)
}

/// Square-and-multiply exponentiation.
///
/// Powers of two are computed directly with a shift.
pub(crate) fn pow(base: &BigUint, exponent: u64) -> BigUint {
    if exponent == 0 {
        return BigUint::one();
    }
    if base.is_zero() || base.is_one() {
        return base.clone();
    }
    if base.count_ones() == 1 {
        return BigUint::one() << base.trailing_zeros().saturating_mul(exponent);
    }

    let mut result = BigUint::one();
    let mut square = base.clone();
    let mut exp = exponent;

    while exp > 0 {
        if exp & 1 == 1 {
            result = &result * &square;
        }
        exp >>= 1;
        if exp > 0 {
            square = &square * &square;
        }
    }

    result
}
