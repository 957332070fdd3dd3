//! Division with remainder.
//!
//! Division is tiered:
//! 1. Operands within two limbs use native 64-bit division; a divisor within
//!    two limbs against a longer dividend uses limb-wise short division with
//!    128-bit intermediates.
//! 2. Everything else goes through a Newton–Raphson fixed-point reciprocal,
//!    followed by an exact correction of the approximate quotient.
//!
//! The long-division algorithm is kept as a reference path for checking.

use num_traits::{One, Zero};

use crate::error::UintError;
use crate::BigUint;

/// Hard cap on Newton–Raphson reciprocal iterations.
pub const NEWTON_ITERATION_LIMIT: usize = 128;

/// Hard cap on quotient correction steps in either direction.
pub const CORRECTION_LIMIT: usize = 128;

/// Divides `dividend` by `divisor`, returning `(quotient, remainder)`.
///
/// # Errors
///
/// Returns [`UintError::DivisionByZero`] for a zero divisor and
/// [`UintError::ConvergenceFailure`] if the reciprocal iteration runs away.
pub(crate) fn div_rem(
    dividend: &BigUint,
    divisor: &BigUint,
) -> Result<(BigUint, BigUint), UintError> {
    if divisor.is_zero() {
        return Err(UintError::DivisionByZero);
    }
    if dividend < divisor {
        return Ok((BigUint::zero(), dividend.clone()));
    }
    if divisor.is_one() {
        return Ok((dividend.clone(), BigUint::zero()));
    }

    if dividend.limb_count() <= 2 {
        let (a, b) = (dividend.low_u64(), divisor.low_u64());
        return Ok((BigUint::from(a / b), BigUint::from(a % b)));
    }
    if divisor.limb_count() <= 2 {
        return Ok(div_rem_u64(dividend, divisor.low_u64()));
    }

    newton_raphson(dividend, divisor)
}

/// Short division of a multi-limb dividend by a native divisor.
#[allow(clippy::cast_possible_truncation)]
fn div_rem_u64(dividend: &BigUint, divisor: u64) -> (BigUint, BigUint) {
    let divisor = u128::from(divisor);
    let mut quotient = vec![0u32; dividend.limb_count()];
    let mut remainder = 0u128;

    for (i, &limb) in dividend.limbs.iter().enumerate().rev() {
        let current = (remainder << 32) | u128::from(limb);
        quotient[i] = (current / divisor) as u32;
        remainder = current % divisor;
    }

    (BigUint::from_limbs(quotient), BigUint::from(remainder))
}

/// Divides `limbs` in place by a single-limb divisor and returns the
/// remainder. The caller trims.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn div_rem_small(limbs: &mut [u32], divisor: u32) -> u32 {
    let divisor = u64::from(divisor);
    let mut remainder = 0u64;
    for limb in limbs.iter_mut().rev() {
        let current = (remainder << 32) | u64::from(*limb);
        *limb = (current / divisor) as u32;
        remainder = current % divisor;
    }
    remainder as u32
}

/// Newton–Raphson division for multi-limb operands.
///
/// With fixed-point precision `k = bits(dividend) + 32`, iterates
/// `x <- x * (2^(k+1) - divisor * x) >> k` towards `2^k / divisor`, then
/// corrects `q = dividend * x >> k` until `q * divisor <= dividend <
/// (q + 1) * divisor`. Requires `dividend >= divisor > 1`.
fn newton_raphson(
    dividend: &BigUint,
    divisor: &BigUint,
) -> Result<(BigUint, BigUint), UintError> {
    let _span = tracing::trace_span!(
        "newton_raphson",
        dividend_bits = dividend.bit_len(),
        divisor_bits = divisor.bit_len()
    )
    .entered();

    let k = dividend.bit_len() + 32;
    let two_b = BigUint::one() << (k + 1);

    // 2^k / divisor lies in (2^(k - bits), 2^(k - bits + 1)], so this seed
    // starts below the fixed point and the iteration climbs monotonically.
    let mut x = BigUint::one() << (k - divisor.bit_len());
    let mut iterations = 0;
    loop {
        if iterations == NEWTON_ITERATION_LIMIT {
            return Err(convergence_failure("newton-raphson reciprocal", NEWTON_ITERATION_LIMIT));
        }
        iterations += 1;

        let error = &two_b - &(divisor * &x);
        let next = (&x * &error) >> k;
        if next == x || next.is_zero() {
            x = next;
            break;
        }
        x = next;
    }
    tracing::trace!(iterations, "reciprocal converged");

    let mut quotient = (dividend * &x) >> k;
    let mut product = &quotient * divisor;
    let one = BigUint::one();

    let mut steps = 0;
    while product > *dividend {
        if steps == CORRECTION_LIMIT {
            return Err(convergence_failure("quotient correction", CORRECTION_LIMIT));
        }
        steps += 1;
        quotient -= &one;
        product -= divisor;
    }

    let mut steps = 0;
    loop {
        let next = &product + divisor;
        if next > *dividend {
            break;
        }
        if steps == CORRECTION_LIMIT {
            return Err(convergence_failure("quotient correction", CORRECTION_LIMIT));
        }
        steps += 1;
        quotient += &one;
        product = next;
    }

    let remainder = dividend - &product;
    Ok((quotient, remainder))
}

/// Long division: aligns the divisor under the dividend and repeatedly
/// subtracts, skipping runs of zero quotient bits.
///
/// # Errors
///
/// Returns [`UintError::DivisionByZero`] for a zero divisor.
pub(crate) fn long_division(
    dividend: &BigUint,
    divisor: &BigUint,
) -> Result<(BigUint, BigUint), UintError> {
    if divisor.is_zero() {
        return Err(UintError::DivisionByZero);
    }
    if dividend < divisor {
        return Ok((BigUint::zero(), dividend.clone()));
    }

    let mut position = dividend.bit_len() - divisor.bit_len();
    let mut shifted = divisor << position;
    let mut remainder = dividend.clone();
    let mut quotient = BigUint::zero();

    loop {
        if remainder >= shifted {
            remainder -= &shifted;
            quotient.set_bit(position, true);
        }
        if position == 0 {
            break;
        }
        let gap = shifted
            .bit_len()
            .saturating_sub(remainder.bit_len())
            .max(1);
        if gap > position {
            break;
        }
        shifted >>= gap;
        position -= gap;
    }

    Ok((quotient, remainder))
}

fn convergence_failure(routine: &'static str, limit: usize) -> UintError {
    tracing::warn!(routine, limit, "iteration cap exceeded");
    UintError::ConvergenceFailure { routine, limit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_big(rng: &mut ChaCha8Rng, limbs: usize) -> BigUint {
        BigUint::from_limbs((0..limbs).map(|_| rng.gen()).collect())
    }

    #[test]
    fn test_native_fast_path() {
        let (q, r) = div_rem(&BigUint::from(100u32), &BigUint::from(7u32)).unwrap();
        assert_eq!(q, BigUint::from(14u32));
        assert_eq!(r, BigUint::from(2u32));
    }

    #[test]
    fn test_short_division() {
        let dividend = BigUint::from(u128::MAX);
        let divisor = BigUint::from(u64::MAX);
        let (q, r) = div_rem(&dividend, &divisor).unwrap();
        // (2^128 - 1) / (2^64 - 1) = 2^64 + 1
        assert_eq!(q, BigUint::from((1u128 << 64) + 1));
        assert!(r.is_zero());
    }

    #[test]
    fn test_division_by_zero() {
        let ten = BigUint::from(10u32);
        assert_eq!(div_rem(&ten, &BigUint::zero()), Err(UintError::DivisionByZero));
        assert_eq!(long_division(&ten, &BigUint::zero()), Err(UintError::DivisionByZero));
    }

    #[test]
    fn test_small_dividend() {
        let a = BigUint::from(5u32);
        let b = BigUint::from(1u128 << 100);
        let (q, r) = div_rem(&a, &b).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, a);
    }

    #[test]
    fn test_newton_raphson_matches_long_division() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for (n, m) in [(3, 3), (4, 3), (10, 3), (20, 7), (64, 33), (150, 80), (300, 140)] {
            let a = random_big(&mut rng, n);
            let b = random_big(&mut rng, m);

            let (q, r) = div_rem(&a, &b).unwrap();
            let (q_long, r_long) = long_division(&a, &b).unwrap();
            assert_eq!(q, q_long, "quotient mismatch for {n}/{m} limbs");
            assert_eq!(r, r_long, "remainder mismatch for {n}/{m} limbs");
            assert!(r < b);
            assert_eq!(&(&q * &b) + &r, a);
        }
    }

    #[test]
    fn test_exact_multiple() {
        let b = BigUint::from_limbs(vec![0xdead_beef, 0x1234_5678, 0x9abc_def0]);
        let q = BigUint::from_limbs(vec![3, 0, 0, 0, 17]);
        let a = &b * &q;

        let (quotient, remainder) = div_rem(&a, &b).unwrap();
        assert_eq!(quotient, q);
        assert!(remainder.is_zero());
    }

    #[test]
    fn test_div_rem_small() {
        let mut limbs = vec![0, 0, 1];
        let rem = div_rem_small(&mut limbs, 10);
        // 2^64 = 1844674407370955161 * 10 + 6
        assert_eq!(rem, 6);
        assert_eq!(BigUint::from_limbs(limbs), BigUint::from(1_844_674_407_370_955_161u64));
    }
}
