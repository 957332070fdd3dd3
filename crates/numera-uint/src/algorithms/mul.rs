//! Limb multiplication.
//!
//! Two strategies are selected by the combined limb count of the operands:
//! schoolbook O(n·m) below [`KARATSUBA_THRESHOLD`], Karatsuba O(n^1.58) at or
//! above it. Karatsuba splits borrowed sub-ranges of the operands and falls
//! back to schoolbook once a side drops below [`KARATSUBA_BASE_CASE`].

use num_traits::{One, Zero};

use super::add::{add_assign_shifted, add_limbs, sub_assign_limbs, trim_limbs};
use crate::BigUint;

/// Combined limb count at which multiplication switches to Karatsuba.
pub const KARATSUBA_THRESHOLD: usize = 128;

/// Limb count below which Karatsuba recursion hands over to schoolbook.
pub const KARATSUBA_BASE_CASE: usize = 64;

/// Multiplies two big integers, choosing the strategy by operand size.
pub(crate) fn multiply(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }
    if a.is_one() {
        return b.clone();
    }
    if b.is_one() {
        return a.clone();
    }

    BigUint::from_limbs(mul_limbs(&a.limbs, &b.limbs))
}

/// Multiplies two limb slices, choosing the strategy by operand size.
pub fn mul_limbs(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.len() + b.len() >= KARATSUBA_THRESHOLD {
        let _span =
            tracing::trace_span!("karatsuba", a_limbs = a.len(), b_limbs = b.len()).entered();
        karatsuba_mul(a, b)
    } else {
        schoolbook_mul(a, b)
    }
}

/// Schoolbook multiplication: O(n·m) with 64-bit intermediate products.
#[allow(clippy::cast_possible_truncation)]
pub fn schoolbook_mul(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut result = vec![0u32; a.len() + b.len()];

    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &y) in b.iter().enumerate() {
            let product = u64::from(x) * u64::from(y) + u64::from(result[i + j]) + carry;
            result[i + j] = product as u32;
            carry = product >> 32;
        }
        result[i + b.len()] = carry as u32;
    }

    result
}

/// Karatsuba multiplication on limb slices.
///
/// Each operand is split at half the longer length:
/// `z0 = lo·lo`, `z2 = hi·hi`, `z1 = (lo_a + hi_a)(lo_b + hi_b) - z0 - z2`,
/// recombined as `z0 + z1·B^half + z2·B^(2·half)`.
pub fn karatsuba_mul(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.len() < KARATSUBA_BASE_CASE || b.len() < KARATSUBA_BASE_CASE {
        return schoolbook_mul(a, b);
    }

    let half = a.len().max(b.len()).div_ceil(2);
    let (a_low, a_high) = split_at_limb(a, half);
    let (b_low, b_high) = split_at_limb(b, half);

    let z0 = karatsuba_mul(a_low, b_low);
    let z2 = karatsuba_mul(a_high, b_high);

    let a_sum = add_limbs(a_low, a_high);
    let b_sum = add_limbs(b_low, b_high);
    let mut z1 = karatsuba_mul(&a_sum, &b_sum);
    trim_limbs(&mut z1);
    sub_assign_limbs(&mut z1, &z0);
    sub_assign_limbs(&mut z1, &z2);

    let mut result = z0;
    add_assign_shifted(&mut result, &z1, half);
    add_assign_shifted(&mut result, &z2, 2 * half);
    result
}

fn split_at_limb(limbs: &[u32], half: usize) -> (&[u32], &[u32]) {
    if half < limbs.len() {
        limbs.split_at(half)
    } else {
        (limbs, &[])
    }
}

/// Computes `limbs = limbs * mul + add` in place.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn mul_add_small(limbs: &mut Vec<u32>, mul: u32, add: u32) {
    let mut carry = u64::from(add);
    for limb in limbs.iter_mut() {
        let t = u64::from(*limb) * u64::from(mul) + carry;
        *limb = t as u32;
        carry = t >> 32;
    }
    if carry != 0 {
        limbs.push(carry as u32);
    }
}
