//! Limb-level addition and subtraction.
//!
//! The helpers work on little-endian slices that may carry most-significant
//! zero limbs; callers trim the result.

use std::cmp::Ordering;

/// Drops most-significant zero limbs. The vector may end up empty.
pub(crate) fn trim_limbs(limbs: &mut Vec<u32>) {
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
}

/// Returns the slice without its most-significant zero limbs.
pub(crate) fn significant(limbs: &[u32]) -> &[u32] {
    let end = limbs.iter().rposition(|&limb| limb != 0).map_or(0, |i| i + 1);
    &limbs[..end]
}

/// Compares two limb slices by value.
pub(crate) fn cmp_limbs(a: &[u32], b: &[u32]) -> Ordering {
    let a = significant(a);
    let b = significant(b);
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

/// Adds two limb slices. The result has `max(len) + 1` limbs at most.
#[allow(clippy::cast_possible_truncation)]
pub fn add_limbs(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = 0u64;

    for (i, &limb) in long.iter().enumerate() {
        let sum = u64::from(limb) + u64::from(short.get(i).copied().unwrap_or(0)) + carry;
        out.push(sum as u32);
        carry = sum >> 32;
    }
    if carry != 0 {
        out.push(carry as u32);
    }

    out
}

/// Adds `other << (32 * shift)` into `acc`, growing it as needed.
#[allow(clippy::cast_possible_truncation)]
pub fn add_assign_shifted(acc: &mut Vec<u32>, other: &[u32], shift: usize) {
    let other = significant(other);
    if other.is_empty() {
        return;
    }
    if acc.len() < shift + other.len() {
        acc.resize(shift + other.len(), 0);
    }

    let mut carry = 0u64;
    let mut i = shift;
    for &limb in other {
        let sum = u64::from(acc[i]) + u64::from(limb) + carry;
        acc[i] = sum as u32;
        carry = sum >> 32;
        i += 1;
    }
    while carry != 0 {
        if i == acc.len() {
            acc.push(0);
        }
        let sum = u64::from(acc[i]) + carry;
        acc[i] = sum as u32;
        carry = sum >> 32;
        i += 1;
    }
}

/// Subtracts `other` from `acc` in place.
///
/// `acc` must be at least `other`; the floor-at-zero policy is applied by
/// the callers before reaching this point.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sub_assign_limbs(acc: &mut [u32], other: &[u32]) {
    let other = significant(other);
    debug_assert!(cmp_limbs(acc, other) != Ordering::Less);

    let mut borrow = 0i64;
    let mut i = 0;
    for &limb in other {
        let diff = i64::from(acc[i]) - i64::from(limb) - borrow;
        (acc[i], borrow) = if diff < 0 {
            ((diff + (1 << 32)) as u32, 1)
        } else {
            (diff as u32, 0)
        };
        i += 1;
    }
    while borrow != 0 && i < acc.len() {
        let diff = i64::from(acc[i]) - borrow;
        (acc[i], borrow) = if diff < 0 {
            ((diff + (1 << 32)) as u32, 1)
        } else {
            (diff as u32, 0)
        };
        i += 1;
    }
}
