//! Comparison, bitwise logic, shifts and bit queries.
//!
//! All of these are pure functions of the limb vector. Ordering relies on
//! the canonical form: a longer trimmed vector is the larger value.

use std::cmp::Ordering;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};
use std::ops::{Shl, ShlAssign, Shr, ShrAssign};

use num_traits::Zero;

use crate::algorithms::add::cmp_limbs;
use crate::uint::LIMB_BITS;
use crate::BigUint;

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_limbs(&self.limbs, &other.limbs)
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BigUint {
    /// Returns bit `index` (bit 0 is the least significant).
    #[must_use]
    pub fn bit(&self, index: u64) -> bool {
        let (limb, offset) = split_index(index);
        self.limbs
            .get(limb)
            .is_some_and(|&value| (value >> offset) & 1 == 1)
    }

    /// Sets or clears bit `index`, growing the value when needed.
    pub fn set_bit(&mut self, index: u64, value: bool) {
        let (limb, offset) = split_index(index);
        if value {
            if limb >= self.limbs.len() {
                self.limbs.resize(limb + 1, 0);
            }
            self.limbs[limb] |= 1 << offset;
        } else if limb < self.limbs.len() {
            self.limbs[limb] &= !(1 << offset);
            self.trim();
        }
    }

    /// Returns the number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> u64 {
        self.limbs.iter().map(|limb| u64::from(limb.count_ones())).sum()
    }

    /// Returns the number of trailing zero bits, or zero for the value zero.
    #[must_use]
    pub fn trailing_zeros(&self) -> u64 {
        match self.limbs.iter().position(|&limb| limb != 0) {
            Some(i) => i as u64 * LIMB_BITS + u64::from(self.limbs[i].trailing_zeros()),
            None => 0,
        }
    }

    /// Returns true if exactly one bit is set.
    #[must_use]
    pub fn is_power_of_two(&self) -> bool {
        self.count_ones() == 1
    }
}

#[allow(clippy::cast_possible_truncation)]
fn split_index(index: u64) -> (usize, u32) {
    ((index / LIMB_BITS) as usize, (index % LIMB_BITS) as u32)
}

#[allow(clippy::cast_possible_truncation)]
fn shl_limbs(limbs: &[u32], shift: u64) -> Vec<u32> {
    let whole = (shift / LIMB_BITS) as usize;
    let bits = (shift % LIMB_BITS) as u32;
    let mut out = vec![0u32; limbs.len() + whole + 1];

    if bits == 0 {
        out[whole..whole + limbs.len()].copy_from_slice(limbs);
    } else {
        for (i, &limb) in limbs.iter().enumerate() {
            out[i + whole] |= limb << bits;
            out[i + whole + 1] |= limb >> (32 - bits);
        }
    }

    out
}

#[allow(clippy::cast_possible_truncation)]
fn shr_limbs(limbs: &[u32], shift: u64) -> Vec<u32> {
    let whole = (shift / LIMB_BITS) as usize;
    let bits = (shift % LIMB_BITS) as u32;
    if whole >= limbs.len() {
        return Vec::new();
    }

    let mut out = vec![0u32; limbs.len() - whole];
    if bits == 0 {
        out.copy_from_slice(&limbs[whole..]);
    } else {
        for i in whole..limbs.len() {
            out[i - whole] |= limbs[i] >> bits;
            if i > whole {
                out[i - whole - 1] |= limbs[i] << (32 - bits);
            }
        }
    }

    out
}

impl Shl<u64> for &BigUint {
    type Output = BigUint;

    fn shl(self, shift: u64) -> BigUint {
        if shift == 0 || self.is_zero() {
            return self.clone();
        }
        BigUint::from_limbs(shl_limbs(&self.limbs, shift))
    }
}

impl Shl<u64> for BigUint {
    type Output = BigUint;

    fn shl(self, shift: u64) -> BigUint {
        if shift == 0 || self.is_zero() {
            return self;
        }
        &self << shift
    }
}

impl ShlAssign<u64> for BigUint {
    fn shl_assign(&mut self, shift: u64) {
        if shift != 0 && !self.is_zero() {
            *self = BigUint::from_limbs(shl_limbs(&self.limbs, shift));
        }
    }
}

impl Shr<u64> for &BigUint {
    type Output = BigUint;

    fn shr(self, shift: u64) -> BigUint {
        if shift == 0 || self.is_zero() {
            return self.clone();
        }
        BigUint::from_limbs(shr_limbs(&self.limbs, shift))
    }
}

impl Shr<u64> for BigUint {
    type Output = BigUint;

    fn shr(self, shift: u64) -> BigUint {
        if shift == 0 || self.is_zero() {
            return self;
        }
        &self >> shift
    }
}

impl ShrAssign<u64> for BigUint {
    fn shr_assign(&mut self, shift: u64) {
        if shift != 0 && !self.is_zero() {
            *self = BigUint::from_limbs(shr_limbs(&self.limbs, shift));
        }
    }
}

// Limb-wise logic: the shorter operand is padded with zero limbs.
macro_rules! impl_bitwise {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $assign_trait<&BigUint> for BigUint {
            fn $assign_method(&mut self, rhs: &BigUint) {
                if self.limbs.len() < rhs.limbs.len() {
                    self.limbs.resize(rhs.limbs.len(), 0);
                }
                for (i, limb) in self.limbs.iter_mut().enumerate() {
                    *limb = *limb $op rhs.limbs.get(i).copied().unwrap_or(0);
                }
                self.trim();
            }
        }

        impl $assign_trait for BigUint {
            fn $assign_method(&mut self, rhs: BigUint) {
                self.$assign_method(&rhs);
            }
        }

        impl $trait<&BigUint> for &BigUint {
            type Output = BigUint;

            fn $method(self, rhs: &BigUint) -> BigUint {
                let mut result = self.clone();
                result.$assign_method(rhs);
                result
            }
        }

        impl $trait<&BigUint> for BigUint {
            type Output = BigUint;

            fn $method(mut self, rhs: &BigUint) -> BigUint {
                self.$assign_method(rhs);
                self
            }
        }

        impl $trait for BigUint {
            type Output = BigUint;

            fn $method(mut self, rhs: BigUint) -> BigUint {
                self.$assign_method(&rhs);
                self
            }
        }
    };
}

impl_bitwise!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bitwise!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bitwise!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);
