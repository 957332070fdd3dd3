//! Square roots, logarithms, exponentials and real powers.
//!
//! Every routine works at `max(max_bits, precision) + GUARD_BITS` bits and
//! hands back a result capped at `max(max_bits, precision)`. Iterations
//! are bounded; hitting a bound is reported as
//! [`FractionError::ConvergenceFailure`].
//!
//! The logarithm reduces its argument to `m * 2^k` with `m` in `(1/2, 2)`
//! and sums the series `ln m = 2 * atanh((m - 1) / (m + 1))`. The
//! exponential halves its argument below one, sums the Taylor series and
//! squares the result back up.

use num_traits::{One, Zero};
use numera_uint::BigUint;
use tracing::instrument;

use crate::error::FractionError;
use crate::Fraction;

/// Extra working bits carried by every evaluation.
pub const GUARD_BITS: u64 = 32;

/// Hard cap on Newton iterations in [`Fraction::sqrt`].
pub const SQRT_ITERATION_LIMIT: usize = 100;

/// Resource limit: [`Fraction::exp`], and [`Fraction::pow`] through it,
/// accept arguments below `2^EXP_ARGUMENT_BITS` in magnitude. At the limit
/// the result already needs about 24 million bits.
pub const EXP_ARGUMENT_BITS: i64 = 24;

/// Iteration cap for a power series evaluated at `working_bits`.
///
/// Each term at least halves the previous one once the series is reduced,
/// so the working precision bounds the number of useful terms.
fn series_limit(working_bits: u64) -> usize {
    usize::try_from(working_bits)
        .unwrap_or(usize::MAX)
        .saturating_add(64)
}

/// Returns `|value| < 2^-bits`.
fn below_power_of_two(value: &Fraction, bits: u64) -> bool {
    &value.numerator << bits < value.denominator
}

/// Signed bit-length difference `bits(numerator) - bits(denominator)`.
#[allow(clippy::cast_possible_wrap)]
fn log2_estimate(value: &Fraction) -> i64 {
    value.numerator.bit_len() as i64 - value.denominator.bit_len() as i64
}

impl Fraction {
    /// Square root by Newton iteration, `x <- (x + value / x) / 2`.
    ///
    /// The seed is the power of two nearest the root by bit length. The
    /// loop stops once a step changes `x` by less than `|x| / 2^(p + 4)`,
    /// where `p` is the larger of `precision` and the cap. The tolerance is
    /// relative to the estimate, not the absolute `2^-(p + 4)`, so roots
    /// of large values do not iterate for digits the cap discards.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::Domain`] for negative input.
    ///
    /// ```
    /// use numera_fraction::Fraction;
    ///
    /// let root = Fraction::from(2).sqrt(64).unwrap();
    /// assert!((root.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
    /// ```
    #[instrument(level = "debug", skip_all, fields(precision = precision))]
    pub fn sqrt(&self, precision: u64) -> Result<Self, FractionError> {
        if self.is_negative {
            return Err(FractionError::Domain("square root of a negative value"));
        }
        let target = self.max_bits.max(precision);
        if self.is_zero() {
            return Ok(Self::zero_with_max_bits(target));
        }
        let working = target + GUARD_BITS;

        let mut value = self.clone();
        value.max_bits = working;
        let mut x = Self::one_with_max_bits(working).mul_pow2(log2_estimate(self) / 2)?;
        let half = Self::raw(BigUint::one(), BigUint::from(2u32), false, working);

        for iteration in 0..SQRT_ITERATION_LIMIT {
            let next = half.checked_mul(&x.checked_add(&value.checked_div(&x)?)?)?;
            let step = next.checked_sub(&x)?;
            x = next;
            if step.is_zero() || step.abs().checked_div(&x)?.is_below_bits(target + 4) {
                tracing::debug!(iterations = iteration + 1, "sqrt converged");
                return x.with_max_bits(target);
            }
        }

        Err(FractionError::convergence("sqrt newton iteration", SQRT_ITERATION_LIMIT))
    }

    /// Natural logarithm.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::Domain`] for zero or negative input.
    #[instrument(level = "debug", skip_all, fields(precision = precision))]
    pub fn ln(&self, precision: u64) -> Result<Self, FractionError> {
        if self.is_negative || self.is_zero() {
            return Err(FractionError::Domain("logarithm of a non-positive value"));
        }
        let target = self.max_bits.max(precision);
        if self.is_one() {
            return Ok(Self::zero_with_max_bits(target));
        }

        // ln x = ln m + k ln 2 with m = x / 2^k in (1/2, 2). The k ln 2 term
        // amplifies the error in ln 2 by |k|, so that many more bits are
        // carried.
        let k = log2_estimate(self);
        let k_bits = u64::from(u64::BITS - k.unsigned_abs().leading_zeros());
        let working = target + GUARD_BITS + k_bits;

        let mut x = self.clone();
        x.max_bits = working;
        let m = x.mul_pow2(-k)?;
        let mut result = atanh_log(&m, target + k_bits, working)?;

        if k != 0 {
            let two = Self::raw(BigUint::from(2u32), BigUint::one(), false, working);
            let ln2 = atanh_log(&two, target + k_bits, working)?;
            let scaled = ln2.checked_mul(&Self::raw(
                BigUint::from(k.unsigned_abs()),
                BigUint::one(),
                k < 0,
                working,
            ))?;
            result = result.checked_add(&scaled)?;
        }

        result.with_max_bits(target)
    }

    /// Exponential function.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::Domain`] for an argument of
    /// `2^EXP_ARGUMENT_BITS` or more in magnitude. This is a resource
    /// limit rather than a mathematical one.
    #[instrument(level = "debug", skip_all, fields(precision = precision))]
    pub fn exp(&self, precision: u64) -> Result<Self, FractionError> {
        let target = self.max_bits.max(precision);
        if self.is_zero() {
            return Ok(Self::one_with_max_bits(target));
        }

        let magnitude = log2_estimate(self);
        if magnitude >= EXP_ARGUMENT_BITS {
            return Err(FractionError::Domain(
                "exponential argument exceeds the supported magnitude",
            ));
        }
        // |x| < 2^(magnitude + 1), so this many halvings bring it below one.
        let halvings = u64::try_from(magnitude + 1).unwrap_or(0);
        let working = target + GUARD_BITS + halvings;

        let mut x = self.clone();
        x.max_bits = working;
        let reduced = x.mul_pow2(-i64::try_from(halvings).unwrap_or(0))?;

        let tolerance = target + 1 + halvings;
        let limit = series_limit(working);
        let mut term = Self::one_with_max_bits(working);
        let mut sum = term.clone();
        let mut n = 1u64;
        loop {
            if usize::try_from(n).unwrap_or(usize::MAX) > limit {
                return Err(FractionError::convergence("exp taylor series", limit));
            }
            term = term
                .checked_mul(&reduced)?
                .checked_div(&Self::raw(BigUint::from(n), BigUint::one(), false, working))?;
            if term.is_zero() || below_power_of_two(&term, tolerance) {
                break;
            }
            sum = sum.checked_add(&term)?;
            n += 1;
        }
        tracing::debug!(terms = n, halvings, "exp series summed");

        for _ in 0..halvings {
            sum = sum.checked_mul(&sum)?;
        }
        sum.with_max_bits(target)
    }

    /// Raises to a rational power.
    ///
    /// Integral exponents use repeated squaring and stay exact up to the
    /// precision cap. Other exponents evaluate `exp(b * ln |a|)`. A
    /// negative base is accepted only with an odd exponent denominator,
    /// where the real root exists; the result is negative exactly when the
    /// exponent numerator is odd.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::Domain`] for `0^b` with `b <= 0` and for a
    /// negative base with an even exponent denominator. Non-integral
    /// exponents also inherit the resource limit of [`Fraction::exp`]:
    /// `|b * ln |a||` must stay below `2^EXP_ARGUMENT_BITS`.
    ///
    /// ```
    /// use numera_fraction::Fraction;
    ///
    /// let cube_root = Fraction::from(-8).pow(&Fraction::from_i64(1, 3).unwrap()).unwrap();
    /// assert!((cube_root.to_f64() + 2.0).abs() < 1e-12);
    /// ```
    #[instrument(level = "debug", skip_all)]
    pub fn pow(&self, exponent: &Self) -> Result<Self, FractionError> {
        let target = self.max_bits.max(exponent.max_bits);

        if self.is_zero() {
            if exponent.is_negative || exponent.is_zero() {
                return Err(FractionError::Domain("zero raised to a non-positive power"));
            }
            return Ok(Self::zero_with_max_bits(target));
        }
        if exponent.is_zero() {
            return Ok(Self::one_with_max_bits(target));
        }
        if self.is_negative && !exponent.denominator.bit(0) {
            return Err(FractionError::Domain(
                "negative base with an even root is not real",
            ));
        }

        let negate = self.is_negative && exponent.numerator.bit(0);
        let base = self.abs();

        let mut result = if base.is_one() {
            Self::one_with_max_bits(target)
        } else if exponent.is_integer() {
            let power = base.pow_integer(&exponent.numerator)?;
            if exponent.is_negative {
                power.recip()?
            } else {
                power
            }
        } else {
            let ln = base.ln(target)?;
            ln.checked_mul(exponent)?.exp(target)?
        };

        result.set_max_bits(target)?;
        if negate {
            result = -result;
        }
        Ok(result)
    }

    /// Raises to a signed native exponent.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::Domain`] for zero raised to a non-positive
    /// power.
    pub fn powi(&self, exponent: i64) -> Result<Self, FractionError> {
        self.pow(&Self::from(exponent))
    }

    /// Square-and-multiply on the magnitude; the cap grows to cover the
    /// exponent's bit length.
    fn pow_integer(&self, exponent: &BigUint) -> Result<Self, FractionError> {
        let max_bits = self.max_bits.max(exponent.bit_len());
        let mut base = self.clone();
        base.max_bits = max_bits;
        let mut result = Self::one_with_max_bits(max_bits);

        let bits = exponent.bit_len();
        for i in 0..bits {
            if exponent.bit(i) {
                result = result.checked_mul(&base)?;
            }
            if i + 1 < bits {
                base = base.checked_mul(&base)?;
            }
        }
        Ok(result)
    }

    /// Logarithm of `self` to `base` via `ln(self) / ln(base)`.
    ///
    /// Works at the larger cap of the two operands, or at `precision` if
    /// that is smaller.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::Domain`] for a non-positive argument and
    /// for a base that is non-positive or one.
    ///
    /// ```
    /// use numera_fraction::Fraction;
    ///
    /// let value = Fraction::from(1000).log(&Fraction::from(10), Some(64)).unwrap();
    /// assert!((value.to_f64() - 3.0).abs() < 1e-15);
    /// ```
    #[instrument(level = "debug", skip_all)]
    pub fn log(&self, base: &Self, precision: Option<u64>) -> Result<Self, FractionError> {
        if base.is_negative || base.is_zero() || base.is_one() {
            return Err(FractionError::Domain("logarithm base must be positive and not one"));
        }
        if self.is_negative || self.is_zero() {
            return Err(FractionError::Domain("logarithm of a non-positive value"));
        }

        let bits = self
            .max_bits
            .max(base.max_bits)
            .min(precision.unwrap_or(u64::MAX));
        let mut x = self.clone();
        x.max_bits = bits;
        let mut b = base.clone();
        b.max_bits = bits;

        let ln_base = b.ln(bits)?;
        if ln_base.is_zero() {
            return Err(FractionError::DivisionByZero);
        }
        x.ln(bits)?.checked_div(&ln_base)
    }

    /// Returns true if `|self| < 2^-bits`.
    pub(crate) fn is_below_bits(&self, bits: u64) -> bool {
        below_power_of_two(self, bits)
    }
}

/// `ln x = 2 * (y + y^3/3 + y^5/5 + ...)` with `y = (x - 1) / (x + 1)`.
///
/// Stops at the first term below `2^-(tolerance_bits + 4)`.
fn atanh_log(x: &Fraction, tolerance_bits: u64, working: u64) -> Result<Fraction, FractionError> {
    let one = Fraction::one_with_max_bits(working);
    let y = x.checked_sub(&one)?.checked_div(&x.checked_add(&one)?)?;
    let y_squared = y.checked_mul(&y)?;

    let limit = series_limit(working);
    let mut power = y.clone();
    let mut sum = y;
    let mut terms = 1;
    let mut n = 3u64;
    loop {
        if terms > limit {
            return Err(FractionError::convergence("logarithm series", limit));
        }
        power = power.checked_mul(&y_squared)?;
        let mut term = power.clone();
        term.denominator *= BigUint::from(n);
        term.simplify()?;
        if term.is_zero() || below_power_of_two(&term, tolerance_bits + 4) {
            break;
        }
        sum = sum.checked_add(&term)?;
        terms += 1;
        n += 2;
    }
    tracing::trace!(terms, "logarithm series summed");

    sum.mul_pow2(1)
}
