//! Continued-fraction expansion and best rational approximation.

use num_traits::{One, Zero};
use numera_uint::BigUint;

use crate::error::FractionError;
use crate::Fraction;

impl Fraction {
    /// Returns the partial quotients `[a0; a1, a2, ...]` of the magnitude.
    ///
    /// The expansion of a rational is finite; the sign is not encoded.
    ///
    /// ```
    /// use numera_fraction::Fraction;
    /// use numera_uint::BigUint;
    ///
    /// let terms = Fraction::from_i64(415, 93).unwrap().continued_fraction();
    /// assert_eq!(terms, [4u32, 2, 6, 7].map(BigUint::from));
    /// ```
    #[must_use]
    pub fn continued_fraction(&self) -> Vec<BigUint> {
        let mut terms = Vec::new();
        let mut n = self.numerator.clone();
        let mut d = self.denominator.clone();
        while !d.is_zero() {
            let (q, r) = n.div_rem(&d).unwrap_or_default();
            terms.push(q);
            n = std::mem::replace(&mut d, r);
        }
        terms
    }

    /// Rebuilds a fraction from partial quotients.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] for an empty expansion and
    /// [`FractionError::DivisionByZero`] if a zero partial quotient after the
    /// first collapses the denominator.
    pub fn from_continued_fraction(
        terms: &[BigUint],
        is_negative: bool,
        max_bits: u64,
    ) -> Result<Self, FractionError> {
        let (last, rest) = terms
            .split_last()
            .ok_or_else(|| FractionError::invalid("continued fraction has no terms"))?;

        let mut numerator = last.clone();
        let mut denominator = BigUint::one();
        for term in rest.iter().rev() {
            let next = &(term * &numerator) + &denominator;
            denominator = std::mem::replace(&mut numerator, next);
        }
        Self::from_parts(numerator, denominator, is_negative, max_bits)
    }

    /// Returns the closest fraction whose denominator is at most
    /// `max_denominator`.
    ///
    /// Walks the convergents until the next one would exceed the bound,
    /// then picks between the last convergent and the largest admissible
    /// semiconvergent.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] if `max_denominator` is
    /// zero.
    pub fn limit_denominator(&self, max_denominator: &BigUint) -> Result<Self, FractionError> {
        if max_denominator.is_zero() {
            return Err(FractionError::invalid("maximum denominator must be positive"));
        }
        if self.denominator <= *max_denominator {
            return Ok(self.clone());
        }

        let (mut p0, mut q0) = (BigUint::zero(), BigUint::one());
        let (mut p1, mut q1) = (BigUint::one(), BigUint::zero());
        let mut n = self.numerator.clone();
        let mut d = self.denominator.clone();

        loop {
            let (a, r) = n.div_rem(&d)?;
            let q2 = &q0 + &(&a * &q1);
            if q2 > *max_denominator {
                break;
            }
            let p2 = &p0 + &(&a * &p1);
            (p0, q0) = (std::mem::replace(&mut p1, p2), std::mem::replace(&mut q1, q2));
            n = std::mem::replace(&mut d, r);
        }

        let k = &(max_denominator - &q0) / &q1;
        let semiconvergent = Self::from_parts(
            &p0 + &(&k * &p1),
            &q0 + &(&k * &q1),
            self.is_negative,
            self.max_bits,
        )?;
        let convergent = Self::from_parts(p1, q1, self.is_negative, self.max_bits)?;

        let convergent_error = self.checked_sub(&convergent)?.abs();
        let semiconvergent_error = self.checked_sub(&semiconvergent)?.abs();
        Ok(if convergent_error <= semiconvergent_error {
            convergent
        } else {
            semiconvergent
        })
    }

    /// Approximates a float by the closest fraction whose denominator is
    /// at most `max_denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidArgument`] for non-finite input or a
    /// zero bound.
    ///
    /// ```
    /// use numera_fraction::Fraction;
    ///
    /// let approx = Fraction::from_f64_approx(0.1, 1000).unwrap();
    /// assert_eq!(approx, Fraction::from_i64(1, 10).unwrap());
    /// ```
    pub fn from_f64_approx(value: f64, max_denominator: u64) -> Result<Self, FractionError> {
        Self::from_f64(value)?.limit_denominator(&BigUint::from(max_denominator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::from_i64(n, d).unwrap()
    }

    fn terms(values: &[u64]) -> Vec<BigUint> {
        values.iter().copied().map(BigUint::from).collect()
    }

    #[test]
    fn test_expansion() {
        assert_eq!(frac(415, 93).continued_fraction(), terms(&[4, 2, 6, 7]));
        assert_eq!(frac(3, 1).continued_fraction(), terms(&[3]));
        assert_eq!(frac(1, 3).continued_fraction(), terms(&[0, 3]));
        assert_eq!(Fraction::zero().continued_fraction(), terms(&[0]));
        assert_eq!(frac(-415, 93).continued_fraction(), terms(&[4, 2, 6, 7]));
    }

    #[test]
    fn test_rebuild() {
        let value = frac(415, 93);
        let rebuilt =
            Fraction::from_continued_fraction(&value.continued_fraction(), false, 256).unwrap();
        assert_eq!(rebuilt, value);
        assert_eq!(
            Fraction::from_continued_fraction(&terms(&[0, 3]), true, 256).unwrap(),
            frac(-1, 3)
        );
        assert!(Fraction::from_continued_fraction(&[], false, 256).is_err());
    }

    #[test]
    fn test_limit_denominator_pi() {
        let pi = Fraction::from_f64(std::f64::consts::PI).unwrap();
        assert_eq!(pi.limit_denominator(&BigUint::from(10u32)).unwrap(), frac(22, 7));
        assert_eq!(pi.limit_denominator(&BigUint::from(100u32)).unwrap(), frac(311, 99));
        assert_eq!(pi.limit_denominator(&BigUint::from(1000u32)).unwrap(), frac(355, 113));
    }

    #[test]
    fn test_limit_denominator_keeps_sign_and_small_values() {
        let value = frac(-3, 7);
        assert_eq!(value.limit_denominator(&BigUint::from(7u32)).unwrap(), value);
        let approx = frac(-1_000_001, 3_000_000).limit_denominator(&BigUint::from(10u32)).unwrap();
        assert_eq!(approx, frac(-1, 3));
        assert!(value.limit_denominator(&BigUint::zero()).is_err());
    }

    #[test]
    fn test_from_f64_approx() {
        assert_eq!(Fraction::from_f64_approx(0.75, 100).unwrap(), frac(3, 4));
        assert_eq!(Fraction::from_f64_approx(-0.333_333_333, 100).unwrap(), frac(-1, 3));
        assert_eq!(Fraction::from_f64_approx(2.0, 1).unwrap(), frac(2, 1));
        assert!(Fraction::from_f64_approx(f64::NAN, 10).is_err());
    }
}
