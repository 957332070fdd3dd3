//! Property-based tests for fraction arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::{Fraction, FractionError};

    // Strategy for small fractions that stay exact under the default cap
    fn small_fraction() -> impl Strategy<Value = Fraction> {
        (-1000i64..1000, 1i64..1000).prop_map(|(n, d)| Fraction::from_i64(n, d).unwrap())
    }

    // Strategy for non-zero fractions
    fn non_zero_fraction() -> impl Strategy<Value = Fraction> {
        small_fraction().prop_filter("non-zero", |f| !f.is_zero())
    }

    // Strategy for positive fractions
    fn positive_fraction() -> impl Strategy<Value = Fraction> {
        (1i64..1000, 1i64..1000).prop_map(|(n, d)| Fraction::from_i64(n, d).unwrap())
    }

    proptest! {
        #[test]
        fn always_reduced(a in small_fraction(), b in small_fraction()) {
            for value in [&a + &b, &a - &b, &a * &b] {
                prop_assert!(value.numerator().gcd(value.denominator()).is_one());
                prop_assert!(!value.denominator().is_zero());
                prop_assert!(!(value.is_zero() && value.is_negative()));
            }
        }

        #[test]
        fn add_commutative(a in small_fraction(), b in small_fraction()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn add_associative(a in small_fraction(), b in small_fraction(), c in small_fraction()) {
            prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        }

        #[test]
        fn distributive(a in small_fraction(), b in small_fraction(), c in small_fraction()) {
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn sub_is_add_negation(a in small_fraction(), b in small_fraction()) {
            prop_assert_eq!(&a - &b, &a + &(-&b));
            prop_assert!((&a - &a).is_zero());
        }

        #[test]
        fn div_inverts_mul(a in small_fraction(), b in non_zero_fraction()) {
            prop_assert_eq!(&(&a * &b) / &b, a);
        }

        #[test]
        fn ordering_matches_f64(a in small_fraction(), b in small_fraction()) {
            let (x, y) = (a.to_f64(), b.to_f64());
            if x < y {
                prop_assert!(a < b);
            } else if x > y {
                prop_assert!(a > b);
            }
        }

        #[test]
        fn scientific_round_trip(a in small_fraction()) {
            let text = a.to_scientific(40, false);
            let back: Fraction = text.parse().unwrap();
            let error = (&back - &a).abs();
            prop_assert!(error.is_below_bits(100));
        }

        #[test]
        fn f64_round_trip(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
            let value = Fraction::from_f64(x).unwrap();
            prop_assert_eq!(value.to_f64(), x);
        }

        #[test]
        fn sqrt_squares_back(a in positive_fraction()) {
            let root = a.sqrt(128).unwrap();
            let error = (&(&root * &root) - &a).abs();
            prop_assert!(error.is_below_bits(100));
        }

        #[test]
        fn half_power_is_sqrt(a in positive_fraction()) {
            let via_pow = a.pow(&Fraction::from_i64(1, 2).unwrap()).unwrap();
            let via_sqrt = a.sqrt(0).unwrap();
            prop_assert!((&via_pow - &via_sqrt).abs().is_below_bits(200));
        }

        #[test]
        fn ln_of_product(a in positive_fraction(), b in positive_fraction()) {
            let lhs = (&a * &b).ln(0).unwrap();
            let rhs = &a.ln(0).unwrap() + &b.ln(0).unwrap();
            prop_assert!((&lhs - &rhs).abs().is_below_bits(200));
        }

        #[test]
        fn limit_denominator_is_bounded(a in small_fraction(), max in 1u64..50) {
            let bound = numera_uint::BigUint::from(max);
            let approx = a.limit_denominator(&bound).unwrap();
            prop_assert!(*approx.denominator() <= bound);
        }
    }

    #[test]
    fn randomized_precision_cap() {
        // Long random sums must stay under the cap instead of growing.
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut sum = Fraction::zero().with_max_bits(64).unwrap();
        let mut exact = Fraction::zero().with_max_bits(u64::MAX).unwrap();
        let mut truncated = false;
        for _ in 0..200 {
            let n: i64 = rng.gen_range(-1_000_000..1_000_000);
            let d: i64 = rng.gen_range(1..1_000_000);
            let term = Fraction::from_i64(n, d).unwrap();
            exact += &term;
            sum += term.with_max_bits(64).unwrap();
            let smaller = sum.numerator().bit_len().min(sum.denominator().bit_len());
            assert!(smaller <= 64);
            // Still in lowest terms after the shift.
            assert!(sum.numerator().gcd(sum.denominator()).is_one());
            truncated |= sum != exact;
        }
        assert!(truncated);
    }

    #[test]
    fn concrete_scenarios() {
        let third = Fraction::from_i64(1, 3).unwrap();
        let sixth = Fraction::from_i64(1, 6).unwrap();
        assert_eq!(third + sixth, Fraction::from_i64(1, 2).unwrap());

        let tenth = Fraction::from_f64(0.1).unwrap();
        let reparsed: Fraction = tenth.to_scientific(30, false).parse().unwrap();
        assert_eq!(reparsed.to_f64(), 0.1);

        assert_eq!(Fraction::from_i64(1, 0), Err(FractionError::DivisionByZero));
        assert!(matches!(Fraction::from(-1).sqrt(0), Err(FractionError::Domain(_))));
        assert!(matches!("1e".parse::<Fraction>(), Err(FractionError::InvalidArgument(_))));
    }
}
