//! Property-based tests for big-integer arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{BigUint, UintError};

    // Strategy for values spanning one to several limbs
    fn big() -> impl Strategy<Value = BigUint> {
        prop::collection::vec(any::<u32>(), 1..12).prop_map(BigUint::from_limbs)
    }

    // Strategy for non-zero values
    fn non_zero_big() -> impl Strategy<Value = BigUint> {
        big().prop_filter("non-zero", |x| !x.is_zero())
    }

    proptest! {
        #[test]
        fn canonical_form(a in big(), b in big()) {
            for value in [&a + &b, &a * &b, &a - &b, &a >> 7, &a << 45] {
                prop_assert!(!value.limbs().is_empty());
                prop_assert!(value.limb_count() == 1 || *value.limbs().last().unwrap() != 0);
            }
        }

        #[test]
        fn add_commutative(a in big(), b in big()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn mul_commutative(a in big(), b in big()) {
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn distributive(a in big(), b in big(), c in big()) {
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn add_then_sub_inverts(a in big(), b in big()) {
            prop_assert_eq!(&(&a + &b) - &b, a);
        }

        #[test]
        fn sub_floors_at_zero(a in big(), b in big()) {
            let diff = &a - &b;
            if a <= b {
                prop_assert!(diff.is_zero());
            } else {
                prop_assert_eq!(&diff + &b, a);
            }
        }

        #[test]
        fn div_rem_identity(a in big(), b in non_zero_big()) {
            let (q, r) = a.div_rem(&b).unwrap();
            prop_assert!(r < b);
            prop_assert_eq!(&(&q * &b) + &r, a);
        }

        #[test]
        fn div_rem_matches_long_division(a in big(), b in non_zero_big()) {
            prop_assert_eq!(a.div_rem(&b).unwrap(), a.div_rem_long(&b).unwrap());
        }

        #[test]
        fn division_by_zero(a in big()) {
            prop_assert!((&a / &BigUint::zero()).is_zero());
            prop_assert!((&a % &BigUint::zero()).is_zero());
            prop_assert_eq!(a.div_rem(&BigUint::zero()), Err(UintError::DivisionByZero));
        }

        #[test]
        fn gcd_divides_both(a in non_zero_big(), b in non_zero_big()) {
            let g = a.gcd(&b);
            prop_assert!((&a % &g).is_zero());
            prop_assert!((&b % &g).is_zero());
            prop_assert!((&a / &g).gcd(&(&b / &g)).is_one());
        }

        #[test]
        fn gcd_times_lcm(a in non_zero_big(), b in non_zero_big()) {
            prop_assert_eq!(&a.gcd(&b) * &a.lcm(&b).unwrap(), &a * &b);
        }

        #[test]
        fn shift_is_power_of_two_scaling(a in big(), shift in 0u64..200) {
            let scale = BigUint::one() << shift;
            prop_assert_eq!(&a << shift, &a * &scale);
            prop_assert_eq!(&a >> shift, &a / &scale);
        }

        #[test]
        fn bit_len_bounds(a in non_zero_big()) {
            let bits = a.bit_len();
            prop_assert!(BigUint::one() << (bits - 1) <= a);
            prop_assert!(a < BigUint::one() << bits);
        }

        #[test]
        fn radix_round_trip(a in big(), radix in 2u32..=36) {
            let text = a.to_str_radix(radix).unwrap();
            prop_assert_eq!(BigUint::from_str_radix(&text, radix).unwrap(), a);
        }

        #[test]
        fn matches_native_u128(a in any::<u128>(), b in 1u128..) {
            let (x, y) = (BigUint::from(a), BigUint::from(b));
            prop_assert_eq!(&x / &y, BigUint::from(a / b));
            prop_assert_eq!(&x % &y, BigUint::from(a % b));
            prop_assert_eq!(x.to_string(), a.to_string());
            prop_assert_eq!(format!("{x:x}"), format!("{a:x}"));
        }
    }

    #[test]
    fn concrete_scenarios() {
        assert_eq!(BigUint::from_str_radix("ff", 16).unwrap(), BigUint::from(255u32));
        assert_eq!((BigUint::from(2u32) << 65).bit_len(), 67);
        assert_eq!(BigUint::from(48u32).gcd(&BigUint::from(18u32)), BigUint::from(6u32));
        assert!((BigUint::from(10u32) / BigUint::zero()).is_zero());
        assert_eq!(
            BigUint::from(10u32).div_rem(&BigUint::zero()),
            Err(UintError::DivisionByZero)
        );
    }
}
