//! Property-based tests for the BN256 base field.
//!
//! Every operation is cross-checked against plain `BigUint` arithmetic
//! modulo p, over elements drawn from the whole of `[0, p)`.

use bn256::{modulus, Canonical, FieldElement, FieldError};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn to_big(fe: &FieldElement) -> BigUint {
    fe.to_int().expect("well-formed element")
}

/// Strategy: any element of the field, built from 32 random bytes reduced mod p.
fn fe_any() -> impl Strategy<Value = FieldElement> {
    any::<[u8; 32]>().prop_map(|bytes| {
        let v = BigUint::from_bytes_be(&bytes) % modulus();
        FieldElement::set_int(&v)
    })
}

/// Strategy: nonzero elements.
fn fe_nonzero() -> impl Strategy<Value = FieldElement> {
    fe_any().prop_filter("nonzero", |fe| !fe.is_zero())
}

/// Strategy: 32-byte strings whose integer value is at least p.
fn bytes_out_of_range() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>().prop_map(|bytes| {
        let span = (BigUint::one() << 256) - modulus();
        let v: BigUint = modulus() + BigUint::from_bytes_be(&bytes) % span;
        let raw = v.to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - raw.len()..].copy_from_slice(&raw);
        out
    })
}

// ============================================================================
// Encoding
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_bytes_roundtrip(a in fe_any()) {
        let bytes = a.to_bytes();
        prop_assert_eq!(FieldElement::from_bytes(&bytes).unwrap(), a);
        prop_assert_eq!(Canonical::unmarshal(&bytes).unwrap(), a.decode());
    }

    #[test]
    fn prop_bytes_are_big_endian_value(a in fe_any()) {
        let bytes = a.to_bytes();
        prop_assert_eq!(bytes.len(), 32);
        prop_assert_eq!(BigUint::from_bytes_be(&bytes), to_big(&a));
    }

    #[test]
    fn prop_out_of_range_rejected(bytes in bytes_out_of_range()) {
        let err = Canonical::unmarshal(&bytes).unwrap_err();
        prop_assert!(err.is_range_error());
    }

    #[test]
    fn prop_int_roundtrip(a in fe_any()) {
        prop_assert_eq!(FieldElement::set_int(&to_big(&a)), a);
    }

    #[test]
    fn prop_i64_matches_bigint(v in any::<i64>()) {
        let expected = if v >= 0 {
            BigUint::from(v as u64)
        } else {
            modulus() - BigUint::from(v.unsigned_abs())
        };
        prop_assert_eq!(to_big(&FieldElement::from_i64(v)), expected);
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_mul_matches_bigint(a in fe_any(), b in fe_any()) {
        let expected = to_big(&a) * to_big(&b) % modulus();
        prop_assert_eq!(to_big(&a.mul(&b)), expected);
    }

    #[test]
    fn prop_add_matches_bigint(a in fe_any(), b in fe_any()) {
        let expected = (to_big(&a) + to_big(&b)) % modulus();
        prop_assert_eq!(to_big(&a.add(&b)), expected);
    }

    #[test]
    fn prop_sub_matches_bigint(a in fe_any(), b in fe_any()) {
        let expected = (to_big(&a) + modulus() - to_big(&b)) % modulus();
        prop_assert_eq!(to_big(&a.sub(&b)), expected);
    }

    #[test]
    fn prop_mul_commutative(a in fe_any(), b in fe_any()) {
        prop_assert_eq!(a.mul(&b), b.mul(&a));
    }

    #[test]
    fn prop_mul_identity(a in fe_any()) {
        prop_assert_eq!(a.mul(&Canonical::ONE.encode()), a);
    }

    #[test]
    fn prop_distributive(a in fe_any(), b in fe_any(), c in fe_any()) {
        prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
    }

    #[test]
    fn prop_double_neg(a in fe_any()) {
        prop_assert_eq!(a.neg().neg(), a);
        prop_assert!(a.add(&a.neg()).is_zero());
    }

    #[test]
    fn prop_neg_matches_bigint(a in fe_any()) {
        let expected = (modulus() - to_big(&a)) % modulus();
        prop_assert_eq!(to_big(&a.neg()), expected);
    }
}

// ============================================================================
// Inversion and square root
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invert(a in fe_nonzero()) {
        let inv = a.invert().unwrap();
        prop_assert_eq!(a.mul(&inv), FieldElement::ONE);
        prop_assert_eq!(inv.invert().unwrap(), a);
    }

    #[test]
    fn prop_sqrt_of_square(a in fe_any()) {
        let g = a.square();
        let r = g.sqrt().unwrap();
        prop_assert_eq!(r.mul(&r), g);
        prop_assert!(r == a || r == a.neg());
    }

    #[test]
    fn prop_sqrt_agrees_with_legendre(a in fe_any()) {
        match a.sqrt() {
            Ok(r) => {
                prop_assert_eq!(r.square(), a);
                prop_assert!(a.legendre().unwrap() >= 0);
            }
            Err(e) => {
                prop_assert_eq!(e, FieldError::NoSquareRoot);
                prop_assert_eq!(a.legendre().unwrap(), -1);
            }
        }
    }
}

#[test]
fn zero_has_zero_root() {
    assert!(FieldElement::ZERO.sqrt().unwrap().is_zero());
    assert!(to_big(&FieldElement::ZERO).is_zero());
}
