//! Arbitrary-precision interop and the square-root fallback.
//!
//! Nothing here is on the multiplication or inversion hot path. Square roots
//! go through `num-bigint` because they are rare and not secret-dependent.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::canonical::Canonical;
use crate::constants::modulus;
use crate::error::FieldError;
use crate::field::FieldElement;

impl FieldElement {
    /// Plain value as a big integer.
    ///
    /// Leaves Montgomery form, then parses the 64-digit hex rendering of the
    /// limbs.
    pub fn to_int(&self) -> Result<BigUint, FieldError> {
        let hex = self.decode().to_string();
        BigUint::parse_bytes(hex.as_bytes(), 16).ok_or(FieldError::Conversion)
    }

    /// Loads a big integer that the caller has already reduced into `[0, p)`.
    ///
    /// Only the low 256 bits are read and no range check is made.
    ///
    /// ```
    /// use bn256::FieldElement;
    /// use num_bigint::BigUint;
    ///
    /// let fe = FieldElement::set_int(&BigUint::from(42u32));
    /// assert_eq!(fe, FieldElement::from_u64(42));
    /// ```
    pub fn set_int(value: &BigUint) -> Self {
        let mut limbs = [0u64; 4];
        for (limb, digit) in limbs.iter_mut().zip(value.iter_u64_digits()) {
            *limb = digit;
        }
        Canonical(limbs).encode()
    }

    /// A square root of `self`, if one exists.
    ///
    /// Not constant time. Which of the two roots comes back is whatever the
    /// big-integer algorithm produces.
    ///
    /// ```
    /// use bn256::FieldElement;
    ///
    /// let four = FieldElement::from_u64(4);
    /// let root = four.sqrt().unwrap();
    /// assert_eq!(root.square(), four);
    ///
    /// assert!(FieldElement::from_u64(3).sqrt().is_err());
    /// ```
    pub fn sqrt(&self) -> Result<Self, FieldError> {
        let g = self.to_int()?;
        match mod_sqrt(&g, modulus()) {
            Some(root) => Ok(Self::set_int(&root)),
            None => {
                tracing::debug!(element = %self, "no square root in field");
                Err(FieldError::NoSquareRoot)
            }
        }
    }

    /// Legendre symbol of `self`: 0 for zero, 1 for a residue, -1 otherwise.
    pub fn legendre(&self) -> Result<i8, FieldError> {
        Ok(legendre(&self.to_int()?, modulus()))
    }
}

/// Euler's criterion, `a^((p-1)/2) mod p`, for an odd prime `p`.
fn legendre(a: &BigUint, p: &BigUint) -> i8 {
    let a = a % p;
    if a.is_zero() {
        return 0;
    }
    let exp = (p - 1u32) >> 1;
    if a.modpow(&exp, p).is_one() {
        1
    } else {
        -1
    }
}

/// Modular square root over an odd prime `p`.
///
/// Uses the `p = 3 (mod 4)` shortcut when available and Tonelli-Shanks
/// otherwise. Returns `None` when `a` is a quadratic non-residue, and for a
/// modulus below 3 or an even one.
pub(crate) fn mod_sqrt(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    if *p < BigUint::from(3u32) || p.is_even() {
        return None;
    }
    let a = a % p;
    if a.is_zero() {
        return Some(a);
    }
    if legendre(&a, p) != 1 {
        return None;
    }

    let four = BigUint::from(4u32);
    if (p % &four) == BigUint::from(3u32) {
        let exp = (p + 1u32) >> 2;
        return Some(a.modpow(&exp, p));
    }

    // p - 1 = q * 2^s with q odd
    let p_minus_1 = p - 1u32;
    let s = p_minus_1.trailing_zeros().unwrap_or(0);
    let q = &p_minus_1 >> s;

    // Any non-residue works as the generator of the 2-Sylow subgroup.
    let mut z = BigUint::from(2u32);
    while legendre(&z, p) != -1 {
        z += 1u32;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + 1u32) >> 1), p);

    while !t.is_one() {
        // Least i with t^(2^i) = 1; i < m because a is a residue.
        let mut i = 0u64;
        let mut t2i = t.clone();
        while !t2i.is_one() {
            t2i = &t2i * &t2i % p;
            i += 1;
            if i == m {
                return None;
            }
        }

        let mut b = c;
        for _ in 0..(m - i - 1) {
            b = &b * &b % p;
        }
        m = i;
        c = &b * &b % p;
        t = t * &c % p;
        r = r * &b % p;
    }

    Some(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_int_small() {
        assert_eq!(FieldElement::from_u64(42).to_int().unwrap(), BigUint::from(42u32));
        assert_eq!(FieldElement::ZERO.to_int().unwrap(), BigUint::zero());
    }

    #[test]
    fn to_int_minus_one() {
        let expected = modulus() - 1u32;
        assert_eq!(FieldElement::from_i64(-1).to_int().unwrap(), expected);
    }

    #[test]
    fn set_int_roundtrip() {
        let big = modulus() - 12345u32;
        let fe = FieldElement::set_int(&big);
        assert_eq!(fe, FieldElement::from_i64(-12345));
        assert_eq!(fe.to_int().unwrap(), big);
    }

    #[test]
    fn set_int_reads_multiple_limbs() {
        let big = (BigUint::one() << 192) + (BigUint::one() << 64) + 7u32;
        let fe = FieldElement::set_int(&big);
        assert_eq!(fe.decode().limbs(), &[7, 1, 0, 1]);
    }

    #[test]
    fn sqrt_of_squares() {
        for v in [1u64, 2, 3, 5, 1000, u64::MAX] {
            let x = FieldElement::from_u64(v);
            let g = x.square();
            let r = g.sqrt().unwrap();
            assert_eq!(r.square(), g);
            assert!(r == x || r == x.neg());
        }
    }

    #[test]
    fn sqrt_of_zero() {
        assert_eq!(FieldElement::ZERO.sqrt(), Ok(FieldElement::ZERO));
    }

    #[test_log::test]
    fn sqrt_of_non_residue() {
        // p = 3 mod 4, so -1 is a non-residue.
        assert_eq!(FieldElement::from_i64(-1).sqrt(), Err(FieldError::NoSquareRoot));
        assert_eq!(FieldElement::from_u64(3).sqrt(), Err(FieldError::NoSquareRoot));
        assert_eq!(FieldElement::from_u64(5).sqrt(), Err(FieldError::NoSquareRoot));
    }

    #[test]
    fn legendre_symbols() {
        assert_eq!(FieldElement::ZERO.legendre(), Ok(0));
        assert_eq!(FieldElement::from_u64(4).legendre(), Ok(1));
        assert_eq!(FieldElement::from_u64(7).legendre(), Ok(1));
        assert_eq!(FieldElement::from_u64(3).legendre(), Ok(-1));
    }

    #[test]
    fn tonelli_shanks_on_p_1_mod_4() {
        // 17 = 1 (mod 16) exercises the full loop with s = 4.
        let p = BigUint::from(17u32);
        for a in 0u32..17 {
            let a = BigUint::from(a);
            match mod_sqrt(&a, &p) {
                Some(r) => assert_eq!(&r * &r % &p, a),
                None => assert_eq!(legendre(&a, &p), -1),
            }
        }
        // 2 is a residue mod 17 (6^2 = 36 = 2)
        assert!(mod_sqrt(&BigUint::from(2u32), &p).is_some());
        assert!(mod_sqrt(&BigUint::from(3u32), &p).is_none());
    }

    #[test]
    fn mod_sqrt_rejects_degenerate_modulus() {
        let four = BigUint::from(4u32);
        assert_eq!(mod_sqrt(&four, &BigUint::zero()), None);
        assert_eq!(mod_sqrt(&BigUint::one(), &BigUint::one()), None);
        assert_eq!(mod_sqrt(&BigUint::one(), &BigUint::from(2u32)), None);
        assert_eq!(mod_sqrt(&four, &BigUint::from(16u32)), None);
        assert_eq!(mod_sqrt(&four, &BigUint::from(3u32)), Some(BigUint::one()));
    }

    #[test]
    fn tonelli_shanks_on_bn254_scalar_field() {
        // r = 1 (mod 2^28): the large 2-adicity case.
        let r: BigUint =
            "21888242871839275222246405745257275088548364400416034343698204186575808495617"
                .parse()
                .unwrap();
        let x = BigUint::from(0x1234_5678_9abc_def0u64);
        let g = &x * &x % &r;
        let root = mod_sqrt(&g, &r).unwrap();
        assert_eq!(&root * &root % &r, g);
    }
}
