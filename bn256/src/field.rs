//! BN256 Base Field (Fp) Element in Montgomery Form
//!
//! p = 21888242871839275222246405745257275088696311157297823662689037894645226208583
//! Internal representation: value * R mod p, R = 2^256 (Montgomery domain)

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::arith::{self, Limbs};
use crate::canonical::Canonical;
use crate::constants::{ELEMENT_BYTES, P_MINUS_2, R, R3, RN1};
use crate::error::FieldError;

/// An element of the BN256 base field, held in Montgomery form.
///
/// The limbs are always below p. Plain values only enter or leave through
/// [`Canonical::encode`] and [`FieldElement::decode`], so a Montgomery value
/// can never be mistaken for a plain one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement {
    /// Four 64-bit limbs in little-endian order (limbs[0] is least significant)
    limbs: Limbs,
}

impl FieldElement {
    /// The zero element (0 in Montgomery form = 0)
    pub const ZERO: Self = Self { limbs: [0; 4] };

    /// The one element (1 in Montgomery form = R mod p)
    pub const ONE: Self = Self { limbs: R };

    #[inline]
    pub(crate) const fn from_montgomery(limbs: Limbs) -> Self {
        Self { limbs }
    }

    /// Raw Montgomery limbs, `x * R mod p`.
    #[inline]
    pub fn montgomery_limbs(&self) -> &Limbs {
        &self.limbs
    }

    /// Create from a small u64 value.
    ///
    /// ```
    /// use bn256::FieldElement;
    ///
    /// let fe = FieldElement::from_u64(42);
    /// assert_eq!(fe.decode().limbs(), &[42, 0, 0, 0]);
    /// ```
    pub fn from_u64(val: u64) -> Self {
        Canonical([val, 0, 0, 0]).encode()
    }

    /// Create from a signed value; negatives map to `p - |val|`.
    ///
    /// ```
    /// use bn256::FieldElement;
    ///
    /// assert_eq!(-FieldElement::from_i64(-1), FieldElement::ONE);
    /// ```
    pub fn from_i64(val: i64) -> Self {
        if val >= 0 {
            Self::from_u64(val as u64)
        } else {
            // unsigned_abs() keeps i64::MIN in range
            Self::from_u64(val.unsigned_abs()).neg()
        }
    }

    /// Leaves Montgomery form: `x*R * 1 * R^-1 = x`.
    #[inline]
    pub fn decode(&self) -> Canonical {
        Canonical(arith::mont_mul(&self.limbs, &Canonical::ONE.0))
    }

    /// Check if zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0; 4]
    }

    /// Check if one (stored as R)
    #[inline]
    pub fn is_one(&self) -> bool {
        self.limbs == R
    }

    /// Writes the plain value as 32 big-endian bytes.
    pub fn marshal(&self, out: &mut [u8; ELEMENT_BYTES]) {
        self.decode().marshal(out);
    }

    /// Plain value as 32 big-endian bytes.
    ///
    /// ```
    /// use bn256::FieldElement;
    ///
    /// let bytes = FieldElement::from_i64(1).to_bytes();
    /// assert_eq!(bytes[31], 1);
    /// assert!(bytes[..31].iter().all(|&b| b == 0));
    /// ```
    pub fn to_bytes(&self) -> [u8; ELEMENT_BYTES] {
        self.decode().to_bytes()
    }

    /// Reads 32 big-endian bytes and enters Montgomery form.
    ///
    /// Fails with a range error when the integer is not below p.
    pub fn from_bytes(bytes: &[u8; ELEMENT_BYTES]) -> Result<Self, FieldError> {
        Ok(Canonical::unmarshal(bytes)?.encode())
    }

    /// Like [`FieldElement::from_bytes`] but for a slice of unchecked length.
    pub fn unmarshal(bytes: &[u8]) -> Result<Self, FieldError> {
        let bytes: &[u8; ELEMENT_BYTES] =
            bytes.try_into().map_err(|_| FieldError::InvalidLength {
                expected: ELEMENT_BYTES,
                got: bytes.len(),
            })?;
        Self::from_bytes(bytes)
    }

    /// Parses a big-endian hex string (with or without "0x" prefix).
    pub fn from_hex_str(s: &str) -> Result<Self, FieldError> {
        Ok(Canonical::from_hex_str(s)?.encode())
    }

    /// Modular addition: (self + other) mod p.
    ///
    /// ```
    /// use bn256::FieldElement;
    ///
    /// let a = FieldElement::from_u64(7);
    /// let b = FieldElement::from_u64(5);
    /// assert_eq!(a.add(&b), FieldElement::from_u64(12));
    /// ```
    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            limbs: arith::add(&self.limbs, &other.limbs),
        }
    }

    /// Modular subtraction: (self - other) mod p.
    #[inline]
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            limbs: arith::sub(&self.limbs, &other.limbs),
        }
    }

    /// Modular negation: (-self) mod p. Zero stays zero.
    ///
    /// ```
    /// use bn256::FieldElement;
    ///
    /// let a = FieldElement::from_u64(5);
    /// assert!(a.add(&a.neg()).is_zero());
    /// assert_eq!(FieldElement::ZERO.neg(), FieldElement::ZERO);
    /// ```
    #[inline]
    pub fn neg(&self) -> Self {
        Self {
            limbs: arith::neg(&self.limbs),
        }
    }

    /// Modular doubling: (2 * self) mod p.
    #[inline]
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Modular multiplication: (self * other) mod p.
    ///
    /// ```
    /// use bn256::FieldElement;
    ///
    /// let a = FieldElement::from_u64(6);
    /// let b = FieldElement::from_u64(7);
    /// assert_eq!(a.mul(&b), FieldElement::from_u64(42));
    /// ```
    #[inline]
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            limbs: arith::mont_mul(&self.limbs, &other.limbs),
        }
    }

    /// Modular squaring: (self * self) mod p.
    #[inline]
    pub fn square(&self) -> Self {
        Self {
            limbs: arith::mont_square(&self.limbs),
        }
    }

    /// Modular exponentiation: self^exp mod p (constant-time).
    ///
    /// Scans the exponent from its most significant bit, always squaring and
    /// always multiplying, then keeps the product only if the bit is set.
    pub fn pow(&self, exp: &Limbs) -> Self {
        let mut result = Self::ONE.limbs;
        for i in (0..4).rev() {
            for bit in (0..64).rev() {
                result = arith::mont_square(&result);
                let multiplied = arith::mont_mul(&result, &self.limbs);
                result = arith::select(&result, &multiplied, (exp[i] >> bit) & 1);
            }
        }
        Self { limbs: result }
    }

    /// Modular inverse: self⁻¹ mod p via Fermat's little theorem (self^(p−2)).
    ///
    /// Returns `None` if `self` is zero.
    ///
    /// ```
    /// use bn256::FieldElement;
    ///
    /// let two = FieldElement::from_i64(2);
    /// assert_eq!(two.invert().unwrap().mul(&two), FieldElement::ONE);
    ///
    /// assert!(FieldElement::ZERO.invert().is_none());
    /// ```
    pub fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(self.invert_unchecked())
    }

    /// self^(p−2) with a fixed instruction count, zero included (0 maps to 0).
    ///
    /// The exponent is walked word by word and bit by bit from the least
    /// significant end. For every bit the power is squared and the product
    /// `acc * power` is computed; it replaces the accumulator only when the bit
    /// is set. The accumulator starts at R⁻¹ rather than R, so after the walk
    /// it holds plain `self^(p−2) * R⁻¹`; one multiplication by R³ lifts that
    /// back to Montgomery form.
    pub fn invert_unchecked(&self) -> Self {
        let mut acc = RN1;
        let mut power = self.limbs;

        for word in P_MINUS_2 {
            for bit in 0..64 {
                let product = arith::mont_mul(&acc, &power);
                acc = arith::select(&acc, &product, (word >> bit) & 1);
                power = arith::mont_square(&power);
            }
        }

        Self {
            limbs: arith::mont_mul(&acc, &R3),
        }
    }

    /// Modular division: self / other mod p
    /// Returns None if other is zero
    pub fn div(&self, other: &Self) -> Option<Self> {
        Some(self.mul(&other.invert()?))
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{:x})", self.decode())
    }
}

/// The plain value as 64 hex digits, most-significant limb first.
impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.decode(), f)
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.decode(), f)
    }
}

impl From<u64> for FieldElement {
    fn from(val: u64) -> Self {
        Self::from_u64(val)
    }
}

impl From<i64> for FieldElement {
    fn from(val: i64) -> Self {
        Self::from_i64(val)
    }
}

impl From<Canonical> for FieldElement {
    fn from(c: Canonical) -> Self {
        c.encode()
    }
}

impl From<FieldElement> for Canonical {
    fn from(fe: FieldElement) -> Self {
        fe.decode()
    }
}

// ============================================================================
// Operator impls
// ============================================================================

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl $trait<&FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: &FieldElement) -> FieldElement {
                FieldElement::$method(self, rhs)
            }
        }

        impl $trait<FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                FieldElement::$method(&self, &rhs)
            }
        }

        impl $trait<&FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: &FieldElement) -> FieldElement {
                FieldElement::$method(&self, rhs)
            }
        }

        impl $assign_trait<&FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: &FieldElement) {
                *self = FieldElement::$method(self, rhs);
            }
        }

        impl $assign_trait<FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: FieldElement) {
                *self = FieldElement::$method(self, &rhs);
            }
        }
    };
}

impl_binop!(Add, add, AddAssign, add_assign);
impl_binop!(Sub, sub, SubAssign, sub_assign);
impl_binop!(Mul, mul, MulAssign, mul_assign);

impl Neg for FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        FieldElement::neg(&self)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        FieldElement::neg(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
