//! Plain (non-Montgomery) field values and their byte encoding.

use std::fmt;

use crate::arith::{self, Limbs};
use crate::constants::{ELEMENT_BYTES, MODULUS, R2};
use crate::error::FieldError;
use crate::field::FieldElement;

/// A field value in plain form: the integer itself, not multiplied by `R`.
///
/// This is what travels over the wire. It has to go through
/// [`Canonical::encode`] before it can take part in arithmetic, and a
/// [`FieldElement`] comes back here through [`FieldElement::decode`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Canonical(pub(crate) Limbs);

impl Canonical {
    pub const ZERO: Self = Self([0; 4]);
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Wraps limbs that are already known to be below p.
    ///
    /// Returns a range error otherwise.
    pub fn from_limbs(limbs: Limbs) -> Result<Self, FieldError> {
        check_range(&limbs)?;
        Ok(Self(limbs))
    }

    /// Little-endian limbs of the plain value.
    #[inline]
    pub fn limbs(&self) -> &Limbs {
        &self.0
    }

    /// Enters Montgomery form: `x * R^2 * R^-1 = x * R mod p`.
    #[inline]
    pub fn encode(&self) -> FieldElement {
        FieldElement::from_montgomery(arith::mont_mul(&self.0, &R2))
    }

    /// Writes the value as 32 big-endian bytes.
    ///
    /// ```
    /// use bn256::Canonical;
    ///
    /// let mut out = [0u8; 32];
    /// Canonical::ONE.marshal(&mut out);
    /// assert_eq!(out[31], 1);
    /// assert!(out[..31].iter().all(|&b| b == 0));
    /// ```
    pub fn marshal(&self, out: &mut [u8; ELEMENT_BYTES]) {
        for w in 0..4 {
            out[8 * w..8 * w + 8].copy_from_slice(&self.0[3 - w].to_be_bytes());
        }
    }

    pub fn to_bytes(&self) -> [u8; ELEMENT_BYTES] {
        let mut out = [0u8; ELEMENT_BYTES];
        self.marshal(&mut out);
        out
    }

    /// Reads 32 big-endian bytes, rejecting anything not below p.
    ///
    /// The result is plain; call [`Canonical::encode`] to use it in arithmetic.
    pub fn unmarshal(bytes: &[u8; ELEMENT_BYTES]) -> Result<Self, FieldError> {
        let mut limbs = [0u64; 4];
        for w in 0..4 {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[8 * w..8 * w + 8]);
            limbs[3 - w] = u64::from_be_bytes(word);
        }
        check_range(&limbs)
            .inspect_err(|e| tracing::debug!(error = %e, "rejected field encoding"))?;
        Ok(Self(limbs))
    }

    /// Parses up to 64 hex digits, with or without a `0x` prefix.
    ///
    /// The value must already be below p; nothing is reduced.
    pub fn from_hex_str(s: &str) -> Result<Self, FieldError> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.is_empty() || hex.len() > 64 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FieldError::InvalidHex(s.to_string()));
        }
        let padded = format!("{hex:0>64}");
        let mut limbs = [0u64; 4];
        for w in 0..4 {
            limbs[3 - w] = u64::from_str_radix(&padded[16 * w..16 * w + 16], 16)
                .map_err(|_| FieldError::InvalidHex(s.to_string()))?;
        }
        check_range(&limbs)?;
        Ok(Self(limbs))
    }
}

/// Compares against the modulus from the top limb down, stopping at the first
/// limb that differs.
fn check_range(limbs: &Limbs) -> Result<(), FieldError> {
    for i in (0..4).rev() {
        if limbs[i] < MODULUS[i] {
            return Ok(());
        }
        if limbs[i] > MODULUS[i] {
            return Err(FieldError::ExceedsModulus);
        }
    }
    Err(FieldError::EqualsModulus)
}

/// 64 lowercase hex digits, most-significant limb first.
impl fmt::LowerHex for Canonical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:016x}{:016x}{:016x}{:016x}",
            self.0[3], self.0[2], self.0[1], self.0[0]
        )
    }
}

impl fmt::Display for Canonical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Canonical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Canonical(0x{self:x})")
    }
}
