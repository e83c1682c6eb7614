//! Fixed-width 4-limb arithmetic modulo the BN256 base-field prime.
//!
//! Every function here works on raw `[u64; 4]` limbs, least-significant limb
//! first. Inputs are assumed to be below [`MODULUS`]; outputs are always fully
//! reduced. Nothing in this module branches on limb values.

use crate::constants::{INV, MODULUS};

/// Four 64-bit limbs, least-significant first.
pub type Limbs = [u64; 4];

// ============================================================================
// Carry primitives
// ============================================================================

/// Add with carry: `(sum, carry_out) = a + b + carry_in`.
///
/// `carry_in` must be 0 or 1; `carry_out` is always 0 or 1.
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let tmp = a as u128 + b as u128 + carry as u128;
    (tmp as u64, (tmp >> 64) as u64)
}

/// Subtract with borrow: `(diff, borrow_out) = a - b - borrow_in`.
///
/// `borrow_in` must be 0 or 1; `borrow_out` is 1 iff the true result was negative.
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let tmp = (a as u128)
        .wrapping_sub(b as u128)
        .wrapping_sub(borrow as u128);
    (tmp as u64, (tmp >> 127) as u64)
}

/// Wide multiply-accumulate: `(lo, hi) = a * b + c + carry_in`.
///
/// The full result fits in 128 bits: `(2^64-1)^2 + 2 * (2^64-1) = 2^128 - 1`.
#[inline(always)]
pub const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let tmp = a as u128 * b as u128 + c as u128 + carry as u128;
    (tmp as u64, (tmp >> 64) as u64)
}

/// Selects `a` when `flag == 0` and `b` when `flag == 1`, without branching.
#[inline(always)]
pub fn select(a: &Limbs, b: &Limbs, flag: u64) -> Limbs {
    let mask = 0u64.wrapping_sub(flag);
    [
        (a[0] & !mask) | (b[0] & mask),
        (a[1] & !mask) | (b[1] & mask),
        (a[2] & !mask) | (b[2] & mask),
        (a[3] & !mask) | (b[3] & mask),
    ]
}

/// Subtracts the modulus once if `limbs >= p`, in constant time.
///
/// `hi` is an extra carry limb above the 256 bits (0 or 1); when set the value
/// is at least `2^256 > p` and the subtraction is always taken.
#[inline]
fn reduce_once(limbs: &Limbs, hi: u64) -> Limbs {
    let (r0, borrow) = sbb(limbs[0], MODULUS[0], 0);
    let (r1, borrow) = sbb(limbs[1], MODULUS[1], borrow);
    let (r2, borrow) = sbb(limbs[2], MODULUS[2], borrow);
    let (r3, borrow) = sbb(limbs[3], MODULUS[3], borrow);
    let (_, borrow) = sbb(hi, 0, borrow);

    // borrow = 1 means the value was below p: keep it.
    select(&[r0, r1, r2, r3], limbs, borrow)
}

// ============================================================================
// Additive group
// ============================================================================

/// `(a + b) mod p`.
#[inline]
pub fn add(a: &Limbs, b: &Limbs) -> Limbs {
    let (r0, carry) = adc(a[0], b[0], 0);
    let (r1, carry) = adc(a[1], b[1], carry);
    let (r2, carry) = adc(a[2], b[2], carry);
    let (r3, carry) = adc(a[3], b[3], carry);
    reduce_once(&[r0, r1, r2, r3], carry)
}

/// `(a - b) mod p`.
///
/// Computes the raw difference, then adds `p` back under a mask built from
/// the final borrow.
#[inline]
pub fn sub(a: &Limbs, b: &Limbs) -> Limbs {
    let (r0, borrow) = sbb(a[0], b[0], 0);
    let (r1, borrow) = sbb(a[1], b[1], borrow);
    let (r2, borrow) = sbb(a[2], b[2], borrow);
    let (r3, borrow) = sbb(a[3], b[3], borrow);

    let mask = 0u64.wrapping_sub(borrow);
    let (r0, carry) = adc(r0, MODULUS[0] & mask, 0);
    let (r1, carry) = adc(r1, MODULUS[1] & mask, carry);
    let (r2, carry) = adc(r2, MODULUS[2] & mask, carry);
    let (r3, _) = adc(r3, MODULUS[3] & mask, carry);
    [r0, r1, r2, r3]
}

/// `(p - a) mod p`, mapping zero to zero.
///
/// The same routine serves both representations: negation commutes with the
/// Montgomery factor.
#[inline]
pub fn neg(a: &Limbs) -> Limbs {
    let (r0, borrow) = sbb(MODULUS[0], a[0], 0);
    let (r1, borrow) = sbb(MODULUS[1], a[1], borrow);
    let (r2, borrow) = sbb(MODULUS[2], a[2], borrow);
    let (r3, _) = sbb(MODULUS[3], a[3], borrow);

    // p - 0 = p is not reduced; zero the result when the input is zero.
    let nonzero = a[0] | a[1] | a[2] | a[3];
    let mask = 0u64.wrapping_sub((nonzero | nonzero.wrapping_neg()) >> 63);
    [r0 & mask, r1 & mask, r2 & mask, r3 & mask]
}

// ============================================================================
// Montgomery multiplication (CIOS)
// ============================================================================

/// Montgomery multiplication: `a * b * R^-1 mod p` with `R = 2^256`.
///
/// Coarsely Integrated Operand Scanning: for each limb of `b` the partial
/// product `a * b[i]` is accumulated and one limb is immediately shifted out
/// by adding `m * p`, where `m = t[0] * (-p^-1) mod 2^64`. The running value
/// stays below `2p`, so a single conditional subtraction finishes the job.
///
/// Given two Montgomery-form operands the result is the Montgomery form of
/// their product; given one plain operand the Montgomery factor cancels, which
/// is how encoding (`* R^2`) and decoding (`* 1`) are expressed.
pub fn mont_mul(a: &Limbs, b: &Limbs) -> Limbs {
    let mut t = [0u64; 4];
    let mut t4 = 0u64;

    for &bi in b.iter() {
        // t += a * b[i]
        let (t0, carry) = mac(a[0], bi, t[0], 0);
        let (t1, carry) = mac(a[1], bi, t[1], carry);
        let (t2, carry) = mac(a[2], bi, t[2], carry);
        let (t3, carry) = mac(a[3], bi, t[3], carry);
        let (t4_, t5) = adc(t4, carry, 0);

        // t = (t + m * p) / 2^64
        let m = t0.wrapping_mul(INV);
        let (_, carry) = mac(m, MODULUS[0], t0, 0);
        let (n0, carry) = mac(m, MODULUS[1], t1, carry);
        let (n1, carry) = mac(m, MODULUS[2], t2, carry);
        let (n2, carry) = mac(m, MODULUS[3], t3, carry);
        let (n3, carry) = adc(t4_, carry, 0);

        t = [n0, n1, n2, n3];
        t4 = t5 + carry;
    }

    reduce_once(&t, t4)
}

/// `a * a * R^-1 mod p`.
#[inline]
pub fn mont_square(a: &Limbs) -> Limbs {
    mont_mul(a, a)
}
