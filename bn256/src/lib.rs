//! Arithmetic in the base field of the BN256 pairing-friendly curve.
//!
//! [`FieldElement`] keeps values in Montgomery form and provides the
//! multiplication, addition, negation, inversion and byte encoding that curve
//! and pairing code is built on. [`Canonical`] is the plain form used on the
//! wire. Square roots fall back to `num-bigint`.

pub mod arith;
pub mod bigint;
pub mod canonical;
pub mod constants;
pub mod error;
pub mod field;
#[cfg(feature = "serde")]
mod serde;

pub use canonical::Canonical;
pub use constants::{modulus, ELEMENT_BYTES, MODULUS};
pub use error::FieldError;
pub use field::FieldElement;
