use thiserror::Error;

/// Errors from decoding, converting, or taking square roots of field elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FieldError {
    /// The decoded integer is strictly greater than p.
    #[error("bn256: coordinate exceeds modulus")]
    ExceedsModulus,
    /// The decoded integer is exactly p.
    #[error("bn256: coordinate equals modulus")]
    EqualsModulus,
    /// Input slice is not exactly one element wide.
    #[error("bn256: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("bn256: invalid hex string: {0}")]
    InvalidHex(String),
    /// Converting out of Montgomery form into a big integer failed.
    #[error("bn256: failed conversion")]
    Conversion,
    /// The element is a quadratic non-residue.
    #[error("bn256: no square root")]
    NoSquareRoot,
}

impl FieldError {
    /// True for the two ways an encoding can fall outside `[0, p)`.
    pub fn is_range_error(&self) -> bool {
        matches!(self, FieldError::ExceedsModulus | FieldError::EqualsModulus)
    }
}
