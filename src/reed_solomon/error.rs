//! Error types for Galois field, encoding and decoding operations

use thiserror::Error;

/// Errors raised by field construction and polynomial arithmetic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Field size is not a power of two in 2..=65536
    #[error("Field size {0} must be a power of two between 2 and 65536")]
    InvalidSize(u32),

    /// Primitive polynomial was zero
    #[error("Primitive polynomial must be non-zero")]
    ZeroPrimitive,

    /// Primitive polynomial degree does not match log2(size)
    #[error("Primitive polynomial {primitive:#x} does not have the degree of GF({size})")]
    PrimitiveDegree { primitive: u32, size: u32 },

    /// Powers of 2 do not reach every nonzero element
    #[error("Polynomial {primitive:#x} is not primitive for GF({size})")]
    NotPrimitive { primitive: u32, size: u32 },

    /// Operands were built over different fields
    #[error("Polynomials do not belong to the same Galois field")]
    FieldMismatch,

    /// Division by the zero polynomial
    #[error("Cannot divide by the zero polynomial")]
    DivideByZero,

    /// A polynomial needs at least one coefficient
    #[error("Polynomial must have at least one coefficient")]
    EmptyCoefficients,

    /// No standard field with this name
    #[error("Unknown Galois field: {0}")]
    UnknownField(String),
}

/// Errors that can occur while encoding a payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("No error correction bytes requested")]
    ZeroParity,

    #[error("No data bytes provided")]
    EmptyPayload,

    /// Generator roots would wrap around the multiplicative group
    #[error("{parity} error correction bytes exceed what GF({size}) supports")]
    ParityTooLarge { parity: usize, size: u32 },

    /// Field elements do not fit in one byte
    #[error("GF({size}) elements cannot be carried one per byte")]
    UnsupportedField { size: u32 },

    /// Positions past `max` would share an error locator with earlier ones
    #[error("Codeword of {len} symbols exceeds the {max} positions the field can locate")]
    CodewordTooLong { len: usize, max: usize },

    #[error("Byte {value} at index {index} is not an element of GF({size})")]
    SymbolOutOfRange { index: usize, value: u8, size: u32 },

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Errors that can occur while decoding a codeword
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("No error correction bytes requested")]
    ZeroParity,

    #[error("Codeword of {len} bytes cannot hold {parity} error correction bytes")]
    ParityExceedsCodeword { parity: usize, len: usize },

    #[error("{parity} error correction bytes exceed what GF({size}) supports")]
    ParityTooLarge { parity: usize, size: u32 },

    #[error("GF({size}) elements cannot be carried one per byte")]
    UnsupportedField { size: u32 },

    #[error("Codeword of {len} symbols exceeds the {max} positions the field can locate")]
    CodewordTooLong { len: usize, max: usize },

    #[error("Byte {value} at index {index} is not an element of GF({size})")]
    SymbolOutOfRange { index: usize, value: u8, size: u32 },

    /// Euclidean algorithm reached a zero divisor early
    #[error("Cannot correct: r_{{i-1}} was zero")]
    VanishingRemainder,

    /// Error locator has no constant term
    #[error("Cannot correct: error locator sigma(0) was zero")]
    DegenerateLocator,

    /// Chien search found a different number of roots than the locator degree
    #[error("Cannot correct: error locator degree {degree} does not match {found} roots")]
    RootCountMismatch { degree: usize, found: usize },

    /// Syndromes were nonzero but the locator has no roots to correct
    #[error("Cannot correct: error locator has no roots")]
    LocatorWithoutRoots,

    /// An error location maps outside the codeword
    #[error("Cannot correct: bad error location (log {log}) for codeword of {len} bytes")]
    BadErrorLocation { log: usize, len: usize },

    /// Applying the corrections did not yield a valid codeword
    #[error("Cannot correct: syndromes remain nonzero after correction")]
    ResidualSyndromes,

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl DecodeError {
    /// True when the codeword carries more damage than the code can repair
    pub fn is_uncorrectable(&self) -> bool {
        matches!(
            self,
            DecodeError::VanishingRemainder
                | DecodeError::DegenerateLocator
                | DecodeError::RootCountMismatch { .. }
                | DecodeError::LocatorWithoutRoots
                | DecodeError::BadErrorLocation { .. }
                | DecodeError::ResidualSyndromes
        )
    }
}

pub type FieldResult<T> = std::result::Result<T, FieldError>;
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
