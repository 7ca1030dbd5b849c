//! Reed-Solomon Error Correction Module
//!
//! Forward error correction over GF(2^m). The stack is layered leaves first:
//! field arithmetic ([`galois`]), polynomials over the field ([`poly`]), and
//! the systematic [`encoder`] and syndrome-based [`decoder`] built on both.
//!
//! Encoding and decoding carry one field element per byte, so only fields
//! with at most 256 elements can be used by the codec layer. The algebra
//! itself supports any GF(2^m) with m ≤ 16.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod galois;
pub mod poly;

pub use decoder::{DecodeReport, Decoder};
pub use encoder::Encoder;
pub use error::{DecodeError, EncodeError, FieldError};
pub use galois::{
    add_or_subtract, qr_code_field, GaloisField, StandardField, AZTEC_DATA_8, MAXICODE_FIELD_64,
};
pub use poly::FieldPolynomial;
