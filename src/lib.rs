pub mod args;
pub mod codec;
pub mod config;
pub mod reed_solomon;

pub use args::parse_args;
pub use codec::{BlockDecodeSummary, CodecError, ReedSolomonCodec};
pub use config::CodecConfig;
pub use reed_solomon::{
    DecodeError, Decoder, EncodeError, Encoder, FieldError, FieldPolynomial, GaloisField,
    StandardField,
};
