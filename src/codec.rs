//! Block codec over arbitrary-length buffers
//!
//! A single Reed-Solomon codeword in a byte field holds at most `size - 1`
//! symbols. [`ReedSolomonCodec`] splits longer inputs into blocks of
//! [`CodecConfig::data_block_len`] bytes, protects each block independently
//! and concatenates the resulting codewords. Only the final block may be
//! short.

use crate::config::CodecConfig;
use crate::reed_solomon::{DecodeError, DecodeReport, Decoder, EncodeError, Encoder};
use log::{debug, info};
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid configuration: {0}")]
    Config(EncodeError),

    #[error("Invalid decoder configuration: {0}")]
    DecoderConfig(#[from] DecodeError),

    #[error("Block {block}: {source}")]
    Encode {
        block: usize,
        #[source]
        source: EncodeError,
    },

    #[error("Block {block}: {source}")]
    Decode {
        block: usize,
        #[source]
        source: DecodeError,
    },

    #[error("Trailing block of {len} bytes is not longer than the {parity} parity bytes")]
    TruncatedBlock { len: usize, parity: usize },

    #[error("Nothing to encode")]
    EmptyInput,
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Result of decoding a multi-block buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDecodeSummary {
    /// Recovered payload with parity stripped
    pub data: Vec<u8>,
    /// Blocks processed
    pub blocks: usize,
    /// Symbols corrected across all blocks
    pub errors_corrected: usize,
    /// Indices of blocks that needed correction
    pub repaired_blocks: Vec<usize>,
}

/// Encoder and decoder pair sharing one validated configuration
#[derive(Debug)]
pub struct ReedSolomonCodec {
    config: CodecConfig,
    encoder: Encoder<'static>,
    decoder: Decoder<'static>,
}

impl ReedSolomonCodec {
    pub fn new(config: CodecConfig) -> CodecResult<Self> {
        config.validate().map_err(CodecError::Config)?;
        let field = config.field.field();
        let encoder = Encoder::new(field).map_err(CodecError::Config)?;
        let decoder = Decoder::new(field)?;
        debug!(
            "Codec over {} with {} parity bytes per {}-byte block",
            config.field,
            config.parity_bytes,
            config.codeword_len()
        );
        Ok(Self {
            config,
            encoder,
            decoder,
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a single block
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>, EncodeError> {
        self.encoder.encode(payload, self.config.parity_bytes)
    }

    /// Decode a single codeword, returning it with errors corrected
    pub fn decode(&self, codeword: &[u8]) -> Result<DecodeReport, DecodeError> {
        self.decoder
            .decode_with_report(codeword, self.config.parity_bytes)
    }

    /// Split `data` into blocks and append parity to each one
    pub fn encode_blocks(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        if data.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        let blocks: Vec<&[u8]> = data.chunks(self.config.data_block_len()).collect();
        info!(
            "Encoding {} bytes in {} blocks",
            data.len(),
            blocks.len()
        );

        let encode_block = |(block, chunk): (usize, &&[u8])| {
            self.encode(chunk)
                .map_err(|source| CodecError::Encode { block, source })
        };
        let codewords: Vec<Vec<u8>> = if self.config.parallel {
            blocks
                .par_iter()
                .enumerate()
                .map(encode_block)
                .collect::<CodecResult<_>>()
        } else {
            blocks
                .iter()
                .enumerate()
                .map(encode_block)
                .collect::<CodecResult<_>>()
        }?;

        Ok(codewords.concat())
    }

    /// Split `data` into codewords, correct each one and strip the parity
    pub fn decode_blocks(&self, data: &[u8]) -> CodecResult<BlockDecodeSummary> {
        let parity = self.config.parity_bytes as usize;
        let blocks: Vec<&[u8]> = data.chunks(self.config.codeword_len()).collect();
        if let Some(last) = blocks.last() {
            if last.len() <= parity {
                return Err(CodecError::TruncatedBlock {
                    len: last.len(),
                    parity,
                });
            }
        }
        info!(
            "Decoding {} bytes in {} blocks",
            data.len(),
            blocks.len()
        );

        let decode_block = |(block, chunk): (usize, &&[u8])| {
            self.decode(chunk)
                .map_err(|source| CodecError::Decode { block, source })
        };
        let reports: Vec<DecodeReport> = if self.config.parallel {
            blocks
                .par_iter()
                .enumerate()
                .map(decode_block)
                .collect::<CodecResult<_>>()
        } else {
            blocks
                .iter()
                .enumerate()
                .map(decode_block)
                .collect::<CodecResult<_>>()
        }?;

        let mut summary = BlockDecodeSummary {
            blocks: reports.len(),
            ..Default::default()
        };
        for (block, report) in reports.iter().enumerate() {
            if !report.is_clean() {
                debug!(
                    "Block {}: corrected positions {:?}",
                    block, report.error_positions
                );
                summary.errors_corrected += report.errors_corrected();
                summary.repaired_blocks.push(block);
            }
            summary
                .data
                .extend_from_slice(report.payload(self.config.parity_bytes));
        }
        Ok(summary)
    }
}
