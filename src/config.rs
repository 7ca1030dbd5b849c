//! Configuration for encode/decode operations

use crate::reed_solomon::{EncodeError, StandardField};

/// Configuration for the block codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Parity symbols appended to every block
    pub parity_bytes: u16,
    /// Field used for all arithmetic
    pub field: StandardField,
    /// Number of threads for computation (0 = auto-detect)
    pub threads: usize,
    /// Whether blocks are processed in parallel
    pub parallel: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            parity_bytes: 10,
            field: StandardField::QrCode256,
            threads: 0, // Auto-detect CPU cores
            parallel: true,
        }
    }
}

impl CodecConfig {
    pub fn new(parity_bytes: u16, field: StandardField) -> Self {
        Self {
            parity_bytes,
            field,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, threads: usize, parallel: bool) -> Self {
        self.threads = threads;
        self.parallel = parallel;
        self
    }

    pub fn from_args(matches: &clap::ArgMatches) -> Self {
        let defaults = Self::default();

        let parity_bytes = matches
            .get_one::<u16>("parity")
            .copied()
            .unwrap_or(defaults.parity_bytes);

        let field = matches
            .get_one::<StandardField>("field")
            .copied()
            .unwrap_or(defaults.field);

        let threads = matches
            .get_one::<String>("threads")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        let parallel = !matches.get_flag("no-parallel");

        Self::new(parity_bytes, field).with_threads(threads, parallel)
    }

    /// Get effective thread count (auto-detect if 0)
    pub fn effective_threads(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1, // Sequential mode always uses single thread
            (true, 0) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4), // Auto-detect CPU cores
            (true, n) => n,
        }
    }

    /// Largest payload per block that keeps every position locatable
    pub fn data_block_len(&self) -> usize {
        (self.field.size() as usize - 1).saturating_sub(self.parity_bytes as usize)
    }

    /// Full codeword length for one block
    pub fn codeword_len(&self) -> usize {
        self.data_block_len() + self.parity_bytes as usize
    }

    /// Check the configuration can produce at least one data byte per block
    pub fn validate(&self) -> Result<(), EncodeError> {
        let size = self.field.size();
        if self.parity_bytes == 0 {
            return Err(EncodeError::ZeroParity);
        }
        if size > 256 {
            return Err(EncodeError::UnsupportedField { size });
        }
        if self.data_block_len() == 0 {
            return Err(EncodeError::ParityTooLarge {
                parity: self.parity_bytes as usize,
                size,
            });
        }
        Ok(())
    }

    /// Size the global rayon pool to `effective_threads()`
    pub fn configure_thread_pool(&self) {
        let threads = self.effective_threads();
        if let Err(err) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            log::warn!("Could not set thread count to {}: {}", threads, err);
        }
    }
}
