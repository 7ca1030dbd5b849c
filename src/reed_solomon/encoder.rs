//! Systematic Reed-Solomon encoder
//!
//! The codeword is the untouched payload followed by `parity_bytes` parity
//! symbols: the remainder of `payload(x) * x^parity_bytes` divided by the
//! generator `g(x) = (x - α^b)(x - α^(b+1))...(x - α^(b+parity_bytes-1))`,
//! where `b` is the field's generator base.

use super::error::{EncodeError, EncodeResult};
use super::galois::GaloisField;
use super::poly::FieldPolynomial;
use log::trace;
use std::sync::{PoisonError, RwLock};

/// Reed-Solomon encoder bound to one byte-sized field
///
/// Generator polynomials are memoised by degree. The cache sits behind an
/// `RwLock`, so one encoder can be shared between threads.
pub struct Encoder<'f> {
    field: &'f GaloisField,
    cached_generators: RwLock<Vec<FieldPolynomial<'f>>>,
}

impl<'f> Encoder<'f> {
    /// Create an encoder for a field whose elements fit in one byte
    pub fn new(field: &'f GaloisField) -> EncodeResult<Self> {
        if field.size() > 256 {
            return Err(EncodeError::UnsupportedField { size: field.size() });
        }
        Ok(Self {
            field,
            cached_generators: RwLock::new(vec![field.one()]),
        })
    }

    pub fn field(&self) -> &'f GaloisField {
        self.field
    }

    /// Generator polynomial of the given degree, extending the cache as needed
    pub fn generator(&self, degree: usize) -> EncodeResult<FieldPolynomial<'f>> {
        {
            let cache = self
                .cached_generators
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(generator) = cache.get(degree) {
                return Ok(generator.clone());
            }
        }

        let mut cache = self
            .cached_generators
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another thread may have grown the cache while we waited
        while cache.len() <= degree {
            let d = cache.len();
            let root = self
                .field
                .exp(d - 1 + self.field.generator_base() as usize);
            let factor = FieldPolynomial::new(self.field, vec![1, root])?;
            let next = cache[d - 1].multiply(&factor)?;
            cache.push(next);
        }
        trace!("Generator of degree {}: {}", degree, cache[degree]);
        Ok(cache[degree].clone())
    }

    /// Append `parity_bytes` Reed-Solomon parity symbols to `payload`
    pub fn encode(&self, payload: &[u8], parity_bytes: u16) -> EncodeResult<Vec<u8>> {
        let parity = parity_bytes as usize;
        if parity == 0 {
            return Err(EncodeError::ZeroParity);
        }
        if payload.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }
        let size = self.field.size();
        if parity >= size as usize {
            return Err(EncodeError::ParityTooLarge { parity, size });
        }
        if let Some((index, &value)) = payload
            .iter()
            .enumerate()
            .find(|(_, &b)| !self.field.contains(b as u32))
        {
            return Err(EncodeError::SymbolOutOfRange { index, value, size });
        }
        let max = size as usize - 1;
        if payload.len() + parity > max {
            return Err(EncodeError::CodewordTooLong {
                len: payload.len() + parity,
                max,
            });
        }

        let generator = self.generator(parity)?;
        let info = FieldPolynomial::new(self.field, payload.iter().map(|&b| b as u16).collect())?
            .multiply_by_monomial(parity, 1);
        let (_, remainder) = info.divide(&generator)?;

        let coefficients = remainder.into_coefficients();
        let num_zero_coefficients = parity - coefficients.len();

        let mut output = Vec::with_capacity(payload.len() + parity);
        output.extend_from_slice(payload);
        output.resize(payload.len() + num_zero_coefficients, 0);
        output.extend(coefficients.iter().map(|&c| c as u8));
        Ok(output)
    }
}

impl std::fmt::Debug for Encoder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .cached_generators
            .read()
            .map(|cache| cache.len())
            .unwrap_or(0);
        f.debug_struct("Encoder")
            .field("field", self.field)
            .field("cached_generators", &cached)
            .finish()
    }
}
