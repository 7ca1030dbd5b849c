//! Reed-Solomon decoder
//!
//! ## Decode steps
//!
//! 1. Syndromes: evaluate the received word at α^(b+i) for each parity
//!    position. All zero means the word is already a codeword.
//! 2. Key equation: the extended Euclidean algorithm on `x^n` and the
//!    syndrome polynomial yields the error locator σ and evaluator ω.
//! 3. Chien search: the inverses of σ's roots locate the errors.
//! 4. Forney's formula gives each error's magnitude.
//! 5. Corrections are XORed into a working copy, which must then have zero
//!    syndromes.
//!
//! Corrections are all-or-nothing: nothing is written until every location
//! and magnitude has been validated.

use super::error::{DecodeError, DecodeResult};
use super::galois::{add_or_subtract, GaloisField};
use super::poly::FieldPolynomial;
use log::{debug, trace};

/// Outcome of a successful decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    /// Corrected codeword, same length as the input
    pub data: Vec<u8>,
    /// Byte offsets that were corrected, empty when the input was clean
    pub error_positions: Vec<usize>,
}

impl DecodeReport {
    /// The corrected payload without its trailing parity
    pub fn payload(&self, parity_bytes: u16) -> &[u8] {
        let end = self.data.len().saturating_sub(parity_bytes as usize);
        &self.data[..end]
    }

    pub fn errors_corrected(&self) -> usize {
        self.error_positions.len()
    }

    pub fn is_clean(&self) -> bool {
        self.error_positions.is_empty()
    }
}

/// Reed-Solomon decoder bound to one byte-sized field
///
/// Holds no mutable state; each call works on its own copy of the input.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'f> {
    field: &'f GaloisField,
}

impl<'f> Decoder<'f> {
    pub fn new(field: &'f GaloisField) -> DecodeResult<Self> {
        if field.size() > 256 {
            return Err(DecodeError::UnsupportedField { size: field.size() });
        }
        Ok(Self { field })
    }

    pub fn field(&self) -> &'f GaloisField {
        self.field
    }

    /// Correct up to `parity_bytes / 2` corrupted symbols in `codeword`
    pub fn decode(&self, codeword: &[u8], parity_bytes: u16) -> DecodeResult<Vec<u8>> {
        self.decode_with_report(codeword, parity_bytes)
            .map(|report| report.data)
    }

    /// Like [`Decoder::decode`], also reporting which positions were corrected
    pub fn decode_with_report(
        &self,
        codeword: &[u8],
        parity_bytes: u16,
    ) -> DecodeResult<DecodeReport> {
        let received = self.received_polynomial(codeword, parity_bytes)?;
        let parity = parity_bytes as usize;

        let syndromes = self.compute_syndromes(&received, parity);
        if syndromes.iter().all(|&s| s == 0) {
            debug!("Codeword of {} bytes has no errors", codeword.len());
            return Ok(DecodeReport {
                data: codeword.to_vec(),
                error_positions: Vec::new(),
            });
        }
        trace!("Syndromes: {:?}", syndromes);

        // syndrome polynomial holds S_i as the coefficient of x^i
        let syndrome =
            FieldPolynomial::new(self.field, syndromes.iter().rev().copied().collect())?;
        let (sigma, omega) =
            self.run_euclidean_algorithm(self.field.build_monomial(parity, 1), syndrome, parity)?;
        trace!("Error locator: {}, evaluator: {}", sigma, omega);

        let error_locations = self.find_error_locations(&sigma)?;
        let error_magnitudes = self.find_error_magnitudes(&omega, &error_locations);

        let len = codeword.len();
        let error_positions = error_locations
            .iter()
            .map(|&location| {
                let log = self.field.log(location) as usize;
                if log >= len {
                    return Err(DecodeError::BadErrorLocation { log, len });
                }
                Ok(len - 1 - log)
            })
            .collect::<DecodeResult<Vec<usize>>>()?;

        let mut working: Vec<u16> = codeword.iter().map(|&b| b as u16).collect();
        for (&position, &magnitude) in error_positions.iter().zip(&error_magnitudes) {
            working[position] = add_or_subtract(working[position], magnitude);
        }

        let check = FieldPolynomial::new(self.field, working.clone())?;
        if self
            .compute_syndromes(&check, parity)
            .iter()
            .any(|&s| s != 0)
        {
            return Err(DecodeError::ResidualSyndromes);
        }

        debug!(
            "Corrected {} errors at positions {:?}",
            error_positions.len(),
            error_positions
        );
        Ok(DecodeReport {
            data: working.into_iter().map(|symbol| symbol as u8).collect(),
            error_positions,
        })
    }

    /// Syndromes S_0..S_(n-1) of `codeword`, all zero for a valid codeword
    pub fn syndromes(&self, codeword: &[u8], parity_bytes: u16) -> DecodeResult<Vec<u16>> {
        let received = self.received_polynomial(codeword, parity_bytes)?;
        Ok(self.compute_syndromes(&received, parity_bytes as usize))
    }

    fn received_polynomial(
        &self,
        codeword: &[u8],
        parity_bytes: u16,
    ) -> DecodeResult<FieldPolynomial<'f>> {
        let parity = parity_bytes as usize;
        let size = self.field.size();
        if parity == 0 {
            return Err(DecodeError::ZeroParity);
        }
        if codeword.len() < parity {
            return Err(DecodeError::ParityExceedsCodeword {
                parity,
                len: codeword.len(),
            });
        }
        if parity >= size as usize {
            return Err(DecodeError::ParityTooLarge { parity, size });
        }
        let max = size as usize - 1;
        if codeword.len() > max {
            return Err(DecodeError::CodewordTooLong {
                len: codeword.len(),
                max,
            });
        }
        if let Some((index, &value)) = codeword
            .iter()
            .enumerate()
            .find(|(_, &b)| !self.field.contains(b as u32))
        {
            return Err(DecodeError::SymbolOutOfRange { index, value, size });
        }

        Ok(FieldPolynomial::new(
            self.field,
            codeword.iter().map(|&b| b as u16).collect(),
        )?)
    }

    fn compute_syndromes(&self, received: &FieldPolynomial<'f>, parity: usize) -> Vec<u16> {
        let base = self.field.generator_base() as usize;
        (0..parity)
            .map(|i| received.evaluate_at(self.field.exp(i + base)))
            .collect()
    }

    /// Solve the key equation, returning `(sigma, omega)`
    fn run_euclidean_algorithm(
        &self,
        a: FieldPolynomial<'f>,
        b: FieldPolynomial<'f>,
        parity: usize,
    ) -> DecodeResult<(FieldPolynomial<'f>, FieldPolynomial<'f>)> {
        let (mut r_last, mut r) = if a.degree() < b.degree() {
            (b, a)
        } else {
            (a, b)
        };
        let mut t_last = self.field.zero();
        let mut t = self.field.one();

        // Run until r's degree is less than parity / 2
        while r.degree() >= parity / 2 {
            let r_last_last = std::mem::replace(&mut r_last, r);
            let t_last_last = std::mem::replace(&mut t_last, t);

            // Divide r_last_last by r_last, quotient in q and remainder in r
            if r_last.is_zero() {
                return Err(DecodeError::VanishingRemainder);
            }
            r = r_last_last;
            let mut q = self.field.zero();
            let denominator_leading_term = r_last.leading_coefficient();
            let dlt_inverse = self.field.inverse(denominator_leading_term);
            while r.degree() >= r_last.degree() && !r.is_zero() {
                let degree_diff = r.degree() - r_last.degree();
                let scale = self.field.multiply(r.leading_coefficient(), dlt_inverse);
                q = q.add_or_subtract(&self.field.build_monomial(degree_diff, scale))?;
                r = r.add_or_subtract(&r_last.multiply_by_monomial(degree_diff, scale))?;
            }

            t = q.multiply(&t_last)?.add_or_subtract(&t_last_last)?;
        }

        let sigma_tilde_at_zero = t.coefficient(0);
        if sigma_tilde_at_zero == 0 {
            return Err(DecodeError::DegenerateLocator);
        }

        let inverse = self.field.inverse(sigma_tilde_at_zero);
        let sigma = t.multiply_scalar(inverse);
        let omega = r.multiply_scalar(inverse);
        Ok((sigma, omega))
    }

    /// Chien search over every nonzero element
    fn find_error_locations(&self, error_locator: &FieldPolynomial<'f>) -> DecodeResult<Vec<u16>> {
        let num_errors = error_locator.degree();
        if num_errors == 0 {
            return Err(DecodeError::LocatorWithoutRoots);
        }
        if num_errors == 1 {
            return Ok(vec![error_locator.coefficient(1)]);
        }

        let mut result = Vec::with_capacity(num_errors);
        for i in 1..self.field.size() {
            if result.len() >= num_errors {
                break;
            }
            let element = i as u16;
            if error_locator.evaluate_at(element) == 0 {
                result.push(self.field.inverse(element));
            }
        }

        if result.len() != num_errors {
            return Err(DecodeError::RootCountMismatch {
                degree: num_errors,
                found: result.len(),
            });
        }
        Ok(result)
    }

    /// Forney's formula for each located error
    fn find_error_magnitudes(
        &self,
        error_evaluator: &FieldPolynomial<'f>,
        error_locations: &[u16],
    ) -> Vec<u16> {
        let shifted_basis = self.field.generator_base() != 0;
        error_locations
            .iter()
            .enumerate()
            .map(|(i, &location)| {
                let xi_inverse = self.field.inverse(location);
                let denominator = error_locations
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold(1u16, |denominator, (_, &other)| {
                        // 1 + term, written as a low-bit flip
                        let term = self.field.multiply(other, xi_inverse);
                        let term_plus_1 = if term & 0x1 == 0 { term | 1 } else { term & !1 };
                        self.field.multiply(denominator, term_plus_1)
                    });
                let magnitude = self.field.multiply(
                    error_evaluator.evaluate_at(xi_inverse),
                    self.field.inverse(denominator),
                );
                if shifted_basis {
                    self.field.multiply(magnitude, xi_inverse)
                } else {
                    magnitude
                }
            })
            .collect()
    }
}
