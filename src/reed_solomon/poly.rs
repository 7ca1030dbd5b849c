//! Polynomials whose coefficients are elements of a [`GaloisField`]
//!
//! Coefficients are stored most-significant term first. The leading
//! coefficient is always nonzero, except for the zero polynomial `[0]`.
//! Every operation returns a new polynomial; none mutate in place.

use super::error::{FieldError, FieldResult};
use super::galois::{add_or_subtract, GaloisField};
use std::fmt;

/// Immutable polynomial over GF(2^m), borrowing the field it was built in
#[derive(Clone, PartialEq, Eq)]
pub struct FieldPolynomial<'f> {
    field: &'f GaloisField,
    coefficients: Vec<u16>,
}

impl<'f> FieldPolynomial<'f> {
    /// Build a polynomial from most-significant-first coefficients
    ///
    /// Leading zeros are stripped; all-zero input collapses to `0`.
    pub fn new(field: &'f GaloisField, coefficients: Vec<u16>) -> FieldResult<Self> {
        if coefficients.is_empty() {
            return Err(FieldError::EmptyCoefficients);
        }
        Ok(Self::from_normalized(field, coefficients))
    }

    pub(crate) fn constant(field: &'f GaloisField, value: u16) -> Self {
        Self {
            field,
            coefficients: vec![value],
        }
    }

    /// Strip leading zeros from a non-empty coefficient vector
    pub(crate) fn from_normalized(field: &'f GaloisField, mut coefficients: Vec<u16>) -> Self {
        if coefficients.len() > 1 && coefficients[0] == 0 {
            match coefficients.iter().position(|&c| c != 0) {
                Some(first_non_zero) => {
                    coefficients.drain(..first_non_zero);
                }
                None => return Self::constant(field, 0),
            }
        }
        if coefficients.is_empty() {
            return Self::constant(field, 0);
        }
        Self {
            field,
            coefficients,
        }
    }

    pub fn field(&self) -> &'f GaloisField {
        self.field
    }

    pub fn coefficients(&self) -> &[u16] {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<u16> {
        self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    /// Coefficient of the x^degree term (zero beyond the polynomial's degree)
    pub fn coefficient(&self, degree: usize) -> u16 {
        match self.degree().checked_sub(degree) {
            Some(index) => self.coefficients[index],
            None => 0,
        }
    }

    pub fn leading_coefficient(&self) -> u16 {
        self.coefficients[0]
    }

    /// Evaluate the polynomial at `point` using Horner's method
    pub fn evaluate_at(&self, point: u16) -> u16 {
        match point {
            0 => self.coefficient(0),
            // multiplying by 1 is the identity, so this is just the XOR sum
            1 => self
                .coefficients
                .iter()
                .fold(0, |acc, &c| add_or_subtract(acc, c)),
            _ => self.coefficients[1..]
                .iter()
                .fold(self.coefficients[0], |acc, &c| {
                    add_or_subtract(self.field.multiply(point, acc), c)
                }),
        }
    }

    fn check_same_field(&self, other: &Self) -> FieldResult<()> {
        if self.field != other.field {
            return Err(FieldError::FieldMismatch);
        }
        Ok(())
    }

    /// Sum (or difference, which is the same thing) of two polynomials
    pub fn add_or_subtract(&self, other: &Self) -> FieldResult<Self> {
        self.check_same_field(other)?;
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }

        let (smaller, larger) = if self.coefficients.len() > other.coefficients.len() {
            (&other.coefficients, &self.coefficients)
        } else {
            (&self.coefficients, &other.coefficients)
        };

        // High-order terms only present in the larger polynomial are copied
        let length_diff = larger.len() - smaller.len();
        let mut sum_diff = Vec::with_capacity(larger.len());
        sum_diff.extend_from_slice(&larger[..length_diff]);
        sum_diff.extend(
            larger[length_diff..]
                .iter()
                .zip(smaller)
                .map(|(&a, &b)| add_or_subtract(a, b)),
        );

        Ok(Self::from_normalized(self.field, sum_diff))
    }

    /// Product of two polynomials
    pub fn multiply(&self, other: &Self) -> FieldResult<Self> {
        self.check_same_field(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(self.field.zero());
        }

        let mut product = vec![0u16; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                product[i + j] = add_or_subtract(product[i + j], self.field.multiply(a, b));
            }
        }

        Ok(Self::from_normalized(self.field, product))
    }

    /// Scale every coefficient by `scalar`
    pub fn multiply_scalar(&self, scalar: u16) -> Self {
        match scalar {
            0 => self.field.zero(),
            1 => self.clone(),
            _ => {
                let product = self
                    .coefficients
                    .iter()
                    .map(|&c| self.field.multiply(c, scalar))
                    .collect();
                Self::from_normalized(self.field, product)
            }
        }
    }

    /// Multiply by `coefficient * x^degree`
    pub fn multiply_by_monomial(&self, degree: usize, coefficient: u16) -> Self {
        if coefficient == 0 {
            return self.field.zero();
        }
        let mut product = Vec::with_capacity(self.coefficients.len() + degree);
        product.extend(
            self.coefficients
                .iter()
                .map(|&c| self.field.multiply(c, coefficient)),
        );
        product.resize(self.coefficients.len() + degree, 0);
        Self::from_normalized(self.field, product)
    }

    /// Polynomial long division, returning `(quotient, remainder)`
    pub fn divide(&self, other: &Self) -> FieldResult<(Self, Self)> {
        self.check_same_field(other)?;
        if other.is_zero() {
            return Err(FieldError::DivideByZero);
        }

        let divisor_degree = other.degree();
        let inverse_leading_term = self.field.inverse(other.leading_coefficient());

        let mut quotient = vec![0u16; self.degree().saturating_sub(divisor_degree) + 1];
        let mut remainder = self.clone();

        while remainder.degree() >= divisor_degree && !remainder.is_zero() {
            let degree_difference = remainder.degree() - divisor_degree;
            let scale = self
                .field
                .multiply(remainder.leading_coefficient(), inverse_leading_term);
            let term = other.multiply_by_monomial(degree_difference, scale);

            let slot = quotient.len() - 1 - degree_difference;
            quotient[slot] = add_or_subtract(quotient[slot], scale);
            remainder = remainder.add_or_subtract(&term)?;
        }

        Ok((Self::from_normalized(self.field, quotient), remainder))
    }
}

impl fmt::Display for FieldPolynomial<'_> {
    /// Renders terms in α-power notation, e.g. `a^25x^2 + ax + 1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        let mut first = true;
        for degree in (0..=self.degree()).rev() {
            let coefficient = self.coefficient(degree);
            if coefficient == 0 {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;

            if degree == 0 || coefficient != 1 {
                match self.field.log(coefficient) {
                    0 => f.write_str("1")?,
                    1 => f.write_str("a")?,
                    power => write!(f, "a^{}", power)?,
                }
            }
            match degree {
                0 => {}
                1 => f.write_str("x")?,
                _ => write!(f, "x^{}", degree)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FieldPolynomial<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPolynomial")
            .field("field", &format_args!("{}", self.field))
            .field("coefficients", &self.coefficients)
            .finish()
    }
}
