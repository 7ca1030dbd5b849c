//! Polynomial Arithmetic Tests
//!
//! Tests for FieldPolynomial evaluation, arithmetic, division and rendering
//! through the public API.

use rsfec::reed_solomon::galois::{qr_code_field, GaloisField, StandardField};
use rsfec::reed_solomon::{FieldError, FieldPolynomial};

fn poly(coefficients: &[u16]) -> FieldPolynomial<'static> {
    FieldPolynomial::new(qr_code_field(), coefficients.to_vec()).unwrap()
}

#[test]
fn test_monomial_construction() {
    let gf = qr_code_field();
    let m = gf.build_monomial(3, 7);
    assert_eq!(m.coefficients(), &[7, 0, 0, 0]);
    assert_eq!(m.degree(), 3);
    assert!(gf.build_monomial(5, 0).is_zero());
    assert_eq!(gf.one().coefficients(), &[1]);
}

#[test]
fn test_evaluate_matches_naive_sum() {
    let gf = qr_code_field();
    let p = poly(&[3, 0, 17, 200, 1]);
    for x in [2u16, 3, 29, 142, 255] {
        let mut expected = 0u16;
        let mut power = 1u16;
        for degree in 0..=p.degree() {
            expected ^= gf.multiply(p.coefficient(degree), power);
            power = gf.multiply(power, x);
        }
        assert_eq!(p.evaluate_at(x), expected, "at {}", x);
    }
}

#[test]
fn test_shift_by_monomial() {
    let p = poly(&[1, 2]);
    assert_eq!(p.multiply_by_monomial(2, 1).coefficients(), &[1, 2, 0, 0]);
    assert_eq!(p.multiply_by_monomial(0, 2).coefficients(), &[2, 4]);
    assert!(p.multiply_by_monomial(4, 0).is_zero());
}

#[test]
fn test_divide_exact_product() {
    let a = poly(&[1, 7, 9]);
    let b = poly(&[3, 200]);
    let product = a.multiply(&b).unwrap();

    let (quotient, remainder) = product.divide(&b).unwrap();
    assert_eq!(quotient, a);
    assert!(remainder.is_zero());
}

#[test]
fn test_divide_with_remainder() {
    let dividend = poly(&[5, 0, 0, 1, 9]);
    let divisor = poly(&[1, 4, 2]);
    let (quotient, remainder) = dividend.divide(&divisor).unwrap();

    assert!(remainder.degree() < divisor.degree());
    let rebuilt = divisor
        .multiply(&quotient)
        .unwrap()
        .add_or_subtract(&remainder)
        .unwrap();
    assert_eq!(rebuilt, dividend);
}

#[test]
fn test_divide_lower_degree_dividend() {
    let (quotient, remainder) = poly(&[4, 4]).divide(&poly(&[1, 0, 0])).unwrap();
    assert!(quotient.is_zero());
    assert_eq!(remainder, poly(&[4, 4]));
}

#[test]
fn test_divide_by_zero_fails() {
    let zero = qr_code_field().zero();
    assert_eq!(poly(&[1, 2]).divide(&zero), Err(FieldError::DivideByZero));
}

#[test]
fn test_mixed_fields_are_rejected() {
    let other = StandardField::DataMatrix256.field();
    let foreign = FieldPolynomial::new(other, vec![1, 1]).unwrap();
    let local = poly(&[1, 1]);

    assert_eq!(local.add_or_subtract(&foreign), Err(FieldError::FieldMismatch));
    assert_eq!(local.multiply(&foreign), Err(FieldError::FieldMismatch));
    assert_eq!(local.divide(&foreign), Err(FieldError::FieldMismatch));
}

#[test]
fn test_equal_fields_from_different_instances() {
    // a separately built copy of the QR field interoperates with the shared one
    let copy = GaloisField::new(0x11D, 256).unwrap();
    let p = FieldPolynomial::new(&copy, vec![1, 3]).unwrap();
    let q = poly(&[1, 3]);
    assert!(p.add_or_subtract(&q).unwrap().is_zero());
}

#[test]
fn test_display_uses_alpha_powers() {
    assert_eq!(poly(&[0]).to_string(), "0");
    assert_eq!(poly(&[1, 3, 2]).to_string(), "x^2 + a^25x + a");
    assert_eq!(poly(&[2, 0, 1]).to_string(), "ax^2 + 1");
    assert_eq!(poly(&[29]).to_string(), "a^8");
}
