//! Encoding and Decoding Scenarios
//!
//! Known-answer vectors from the barcode standards plus targeted corruption
//! cases for the systematic encoder and the syndrome decoder.

use rsfec::reed_solomon::galois::{qr_code_field, StandardField};
use rsfec::reed_solomon::{DecodeError, Decoder, EncodeError, Encoder};

fn round_trip(field: StandardField, payload: &[u8], parity: u16) -> Vec<u8> {
    let gf = field.field();
    let codeword = Encoder::new(gf).unwrap().encode(payload, parity).unwrap();
    Decoder::new(gf).unwrap().decode(&codeword, parity).unwrap()
}

// ============================================================================
// Known-answer vectors
// ============================================================================

#[test]
fn test_qr_code_version_1m_parity() {
    // "01234567" in a version 1-M symbol
    let data = [
        0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC,
        0x11,
    ];
    let parity = [0xA5, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55];

    let encoder = Encoder::new(qr_code_field()).unwrap();
    let codeword = encoder.encode(&data, 10).unwrap();
    assert_eq!(&codeword[..16], &data);
    assert_eq!(&codeword[16..], &parity);
}

#[test]
fn test_data_matrix_parity() {
    let data = [142, 164, 186];
    let parity = [114, 25, 5, 88, 102];

    let encoder = Encoder::new(StandardField::DataMatrix256.field()).unwrap();
    let codeword = encoder.encode(&data, 5).unwrap();
    assert_eq!(&codeword[3..], &parity);
}

// ============================================================================
// Concrete scenario
// ============================================================================

#[test]
fn test_three_byte_payload_single_flip() {
    let gf = qr_code_field();
    let encoder = Encoder::new(gf).unwrap();
    let decoder = Decoder::new(gf).unwrap();

    let codeword = encoder.encode(&[64, 65, 66], 2).unwrap();
    assert_eq!(codeword.len(), 5);

    for position in 0..codeword.len() {
        for flip in [0x01u8, 0x80, 0xFF] {
            let mut received = codeword.clone();
            received[position] ^= flip;
            let decoded = decoder.decode(&received, 2).unwrap();
            assert_eq!(&decoded[..3], &[64, 65, 66]);
            assert_eq!(decoded, codeword);
        }
    }
}

// ============================================================================
// Correction and detection
// ============================================================================

#[test]
fn test_clean_codeword_reports_no_positions() {
    let gf = qr_code_field();
    let codeword = Encoder::new(gf)
        .unwrap()
        .encode(b"no errors here", 8)
        .unwrap();
    let decoder = Decoder::new(gf).unwrap();

    assert!(decoder.syndromes(&codeword, 8).unwrap().iter().all(|&s| s == 0));
    let report = decoder.decode_with_report(&codeword, 8).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.data, codeword);
    assert_eq!(report.payload(8), b"no errors here");
}

#[test]
fn test_report_lists_corrected_positions() {
    let gf = qr_code_field();
    let codeword = Encoder::new(gf).unwrap().encode(&[9; 40], 12).unwrap();
    let mut received = codeword.clone();
    for &position in &[0usize, 17, 39, 40, 51] {
        received[position] ^= 0x3C;
    }

    let report = Decoder::new(gf)
        .unwrap()
        .decode_with_report(&received, 12)
        .unwrap();
    let mut positions = report.error_positions.clone();
    positions.sort_unstable();
    assert_eq!(positions, vec![0, 17, 39, 40, 51]);
    assert_eq!(report.errors_corrected(), 5);
    assert_eq!(report.data, codeword);
}

#[test]
fn test_full_length_codeword() {
    let gf = qr_code_field();
    let payload: Vec<u8> = (0..223u32).map(|i| (i * 31 % 256) as u8).collect();
    let codeword = Encoder::new(gf).unwrap().encode(&payload, 32).unwrap();
    assert_eq!(codeword.len(), 255);

    let mut received = codeword.clone();
    for i in 0..16 {
        received[i * 15] ^= (i as u8) + 1;
    }
    assert_eq!(Decoder::new(gf).unwrap().decode(&received, 32).unwrap(), codeword);
}

#[test]
fn test_every_byte_field_round_trips() {
    let payload = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
    assert_eq!(&round_trip(StandardField::QrCode256, &payload, 6)[..9], &payload);
    assert_eq!(&round_trip(StandardField::DataMatrix256, &payload, 6)[..9], &payload);
    assert_eq!(&round_trip(StandardField::AztecData6, &payload, 6)[..9], &payload);
    assert_eq!(&round_trip(StandardField::AztecParam, &payload, 5)[..9], &payload);
}

#[test]
fn test_data_matrix_corrects_errors() {
    let gf = StandardField::DataMatrix256.field();
    let codeword = Encoder::new(gf).unwrap().encode(b"DATA MATRIX", 10).unwrap();
    let mut received = codeword.clone();
    received[1] ^= 0x44;
    received[6] ^= 0x01;
    received[12] ^= 0x99;
    received[20] ^= 0x10;
    assert_eq!(Decoder::new(gf).unwrap().decode(&received, 10).unwrap(), codeword);
}

#[test]
fn test_uncorrectable_never_returns_wrong_data() {
    let gf = qr_code_field();
    let codeword = Encoder::new(gf).unwrap().encode(&[0x55; 100], 20).unwrap();
    let decoder = Decoder::new(gf).unwrap();

    for start in 0..10 {
        let mut received = codeword.clone();
        for i in 0..15 {
            received[start + i * 7] ^= 0xA7;
        }
        match decoder.decode(&received, 20) {
            Ok(decoded) => assert_eq!(decoded, codeword),
            Err(err) => assert!(err.is_uncorrectable(), "unexpected error {:?}", err),
        }
    }
}

// ============================================================================
// Argument validation
// ============================================================================

#[test]
fn test_wide_fields_rejected() {
    let gf = StandardField::AztecData12.field();
    assert_eq!(
        Encoder::new(gf).err(),
        Some(EncodeError::UnsupportedField { size: 4096 })
    );
    assert!(matches!(
        Decoder::new(gf),
        Err(DecodeError::UnsupportedField { size: 4096 })
    ));
}

#[test]
fn test_decode_argument_errors() {
    let decoder = Decoder::new(qr_code_field()).unwrap();
    assert_eq!(decoder.decode(&[1, 2, 3], 0), Err(DecodeError::ZeroParity));
    assert_eq!(
        decoder.decode(&[1, 2], 3),
        Err(DecodeError::ParityExceedsCodeword { parity: 3, len: 2 })
    );

    let small = Decoder::new(StandardField::AztecParam.field()).unwrap();
    assert!(matches!(
        small.decode(&[1, 2, 3, 200], 2),
        Err(DecodeError::SymbolOutOfRange {
            index: 3,
            value: 200,
            ..
        })
    ));
}
