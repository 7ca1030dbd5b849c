//! Galois Field GF(2^m) arithmetic for Reed-Solomon operations
//!
//! A [`GaloisField`] is defined by its size (a power of two, at most 2^16) and
//! a primitive polynomial whose bits encode its coefficients. Log and antilog
//! tables are built once when the field is constructed, using α = 2 as the
//! generator element; afterwards the field is immutable and can be shared
//! freely between threads.
//!
//! ## Standard fields
//!
//! | Field | Polynomial | Size |
//! |---|---|---|
//! | Aztec data 12 | x¹² + x⁶ + x⁵ + x³ + 1 (0x1069) | 4096 |
//! | Aztec data 10 | x¹⁰ + x³ + 1 (0x409) | 1024 |
//! | Aztec data 6 | x⁶ + x + 1 (0x43) | 64 |
//! | Aztec param | x⁴ + x + 1 (0x13) | 16 |
//! | QR code | x⁸ + x⁴ + x³ + x² + 1 (0x11D) | 256 |
//! | Data Matrix | x⁸ + x⁵ + x³ + x² + 1 (0x12D) | 256 |
//!
//! The standard tables are built on first use behind a [`OnceLock`], so
//! concurrent first access still builds each table exactly once.

use super::error::{FieldError, FieldResult};
use super::poly::FieldPolynomial;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Largest supported field, GF(2^16)
pub const MAX_FIELD_SIZE: u32 = 1 << 16;

/// Add or subtract two field elements. Both are XOR in characteristic 2.
#[inline]
pub fn add_or_subtract(a: u16, b: u16) -> u16 {
    a ^ b
}

/// Precomputed log/antilog tables for one GF(size)
#[derive(Clone)]
pub struct GaloisField {
    size: u32,
    primitive: u32,
    generator_base: u32,
    exp_table: Vec<u16>,
    log_table: Vec<u16>,
}

impl GaloisField {
    /// Create GF(size) from a primitive polynomial
    ///
    /// `primitive` must have degree exactly log2(size), and powers of 2 must
    /// reach every nonzero element.
    pub fn new(primitive: u32, size: u32) -> FieldResult<Self> {
        Self::with_generator_base(primitive, size, 0)
    }

    /// Create GF(size) whose Reed-Solomon generator starts at α^generator_base
    pub fn with_generator_base(primitive: u32, size: u32, generator_base: u32) -> FieldResult<Self> {
        if !(2..=MAX_FIELD_SIZE).contains(&size) || !size.is_power_of_two() {
            return Err(FieldError::InvalidSize(size));
        }
        if primitive == 0 {
            return Err(FieldError::ZeroPrimitive);
        }
        if primitive < size || primitive >= size << 1 {
            return Err(FieldError::PrimitiveDegree { primitive, size });
        }

        let (exp_table, log_table) = build_tables(primitive, size)?;

        Ok(Self {
            size,
            primitive,
            generator_base,
            exp_table,
            log_table,
        })
    }

    /// Number of elements in the field
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Bit-packed primitive polynomial
    #[inline]
    pub fn primitive(&self) -> u32 {
        self.primitive
    }

    /// Exponent of the first generator root, α^generator_base
    #[inline]
    pub fn generator_base(&self) -> u32 {
        self.generator_base
    }

    /// 2 raised to the power `a`
    ///
    /// # Panics
    /// Panics if `a >= size`.
    #[inline]
    pub fn exp(&self, a: usize) -> u16 {
        self.exp_table[a]
    }

    /// Base-2 logarithm of `a`
    ///
    /// # Panics
    /// Panics if `a` is zero, which has no logarithm.
    #[inline]
    pub fn log(&self, a: u16) -> u16 {
        if a == 0 {
            panic!("Cannot take the logarithm of zero in GF({})", self.size);
        }
        self.log_table[a as usize]
    }

    /// Multiplicative inverse of `a`
    ///
    /// # Panics
    /// Panics if `a` is zero.
    #[inline]
    pub fn inverse(&self, a: u16) -> u16 {
        if a == 0 {
            panic!("Cannot invert zero in GF({})", self.size);
        }
        let log_a = self.log_table[a as usize] as usize;
        self.exp_table[self.size as usize - log_a - 1]
    }

    /// Multiply two elements of the field
    ///
    /// Antilog indices repeat with period size-1, so the sum of two logs is
    /// folded back into range without a second modulo.
    ///
    /// # Panics
    /// Panics if either operand is not an element of the field.
    #[inline]
    pub fn multiply(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        let size = self.size as usize;
        let log_sum = self.log_table[a as usize] as usize + self.log_table[b as usize] as usize;
        self.exp_table[(log_sum % size) + log_sum / size]
    }

    /// True if `value` is an element of this field
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        value < self.size
    }

    /// The additive identity polynomial, `0`
    pub fn zero(&self) -> FieldPolynomial<'_> {
        FieldPolynomial::constant(self, 0)
    }

    /// The multiplicative identity polynomial, `1`
    pub fn one(&self) -> FieldPolynomial<'_> {
        FieldPolynomial::constant(self, 1)
    }

    /// The monomial `coefficient * x^degree`
    pub fn build_monomial(&self, degree: usize, coefficient: u16) -> FieldPolynomial<'_> {
        if coefficient == 0 {
            return self.zero();
        }
        let mut coefficients = vec![0u16; degree + 1];
        coefficients[0] = coefficient;
        FieldPolynomial::from_normalized(self, coefficients)
    }
}

/// Fill the antilog table by repeated doubling, then invert it
fn build_tables(primitive: u32, size: u32) -> FieldResult<(Vec<u16>, Vec<u16>)> {
    let count = size as usize;
    let mut exp_table = vec![0u16; count];
    let mut log_table = vec![0u16; count];

    let mut x = 1u32;
    for slot in exp_table.iter_mut() {
        *slot = x as u16;
        x <<= 1;
        if x >= size {
            x ^= primitive;
            x &= size - 1;
        }
    }

    // log_table[0] stays 0 but is never read
    let mut seen = vec![false; count];
    for (i, &value) in exp_table.iter().take(count - 1).enumerate() {
        let value = value as usize;
        if value == 0 || seen[value] {
            return Err(FieldError::NotPrimitive { primitive, size });
        }
        seen[value] = true;
        log_table[value] = i as u16;
    }

    Ok((exp_table, log_table))
}

impl PartialEq for GaloisField {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.size == other.size
                && self.primitive == other.primitive
                && self.generator_base == other.generator_base)
    }
}

impl Eq for GaloisField {}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaloisField")
            .field("size", &self.size)
            .field("primitive", &format_args!("{:#x}", self.primitive))
            .field("generator_base", &self.generator_base)
            .finish()
    }
}

impl fmt::Display for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({}) mod {:#x}", self.size, self.primitive)
    }
}

// ============================================================================
// Named standard fields
// ============================================================================

/// Preconfigured fields used by 2D barcode standards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardField {
    AztecData12,
    AztecData10,
    AztecData6,
    AztecParam,
    #[default]
    QrCode256,
    DataMatrix256,
}

/// Aztec 8-bit data words share the Data Matrix field
pub const AZTEC_DATA_8: StandardField = StandardField::DataMatrix256;

/// MaxiCode shares the Aztec 6-bit field
pub const MAXICODE_FIELD_64: StandardField = StandardField::AztecData6;

impl StandardField {
    pub const ALL: [StandardField; 6] = [
        StandardField::AztecData12,
        StandardField::AztecData10,
        StandardField::AztecData6,
        StandardField::AztecParam,
        StandardField::QrCode256,
        StandardField::DataMatrix256,
    ];

    pub fn primitive(self) -> u32 {
        match self {
            StandardField::AztecData12 => 0x1069,
            StandardField::AztecData10 => 0x409,
            StandardField::AztecData6 => 0x43,
            StandardField::AztecParam => 0x13,
            StandardField::QrCode256 => 0x011D,
            StandardField::DataMatrix256 => 0x012D,
        }
    }

    pub fn size(self) -> u32 {
        match self {
            StandardField::AztecData12 => 4096,
            StandardField::AztecData10 => 1024,
            StandardField::AztecData6 => 64,
            StandardField::AztecParam => 16,
            StandardField::QrCode256 | StandardField::DataMatrix256 => 256,
        }
    }

    /// Data Matrix syndromes are taken at α^1..α^n instead of α^0..α^(n-1)
    pub fn generator_base(self) -> u32 {
        match self {
            StandardField::DataMatrix256 => 1,
            _ => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StandardField::AztecData12 => "aztec-data-12",
            StandardField::AztecData10 => "aztec-data-10",
            StandardField::AztecData6 => "aztec-data-6",
            StandardField::AztecParam => "aztec-param",
            StandardField::QrCode256 => "qr-code-256",
            StandardField::DataMatrix256 => "data-matrix-256",
        }
    }

    /// The shared field instance, built on first access
    pub fn field(self) -> &'static GaloisField {
        self.slot().get_or_init(|| {
            GaloisField::with_generator_base(self.primitive(), self.size(), self.generator_base())
                .unwrap_or_else(|err| panic!("Standard field {} is invalid: {}", self, err))
        })
    }

    fn slot(self) -> &'static OnceLock<GaloisField> {
        static AZTEC_DATA_12: OnceLock<GaloisField> = OnceLock::new();
        static AZTEC_DATA_10: OnceLock<GaloisField> = OnceLock::new();
        static AZTEC_DATA_6: OnceLock<GaloisField> = OnceLock::new();
        static AZTEC_PARAM: OnceLock<GaloisField> = OnceLock::new();
        static QR_CODE_FIELD_256: OnceLock<GaloisField> = OnceLock::new();
        static DATA_MATRIX_FIELD_256: OnceLock<GaloisField> = OnceLock::new();

        match self {
            StandardField::AztecData12 => &AZTEC_DATA_12,
            StandardField::AztecData10 => &AZTEC_DATA_10,
            StandardField::AztecData6 => &AZTEC_DATA_6,
            StandardField::AztecParam => &AZTEC_PARAM,
            StandardField::QrCode256 => &QR_CODE_FIELD_256,
            StandardField::DataMatrix256 => &DATA_MATRIX_FIELD_256,
        }
    }
}

impl fmt::Display for StandardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "aztec-data-12" => Ok(StandardField::AztecData12),
            "aztec-data-10" => Ok(StandardField::AztecData10),
            "aztec-data-6" | "maxicode-64" | "maxicode-field-64" => Ok(StandardField::AztecData6),
            "aztec-param" => Ok(StandardField::AztecParam),
            "qr-code-256" | "qr-code-field-256" | "qr" => Ok(StandardField::QrCode256),
            "data-matrix-256" | "data-matrix-field-256" | "aztec-data-8" | "datamatrix" => {
                Ok(StandardField::DataMatrix256)
            }
            _ => Err(FieldError::UnknownField(s.to_string())),
        }
    }
}

/// Shorthand for the QR code GF(256) field
pub fn qr_code_field() -> &'static GaloisField {
    StandardField::QrCode256.field()
}
