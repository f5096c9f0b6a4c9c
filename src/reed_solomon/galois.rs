//! Galois Field GF(2^m) arithmetic for barcode Reed-Solomon codes
//!
//! A field is defined by its primitive modulus polynomial (written as an integer
//! bitmask, e.g. 0x11D for x⁸ + x⁴ + x³ + x² + 1), its size 2^m and a generator
//! base: the exponent of the first root α^base of the code's generator
//! polynomial. QR codes use base 0, Data Matrix, Aztec and MaxiCode use base 1.
//!
//! Multiplication, inversion and logarithms go through precomputed antilog
//! (`exp`) and log tables, built once per field and read-only afterwards, so a
//! field can be shared freely between threads.

use super::error::{RsError, RsResult};
use super::poly::GaloisPoly;
use std::fmt;

/// Smallest supported field: GF(4)
const MIN_FIELD_SIZE: usize = 4;

/// Largest supported field: GF(2^16), elements still fit in `u16`
const MAX_FIELD_SIZE: usize = 1 << 16;

/// A binary extension field GF(2^m) with log/antilog tables
pub struct GaloisField {
    size: usize,
    primitive: u32,
    generator_base: u32,
    exp_table: Vec<u16>,
    log_table: Vec<u16>,
}

impl GaloisField {
    /// Create a field, validating the parameters
    ///
    /// # Arguments
    /// * `primitive` - irreducible primitive polynomial whose coefficients are the
    ///   bits of this integer; its degree must be log2(size)
    /// * `size` - field order, a power of two
    /// * `generator_base` - exponent of the first generator polynomial root
    pub fn new(primitive: u32, size: usize, generator_base: u32) -> RsResult<Self> {
        if !size.is_power_of_two() || !(MIN_FIELD_SIZE..=MAX_FIELD_SIZE).contains(&size) {
            return Err(RsError::InvalidFieldSize { size });
        }
        let modulus = primitive as usize;
        if modulus < size || modulus >= size << 1 {
            return Err(RsError::ModulusDegreeMismatch { primitive, size });
        }

        let field = Self::from_parts(primitive, size, generator_base);

        // 2 must cycle through every nonzero element before returning to 1
        let expected = size - 1;
        let order = (1..size)
            .find(|&i| field.exp_table[i] <= 1)
            .unwrap_or(size);
        if order != expected {
            return Err(RsError::NonPrimitiveModulus {
                primitive,
                order,
                expected,
            });
        }

        Ok(field)
    }

    /// Build the tables without validating; presets use known-good parameters
    pub(crate) fn from_parts(primitive: u32, size: usize, generator_base: u32) -> Self {
        let (exp_table, log_table) = build_tables(primitive, size);
        Self {
            size,
            primitive,
            generator_base,
            exp_table,
            log_table,
        }
    }

    /// Field order (number of elements)
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Primitive modulus polynomial as a bitmask
    #[inline]
    pub fn primitive(&self) -> u32 {
        self.primitive
    }

    /// Exponent offset of the generator polynomial roots
    #[inline]
    pub fn generator_base(&self) -> u32 {
        self.generator_base
    }

    /// True if `a` is an element of this field
    #[inline]
    pub fn contains(&self, a: u16) -> bool {
        (a as usize) < self.size
    }

    /// Add or subtract two elements - both are XOR in characteristic 2
    #[inline]
    pub fn add_or_subtract(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// 2 (the generator element α) raised to `power`
    ///
    /// Any exponent is accepted, negative ones included; it is reduced modulo
    /// the multiplicative order size - 1.
    #[inline]
    pub fn exp(&self, power: i64) -> u16 {
        let order = (self.size - 1) as i64;
        self.exp_table[power.rem_euclid(order) as usize]
    }

    /// Discrete logarithm base 2 of a nonzero element
    #[inline]
    pub fn log(&self, a: u16) -> RsResult<u32> {
        if a == 0 {
            return Err(RsError::ZeroHasNoLogarithm);
        }
        Ok(self.log_table[a as usize] as u32)
    }

    /// Multiplicative inverse of a nonzero element
    #[inline]
    pub fn inverse(&self, a: u16) -> RsResult<u16> {
        if a == 0 {
            return Err(RsError::ZeroHasNoInverse);
        }
        let order = self.size - 1;
        Ok(self.exp_table[(order - self.log_table[a as usize] as usize) % order])
    }

    /// Product of two elements
    #[inline]
    pub fn multiply(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_sum = self.log_table[a as usize] as usize + self.log_table[b as usize] as usize;
        self.exp_table[log_sum % (self.size - 1)]
    }

    /// The polynomial `coefficient * x^degree`, or zero when `coefficient` is 0
    pub fn build_monomial(&self, degree: usize, coefficient: u16) -> GaloisPoly<'_> {
        if coefficient == 0 {
            return self.zero();
        }
        let mut coefficients = vec![0u16; degree + 1];
        coefficients[0] = coefficient;
        GaloisPoly::from_stripped(self, coefficients)
    }

    /// The zero polynomial over this field
    pub fn zero(&self) -> GaloisPoly<'_> {
        GaloisPoly::from_stripped(self, vec![0])
    }

    /// The constant polynomial 1 over this field
    pub fn one(&self) -> GaloisPoly<'_> {
        GaloisPoly::from_stripped(self, vec![1])
    }

    /// True when both references describe the same field
    #[inline]
    pub(crate) fn same_field(&self, other: &GaloisField) -> bool {
        std::ptr::eq(self, other) || self == other
    }
}

/// Walk the powers of 2, XOR-reducing by the modulus whenever the running
/// value leaves the field
fn build_tables(primitive: u32, size: usize) -> (Vec<u16>, Vec<u16>) {
    let mut exp_table = vec![0u16; size];
    let mut log_table = vec![0u16; size];

    let mut x = 1usize;
    for entry in exp_table.iter_mut() {
        *entry = x as u16;
        x <<= 1;
        if x >= size {
            x ^= primitive as usize;
            x &= size - 1;
        }
    }

    // exp_table[size - 1] wraps back to 1, skip it so log(1) stays 0
    for (l, &value) in exp_table.iter().enumerate().take(size - 1) {
        log_table[value as usize] = l as u16;
    }

    (exp_table, log_table)
}

// Tables are derived from the parameters, compare those only
impl PartialEq for GaloisField {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.primitive == other.primitive
            && self.generator_base == other.generator_base
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
        write!(
            f,
            "GF({:#x},{},{})",
            self.primitive, self.size, self.generator_base
        )
    }
}
