//! Named field configurations used by the supported barcode formats
//!
//! | preset        | modulus | size | base | polynomial                      |
//! |---------------|---------|------|------|---------------------------------|
//! | `AztecData12` | 0x1069  | 4096 | 1    | x¹² + x⁶ + x⁵ + x³ + 1          |
//! | `AztecData10` | 0x409   | 1024 | 1    | x¹⁰ + x³ + 1                    |
//! | `AztecData6`  | 0x43    | 64   | 1    | x⁶ + x + 1                      |
//! | `AztecParam`  | 0x13    | 16   | 1    | x⁴ + x + 1                      |
//! | `QrCode`      | 0x11D   | 256  | 0    | x⁸ + x⁴ + x³ + x² + 1           |
//! | `DataMatrix`  | 0x12D   | 256  | 1    | x⁸ + x⁵ + x³ + x² + 1           |
//!
//! `AztecData8` shares the Data Matrix field and `MaxiCode` shares the 6-bit
//! Aztec field. Each distinct field is built on first use and lives for the
//! rest of the process.

use super::galois::GaloisField;
use std::sync::OnceLock;

/// Field parameters: `(primitive, size, generator_base)`
type FieldParams = (u32, usize, u32);

const AZTEC_DATA_12: FieldParams = (0x1069, 4096, 1);
const AZTEC_DATA_10: FieldParams = (0x409, 1024, 1);
const AZTEC_DATA_6: FieldParams = (0x43, 64, 1);
const AZTEC_PARAM: FieldParams = (0x13, 16, 1);
const QR_CODE_256: FieldParams = (0x011D, 256, 0);
const DATA_MATRIX_256: FieldParams = (0x012D, 256, 1);

/// A barcode dialect's Reed-Solomon field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPreset {
    /// 12-bit Aztec data codewords
    AztecData12,
    /// 10-bit Aztec data codewords
    AztecData10,
    /// 8-bit Aztec data codewords
    AztecData8,
    /// 6-bit Aztec data codewords
    AztecData6,
    /// 4-bit Aztec mode message
    AztecParam,
    /// QR code codewords
    QrCode,
    /// Data Matrix codewords
    DataMatrix,
    /// MaxiCode codewords
    MaxiCode,
}

impl FieldPreset {
    /// Every preset, in declaration order
    pub const ALL: [FieldPreset; 8] = [
        FieldPreset::AztecData12,
        FieldPreset::AztecData10,
        FieldPreset::AztecData8,
        FieldPreset::AztecData6,
        FieldPreset::AztecParam,
        FieldPreset::QrCode,
        FieldPreset::DataMatrix,
        FieldPreset::MaxiCode,
    ];

    /// `(primitive, size, generator_base)` of the preset
    pub fn params(self) -> (u32, usize, u32) {
        match self {
            FieldPreset::AztecData12 => AZTEC_DATA_12,
            FieldPreset::AztecData10 => AZTEC_DATA_10,
            FieldPreset::AztecData8 | FieldPreset::DataMatrix => DATA_MATRIX_256,
            FieldPreset::AztecData6 | FieldPreset::MaxiCode => AZTEC_DATA_6,
            FieldPreset::AztecParam => AZTEC_PARAM,
            FieldPreset::QrCode => QR_CODE_256,
        }
    }

    /// Shared field instance for the preset
    pub fn field(self) -> &'static GaloisField {
        static AZTEC_DATA_12_FIELD: OnceLock<GaloisField> = OnceLock::new();
        static AZTEC_DATA_10_FIELD: OnceLock<GaloisField> = OnceLock::new();
        static AZTEC_DATA_6_FIELD: OnceLock<GaloisField> = OnceLock::new();
        static AZTEC_PARAM_FIELD: OnceLock<GaloisField> = OnceLock::new();
        static QR_CODE_FIELD: OnceLock<GaloisField> = OnceLock::new();
        static DATA_MATRIX_FIELD: OnceLock<GaloisField> = OnceLock::new();

        let cell = match self {
            FieldPreset::AztecData12 => &AZTEC_DATA_12_FIELD,
            FieldPreset::AztecData10 => &AZTEC_DATA_10_FIELD,
            FieldPreset::AztecData8 | FieldPreset::DataMatrix => &DATA_MATRIX_FIELD,
            FieldPreset::AztecData6 | FieldPreset::MaxiCode => &AZTEC_DATA_6_FIELD,
            FieldPreset::AztecParam => &AZTEC_PARAM_FIELD,
            FieldPreset::QrCode => &QR_CODE_FIELD,
        };
        cell.get_or_init(|| {
            let (primitive, size, generator_base) = self.params();
            GaloisField::from_parts(primitive, size, generator_base)
        })
    }
}
