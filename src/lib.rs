//! Reed-Solomon error correction for 2D barcode symbols
//!
//! The codec turns the codewords sampled from a QR, Aztec, Data Matrix or
//! MaxiCode symbol into a verified, corrected codeword sequence, or fails with
//! an [`RsError`](reed_solomon::RsError) the scanning pipeline can act on.
//!
//! ```
//! use barcode_ecc::reed_solomon::{FieldPreset, ReedSolomonDecoder, ReedSolomonEncoder};
//!
//! let field = FieldPreset::QrCode.field();
//! let mut block = [1, 2, 3, 4, 0, 0, 0, 0];
//! ReedSolomonEncoder::new(field).encode(&mut block, 4).unwrap();
//!
//! block[0] = 99;
//! let corrected = ReedSolomonDecoder::new(field).decode(&mut block, 4, &[]).unwrap();
//! assert_eq!(corrected, 1);
//! assert_eq!(&block[..4], &[1, 2, 3, 4]);
//! ```

pub mod reed_solomon;

pub use reed_solomon::{
    FieldPreset, GaloisField, GaloisPoly, ReedSolomonDecoder, ReedSolomonEncoder, RsError,
    RsResult,
};
