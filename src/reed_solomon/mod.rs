//! Reed-Solomon Error Correction Module
//!
//! Galois-field Reed-Solomon codec shared by the 2D barcode formats. A
//! [`GaloisField`] (usually one of the [`FieldPreset`]s) backs an encoder that
//! appends EC codewords and a decoder that corrects errors and erasures.

pub mod batch;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod galois;
pub mod poly;
pub mod presets;

pub use batch::{decode_blocks, encode_blocks, CodewordBlock};
pub use decoder::{Decoded, ReedSolomonDecoder};
pub use encoder::ReedSolomonEncoder;
pub use error::{ErrorKind, RsError, RsResult};
pub use galois::GaloisField;
pub use poly::GaloisPoly;
pub use presets::FieldPreset;
