//! Error types for Reed-Solomon field setup, polynomial arithmetic and decoding

use thiserror::Error;

/// Broad classification of an [`RsError`]
///
/// Configuration and argument errors are programming errors in the caller.
/// Uncorrectable errors are expected for damaged symbols: the pipeline should
/// treat the read as failed and try another detection hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Argument,
    Uncorrectable,
}

/// Errors that can occur during Reed-Solomon operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsError {
    /// Field size is not a supported power of two
    #[error("Field size {size} is not a power of two in [4, 65536]")]
    InvalidFieldSize { size: usize },

    /// Modulus degree does not match the field size
    #[error("Modulus {primitive:#x} does not have degree log2({size})")]
    ModulusDegreeMismatch { primitive: u32, size: usize },

    /// Modulus does not generate every nonzero element
    #[error("Modulus {primitive:#x} is not primitive: element 2 has order {order}, expected {expected}")]
    NonPrimitiveModulus {
        primitive: u32,
        order: usize,
        expected: usize,
    },

    /// Polynomial built from an empty coefficient slice
    #[error("Polynomial requires at least one coefficient")]
    EmptyCoefficients,

    /// Polynomial operands come from different fields
    #[error("Polynomials do not have the same Galois field")]
    FieldMismatch,

    /// Polynomial division by the zero polynomial
    #[error("Divide by zero polynomial")]
    DivideByZeroPolynomial,

    /// Multiplicative inverse of zero
    #[error("Zero has no multiplicative inverse")]
    ZeroHasNoInverse,

    /// Discrete logarithm of zero
    #[error("Zero has no discrete logarithm")]
    ZeroHasNoLogarithm,

    /// Symbol value outside the field
    #[error("Symbol {value} at index {index} is outside a field of size {size}")]
    SymbolOutOfRange {
        index: usize,
        value: u16,
        size: usize,
    },

    /// Caller supplied lengths or positions that violate the codec contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// More erasures than error-correction symbols
    #[error("{erasures} erasures exceed the {ec_len} error-correction symbols")]
    TooManyErasures { erasures: usize, ec_len: usize },

    /// Error locator root count does not match its degree
    #[error("Error locator degree {degree} does not match number of roots {roots}")]
    RootCountMismatch { degree: usize, roots: usize },

    /// Error locator points outside the received codewords
    #[error("Bad error location: power {power} in {len} codewords")]
    BadErrorLocation { power: usize, len: usize },

    /// Syndrome analysis could not produce a trustworthy correction
    #[error("Uncorrectable: {0}")]
    Uncorrectable(String),

    /// A block of a multi-block symbol failed
    #[error("Block {index}: {source}")]
    Block {
        index: usize,
        #[source]
        source: Box<RsError>,
    },
}

impl RsError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RsError::InvalidFieldSize { .. }
            | RsError::ModulusDegreeMismatch { .. }
            | RsError::NonPrimitiveModulus { .. } => ErrorKind::Configuration,
            RsError::EmptyCoefficients
            | RsError::FieldMismatch
            | RsError::DivideByZeroPolynomial
            | RsError::ZeroHasNoInverse
            | RsError::ZeroHasNoLogarithm
            | RsError::SymbolOutOfRange { .. }
            | RsError::InvalidArgument(_) => ErrorKind::Argument,
            RsError::TooManyErasures { .. }
            | RsError::RootCountMismatch { .. }
            | RsError::BadErrorLocation { .. }
            | RsError::Uncorrectable(_) => ErrorKind::Uncorrectable,
            RsError::Block { source, .. } => source.kind(),
        }
    }

    /// True when the symbol read should be treated as failed rather than as a bug
    pub fn is_uncorrectable(&self) -> bool {
        self.kind() == ErrorKind::Uncorrectable
    }
}

/// Type alias for Result with RsError
pub type RsResult<T> = std::result::Result<T, RsError>;
