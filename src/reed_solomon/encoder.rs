//! Reed-Solomon encoder
//!
//! Appends error-correction codewords to a block of data codewords. The EC
//! codewords are the remainder of `data(x) · x^ec_len` divided by the generator
//! polynomial `∏ (x − α^(i + base))`, `i < ec_len`.

use super::error::{RsError, RsResult};
use super::galois::GaloisField;
use super::poly::GaloisPoly;
use log::trace;

/// Reed-Solomon encoder bound to one field
///
/// Generator polynomials are cached by degree. The cache only grows, so an
/// encoder reused for many blocks builds each generator once. The cache is
/// private state: use one encoder per thread.
pub struct ReedSolomonEncoder<'f> {
    field: &'f GaloisField,
    cached_generators: Vec<GaloisPoly<'f>>,
}

impl<'f> ReedSolomonEncoder<'f> {
    /// Create an encoder for `field`
    pub fn new(field: &'f GaloisField) -> Self {
        Self {
            field,
            cached_generators: vec![field.one()],
        }
    }

    /// Field the encoder works in
    pub fn field(&self) -> &'f GaloisField {
        self.field
    }

    /// Generator polynomial of the given degree
    pub fn generator(&mut self, degree: usize) -> RsResult<&GaloisPoly<'f>> {
        while self.cached_generators.len() <= degree {
            let d = self.cached_generators.len() - 1;
            let last = &self.cached_generators[d];
            let root = self.field.exp(d as i64 + self.field.generator_base() as i64);
            let factor = GaloisPoly::new(self.field, &[1, root])?;
            let next = last.multiply(&factor)?;
            self.cached_generators.push(next);
        }
        Ok(&self.cached_generators[degree])
    }

    /// Number of generator polynomials currently cached (degree 0 included)
    pub fn cached_degrees(&self) -> usize {
        self.cached_generators.len()
    }

    /// Fill the last `ec_len` entries of `to_encode` with EC codewords
    ///
    /// The first `to_encode.len() - ec_len` entries are the data codewords and
    /// are left untouched.
    pub fn encode(&mut self, to_encode: &mut [u16], ec_len: usize) -> RsResult<()> {
        if ec_len == 0 {
            return Err(RsError::InvalidArgument(
                "No error correction codewords requested".to_string(),
            ));
        }
        if to_encode.len() <= ec_len {
            return Err(RsError::InvalidArgument(format!(
                "No data codewords: buffer of {} holds only {} EC codewords",
                to_encode.len(),
                ec_len
            )));
        }
        let data_len = to_encode.len() - ec_len;

        let field = self.field;
        let info = GaloisPoly::new(field, &to_encode[..data_len])?.multiply_by_monomial(ec_len, 1);
        let generator = self.generator(ec_len)?;
        let (_, remainder) = info.divide(generator)?;

        // The remainder may be shorter than ec_len after leading zeros were stripped
        let ec = &mut to_encode[data_len..];
        if remainder.is_zero() {
            ec.fill(0);
        } else {
            let coefficients = remainder.coefficients();
            let gap = ec_len - coefficients.len();
            ec[..gap].fill(0);
            ec[gap..].copy_from_slice(coefficients);
        }

        trace!(
            "Encoded {} data codewords with {} EC codewords in {}",
            data_len,
            ec_len,
            field
        );
        Ok(())
    }
}
