//! Reed-Solomon decoder with error and erasure correction
//!
//! ## Algorithm
//!
//! 1. Syndromes `S_i = r(α^(i + base))`; all zero means the block is intact.
//! 2. Known erasures contribute the locator `Γ(x) = ∏ (1 − X_k x)` and are
//!    folded into the syndromes: `T(x) = S(x) Γ(x) mod x^ec_len`.
//! 3. The extended Euclidean algorithm on `x^ec_len` and `T(x)` yields the
//!    error locator σ(x) and the evaluator ω(x).
//! 4. Roots of `Λ(x) = σ(x) Γ(x)` are found by trying every nonzero element.
//! 5. Forney's formula gives each magnitude:
//!    `e = X^(1 − base) ω(X⁻¹) / Λ'(X⁻¹)`.
//!
//! Codeword `k` of an `n`-codeword block is the coefficient of `x^(n − 1 − k)`,
//! so its locator is `X = α^(n − 1 − k)`.
//!
//! Corrections are applied to a scratch copy and committed only after the
//! syndromes of the corrected block are all zero; a failed decode never
//! modifies the caller's buffer.

use super::error::{RsError, RsResult};
use super::galois::GaloisField;
use super::poly::GaloisPoly;
use log::{debug, trace};
use smallvec::SmallVec;

/// A located error: codeword index, locator power and the root X⁻¹ of Λ
type ErrorLocation = (usize, usize, u16);

/// Result of [`ReedSolomonDecoder::decode_data`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Corrected data codewords (the EC suffix is dropped)
    pub data: Vec<u16>,
    /// Number of codewords whose value was changed
    pub corrected: usize,
}

/// Reed-Solomon decoder bound to one field
///
/// Stateless: every call is self-contained, so one decoder can be shared by
/// any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct ReedSolomonDecoder<'f> {
    field: &'f GaloisField,
}

impl<'f> ReedSolomonDecoder<'f> {
    /// Create a decoder for `field`
    pub fn new(field: &'f GaloisField) -> Self {
        Self { field }
    }

    /// Field the decoder works in
    pub fn field(&self) -> &'f GaloisField {
        self.field
    }

    /// Correct `received` in place
    ///
    /// # Arguments
    /// * `received` - data codewords followed by `ec_len` EC codewords
    /// * `ec_len` - number of EC codewords
    /// * `erasures` - indices into `received` known to be unreliable
    ///
    /// # Returns
    /// Number of codewords that were corrected
    pub fn decode(
        &self,
        received: &mut [u16],
        ec_len: usize,
        erasures: &[usize],
    ) -> RsResult<usize> {
        let corrections = match self.find_corrections(received, ec_len, erasures)? {
            Some(corrections) => corrections,
            None => return Ok(0),
        };

        let mut corrected = received.to_vec();
        for &(index, magnitude) in &corrections {
            corrected[index] ^= magnitude;
        }

        let check = GaloisPoly::new(self.field, &corrected)?;
        if self.syndromes(&check, ec_len).iter().any(|&s| s != 0) {
            debug!(
                "Rejecting {} corrections: syndromes still nonzero",
                corrections.len()
            );
            return Err(RsError::Uncorrectable(
                "Corrected codewords fail the syndrome check".to_string(),
            ));
        }

        received.copy_from_slice(&corrected);
        debug!(
            "Corrected {} codewords at {:?}",
            corrections.len(),
            corrections.iter().map(|&(i, _)| i).collect::<Vec<_>>()
        );
        Ok(corrections.len())
    }

    /// Correct a copy of `received` and return its data codewords
    pub fn decode_data(
        &self,
        received: &[u16],
        ec_len: usize,
        erasures: &[usize],
    ) -> RsResult<Decoded> {
        let mut codewords = received.to_vec();
        let corrected = self.decode(&mut codewords, ec_len, erasures)?;
        codewords.truncate(received.len() - ec_len);
        Ok(Decoded {
            data: codewords,
            corrected,
        })
    }

    /// Work out `(index, magnitude)` for every codeword that needs changing
    ///
    /// `None` means the syndromes are all zero and the block is intact.
    fn find_corrections(
        &self,
        received: &[u16],
        ec_len: usize,
        erasures: &[usize],
    ) -> RsResult<Option<Vec<(usize, u16)>>> {
        if erasures.len() > ec_len {
            return Err(RsError::TooManyErasures {
                erasures: erasures.len(),
                ec_len,
            });
        }
        let n = received.len();
        self.validate_lengths(n, ec_len)?;
        let erasures = normalize_erasures(erasures, n)?;

        let poly = GaloisPoly::new(self.field, received)?;
        let syndromes = self.syndromes(&poly, ec_len);
        if syndromes.iter().all(|&s| s == 0) {
            return Ok(None);
        }
        trace!("Syndromes: {:?}", syndromes);

        // Syndrome polynomial with S_0 as the constant term
        let reversed: Vec<u16> = syndromes.iter().rev().copied().collect();
        let syndrome_poly = GaloisPoly::new(self.field, &reversed)?;

        let erasure_locator = self.erasure_locator(&erasures, n)?;
        let x_to_ec = self.field.build_monomial(ec_len, 1);
        let (_, modified_syndromes) = syndrome_poly
            .multiply(&erasure_locator)?
            .divide(&x_to_ec)?;

        let (sigma, omega) =
            self.run_euclidean_algorithm(modified_syndromes, ec_len, erasures.len())?;
        if 2 * sigma.degree() + erasures.len() > ec_len {
            return Err(RsError::Uncorrectable(format!(
                "{} errors and {} erasures exceed {} EC codewords",
                sigma.degree(),
                erasures.len(),
                ec_len
            )));
        }

        let locator = sigma.multiply(&erasure_locator)?;
        trace!("Error locator: {}, evaluator: {}", locator, omega);
        if locator.degree() == 0 {
            return Err(RsError::Uncorrectable(
                "Nonzero syndromes but the error locator has no roots".to_string(),
            ));
        }

        let locations = self.find_error_locations(&locator, n)?;
        let magnitudes = self.find_error_magnitudes(&omega, &locator, &locations)?;

        Ok(Some(
            locations
                .iter()
                .zip(magnitudes)
                .filter(|&(_, magnitude)| magnitude != 0)
                .map(|(&(index, _, _), magnitude)| (index, magnitude))
                .collect(),
        ))
    }

    fn validate_lengths(&self, n: usize, ec_len: usize) -> RsResult<()> {
        if ec_len == 0 {
            return Err(RsError::InvalidArgument(
                "No error correction codewords".to_string(),
            ));
        }
        if ec_len >= n {
            return Err(RsError::InvalidArgument(format!(
                "{} EC codewords leave no data in {} codewords",
                ec_len, n
            )));
        }
        if n >= self.field.size() {
            return Err(RsError::InvalidArgument(format!(
                "{} codewords exceed the {} distinct locators of {}",
                n,
                self.field.size() - 1,
                self.field
            )));
        }
        Ok(())
    }

    /// `S_i = r(α^(i + base))` for `i < ec_len`
    fn syndromes(&self, poly: &GaloisPoly<'f>, ec_len: usize) -> Vec<u16> {
        let base = self.field.generator_base() as i64;
        (0..ec_len as i64)
            .map(|i| poly.evaluate_at(self.field.exp(i + base)))
            .collect()
    }

    /// `Γ(x) = ∏ (1 − X_k x)` over the erased positions
    fn erasure_locator(&self, erasures: &[usize], n: usize) -> RsResult<GaloisPoly<'f>> {
        let mut locator = self.field.one();
        for &index in erasures {
            let location = self.field.exp((n - 1 - index) as i64);
            let factor = GaloisPoly::new(self.field, &[location, 1])?;
            locator = locator.multiply(&factor)?;
        }
        Ok(locator)
    }

    /// Solve the key equation `σ(x) T(x) ≡ ω(x) mod x^ec_len`
    ///
    /// Iterates while `2·deg(r) ≥ ec_len + erasures`, which leaves room for
    /// at most `(ec_len − erasures) / 2` errors. σ and ω come back scaled so
    /// that σ(0) = 1.
    fn run_euclidean_algorithm(
        &self,
        modified_syndromes: GaloisPoly<'f>,
        ec_len: usize,
        erasure_count: usize,
    ) -> RsResult<(GaloisPoly<'f>, GaloisPoly<'f>)> {
        let field = self.field;
        let mut r_last = field.build_monomial(ec_len, 1);
        let mut r = modified_syndromes;
        let mut t_last = field.zero();
        let mut t = field.one();

        while 2 * r.degree() >= ec_len + erasure_count && !r.is_zero() {
            let (quotient, remainder) = r_last.divide(&r)?;
            let t_next = quotient.multiply(&t)?.add_or_subtract(&t_last)?;
            r_last = std::mem::replace(&mut r, remainder);
            t_last = std::mem::replace(&mut t, t_next);
        }

        let constant_term = t.coefficient(0);
        if constant_term == 0 {
            return Err(RsError::Uncorrectable(
                "Error locator has no constant term".to_string(),
            ));
        }

        let inverse = field.inverse(constant_term)?;
        let sigma = t.multiply_scalar(inverse);
        let omega = r.multiply_scalar(inverse);
        Ok((sigma, omega))
    }

    /// Try every nonzero element as a root of the locator
    fn find_error_locations(
        &self,
        locator: &GaloisPoly<'f>,
        n: usize,
    ) -> RsResult<SmallVec<[ErrorLocation; 16]>> {
        let degree = locator.degree();
        let mut locations = SmallVec::new();

        for candidate in 1..self.field.size() {
            if locations.len() == degree {
                break;
            }
            let x_inverse = candidate as u16;
            if locator.evaluate_at(x_inverse) != 0 {
                continue;
            }
            let power = self.field.log(self.field.inverse(x_inverse)?)? as usize;
            if power >= n {
                return Err(RsError::BadErrorLocation { power, len: n });
            }
            locations.push((n - 1 - power, power, x_inverse));
        }

        if locations.len() != degree {
            return Err(RsError::RootCountMismatch {
                degree,
                roots: locations.len(),
            });
        }
        Ok(locations)
    }

    /// Forney's formula for each located error
    fn find_error_magnitudes(
        &self,
        omega: &GaloisPoly<'f>,
        locator: &GaloisPoly<'f>,
        locations: &[ErrorLocation],
    ) -> RsResult<Vec<u16>> {
        let field = self.field;
        let derivative = locator.formal_derivative();
        let scale_power = 1 - field.generator_base() as i64;

        locations
            .iter()
            .map(|&(index, power, x_inverse)| -> RsResult<u16> {
                let denominator = derivative.evaluate_at(x_inverse);
                if denominator == 0 {
                    return Err(RsError::Uncorrectable(format!(
                        "Repeated error locator root at codeword {}",
                        index
                    )));
                }
                let magnitude =
                    field.multiply(omega.evaluate_at(x_inverse), field.inverse(denominator)?);
                Ok(field.multiply(magnitude, field.exp(power as i64 * scale_power)))
            })
            .collect()
    }
}

/// Check erasure indices and drop duplicates
fn normalize_erasures(erasures: &[usize], n: usize) -> RsResult<SmallVec<[usize; 16]>> {
    if let Some(&index) = erasures.iter().find(|&&index| index >= n) {
        return Err(RsError::InvalidArgument(format!(
            "Erasure index {} outside {} codewords",
            index, n
        )));
    }
    let mut unique: SmallVec<[usize; 16]> = erasures.iter().copied().collect();
    unique.sort_unstable();
    unique.dedup();
    Ok(unique)
}
