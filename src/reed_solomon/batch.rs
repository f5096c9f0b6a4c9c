//! Parallel processing of the independent Reed-Solomon blocks of one symbol
//!
//! Larger QR, Data Matrix and MaxiCode symbols split their codewords into
//! several blocks, each with its own EC codewords. Blocks share nothing but
//! the field, so they are encoded and corrected on the rayon thread pool.

use super::decoder::ReedSolomonDecoder;
use super::encoder::ReedSolomonEncoder;
use super::error::{RsError, RsResult};
use super::galois::GaloisField;
use log::debug;
use rayon::prelude::*;

/// One Reed-Solomon block: data codewords followed by `ec_len` EC codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordBlock {
    pub codewords: Vec<u16>,
    pub ec_len: usize,
    /// Indices into `codewords` known to be unreliable
    pub erasures: Vec<usize>,
}

impl CodewordBlock {
    /// Block of data codewords with room for `ec_len` EC codewords
    pub fn from_data(data: &[u16], ec_len: usize) -> Self {
        let mut codewords = Vec::with_capacity(data.len() + ec_len);
        codewords.extend_from_slice(data);
        codewords.resize(data.len() + ec_len, 0);
        Self {
            codewords,
            ec_len,
            erasures: Vec::new(),
        }
    }

    /// Block as read from a symbol
    pub fn received(codewords: Vec<u16>, ec_len: usize, erasures: Vec<usize>) -> Self {
        Self {
            codewords,
            ec_len,
            erasures,
        }
    }

    /// Data codewords (everything before the EC suffix)
    pub fn data(&self) -> &[u16] {
        let data_len = self.codewords.len().saturating_sub(self.ec_len);
        &self.codewords[..data_len]
    }
}

/// Compute the EC codewords of every block
///
/// Each rayon worker gets its own encoder, so generator polynomials are
/// cached per thread without locking.
pub fn encode_blocks(field: &GaloisField, blocks: &mut [CodewordBlock]) -> RsResult<()> {
    let results: Vec<RsResult<()>> = blocks
        .par_iter_mut()
        .map_init(
            || ReedSolomonEncoder::new(field),
            |encoder, block| encoder.encode(&mut block.codewords, block.ec_len),
        )
        .collect();

    first_failure(results).map(|_| ())
}

/// Correct every block, returning the total number of corrected codewords
///
/// On failure the error of the lowest-indexed failing block is returned,
/// wrapped in [`RsError::Block`]. Blocks that failed are left unmodified;
/// the symbol as a whole should be treated as unreadable.
pub fn decode_blocks(field: &GaloisField, blocks: &mut [CodewordBlock]) -> RsResult<usize> {
    let decoder = ReedSolomonDecoder::new(field);
    let results: Vec<RsResult<usize>> = blocks
        .par_iter_mut()
        .map(|block| decoder.decode(&mut block.codewords, block.ec_len, &block.erasures))
        .collect();

    let counts = first_failure(results)?;
    let total: usize = counts.iter().sum();
    debug!(
        "Corrected {} codewords across {} blocks",
        total,
        counts.len()
    );
    Ok(total)
}

fn first_failure<T>(results: Vec<RsResult<T>>) -> RsResult<Vec<T>> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| {
            result.map_err(|source| RsError::Block {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}
