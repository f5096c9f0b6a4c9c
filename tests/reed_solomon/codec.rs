//! Encoder/Decoder Tests
//!
//! Golden vectors from published symbols, correction limits for errors and
//! erasures, and failure behavior beyond those limits.

use barcode_ecc::reed_solomon::{
    ErrorKind, FieldPreset, GaloisField, ReedSolomonDecoder, ReedSolomonEncoder, RsError,
};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn encode(field: &GaloisField, data: &[u16], ec_len: usize) -> Vec<u16> {
    let mut codewords = data.to_vec();
    codewords.resize(data.len() + ec_len, 0);
    ReedSolomonEncoder::new(field)
        .encode(&mut codewords, ec_len)
        .expect("Failed to encode");
    codewords
}

// ============================================================================
// Golden Vectors
// ============================================================================

#[test]
fn test_qr_small_golden() {
    init_logger();
    let field = FieldPreset::QrCode.field();
    let encoded = encode(field, &[1, 2, 3, 4], 4);
    assert_eq!(encoded, vec![1, 2, 3, 4, 117, 163, 178, 96]);

    let decoder = ReedSolomonDecoder::new(field);
    let decoded = decoder.decode_data(&encoded, 4, &[]).unwrap();
    assert_eq!(decoded.data, vec![1, 2, 3, 4]);
    assert_eq!(decoded.corrected, 0);

    for value in (0..256u16).filter(|&v| v != 1) {
        let mut corrupted = encoded.clone();
        corrupted[0] = value;
        let decoded = decoder.decode_data(&corrupted, 4, &[]).unwrap();
        assert_eq!(decoded.data, vec![1, 2, 3, 4]);
        assert_eq!(decoded.corrected, 1);
    }
}

#[test]
fn test_qr_version_1m_golden() {
    // "01234567" in a version 1-M symbol
    let data = [
        0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC,
        0x11,
    ];
    let ec = [0xA5, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55];
    let encoded = encode(FieldPreset::QrCode.field(), &data, ec.len());
    assert_eq!(&encoded[data.len()..], &ec);
}

#[test]
fn test_data_matrix_golden() {
    let data = [142, 164, 186];
    let ec = [114, 25, 5, 88, 102];
    let encoded = encode(FieldPreset::DataMatrix.field(), &data, ec.len());
    assert_eq!(&encoded[data.len()..], &ec);
    // Aztec 8-bit codewords use the same field
    assert_eq!(encode(FieldPreset::AztecData8.field(), &data, ec.len()), encoded);
}

#[test]
fn test_small_field_goldens() {
    assert_eq!(
        encode(FieldPreset::AztecData6.field(), &[1, 2, 3, 4, 5], 6),
        vec![1, 2, 3, 4, 5, 61, 5, 48, 5, 48, 47]
    );
    assert_eq!(
        encode(FieldPreset::AztecParam.field(), &[5, 10], 5),
        vec![5, 10, 14, 7, 5, 0, 11]
    );
    assert_eq!(
        encode(FieldPreset::AztecData12.field(), &[1000, 2000, 3000], 6),
        vec![1000, 2000, 3000, 582, 752, 2954, 1514, 207, 3178]
    );
}

#[test]
fn test_short_remainder_is_right_aligned() {
    // The remainder has degree 3, so the first EC codeword is a zero fill
    let field = FieldPreset::AztecParam.field();
    let encoded = encode(field, &[1, 12], 5);
    assert_eq!(encoded, vec![1, 12, 0, 9, 3, 15, 7]);

    let decoder = ReedSolomonDecoder::new(field);
    assert_eq!(decoder.decode_data(&encoded, 5, &[]).unwrap().corrected, 0);
}

// ============================================================================
// Correction Limits
// ============================================================================

#[test]
fn test_corrects_up_to_half_ec_errors_every_preset() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(2024);
    for preset in FieldPreset::ALL {
        let field = preset.field();
        let decoder = ReedSolomonDecoder::new(field);
        for _ in 0..50 {
            let max_ec = 12usize.min(field.size() - 3);
            let ec_len = rng.random_range(1..=max_ec);
            let data_len = rng.random_range(1..=20usize.min(field.size() - 1 - ec_len));
            let data: Vec<u16> = (0..data_len)
                .map(|_| rng.random_range(0..field.size()) as u16)
                .collect();
            let clean = encode(field, &data, ec_len);

            let mut corrupted = clean.clone();
            let errors = ec_len / 2;
            for index in sample(&mut rng, clean.len(), errors) {
                corrupted[index] ^= rng.random_range(1..field.size()) as u16;
            }

            let corrected = decoder
                .decode(&mut corrupted, ec_len, &[])
                .unwrap_or_else(|e| panic!("{:?} ec={}: {}", preset, ec_len, e));
            assert_eq!(corrected, errors);
            assert_eq!(corrupted, clean);
        }
    }
}

#[test]
fn test_corrects_up_to_ec_erasures() {
    let mut rng = StdRng::seed_from_u64(99);
    let field = FieldPreset::QrCode.field();
    let decoder = ReedSolomonDecoder::new(field);
    for ec_len in 1..=16 {
        let data: Vec<u16> = (0..20).map(|_| rng.random_range(0..256)).collect();
        let clean = encode(field, &data, ec_len);

        let erasures = sample(&mut rng, clean.len(), ec_len).into_vec();
        let mut corrupted = clean.clone();
        for &index in &erasures {
            corrupted[index] = rng.random_range(0..256);
        }

        let decoded = decoder.decode_data(&corrupted, ec_len, &erasures).unwrap();
        assert_eq!(decoded.data, data, "ec_len = {}", ec_len);
    }
}

#[test]
fn test_mixed_errors_and_erasures() {
    let mut rng = StdRng::seed_from_u64(1234);
    let field = FieldPreset::DataMatrix.field();
    let decoder = ReedSolomonDecoder::new(field);
    for _ in 0..100 {
        let ec_len = rng.random_range(2..=20);
        let data: Vec<u16> = (0..30).map(|_| rng.random_range(0..256)).collect();
        let clean = encode(field, &data, ec_len);

        // 2·errors + erasures ≤ ec_len
        let erasure_count = rng.random_range(0..=ec_len);
        let error_count = (ec_len - erasure_count) / 2;
        let positions = sample(&mut rng, clean.len(), erasure_count + error_count).into_vec();
        let (erasures, errors) = positions.split_at(erasure_count);

        let mut corrupted = clean.clone();
        for &index in erasures {
            corrupted[index] = rng.random_range(0..256);
        }
        for &index in errors {
            corrupted[index] ^= rng.random_range(1..256u16);
        }

        decoder.decode(&mut corrupted, ec_len, erasures).unwrap();
        assert_eq!(corrupted, clean);
    }
}

// ============================================================================
// Beyond the Limits
// ============================================================================

#[test]
fn test_too_many_errors_fail_cleanly() {
    let mut rng = StdRng::seed_from_u64(77);
    let field = FieldPreset::QrCode.field();
    let decoder = ReedSolomonDecoder::new(field);
    let mut failures = 0;
    for _ in 0..200 {
        let ec_len = rng.random_range(2..=10);
        let data: Vec<u16> = (0..15).map(|_| rng.random_range(0..256)).collect();
        let clean = encode(field, &data, ec_len);

        let mut corrupted = clean.clone();
        for index in sample(&mut rng, clean.len(), ec_len / 2 + 1) {
            corrupted[index] ^= rng.random_range(1..256u16);
        }
        let before = corrupted.clone();

        match decoder.decode(&mut corrupted, ec_len, &[]) {
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::Uncorrectable, "{}", e);
                assert_eq!(corrupted, before);
                failures += 1;
            }
            Ok(_) => {
                // Miscorrected to a different, valid codeword
                assert_ne!(corrupted, clean);
                let data_len = corrupted.len() - ec_len;
                assert_eq!(encode(field, &corrupted[..data_len], ec_len), corrupted);
            }
        }
    }
    assert!(failures > 100, "only {} failures", failures);
}

#[test]
fn test_error_pattern_without_locator_roots_is_rejected() {
    init_logger();
    let field = FieldPreset::QrCode.field();
    let decoder = ReedSolomonDecoder::new(field);
    let clean = encode(field, &[1, 2, 3, 4], 4);

    // (x − α)(x − α²)(x − α³) added to the EC codewords: only S_0 is nonzero
    let mut corrupted = clean.clone();
    for (slot, delta) in corrupted[4..].iter_mut().zip([1u16, 14, 56, 64]) {
        *slot ^= delta;
    }
    let before = corrupted.clone();

    let err = decoder.decode(&mut corrupted, 4, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Uncorrectable, "{}", err);
    assert_eq!(corrupted, before);
}

#[test]
fn test_too_many_erasures_is_immediate() {
    let field = FieldPreset::MaxiCode.field();
    let decoder = ReedSolomonDecoder::new(field);
    let clean = encode(field, &[1, 2, 3], 2);
    assert_eq!(
        decoder.decode_data(&clean, 2, &[0, 1, 2]),
        Err(RsError::TooManyErasures {
            erasures: 3,
            ec_len: 2
        })
    );
}

// ============================================================================
// Encoder Reuse
// ============================================================================

#[test]
fn test_encoder_reuse_matches_fresh_encoder() {
    let field = FieldPreset::AztecData10.field();
    let mut shared = ReedSolomonEncoder::new(field);
    for ec_len in [12, 3, 7, 12, 1] {
        let data: Vec<u16> = (0..10).map(|i| (i * 97 + ec_len as u16) % 1024).collect();
        let mut codewords = data.clone();
        codewords.resize(data.len() + ec_len, 0);
        shared.encode(&mut codewords, ec_len).unwrap();
        assert_eq!(codewords, encode(field, &data, ec_len));
    }
    assert_eq!(shared.cached_degrees(), 13);
}
