//! Charikar SimHash: a fixed-width fingerprint over a weighted token
//! multiset, where small Hamming distances between fingerprints correlate
//! with similar token distributions.
//!
//! Adapted from the accumulator-vector construction of a classic SimHash
//! sketch: initialize one signed accumulator per bit position, add or
//! subtract each token's weight depending on whether the token's hash has
//! that bit set, then read off the sign of each accumulator.

use blake2::{Blake2b512, Digest as _};
use discover_model::{FeatureVector, Fingerprint, Width};

/// A token hash producing at least `Width::W512` bits (64 bytes). Callers
/// may supply their own for testing; production code uses [`default_hash`].
pub trait TokenHash {
    fn hash(&self, token: &str) -> [u8; 64];
}

/// BLAKE2b-512, truncated to whatever width the caller requested. Not
/// cryptographically hardened against adversarial input — this system only
/// needs a well-distributed, deterministic hash, not collision resistance.
pub struct DefaultHash;

impl TokenHash for DefaultHash {
    fn hash(&self, token: &str) -> [u8; 64] {
        let mut hasher = Blake2b512::new();
        hasher.update(token.as_bytes());
        let digest = hasher.finalize();
        let mut out = [0u8; 64];
        out.copy_from_slice(&digest);
        out
    }
}

pub fn simhash(features: &FeatureVector, width: Width) -> Fingerprint {
    simhash_with(features, width, &DefaultHash)
}

pub fn simhash_with(features: &FeatureVector, width: Width, hash_fn: &impl TokenHash) -> Fingerprint {
    let bits = width.bits();
    let mut accumulator = vec![0i64; bits];

    for (token, &weight) in features.iter() {
        let digest = hash_fn.hash(token);
        let weight = weight as i64;
        for (i, slot) in accumulator.iter_mut().enumerate() {
            let byte = digest[i / 8];
            let bit_set = (byte >> (i % 8)) & 1 == 1;
            *slot += if bit_set { weight } else { -weight };
        }
    }

    Fingerprint::from_bits(width, |i| accumulator[i] > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn features(pairs: &[(&str, u32)]) -> FeatureVector {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<HashMap<_, _>>()
            .into_iter()
            .collect()
    }

    #[test]
    fn encodes_to_exact_byte_width() {
        let f = features(&[("two", 2), ("three", 3), ("one", 1)]);
        for width in [Width::W64, Width::W128, Width::W256, Width::W512] {
            let fp = simhash(&f, width);
            assert_eq!(fp.le_bytes().len(), width.bytes());
        }
    }

    #[test]
    fn single_feature_matches_hash_bit_pattern() {
        let f = features(&[("solo", 7)]);
        let fp = simhash(&f, Width::W256);
        let digest = DefaultHash.hash("solo");
        for i in 0..256 {
            let expected = (digest[i / 8] >> (i % 8)) & 1 == 1;
            assert_eq!(fp.bit(i), expected, "bit {i} mismatch");
        }
    }

    #[test]
    fn single_feature_is_weight_independent() {
        let low = simhash(&features(&[("x", 1)]), Width::W128);
        let high = simhash(&features(&[("x", 1000)]), Width::W128);
        assert_eq!(low, high);
    }

    #[test]
    fn empty_features_yield_zero_fingerprint() {
        let fp = simhash(&FeatureVector::new(), Width::W64);
        assert!(fp.le_bytes().iter().all(|b| *b == 0));
    }
}
