use crate::error::ModelError;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// SimHash bit width. The set is closed; anything else is a startup-time
/// configuration error (spec §7 kind 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    W64,
    W128,
    W256,
    W512,
}

impl Width {
    pub fn from_bits(bits: u32) -> Result<Self, ModelError> {
        match bits {
            64 => Ok(Width::W64),
            128 => Ok(Width::W128),
            256 => Ok(Width::W256),
            512 => Ok(Width::W512),
            other => Err(ModelError::InvalidWidth(other)),
        }
    }

    pub fn bits(self) -> usize {
        match self {
            Width::W64 => 64,
            Width::W128 => 128,
            Width::W256 => 256,
            Width::W512 => 512,
        }
    }

    pub fn bytes(self) -> usize {
        self.bits() / 8
    }
}

/// A fixed-width SimHash fingerprint, stored as its little-endian
/// `width/8`-byte big-integer encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    width: Width,
    bytes: Vec<u8>,
}

impl Fingerprint {
    /// Builds a fingerprint from its bits, `bits[i]` true meaning bit `i` of
    /// the integer is set (bit 0 is the least significant bit).
    pub fn from_bits(width: Width, bits: impl Fn(usize) -> bool) -> Self {
        let mut bytes = vec![0u8; width.bytes()];
        for i in 0..width.bits() {
            if bits(i) {
                bytes[i / 8] |= 1 << (i % 8);
            }
        }
        Fingerprint { width, bytes }
    }

    pub fn from_le_bytes(width: Width, bytes: Vec<u8>) -> Result<Self, ModelError> {
        if bytes.len() != width.bytes() {
            return Err(ModelError::LengthMismatch {
                actual: bytes.len(),
                expected_bits: width.bits() as u32,
            });
        }
        Ok(Fingerprint { width, bytes })
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn le_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit(&self, i: usize) -> bool {
        (self.bytes[i / 8] >> (i % 8)) & 1 == 1
    }

    pub fn encode_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn decode_base64(width: Width, encoded: &str) -> Result<Self, ModelError> {
        let bytes = STANDARD.decode(encoded)?;
        Self::from_le_bytes(width, bytes)
    }

    /// Hamming distance between two same-width fingerprints.
    pub fn hamming_distance(&self, other: &Self) -> Option<u32> {
        if self.width != other.width {
            return None;
        }
        Some(
            self.bytes
                .iter()
                .zip(other.bytes.iter())
                .map(|(a, b)| (a ^ b).count_ones())
                .sum(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_length_matches_width() {
        let fp = Fingerprint::from_bits(Width::W128, |i| i % 2 == 0);
        assert_eq!(fp.le_bytes().len(), 16);
    }

    #[test]
    fn round_trips_through_base64() {
        let fp = Fingerprint::from_bits(Width::W256, |i| i % 3 == 0);
        let encoded = fp.encode_base64();
        let decoded = Fingerprint::decode_base64(Width::W256, &encoded).unwrap();
        assert_eq!(fp, decoded);
    }

    #[test]
    fn rejects_mismatched_length() {
        let err = Fingerprint::from_le_bytes(Width::W64, vec![0u8; 4]);
        assert!(err.is_err());
    }
}
