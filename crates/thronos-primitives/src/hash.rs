//! 32-byte hash / storage-word type

use std::fmt;
use thiserror::Error;

/// Hash parsing error
#[derive(Debug, Error)]
pub enum HashError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid hash length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// 256-bit value (32 bytes). Used for hashes and for storage keys/values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct H256([u8; 32]);

impl H256 {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// Zero hash
    pub const ZERO: H256 = H256([0u8; 32]);

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, HashError> {
        if slice.len() != 32 {
            return Err(HashError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(H256(bytes))
    }

    /// Parse from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| HashError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as byte array
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Convert to hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({})", self.to_hex())
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for H256 {
    fn from(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }
}

impl AsRef<[u8]> for H256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Serde as a 0x-prefixed hex string. H256 doubles as a storage map key, so
// the string form also keeps JSON object keys valid.
#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for H256 {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for H256 {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            H256::from_hex(&s).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h256_from_hex() {
        let h = H256::from_hex(
            "0x0000000000000000000000000000000000000000000000000000000000000007",
        )
        .unwrap();
        assert_eq!(h.as_bytes()[31], 7);
        assert!(!h.is_zero());
    }

    #[test]
    fn test_h256_zero() {
        assert!(H256::ZERO.is_zero());
        assert_eq!(H256::default(), H256::ZERO);
    }

    #[test]
    fn test_h256_hex_roundtrip() {
        let original = "0x0102030405060708091011121314151617181920212223242526272829303132";
        let h = H256::from_hex(original).unwrap();
        assert_eq!(h.to_hex(), original);
    }

    #[test]
    fn test_h256_length_check() {
        match H256::from_hex("0x0102") {
            Err(HashError::InvalidLength(2)) => {}
            other => panic!("expected InvalidLength(2), got {:?}", other),
        }
        assert!(H256::from_slice(&[0u8; 31]).is_err());
        assert!(H256::from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_h256_ordering() {
        // Big-endian byte order doubles as numeric order for storage keys.
        let one = H256::from_bytes({
            let mut b = [0u8; 32];
            b[31] = 1;
            b
        });
        let big = H256::from_bytes({
            let mut b = [0u8; 32];
            b[0] = 1;
            b
        });
        assert!(one < big);
        assert!(H256::ZERO < one);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_h256_serde_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(H256::from_bytes([1u8; 32]), H256::from_bytes([2u8; 32]));
        let json = serde_json::to_string(&map).unwrap();
        let back: HashMap<H256, H256> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
