//! # thronos-crypto
//!
//! Keccak-256 hashing, used for contract address derivation.

#![warn(missing_docs)]
#![warn(clippy::all)]

use sha3::{Digest, Keccak256};
use thronos_primitives::H256;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        // keccak256("") = 0xc5d2...a470
        let hash = keccak256(&[]);
        assert_eq!(
            hash.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        let hash = keccak256(b"hello");
        assert_eq!(
            hash.to_hex(),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_deterministic() {
        let a = keccak256(b"thronos");
        let b = keccak256(b"thronos");
        assert_eq!(a, b);
        assert_ne!(a, keccak256(b"thronos "));
    }
}
