//! # thronos-primitives
//!
//! Primitive types shared across the Thronos contract engine:
//! 20-byte account/contract addresses and 32-byte hashes.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{H256, HashError};
