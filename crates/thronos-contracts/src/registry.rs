//! Contract records and the registry store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thronos_crypto::keccak256;
use thronos_primitives::{Address, H256};

/// A deployed contract as persisted in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Address the contract lives at
    pub address: Address,
    /// The contract's bytecode
    #[serde(with = "hex_bytes")]
    pub bytecode: Vec<u8>,
    /// Account that deployed it
    pub deployer: Address,
    /// Native balance accumulated from call values
    pub balance: u128,
    /// Persistent storage, committed after each successful call
    pub storage: HashMap<H256, H256>,
    /// Block height at deployment
    pub created_at: u64,
}

/// Derive a contract address from the deployer and a registry sequence
/// number: the low 20 bytes of keccak256(deployer || sequence).
pub fn derive_address(deployer: &Address, sequence: u64) -> Address {
    let mut input = Vec::with_capacity(Address::LEN + 8);
    input.extend_from_slice(deployer.as_bytes());
    input.extend_from_slice(&sequence.to_be_bytes());
    let hash = keccak256(&input);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(bytes)
}

/// Storage backend for deployed contracts.
pub trait ContractStore {
    /// Fetch a contract by address.
    fn get(&self, address: &Address) -> Option<ContractRecord>;

    /// Insert or replace a contract record.
    fn put(&self, record: ContractRecord);

    /// True if a contract is registered at the address.
    fn contains(&self, address: &Address) -> bool {
        self.get(address).is_some()
    }

    /// Next deployment sequence number. Each call returns a fresh value.
    fn next_sequence(&self) -> u64;

    /// Number of registered contracts.
    fn len(&self) -> usize;

    /// True if no contracts are registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registry held entirely in memory, safe to share across threads.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    contracts: RwLock<HashMap<Address, ContractRecord>>,
    sequence: AtomicU64,
}

impl InMemoryStore {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses of all registered contracts, in no particular order.
    pub fn addresses(&self) -> Vec<Address> {
        self.contracts.read().keys().copied().collect()
    }
}

impl ContractStore for InMemoryStore {
    fn get(&self, address: &Address) -> Option<ContractRecord> {
        self.contracts.read().get(address).cloned()
    }

    fn put(&self, record: ContractRecord) {
        self.contracts.write().insert(record.address, record);
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }

    fn len(&self) -> usize {
        self.contracts.read().len()
    }
}

// Bytecode serializes as a 0x-prefixed hex string.
mod hex_bytes {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(D::Error::custom)
    }
}
