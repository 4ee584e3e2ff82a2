//! # thronos-contracts
//!
//! Contract registry and the host-facing deploy/call entry points. Sits on
//! top of [`thronos_vm`]: the registry persists bytecode, balances, and
//! storage; the engine wires records into interpreter runs and commits the
//! results.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod estimate;
pub mod registry;

pub use engine::{BlockInfo, CallReceipt, ContractEngine, DeployReceipt};
pub use error::{EngineError, EngineResult};
pub use registry::{derive_address, ContractRecord, ContractStore, InMemoryStore};
