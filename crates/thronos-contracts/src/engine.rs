//! Deploy and call entry points.

use tracing::{debug, info};

use thronos_primitives::Address;
use thronos_vm::{ExecutionContext, Interpreter, LogRecord};

use crate::error::{EngineError, EngineResult};
use crate::registry::{derive_address, ContractRecord, ContractStore};

/// Block metadata exposed to executing contracts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockInfo {
    /// Current block height
    pub number: u64,
    /// Current block timestamp (seconds)
    pub timestamp: u64,
}

/// Receipt for a successful deployment.
#[derive(Debug, Clone)]
pub struct DeployReceipt {
    /// Address the contract was registered at
    pub address: Address,
    /// Gas consumed by the deployment run
    pub gas_used: u64,
    /// Return data of the deployment run
    pub output: Vec<u8>,
    /// Human-readable status for API callers
    pub message: String,
}

/// Receipt for a completed call. A revert is a completed call with
/// `success` false; machine errors do not produce a receipt.
#[derive(Debug, Clone)]
pub struct CallReceipt {
    /// True for a normal halt, false for a revert
    pub success: bool,
    /// Gas consumed by the run
    pub gas_used: u64,
    /// Return (or revert) data
    pub output: Vec<u8>,
    /// Logs emitted by the run; empty on revert
    pub logs: Vec<LogRecord>,
}

impl CallReceipt {
    /// Output as a 0x-prefixed hex string.
    pub fn output_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.output))
    }
}

/// The host-facing engine: owns a registry and runs contract bytecode
/// against it.
///
/// Deployment runs the bytecode once as a validity check with empty call
/// data and zero block metadata, then registers the contract with empty
/// storage. Calls run against a snapshot of the contract's storage; the
/// snapshot is committed back, and the attached value credited, only when
/// the run halts normally.
#[derive(Debug)]
pub struct ContractEngine<S: ContractStore> {
    store: S,
    block: BlockInfo,
}

impl<S: ContractStore> ContractEngine<S> {
    /// Engine over a registry, starting at block zero.
    pub fn new(store: S) -> Self {
        ContractEngine {
            store,
            block: BlockInfo::default(),
        }
    }

    /// Set the block metadata exposed to subsequent calls.
    pub fn with_block(mut self, block: BlockInfo) -> Self {
        self.block = block;
        self
    }

    /// The underlying registry.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Deploy bytecode (hex, optional 0x prefix) from `deployer`, funding
    /// the new contract with `value`.
    pub fn deploy(
        &self,
        deployer: Address,
        bytecode_hex: &str,
        value: u128,
        gas_limit: u64,
    ) -> EngineResult<DeployReceipt> {
        let bytecode = decode_hex(bytecode_hex)?;
        let sequence = self.store.next_sequence();
        let address = derive_address(&deployer, sequence);

        let ctx = ExecutionContext::call(address, deployer, value, Vec::new());
        let mut interp = Interpreter::new(bytecode.clone(), gas_limit);
        let outcome = interp.run(&ctx);

        if let Some(source) = outcome.error {
            return Err(EngineError::Execution {
                source,
                gas_used: outcome.gas_used,
            });
        }
        if !outcome.success {
            return Err(EngineError::DeployReverted {
                gas_used: outcome.gas_used,
            });
        }

        self.store.put(ContractRecord {
            address,
            bytecode,
            deployer,
            balance: value,
            storage: Default::default(),
            created_at: self.block.number,
        });
        info!(%address, %deployer, gas_used = outcome.gas_used, "contract deployed");

        Ok(DeployReceipt {
            address,
            gas_used: outcome.gas_used,
            output: outcome.output,
            message: format!("contract deployed at {address}"),
        })
    }

    /// Call the contract at `address` with call data (hex, optional 0x
    /// prefix) and an attached value.
    pub fn call(
        &self,
        caller: Address,
        address: Address,
        call_data_hex: &str,
        value: u128,
        gas_limit: u64,
    ) -> EngineResult<CallReceipt> {
        let record = self
            .store
            .get(&address)
            .ok_or(EngineError::ContractNotFound(address))?;
        let call_data = decode_hex(call_data_hex)?;

        let ctx = ExecutionContext::call(address, caller, value, call_data)
            .at_block(self.block.number, self.block.timestamp);
        let mut interp =
            Interpreter::with_storage(record.bytecode.clone(), gas_limit, record.storage.clone());
        let outcome = interp.run(&ctx);

        if let Some(source) = outcome.error {
            return Err(EngineError::Execution {
                source,
                gas_used: outcome.gas_used,
            });
        }

        if outcome.success {
            let mut updated = record;
            updated.storage = interp.into_storage();
            updated.balance = updated.balance.saturating_add(value);
            self.store.put(updated);
        }
        debug!(
            %address, %caller,
            success = outcome.success,
            gas_used = outcome.gas_used,
            "contract call finished"
        );

        Ok(CallReceipt {
            success: outcome.success,
            gas_used: outcome.gas_used,
            output: outcome.output,
            logs: outcome.logs,
        })
    }
}

fn decode_hex(s: &str) -> EngineResult<Vec<u8>> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| EngineError::InvalidHex(e.to_string()))
}
