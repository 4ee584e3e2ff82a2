//! Per-run execution context.

use thronos_primitives::Address;

/// Immutable inputs to one program run: who is executing, who called it,
/// with what payment and data, and under which block.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    /// Contract being executed
    pub address: Address,
    /// Account that initiated the call
    pub sender: Address,
    /// Native value attached to the call
    pub value: u128,
    /// Input data supplied by the caller
    pub call_data: Vec<u8>,
    /// Height of the enclosing block
    pub block_number: u64,
    /// Timestamp of the enclosing block (seconds)
    pub timestamp: u64,
}

impl ExecutionContext {
    /// Context for a call with data and value; block fields default to zero.
    pub fn call(address: Address, sender: Address, value: u128, call_data: Vec<u8>) -> Self {
        ExecutionContext {
            address,
            sender,
            value,
            call_data,
            block_number: 0,
            timestamp: 0,
        }
    }

    /// Set the block fields.
    pub fn at_block(mut self, number: u64, timestamp: u64) -> Self {
        self.block_number = number;
        self.timestamp = timestamp;
        self
    }
}
