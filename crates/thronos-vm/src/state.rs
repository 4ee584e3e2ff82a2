//! Mutable machine state for one program run.

use std::collections::HashMap;

use thronos_primitives::H256;

use crate::error::LogRecord;
use crate::memory::Memory;
use crate::stack::Stack;

/// Everything an executing program can observe or mutate: the operand
/// stack, memory, storage, gas counters, and control flags.
///
/// Gas is tracked as a pair of counters whose sum always equals the
/// original limit.
#[derive(Debug, Clone)]
pub struct ExecutionState {
    /// Operand stack
    pub stack: Stack,
    /// Scratch memory
    pub memory: Memory,
    /// Contract storage, mutated in place during the run
    pub storage: HashMap<H256, H256>,
    /// Program counter into the bytecode
    pub pc: usize,
    /// Set by terminal instructions
    pub halted: bool,
    /// Set by REVERT and by aborting errors
    pub reverted: bool,
    /// Output set by RETURN or REVERT
    pub return_data: Vec<u8>,
    /// Logs emitted so far
    pub logs: Vec<LogRecord>,
    gas_limit: u64,
    gas_remaining: u64,
    gas_used: u64,
}

impl ExecutionState {
    /// Fresh state with the given gas budget and empty storage.
    pub fn new(gas_limit: u64) -> Self {
        Self::with_storage(gas_limit, HashMap::new())
    }

    /// Fresh state seeded with an existing storage snapshot.
    pub fn with_storage(gas_limit: u64, storage: HashMap<H256, H256>) -> Self {
        ExecutionState {
            stack: Stack::new(),
            memory: Memory::new(),
            storage,
            pc: 0,
            halted: false,
            reverted: false,
            return_data: Vec::new(),
            logs: Vec::new(),
            gas_limit,
            gas_remaining: gas_limit,
            gas_used: 0,
        }
    }

    /// Debit gas. Returns false, leaving the counters untouched, if the
    /// budget cannot cover the amount.
    pub fn consume_gas(&mut self, amount: u64) -> bool {
        if amount > self.gas_remaining {
            return false;
        }
        self.gas_remaining -= amount;
        self.gas_used += amount;
        true
    }

    /// Consume everything left in the budget. Used when a run dies of gas
    /// exhaustion so the caller is billed the full limit.
    pub fn drain_gas(&mut self) {
        self.gas_used = self.gas_limit;
        self.gas_remaining = 0;
    }

    /// Gas left in the budget.
    pub fn gas_remaining(&self) -> u64 {
        self.gas_remaining
    }

    /// Gas debited so far.
    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }

    /// Read a storage slot, defaulting to the zero word.
    pub fn sload(&self, key: &H256) -> H256 {
        self.storage.get(key).copied().unwrap_or(H256::ZERO)
    }

    /// Write a storage slot.
    pub fn sstore(&mut self, key: H256, value: H256) {
        self.storage.insert(key, value);
    }
}
