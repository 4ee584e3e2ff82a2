//! The bytecode interpreter.

use std::collections::HashMap;

use thronos_primitives::{Address, H256};
use tracing::debug;

use crate::context::ExecutionContext;
use crate::error::{LogRecord, Outcome, VmError, VmResult};
use crate::gas;
use crate::opcode::Opcode;
use crate::state::ExecutionState;
use crate::word::{self, U256};

/// Executes one program against one [`ExecutionState`].
///
/// The loop fetches the byte at `pc`, advances `pc`, decodes, charges the
/// instruction's static gas, then runs the handler. Decoding happens before
/// the gas debit, so an unassigned byte fails without consuming anything.
/// Any handler error ends the run with all effects marked reverted.
#[derive(Debug)]
pub struct Interpreter {
    code: Vec<u8>,
    state: ExecutionState,
}

impl Interpreter {
    /// Interpreter over `code` with a fresh state and the given gas budget.
    pub fn new(code: Vec<u8>, gas_limit: u64) -> Self {
        Interpreter {
            code,
            state: ExecutionState::new(gas_limit),
        }
    }

    /// Interpreter seeded with an existing storage snapshot.
    pub fn with_storage(code: Vec<u8>, gas_limit: u64, storage: HashMap<H256, H256>) -> Self {
        Interpreter {
            code,
            state: ExecutionState::with_storage(gas_limit, storage),
        }
    }

    /// The machine state (for inspection after a run).
    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Consume the interpreter, yielding the final storage contents.
    pub fn into_storage(self) -> HashMap<H256, H256> {
        self.state.storage
    }

    /// Run to a terminal state. Falling off the end of the code is a normal
    /// halt, same as STOP.
    pub fn run(&mut self, ctx: &ExecutionContext) -> Outcome {
        while !self.state.halted && self.state.pc < self.code.len() {
            if self.state.gas_remaining() == 0 {
                return self.abort(VmError::OutOfGas);
            }
            if let Err(err) = self.step(ctx) {
                return self.abort(err);
            }
        }
        let gas_used = self.state.gas_used();
        let output = std::mem::take(&mut self.state.return_data);
        if self.state.reverted {
            debug!(gas_used, output_len = output.len(), "run reverted");
            Outcome::reverted(gas_used, output)
        } else {
            let logs = std::mem::take(&mut self.state.logs);
            debug!(gas_used, output_len = output.len(), "run halted");
            Outcome::halted(gas_used, output, logs)
        }
    }

    fn abort(&mut self, err: VmError) -> Outcome {
        if err == VmError::OutOfGas {
            self.state.drain_gas();
        }
        self.state.halted = true;
        self.state.reverted = true;
        debug!(error = %err, gas_used = self.state.gas_used(), "run failed");
        Outcome::failed(self.state.gas_used(), err)
    }

    /// Fetch, decode, charge, execute one instruction.
    fn step(&mut self, ctx: &ExecutionContext) -> VmResult<()> {
        let byte = self.code[self.state.pc];
        self.state.pc += 1;
        let op = Opcode::from_byte(byte).ok_or(VmError::UnsupportedOpcode(byte))?;
        if !self.state.consume_gas(gas::opcode_cost(op)) {
            return Err(VmError::OutOfGas);
        }
        self.execute(op, ctx)
    }

    fn execute(&mut self, op: Opcode, ctx: &ExecutionContext) -> VmResult<()> {
        use Opcode::*;
        match op {
            STOP => self.state.halted = true,

            ADD => self.binary(word::add)?,
            MUL => self.binary(word::mul)?,
            SUB => self.binary(word::sub)?,
            DIV => self.binary(word::div)?,
            MOD => self.binary(word::rem)?,
            EXP => self.binary(word::exp)?,

            LT => self.compare(word::lt)?,
            GT => self.compare(word::gt)?,
            EQ => self.compare(|a, b| a == b)?,
            ISZERO => {
                let a = self.state.stack.pop()?;
                self.state.stack.push(word::from_bool(word::is_zero(&a)))?;
            }
            AND => self.binary(word::and)?,
            OR => self.binary(word::or)?,
            XOR => self.binary(word::xor)?,

            ADDRESS => self.push_address(&ctx.address)?,
            CALLER => self.push_address(&ctx.sender)?,
            CALLVALUE => self.state.stack.push(word::from_u128(ctx.value))?,
            CALLDATALOAD => {
                let offset = self.state.stack.pop()?;
                let mut out = [0u8; 32];
                // out-of-range reads yield zero bytes
                if let Some(start) = word::to_usize(&offset) {
                    if start < ctx.call_data.len() {
                        let end = (start + 32).min(ctx.call_data.len());
                        out[..end - start].copy_from_slice(&ctx.call_data[start..end]);
                    }
                }
                self.state.stack.push(out)?;
            }
            CALLDATASIZE => {
                let len = word::from_u64(ctx.call_data.len() as u64);
                self.state.stack.push(len)?;
            }
            TIMESTAMP => self.state.stack.push(word::from_u64(ctx.timestamp))?,
            NUMBER => self.state.stack.push(word::from_u64(ctx.block_number))?,

            POP => {
                self.state.stack.pop()?;
            }
            MLOAD => {
                let offset = self.mem_offset()?;
                let loaded = self.state.memory.load_word(offset)?;
                self.state.stack.push(loaded)?;
            }
            MSTORE => {
                let offset = self.mem_offset()?;
                let value = self.state.stack.pop()?;
                self.state.memory.store_word(offset, &value)?;
            }
            MSTORE8 => {
                let offset = self.mem_offset()?;
                let value = self.state.stack.pop()?;
                self.state.memory.store_byte(offset, value[31])?;
            }
            SLOAD => {
                let key = self.state.stack.pop()?;
                let value = self.state.sload(&H256::from_bytes(key));
                self.state.stack.push(*value.as_bytes())?;
            }
            SSTORE => {
                // value on top, key beneath it
                let value = self.state.stack.pop()?;
                let key = self.state.stack.pop()?;
                self.state
                    .sstore(H256::from_bytes(key), H256::from_bytes(value));
            }

            JUMP => {
                let dest = self.state.stack.pop()?;
                self.state.pc = word::to_usize(&dest).unwrap_or(usize::MAX);
            }
            JUMPI => {
                let dest = self.state.stack.pop()?;
                let cond = self.state.stack.pop()?;
                if !word::is_zero(&cond) {
                    self.state.pc = word::to_usize(&dest).unwrap_or(usize::MAX);
                }
            }
            PC => {
                // pc already points past this instruction
                let here = word::from_u64((self.state.pc - 1) as u64);
                self.state.stack.push(here)?;
            }
            JUMPDEST => {}

            RETURN => {
                self.state.return_data = self.read_span()?;
                self.state.halted = true;
            }
            REVERT => {
                self.state.return_data = self.read_span()?;
                self.state.halted = true;
                self.state.reverted = true;
            }

            op if op.is_push() => {
                let size = op.push_size();
                let available = self.code.len().saturating_sub(self.state.pc);
                if available < size {
                    return Err(VmError::InvalidPush {
                        needed: size,
                        available,
                    });
                }
                let mut w = [0u8; 32];
                w[32 - size..].copy_from_slice(&self.code[self.state.pc..self.state.pc + size]);
                self.state.pc += size;
                self.state.stack.push(w)?;
            }
            op if op.dup_depth().is_some() => {
                let depth = op.dup_depth().unwrap_or(1);
                self.state.stack.dup(depth - 1)?;
            }
            op if op.swap_depth().is_some() => {
                let depth = op.swap_depth().unwrap_or(1);
                self.state.stack.swap(depth)?;
            }
            op if op.log_topics().is_some() => {
                let count = op.log_topics().unwrap_or(0);
                let offset = self.state.stack.pop()?;
                let len = self.state.stack.pop()?;
                let mut topics = Vec::with_capacity(count);
                for _ in 0..count {
                    topics.push(H256::from_bytes(self.state.stack.pop()?));
                }
                let offset = word::to_usize(&offset).ok_or(VmError::MemoryLimitExceeded)?;
                let len = word::to_usize(&len).ok_or(VmError::MemoryLimitExceeded)?;
                if !self.state.consume_gas(gas::log_data_gas(len)?) {
                    return Err(VmError::OutOfGas);
                }
                let data = self.state.memory.read(offset, len)?;
                self.state.logs.push(LogRecord {
                    address: ctx.address,
                    topics,
                    data,
                });
            }

            // every remaining byte pattern was rejected at decode
            other => return Err(VmError::UnsupportedOpcode(other as u8)),
        }
        Ok(())
    }

    fn binary(&mut self, f: impl Fn(&U256, &U256) -> U256) -> VmResult<()> {
        let b = self.state.stack.pop()?;
        let a = self.state.stack.pop()?;
        self.state.stack.push(f(&a, &b))
    }

    fn compare(&mut self, f: impl Fn(&U256, &U256) -> bool) -> VmResult<()> {
        let b = self.state.stack.pop()?;
        let a = self.state.stack.pop()?;
        self.state.stack.push(word::from_bool(f(&a, &b)))
    }

    fn push_address(&mut self, addr: &Address) -> VmResult<()> {
        let mut w = [0u8; 32];
        w[12..].copy_from_slice(addr.as_bytes());
        self.state.stack.push(w)
    }

    /// Pop a memory offset, rejecting values that cannot address memory.
    fn mem_offset(&mut self) -> VmResult<usize> {
        let w = self.state.stack.pop()?;
        word::to_usize(&w).ok_or(VmError::MemoryLimitExceeded)
    }

    /// Pop an (offset, length) pair and copy that span out of memory.
    fn read_span(&mut self) -> VmResult<Vec<u8>> {
        let offset = self.mem_offset()?;
        let len = self.state.stack.pop()?;
        let len = word::to_usize(&len).ok_or(VmError::MemoryLimitExceeded)?;
        self.state.memory.read(offset, len)
    }
}
