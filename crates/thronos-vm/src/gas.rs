//! Gas schedule and resource limits.

use crate::error::{VmError, VmResult};
use crate::opcode::Opcode;

/// Hard resource limits.
pub mod limits {
    /// Maximum operand stack depth.
    pub const STACK_LIMIT: usize = 1024;
    /// Maximum memory size in bytes (1 MiB).
    pub const MEMORY_LIMIT: usize = 1024 * 1024;
}

/// Static gas costs.
pub mod cost {
    /// Terminal instructions (STOP, RETURN, REVERT).
    pub const ZERO: u64 = 0;
    /// JUMPDEST.
    pub const JUMPDEST: u64 = 1;
    /// Environment reads and POP / PC.
    pub const BASE: u64 = 2;
    /// Arithmetic, comparison, bitwise, memory, push, dup, swap.
    pub const VERY_LOW: u64 = 3;
    /// MUL, DIV, MOD.
    pub const LOW: u64 = 5;
    /// JUMP.
    pub const MID: u64 = 8;
    /// EXP and JUMPI.
    pub const HIGH: u64 = 10;
    /// Storage read.
    pub const SLOAD: u64 = 200;
    /// Storage write.
    pub const SSTORE: u64 = 5000;
    /// LOG base, and again per topic.
    pub const LOG: u64 = 375;
    /// LOG, per byte of payload.
    pub const LOG_DATA: u64 = 8;
}

/// Static cost charged for an instruction before it executes. LOG payload
/// bytes are charged separately via [`log_data_gas`].
pub fn opcode_cost(op: Opcode) -> u64 {
    use Opcode::*;
    match op {
        STOP | RETURN | REVERT => cost::ZERO,
        JUMPDEST => cost::JUMPDEST,
        ADDRESS | CALLER | CALLVALUE | CALLDATASIZE | TIMESTAMP | NUMBER | POP | PC => cost::BASE,
        MUL | DIV | MOD => cost::LOW,
        JUMP => cost::MID,
        EXP | JUMPI => cost::HIGH,
        SLOAD => cost::SLOAD,
        SSTORE => cost::SSTORE,
        op if op.log_topics().is_some() => {
            let topics = op.log_topics().unwrap_or(0) as u64;
            cost::LOG + cost::LOG * topics
        }
        // ADD, SUB, comparisons, bitwise, CALLDATALOAD, memory ops,
        // PUSH1..PUSH32, DUP1..DUP16, SWAP1..SWAP16
        _ => cost::VERY_LOW,
    }
}

/// Per-byte cost of a LOG payload. Fails rather than wrapping on
/// pathological sizes.
pub fn log_data_gas(len: usize) -> VmResult<u64> {
    u64::try_from(len)
        .ok()
        .and_then(|l| l.checked_mul(cost::LOG_DATA))
        .ok_or(VmError::OutOfGas)
}
