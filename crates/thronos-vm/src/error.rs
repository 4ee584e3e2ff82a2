//! Execution errors and terminal outcomes.

use thiserror::Error;
use thronos_primitives::{Address, H256};

/// Errors that abort bytecode execution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Push would exceed the operand stack capacity
    #[error("stack overflow")]
    StackOverflow,

    /// Pop or peek on an empty (or too shallow) stack
    #[error("stack underflow")]
    StackUnderflow,

    /// Memory access beyond the addressable limit
    #[error("memory limit exceeded")]
    MemoryLimitExceeded,

    /// Push instruction runs past the end of the bytecode
    #[error("truncated push: needed {needed} immediate bytes, {available} remain")]
    InvalidPush {
        /// Immediate bytes the instruction requires
        needed: usize,
        /// Immediate bytes left in the program
        available: usize,
    },

    /// Gas exhausted
    #[error("out of gas")]
    OutOfGas,

    /// Byte that does not decode to any instruction
    #[error("unsupported opcode: 0x{0:02x}")]
    UnsupportedOpcode(u8),
}

/// Result alias for execution operations.
pub type VmResult<T> = Result<T, VmError>;

/// A log entry emitted during execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Contract that emitted the log
    pub address: Address,
    /// Indexed topics (zero to four)
    pub topics: Vec<H256>,
    /// Unindexed payload copied from memory
    pub data: Vec<u8>,
}

/// Terminal result of running a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// True only for a normal halt (STOP, RETURN, or end of code)
    pub success: bool,
    /// True for REVERT and for any aborting error
    pub reverted: bool,
    /// Gas consumed by the run
    pub gas_used: u64,
    /// Return data, if any
    pub output: Vec<u8>,
    /// Logs emitted before the terminal state
    pub logs: Vec<LogRecord>,
    /// The aborting error, if the run failed; `None` for halts and reverts
    pub error: Option<VmError>,
}

impl Outcome {
    /// A normal halt.
    pub fn halted(gas_used: u64, output: Vec<u8>, logs: Vec<LogRecord>) -> Self {
        Outcome {
            success: true,
            reverted: false,
            gas_used,
            output,
            logs,
            error: None,
        }
    }

    /// An explicit REVERT: not an error, but all effects are to be discarded.
    pub fn reverted(gas_used: u64, output: Vec<u8>) -> Self {
        Outcome {
            success: false,
            reverted: true,
            gas_used,
            output,
            logs: Vec::new(),
            error: None,
        }
    }

    /// An aborting failure.
    pub fn failed(gas_used: u64, error: VmError) -> Self {
        Outcome {
            success: false,
            reverted: true,
            gas_used,
            output: Vec::new(),
            logs: Vec::new(),
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(VmError::OutOfGas.to_string(), "out of gas");
        assert_eq!(
            VmError::UnsupportedOpcode(0x0c).to_string(),
            "unsupported opcode: 0x0c"
        );
        assert_eq!(
            VmError::InvalidPush {
                needed: 4,
                available: 1
            }
            .to_string(),
            "truncated push: needed 4 immediate bytes, 1 remain"
        );
    }

    #[test]
    fn test_outcome_constructors() {
        let ok = Outcome::halted(21, vec![1], Vec::new());
        assert!(ok.success && !ok.reverted && ok.error.is_none());

        let rev = Outcome::reverted(10, vec![2]);
        assert!(!rev.success && rev.reverted && rev.error.is_none());

        let bad = Outcome::failed(5, VmError::StackUnderflow);
        assert!(!bad.success && bad.reverted);
        assert_eq!(bad.error, Some(VmError::StackUnderflow));
    }
}
