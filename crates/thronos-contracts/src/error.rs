//! Engine-level errors.

use thiserror::Error;
use thronos_primitives::Address;
use thronos_vm::VmError;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the deploy and call entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No contract is registered at the target address
    #[error("contract not found: {0}")]
    ContractNotFound(Address),

    /// Bytecode or call data was not valid hex
    #[error("invalid hex input: {0}")]
    InvalidHex(String),

    /// Execution died with a machine error. Carries the gas actually
    /// consumed so the host can still bill the caller.
    #[error("execution failed: {source} (gas used: {gas_used})")]
    Execution {
        /// The underlying machine error
        source: VmError,
        /// Gas consumed before the failure
        gas_used: u64,
    },

    /// A deployment run hit REVERT, so nothing was registered
    #[error("deployment reverted (gas used: {gas_used})")]
    DeployReverted {
        /// Gas consumed by the reverted run
        gas_used: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EngineError::ContractNotFound(Address::ZERO);
        assert!(err.to_string().starts_with("contract not found: 0x0000"));

        let err = EngineError::Execution {
            source: VmError::OutOfGas,
            gas_used: 77,
        };
        assert_eq!(err.to_string(), "execution failed: out of gas (gas used: 77)");
    }
}
