//! Up-front gas estimates for host fee quoting.
//!
//! These are flat heuristics over input size, not dry runs; actual usage
//! comes back in the receipt.

/// Base charge covering registry bookkeeping for any entry point.
pub const BASE_GAS: u64 = 21_000;

/// Per-byte charge for deployed bytecode.
pub const DEPLOY_BYTE_GAS: u64 = 200;

/// Per-byte charge for call data.
pub const CALL_DATA_BYTE_GAS: u64 = 16;

/// Estimate for deploying `bytecode_len` bytes. Saturates rather than
/// wrapping on pathological lengths.
pub fn deploy_gas(bytecode_len: usize) -> u64 {
    BASE_GAS.saturating_add(DEPLOY_BYTE_GAS.saturating_mul(bytecode_len as u64))
}

/// Estimate for a call with `call_data_len` bytes of input. Saturates
/// rather than wrapping on pathological lengths.
pub fn call_gas(call_data_len: usize) -> u64 {
    BASE_GAS.saturating_add(CALL_DATA_BYTE_GAS.saturating_mul(call_data_len as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_estimate_scales_with_code() {
        assert_eq!(deploy_gas(0), 21_000);
        assert_eq!(deploy_gas(10), 23_000);
        assert!(deploy_gas(100) > deploy_gas(10));
    }

    #[test]
    fn test_call_estimate_scales_with_data() {
        assert_eq!(call_gas(0), 21_000);
        assert_eq!(call_gas(4), 21_064);
    }

    #[test]
    fn test_estimates_saturate_on_huge_lengths() {
        assert_eq!(deploy_gas(usize::MAX), u64::MAX);
        assert_eq!(call_gas(usize::MAX), u64::MAX);
    }
}
