//! Deploy/call round trips through the engine and registry.

use thronos_contracts::{BlockInfo, ContractEngine, ContractStore, EngineError, InMemoryStore};
use thronos_primitives::Address;
use thronos_vm::VmError;

const GAS: u64 = 1_000_000;

// Increments storage slot 0 on every call and returns the new value.
//  0: PUSH1 0, SLOAD        load counter
//  3: PUSH1 1, ADD          counter + 1
//  6: DUP1                  keep a copy to return
//  7: PUSH1 0, SWAP1        arrange key below value
// 10: SSTORE
// 11: PUSH1 0, MSTORE
// 14: PUSH1 32, PUSH1 0, RETURN
const COUNTER: &str = "600054600101806000905560005260206000f3";

fn engine() -> ContractEngine<InMemoryStore> {
    ContractEngine::new(InMemoryStore::new())
}

fn deployer() -> Address {
    Address::from_bytes([0xaa; 20])
}

#[test]
fn deploy_then_call_increments_counter() {
    let engine = engine();
    let receipt = engine.deploy(deployer(), COUNTER, 0, GAS).unwrap();

    let first = engine
        .call(deployer(), receipt.address, "", 0, GAS)
        .unwrap();
    assert!(first.success);
    assert_eq!(first.output[31], 1);

    // storage committed, so the second call sees the increment
    let second = engine
        .call(deployer(), receipt.address, "", 0, GAS)
        .unwrap();
    assert_eq!(second.output[31], 2);
    assert_eq!(second.gas_used, first.gas_used);
}

#[test]
fn deploy_run_does_not_seed_storage() {
    // the deployment run executes the counter once, but the registered
    // contract still starts from an empty storage
    let engine = engine();
    let receipt = engine.deploy(deployer(), COUNTER, 0, GAS).unwrap();
    assert!(receipt.gas_used > 0);

    let record = engine.store().get(&receipt.address).unwrap();
    assert!(record.storage.is_empty());

    let first = engine
        .call(deployer(), receipt.address, "", 0, GAS)
        .unwrap();
    assert_eq!(first.output[31], 1);
}

// Halts when called with empty data; stores then reverts otherwise.
//  0: CALLDATASIZE
//  1: PUSH1 5, JUMPI
//  4: STOP
//  5: JUMPDEST
//  6: PUSH1 1, PUSH1 9, SSTORE
// 11: PUSH1 0, PUSH1 0, REVERT
const REVERTER: &str = "36600557005b600160095560006000fd";

#[test]
fn revert_discards_storage_and_value() {
    let engine = engine();
    let receipt = engine.deploy(deployer(), REVERTER, 0, GAS).unwrap();

    let result = engine
        .call(deployer(), receipt.address, "0xff", 25, GAS)
        .unwrap();
    assert!(!result.success);

    let record = engine.store().get(&receipt.address).unwrap();
    assert!(record.storage.is_empty());
    assert_eq!(record.balance, 0);
}

#[test]
fn successful_call_credits_value() {
    let engine = engine();
    let receipt = engine.deploy(deployer(), "0x00", 10, GAS).unwrap();

    engine
        .call(deployer(), receipt.address, "", 30, GAS)
        .unwrap();
    assert_eq!(engine.store().get(&receipt.address).unwrap().balance, 40);
}

#[test]
fn deploy_addresses_are_distinct_per_sequence() {
    let engine = engine();
    let a = engine.deploy(deployer(), "0x00", 0, GAS).unwrap();
    let b = engine.deploy(deployer(), "0x00", 0, GAS).unwrap();
    assert_ne!(a.address, b.address);
    assert_eq!(engine.store().len(), 2);
}

#[test]
fn deploy_failure_registers_nothing() {
    let engine = engine();
    // 0x0c is an unassigned instruction byte
    let err = engine.deploy(deployer(), "0x0c", 0, GAS).unwrap_err();
    assert_eq!(
        err,
        EngineError::Execution {
            source: VmError::UnsupportedOpcode(0x0c),
            gas_used: 0,
        }
    );
    assert!(engine.store().is_empty());
}

#[test]
fn deploy_revert_registers_nothing() {
    let engine = engine();
    // PUSH1 0, PUSH1 0, REVERT
    let err = engine.deploy(deployer(), "60006000fd", 0, GAS).unwrap_err();
    assert!(matches!(err, EngineError::DeployReverted { .. }));
    assert!(engine.store().is_empty());
}

#[test]
fn out_of_gas_call_is_billed_the_limit() {
    let engine = engine();
    let receipt = engine.deploy(deployer(), COUNTER, 0, GAS).unwrap();

    let err = engine
        .call(deployer(), receipt.address, "", 0, 100)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Execution {
            source: VmError::OutOfGas,
            gas_used: 100,
        }
    );
}

#[test]
fn calls_see_the_configured_block() {
    // NUMBER, PUSH1 0, MSTORE, PUSH1 32, PUSH1 0, RETURN
    let code = "4360005260206000f3";
    let engine = engine().with_block(BlockInfo {
        number: 7,
        timestamp: 1_700_000_000,
    });
    let receipt = engine.deploy(deployer(), code, 0, GAS).unwrap();
    // the deployment run itself sees block zero
    assert!(receipt.output.iter().all(|&b| b == 0));

    let result = engine
        .call(deployer(), receipt.address, "", 0, GAS)
        .unwrap();
    assert_eq!(result.output[31], 7);
}

#[test]
fn call_receipt_reports_logs_and_hex_output() {
    // PUSH1 0, PUSH1 0, LOG0, PUSH1 1, PUSH1 31, MSTORE8,
    // PUSH1 32, PUSH1 0, RETURN
    let code = "60006000a06001601f5360206000f3";
    let engine = engine();
    let receipt = engine.deploy(deployer(), code, 0, GAS).unwrap();

    let result = engine
        .call(deployer(), receipt.address, "", 0, GAS)
        .unwrap();
    assert!(result.success);
    assert_eq!(result.logs.len(), 1);
    assert_eq!(result.logs[0].address, receipt.address);
    assert_eq!(
        result.output_hex(),
        "0x0000000000000000000000000000000000000000000000000000000000000001"
    );
}
