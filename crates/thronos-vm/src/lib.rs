//! # thronos-vm
//!
//! Stack-based bytecode execution engine: a gas-metered fetch-decode-execute
//! loop over 256-bit words, with bounds-checked stack, memory, and
//! per-contract storage access.
//!
//! The engine is single-threaded and synchronous; one [`Interpreter`] runs
//! one program to a terminal state (halt, revert, or failure) and is then
//! discarded. Gas is the only cancellation mechanism.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod error;
pub mod gas;
pub mod interpreter;
pub mod memory;
pub mod opcode;
pub mod stack;
pub mod state;
pub mod word;

pub use context::ExecutionContext;
pub use error::{LogRecord, Outcome, VmError, VmResult};
pub use interpreter::Interpreter;
pub use memory::Memory;
pub use opcode::Opcode;
pub use stack::Stack;
pub use state::ExecutionState;
pub use word::U256;
