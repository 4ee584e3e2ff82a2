//! Linear byte memory with zero-fill growth.

use crate::error::{VmError, VmResult};
use crate::gas::limits::MEMORY_LIMIT;
use crate::word::U256;

/// Byte-addressable scratch memory. Grows on demand, zero-filled, up to a
/// hard cap; reads past the current end grow the memory just like writes do.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create an empty memory.
    pub fn new() -> Self {
        Memory { data: Vec::new() }
    }

    /// Current size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Ensure the range `[offset, offset + len)` is addressable, growing
    /// with zero bytes as needed. Fails if the range overflows or exceeds
    /// the memory cap. A zero-length range touches nothing, whatever its
    /// offset.
    fn grow(&mut self, offset: usize, len: usize) -> VmResult<()> {
        if len == 0 {
            return Ok(());
        }
        let end = offset
            .checked_add(len)
            .ok_or(VmError::MemoryLimitExceeded)?;
        if end > MEMORY_LIMIT {
            return Err(VmError::MemoryLimitExceeded);
        }
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        Ok(())
    }

    /// Copy `len` bytes starting at `offset`, growing first.
    pub fn read(&mut self, offset: usize, len: usize) -> VmResult<Vec<u8>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        self.grow(offset, len)?;
        Ok(self.data[offset..offset + len].to_vec())
    }

    /// Write a byte slice starting at `offset`, growing first.
    pub fn write(&mut self, offset: usize, bytes: &[u8]) -> VmResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.grow(offset, bytes.len())?;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Load the 32-byte word at `offset`.
    pub fn load_word(&mut self, offset: usize) -> VmResult<U256> {
        self.grow(offset, 32)?;
        let mut word = [0u8; 32];
        word.copy_from_slice(&self.data[offset..offset + 32]);
        Ok(word)
    }

    /// Store a 32-byte word at `offset`.
    pub fn store_word(&mut self, offset: usize, word: &U256) -> VmResult<()> {
        self.write(offset, word)
    }

    /// Store a single byte at `offset`.
    pub fn store_byte(&mut self, offset: usize, byte: u8) -> VmResult<()> {
        self.write(offset, &[byte])
    }
}
