//! Operand stack of 256-bit words.

use crate::error::{VmError, VmResult};
use crate::gas::limits::STACK_LIMIT;
use crate::word::U256;

/// Bounded LIFO stack of words. Every mutation is checked against the
/// capacity and depth limits; no operation panics.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    items: Vec<U256>,
}

impl Stack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    /// Current depth.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the stack holds no words.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push a word, failing once the depth limit is reached.
    pub fn push(&mut self, word: U256) -> VmResult<()> {
        if self.items.len() >= STACK_LIMIT {
            return Err(VmError::StackOverflow);
        }
        self.items.push(word);
        Ok(())
    }

    /// Pop the top word.
    pub fn pop(&mut self) -> VmResult<U256> {
        self.items.pop().ok_or(VmError::StackUnderflow)
    }

    /// Read the word `depth` positions below the top without removing it.
    /// `peek(0)` is the top of the stack.
    pub fn peek(&self, depth: usize) -> VmResult<&U256> {
        if depth >= self.items.len() {
            return Err(VmError::StackUnderflow);
        }
        Ok(&self.items[self.items.len() - 1 - depth])
    }

    /// Duplicate the word `depth` positions below the top onto the top.
    /// `dup(0)` duplicates the top word.
    pub fn dup(&mut self, depth: usize) -> VmResult<()> {
        let word = *self.peek(depth)?;
        self.push(word)
    }

    /// Swap the top word with the word `depth` positions below it.
    /// `depth` is at least one.
    pub fn swap(&mut self, depth: usize) -> VmResult<()> {
        if depth >= self.items.len() {
            return Err(VmError::StackUnderflow);
        }
        let top = self.items.len() - 1;
        self.items.swap(top, top - depth);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word;

    #[test]
    fn test_push_pop() {
        let mut stack = Stack::new();
        stack.push(word::from_u64(1)).unwrap();
        stack.push(word::from_u64(2)).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().unwrap(), word::from_u64(2));
        assert_eq!(stack.pop().unwrap(), word::from_u64(1));
        assert_eq!(stack.pop(), Err(VmError::StackUnderflow));
    }

    #[test]
    fn test_overflow_at_limit() {
        let mut stack = Stack::new();
        for i in 0..STACK_LIMIT {
            stack.push(word::from_u64(i as u64)).unwrap();
        }
        assert_eq!(stack.push(word::ZERO), Err(VmError::StackOverflow));
        assert_eq!(stack.len(), STACK_LIMIT);
    }

    #[test]
    fn test_peek() {
        let mut stack = Stack::new();
        stack.push(word::from_u64(10)).unwrap();
        stack.push(word::from_u64(20)).unwrap();
        assert_eq!(stack.peek(0).unwrap(), &word::from_u64(20));
        assert_eq!(stack.peek(1).unwrap(), &word::from_u64(10));
        assert_eq!(stack.peek(2), Err(VmError::StackUnderflow));
    }

    #[test]
    fn test_dup() {
        let mut stack = Stack::new();
        stack.push(word::from_u64(7)).unwrap();
        stack.push(word::from_u64(8)).unwrap();
        stack.dup(1).unwrap();
        assert_eq!(stack.pop().unwrap(), word::from_u64(7));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.dup(5), Err(VmError::StackUnderflow));
    }

    #[test]
    fn test_swap() {
        let mut stack = Stack::new();
        stack.push(word::from_u64(1)).unwrap();
        stack.push(word::from_u64(2)).unwrap();
        stack.push(word::from_u64(3)).unwrap();
        stack.swap(2).unwrap();
        assert_eq!(stack.pop().unwrap(), word::from_u64(1));
        assert_eq!(stack.pop().unwrap(), word::from_u64(2));
        assert_eq!(stack.pop().unwrap(), word::from_u64(3));
    }

    #[test]
    fn test_swap_underflow() {
        let mut stack = Stack::new();
        stack.push(word::from_u64(1)).unwrap();
        assert_eq!(stack.swap(1), Err(VmError::StackUnderflow));
    }
}
