//! Instruction set and decode table.

/// One-byte instructions. Discriminants are the wire encoding.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // halting and arithmetic
    STOP = 0x00,
    ADD = 0x01,
    MUL = 0x02,
    SUB = 0x03,
    DIV = 0x04,
    MOD = 0x06,
    EXP = 0x0a,

    // comparison and bitwise
    LT = 0x10,
    GT = 0x11,
    EQ = 0x14,
    ISZERO = 0x15,
    AND = 0x16,
    OR = 0x17,
    XOR = 0x18,

    // environment
    ADDRESS = 0x30,
    CALLER = 0x33,
    CALLVALUE = 0x34,
    CALLDATALOAD = 0x35,
    CALLDATASIZE = 0x36,
    TIMESTAMP = 0x42,
    NUMBER = 0x43,

    // stack, memory, storage, flow
    POP = 0x50,
    MLOAD = 0x51,
    MSTORE = 0x52,
    MSTORE8 = 0x53,
    SLOAD = 0x54,
    SSTORE = 0x55,
    JUMP = 0x56,
    JUMPI = 0x57,
    PC = 0x58,
    JUMPDEST = 0x5b,

    // pushes
    PUSH1 = 0x60,
    PUSH2 = 0x61,
    PUSH3 = 0x62,
    PUSH4 = 0x63,
    PUSH5 = 0x64,
    PUSH6 = 0x65,
    PUSH7 = 0x66,
    PUSH8 = 0x67,
    PUSH9 = 0x68,
    PUSH10 = 0x69,
    PUSH11 = 0x6a,
    PUSH12 = 0x6b,
    PUSH13 = 0x6c,
    PUSH14 = 0x6d,
    PUSH15 = 0x6e,
    PUSH16 = 0x6f,
    PUSH17 = 0x70,
    PUSH18 = 0x71,
    PUSH19 = 0x72,
    PUSH20 = 0x73,
    PUSH21 = 0x74,
    PUSH22 = 0x75,
    PUSH23 = 0x76,
    PUSH24 = 0x77,
    PUSH25 = 0x78,
    PUSH26 = 0x79,
    PUSH27 = 0x7a,
    PUSH28 = 0x7b,
    PUSH29 = 0x7c,
    PUSH30 = 0x7d,
    PUSH31 = 0x7e,
    PUSH32 = 0x7f,

    // dups
    DUP1 = 0x80,
    DUP2 = 0x81,
    DUP3 = 0x82,
    DUP4 = 0x83,
    DUP5 = 0x84,
    DUP6 = 0x85,
    DUP7 = 0x86,
    DUP8 = 0x87,
    DUP9 = 0x88,
    DUP10 = 0x89,
    DUP11 = 0x8a,
    DUP12 = 0x8b,
    DUP13 = 0x8c,
    DUP14 = 0x8d,
    DUP15 = 0x8e,
    DUP16 = 0x8f,

    // swaps
    SWAP1 = 0x90,
    SWAP2 = 0x91,
    SWAP3 = 0x92,
    SWAP4 = 0x93,
    SWAP5 = 0x94,
    SWAP6 = 0x95,
    SWAP7 = 0x96,
    SWAP8 = 0x97,
    SWAP9 = 0x98,
    SWAP10 = 0x99,
    SWAP11 = 0x9a,
    SWAP12 = 0x9b,
    SWAP13 = 0x9c,
    SWAP14 = 0x9d,
    SWAP15 = 0x9e,
    SWAP16 = 0x9f,

    // logs
    LOG0 = 0xa0,
    LOG1 = 0xa1,
    LOG2 = 0xa2,
    LOG3 = 0xa3,
    LOG4 = 0xa4,

    // terminators
    RETURN = 0xf3,
    REVERT = 0xfd,
}

/// Decode table indexed by instruction byte. Unassigned bytes are `None`.
const fn build_table() -> [Option<Opcode>; 256] {
    use Opcode::*;
    let mut table: [Option<Opcode>; 256] = [None; 256];
    table[STOP as usize] = Some(STOP);
    table[ADD as usize] = Some(ADD);
    table[MUL as usize] = Some(MUL);
    table[SUB as usize] = Some(SUB);
    table[DIV as usize] = Some(DIV);
    table[MOD as usize] = Some(MOD);
    table[EXP as usize] = Some(EXP);
    table[LT as usize] = Some(LT);
    table[GT as usize] = Some(GT);
    table[EQ as usize] = Some(EQ);
    table[ISZERO as usize] = Some(ISZERO);
    table[AND as usize] = Some(AND);
    table[OR as usize] = Some(OR);
    table[XOR as usize] = Some(XOR);
    table[ADDRESS as usize] = Some(ADDRESS);
    table[CALLER as usize] = Some(CALLER);
    table[CALLVALUE as usize] = Some(CALLVALUE);
    table[CALLDATALOAD as usize] = Some(CALLDATALOAD);
    table[CALLDATASIZE as usize] = Some(CALLDATASIZE);
    table[TIMESTAMP as usize] = Some(TIMESTAMP);
    table[NUMBER as usize] = Some(NUMBER);
    table[POP as usize] = Some(POP);
    table[MLOAD as usize] = Some(MLOAD);
    table[MSTORE as usize] = Some(MSTORE);
    table[MSTORE8 as usize] = Some(MSTORE8);
    table[SLOAD as usize] = Some(SLOAD);
    table[SSTORE as usize] = Some(SSTORE);
    table[JUMP as usize] = Some(JUMP);
    table[JUMPI as usize] = Some(JUMPI);
    table[PC as usize] = Some(PC);
    table[JUMPDEST as usize] = Some(JUMPDEST);
    table[RETURN as usize] = Some(RETURN);
    table[REVERT as usize] = Some(REVERT);

    // PUSH1..PUSH32, DUP1..DUP16, SWAP1..SWAP16, LOG0..LOG4 are contiguous
    // discriminant ranges; fill them by value.
    let mut byte = 0x60u8;
    while byte <= 0xa4 {
        // SAFETY: every byte in 0x60..=0xa4 is a declared discriminant.
        table[byte as usize] = Some(unsafe { core::mem::transmute::<u8, Opcode>(byte) });
        byte += 1;
    }
    table
}

impl Opcode {
    /// Byte-indexed decode table covering all 256 instruction bytes.
    pub const TABLE: [Option<Opcode>; 256] = build_table();

    /// Decode an instruction byte, `None` for unassigned bytes.
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        Self::TABLE[byte as usize]
    }

    /// True for PUSH1 through PUSH32.
    pub fn is_push(&self) -> bool {
        let b = *self as u8;
        (0x60..=0x7f).contains(&b)
    }

    /// Number of immediate bytes for a push instruction (1 to 32), zero
    /// otherwise.
    pub fn push_size(&self) -> usize {
        if self.is_push() {
            (*self as u8 - 0x5f) as usize
        } else {
            0
        }
    }

    /// Depth for a DUP instruction (1 to 16), `None` otherwise.
    pub fn dup_depth(&self) -> Option<usize> {
        let b = *self as u8;
        if (0x80..=0x8f).contains(&b) {
            Some((b - 0x7f) as usize)
        } else {
            None
        }
    }

    /// Depth for a SWAP instruction (1 to 16), `None` otherwise.
    pub fn swap_depth(&self) -> Option<usize> {
        let b = *self as u8;
        if (0x90..=0x9f).contains(&b) {
            Some((b - 0x8f) as usize)
        } else {
            None
        }
    }

    /// Topic count for a LOG instruction (0 to 4), `None` otherwise.
    pub fn log_topics(&self) -> Option<usize> {
        let b = *self as u8;
        if (0xa0..=0xa4).contains(&b) {
            Some((b - 0xa0) as usize)
        } else {
            None
        }
    }
}
