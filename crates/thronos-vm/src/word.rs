//! 256-bit word arithmetic.
//!
//! Words live on the operand stack as big-endian byte arrays; arithmetic
//! routes through [`primitive_types::U256`] and converts back. All operations
//! wrap modulo 2^256, and division or modulo by zero yields zero.

use primitive_types::U256 as PtU256;

/// A 256-bit word as stored on the operand stack (big-endian).
pub type U256 = [u8; 32];

/// The zero word.
pub const ZERO: U256 = [0u8; 32];

/// The one word.
pub const ONE: U256 = {
    let mut w = [0u8; 32];
    w[31] = 1;
    w
};

fn to_pt(w: &U256) -> PtU256 {
    PtU256::from_big_endian(w)
}

fn from_pt(v: PtU256) -> U256 {
    let mut w = [0u8; 32];
    v.to_big_endian(&mut w);
    w
}

/// Wrapping addition modulo 2^256.
pub fn add(a: &U256, b: &U256) -> U256 {
    from_pt(to_pt(a).overflowing_add(to_pt(b)).0)
}

/// Wrapping subtraction modulo 2^256.
pub fn sub(a: &U256, b: &U256) -> U256 {
    from_pt(to_pt(a).overflowing_sub(to_pt(b)).0)
}

/// Wrapping multiplication modulo 2^256.
pub fn mul(a: &U256, b: &U256) -> U256 {
    from_pt(to_pt(a).overflowing_mul(to_pt(b)).0)
}

/// Integer division; division by zero yields zero.
pub fn div(a: &U256, b: &U256) -> U256 {
    match to_pt(a).checked_div(to_pt(b)) {
        Some(q) => from_pt(q),
        None => ZERO,
    }
}

/// Integer remainder; modulo by zero yields zero.
pub fn rem(a: &U256, b: &U256) -> U256 {
    match to_pt(a).checked_rem(to_pt(b)) {
        Some(r) => from_pt(r),
        None => ZERO,
    }
}

/// Wrapping exponentiation modulo 2^256.
pub fn exp(a: &U256, b: &U256) -> U256 {
    from_pt(to_pt(a).overflowing_pow(to_pt(b)).0)
}

/// Bitwise AND.
pub fn and(a: &U256, b: &U256) -> U256 {
    let mut w = [0u8; 32];
    for i in 0..32 {
        w[i] = a[i] & b[i];
    }
    w
}

/// Bitwise OR.
pub fn or(a: &U256, b: &U256) -> U256 {
    let mut w = [0u8; 32];
    for i in 0..32 {
        w[i] = a[i] | b[i];
    }
    w
}

/// Bitwise XOR.
pub fn xor(a: &U256, b: &U256) -> U256 {
    let mut w = [0u8; 32];
    for i in 0..32 {
        w[i] = a[i] ^ b[i];
    }
    w
}

/// Unsigned less-than.
pub fn lt(a: &U256, b: &U256) -> bool {
    a < b
}

/// Unsigned greater-than.
pub fn gt(a: &U256, b: &U256) -> bool {
    a > b
}

/// True if the word is all zero bytes.
pub fn is_zero(w: &U256) -> bool {
    w.iter().all(|&b| b == 0)
}

/// Encode a bool as a word: one for true, zero for false.
pub fn from_bool(v: bool) -> U256 {
    if v {
        ONE
    } else {
        ZERO
    }
}

/// Widen a u64 into a word.
pub fn from_u64(v: u64) -> U256 {
    let mut w = [0u8; 32];
    w[24..32].copy_from_slice(&v.to_be_bytes());
    w
}

/// Widen a u128 into a word.
pub fn from_u128(v: u128) -> U256 {
    let mut w = [0u8; 32];
    w[16..32].copy_from_slice(&v.to_be_bytes());
    w
}

/// Narrow a word to u64, or `None` if the high bytes are nonzero.
pub fn to_u64(w: &U256) -> Option<u64> {
    if w[..24].iter().any(|&b| b != 0) {
        return None;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&w[24..32]);
    Some(u64::from_be_bytes(buf))
}

/// Narrow a word to usize, or `None` if it does not fit.
pub fn to_usize(w: &U256) -> Option<usize> {
    to_u64(w).and_then(|v| usize::try_from(v).ok())
}
