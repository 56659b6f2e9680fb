//! Value stream - the 64-symbol alphabet and little-endian base-64 numbers
//!
//! A fumen payload is a sequence of symbols from
//! `A-Z a-z 0-9 + /`, each worth 0..=63. Multi-symbol values are stored least
//! significant digit first: `poll(n)` returns `sum(v_i * 64^i)`.

use fumen_core::{FumenError, Result};

/// Symbols in value order
pub const ENCODE_TABLE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Number of symbols (the digit base)
pub const TABLE_LENGTH: u32 = 64;

/// Decode one symbol into its value
pub fn decode_to_value(ch: char) -> Result<u32> {
    match ch {
        'A'..='Z' => Ok(ch as u32 - 'A' as u32),
        'a'..='z' => Ok(ch as u32 - 'a' as u32 + 26),
        '0'..='9' => Ok(ch as u32 - '0' as u32 + 52),
        '+' => Ok(62),
        '/' => Ok(63),
        _ => Err(FumenError::InvalidSymbol(ch)),
    }
}

/// Encode a value in 0..=63 into its symbol
pub fn encode_value(value: u32) -> Option<char> {
    ENCODE_TABLE.get(value as usize).map(|&b| b as char)
}

/// Read cursor over decoded symbol values
#[derive(Debug, Clone)]
pub struct Values {
    values: Vec<u8>,
    pos: usize,
}

impl Values {
    /// Decode a payload (no header, no `?` markers)
    pub fn parse(payload: &str) -> Result<Self> {
        let values = payload
            .chars()
            .map(|ch| decode_to_value(ch).map(|v| v as u8))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { values, pos: 0 })
    }

    /// Consume `n` symbols (at most 5) as one little-endian base-64 number
    pub fn poll(&mut self, n: usize) -> Result<u32> {
        debug_assert!(n <= 5, "poll({n}) overflows u32");
        let remaining = self.remaining();
        if n > remaining {
            return Err(FumenError::StreamExhausted {
                requested: n,
                remaining,
            });
        }

        let digits = &self.values[self.pos..self.pos + n];
        self.pos += n;
        Ok(digits
            .iter()
            .rev()
            .fold(0, |acc, &d| acc * TABLE_LENGTH + d as u32))
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.values.len()
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.pos
    }
}

/// Write buffer producing a payload
#[derive(Debug, Clone, Default)]
pub struct ValueWriter {
    values: Vec<u8>,
}

impl ValueWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` as `n` base-64 digits, least significant first
    ///
    /// Digits beyond `n` are dropped; callers size `n` to the value range.
    pub fn push(&mut self, value: u32, n: usize) {
        let mut value = value;
        for _ in 0..n {
            self.values.push((value % TABLE_LENGTH) as u8);
            value /= TABLE_LENGTH;
        }
    }

    /// Value of the symbol at `index`
    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).map(|&v| v as u32)
    }

    /// Overwrite the symbol at `index` with a value in 0..=63
    pub fn set(&mut self, index: usize, value: u32) -> bool {
        match self.values.get_mut(index) {
            Some(slot) if value < TABLE_LENGTH => {
                *slot = value as u8;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render the payload as alphabet symbols
    pub fn to_payload(&self) -> String {
        self.values
            .iter()
            .map(|&v| ENCODE_TABLE[v as usize] as char)
            .collect()
    }
}
