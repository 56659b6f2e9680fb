//! Comment packing - printable-ASCII table, 4 chars per 5-symbol group
//!
//! Comment text is stored escaped (`%XX` / `%uXXXX`, the classic URI
//! `escape` form) so every stored char is printable ASCII. Each char is an
//! index into [`COMMENT_TABLE`]; four indices pack into one base-96 number
//! written with `push(value, 5)`. The escaped length precedes the groups as a
//! 2-symbol value.

use fumen_core::{FumenError, Result};

use crate::values::{ValueWriter, Values};

/// Printable ASCII, 0x20 ' ' through 0x7E '~'
pub const COMMENT_TABLE: &str = concat!(
    " !\"#$%&'()*+,-./0123456789:;<=>?@",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`",
    "abcdefghijklmnopqrstuvwxyz{|}~",
);

/// Base used to pack comment chars
pub const COMMENT_BASE: u32 = 96;

/// Longest escaped comment the 2-symbol length can describe
pub const MAX_COMMENT_LENGTH: usize = 4095;

const CHARS_PER_GROUP: usize = 4;

/// Table index of a comment char
pub fn encode_comment_char(ch: char) -> Result<u32> {
    match ch {
        ' '..='~' => Ok(ch as u32 - ' ' as u32),
        _ => Err(FumenError::InvalidCommentChar(ch)),
    }
}

/// Comment char at a table index
pub fn decode_comment_char(index: u32) -> Result<char> {
    COMMENT_TABLE
        .as_bytes()
        .get(index as usize)
        .map(|&b| b as char)
        .ok_or_else(|| FumenError::InvalidCommentChar(char::from_u32(0x20 + index).unwrap_or('\u{7f}')))
}

/// Split one group value into its four table indices
pub fn split_comment_group(value: u32) -> [u32; 4] {
    let mut value = value;
    [0; CHARS_PER_GROUP].map(|_| {
        let index = value % COMMENT_BASE;
        value /= COMMENT_BASE;
        index
    })
}

/// Pack up to four escaped chars into one group value
pub fn pack_comment_group(chars: &[char]) -> Result<u32> {
    chars
        .iter()
        .take(CHARS_PER_GROUP)
        .rev()
        .try_fold(0, |acc, &ch| Ok(acc * COMMENT_BASE + encode_comment_char(ch)?))
}

/// Read a length-prefixed comment and unescape it
pub fn read_comment(values: &mut Values) -> Result<String> {
    let length = values.poll(2)? as usize;
    let groups = (length + 3) / CHARS_PER_GROUP;

    let mut indices = Vec::with_capacity(groups * CHARS_PER_GROUP);
    for _ in 0..groups {
        indices.extend(split_comment_group(values.poll(5)?));
    }
    indices.truncate(length);

    let escaped = indices
        .into_iter()
        .map(decode_comment_char)
        .collect::<Result<String>>()?;
    Ok(unescape(&escaped))
}

/// Escape and write a comment
///
/// Returns true when the escaped text was longer than [`MAX_COMMENT_LENGTH`]
/// and had to be cut.
pub fn write_comment(writer: &mut ValueWriter, comment: &str) -> Result<bool> {
    let mut escaped: Vec<char> = escape(comment).chars().collect();
    let truncated = escaped.len() > MAX_COMMENT_LENGTH;
    escaped.truncate(MAX_COMMENT_LENGTH);

    writer.push(escaped.len() as u32, 2);
    for group in escaped.chunks(CHARS_PER_GROUP) {
        writer.push(pack_comment_group(group)?, 5);
    }
    Ok(truncated)
}

fn is_unescaped(unit: u16) -> bool {
    matches!(unit as u8, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'@' | b'*' | b'_' | b'+' | b'-' | b'.' | b'/')
        && unit < 0x80
}

/// Classic URI escape: `%XX` below U+0100, `%uXXXX` per UTF-16 unit above
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for unit in text.encode_utf16() {
        if is_unescaped(unit) {
            out.push(unit as u8 as char);
        } else if unit < 0x100 {
            out.push_str(&format!("%{unit:02X}"));
        } else {
            out.push_str(&format!("%u{unit:04X}"));
        }
    }
    out
}

fn hex_unit(digits: &[char]) -> Option<u16> {
    let s: String = digits.iter().collect();
    if s.chars().all(|c| c.is_ascii_hexdigit()) {
        u16::from_str_radix(&s, 16).ok()
    } else {
        None
    }
}

/// Inverse of [`escape`]; malformed escapes are kept literally
pub fn unescape(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut units: Vec<u16> = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '%' {
            if chars.get(i + 1) == Some(&'u') {
                if let Some(unit) = chars.get(i + 2..i + 6).and_then(hex_unit) {
                    units.push(unit);
                    i += 6;
                    continue;
                }
            }
            if let Some(unit) = chars.get(i + 1..i + 3).and_then(hex_unit) {
                units.push(unit);
                i += 3;
                continue;
            }
        }
        let mut buf = [0u16; 2];
        units.extend_from_slice(chars[i].encode_utf16(&mut buf));
        i += 1;
    }

    String::from_utf16_lossy(&units)
}
