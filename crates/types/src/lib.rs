//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the fumen codec, the
//! quiz engine and the terminal preview. All types are plain data with serde
//! derives so they can travel through the CLI as JSON.
//!
//! # Field Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FIELD_WIDTH` | 10 | Columns (indexed 0-9, left to right) |
//! | `FIELD_HEIGHT` | 24 | Rows held by a `Field` (indexed 0-23, bottom to top) |
//! | `FIELD_TOP` | 23 | Playable rows carried on the wire (rows 0-22) |
//! | `FIELD_BLOCKS` | 240 | Cells in a `Field`, and cells in one wire field diff |
//!
//! Coordinates are `(x, y)` with `y = 0` the bottom playable row and `y`
//! growing upward. The flat index of a cell is `x + y * FIELD_WIDTH`.
//!
//! # Wire Values
//!
//! Piece discriminants are the numbers stored in fumen strings:
//!
//! | Piece | Value | Letter |
//! |-------|-------|--------|
//! | Empty | 0 | `_` |
//! | I | 1 | `I` |
//! | L | 2 | `L` |
//! | O | 3 | `O` |
//! | Z | 4 | `Z` |
//! | T | 5 | `T` |
//! | J | 6 | `J` |
//! | S | 7 | `S` |
//! | Gray | 8 | `X` |
//!
//! # Examples
//!
//! ```
//! use fumen_types::{Piece, Rotation, FIELD_BLOCKS, FIELD_WIDTH};
//!
//! let piece = Piece::from_char('t').unwrap();
//! assert_eq!(piece, Piece::T);
//! assert!(piece.is_mino());
//! assert!(!Piece::Gray.is_mino());
//!
//! assert_eq!(Rotation::Spawn.rotate_cw(), Rotation::Right);
//! assert_eq!(FIELD_BLOCKS, 240);
//! assert_eq!(FIELD_WIDTH, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Rows held by a field (23 playable rows plus a ceiling row)
pub const FIELD_HEIGHT: usize = 24;

/// Number of playable rows encoded on the wire
pub const FIELD_TOP: usize = 23;

/// Cells in a field
pub const FIELD_BLOCKS: usize = FIELD_WIDTH * FIELD_HEIGHT;

/// Cells in the playable part of a field
pub const PLAY_BLOCKS: usize = FIELD_WIDTH * FIELD_TOP;

/// Block kinds that can occupy a field cell
///
/// `Empty` is the absence of a block and `Gray` is a filler block (garbage)
/// that is drawn but never rotated. The remaining seven are minos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Piece {
    #[default]
    Empty = 0,
    I = 1,
    L = 2,
    O = 3,
    Z = 4,
    T = 5,
    J = 6,
    S = 7,
    Gray = 8,
}

impl Piece {
    /// The seven minos in wire order
    pub const MINOS: [Piece; 7] = [
        Piece::I,
        Piece::L,
        Piece::O,
        Piece::Z,
        Piece::T,
        Piece::J,
        Piece::S,
    ];

    /// Decode a wire value
    ///
    /// # Examples
    ///
    /// ```
    /// use fumen_types::Piece;
    ///
    /// assert_eq!(Piece::from_value(0), Some(Piece::Empty));
    /// assert_eq!(Piece::from_value(5), Some(Piece::T));
    /// assert_eq!(Piece::from_value(8), Some(Piece::Gray));
    /// assert_eq!(Piece::from_value(9), None);
    /// ```
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Piece::Empty),
            1 => Some(Piece::I),
            2 => Some(Piece::L),
            3 => Some(Piece::O),
            4 => Some(Piece::Z),
            5 => Some(Piece::T),
            6 => Some(Piece::J),
            7 => Some(Piece::S),
            8 => Some(Piece::Gray),
            _ => None,
        }
    }

    /// Wire value of this piece
    pub fn value(self) -> u8 {
        self as u8
    }

    /// True for the seven placeable tetrominoes
    pub fn is_mino(self) -> bool {
        !matches!(self, Piece::Empty | Piece::Gray)
    }

    /// Parse a piece letter (case-insensitive)
    ///
    /// Accepts the mino letters, `X` for gray and `_` for empty.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            '_' => Some(Piece::Empty),
            'I' => Some(Piece::I),
            'L' => Some(Piece::L),
            'O' => Some(Piece::O),
            'Z' => Some(Piece::Z),
            'T' => Some(Piece::T),
            'J' => Some(Piece::J),
            'S' => Some(Piece::S),
            'X' => Some(Piece::Gray),
            _ => None,
        }
    }

    /// Letter used in quiz strings and row dumps
    pub fn as_char(self) -> char {
        match self {
            Piece::Empty => '_',
            Piece::I => 'I',
            Piece::L => 'L',
            Piece::O => 'O',
            Piece::Z => 'Z',
            Piece::T => 'T',
            Piece::J => 'J',
            Piece::S => 'S',
            Piece::Gray => 'X',
        }
    }
}

/// Rotation states
///
/// The rotation cycle goes: Spawn → Right → Reverse → Left → Spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Spawn,
    Right,
    Reverse,
    Left,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use fumen_types::Rotation;
    ///
    /// assert_eq!(Rotation::Spawn.rotate_cw(), Rotation::Right);
    /// assert_eq!(Rotation::Right.rotate_cw(), Rotation::Reverse);
    /// assert_eq!(Rotation::Reverse.rotate_cw(), Rotation::Left);
    /// assert_eq!(Rotation::Left.rotate_cw(), Rotation::Spawn);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::Spawn => Rotation::Right,
            Rotation::Right => Rotation::Reverse,
            Rotation::Reverse => Rotation::Left,
            Rotation::Left => Rotation::Spawn,
        }
    }

    /// Rotate counter-clockwise (90°)
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::Spawn => Rotation::Left,
            Rotation::Left => Rotation::Reverse,
            Rotation::Reverse => Rotation::Right,
            Rotation::Right => Rotation::Spawn,
        }
    }

    /// Index into per-rotation tables (Spawn=0, Right=1, Reverse=2, Left=3)
    pub fn index(self) -> usize {
        match self {
            Rotation::Spawn => 0,
            Rotation::Right => 1,
            Rotation::Reverse => 2,
            Rotation::Left => 3,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spawn" => Some(Rotation::Spawn),
            "right" => Some(Rotation::Right),
            "reverse" => Some(Rotation::Reverse),
            "left" => Some(Rotation::Left),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(self) -> &'static str {
        match self {
            Rotation::Spawn => "spawn",
            Rotation::Right => "right",
            Rotation::Reverse => "reverse",
            Rotation::Left => "left",
        }
    }
}

/// Cell position, `y` measured upward from the field floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i8,
    pub y: i8,
}

impl Coordinate {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Translate by an offset
    ///
    /// Wraps on overflow; callers bounds-check the result against the field.
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}
