//! Action bit-packing
//!
//! One action is a 3-symbol value holding, from the least significant end:
//!
//! | field | base |
//! |---|---|
//! | piece | 8 |
//! | rotation code | 4 |
//! | anchor cell | 240 |
//! | rise, mirror, color, comment | 2 each |
//! | not-lock | 2 |
//!
//! The anchor cell counts from the top-left of row 22. Some pieces are stored
//! against a different reference cell than their rotation center; the
//! correction table translates between the two.

use serde::{Deserialize, Serialize};

use fumen_core::types::{Coordinate, Piece, Rotation, FIELD_BLOCKS, FIELD_TOP, FIELD_WIDTH};
use fumen_core::{FumenError, Result};

use crate::values::{ValueWriter, Values};

/// Symbols per action
pub const ACTION_SYMBOLS: usize = 3;

/// What happened on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub piece: Piece,
    pub rotation: Rotation,
    pub coordinate: Coordinate,
    /// Raise the field with the block-up line after locking
    pub is_block_up: bool,
    /// Mirror the field after locking
    pub is_mirror: bool,
    pub is_color: bool,
    /// A comment follows this action on the wire
    pub is_comment: bool,
    /// False for a continuation page that leaves the field untouched
    pub is_lock: bool,
}

impl Default for Action {
    /// The action of a fresh blank page
    fn default() -> Self {
        Self {
            piece: Piece::Empty,
            rotation: Rotation::Reverse,
            coordinate: Coordinate::new(0, FIELD_TOP as i8 - 1),
            is_block_up: false,
            is_mirror: false,
            is_color: true,
            is_comment: false,
            is_lock: true,
        }
    }
}

impl Action {
    /// A locking action that places `piece`
    pub fn place(piece: Piece, rotation: Rotation, coordinate: Coordinate) -> Self {
        Self {
            piece,
            rotation,
            coordinate,
            ..Self::default()
        }
    }

    /// True when committing this action writes a mino into the field
    pub fn locks_mino(&self) -> bool {
        self.is_lock && self.piece.is_mino()
    }
}

fn decode_rotation(code: u32, piece: Piece) -> Result<Rotation> {
    match (code, piece) {
        (0, _) => Ok(Rotation::Reverse),
        (1, Piece::I) => Ok(Rotation::Left),
        (1, _) => Ok(Rotation::Right),
        (2, _) => Ok(Rotation::Spawn),
        (3, Piece::I) => Ok(Rotation::Right),
        (3, _) => Ok(Rotation::Left),
        _ => Err(FumenError::UnsupportedRotation(code)),
    }
}

fn encode_rotation(rotation: Rotation, piece: Piece) -> u32 {
    match (rotation, piece) {
        (Rotation::Reverse, _) => 0,
        (Rotation::Left, Piece::I) => 1,
        (Rotation::Right, Piece::I) => 3,
        (Rotation::Right, _) => 1,
        (Rotation::Spawn, _) => 2,
        (Rotation::Left, _) => 3,
    }
}

/// Offset from the stored cell to the anchor
fn correction(piece: Piece, rotation: Rotation) -> (i8, i8) {
    match (piece, rotation) {
        (Piece::O, Rotation::Left) => (1, -1),
        (Piece::O, Rotation::Reverse) => (1, 0),
        (Piece::O, Rotation::Spawn) => (0, -1),
        (Piece::I, Rotation::Reverse) => (1, 0),
        (Piece::I, Rotation::Left) => (0, -1),
        (Piece::S, Rotation::Spawn) => (0, -1),
        (Piece::S, Rotation::Right) => (-1, 0),
        (Piece::Z, Rotation::Spawn) => (0, -1),
        (Piece::Z, Rotation::Left) => (1, 0),
        _ => (0, 0),
    }
}

/// Split a packed action value
pub fn decode_action(value: u32) -> Result<Action> {
    let mut value = value;
    let mut take = |base: u32| {
        let digit = value % base;
        value /= base;
        digit
    };

    let piece_value = take(8);
    let piece = Piece::from_value(piece_value as u8)
        .ok_or(FumenError::UnsupportedPiece(piece_value as i32))?;
    let rotation = decode_rotation(take(4), piece)?;

    let cell = take(FIELD_BLOCKS as u32) as usize;
    let x = (cell % FIELD_WIDTH) as i8;
    let y = (FIELD_TOP - 1) as i8 - (cell / FIELD_WIDTH) as i8;
    let (dx, dy) = correction(piece, rotation);

    let is_block_up = take(2) == 1;
    let is_mirror = take(2) == 1;
    let is_color = take(2) == 1;
    let is_comment = take(2) == 1;
    let is_lock = take(2) == 0;

    Ok(Action {
        piece,
        rotation,
        coordinate: Coordinate::new(x + dx, y + dy),
        is_block_up,
        is_mirror,
        is_color,
        is_comment,
        is_lock,
    })
}

/// Pack an action; the exact inverse of [`decode_action`]
///
/// Gray has no slot in the 3-bit piece field and is rejected.
pub fn encode_action(action: &Action) -> Result<u32> {
    if action.piece == Piece::Gray {
        return Err(FumenError::UnsupportedPiece(Piece::Gray.value() as i32));
    }

    let (dx, dy) = correction(action.piece, action.rotation);
    let x = action.coordinate.x as i32 - dx as i32;
    let y = action.coordinate.y as i32 - dy as i32;
    let cell = (FIELD_TOP as i32 - 1 - y) * FIELD_WIDTH as i32 + x;

    if !(0..FIELD_WIDTH as i32).contains(&x) || !(0..FIELD_BLOCKS as i32).contains(&cell) {
        return Err(FumenError::CoordinateOutOfRange {
            x: action.coordinate.x,
            y: action.coordinate.y,
        });
    }

    let mut value = u32::from(!action.is_lock);
    for flag in [
        action.is_comment,
        action.is_color,
        action.is_mirror,
        action.is_block_up,
    ] {
        value = value * 2 + u32::from(flag);
    }
    value = value * FIELD_BLOCKS as u32 + cell as u32;
    value = value * 4 + encode_rotation(action.rotation, action.piece);
    value = value * 8 + action.piece.value() as u32;
    Ok(value)
}

/// Read one action from the stream
pub fn read_action(values: &mut Values) -> Result<Action> {
    decode_action(values.poll(ACTION_SYMBOLS)?)
}

/// Append one action to the stream
pub fn write_action(writer: &mut ValueWriter, action: &Action) -> Result<()> {
    writer.push(encode_action(action)?, ACTION_SYMBOLS);
    Ok(())
}
