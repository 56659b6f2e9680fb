//! Pieces module - tetromino shapes and SRS rotation offsets
//!
//! Shapes are stored once per piece in spawn orientation and rotated on
//! demand. Offsets are relative to the piece anchor, `y` up.
//! Reference: https://tetris.wiki/SRS

use arrayvec::ArrayVec;

use crate::types::{Coordinate, Piece, Rotation};

/// Offset of a single mino relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// Canonical spawn-orientation cells, `None` for Empty and Gray
pub fn canonical_cells(piece: Piece) -> Option<PieceShape> {
    let shape = match piece {
        Piece::I => [(0, 0), (-1, 0), (1, 0), (2, 0)],
        Piece::L => [(0, 0), (-1, 0), (1, 0), (1, 1)],
        Piece::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        Piece::Z => [(0, 0), (1, 0), (0, 1), (-1, 1)],
        Piece::T => [(0, 0), (-1, 0), (1, 0), (0, 1)],
        Piece::J => [(0, 0), (-1, 0), (1, 0), (-1, 1)],
        Piece::S => [(0, 0), (-1, 0), (0, 1), (1, 1)],
        Piece::Empty | Piece::Gray => return None,
    };
    Some(shape)
}

/// Rotate spawn-orientation offsets into `rotation`
pub fn rotate_cells(shape: PieceShape, rotation: Rotation) -> PieceShape {
    shape.map(|(x, y)| match rotation {
        Rotation::Spawn => (x, y),
        Rotation::Right => (y, -x),
        Rotation::Reverse => (-x, -y),
        Rotation::Left => (-y, x),
    })
}

/// Get the mino offsets for a piece and rotation
pub fn get_blocks(piece: Piece, rotation: Rotation) -> Option<PieceShape> {
    canonical_cells(piece).map(|shape| rotate_cells(shape, rotation))
}

/// Absolute cells covered by a piece anchored at `coordinate`
pub fn absolute_cells(
    piece: Piece,
    rotation: Rotation,
    coordinate: Coordinate,
) -> Option<[Coordinate; 4]> {
    get_blocks(piece, rotation).map(|shape| shape.map(|(dx, dy)| coordinate.offset(dx, dy)))
}

/// SRS offset data, one row of 5 tests per rotation state
/// Indexed by [`Rotation::index`]
pub type OffsetTable = [[MinoOffset; 5]; 4];

/// J, L, S, T, Z offsets
const JLSTZ_OFFSETS: OffsetTable = [
    // Spawn
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    // Right
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // Reverse
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    // Left
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece offsets (different from JLSTZ)
const I_OFFSETS: OffsetTable = [
    // Spawn
    [(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],
    // Right
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    // Reverse
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    // Left
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

/// O piece has a single offset per state
const O_OFFSETS: [MinoOffset; 4] = [(0, 0), (0, -1), (-1, -1), (-1, 0)];

/// Offset tests for one rotation state of a piece
fn offsets(piece: Piece, rotation: Rotation) -> Option<&'static [MinoOffset]> {
    let idx = rotation.index();
    match piece {
        Piece::I => Some(&I_OFFSETS[idx]),
        Piece::O => Some(std::slice::from_ref(&O_OFFSETS[idx])),
        Piece::L | Piece::Z | Piece::T | Piece::J | Piece::S => Some(&JLSTZ_OFFSETS[idx]),
        Piece::Empty | Piece::Gray => None,
    }
}

/// Result of a rotation test: target state and kick candidates in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationTest {
    pub rotation: Rotation,
    pub kicks: ArrayVec<MinoOffset, 5>,
}

/// Candidate translations for rotating `piece` out of `from`
///
/// Each kick is `offset(from)[i] - offset(to)[i]`. The caller tries them in
/// order and keeps the first placement that does not collide.
/// Returns `None` for Empty and Gray.
pub fn test_rotation(piece: Piece, from: Rotation, clockwise: bool) -> Option<RotationTest> {
    let to = if clockwise {
        from.rotate_cw()
    } else {
        from.rotate_ccw()
    };

    let current = offsets(piece, from)?;
    let next = offsets(piece, to)?;

    let kicks = current
        .iter()
        .zip(next)
        .map(|(&(cx, cy), &(nx, ny))| (cx - nx, cy - ny))
        .collect();

    Some(RotationTest {
        rotation: to,
        kicks,
    })
}

/// Clockwise rotation test
pub fn test_right_rotation(piece: Piece, from: Rotation) -> Option<RotationTest> {
    test_rotation(piece, from, true)
}

/// Counter-clockwise rotation test
pub fn test_left_rotation(piece: Piece, from: Rotation) -> Option<RotationTest> {
    test_rotation(piece, from, false)
}
