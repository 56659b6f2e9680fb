//! Inference module - recover piece, rotation and anchor from four cells
//!
//! Cells are flat field indices (`x + y * 10`). The four indices are sorted
//! and normalized against the smallest one; the resulting shape signature is
//! looked up in a static table with one entry per distinct piece shape.
//! Where rotations produce the same shape (I, O, S, Z) the table holds the
//! Spawn orientation, then Right.

use serde::{Deserialize, Serialize};

use crate::error::{FumenError, Result};
use crate::pieces::MinoOffset;
use crate::types::{Coordinate, Piece, Rotation, FIELD_BLOCKS, FIELD_WIDTH};

/// A piece placement recovered from its cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InferredPiece {
    pub piece: Piece,
    pub rotation: Rotation,
    pub coordinate: Coordinate,
}

/// Cell offsets from the lowest-index cell, in index order
type Signature = [MinoOffset; 4];

struct SignatureEntry {
    signature: Signature,
    piece: Piece,
    rotation: Rotation,
    /// Anchor relative to the lowest-index cell
    offset: MinoOffset,
}

const fn entry(
    signature: Signature,
    piece: Piece,
    rotation: Rotation,
    offset: MinoOffset,
) -> SignatureEntry {
    SignatureEntry {
        signature,
        piece,
        rotation,
        offset,
    }
}

#[rustfmt::skip]
const SIGNATURES: [SignatureEntry; 19] = [
    entry([(0, 0), (1, 0), (2, 0), (3, 0)], Piece::I, Rotation::Spawn, (1, 0)),
    entry([(0, 0), (0, 1), (0, 2), (0, 3)], Piece::I, Rotation::Right, (0, 2)),
    entry([(0, 0), (1, 0), (0, 1), (1, 1)], Piece::O, Rotation::Spawn, (0, 0)),
    entry([(0, 0), (1, 0), (2, 0), (1, 1)], Piece::T, Rotation::Spawn, (1, 0)),
    entry([(0, 0), (0, 1), (1, 1), (0, 2)], Piece::T, Rotation::Right, (0, 1)),
    entry([(0, 0), (-1, 1), (0, 1), (1, 1)], Piece::T, Rotation::Reverse, (0, 1)),
    entry([(0, 0), (-1, 1), (0, 1), (0, 2)], Piece::T, Rotation::Left, (0, 1)),
    entry([(0, 0), (1, 0), (2, 0), (2, 1)], Piece::L, Rotation::Spawn, (1, 0)),
    entry([(0, 0), (1, 0), (0, 1), (0, 2)], Piece::L, Rotation::Right, (0, 1)),
    entry([(0, 0), (0, 1), (1, 1), (2, 1)], Piece::L, Rotation::Reverse, (1, 1)),
    entry([(0, 0), (0, 1), (-1, 2), (0, 2)], Piece::L, Rotation::Left, (0, 1)),
    entry([(0, 0), (1, 0), (2, 0), (0, 1)], Piece::J, Rotation::Spawn, (1, 0)),
    entry([(0, 0), (0, 1), (0, 2), (1, 2)], Piece::J, Rotation::Right, (0, 1)),
    entry([(0, 0), (-2, 1), (-1, 1), (0, 1)], Piece::J, Rotation::Reverse, (-1, 1)),
    entry([(0, 0), (1, 0), (1, 1), (1, 2)], Piece::J, Rotation::Left, (1, 1)),
    entry([(0, 0), (1, 0), (1, 1), (2, 1)], Piece::S, Rotation::Spawn, (1, 0)),
    entry([(0, 0), (-1, 1), (0, 1), (-1, 2)], Piece::S, Rotation::Right, (-1, 1)),
    entry([(0, 0), (1, 0), (-1, 1), (0, 1)], Piece::Z, Rotation::Spawn, (0, 0)),
    entry([(0, 0), (0, 1), (1, 1), (1, 2)], Piece::Z, Rotation::Right, (0, 1)),
];

/// Build the normalized signature of sorted cell indices
///
/// Returns None when consecutive cells skip more than one row.
fn signature_of(sorted: &[usize; 4]) -> Option<Signature> {
    let origin_x = (sorted[0] % FIELD_WIDTH) as i8;
    let origin_y = (sorted[0] / FIELD_WIDTH) as i8;

    let mut signature = [(0, 0); 4];
    let mut prev_y = origin_y;
    for (slot, &index) in signature.iter_mut().zip(sorted) {
        let x = (index % FIELD_WIDTH) as i8;
        let y = (index / FIELD_WIDTH) as i8;
        if y - prev_y > 1 {
            return None;
        }
        prev_y = y;
        *slot = (x - origin_x, y - origin_y);
    }
    Some(signature)
}

/// Identify the piece covering exactly `cells`
///
/// # Examples
///
/// ```
/// use fumen_core::inference::infer_piece;
/// use fumen_core::types::{Coordinate, Piece, Rotation};
///
/// let inferred = infer_piece(&[67, 68, 77, 78]).unwrap();
/// assert_eq!(inferred.piece, Piece::O);
/// assert_eq!(inferred.rotation, Rotation::Spawn);
/// assert_eq!(inferred.coordinate, Coordinate::new(7, 6));
/// ```
pub fn infer_piece(cells: &[usize]) -> Result<InferredPiece> {
    let mut sorted: [usize; 4] = cells
        .try_into()
        .map_err(|_| FumenError::NotEnoughBlocks(cells.len()))?;
    sorted.sort_unstable();

    if sorted[3] >= FIELD_BLOCKS {
        return Err(FumenError::UnknownPiece);
    }

    let signature = signature_of(&sorted).ok_or(FumenError::UnknownPiece)?;
    let found = SIGNATURES
        .iter()
        .find(|e| e.signature == signature)
        .ok_or(FumenError::UnknownPiece)?;

    let min = sorted[0];
    Ok(InferredPiece {
        piece: found.piece,
        rotation: found.rotation,
        coordinate: Coordinate::new(
            (min % FIELD_WIDTH) as i8 + found.offset.0,
            (min / FIELD_WIDTH) as i8 + found.offset.1,
        ),
    })
}
