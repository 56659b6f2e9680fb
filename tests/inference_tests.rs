//! Inference tests - piece, rotation and anchor from four cell indices

use fumen::core::pieces::absolute_cells;
use fumen::core::{infer_piece, FumenError};
use fumen::types::{Coordinate, Piece, Rotation, FIELD_WIDTH};

fn indices(piece: Piece, rotation: Rotation, at: Coordinate) -> Vec<usize> {
    absolute_cells(piece, rotation, at)
        .unwrap()
        .iter()
        .map(|c| c.x as usize + c.y as usize * FIELD_WIDTH)
        .collect()
}

#[test]
fn test_o_piece() {
    let inferred = infer_piece(&[67, 68, 77, 78]).unwrap();
    assert_eq!(inferred.piece, Piece::O);
    assert_eq!(inferred.rotation, Rotation::Spawn);
    assert_eq!(inferred.coordinate, Coordinate::new(7, 6));
}

#[test]
fn test_flat_i_piece() {
    let inferred = infer_piece(&[22, 23, 24, 25]).unwrap();
    assert_eq!(inferred.piece, Piece::I);
    assert_eq!(inferred.rotation, Rotation::Spawn);
    assert_eq!(inferred.coordinate, Coordinate::new(3, 2));
}

#[test]
fn test_order_does_not_matter() {
    assert_eq!(
        infer_piece(&[78, 67, 77, 68]).unwrap(),
        infer_piece(&[67, 68, 77, 78]).unwrap()
    );
}

#[test]
fn test_t_reverse() {
    let cells = indices(Piece::T, Rotation::Reverse, Coordinate::new(5, 10));
    let inferred = infer_piece(&cells).unwrap();
    assert_eq!(inferred.piece, Piece::T);
    assert_eq!(inferred.rotation, Rotation::Reverse);
    assert_eq!(inferred.coordinate, Coordinate::new(5, 10));
}

#[test]
fn test_shared_shapes_use_representative_rotation() {
    // S Reverse covers the same cells as S Spawn one row lower.
    let cells = indices(Piece::S, Rotation::Reverse, Coordinate::new(4, 5));
    let inferred = infer_piece(&cells).unwrap();
    assert_eq!(inferred.piece, Piece::S);
    assert_eq!(inferred.rotation, Rotation::Spawn);
    assert_eq!(inferred.coordinate, Coordinate::new(4, 4));
}

#[test]
fn test_wrong_count() {
    assert_eq!(infer_piece(&[1, 2, 3]), Err(FumenError::NotEnoughBlocks(3)));
    assert_eq!(
        infer_piece(&[1, 2, 3, 4, 5]),
        Err(FumenError::NotEnoughBlocks(5))
    );
}

#[test]
fn test_non_tetromino_sets() {
    // Scattered cells.
    assert_eq!(infer_piece(&[0, 2, 4, 6]), Err(FumenError::UnknownPiece));
    // Square of four with a hole row between.
    assert_eq!(infer_piece(&[0, 1, 20, 21]), Err(FumenError::UnknownPiece));
    // Duplicates.
    assert_eq!(infer_piece(&[0, 0, 1, 2]), Err(FumenError::UnknownPiece));
    // Off the field.
    assert_eq!(infer_piece(&[238, 239, 240, 241]), Err(FumenError::UnknownPiece));
}
