//! Piece geometry tests - shapes, rotation transforms and SRS kick tables

use fumen::core::pieces::{canonical_cells, rotate_cells};
use fumen::core::{get_blocks, test_left_rotation, test_right_rotation};
use fumen::types::{Piece, Rotation};

const ROTATIONS: [Rotation; 4] = [
    Rotation::Spawn,
    Rotation::Right,
    Rotation::Reverse,
    Rotation::Left,
];

#[test]
fn test_every_mino_has_four_distinct_cells_around_anchor() {
    for piece in Piece::MINOS {
        for rotation in ROTATIONS {
            let cells = get_blocks(piece, rotation).unwrap();
            assert!(cells.contains(&(0, 0)), "{piece:?} {rotation:?}");
            for (i, a) in cells.iter().enumerate() {
                assert!(!cells[i + 1..].contains(a), "{piece:?} {rotation:?}");
            }
        }
    }
}

#[test]
fn test_non_minos_have_no_shape() {
    assert_eq!(canonical_cells(Piece::Empty), None);
    assert_eq!(get_blocks(Piece::Gray, Rotation::Spawn), None);
    assert_eq!(test_right_rotation(Piece::Gray, Rotation::Spawn), None);
}

#[test]
fn test_four_right_turns_return_to_spawn() {
    for piece in Piece::MINOS {
        let spawn = canonical_cells(piece).unwrap();
        let mut cells = spawn;
        for _ in 0..4 {
            cells = rotate_cells(cells, Rotation::Right);
        }
        assert_eq!(cells, spawn, "{piece:?}");
    }
}

#[test]
fn test_reverse_is_two_right_turns() {
    for piece in Piece::MINOS {
        let spawn = canonical_cells(piece).unwrap();
        let twice = rotate_cells(rotate_cells(spawn, Rotation::Right), Rotation::Right);
        assert_eq!(twice, rotate_cells(spawn, Rotation::Reverse), "{piece:?}");
    }
}

#[test]
fn test_left_turn_of_l_piece() {
    let cells = get_blocks(Piece::L, Rotation::Left).unwrap();
    assert_eq!(cells, [(0, 0), (0, -1), (0, 1), (-1, 1)]);
}

#[test]
fn test_jlstz_share_kicks() {
    let t = test_right_rotation(Piece::T, Rotation::Spawn).unwrap();
    assert_eq!(t.rotation, Rotation::Right);
    assert_eq!(
        t.kicks.as_slice(),
        &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]
    );
    for piece in [Piece::J, Piece::L, Piece::S, Piece::Z] {
        assert_eq!(test_right_rotation(piece, Rotation::Spawn), Some(t.clone()));
    }
}

#[test]
fn test_i_kicks_from_spawn() {
    let cw = test_right_rotation(Piece::I, Rotation::Spawn).unwrap();
    assert_eq!(cw.kicks.as_slice(), &[(1, 0), (-1, 0), (2, 0), (-1, -1), (2, 2)]);

    let ccw = test_left_rotation(Piece::I, Rotation::Spawn).unwrap();
    assert_eq!(ccw.rotation, Rotation::Left);
    assert_eq!(ccw.kicks.len(), 5);
}

#[test]
fn test_o_has_single_kick() {
    for rotation in ROTATIONS {
        let test = test_right_rotation(Piece::O, rotation).unwrap();
        assert_eq!(test.kicks.len(), 1);
        assert_eq!(test.rotation, rotation.rotate_cw());
    }
}

#[test]
fn test_opposite_rotations_negate_kicks() {
    for piece in Piece::MINOS {
        for from in ROTATIONS {
            let cw = test_right_rotation(piece, from).unwrap();
            let back = test_left_rotation(piece, cw.rotation).unwrap();
            assert_eq!(back.rotation, from);
            let negated: Vec<(i8, i8)> = cw.kicks.iter().map(|&(x, y)| (-x, -y)).collect();
            assert_eq!(back.kicks.as_slice(), negated.as_slice(), "{piece:?} {from:?}");
        }
    }
}
