//! Shape catalog tests.

use blockfall::core::{occupied_offsets, shape};
use blockfall::types::{PieceKind, Rotation};

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

#[test]
fn every_shape_has_exactly_four_occupied_cells() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let count = occupied_offsets(shape(kind, rotation)).count();
            assert_eq!(count, 4, "{:?} {:?}", kind, rotation);
        }
    }
}

#[test]
fn shapes_stay_inside_the_4x4_grid() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            for (col, row) in occupied_offsets(shape(kind, rotation)) {
                assert!((0..4).contains(&col), "{:?} {:?}", kind, rotation);
                assert!((0..4).contains(&row), "{:?} {:?}", kind, rotation);
            }
        }
    }
}

#[test]
fn spawn_shapes_are_distinct_per_kind() {
    for (i, a) in PieceKind::ALL.iter().enumerate() {
        for b in &PieceKind::ALL[i + 1..] {
            assert_ne!(
                shape(*a, Rotation::North),
                shape(*b, Rotation::North),
                "{:?} vs {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn four_clockwise_rotations_return_to_spawn() {
    for kind in PieceKind::ALL {
        let mut rotation = Rotation::North;
        for _ in 0..4 {
            rotation = rotation.rotate_cw();
        }
        assert_eq!(shape(kind, rotation), shape(kind, Rotation::North));
    }
}

#[test]
fn i_piece_is_a_straight_line_in_every_rotation() {
    for rotation in ROTATIONS {
        let cells: Vec<_> = occupied_offsets(shape(PieceKind::I, rotation)).collect();
        let same_row = cells.iter().all(|(_, r)| *r == cells[0].1);
        let same_col = cells.iter().all(|(c, _)| *c == cells[0].0);
        assert!(same_row || same_col, "{:?}: {:?}", rotation, cells);
    }
}

#[test]
fn o_piece_never_changes_under_rotation() {
    let spawn = shape(PieceKind::O, Rotation::North);
    for rotation in ROTATIONS {
        assert_eq!(shape(PieceKind::O, rotation), spawn);
    }
}
