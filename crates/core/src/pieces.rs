//! Shape catalog - tetromino rotation grids
//!
//! Each piece kind defines four rotation states, each a 4x4 occupancy grid.
//! Pure const data; the identifier set is closed, so every lookup is total.

use blockfall_types::{PieceKind, Rotation};

/// 4x4 occupancy grid for a single rotation state.
pub type ShapeGrid = [[bool; 4]; 4];

/// Decode a rotation state from four 4-bit row patterns (msb = left column).
const fn grid(rows: [u8; 4]) -> ShapeGrid {
    let mut g = [[false; 4]; 4];
    let mut r = 0;
    while r < 4 {
        let mut c = 0;
        while c < 4 {
            g[r][c] = (rows[r] >> (3 - c)) & 1 == 1;
            c += 1;
        }
        r += 1;
    }
    g
}

const I_SHAPES: [ShapeGrid; 4] = [
    grid([0b0000, 0b1111, 0b0000, 0b0000]),
    grid([0b0010, 0b0010, 0b0010, 0b0010]),
    grid([0b0000, 0b0000, 0b1111, 0b0000]),
    grid([0b0100, 0b0100, 0b0100, 0b0100]),
];

// O never changes under rotation.
const O_SHAPES: [ShapeGrid; 4] = [
    grid([0b0110, 0b0110, 0b0000, 0b0000]),
    grid([0b0110, 0b0110, 0b0000, 0b0000]),
    grid([0b0110, 0b0110, 0b0000, 0b0000]),
    grid([0b0110, 0b0110, 0b0000, 0b0000]),
];

const T_SHAPES: [ShapeGrid; 4] = [
    grid([0b0100, 0b1110, 0b0000, 0b0000]),
    grid([0b0100, 0b0110, 0b0100, 0b0000]),
    grid([0b0000, 0b1110, 0b0100, 0b0000]),
    grid([0b0100, 0b1100, 0b0100, 0b0000]),
];

const S_SHAPES: [ShapeGrid; 4] = [
    grid([0b0110, 0b1100, 0b0000, 0b0000]),
    grid([0b0100, 0b0110, 0b0010, 0b0000]),
    grid([0b0000, 0b0110, 0b1100, 0b0000]),
    grid([0b1000, 0b1100, 0b0100, 0b0000]),
];

const Z_SHAPES: [ShapeGrid; 4] = [
    grid([0b1100, 0b0110, 0b0000, 0b0000]),
    grid([0b0010, 0b0110, 0b0100, 0b0000]),
    grid([0b0000, 0b1100, 0b0110, 0b0000]),
    grid([0b0100, 0b1100, 0b1000, 0b0000]),
];

const J_SHAPES: [ShapeGrid; 4] = [
    grid([0b1000, 0b1110, 0b0000, 0b0000]),
    grid([0b0110, 0b0100, 0b0100, 0b0000]),
    grid([0b0000, 0b1110, 0b0010, 0b0000]),
    grid([0b0100, 0b0100, 0b1100, 0b0000]),
];

const L_SHAPES: [ShapeGrid; 4] = [
    grid([0b0010, 0b1110, 0b0000, 0b0000]),
    grid([0b0100, 0b0100, 0b0110, 0b0000]),
    grid([0b0000, 0b1110, 0b1000, 0b0000]),
    grid([0b1100, 0b0100, 0b0100, 0b0000]),
];

/// Look up the rotation grid for a piece kind and rotation state.
pub fn shape(kind: PieceKind, rotation: Rotation) -> &'static ShapeGrid {
    let shapes = match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    };
    &shapes[rotation.index()]
}

/// Iterate the occupied cells of a rotation grid as (col, row) offsets.
pub fn occupied_offsets(grid: &ShapeGrid) -> impl Iterator<Item = (i8, i8)> + '_ {
    grid.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(col, _)| (col as i8, row as i8))
    })
}
