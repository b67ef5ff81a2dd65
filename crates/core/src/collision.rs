//! Collision detector - legality check for piece placements
//!
//! The single gate consulted before every move, rotate, and spawn.
//! Pure function over the board; no state is touched here.

use blockfall_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

use crate::board::Board;
use crate::pieces::{occupied_offsets, shape};

/// Would placing `kind` with `rotation` at grid position (x, y) be illegal?
///
/// A placement is illegal when any occupied cell of the rotation grid lands
/// outside the horizontal bounds, at or below the bottom, or on an occupied
/// board cell. Rows above the top of the board (board row < 0) are legal:
/// a freshly spawned piece may hang partially off-screen.
pub fn collides(board: &Board, kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> bool {
    for (col, row) in occupied_offsets(shape(kind, rotation)) {
        let bx = x + col;
        let by = y + row;

        if bx < 0 || bx >= BOARD_WIDTH as i8 {
            return true;
        }
        if by >= BOARD_HEIGHT as i8 {
            return true;
        }
        if by >= 0 && board.is_occupied(bx, by) {
            return true;
        }
    }
    false
}
