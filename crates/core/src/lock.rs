//! Lock & clear engine - the sole mutator of committed board state
//!
//! Locking merges the active piece's cells into the board; clearing removes
//! full rows. Everything else in the crate only reads the board.

use blockfall_types::{PieceKind, Rotation};

use crate::board::Board;
use crate::pieces::{occupied_offsets, shape};

/// Merge a piece into the board, tagging each covered cell with its kind.
///
/// Cells that fall outside the board are skipped silently. The collision
/// gate keeps them from occurring in normal play; skipping (rather than
/// panicking) keeps locking total for pieces that hang above the top row.
pub fn lock_piece(board: &mut Board, kind: PieceKind, x: i8, y: i8, rotation: Rotation) {
    for (col, row) in occupied_offsets(shape(kind, rotation)) {
        board.set(x + col, y + row, Some(kind));
    }
}

/// Lock a piece, then clear any rows it completed.
///
/// Returns the number of lines cleared (0..=4).
pub fn lock_and_clear(board: &mut Board, kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> usize {
    lock_piece(board, kind, x, y, rotation);
    board.clear_full_rows().len()
}
