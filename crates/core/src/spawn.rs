//! Piece spawner - uniform random piece selection
//!
//! Selection is uniform over the catalog with no bag de-duplication, so the
//! same kind can repeat many times in a row. A seedable LCG keeps games
//! reproducible for tests.

use blockfall_types::{PieceKind, Rotation, SPAWN_POSITION};

use crate::board::Board;
use crate::collision::collides;
use crate::session::ActivePiece;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Draws random pieces and builds their initial placement.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SimpleRng,
}

impl Spawner {
    /// Create a spawner with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next kind, uniformly at random over the catalog
    pub fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Draw a piece and place it at the spawn position.
    ///
    /// Returns `None` when the spawn placement already collides - the
    /// spawn-blocked condition that ends the game.
    pub fn try_spawn(&mut self, board: &Board) -> Option<ActivePiece> {
        let kind = self.next_kind();
        let (x, y) = SPAWN_POSITION;

        if collides(board, kind, x, y, Rotation::North) {
            return None;
        }

        Some(ActivePiece {
            kind,
            rotation: Rotation::North,
            x,
            y,
        })
    }
}
