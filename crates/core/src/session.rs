//! Game session - the turn/tick state machine
//!
//! Owns the board, the active piece, the spawner, the score, and the
//! lifecycle phase. One command is processed at a time, run to completion;
//! the periodic tick is just another command producer feeding the same
//! handler, so no mutation ever interleaves.

use blockfall_types::{
    Cell, Command, Phase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_MS,
    POINTS_PER_LINE,
};

use crate::board::Board;
use crate::collision::collides;
use crate::lock::lock_and_clear;
use crate::pieces::{occupied_offsets, shape};
use crate::spawn::Spawner;

/// Active falling piece: kind, rotation, and the top-left of its 4x4 grid
/// relative to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

/// Board with the active piece overlaid; what the display layer consumes.
pub type DisplayGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Complete session state. Single instance, single owner, no shared mutation.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Option<ActivePiece>,
    spawner: Spawner,
    score: u32,
    phase: Phase,
    drop_timer_ms: u32,
}

impl GameSession {
    /// Create a session in the `NotStarted` phase with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            spawner: Spawner::new(seed),
            score: 0,
            phase: Phase::NotStarted,
            drop_timer_ms: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Apply a command. Returns true when state changed.
    ///
    /// Phase gating: `Start` is honored everywhere (it restarts a finished or
    /// running game); `Paused` honors only `TogglePause`; `NotStarted` and
    /// `Over` ignore everything else. Illegal moves are silent no-ops, never
    /// errors.
    pub fn apply(&mut self, command: Command) -> bool {
        match (self.phase, command) {
            (_, Command::Start) => {
                self.start();
                true
            }
            (Phase::Running, Command::MoveLeft) => self.try_shift(-1),
            (Phase::Running, Command::MoveRight) => self.try_shift(1),
            (Phase::Running, Command::SoftDrop) => self.soft_drop(),
            (Phase::Running, Command::Rotate) => self.try_rotate(),
            (Phase::Running, Command::TogglePause) => {
                self.phase = Phase::Paused;
                true
            }
            (Phase::Paused, Command::TogglePause) => {
                self.phase = Phase::Running;
                true
            }
            _ => false,
        }
    }

    /// Advance the gravity timer; issues the automatic drop when it elapses.
    ///
    /// Frozen (not merely ignored) outside `Running`: the accumulator holds
    /// its value across a pause and is reset by `Start`, so no tick scheduled
    /// against an old game can act on a new one.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms < DROP_INTERVAL_MS {
            return false;
        }

        self.drop_timer_ms = 0;
        self.soft_drop()
    }

    /// Reset score, board, and timer, enter `Running`, and spawn the first
    /// piece. A blocked first spawn goes straight to `Over`.
    fn start(&mut self) {
        self.board.clear();
        self.score = 0;
        self.drop_timer_ms = 0;
        self.active = None;
        self.phase = Phase::Running;

        match self.spawner.try_spawn(&self.board) {
            Some(piece) => self.active = Some(piece),
            None => self.phase = Phase::Over,
        }
    }

    /// Shift the active piece horizontally when the new placement is legal
    fn try_shift(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if collides(
            &self.board,
            active.kind,
            active.x + dx,
            active.y,
            active.rotation,
        ) {
            return false;
        }

        self.active = Some(ActivePiece {
            x: active.x + dx,
            ..active
        });
        true
    }

    /// Rotate clockwise in place. No wall kicks: when the rotated grid does
    /// not fit at the current position, the rotation simply fails.
    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotation = active.rotation.rotate_cw();
        if collides(&self.board, active.kind, active.x, active.y, rotation) {
            return false;
        }

        self.active = Some(ActivePiece { rotation, ..active });
        true
    }

    /// Move the active piece down one row; on contact this is the lock
    /// trigger.
    fn soft_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if !collides(
            &self.board,
            active.kind,
            active.x,
            active.y + 1,
            active.rotation,
        ) {
            self.active = Some(ActivePiece {
                y: active.y + 1,
                ..active
            });
            return true;
        }

        self.lock_active(active);
        true
    }

    /// Commit the piece, score its line clears, and spawn the next piece.
    /// Spawn blocked ends the game.
    fn lock_active(&mut self, active: ActivePiece) {
        let lines = lock_and_clear(
            &mut self.board,
            active.kind,
            active.x,
            active.y,
            active.rotation,
        );
        self.score += lines as u32 * POINTS_PER_LINE;
        self.active = None;

        match self.spawner.try_spawn(&self.board) {
            Some(piece) => self.active = Some(piece),
            None => self.phase = Phase::Over,
        }
    }

    /// Build the display grid: the board with the active piece's cells
    /// overlaid. Overlay cells outside the board are clipped. Computed fresh
    /// on every call.
    pub fn display_grid(&self) -> DisplayGrid {
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for y in 0..BOARD_HEIGHT as usize {
            grid[y] = self.board.row(y);
        }

        if let Some(active) = self.active {
            for (col, row) in occupied_offsets(shape(active.kind, active.rotation)) {
                let x = active.x + col;
                let y = active.y + row;
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    grid[y as usize][x as usize] = Some(active.kind);
                }
            }
        }

        grid
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_session_with(active: ActivePiece) -> GameSession {
        let mut session = GameSession::new(1);
        session.phase = Phase::Running;
        session.active = Some(active);
        session
    }

    fn piece(kind: PieceKind, x: i8, y: i8) -> ActivePiece {
        ActivePiece {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    fn fill_row_except(board: &mut Board, y: i8, holes: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !holes.contains(&x) {
                board.set(x, y, Some(PieceKind::I));
            }
        }
    }

    #[test]
    fn new_session_is_not_started() {
        let session = GameSession::new(42);
        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(session.score(), 0);
        assert!(session.active().is_none());
    }

    #[test]
    fn start_spawns_the_first_piece() {
        let mut session = GameSession::new(42);
        assert!(session.apply(Command::Start));
        assert_eq!(session.phase(), Phase::Running);
        let active = session.active().expect("piece spawned");
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(active.rotation, Rotation::North);
    }

    #[test]
    fn commands_before_start_are_ignored() {
        let mut session = GameSession::new(42);
        for command in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::Rotate,
            Command::TogglePause,
        ] {
            assert!(!session.apply(command), "{:?}", command);
        }
        assert_eq!(session.phase(), Phase::NotStarted);
    }

    #[test]
    fn o_piece_drops_and_locks_at_the_bottom() {
        let mut session = running_session_with(piece(PieceKind::O, 3, 0));

        // O occupies grid rows 0-1, so the resting position is y = 18.
        let mut drops = 0;
        loop {
            let before = session.active().unwrap().y;
            assert!(session.apply(Command::SoftDrop));
            match session.active() {
                Some(a) if a.kind == PieceKind::O && a.y == before + 1 => drops += 1,
                _ => break,
            }
        }
        assert_eq!(drops, 18);

        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(session.board().get(x, y), Some(Some(PieceKind::O)));
        }

        // The next piece spawned at the spawn position.
        let next = session.active().expect("replacement piece");
        assert_eq!((next.x, next.y), (3, 0));
        assert_eq!(next.rotation, Rotation::North);
    }

    #[test]
    fn completing_a_row_clears_it_and_scores_100() {
        let mut session = running_session_with(piece(PieceKind::O, 3, 18));
        fill_row_except(&mut session.board, 19, &[4, 5]);

        // The O sits with its lower half on row 19; the next drop locks it.
        assert!(session.apply(Command::SoftDrop));

        assert_eq!(session.score(), POINTS_PER_LINE);
        // The completed row is gone; the O's top half settled onto row 19.
        assert_eq!(session.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(session.board().get(5, 19), Some(Some(PieceKind::O)));
        assert_eq!(session.board().get(0, 19), Some(None));
        let filled = session.board().cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(filled, 2);
    }

    #[test]
    fn blocked_spawn_after_lock_ends_the_game() {
        let mut session = running_session_with(piece(PieceKind::O, 3, 18));
        // Spawn area blocked for whatever comes next.
        for y in 0..2 {
            fill_row_except(&mut session.board, y, &[]);
        }

        assert!(session.apply(Command::SoftDrop));
        assert_eq!(session.phase(), Phase::Over);
        assert!(session.active().is_none());
        assert!(session.game_over());
    }

    #[test]
    fn rotation_is_rejected_at_the_wall() {
        // I East hugs the left wall: its single column sits at board column 0.
        let mut session = running_session_with(ActivePiece {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: -2,
            y: 5,
        });

        // South spans grid columns 0-3, which lands at board columns -2..=1.
        assert!(!session.apply(Command::Rotate));
        let active = session.active().unwrap();
        assert_eq!(active.rotation, Rotation::East);
        assert_eq!((active.x, active.y), (-2, 5));
    }

    #[test]
    fn rotation_is_rejected_against_the_stack() {
        let mut session = running_session_with(piece(PieceKind::T, 3, 17));
        // T East at (3, 17) needs (4, 19); occupy it so the turn is blocked.
        session.board.set(4, 19, Some(PieceKind::Z));

        assert!(!session.apply(Command::Rotate));
        let active = session.active().unwrap();
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!((active.x, active.y), (3, 17));
    }

    #[test]
    fn moves_are_rejected_at_the_bounds() {
        let mut session = running_session_with(piece(PieceKind::O, -1, 0));
        // O columns 1-2 at x = -1 sit at board columns 0-1.
        assert!(!session.apply(Command::MoveLeft));
        assert_eq!(session.active().unwrap().x, -1);

        assert!(session.apply(Command::MoveRight));
        assert_eq!(session.active().unwrap().x, 0);
    }

    #[test]
    fn pause_freezes_commands_and_ticks() {
        let mut session = GameSession::new(3);
        session.apply(Command::Start);
        let before = session.active().unwrap();
        let board_before = session.board().clone();

        assert!(session.apply(Command::TogglePause));
        assert_eq!(session.phase(), Phase::Paused);

        assert!(!session.apply(Command::SoftDrop));
        assert!(!session.apply(Command::MoveLeft));
        assert!(!session.tick(10 * DROP_INTERVAL_MS));
        assert_eq!(session.active(), Some(before));
        assert_eq!(session.board(), &board_before);

        // Resume restores the exact pre-pause state.
        assert!(session.apply(Command::TogglePause));
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.active(), Some(before));
    }

    #[test]
    fn tick_fires_on_the_drop_interval() {
        let mut session = GameSession::new(3);
        session.apply(Command::Start);
        let y0 = session.active().unwrap().y;

        assert!(!session.tick(DROP_INTERVAL_MS - 1));
        assert_eq!(session.active().unwrap().y, y0);

        assert!(session.tick(1));
        assert_eq!(session.active().unwrap().y, y0 + 1);
    }

    #[test]
    fn restart_resets_score_board_and_timer() {
        let mut session = GameSession::new(3);
        session.apply(Command::Start);
        session.score = 700;
        session.board.set(0, 19, Some(PieceKind::L));
        session.drop_timer_ms = 900;
        session.phase = Phase::Over;

        assert!(session.apply(Command::Start));
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.drop_timer_ms, 0);
        assert!(session.active().is_some());
        assert!(session.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn ticks_do_nothing_after_game_over() {
        let mut session = GameSession::new(3);
        session.apply(Command::Start);
        session.phase = Phase::Over;
        let board_before = session.board().clone();

        assert!(!session.tick(10 * DROP_INTERVAL_MS));
        assert!(!session.apply(Command::SoftDrop));
        assert_eq!(session.board(), &board_before);
    }

    #[test]
    fn display_grid_overlays_the_active_piece() {
        let mut session = running_session_with(piece(PieceKind::T, 3, 5));
        session.board.set(0, 19, Some(PieceKind::Z));

        let grid = session.display_grid();
        // Locked cell shows through.
        assert_eq!(grid[19][0], Some(PieceKind::Z));
        // T North at (3, 5): peak at (4, 5), bar on row 6.
        assert_eq!(grid[5][4], Some(PieceKind::T));
        assert_eq!(grid[6][3], Some(PieceKind::T));
        assert_eq!(grid[6][4], Some(PieceKind::T));
        assert_eq!(grid[6][5], Some(PieceKind::T));
        // Board state itself is untouched by rendering.
        assert_eq!(session.board().get(4, 5), Some(None));
    }

    #[test]
    fn display_grid_clips_cells_above_the_top() {
        let session = running_session_with(ActivePiece {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: 3,
            y: -2,
        });

        let grid = session.display_grid();
        // I East occupies grid rows 0-3 in column 2; rows -2 and -1 clip away.
        assert_eq!(grid[0][5], Some(PieceKind::I));
        assert_eq!(grid[1][5], Some(PieceKind::I));
        let overlaid = grid.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(overlaid, 2);
    }
}
