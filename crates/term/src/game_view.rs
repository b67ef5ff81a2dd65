//! GameView: maps a `GameSession` onto a render surface.
//!
//! This module is pure (no I/O). It can be unit-tested.

use blockfall_core::GameSession;
use blockfall_types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::surface::{Color, Paint, Region, Surface};

const WELL_BG: Color = Color(30, 30, 40);

const WELL_PAINT: Paint = Paint::new(Color(80, 80, 90), WELL_BG);
const BORDER_PAINT: Paint = Paint::new(Color(200, 200, 200), Color(0, 0, 0));
const EMPTY_PAINT: Paint = Paint::new(Color(90, 90, 100), WELL_BG).dim();
const LABEL_PAINT: Paint = Paint::new(Color(220, 220, 220), Color(0, 0, 0)).bold();
const VALUE_PAINT: Paint = Paint::new(Color(200, 200, 200), Color(0, 0, 0));
const HINT_PAINT: Paint = VALUE_PAINT.dim();
const OVERLAY_PAINT: Paint = Paint::new(Color(255, 255, 255), Color(0, 0, 0)).bold();

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal view of the game board and score panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the session onto an existing surface.
    ///
    /// Callers can reuse a surface across frames; `reset` keeps the
    /// allocation while the terminal size stays the same.
    pub fn render_into(&self, session: &GameSession, viewport: Viewport, surface: &mut Surface) {
        surface.reset(viewport.width, viewport.height);

        let well_w = (BOARD_WIDTH as u16) * self.cell_w;
        let well_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = well_w + 2;
        let frame_h = well_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        // Well background, then the border around it.
        surface.fill(
            Region::new(start_x + 1, start_y + 1, well_w, well_h),
            ' ',
            WELL_PAINT,
        );
        self.draw_border(surface, Region::new(start_x, start_y, frame_w, frame_h));

        // Board cells with the active piece already overlaid (and clipped)
        // by the session.
        let grid = session.display_grid();
        for (y, row) in grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, paint) = match cell {
                    Some(kind) => ('█', Paint::new(piece_color(*kind), WELL_BG).bold()),
                    None => ('·', EMPTY_PAINT),
                };
                surface.fill(
                    Region::new(
                        start_x + 1 + (x as u16) * self.cell_w,
                        start_y + 1 + (y as u16) * self.cell_h,
                        self.cell_w,
                        self.cell_h,
                    ),
                    ch,
                    paint,
                );
            }
        }

        // Side panel (score/piece/controls).
        self.draw_side_panel(surface, session, viewport, start_x, start_y, frame_w);

        // Overlays.
        let overlay = match session.phase() {
            Phase::NotStarted => Some("PRESS ENTER"),
            Phase::Paused => Some("PAUSED"),
            Phase::Over => Some("GAME OVER"),
            Phase::Running => None,
        };
        if let Some(text) = overlay {
            self.draw_overlay_text(surface, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new surface.
    pub fn render(&self, session: &GameSession, viewport: Viewport) -> Surface {
        let mut surface = Surface::new(viewport.width, viewport.height);
        self.render_into(session, viewport, &mut surface);
        surface
    }

    fn draw_border(&self, surface: &mut Surface, frame: Region) {
        let Region { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        surface.put(x, y, '┌', BORDER_PAINT);
        surface.put(x + w - 1, y, '┐', BORDER_PAINT);
        surface.put(x, y + h - 1, '└', BORDER_PAINT);
        surface.put(x + w - 1, y + h - 1, '┘', BORDER_PAINT);

        surface.fill(Region::new(x + 1, y, w - 2, 1), '─', BORDER_PAINT);
        surface.fill(Region::new(x + 1, y + h - 1, w - 2, 1), '─', BORDER_PAINT);
        surface.fill(Region::new(x, y + 1, 1, h - 2), '│', BORDER_PAINT);
        surface.fill(Region::new(x + w - 1, y + 1, 1, h - 2), '│', BORDER_PAINT);
    }

    fn draw_side_panel(
        &self,
        surface: &mut Surface,
        session: &GameSession,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let mut y = start_y;
        surface.text(panel_x, y, "SCORE", LABEL_PAINT);
        y = y.saturating_add(1);
        surface.number(panel_x, y, session.score(), VALUE_PAINT);
        y = y.saturating_add(2);

        if let Some(active) = session.active() {
            surface.text(panel_x, y, "PIECE", LABEL_PAINT);
            y = y.saturating_add(1);
            surface.text(panel_x, y, active.kind.as_str(), VALUE_PAINT);
            y = y.saturating_add(2);
        }

        surface.text(panel_x, y, "KEYS", LABEL_PAINT);
        y = y.saturating_add(1);
        for line in [
            "← → move",
            "↑/space rotate",
            "↓ drop",
            "p pause",
            "enter new game",
            "q quit",
        ] {
            if y >= viewport.height {
                break;
            }
            surface.text(panel_x, y, line, HINT_PAINT);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        surface: &mut Surface,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        surface.text(x, mid_y, text, OVERLAY_PAINT);
    }
}

fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color(80, 220, 220),
        PieceKind::O => Color(240, 220, 80),
        PieceKind::T => Color(200, 120, 220),
        PieceKind::S => Color(100, 220, 120),
        PieceKind::Z => Color(220, 80, 80),
        PieceKind::J => Color(80, 120, 220),
        PieceKind::L => Color(255, 165, 0),
    }
}
