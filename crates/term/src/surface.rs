//! Render surface: the grid of styled glyphs a frame is composed on.
//!
//! The surface is rebuilt from scratch every frame by the game view and
//! flushed by the renderer. Its helpers cover exactly what drawing the well,
//! the side panel, and the overlays needs: single glyphs, text runs, scores,
//! and filled regions.

/// 24-bit terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color(pub u8, pub u8, pub u8);

/// Glyph emphasis. The game never combines bold and dim, so paint carries
/// one weight rather than independent attribute flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

/// Complete styling for one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub fg: Color,
    pub bg: Color,
    pub weight: Weight,
}

impl Paint {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            weight: Weight::Normal,
        }
    }

    pub const fn bold(self) -> Self {
        Self {
            weight: Weight::Bold,
            ..self
        }
    }

    pub const fn dim(self) -> Self {
        Self {
            weight: Weight::Dim,
            ..self
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::new(Color(220, 220, 220), Color(0, 0, 0))
    }
}

/// One styled character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub paint: Paint,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            paint: Paint::default(),
        }
    }
}

/// A rectangular area of the surface, in glyph coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Region {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }
}

/// Row-major grid of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); len],
        }
    }

    /// Adopt the given dimensions and blank every glyph.
    ///
    /// Called once per frame; the allocation is reused while the terminal
    /// size stays the same.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.glyphs.clear();
        self.glyphs.resize(len, Glyph::default());
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Iterate the surface one row at a time, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.glyphs.chunks(self.width.max(1) as usize)
    }

    #[inline(always)]
    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn glyph(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    /// Place one glyph. Out-of-bounds positions are dropped.
    pub fn put(&mut self, x: u16, y: u16, ch: char, paint: Paint) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = Glyph { ch, paint };
        }
    }

    /// Write a text run, clipped at the right edge.
    pub fn text(&mut self, x: u16, y: u16, s: &str, paint: Paint) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x.saturating_add(i as u16);
            if cx >= self.width {
                break;
            }
            self.put(cx, y, ch, paint);
        }
    }

    /// Write a decimal number without allocating. Used for the score.
    pub fn number(&mut self, x: u16, y: u16, value: u32, paint: Paint) {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for i in 0..len {
            let ch = digits[len - 1 - i] as char;
            self.put(x.saturating_add(i as u16), y, ch, paint);
        }
    }

    /// Fill a region with one glyph, clipped to the surface.
    pub fn fill(&mut self, region: Region, ch: char, paint: Paint) {
        for dy in 0..region.h {
            for dx in 0..region.w {
                self.put(
                    region.x.saturating_add(dx),
                    region.y.saturating_add(dy),
                    ch,
                    paint,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_glyph_roundtrip() {
        let mut surface = Surface::new(4, 3);
        surface.put(2, 1, 'X', Paint::default());
        assert_eq!(surface.glyph(2, 1).unwrap().ch, 'X');
        // Out of bounds is silently dropped.
        surface.put(4, 0, 'Y', Paint::default());
        assert_eq!(surface.glyph(4, 0), None);
    }

    #[test]
    fn text_clips_at_the_right_edge() {
        let mut surface = Surface::new(5, 1);
        surface.text(3, 0, "ABC", Paint::default());
        assert_eq!(surface.glyph(3, 0).unwrap().ch, 'A');
        assert_eq!(surface.glyph(4, 0).unwrap().ch, 'B');
    }

    #[test]
    fn number_writes_all_digits() {
        let mut surface = Surface::new(10, 1);
        surface.number(0, 0, 1200, Paint::default());
        let text: String = (0..4).map(|x| surface.glyph(x, 0).unwrap().ch).collect();
        assert_eq!(text, "1200");

        surface.number(6, 0, 0, Paint::default());
        assert_eq!(surface.glyph(6, 0).unwrap().ch, '0');
    }

    #[test]
    fn fill_is_clipped_to_the_surface() {
        let mut surface = Surface::new(4, 4);
        let paint = Paint::default().bold();
        surface.fill(Region::new(2, 2, 5, 5), '#', paint);

        assert_eq!(surface.glyph(3, 3).unwrap().ch, '#');
        assert_eq!(surface.glyph(3, 3).unwrap().paint.weight, Weight::Bold);
        assert_eq!(surface.glyph(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn reset_blanks_every_glyph() {
        let mut surface = Surface::new(4, 4);
        surface.put(1, 1, 'X', Paint::default());

        surface.reset(2, 2);
        assert_eq!((surface.width(), surface.height()), (2, 2));
        assert_eq!(surface.glyphs().len(), 4);
        assert!(surface.glyphs().iter().all(|g| g.ch == ' '));
    }

    #[test]
    fn rows_cover_the_surface_in_order() {
        let mut surface = Surface::new(3, 2);
        surface.put(0, 1, 'Q', Paint::default());

        let rows: Vec<&[Glyph]> = surface.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0].ch, 'Q');
    }
}
