//! TerminalRenderer: flushes a surface to a real terminal.
//!
//! Full-frame redraws with paint-run batching. The surface is small enough
//! that diffing against the previous frame has not been worth it.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::surface::{Color, Paint, Surface, Weight};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw a full frame.
    pub fn draw(&mut self, surface: &Surface) -> Result<()> {
        self.buf.clear();
        encode_frame_into(surface, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
/// Paint changes are only emitted at run boundaries, so a row of identically
/// painted glyphs costs one escape sequence.
pub fn encode_frame_into(surface: &Surface, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    let mut active: Option<Paint> = None;
    for (y, row) in surface.rows().enumerate() {
        if y > 0 {
            out.queue(Print("\r\n"))?;
        }
        for glyph in row {
            if active != Some(glyph.paint) {
                queue_paint(out, glyph.paint)?;
                active = Some(glyph.paint);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn queue_paint(out: &mut Vec<u8>, paint: Paint) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(term_color(paint.fg)))?;
    out.queue(SetBackgroundColor(term_color(paint.bg)))?;
    match paint.weight {
        Weight::Normal => {}
        Weight::Bold => {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        Weight::Dim => {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
    }
    Ok(())
}

fn term_color(color: Color) -> TermColor {
    let Color(r, g, b) = color;
    TermColor::Rgb { r, g, b }
}
