//! Terminal output for the game screen.
//!
//! Each frame is compared row by row with the frame already on screen, and
//! only the spans of cells that differ are repainted. With nothing on screen
//! (first frame, resize, [`TerminalRenderer::invalidate`]) the whole frame is
//! repainted after a clear.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Owns stdout while the game runs; call [`TerminalRenderer::exit`] before
/// returning to the shell.
pub struct TerminalRenderer {
    out: io::Stdout,
    on_screen: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            on_screen: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.send()?;
        self.on_screen = None;
        Ok(())
    }

    /// Put the shell's screen back.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes
            .queue(SetAttribute(Attribute::Reset))?
            .queue(ResetColor)?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.send()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize, for example).
    pub fn invalidate(&mut self) {
        self.on_screen = None;
    }

    /// Show `frame`, then hand the previously shown buffer back through it.
    ///
    /// The caller renders the next frame into whatever comes back, so two
    /// buffers alternate without cloning.
    pub fn draw_swap(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        let shown = self
            .on_screen
            .take()
            .filter(|s| s.width() == frame.width() && s.height() == frame.height());

        self.bytes.clear();
        encode_frame(shown.as_ref(), frame, &mut self.bytes)?;
        self.send()?;

        let mut spare = shown.unwrap_or_else(|| FrameBuffer::new(frame.width(), frame.height()));
        std::mem::swap(&mut spare, frame);
        self.on_screen = Some(spare);
        Ok(())
    }

    fn send(&mut self) -> io::Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the terminal's cursor and active style so repeated commands are
/// skipped.
#[derive(Default)]
struct Pen {
    at: Option<(u16, u16)>,
    style: Option<CellStyle>,
}

impl Pen {
    fn move_to(&mut self, out: &mut Vec<u8>, x: u16, y: u16) -> io::Result<()> {
        if self.at != Some((x, y)) {
            out.queue(cursor::MoveTo(x, y))?;
            self.at = Some((x, y));
        }
        Ok(())
    }

    fn put(&mut self, out: &mut Vec<u8>, cell: Cell) -> io::Result<()> {
        if self.style != Some(cell.style) {
            // Attribute reset also drops colors, so it goes first.
            out.queue(SetAttribute(Attribute::Reset))?;
            if cell.style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if cell.style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            out.queue(SetForegroundColor(color(cell.style.fg)))?
                .queue(SetBackgroundColor(color(cell.style.bg)))?;
            self.style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        if let Some((x, _)) = self.at.as_mut() {
            *x = x.saturating_add(1);
        }
        Ok(())
    }

    fn finish(&self, out: &mut Vec<u8>) -> io::Result<()> {
        if self.style.is_some() {
            out.queue(SetAttribute(Attribute::Reset))?.queue(ResetColor)?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Write the commands that turn `shown` into `next`.
///
/// `shown` must have the same size as `next`; `None` means the screen content
/// is unknown and everything is repainted.
fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    if shown.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::default();
    for y in 0..next.height() {
        for (start, end) in dirty_spans(shown, next, y) {
            pen.move_to(out, start, y)?;
            for x in start..end {
                pen.put(out, next.get(x, y).unwrap_or_default())?;
            }
        }
    }
    pen.finish(out)
}

/// Half-open column ranges of row `y` that differ from what is shown.
fn dirty_spans<'a>(
    shown: Option<&'a FrameBuffer>,
    next: &'a FrameBuffer,
    y: u16,
) -> impl Iterator<Item = (u16, u16)> + 'a {
    let width = next.width();
    let differs = move |x: u16| shown.map_or(true, |s| s.get(x, y) != next.get(x, y));

    let mut x = 0;
    std::iter::from_fn(move || {
        while x < width && !differs(x) {
            x += 1;
        }
        if x == width {
            return None;
        }
        let start = x;
        while x < width && differs(x) {
            x += 1;
        }
        Some((start, x))
    })
}
