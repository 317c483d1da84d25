//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout: the board frame sits in the middle of the viewport, the HOLD slot
//! and the score panel to its left, the NEXT queue to its right. Panels are
//! skipped when the viewport is too narrow for them.

use crate::core::{definition, format_tokens, GameSnapshot, HudSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Width reserved for each side panel.
const PANEL_W: u16 = 14;
const PANEL_GAP: u16 = 2;

const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const ACCENT: CellStyle = CellStyle::new(Rgb::new(56, 189, 248), SCREEN_BG).bold();
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const FLASH: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), PLAY_BG).bold();

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen rectangle of the board frame, border included.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Frame {
    fn center_x(&self) -> u16 {
        self.x.saturating_add(self.w / 2)
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        // Background for play area.
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        self.draw_border(fb, frame);

        // Locked cells; rows waiting for removal flash white.
        for (y, row) in snap.board.iter().enumerate() {
            let flashing = snap.is_flashing(y);
            for (x, cell) in row.iter().enumerate() {
                let (cx, cy) = (x as u16, y as u16);
                match *cell {
                    Some(_) if flashing => self.fill_cell_rect(fb, frame, cx, cy, '█', FLASH),
                    Some(kind) => self.draw_board_cell(fb, frame, cx, cy, kind),
                    None => self.draw_empty_cell(fb, frame, cx, cy),
                }
            }
        }

        // Ghost piece.
        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let style = CellStyle::new(definition(active.kind).color, PLAY_BG).dim();
            for (dx, dy) in active.shape.minos() {
                if let Some((x, y)) = visible_cell(active.x + dx, ghost_y + dy) {
                    self.fill_cell_rect(fb, frame, x, y, '░', style);
                }
            }
        }

        // Active piece. Rows above the grid are not drawn.
        if let Some(active) = snap.active {
            for (dx, dy) in active.shape.minos() {
                if let Some((x, y)) = visible_cell(active.x + dx, active.y + dy) {
                    self.draw_board_cell(fb, frame, x, y, active.kind);
                }
            }
        }

        // Side panels.
        if let Some(left_x) = frame.x.checked_sub(PANEL_GAP + PANEL_W) {
            self.draw_hold_panel(fb, snap, left_x, frame.y);
            self.draw_score_panel(fb, &snap.hud, left_x, frame.y.saturating_add(5));
        }
        let right_x = frame.x.saturating_add(frame.w).saturating_add(PANEL_GAP);
        if viewport.width.saturating_sub(right_x) >= PANEL_W / 2 {
            self.draw_next_panel(fb, snap, right_x, frame.y);
        }

        // Overlays.
        match snap.phase {
            GamePhase::NotStarted => self.draw_overlay(
                fb,
                frame,
                "CONTEXT TETRIS",
                &["Pack tokens into the context window", "", "ENTER to start"],
            ),
            GamePhase::Paused => self.draw_overlay(fb, frame, "PAUSED", &["P or ENTER to resume"]),
            GamePhase::GameOver => {
                let hud = &snap.hud;
                let subtitle = format!(
                    "{} tokens packed · Level {}: {}",
                    format_tokens(hud.final_score.unwrap_or(hud.score)),
                    hud.final_level.unwrap_or(hud.level) + 1,
                    hud.level_name
                );
                self.draw_overlay(
                    fb,
                    frame,
                    "CONTEXT OVERFLOW",
                    &[subtitle.as_str(), "", "ENTER to play again"],
                );
            }
            GamePhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(definition(kind).color, PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Two-row miniature of a spawn shape, two columns per cell.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dim: bool) {
        let def = definition(kind);
        let Some((top, _)) = def.shape.occupied_rows() else {
            return;
        };
        let mut style = CellStyle::new(def.color, SCREEN_BG);
        if dim {
            style = style.dim();
        }
        for (dx, dy) in def.shape.minos() {
            let px = x.saturating_add(dx as u16 * 2);
            let py = y.saturating_add(dy as u16 - top as u16);
            fb.put_char(px, py, '█', style);
            fb.put_char(px + 1, py, '█', style);
        }
    }

    fn draw_hold_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        fb.put_str(x, y, "HOLD", LABEL);
        match snap.hold {
            Some(kind) => {
                // Greyed out until the next lock.
                let used = !snap.can_hold;
                self.draw_preview(fb, x, y + 1, kind, used);
                let name_style = if used { VALUE.dim() } else { VALUE };
                fb.put_str(x, y + 3, definition(kind).name, name_style);
            }
            None => fb.put_str(x, y + 1, "-", VALUE.dim()),
        }
    }

    fn draw_score_panel(&self, fb: &mut FrameBuffer, hud: &HudSnapshot, x: u16, y: u16) {
        let mut y = y;

        fb.put_str(x, y, "TOKENS", LABEL);
        y = y.saturating_add(1);
        fb.put_str(x, y, &format_tokens(hud.score), VALUE);
        y = y.saturating_add(2);

        fb.put_str(x, y, "LINES", LABEL);
        y = y.saturating_add(1);
        fb.put_u32(x, y, hud.lines, VALUE);
        y = y.saturating_add(2);

        fb.put_str(x, y, "LEVEL", LABEL);
        y = y.saturating_add(1);
        let digits = fb.put_u32(x, y, hud.level + 1, VALUE);
        fb.put_str(x + digits + 1, y, hud.level_name, ACCENT);
        y = y.saturating_add(1);
        fb.put_str(x, y, hud.context_label, VALUE);
        fb.put_str(x + 6, y, "ctx", VALUE.dim());
        y = y.saturating_add(1);
        fb.put_str(x, y, &format!("{:.1}x", hud.speed), VALUE);
        fb.put_str(x + 6, y, "speed", VALUE.dim());
    }

    fn draw_next_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        fb.put_str(x, y, "NEXT", LABEL);
        let mut py = y.saturating_add(1);
        for kind in snap.next_queue.iter().flatten() {
            self.draw_preview(fb, x, py, *kind, false);
            fb.put_str(x, py + 2, definition(*kind).name, VALUE.dim());
            py = py.saturating_add(4);
        }
    }

    /// Title centered on the board, extra lines below it.
    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, title: &str, lines: &[&str]) {
        let title_y = frame.y.saturating_add(frame.h / 2).saturating_sub(1);
        let title_style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        self.put_centered(fb, frame, title_y, title, title_style);

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = title_y.saturating_add(i as u16 + 1);
            self.put_centered(fb, frame, y, line, VALUE);
        }
    }

    fn put_centered(&self, fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = frame.center_x().saturating_sub(text_w / 2);
        fb.put_str(x, y, text, style);
    }
}

/// Board coordinates of a cell inside the visible grid.
fn visible_cell(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}
