use context_tetris::core::{definition, get_shape, ActiveSnapshot, GameState};
use context_tetris::term::{AnchorY, FrameBuffer, GameView, Viewport};
use context_tetris::types::{GameAction, GamePhase, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

fn running_snapshot() -> context_tetris::core::GameSnapshot {
    let mut gs = GameState::new(1);
    gs.apply_action(GameAction::Start);
    gs.snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_in_piece_color() {
    let mut snap = running_snapshot();
    snap.board[19][0] = Some(PieceKind::J);
    snap.active = None;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    let left = fb.get(x0, y0).unwrap();
    let right = fb.get(x0 + 1, y0).unwrap();
    assert_eq!(left.ch, '█');
    assert_eq!(right.ch, '█');
    assert_eq!(left.style.fg, definition(PieceKind::J).color);
}

#[test]
fn term_view_flashes_rows_waiting_for_removal() {
    let mut snap = running_snapshot();
    snap.board[19] = [Some(PieceKind::T); 10];
    snap.flashing_rows[19] = true;
    snap.flash_frames = 5;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let cell = fb.get(5, 20).unwrap();
    assert_eq!(cell.ch, '█');
    assert_ne!(cell.style.fg, definition(PieceKind::T).color);

    snap.flash_frames = 0;
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(5, 20).unwrap().style.fg, definition(PieceKind::T).color);
}

#[test]
fn term_view_skips_cells_above_grid() {
    let mut snap = running_snapshot();
    snap.active = Some(ActiveSnapshot {
        kind: PieceKind::O,
        shape: get_shape(PieceKind::O),
        x: 0,
        y: -1,
    });
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Only the lower row of the O is visible, on grid row 0.
    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1, 0).unwrap().ch, '─');
    assert_ne!(fb.get(1, 2).unwrap().ch, '█');
}

#[test]
fn term_view_draws_ghost_below_active() {
    let snap = running_snapshot();
    let active = snap.active.unwrap();
    let ghost_y = snap.ghost_y.unwrap();
    assert!(ghost_y > active.y);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let ghost_glyphs = fb.cells().iter().filter(|c| c.ch == '░').count();
    // Four minos, two columns each.
    assert_eq!(ghost_glyphs, 8);
}

#[test]
fn term_view_draws_side_panels_when_wide_enough() {
    let mut gs = GameState::new(1);
    gs.apply_action(GameAction::Start);
    gs.apply_action(GameAction::Hold);
    let mut snap = gs.snapshot();
    snap.hud.score = 12_345;

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    let all = screen_text(&fb);

    assert!(all.contains("HOLD"));
    assert!(all.contains("NEXT"));
    assert!(all.contains("TOKENS"));
    assert!(all.contains("12.3K"));
    assert!(all.contains("GPT-3.5"));
    assert!(all.contains("1.0x"));
    assert!(all.contains(definition(gs.hold_piece().unwrap()).name));
}

#[test]
fn term_view_omits_panels_on_narrow_viewport() {
    let fb = GameView::default().render(&running_snapshot(), Viewport::new(22, 22));
    let all = screen_text(&fb);
    assert!(!all.contains("NEXT"));
    assert!(!all.contains("TOKENS"));
}

#[test]
fn term_view_shows_phase_overlays() {
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    let title = screen_text(&view.render(&GameState::new(1).snapshot(), vp));
    assert!(title.contains("CONTEXT TETRIS"));
    assert!(title.contains("Pack tokens into the context window"));

    let mut snap = running_snapshot();
    snap.phase = GamePhase::Paused;
    assert!(screen_text(&view.render(&snap, vp)).contains("PAUSED"));

    snap.phase = GamePhase::Running;
    let running = screen_text(&view.render(&snap, vp));
    assert!(!running.contains("PAUSED"));
    assert!(!running.contains("CONTEXT OVERFLOW"));
}

#[test]
fn term_view_game_over_summary() {
    let mut snap = running_snapshot();
    snap.phase = GamePhase::GameOver;
    snap.hud.game_over = true;
    snap.hud.final_score = Some(4_200);
    snap.hud.final_level = Some(0);

    let all = screen_text(&GameView::default().render(&snap, Viewport::new(80, 24)));
    assert!(all.contains("CONTEXT OVERFLOW"));
    assert!(all.contains("4.2K tokens packed · Level 1: GPT-3.5"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // Board frame is 22 rows tall (20 + border).
    let fb = view.render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');

    let fb = view
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = running_snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(10, 10);

    view.render_into(&snap, Viewport::new(60, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (60, 24));
    assert_eq!(fb, view.render(&snap, Viewport::new(60, 24)));
}
