//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, bag, levels and
//! scoring. It owns the phase machine (`NotStarted -> Running <-> Paused`,
//! `Running -> GameOver`), gravity timing, line-clear scheduling and the
//! logical actions driven by input.
//!
//! Full rows are not removed immediately: they flash for a few frames and are
//! removed once `LINE_CLEAR_DELAY_MS` of ticked time has passed. While a removal
//! is pending the falling piece is frozen (no gravity, no piece actions), so it
//! never moves against rows that are about to disappear.

use log::{debug, info};

use crate::board::{Board, LockOutcome, RowSet};
use crate::levels::{get_drop_interval_ms, level_for_lines, level_info, LevelInfo};
use crate::pieces::{try_rotate, ActivePiece};
use crate::rng::{Bag, NextQueue};
use crate::scoring::{calculate_drop_score, calculate_line_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, HudSnapshot};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    next_queue: NextQueue,
    bag: Bag,
    phase: GamePhase,
    score: u32,
    lines: u32,
    level: u32,
    /// Time accumulated since the last gravity step.
    drop_timer_ms: u32,
    /// Rows waiting to be removed.
    pending_clear: RowSet,
    line_clear_timer_ms: u32,
    clear_flash_frames: u8,
    /// Number of games started with this state (increments on every start).
    games_started: u32,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            next_queue: NextQueue::new(),
            bag: Bag::new(seed),
            phase: GamePhase::NotStarted,
            score: 0,
            lines: 0,
            level: 0,
            drop_timer_ms: 0,
            pending_clear: RowSet::new(),
            line_clear_timer_ms: 0,
            clear_flash_frames: 0,
            games_started: 0,
        }
    }

    /// Start a new game from `NotStarted` or `GameOver`.
    ///
    /// Resets the board, score, hold slot, queue and timers, then spawns the
    /// first piece. Returns false (and does nothing) from any other phase.
    pub fn start(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::NotStarted | GamePhase::GameOver) {
            return false;
        }

        self.board.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.bag.reset();
        self.next_queue.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.drop_timer_ms = 0;
        self.pending_clear.clear();
        self.line_clear_timer_ms = 0;
        self.clear_flash_frames = 0;
        self.games_started = self.games_started.wrapping_add(1);
        self.phase = GamePhase::Running;

        info!("game {} started", self.games_started);

        self.next_queue.fill(&mut self.bag);
        self.spawn_piece();
        true
    }

    /// Toggle between `Running` and `Paused`. No-op in other phases.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                info!("paused");
                true
            }
            GamePhase::Paused => self.resume(),
            GamePhase::NotStarted | GamePhase::GameOver => false,
        }
    }

    /// Leave `Paused`. No-op in other phases.
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Running;
        info!("resumed");
        true
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        self.next_queue.as_slice()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup (tests, benches).
    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the falling piece for scenario setup (tests, benches).
    #[doc(hidden)]
    pub fn replace_active(&mut self, piece: Option<ActivePiece>) {
        self.active = piece;
    }

    /// Rows detected as full and not yet removed.
    pub fn pending_clear(&self) -> &[u8] {
        &self.pending_clear
    }

    /// Whether a line removal is scheduled.
    pub fn is_clearing(&self) -> bool {
        !self.pending_clear.is_empty()
    }

    pub fn clear_flash_frames(&self) -> u8 {
        self.clear_flash_frames
    }

    /// Current row of the level table.
    pub fn level_info(&self) -> &'static LevelInfo {
        level_info(self.level)
    }

    /// Get current drop interval based on level
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Place a piece at its entry position: the spawn row, or one row lower
    /// when only the spawn row is blocked. `None` when neither fits.
    fn enter(&self, kind: PieceKind) -> Option<ActivePiece> {
        let piece = ActivePiece::spawn(kind);
        [piece, piece.moved(0, 1)]
            .into_iter()
            .find(|p| !self.board.collides(&p.shape, p.x, p.y))
    }

    /// Spawn a new piece from the queue
    ///
    /// Ends the game, leaving the grid untouched, when the piece has no legal
    /// entry position.
    pub(crate) fn spawn_piece(&mut self) -> bool {
        let kind = self.next_queue.pop_front(&mut self.bag);

        match self.enter(kind) {
            Some(piece) => {
                debug!("spawned {} at ({}, {})", kind.as_str(), piece.x, piece.y);
                self.active = Some(piece);
                true
            }
            None => {
                self.active = None;
                self.end_game("spawn blocked");
                false
            }
        }
    }

    fn end_game(&mut self, reason: &str) {
        self.phase = GamePhase::GameOver;
        info!(
            "context overflow ({}): {} tokens, level {} ({})",
            reason,
            self.score,
            self.level + 1,
            self.level_info().name
        );
    }

    /// Whether piece actions are currently accepted.
    fn accepts_piece_input(&self) -> bool {
        self.phase == GamePhase::Running && self.pending_clear.is_empty() && self.active.is_some()
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.moved(dx, dy);
        if self.board.collides(&moved.shape, moved.x, moved.y) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Try to rotate the active piece with horizontal kicks
    pub(crate) fn try_rotate(&mut self, dir: RotateDir) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        match try_rotate(&active, dir, |shape, x, y| board.collides(shape, x, y)) {
            Some((rotated, _kick)) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Move down one row, scoring a token and restarting the gravity timer.
    pub(crate) fn soft_drop(&mut self) -> bool {
        if !self.try_move(0, 1) {
            return false;
        }
        self.score = self
            .score
            .saturating_add(calculate_drop_score(1, false));
        self.drop_timer_ms = 0;
        true
    }

    /// Hard drop the active piece to its resting row and lock it.
    ///
    /// Returns the number of rows dropped.
    pub(crate) fn hard_drop(&mut self) -> Option<u32> {
        let active = self.active?;
        let ghost_y = self.ghost_y()?;
        let rows = (ghost_y - active.y) as u32;

        self.active = Some(ActivePiece {
            y: ghost_y,
            ..active
        });
        self.score = self
            .score
            .saturating_add(calculate_drop_score(rows, true));
        self.drop_timer_ms = 0;

        self.lock_piece();
        Some(rows)
    }

    /// Swap active piece with hold piece
    ///
    /// Allowed once per lock. An empty slot takes the active kind and the next
    /// piece spawns; otherwise the held kind re-enters unrotated at its spawn
    /// position. Ignored unless piece input is accepted.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold || !self.accepts_piece_input() {
            return false;
        }

        let Some(active) = self.active else {
            return false;
        };

        self.can_hold = false;

        match self.hold.replace(active.kind) {
            Some(held) => match self.enter(held) {
                Some(piece) => {
                    debug!("hold: {} <-> {}", active.kind.as_str(), held.as_str());
                    self.active = Some(piece);
                }
                None => {
                    self.active = None;
                    self.end_game("held piece has no room");
                }
            },
            None => {
                debug!("hold: stored {}", active.kind.as_str());
                self.spawn_piece();
            }
        }

        true
    }

    /// Lock the active piece onto the board and handle line clears
    pub(crate) fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        match self
            .board
            .lock(&active.shape, active.x, active.y, active.kind)
        {
            LockOutcome::AboveCeiling => {
                self.end_game("locked above the ceiling");
            }
            LockOutcome::Locked => {
                debug!("locked {} at ({}, {})", active.kind.as_str(), active.x, active.y);
                self.detect_and_clear_lines();
                self.can_hold = true;
                self.spawn_piece();
            }
        }
    }

    /// Find newly full rows, score them and schedule their removal.
    ///
    /// Returns the number of rows found. Rows already waiting for removal are
    /// not counted again.
    fn detect_and_clear_lines(&mut self) -> usize {
        let rows = self.board.full_rows(&self.pending_clear);
        let count = rows.len();
        if count == 0 {
            return 0;
        }

        let points = calculate_line_score(count, self.level);
        self.lines = self.lines.saturating_add(count as u32);
        self.score = self.score.saturating_add(points);
        self.pending_clear.extend(rows);
        self.line_clear_timer_ms = LINE_CLEAR_DELAY_MS;
        self.clear_flash_frames = CLEAR_FLASH_FRAMES;

        debug!("{} line(s) cleared for {} tokens", count, points);
        count
    }

    /// Remove the pending rows and recompute the level.
    fn finish_line_clear(&mut self) {
        let removed = self.board.remove_rows(&self.pending_clear);
        self.pending_clear.clear();
        self.line_clear_timer_ms = 0;
        debug!("removed {} row(s)", removed);

        self.update_level();

        // The grid shifted under the waiting piece.
        if let Some(active) = self.active {
            if self.board.collides(&active.shape, active.x, active.y) {
                self.active = None;
                self.end_game("piece buried by shifted rows");
            }
        }
    }

    fn update_level(&mut self) {
        let level = level_for_lines(self.lines);
        if level != self.level {
            self.level = level;
            let info = level_info(level);
            info!(
                "level {}: {} ({} context, {:.1}x)",
                level + 1,
                info.name,
                info.context,
                info.speed
            );
        }
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut y = active.y;
        while !self.board.collides(&active.shape, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Advance the simulation by one frame.
    ///
    /// Counts down a pending line removal (gravity is frozen until it
    /// completes); otherwise applies gravity once the accumulated time exceeds
    /// the drop interval, locking the piece when it cannot fall. Finally steps
    /// the flash animation. Returns true if the board or active piece changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }

        let mut changed = false;

        if self.is_clearing() {
            self.line_clear_timer_ms = self.line_clear_timer_ms.saturating_sub(elapsed_ms);
            if self.line_clear_timer_ms == 0 {
                self.finish_line_clear();
                changed = true;
            }
        } else if self.active.is_some() {
            self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
            if self.drop_timer_ms > self.drop_interval_ms() {
                if !self.try_move(0, 1) {
                    self.lock_piece();
                }
                self.drop_timer_ms = 0;
                changed = true;
            }
        }

        self.clear_flash_frames = self.clear_flash_frames.saturating_sub(1);

        changed
    }

    /// Apply a game action
    ///
    /// Piece actions are ignored unless the game is running with no line
    /// removal pending. Returns whether the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => return self.toggle_pause(),
            GameAction::Start => {
                return match self.phase {
                    GamePhase::Paused => self.resume(),
                    GamePhase::NotStarted | GamePhase::GameOver => self.start(),
                    GamePhase::Running => false,
                };
            }
            _ => {}
        }

        if !self.accepts_piece_input() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::RotateCw => self.try_rotate(RotateDir::Cw),
            GameAction::RotateCcw => self.try_rotate(RotateDir::Ccw),
            GameAction::Hold => self.hold(),
            GameAction::Pause | GameAction::Start => false,
        }
    }

    /// Values for the score panel.
    pub fn hud(&self) -> HudSnapshot {
        let mut hud = HudSnapshot::for_level(self.score, self.lines, self.level);
        if self.phase == GamePhase::GameOver {
            hud.game_over = true;
            hud.final_score = Some(self.score);
            hud.final_level = Some(self.level);
        }
        hud
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.can_hold = self.can_hold;

        out.next_queue = [None; NEXT_QUEUE_LEN];
        for (slot, kind) in out.next_queue.iter_mut().zip(self.next_queue.as_slice()) {
            *slot = Some(*kind);
        }

        out.flashing_rows = [false; BOARD_HEIGHT as usize];
        for &y in &self.pending_clear {
            out.flashing_rows[y as usize] = true;
        }
        out.flash_frames = self.clear_flash_frames;
        out.phase = self.phase;
        out.hud = self.hud();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{get_shape, spawn_x};

    fn running(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        assert!(state.start());
        state
    }

    fn place(state: &mut GameState, kind: PieceKind, x: i8, y: i8) {
        state.active = Some(ActivePiece {
            kind,
            shape: get_shape(kind),
            x,
            y,
        });
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 0);
        assert_eq!(state.lines, 0);
        assert!(state.active.is_none());
        assert!(state.hold.is_none());
        assert!(state.next_queue.is_empty());
    }

    #[test]
    fn test_game_start() {
        let state = running(12345);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.games_started, 1);
        let active = state.active.unwrap();
        assert_eq!(active.y, SPAWN_Y);
        assert_eq!(active.x, spawn_x(&active.shape));
        assert_eq!(state.next_queue.len(), NEXT_QUEUE_LEN);
    }

    #[test]
    fn test_actions_ignored_before_start() {
        let mut state = GameState::new(1);
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::Pause));
        assert!(!state.tick(5000));
        assert_eq!(state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_start_action_resumes_or_is_noop() {
        let mut state = GameState::new(1);
        assert!(state.apply_action(GameAction::Start));
        assert!(!state.apply_action(GameAction::Start));

        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.apply_action(GameAction::Start));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.games_started, 1);
    }

    #[test]
    fn test_pause_stops_game() {
        let mut state = running(12345);
        let initial = state.active.unwrap();

        assert!(state.toggle_pause());
        for _ in 0..100 {
            assert!(!state.tick(100));
        }
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert_eq!(state.active.unwrap(), initial);

        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_gravity_waits_for_interval() {
        let mut state = running(7);
        let y0 = state.active.unwrap().y;

        assert!(!state.tick(1000));
        assert_eq!(state.active.unwrap().y, y0);

        assert!(state.tick(1));
        assert_eq!(state.active.unwrap().y, y0 + 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_gravity_locks_grounded_piece() {
        let mut state = running(7);
        place(&mut state, PieceKind::O, 4, 18);

        assert!(state.tick(1001));

        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert!(state.board.is_occupied(x, y));
        }
        let next = state.active.unwrap();
        assert_eq!(next.y, SPAWN_Y);
        assert!(state.can_hold);
    }

    #[test]
    fn test_soft_drop_scores_and_resets_timer() {
        let mut state = running(3);
        state.drop_timer_ms = 700;

        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.score, 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_soft_drop_on_floor_is_noop() {
        let mut state = running(3);
        place(&mut state, PieceKind::O, 0, 18);

        assert!(!state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.score, 0);
        assert_eq!(state.active.unwrap().y, 18);
    }

    #[test]
    fn test_hard_drop_scores_two_per_row_and_locks() {
        let mut state = running(3);
        place(&mut state, PieceKind::O, 0, SPAWN_Y);

        assert_eq!(state.hard_drop(), Some(19));
        assert_eq!(state.score, 38);
        assert!(state.board.is_occupied(0, 19));
        assert!(state.board.is_occupied(1, 18));
        assert_eq!(state.active.unwrap().y, SPAWN_Y);
    }

    #[test]
    fn test_single_line_clear() {
        let mut state = running(5);
        state.board.fill_row_except(19, &[0, 1, 2, 3], PieceKind::L);
        place(&mut state, PieceKind::I, 0, SPAWN_Y);

        assert!(state.apply_action(GameAction::HardDrop));

        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 38 + 100);
        assert_eq!(state.pending_clear.as_slice(), &[19u8][..]);
        assert_eq!(state.clear_flash_frames, CLEAR_FLASH_FRAMES);
    }

    #[test]
    fn test_double_line_clear_uses_bonus_table() {
        let mut state = running(5);
        state.level = 1;
        state.lines = 10;
        state.board.fill_row_except(18, &[0, 1], PieceKind::J);
        state.board.fill_row_except(19, &[0, 1], PieceKind::J);
        place(&mut state, PieceKind::O, 0, SPAWN_Y);

        assert!(state.apply_action(GameAction::HardDrop));

        assert_eq!(state.lines, 12);
        assert_eq!(state.score, 38 + 300 * 2);
    }

    #[test]
    fn test_rows_removed_after_delay() {
        let mut state = running(5);
        state.board.fill_row_except(19, &[0, 1, 2, 3], PieceKind::L);
        state.board.set(9, 18, Some(PieceKind::T));
        place(&mut state, PieceKind::I, 0, SPAWN_Y);
        assert!(state.apply_action(GameAction::HardDrop));

        // Frozen while the rows flash.
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.tick(LINE_CLEAR_DELAY_MS - 1));
        assert!(state.board.is_row_full(19));

        assert!(state.tick(1));
        assert!(!state.is_clearing());
        assert_eq!(state.board.get(9, 19), Some(Some(PieceKind::T)));
        assert_eq!(state.board.occupied_count(), 1);
        assert!(state.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn test_level_recomputed_after_removal() {
        let mut state = running(5);
        state.lines = 9;
        state.board.fill_row_except(19, &[0, 1, 2, 3], PieceKind::L);
        place(&mut state, PieceKind::I, 0, SPAWN_Y);
        assert!(state.apply_action(GameAction::HardDrop));

        assert_eq!(state.lines, 10);
        assert_eq!(state.score, 38 + 100);
        assert_eq!(state.level, 0);
        assert_eq!(state.drop_interval_ms(), 1000);

        state.tick(LINE_CLEAR_DELAY_MS);
        assert_eq!(state.level, 1);
        assert_eq!(state.drop_interval_ms(), 833);
        assert_eq!(state.level_info().name, "GPT-4");
    }

    #[test]
    fn test_flash_counts_down_per_frame() {
        let mut state = running(5);
        state.board.fill_row_except(19, &[0, 1, 2, 3], PieceKind::L);
        place(&mut state, PieceKind::I, 0, SPAWN_Y);
        state.apply_action(GameAction::HardDrop);

        state.tick(TICK_MS);
        assert_eq!(state.clear_flash_frames, CLEAR_FLASH_FRAMES - 1);
        for _ in 0..CLEAR_FLASH_FRAMES {
            state.tick(1);
        }
        assert_eq!(state.clear_flash_frames, 0);
    }

    #[test]
    fn test_lock_above_ceiling_ends_game() {
        let mut state = running(9);
        place(&mut state, PieceKind::O, 4, SPAWN_Y);

        state.lock_piece();

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.board.occupied_count(), 0);
        assert!(state.active.is_none());
        let hud = state.hud();
        assert!(hud.game_over);
        assert_eq!(hud.final_score, Some(0));
        assert_eq!(hud.final_level, Some(0));
    }

    #[test]
    fn test_blocked_spawn_ends_game_without_touching_grid() {
        let mut state = running(9);
        state.board.fill_row_except(0, &[], PieceKind::Z);
        state.board.fill_row_except(1, &[], PieceKind::Z);
        let before = state.board.clone();

        assert!(!state.spawn_piece());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.board, before);
        assert!(state.active.is_none());
        assert!(!state.tick(5000));
    }

    #[test]
    fn test_entry_moves_down_when_only_spawn_row_blocked() {
        let mut state = running(9);
        for x in 3..=6 {
            state.board.set(x, 0, Some(PieceKind::S));
        }

        let i = state.enter(PieceKind::I).unwrap();
        assert_eq!(i.y, SPAWN_Y + 1);
        assert!(state.enter(PieceKind::T).is_none());
    }

    #[test]
    fn test_hold_spawns_new_when_empty() {
        let mut state = running(12345);
        let initial_kind = state.active.unwrap().kind;
        let next_in_queue = state.next_queue.peek().unwrap();

        assert!(state.hold());
        assert_eq!(state.hold, Some(initial_kind));
        assert_eq!(state.active.unwrap().kind, next_in_queue);
        assert!(!state.can_hold);
    }

    #[test]
    fn test_hold_twice_is_noop() {
        let mut state = running(12345);
        assert!(state.apply_action(GameAction::Hold));
        let after_first = state.snapshot();

        assert!(!state.apply_action(GameAction::Hold));
        assert_eq!(state.snapshot(), after_first);
    }

    #[test]
    fn test_hold_ignored_while_paused() {
        let mut state = running(12345);
        assert!(state.apply_action(GameAction::Pause));
        let before = state.snapshot();
        let active = state.active;

        assert!(!state.hold());
        assert_eq!(state.active, active);
        assert!(state.hold.is_none());
        assert!(state.can_hold);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_hold_ignored_while_rows_flash() {
        let mut state = running(5);
        state.board.fill_row_except(19, &[0, 1, 2, 3], PieceKind::L);
        place(&mut state, PieceKind::I, 0, SPAWN_Y);
        assert!(state.apply_action(GameAction::HardDrop));
        assert!(state.is_clearing());
        let waiting = state.active;

        assert!(!state.hold());
        assert_eq!(state.active, waiting);
        assert!(state.hold.is_none());
    }

    #[test]
    fn test_hold_swap_restores_unrotated_spawn() {
        let mut state = running(12345);
        let first = state.active.unwrap().kind;
        assert!(state.hold());

        state.hard_drop();
        assert!(state.can_hold);
        let second = state.active.unwrap().kind;
        state.try_move(1, 0);
        state.try_rotate(RotateDir::Cw);

        assert!(state.hold());
        let active = state.active.unwrap();
        assert_eq!(active.kind, first);
        assert_eq!(active.shape, get_shape(first));
        assert_eq!(active.x, spawn_x(&active.shape));
        assert_eq!(active.y, SPAWN_Y);
        assert_eq!(state.hold, Some(second));
    }

    #[test]
    fn test_wall_kick_off_left_wall() {
        let mut state = running(1);
        state.active = Some(ActivePiece {
            kind: PieceKind::I,
            shape: get_shape(PieceKind::I).rotate_cw(),
            x: -2,
            y: 5,
        });

        assert!(state.try_rotate(RotateDir::Cw));
        let active = state.active.unwrap();
        assert_eq!(active.x, 0);
        assert_eq!(active.shape, get_shape(PieceKind::I).rotate_cw().rotate_cw());
    }

    #[test]
    fn test_rotation_rejected_in_narrow_well() {
        let mut state = running(1);
        for y in 10..20 {
            state.board.fill_row_except(y, &[0], PieceKind::L);
        }
        let vertical = ActivePiece {
            kind: PieceKind::I,
            shape: get_shape(PieceKind::I).rotate_cw(),
            x: -2,
            y: 12,
        };
        state.active = Some(vertical);

        assert!(!state.apply_action(GameAction::RotateCw));
        assert!(!state.apply_action(GameAction::RotateCcw));
        assert_eq!(state.active, Some(vertical));
    }

    #[test]
    fn test_ghost_y_on_empty_board() {
        let mut state = running(1);
        place(&mut state, PieceKind::T, 3, SPAWN_Y);
        assert_eq!(state.ghost_y(), Some(18));

        place(&mut state, PieceKind::I, 3, SPAWN_Y);
        assert_eq!(state.ghost_y(), Some(18));
    }

    #[test]
    fn test_restart_after_game_over_resets() {
        let mut state = running(9);
        state.score = 500;
        state.lines = 12;
        state.level = 1;
        state.board.set(0, 19, Some(PieceKind::I));
        place(&mut state, PieceKind::O, 4, SPAWN_Y);
        state.lock_piece();
        assert!(state.game_over());

        assert!(state.apply_action(GameAction::Start));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 0);
        assert_eq!(state.board.occupied_count(), 0);
        assert!(state.hold.is_none());
        assert_eq!(state.games_started, 2);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let a = running(2024);
        let b = running(2024);
        assert_eq!(a.active.unwrap().kind, b.active.unwrap().kind);
        assert_eq!(a.next_queue(), b.next_queue());
    }

    #[test]
    fn test_snapshot_marks_flashing_rows() {
        let mut state = running(5);
        state.board.fill_row_except(19, &[0, 1, 2, 3], PieceKind::L);
        place(&mut state, PieceKind::I, 0, SPAWN_Y);
        state.apply_action(GameAction::HardDrop);

        let snap = state.snapshot();
        assert!(snap.is_flashing(19));
        assert!(!snap.is_flashing(18));
        assert_eq!(snap.hud.lines, 1);
        assert_eq!(snap.next_queue.iter().flatten().count(), NEXT_QUEUE_LEN);
    }
}
