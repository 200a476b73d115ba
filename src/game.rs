//! Game session coordinator
//!
//! [`Game`] is what a host (UI, CLI, browser shell) talks to. It hands out
//! fresh puzzle copies from the catalog, drives the active [`PuzzleEngine`]
//! and forwards completions to the progression tracker exactly once.

use chrono::{Local, NaiveDate};
use glam::Vec2;
use thiserror::Error;

use crate::catalog::PuzzleCatalog;
use crate::consts::BOARD_SIZE;
use crate::persistence::PersistenceGateway;
use crate::progress::{ProgressEvent, ProgressionTracker};
use crate::sim::{ActionResult, HintError, HintPayment, Puzzle, PuzzleCompleted, PuzzleEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no catalog puzzle numbered {0}")]
    UnknownPuzzle(u32),
    #[error("no puzzle in progress")]
    NoActivePuzzle,
    #[error(transparent)]
    Hint(#[from] HintError),
}

/// Result of one player action as seen by the host
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    Ignored,
    Applied,
    /// The puzzle was just solved; progression has already been updated
    Completed {
        result: PuzzleCompleted,
        events: Vec<ProgressEvent>,
    },
}

/// One player's game: catalog, progression and at most one live puzzle
#[derive(Debug)]
pub struct Game<S: PersistenceGateway> {
    catalog: PuzzleCatalog,
    tracker: ProgressionTracker<S>,
    active: Option<PuzzleEngine>,
    today: NaiveDate,
}

impl<S: PersistenceGateway> Game<S> {
    /// Load saved progress and use the local calendar date
    pub fn load(store: S) -> Self {
        Self::load_with_date(store, Local::now().date_naive())
    }

    /// Load saved progress with an explicit "today"
    pub fn load_with_date(store: S, today: NaiveDate) -> Self {
        log::info!("Starting session for {today}");
        Self {
            catalog: PuzzleCatalog::new(),
            tracker: ProgressionTracker::load(store),
            active: None,
            today,
        }
    }

    pub fn catalog(&self) -> &PuzzleCatalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &ProgressionTracker<S> {
        &self.tracker
    }

    /// Direct access for profile, shop and settings actions
    pub fn tracker_mut(&mut self) -> &mut ProgressionTracker<S> {
        &mut self.tracker
    }

    pub fn active(&self) -> Option<&PuzzleEngine> {
        self.active.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Roll the calendar over (hosts that stay open past midnight)
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Begin a fresh attempt at catalog puzzle `number`, replacing any
    /// puzzle in progress
    pub fn start_puzzle(&mut self, number: u32) -> Result<&Puzzle, GameError> {
        let puzzle = self
            .catalog
            .by_number(number)
            .ok_or(GameError::UnknownPuzzle(number))?
            .fresh_copy();
        log::info!("Starting puzzle {}: {}", puzzle.number, puzzle.title);
        Ok(self.activate_puzzle(puzzle))
    }

    /// Begin today's daily puzzle
    pub fn start_daily(&mut self) -> &Puzzle {
        let puzzle = self.catalog.daily_puzzle(self.today);
        log::info!("Starting daily puzzle for {} (template {})", self.today, puzzle.id);
        self.activate_puzzle(puzzle)
    }

    fn activate_puzzle(&mut self, puzzle: Puzzle) -> &Puzzle {
        self.abandon();
        self.active.insert(PuzzleEngine::new(puzzle)).puzzle()
    }

    /// Drop the live puzzle. Unfinished catalog attempts leave their move
    /// count on the catalog entry; an earlier solve is kept.
    pub fn abandon(&mut self) {
        if let Some(engine) = self.active.take() {
            let puzzle = engine.into_puzzle();
            if !puzzle.is_daily && !puzzle.is_solved {
                let solved_before = self.catalog.get(puzzle.id).is_some_and(|p| p.is_solved);
                self.catalog
                    .record_progress(puzzle.id, puzzle.current_moves, solved_before);
            }
        }
    }

    fn engine_mut(&mut self) -> Result<&mut PuzzleEngine, GameError> {
        self.active.as_mut().ok_or(GameError::NoActivePuzzle)
    }

    pub fn activate(&mut self, element_id: u32) -> Result<TurnOutcome, GameError> {
        let result = self.engine_mut()?.activate_element(element_id);
        Ok(self.settle(result))
    }

    /// Drag an element; the target is clamped to the board
    pub fn move_element(&mut self, element_id: u32, pos: Vec2) -> Result<TurnOutcome, GameError> {
        let pos = pos.clamp(Vec2::ZERO, Vec2::splat(BOARD_SIZE));
        let result = self.engine_mut()?.move_element(element_id, pos);
        Ok(self.settle(result))
    }

    /// Reveal the next hint, paid from the player's inventory or coins
    pub fn request_hint(&mut self) -> Result<(String, HintPayment), GameError> {
        let engine = self.active.as_mut().ok_or(GameError::NoActivePuzzle)?;
        let (hint, payment) = engine.request_hint(&mut self.tracker)?;
        Ok((hint.to_string(), payment))
    }

    /// Advance the active puzzle's clock
    pub fn tick(&mut self, dt: f64) {
        if let Some(engine) = self.active.as_mut() {
            engine.tick(dt);
        }
    }

    /// Restart the active puzzle in place
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.engine_mut()?.reset();
        Ok(())
    }

    fn settle(&mut self, result: ActionResult) -> TurnOutcome {
        match result {
            ActionResult::Ignored => TurnOutcome::Ignored,
            ActionResult::Applied => TurnOutcome::Applied,
            ActionResult::Completed(result) => {
                let mut events = self.tracker.complete_puzzle(&result);
                if result.is_daily {
                    events.extend(self.tracker.complete_daily_puzzle(self.today));
                } else {
                    self.catalog
                        .record_progress(result.puzzle_id, result.moves, true);
                }
                TurnOutcome::Completed { result, events }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DAILY_BONUS_COINS, DAILY_TITLE, HINT_COST_COINS};
    use crate::persistence::MemoryStore;
    use crate::progress::AchievementId;
    use crate::sim::{Difficulty, ElementState};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn game() -> Game<MemoryStore> {
        // Day 10 of the year maps to catalog index 0 ("First Freeze")
        Game::load_with_date(MemoryStore::new(), day(2025, 1, 10))
    }

    /// First Freeze: fish #2 at (200, 100), goal #3 at (300, 100)
    fn solve_first_freeze(game: &mut Game<MemoryStore>) -> TurnOutcome {
        game.move_element(2, Vec2::new(290.0, 100.0)).unwrap()
    }

    #[test]
    fn test_actions_need_active_puzzle() {
        let mut g = game();
        assert_eq!(g.activate(1), Err(GameError::NoActivePuzzle));
        assert_eq!(g.request_hint(), Err(GameError::NoActivePuzzle));
        assert_eq!(g.reset(), Err(GameError::NoActivePuzzle));
        assert!(matches!(g.start_puzzle(11), Err(GameError::UnknownPuzzle(11))));
    }

    #[test]
    fn test_solving_catalog_puzzle_updates_everything() {
        let mut g = game();
        g.start_puzzle(1).unwrap();
        g.tick(12.0);

        let TurnOutcome::Completed { result, events } = solve_first_freeze(&mut g) else {
            panic!("expected completion");
        };
        assert_eq!(result.moves, 1);
        assert_eq!(result.elapsed_secs, 12.0);
        assert!(!result.is_daily);
        assert!(events.contains(&ProgressEvent::AchievementUnlocked {
            id: AchievementId::FirstFreeze,
            reward_coins: 50
        }));

        assert_eq!(g.tracker().user().puzzles_solved, 1);
        assert!(g.catalog().by_number(1).unwrap().is_solved);
        assert_eq!(g.catalog().solved_count(), 1);

        // Further actions are ignored and do not double count
        assert_eq!(g.activate(2), Ok(TurnOutcome::Ignored));
        assert_eq!(g.tracker().user().puzzles_solved, 1);
    }

    #[test]
    fn test_start_puzzle_gives_fresh_copy() {
        let mut g = game();
        g.start_puzzle(1).unwrap();
        solve_first_freeze(&mut g);

        let puzzle = g.start_puzzle(1).unwrap();
        assert!(!puzzle.is_solved);
        assert_eq!(puzzle.current_moves, 0);
        assert_eq!(puzzle.elements[0].state, ElementState::Frozen);
    }

    #[test]
    fn test_daily_completion_awards_streak_and_bonus() {
        let mut g = game();
        let daily = g.start_daily();
        assert!(daily.is_daily);
        assert_eq!(daily.title, DAILY_TITLE);
        assert_eq!(daily.difficulty, Difficulty::Medium);
        assert_eq!(daily.id, 1);

        let TurnOutcome::Completed { events, .. } = solve_first_freeze(&mut g) else {
            panic!("expected completion");
        };
        assert!(events.contains(&ProgressEvent::DailyBonus(DAILY_BONUS_COINS)));
        let user = g.tracker().user();
        assert_eq!(user.daily_streak, 1);
        assert_eq!(user.last_played_date, Some(day(2025, 1, 10)));
        // Daily sessions leave the catalog alone
        assert_eq!(g.catalog().solved_count(), 0);
    }

    #[test]
    fn test_daily_streak_continues_next_day() {
        let mut g = game();
        g.start_daily();
        solve_first_freeze(&mut g);

        g.set_today(day(2025, 1, 11));
        g.start_daily();
        g.abandon();
        assert_eq!(g.tracker().user().daily_streak, 1);

        g.set_today(day(2025, 1, 20));
        g.start_daily();
        solve_first_freeze(&mut g);
        assert_eq!(g.tracker().user().daily_streak, 1);
    }

    #[test]
    fn test_hints_use_inventory_then_coins() {
        let mut g = game();
        g.start_puzzle(1).unwrap();

        let hints = g.tracker().user().hints_available;
        let coins = g.tracker().user().coins;
        for _ in 0..hints {
            let (_, payment) = g.request_hint().unwrap();
            assert_eq!(payment, HintPayment::Inventory);
        }
        // First Freeze has three hints and a new player holds three
        assert_eq!(
            g.request_hint(),
            Err(GameError::Hint(HintError::NoHintsLeft))
        );
        assert_eq!(g.tracker().user().hints_available, 0);
        assert_eq!(g.tracker().user().coins, coins);

        g.start_puzzle(2).unwrap();
        let (hint, payment) = g.request_hint().unwrap();
        assert_eq!(hint, "Use Current Guide fish to redirect water flow");
        assert_eq!(payment, HintPayment::Coins(HINT_COST_COINS));
        assert_eq!(g.tracker().user().coins, coins - HINT_COST_COINS);
    }

    #[test]
    fn test_abandon_records_partial_progress() {
        let mut g = game();
        g.start_puzzle(1).unwrap();
        g.activate(1).unwrap();
        g.activate(1).unwrap();
        g.start_puzzle(2).unwrap();

        let first = g.catalog().by_number(1).unwrap();
        assert_eq!(first.current_moves, 2);
        assert!(!first.is_solved);
        assert!(g.active().is_some());
    }

    #[test]
    fn test_abandoned_replay_keeps_earlier_solve() {
        let mut g = game();
        g.start_puzzle(1).unwrap();
        solve_first_freeze(&mut g);

        g.start_puzzle(1).unwrap();
        g.activate(1).unwrap();
        g.start_puzzle(2).unwrap();

        let first = g.catalog().by_number(1).unwrap();
        assert!(first.is_solved);
        assert_eq!(first.current_moves, 1);
        assert_eq!(g.catalog().solved_count(), 1);
    }

    #[test]
    fn test_moves_are_clamped_to_board() {
        let mut g = game();
        g.start_puzzle(1).unwrap();
        g.move_element(1, Vec2::new(-50.0, 900.0)).unwrap();
        let ice = g.active().unwrap().puzzle().element(1).unwrap();
        assert_eq!(ice.pos, Vec2::new(0.0, BOARD_SIZE));
    }

    #[test]
    fn test_reset_restarts_active_puzzle() {
        let mut g = game();
        g.start_puzzle(1).unwrap();
        g.activate(2).unwrap();
        g.tick(5.0);
        g.reset().unwrap();
        let engine = g.active().unwrap();
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.elapsed_secs(), 0.0);
    }
}
