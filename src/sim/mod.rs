//! Puzzle simulation module
//!
//! All board logic lives here. This module must stay pure and deterministic:
//! - No rendering, platform or storage dependencies
//! - Time only enters through explicit `tick(dt)` calls
//! - Stable element order (board order as defined)

pub mod engine;
pub mod score;
pub mod state;
pub mod timer;

pub use engine::{
    ActionResult, HintError, HintPayment, HintWallet, PuzzleCompleted, PuzzleEngine, PuzzlePhase,
};
pub use score::{ScoreBreakdown, base_score, completion_coins, puzzle_score, score_breakdown};
pub use state::{
    Difficulty, ElementKind, ElementState, FishType, Puzzle, PuzzleElement, PuzzleError,
    PuzzleSpec,
};
pub use timer::PuzzleTimer;
