//! Puzzle board and core data types
//!
//! Everything a live puzzle session mutates lives on [`Puzzle`].

use std::collections::HashSet;

use chrono::NaiveDate;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Puzzle difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

/// Fish species a puzzle may call for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishType {
    IceBreaker,
    CurrentGuide,
    MechanismTrigger,
    Freezer,
    Heater,
}

impl FishType {
    pub const ALL: [FishType; 5] = [
        FishType::IceBreaker,
        FishType::CurrentGuide,
        FishType::MechanismTrigger,
        FishType::Freezer,
        FishType::Heater,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FishType::IceBreaker => "Ice Breaker",
            FishType::CurrentGuide => "Current Guide",
            FishType::MechanismTrigger => "Mechanism Trigger",
            FishType::Freezer => "Freezer",
            FishType::Heater => "Heater",
        }
    }

    /// Flavor text shown in the fish collection
    pub fn ability(&self) -> &'static str {
        match self {
            FishType::IceBreaker => "Breaks through ice blocks",
            FishType::CurrentGuide => "Directs water currents",
            FishType::MechanismTrigger => "Activates puzzle mechanisms",
            FishType::Freezer => "Freezes water into ice",
            FishType::Heater => "Melts ice blocks",
        }
    }
}

/// What a board element is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    IceBlock,
    Fish,
    Mechanism,
    Current,
    Goal,
}

impl ElementKind {
    /// State an element of this kind returns to on reset
    pub fn default_state(&self) -> ElementState {
        match self {
            ElementKind::IceBlock => ElementState::Frozen,
            ElementKind::Fish => ElementState::Active,
            ElementKind::Mechanism => ElementState::Inactive,
            ElementKind::Current => ElementState::Active,
            ElementKind::Goal => ElementState::Inactive,
        }
    }

    /// Whether `state` means anything for this kind
    pub fn accepts(&self, state: ElementState) -> bool {
        use ElementState::*;
        match self {
            ElementKind::IceBlock => matches!(state, Frozen | Melted),
            ElementKind::Fish | ElementKind::Mechanism | ElementKind::Current => {
                matches!(state, Active | Inactive)
            }
            ElementKind::Goal => matches!(state, Inactive | Active | Completed),
        }
    }
}

/// Element state. Only a subset is meaningful per kind, see [`ElementKind::accepts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementState {
    Frozen,
    Melted,
    Active,
    Inactive,
    Completed,
}

/// A positioned, typed, stateful object on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleElement {
    /// Unique within its puzzle
    pub id: u32,
    /// Board-space position (nominally 0..400 on both axes)
    pub pos: Vec2,
    pub kind: ElementKind,
    pub state: ElementState,
}

impl PuzzleElement {
    pub fn new(id: u32, x: f32, y: f32, kind: ElementKind, state: ElementState) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            kind,
            state,
        }
    }
}

/// Construction-time invariant violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PuzzleError {
    #[error("max moves must be positive (got {0})")]
    InvalidMaxMoves(u32),
    #[error("temperature must be finite (got {0})")]
    InvalidTemperature(f32),
    #[error("element id {0} appears more than once")]
    DuplicateElementId(u32),
    #[error("element {id} is a {kind:?} and cannot be {state:?}")]
    InvalidElementState {
        id: u32,
        kind: ElementKind,
        state: ElementState,
    },
}

/// A puzzle definition plus its in-session progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: u32,
    /// Catalog number (1..=10), 0 for daily puzzles
    pub number: u32,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub elements: Vec<PuzzleElement>,
    pub is_solved: bool,
    pub hints: Vec<String>,
    pub required_fish: Vec<FishType>,
    /// Advisory move budget, used for the efficiency bonus only
    pub max_moves: u32,
    pub current_moves: u32,
    /// Water temperature in °C. Below zero ice stays frozen.
    pub temperature: f32,
    pub is_daily: bool,
    pub date: Option<NaiveDate>,
}

/// Field set for [`Puzzle::new`]
#[derive(Debug, Clone)]
pub struct PuzzleSpec {
    pub id: u32,
    pub number: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub elements: Vec<PuzzleElement>,
    pub hints: &'static [&'static str],
    pub required_fish: &'static [FishType],
    pub max_moves: u32,
    pub temperature: f32,
}

impl Puzzle {
    /// Build an unsolved, non-daily puzzle, rejecting broken definitions
    pub fn new(spec: PuzzleSpec) -> Result<Self, PuzzleError> {
        let puzzle = Self::from_spec(spec);
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Build without validation. Only for definitions checked by tests.
    pub(crate) fn from_spec(spec: PuzzleSpec) -> Self {
        Self {
            id: spec.id,
            number: spec.number,
            title: spec.title.to_string(),
            description: spec.description.to_string(),
            difficulty: spec.difficulty,
            elements: spec.elements,
            is_solved: false,
            hints: spec.hints.iter().map(|h| h.to_string()).collect(),
            required_fish: spec.required_fish.to_vec(),
            max_moves: spec.max_moves,
            current_moves: 0,
            temperature: spec.temperature,
            is_daily: false,
            date: None,
        }
    }

    /// Check construction invariants (also useful after deserializing)
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.max_moves == 0 {
            return Err(PuzzleError::InvalidMaxMoves(self.max_moves));
        }
        if !self.temperature.is_finite() {
            return Err(PuzzleError::InvalidTemperature(self.temperature));
        }
        let mut seen = HashSet::with_capacity(self.elements.len());
        for el in &self.elements {
            if !seen.insert(el.id) {
                return Err(PuzzleError::DuplicateElementId(el.id));
            }
            if !el.kind.accepts(el.state) {
                return Err(PuzzleError::InvalidElementState {
                    id: el.id,
                    kind: el.kind,
                    state: el.state,
                });
            }
        }
        Ok(())
    }

    pub fn element(&self, id: u32) -> Option<&PuzzleElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub(crate) fn element_index(&self, id: u32) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Elements of one kind, in board order
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &PuzzleElement> {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    /// Copy with progress cleared, ready for a fresh session
    pub fn fresh_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.current_moves = 0;
        copy.is_solved = false;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(elements: Vec<PuzzleElement>) -> PuzzleSpec {
        PuzzleSpec {
            id: 1,
            number: 1,
            title: "Test",
            description: "Test puzzle",
            difficulty: Difficulty::Easy,
            elements,
            hints: &["one"],
            required_fish: &[FishType::IceBreaker],
            max_moves: 10,
            temperature: -2.0,
        }
    }

    #[test]
    fn test_new_puzzle_starts_fresh() {
        let puzzle = Puzzle::new(spec(vec![PuzzleElement::new(
            1,
            0.0,
            0.0,
            ElementKind::Goal,
            ElementState::Inactive,
        )]))
        .unwrap();
        assert!(!puzzle.is_solved);
        assert!(!puzzle.is_daily);
        assert_eq!(puzzle.current_moves, 0);
        assert_eq!(puzzle.hints, vec!["one".to_string()]);
    }

    #[test]
    fn test_rejects_zero_max_moves() {
        let mut s = spec(vec![]);
        s.max_moves = 0;
        assert_eq!(Puzzle::new(s), Err(PuzzleError::InvalidMaxMoves(0)));
    }

    #[test]
    fn test_rejects_nan_temperature() {
        let mut s = spec(vec![]);
        s.temperature = f32::NAN;
        assert!(matches!(
            Puzzle::new(s),
            Err(PuzzleError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let s = spec(vec![
            PuzzleElement::new(1, 0.0, 0.0, ElementKind::Fish, ElementState::Active),
            PuzzleElement::new(1, 10.0, 0.0, ElementKind::Goal, ElementState::Inactive),
        ]);
        assert_eq!(Puzzle::new(s), Err(PuzzleError::DuplicateElementId(1)));
    }

    #[test]
    fn test_rejects_state_foreign_to_kind() {
        let s = spec(vec![PuzzleElement::new(
            3,
            0.0,
            0.0,
            ElementKind::Fish,
            ElementState::Frozen,
        )]);
        assert!(matches!(
            Puzzle::new(s),
            Err(PuzzleError::InvalidElementState { id: 3, .. })
        ));
    }

    #[test]
    fn test_default_states_are_accepted() {
        for kind in [
            ElementKind::IceBlock,
            ElementKind::Fish,
            ElementKind::Mechanism,
            ElementKind::Current,
            ElementKind::Goal,
        ] {
            assert!(kind.accepts(kind.default_state()), "{kind:?}");
        }
    }
}
