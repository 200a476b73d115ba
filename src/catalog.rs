//! Canonical puzzle set and daily puzzle selection
//!
//! The ten catalog puzzles are fixed; their order and numbers (1..=10) are
//! stable identifiers. The daily puzzle is a pure function of the date.

use chrono::{Datelike, NaiveDate};

use crate::consts::DAILY_TITLE;
use crate::sim::ElementKind::{Current, Fish as FishEl, Goal, IceBlock, Mechanism};
use crate::sim::ElementState::{Active, Frozen, Inactive, Melted};
use crate::sim::{Difficulty, ElementKind, ElementState, FishType, Puzzle, PuzzleElement, PuzzleSpec};

/// Number of canonical puzzles
pub const CATALOG_SIZE: usize = 10;

/// Lay out elements with ids 1..=n in the given order
fn board(layout: &[(f32, f32, ElementKind, ElementState)]) -> Vec<PuzzleElement> {
    layout
        .iter()
        .zip(1u32..)
        .map(|(&(x, y, kind, state), id)| PuzzleElement::new(id, x, y, kind, state))
        .collect()
}

fn canonical_puzzles() -> Vec<Puzzle> {
    let specs = [
        PuzzleSpec {
            id: 1,
            number: 1,
            title: "First Freeze",
            description: "Guide the fish to break through the ice and reach the goal.",
            difficulty: Difficulty::Easy,
            elements: board(&[
                (100.0, 100.0, IceBlock, Frozen),
                (200.0, 100.0, FishEl, Active),
                (300.0, 100.0, Goal, Inactive),
            ]),
            hints: &[
                "Use the Ice Breaker fish to clear the path",
                "Tap the fish to move it",
                "Ice blocks need to be broken",
            ],
            required_fish: &[FishType::IceBreaker],
            max_moves: 10,
            temperature: -2.0,
        },
        PuzzleSpec {
            id: 2,
            number: 2,
            title: "Current Flow",
            description: "Direct the water current to move ice blocks and clear the path.",
            difficulty: Difficulty::Easy,
            elements: board(&[
                (50.0, 150.0, Current, Active),
                (150.0, 150.0, IceBlock, Frozen),
                (250.0, 150.0, FishEl, Active),
                (350.0, 150.0, Goal, Inactive),
            ]),
            hints: &[
                "Use Current Guide fish to redirect water flow",
                "Water currents can move ice blocks",
                "Plan your moves carefully",
            ],
            required_fish: &[FishType::CurrentGuide],
            max_moves: 15,
            temperature: -3.0,
        },
        PuzzleSpec {
            id: 3,
            number: 3,
            title: "Mechanism Maze",
            description: "Activate mechanisms to open new paths through the frozen waters.",
            difficulty: Difficulty::Medium,
            elements: board(&[
                (100.0, 100.0, Mechanism, Inactive),
                (200.0, 100.0, FishEl, Active),
                (100.0, 200.0, IceBlock, Frozen),
                (300.0, 200.0, Goal, Inactive),
            ]),
            hints: &[
                "Mechanism Trigger fish can activate switches",
                "Some mechanisms open ice barriers",
                "Timing is important",
            ],
            required_fish: &[FishType::MechanismTrigger],
            max_moves: 20,
            temperature: -4.0,
        },
        PuzzleSpec {
            id: 4,
            number: 4,
            title: "Temperature Control",
            description: "Use Freezer and Heater fish to control ice states.",
            difficulty: Difficulty::Medium,
            elements: board(&[
                (80.0, 120.0, FishEl, Active),
                (180.0, 120.0, IceBlock, Melted),
                (280.0, 120.0, FishEl, Active),
                (180.0, 220.0, Goal, Inactive),
            ]),
            hints: &[
                "Freezer fish can create ice bridges",
                "Heater fish can melt obstacles",
                "Temperature affects all nearby ice",
            ],
            required_fish: &[FishType::Freezer, FishType::Heater],
            max_moves: 25,
            temperature: 0.0,
        },
        PuzzleSpec {
            id: 5,
            number: 5,
            title: "Complex Currents",
            description: "Navigate multiple currents and mechanisms in this challenging puzzle.",
            difficulty: Difficulty::Hard,
            elements: board(&[
                (100.0, 80.0, IceBlock, Frozen),
                (200.0, 80.0, Current, Active),
                (100.0, 180.0, FishEl, Active),
                (300.0, 180.0, Mechanism, Inactive),
                (200.0, 280.0, Goal, Inactive),
            ]),
            hints: &[
                "Combine multiple fish abilities",
                "Order of actions matters",
                "Use currents to your advantage",
                "Break ice before activating mechanisms",
            ],
            required_fish: &[
                FishType::IceBreaker,
                FishType::CurrentGuide,
                FishType::MechanismTrigger,
            ],
            max_moves: 30,
            temperature: -5.0,
        },
        PuzzleSpec {
            id: 6,
            number: 6,
            title: "Ice Fortress",
            description: "Break through the ice fortress using strategic planning.",
            difficulty: Difficulty::Hard,
            elements: board(&[
                (150.0, 100.0, IceBlock, Frozen),
                (250.0, 100.0, IceBlock, Frozen),
                (200.0, 150.0, FishEl, Active),
                (150.0, 200.0, Mechanism, Inactive),
                (250.0, 200.0, Goal, Inactive),
            ]),
            hints: &[
                "Multiple ice layers require careful breaking",
                "Save moves by planning ahead",
                "Some ice blocks protect mechanisms",
            ],
            required_fish: &[FishType::IceBreaker, FishType::MechanismTrigger],
            max_moves: 35,
            temperature: -6.0,
        },
        PuzzleSpec {
            id: 7,
            number: 7,
            title: "Thermal Bridges",
            description: "Create ice bridges by freezing water at the right temperature.",
            difficulty: Difficulty::Expert,
            elements: board(&[
                (100.0, 100.0, Current, Active),
                (200.0, 100.0, FishEl, Active),
                (300.0, 100.0, Current, Active),
                (150.0, 200.0, IceBlock, Melted),
                (250.0, 200.0, IceBlock, Melted),
                (200.0, 300.0, Goal, Inactive),
            ]),
            hints: &[
                "Freeze water to create paths",
                "Water currents can carry fish",
                "Temperature must be below zero to freeze",
                "Plan bridge placement carefully",
            ],
            required_fish: &[FishType::Freezer, FishType::CurrentGuide],
            max_moves: 40,
            temperature: 1.0,
        },
        PuzzleSpec {
            id: 8,
            number: 8,
            title: "Synchronized Swim",
            description: "Coordinate multiple fish to solve this complex puzzle.",
            difficulty: Difficulty::Expert,
            elements: board(&[
                (120.0, 120.0, Mechanism, Inactive),
                (220.0, 120.0, IceBlock, Frozen),
                (320.0, 120.0, Mechanism, Inactive),
                (170.0, 220.0, FishEl, Active),
                (270.0, 220.0, FishEl, Active),
                (220.0, 320.0, Goal, Inactive),
            ]),
            hints: &[
                "Both fish must work together",
                "Mechanisms need simultaneous activation",
                "Break ice between mechanisms",
                "Coordinate movements precisely",
            ],
            required_fish: &[FishType::MechanismTrigger, FishType::IceBreaker],
            max_moves: 45,
            temperature: -7.0,
        },
        PuzzleSpec {
            id: 9,
            number: 9,
            title: "Arctic Master",
            description: "Use all your skills to conquer this ultimate frozen challenge.",
            difficulty: Difficulty::Expert,
            elements: board(&[
                (100.0, 100.0, IceBlock, Frozen),
                (200.0, 100.0, Current, Active),
                (300.0, 100.0, IceBlock, Frozen),
                (150.0, 200.0, FishEl, Active),
                (250.0, 200.0, Mechanism, Inactive),
                (100.0, 300.0, IceBlock, Melted),
                (300.0, 300.0, Goal, Inactive),
            ]),
            hints: &[
                "All fish types may be needed",
                "Study the layout before starting",
                "Temperature changes affect strategy",
                "Multiple solutions may exist",
                "Efficiency earns bonus points",
            ],
            required_fish: &FishType::ALL,
            max_moves: 50,
            temperature: -8.0,
        },
        PuzzleSpec {
            id: 10,
            number: 10,
            title: "Deep Freeze",
            description: "Navigate the deepest, coldest waters in this final challenge.",
            difficulty: Difficulty::Expert,
            elements: board(&[
                (150.0, 100.0, Current, Active),
                (250.0, 100.0, Mechanism, Inactive),
                (100.0, 200.0, IceBlock, Frozen),
                (200.0, 200.0, FishEl, Active),
                (300.0, 200.0, IceBlock, Frozen),
                (150.0, 300.0, IceBlock, Melted),
                (250.0, 300.0, Goal, Inactive),
            ]),
            hints: &[
                "Extreme cold affects all mechanics",
                "Ice is harder to break at low temperatures",
                "Use heater fish strategically",
                "Currents freeze faster",
                "Master timing and positioning",
            ],
            required_fish: &[
                FishType::IceBreaker,
                FishType::Heater,
                FishType::CurrentGuide,
                FishType::MechanismTrigger,
            ],
            max_moves: 55,
            temperature: -10.0,
        },
    ];

    specs.into_iter().map(Puzzle::from_spec).collect()
}

/// Catalog index of the daily puzzle for `date`
pub fn daily_index(date: NaiveDate) -> usize {
    date.ordinal() as usize % CATALOG_SIZE
}

/// The fixed puzzle set plus the player's last recorded progress on each
#[derive(Debug, Clone)]
pub struct PuzzleCatalog {
    puzzles: Vec<Puzzle>,
}

impl Default for PuzzleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleCatalog {
    pub fn new() -> Self {
        Self {
            puzzles: canonical_puzzles(),
        }
    }

    /// All puzzles in catalog order
    pub fn list_puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    pub fn get(&self, id: u32) -> Option<&Puzzle> {
        self.puzzles.iter().find(|p| p.id == id)
    }

    pub fn by_number(&self, number: u32) -> Option<&Puzzle> {
        self.puzzles.iter().find(|p| p.number == number)
    }

    /// Date-keyed copy of a catalog puzzle with progress cleared.
    /// The catalog entry itself is never touched.
    pub fn daily_puzzle(&self, date: NaiveDate) -> Puzzle {
        let template = &self.puzzles[daily_index(date)];
        Puzzle {
            number: 0,
            title: DAILY_TITLE.to_string(),
            difficulty: Difficulty::Medium,
            is_daily: true,
            date: Some(date),
            ..template.fresh_copy()
        }
    }

    /// Remember the outcome of a regular (non-daily) session
    pub fn record_progress(&mut self, id: u32, moves: u32, solved: bool) {
        if let Some(puzzle) = self.puzzles.iter_mut().find(|p| p.id == id) {
            puzzle.current_moves = moves;
            puzzle.is_solved = solved;
            log::debug!("Recorded progress for puzzle {}: {} moves, solved={}", id, moves, solved);
        }
    }

    /// Number of catalog puzzles marked solved
    pub fn solved_count(&self) -> usize {
        self.puzzles.iter().filter(|p| p.is_solved).count()
    }
}
