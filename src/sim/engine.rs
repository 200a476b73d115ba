//! Puzzle interaction rules
//!
//! A [`PuzzleEngine`] owns one live puzzle. Every player action bumps the move
//! counter and re-checks the win condition; once the puzzle is completed all
//! further actions are ignored until [`PuzzleEngine::reset`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{Difficulty, ElementKind, ElementState, Puzzle};
use super::timer::PuzzleTimer;
use crate::consts::*;

/// Puzzle-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzlePhase {
    InProgress,
    /// Terminal until reset
    Completed,
}

/// Emitted exactly once when the win condition first holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleCompleted {
    pub puzzle_id: u32,
    pub difficulty: Difficulty,
    pub moves: u32,
    pub max_moves: u32,
    pub hints_used: u32,
    pub elapsed_secs: f64,
    pub is_daily: bool,
}

/// Outcome of a player action
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// Puzzle already completed or element unknown; nothing changed
    Ignored,
    /// Board changed, puzzle still in progress
    Applied,
    /// Board changed and the puzzle is now solved
    Completed(PuzzleCompleted),
}

/// Where hints are paid from. Implemented by the progression tracker.
pub trait HintWallet {
    /// Consume one hint from the inventory
    fn use_hint(&mut self) -> bool;
    /// Pay `amount` coins
    fn spend_coins(&mut self, amount: u32) -> bool;
}

/// How a hint was paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintPayment {
    Inventory,
    Coins(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HintError {
    #[error("puzzle is already completed")]
    PuzzleCompleted,
    #[error("every hint for this puzzle has been revealed")]
    NoHintsLeft,
    #[error("no hints in inventory and not enough coins (need {cost})")]
    InsufficientFunds { cost: u32 },
}

/// Live state of one puzzle session
#[derive(Debug, Clone)]
pub struct PuzzleEngine {
    puzzle: Puzzle,
    hints_used: u32,
    hints_revealed: usize,
    timer: PuzzleTimer,
}

impl PuzzleEngine {
    /// Take ownership of a puzzle and start the clock
    pub fn new(puzzle: Puzzle) -> Self {
        let mut timer = PuzzleTimer::new();
        if !puzzle.is_solved {
            timer.start();
        }
        Self {
            puzzle,
            hints_used: 0,
            hints_revealed: 0,
            timer,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn into_puzzle(self) -> Puzzle {
        self.puzzle
    }

    pub fn phase(&self) -> PuzzlePhase {
        if self.puzzle.is_solved {
            PuzzlePhase::Completed
        } else {
            PuzzlePhase::InProgress
        }
    }

    pub fn is_completed(&self) -> bool {
        self.puzzle.is_solved
    }

    pub fn moves(&self) -> u32 {
        self.puzzle.current_moves
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn timer(&self) -> &PuzzleTimer {
        &self.timer
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.timer.elapsed()
    }

    /// Advance the elapsed-time display. Board state is untouched.
    pub fn tick(&mut self, dt: f64) {
        self.timer.tick(dt);
    }

    /// Tap an element
    pub fn activate_element(&mut self, id: u32) -> ActionResult {
        if self.puzzle.is_solved {
            return ActionResult::Ignored;
        }
        let Some(index) = self.puzzle.element_index(id) else {
            return ActionResult::Ignored;
        };

        match self.puzzle.elements[index].kind {
            ElementKind::Fish => self.activate_fish(index),
            ElementKind::Mechanism => {
                let el = &mut self.puzzle.elements[index];
                el.state = if el.state == ElementState::Active {
                    ElementState::Inactive
                } else {
                    ElementState::Active
                };
            }
            ElementKind::IceBlock => {
                // Direct taps follow the water temperature, not the fish
                self.puzzle.elements[index].state = if self.puzzle.temperature < 0.0 {
                    ElementState::Frozen
                } else {
                    ElementState::Melted
                };
            }
            ElementKind::Current => {
                self.puzzle.elements[index].state = ElementState::Active;
            }
            ElementKind::Goal => {}
        }

        self.finish_action()
    }

    /// Drag an element to a new position. Clamping is left to the host.
    pub fn move_element(&mut self, id: u32, pos: Vec2) -> ActionResult {
        if self.puzzle.is_solved {
            return ActionResult::Ignored;
        }
        let Some(index) = self.puzzle.element_index(id) else {
            return ActionResult::Ignored;
        };
        self.puzzle.elements[index].pos = pos;
        self.finish_action()
    }

    /// Any fish melts nearby frozen ice and forces nearby mechanisms on.
    /// The fish type is not consulted.
    fn activate_fish(&mut self, index: usize) {
        self.puzzle.elements[index].state = ElementState::Active;
        let fish_pos = self.puzzle.elements[index].pos;

        for (i, el) in self.puzzle.elements.iter_mut().enumerate() {
            if i == index || el.pos.distance(fish_pos) >= FISH_EFFECT_RADIUS {
                continue;
            }
            match el.kind {
                ElementKind::IceBlock if el.state == ElementState::Frozen => {
                    el.state = ElementState::Melted;
                }
                ElementKind::Mechanism => el.state = ElementState::Active,
                _ => {}
            }
        }
    }

    fn finish_action(&mut self) -> ActionResult {
        self.puzzle.current_moves += 1;
        match self.evaluate_win() {
            Some(event) => ActionResult::Completed(event),
            None => ActionResult::Applied,
        }
    }

    /// Every goal has an active fish within reach
    pub fn win_condition_met(&self) -> bool {
        let mut goals = self.puzzle.elements_of(ElementKind::Goal).peekable();
        if goals.peek().is_none() {
            return false;
        }
        goals.all(|goal| {
            self.puzzle.elements_of(ElementKind::Fish).any(|fish| {
                fish.state == ElementState::Active
                    && fish.pos.distance(goal.pos) < GOAL_REACH_RADIUS
            })
        })
    }

    /// Transition to completed if the win condition holds. Idempotent.
    pub fn evaluate_win(&mut self) -> Option<PuzzleCompleted> {
        if self.puzzle.is_solved || !self.win_condition_met() {
            return None;
        }

        self.puzzle.is_solved = true;
        self.timer.stop();

        let event = PuzzleCompleted {
            puzzle_id: self.puzzle.id,
            difficulty: self.puzzle.difficulty,
            moves: self.puzzle.current_moves,
            max_moves: self.puzzle.max_moves,
            hints_used: self.hints_used,
            elapsed_secs: self.timer.elapsed(),
            is_daily: self.puzzle.is_daily,
        };
        log::info!(
            "Puzzle {} solved in {} moves ({})",
            self.puzzle.id,
            event.moves,
            self.timer.formatted()
        );
        Some(event)
    }

    /// Reveal the next hint, paying from the inventory first and coins second.
    /// Nothing changes on failure.
    pub fn request_hint(
        &mut self,
        wallet: &mut impl HintWallet,
    ) -> Result<(&str, HintPayment), HintError> {
        if self.puzzle.is_solved {
            return Err(HintError::PuzzleCompleted);
        }
        if self.hints_revealed >= self.puzzle.hints.len() {
            return Err(HintError::NoHintsLeft);
        }

        let payment = if wallet.use_hint() {
            HintPayment::Inventory
        } else if wallet.spend_coins(HINT_COST_COINS) {
            HintPayment::Coins(HINT_COST_COINS)
        } else {
            return Err(HintError::InsufficientFunds {
                cost: HINT_COST_COINS,
            });
        };

        let hint = &self.puzzle.hints[self.hints_revealed];
        self.hints_revealed += 1;
        self.hints_used += 1;
        log::debug!("Hint {} revealed via {:?}", self.hints_revealed, payment);
        Ok((hint.as_str(), payment))
    }

    /// Hints revealed so far, oldest first
    pub fn revealed_hints(&self) -> &[String] {
        &self.puzzle.hints[..self.hints_revealed]
    }

    /// Most recently revealed hint
    pub fn current_hint(&self) -> Option<&str> {
        self.revealed_hints().last().map(String::as_str)
    }

    /// Start over: counters and timer cleared, every element back to the
    /// default state for its kind. Positions are kept.
    pub fn reset(&mut self) {
        self.puzzle.current_moves = 0;
        self.puzzle.is_solved = false;
        self.hints_used = 0;
        self.hints_revealed = 0;
        self.timer.reset();
        self.timer.start();

        for el in &mut self.puzzle.elements {
            el.state = el.kind.default_state();
        }
    }
}
