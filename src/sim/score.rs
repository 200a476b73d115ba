//! Puzzle scoring
//!
//! One canonical rule: the score feeds `total_score`, and the coin award on
//! completion is a flat tenth of the difficulty base.

use super::state::Difficulty;

/// Score parts for a finished puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub base: u32,
    /// 50% of base at ≤ half the move budget, 25% at ≤ three quarters
    pub efficiency_bonus: u32,
    pub time_bonus: u32,
    /// 10% of base per hint, uncapped
    pub hint_penalty: u32,
    /// `max(0, base + bonuses - penalty)`
    pub total: u32,
}

/// Points for clearing a puzzle of this difficulty before bonuses
pub fn base_score(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 100,
        Difficulty::Medium => 200,
        Difficulty::Hard => 400,
        Difficulty::Expert => 800,
    }
}

/// Coins awarded for completing any puzzle of this difficulty
pub fn completion_coins(difficulty: Difficulty) -> u32 {
    base_score(difficulty) / 10
}

fn efficiency_bonus(base: u32, moves_used: u32, max_moves: u32) -> u32 {
    if max_moves == 0 {
        return 0;
    }
    let ratio = moves_used as f64 / max_moves as f64;
    if ratio <= 0.5 {
        (base as f64 * 0.5) as u32
    } else if ratio <= 0.75 {
        (base as f64 * 0.25) as u32
    } else {
        0
    }
}

fn time_bonus(time_secs: f64) -> u32 {
    if time_secs < 60.0 {
        100
    } else if time_secs < 120.0 {
        50
    } else if time_secs < 300.0 {
        25
    } else {
        0
    }
}

/// Full breakdown of a completion score
pub fn score_breakdown(
    difficulty: Difficulty,
    moves_used: u32,
    max_moves: u32,
    time_secs: f64,
    hints_used: u32,
) -> ScoreBreakdown {
    let base = base_score(difficulty);
    let efficiency_bonus = efficiency_bonus(base, moves_used, max_moves);
    let time_bonus = time_bonus(time_secs);
    let hint_penalty = (base as f64 * 0.1 * hints_used as f64) as u64;

    let gross = base as u64 + efficiency_bonus as u64 + time_bonus as u64;
    let total = gross.saturating_sub(hint_penalty);

    ScoreBreakdown {
        base,
        efficiency_bonus,
        time_bonus,
        hint_penalty: hint_penalty.min(u32::MAX as u64) as u32,
        total: total as u32,
    }
}

/// Score for a completed puzzle, never negative
pub fn puzzle_score(
    difficulty: Difficulty,
    moves_used: u32,
    max_moves: u32,
    time_secs: f64,
    hints_used: u32,
) -> u32 {
    score_breakdown(difficulty, moves_used, max_moves, time_secs, hints_used).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_easy_efficient_fast() {
        // 100 base + 50 efficiency (ratio 0.5) + 100 time
        assert_eq!(puzzle_score(Difficulty::Easy, 5, 10, 50.0, 0), 250);
    }

    #[test]
    fn test_medium_with_hints() {
        // 200 base + 0 efficiency (ratio 0.9) + 25 time - 40 hints
        let b = score_breakdown(Difficulty::Medium, 18, 20, 150.0, 2);
        assert_eq!(b.base, 200);
        assert_eq!(b.efficiency_bonus, 0);
        assert_eq!(b.time_bonus, 25);
        assert_eq!(b.hint_penalty, 40);
        assert_eq!(b.total, 185);
    }

    #[test]
    fn test_efficiency_tiers() {
        assert_eq!(score_breakdown(Difficulty::Hard, 15, 20, 999.0, 0).efficiency_bonus, 100);
        assert_eq!(score_breakdown(Difficulty::Hard, 16, 20, 999.0, 0).efficiency_bonus, 0);
        assert_eq!(score_breakdown(Difficulty::Hard, 10, 20, 999.0, 0).efficiency_bonus, 200);
    }

    #[test]
    fn test_time_tiers() {
        assert_eq!(time_bonus(59.9), 100);
        assert_eq!(time_bonus(60.0), 50);
        assert_eq!(time_bonus(119.9), 50);
        assert_eq!(time_bonus(120.0), 25);
        assert_eq!(time_bonus(299.0), 25);
        assert_eq!(time_bonus(300.0), 0);
    }

    #[test]
    fn test_hint_penalty_clamps_at_zero() {
        // 100 + 0 + 0 - 10 * 20 hints = -100 -> 0
        assert_eq!(puzzle_score(Difficulty::Easy, 10, 10, 400.0, 20), 0);
    }

    #[test]
    fn test_zero_move_budget_gets_no_efficiency() {
        assert_eq!(score_breakdown(Difficulty::Easy, 0, 0, 400.0, 0).total, 100);
    }

    #[test]
    fn test_completion_coins() {
        assert_eq!(completion_coins(Difficulty::Easy), 10);
        assert_eq!(completion_coins(Difficulty::Medium), 20);
        assert_eq!(completion_coins(Difficulty::Hard), 40);
        assert_eq!(completion_coins(Difficulty::Expert), 80);
    }

    proptest! {
        #[test]
        fn prop_more_hints_never_score_higher(
            moves in 0u32..100,
            max_moves in 1u32..100,
            time in 0.0f64..1000.0,
            hints in 0u32..50,
        ) {
            let fewer = puzzle_score(Difficulty::Expert, moves, max_moves, time, hints);
            let more = puzzle_score(Difficulty::Expert, moves, max_moves, time, hints + 1);
            prop_assert!(more <= fewer);
        }
    }
}
