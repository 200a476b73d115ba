//! FrostFin - An under-ice puzzle game
//!
//! Core modules:
//! - `sim`: Puzzle board rules, win detection, scoring (pure and deterministic)
//! - `catalog`: Canonical puzzles and date-keyed daily puzzle selection
//! - `progress`: User progression, achievements, fish roster, leaderboard
//! - `persistence`: Key/blob storage gateway with native and browser backends
//! - `settings`: Player preferences
//! - `game`: Wires catalog, engine and progression together for a host

pub mod catalog;
pub mod game;
pub mod persistence;
pub mod progress;
pub mod settings;
pub mod sim;

pub use catalog::PuzzleCatalog;
pub use game::Game;
pub use progress::ProgressionTracker;
pub use settings::AppSettings;

/// Game configuration constants
pub mod consts {
    /// Bonus coins for finishing the daily puzzle
    pub const DAILY_BONUS_COINS: u32 = 50;
    /// Coins charged for a hint when the hint inventory is empty
    pub const HINT_COST_COINS: u32 = 25;

    /// New player defaults
    pub const STARTING_COINS: u32 = 100;
    pub const STARTING_HINTS: u32 = 3;

    /// Nominal board extent (both axes), in board units
    pub const BOARD_SIZE: f32 = 400.0;
    /// Radius within which an activated fish melts ice and triggers mechanisms
    pub const FISH_EFFECT_RADIUS: f32 = 100.0;
    /// An active fish closer than this to a goal reaches it
    pub const GOAL_REACH_RADIUS: f32 = 50.0;

    /// Elapsed-time display refresh period (seconds)
    pub const TIMER_TICK_SECS: f64 = 0.1;

    /// Title given to every daily puzzle
    pub const DAILY_TITLE: &str = "Daily Ice Challenge";
}

/// Format seconds as `mm:ss`
pub fn format_time(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a temperature as `-2.0°C`
pub fn format_temperature(celsius: f32) -> String {
    format!("{:.1}°C", celsius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(59.9), "00:59");
        assert_eq!(format_time(125.0), "02:05");
        assert_eq!(format_time(-3.0), "00:00");
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(-2.0), "-2.0°C");
        assert_eq!(format_temperature(1.5), "1.5°C");
    }
}
