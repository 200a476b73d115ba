//! Player progression: profile, fish roster, achievements and leaderboard

pub mod fish;
pub mod leaderboard;
pub mod tracker;
pub mod user;

pub use fish::{Fish, default_fish};
pub use leaderboard::{ALL_COUNTRIES, LOCAL_COUNTRY, Leaderboard, LeaderboardEntry};
pub use tracker::{ProgressEvent, ProgressionTracker};
pub use user::{
    Achievement, AchievementId, ProfileError, STARTER_FISH_ID, User, default_achievements,
};
