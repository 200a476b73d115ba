//! Player profile and achievements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{STARTING_COINS, STARTING_HINTS};

/// Roster id of the fish every new player owns
pub const STARTER_FISH_ID: u32 = 1;

/// Every achievement in the game. Each maps to one fixed predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    FirstFreeze,
    IceNovice,
    FrozenExplorer,
    ArcticMaster,
    StreakStarter,
    DedicatedDiver,
    SpeedSwimmer,
    CoinCollector,
}

impl AchievementId {
    /// Evaluation order
    pub const ALL: [AchievementId; 8] = [
        AchievementId::FirstFreeze,
        AchievementId::IceNovice,
        AchievementId::FrozenExplorer,
        AchievementId::ArcticMaster,
        AchievementId::StreakStarter,
        AchievementId::DedicatedDiver,
        AchievementId::SpeedSwimmer,
        AchievementId::CoinCollector,
    ];

    /// Whether the player's stats satisfy this achievement
    pub fn is_met(&self, user: &User) -> bool {
        match self {
            AchievementId::FirstFreeze => user.puzzles_solved >= 1,
            AchievementId::IceNovice => user.puzzles_solved >= 5,
            AchievementId::FrozenExplorer => user.puzzles_solved >= 10,
            AchievementId::ArcticMaster => user.puzzles_solved >= 25,
            AchievementId::StreakStarter => user.daily_streak >= 3,
            AchievementId::DedicatedDiver => user.daily_streak >= 7,
            AchievementId::SpeedSwimmer => user.best_time > 0.0 && user.best_time < 120.0,
            AchievementId::CoinCollector => user.coins >= 500,
        }
    }

    /// Fresh, locked achievement record
    pub fn definition(&self) -> Achievement {
        let (title, description, icon, requirement, reward_coins) = match self {
            AchievementId::FirstFreeze => {
                ("First Freeze", "Complete your first puzzle", "snowflake", 1, 50)
            }
            AchievementId::IceNovice => ("Ice Novice", "Complete 5 puzzles", "star.fill", 5, 100),
            AchievementId::FrozenExplorer => {
                ("Frozen Explorer", "Complete 10 puzzles", "star.circle.fill", 10, 200)
            }
            AchievementId::ArcticMaster => {
                ("Arctic Master", "Complete 25 puzzles", "crown.fill", 25, 500)
            }
            AchievementId::StreakStarter => {
                ("Streak Starter", "Maintain a 3-day streak", "flame.fill", 3, 100)
            }
            AchievementId::DedicatedDiver => (
                "Dedicated Diver",
                "Maintain a 7-day streak",
                "flame.circle.fill",
                7,
                300,
            ),
            AchievementId::SpeedSwimmer => (
                "Speed Swimmer",
                "Complete a puzzle in under 2 minutes",
                "hare.fill",
                1,
                150,
            ),
            AchievementId::CoinCollector => (
                "Coin Collector",
                "Accumulate 500 coins",
                "bitcoinsign.circle.fill",
                500,
                200,
            ),
        };
        Achievement {
            id: *self,
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            is_unlocked: false,
            requirement,
            reward_coins,
        }
    }
}

/// One-way unlockable milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub is_unlocked: bool,
    /// Threshold shown to the player
    pub requirement: u32,
    pub reward_coins: u32,
}

/// The full achievement list, all locked
pub fn default_achievements() -> Vec<Achievement> {
    AchievementId::ALL.iter().map(|id| id.definition()).collect()
}

/// Persistent player record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub username: String,
    pub coins: u32,
    /// Never decreases except on a full progress reset
    pub puzzles_solved: u32,
    pub daily_streak: u32,
    pub last_played_date: Option<NaiveDate>,
    /// Never decreases except on a full progress reset
    pub total_score: u64,
    /// Ids of unlocked fish, in unlock order, no duplicates
    pub unlocked_fish: Vec<u32>,
    pub achievements: Vec<Achievement>,
    pub selected_avatar: String,
    pub selected_theme: String,
    /// Fastest completion in seconds; 0 means none yet
    pub best_time: f64,
    /// Hint inventory
    pub hints_available: u32,
}

impl Default for User {
    fn default() -> Self {
        Self {
            username: "Player".to_string(),
            coins: STARTING_COINS,
            puzzles_solved: 0,
            daily_streak: 0,
            last_played_date: None,
            total_score: 0,
            unlocked_fish: vec![STARTER_FISH_ID],
            achievements: Vec::new(),
            selected_avatar: "default".to_string(),
            selected_theme: "arctic".to_string(),
            best_time: 0.0,
            hints_available: STARTING_HINTS,
        }
    }
}

impl User {
    pub fn achievement(&self, id: AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn has_unlocked(&self, id: AchievementId) -> bool {
        self.achievement(id).is_some_and(|a| a.is_unlocked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("username must be 3-20 characters long")]
    InvalidUsername,
    #[error("unknown avatar {0:?}")]
    UnknownAvatar(String),
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
}

/// Keep only letters, digits, `_` and `-`
pub fn sanitize_username(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// 3 to 20 characters after trimming
pub fn is_valid_username(name: &str) -> bool {
    let len = name.trim().chars().count();
    (3..=20).contains(&len)
}
