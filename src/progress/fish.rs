//! Fish collection

use serde::{Deserialize, Serialize};

use super::user::STARTER_FISH_ID;
use crate::sim::FishType;

/// A collectible fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub id: u32,
    pub kind: FishType,
    pub name: String,
    pub is_unlocked: bool,
    /// Puzzles solved needed to unlock
    pub unlock_requirement: u32,
}

impl Fish {
    pub fn new(id: u32, kind: FishType, name: &str, unlock_requirement: u32) -> Self {
        Self {
            id,
            kind,
            name: name.to_string(),
            is_unlocked: unlock_requirement == 0,
            unlock_requirement,
        }
    }
}

/// Starting roster: the Ice Breaker is free, the rest unlock with progress
pub fn default_fish() -> Vec<Fish> {
    vec![
        Fish::new(STARTER_FISH_ID, FishType::IceBreaker, "Frosty", 0),
        Fish::new(2, FishType::CurrentGuide, "Current", 2),
        Fish::new(3, FishType::MechanismTrigger, "Trigger", 5),
        Fish::new(4, FishType::Freezer, "Chiller", 10),
        Fish::new(5, FishType::Heater, "Warm", 15),
    ]
}
