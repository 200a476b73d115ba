//! Leaderboard
//!
//! Rival entries are synthesized locally with random jitter, so two boards
//! built from the same player record generally differ. Pass a seeded RNG to
//! get a repeatable board in tests.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::user::User;

/// Filter value matching every country
pub const ALL_COUNTRIES: &str = "All";
/// Country shown for the local player
pub const LOCAL_COUNTRY: &str = "You";

const RIVALS: [(&str, &str); 10] = [
    ("ArcticAce", "USA"),
    ("IcyPhantom", "Canada"),
    ("FrozenKing", "Norway"),
    ("ColdWave", "Sweden"),
    ("GlacierPro", "Finland"),
    ("FrostMaster", "Iceland"),
    ("IceBlade", "Russia"),
    ("PolarStar", "Japan"),
    ("SnowDrift", "UK"),
    ("ChillSeeker", "Germany"),
];

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u64,
    /// 1-indexed
    pub rank: usize,
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Build a fresh board of rivals, slotting the player in once they have
    /// scored anything
    pub fn generate(user: &User, rng: &mut impl Rng) -> Self {
        let mut entries: Vec<LeaderboardEntry> = RIVALS
            .iter()
            .enumerate()
            .map(|(i, (name, country))| LeaderboardEntry {
                username: name.to_string(),
                score: 10_000 - (i as u64 * 500) + rng.random_range(0..400),
                rank: i + 1,
                country: country.to_string(),
            })
            .collect();

        if user.total_score > 0 {
            entries.push(LeaderboardEntry {
                username: user.username.clone(),
                score: user.total_score,
                rank: entries.len() + 1,
                country: LOCAL_COUNTRY.to_string(),
            });
            // Stable sort keeps rivals ahead of the player on ties
            entries.sort_by(|a, b| b.score.cmp(&a.score));
            rerank(&mut entries);
        }

        Self { entries }
    }

    /// Rank of the first entry named `username`
    pub fn rank_of(&self, username: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.username == username)
            .map(|e| e.rank)
    }

    /// Entries from one country, re-ranked from 1. [`ALL_COUNTRIES`] returns
    /// the board unchanged.
    pub fn filter_by_country(&self, country: &str) -> Vec<LeaderboardEntry> {
        if country == ALL_COUNTRIES {
            return self.entries.clone();
        }
        let mut filtered: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.country == country)
            .cloned()
            .collect();
        rerank(&mut filtered);
        filtered
    }

    /// Distinct countries plus [`ALL_COUNTRIES`], sorted
    pub fn countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self.entries.iter().map(|e| e.country.clone()).collect();
        countries.push(ALL_COUNTRIES.to_string());
        countries.sort();
        countries.dedup();
        countries
    }
}

fn rerank(entries: &mut [LeaderboardEntry]) {
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_rivals_only_for_new_player() {
        let board = Leaderboard::generate(&User::default(), &mut rng());
        assert_eq!(board.entries.len(), 10);
        for (i, e) in board.entries.iter().enumerate() {
            assert_eq!(e.rank, i + 1);
            let floor = 10_000 - i as u64 * 500;
            assert!(e.score >= floor && e.score < floor + 400);
        }
        assert_eq!(board.rank_of("Player"), None);
    }

    #[test]
    fn test_player_is_slotted_by_score() {
        let mut user = User::default();
        user.username = "Pingu".to_string();
        user.total_score = 8_450;

        let board = Leaderboard::generate(&user, &mut rng());
        assert_eq!(board.entries.len(), 11);
        // Rivals 0..=3 have at least 8500, rival 4 at most 7999
        assert_eq!(board.rank_of("Pingu"), Some(5));
        assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
        for (i, e) in board.entries.iter().enumerate() {
            assert_eq!(e.rank, i + 1);
        }
    }

    #[test]
    fn test_filter_by_country_reranks() {
        let mut user = User::default();
        user.total_score = 1;
        let board = Leaderboard::generate(&user, &mut rng());

        let mine = board.filter_by_country(LOCAL_COUNTRY);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].rank, 1);
        assert_eq!(board.filter_by_country(ALL_COUNTRIES).len(), 11);
        assert!(board.filter_by_country("Atlantis").is_empty());
    }

    #[test]
    fn test_countries_sorted_with_all() {
        let board = Leaderboard::generate(&User::default(), &mut rng());
        let countries = board.countries();
        assert_eq!(countries.len(), 11);
        assert!(countries.contains(&ALL_COUNTRIES.to_string()));
        assert!(countries.windows(2).all(|w| w[0] < w[1]));
    }
}
