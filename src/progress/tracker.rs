//! Progression tracking
//!
//! [`ProgressionTracker`] owns the player record, settings and fish roster,
//! applies puzzle results to them and writes each affected blob back through
//! the persistence gateway after every logical change. Writes are best effort:
//! a failure is logged and the in-memory state stays authoritative.

use chrono::NaiveDate;
use rand::Rng;

use super::fish::{Fish, default_fish};
use super::leaderboard::Leaderboard;
use super::user::{
    AchievementId, ProfileError, User, default_achievements, is_valid_username, sanitize_username,
};
use crate::consts::DAILY_BONUS_COINS;
use crate::persistence::{
    FISH_KEY, PersistenceGateway, SETTINGS_KEY, USER_KEY, load_or_default, save_json,
};
use crate::settings::{AppSettings, is_known_avatar, is_known_theme};
use crate::sim::{HintWallet, PuzzleCompleted, completion_coins, puzzle_score};

/// Something observable that changed as a result of a tracker call
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    ScoreAwarded { score: u32, coins: u32 },
    NewBestTime(f64),
    AchievementUnlocked { id: AchievementId, reward_coins: u32 },
    FishUnlocked { id: u32 },
    StreakUpdated(u32),
    DailyBonus(u32),
}

/// Owner of all persistent player state
#[derive(Debug)]
pub struct ProgressionTracker<S: PersistenceGateway> {
    user: User,
    settings: AppSettings,
    fish: Vec<Fish>,
    store: S,
}

impl<S: PersistenceGateway> ProgressionTracker<S> {
    /// Load all three blobs, falling back to fresh defaults for any that are
    /// missing or unreadable
    pub fn load(store: S) -> Self {
        let user = load_or_default(&store, USER_KEY, User::default);
        let settings = load_or_default(&store, SETTINGS_KEY, AppSettings::default);
        let fish = load_or_default(&store, FISH_KEY, default_fish);
        let mut tracker = Self {
            user,
            settings,
            fish,
            store,
        };
        tracker.initialize_achievements();
        tracker
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn save_user(&mut self) {
        if let Err(e) = save_json(&mut self.store, USER_KEY, &self.user) {
            log::warn!("Dropping user save: {e}");
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = save_json(&mut self.store, SETTINGS_KEY, &self.settings) {
            log::warn!("Dropping settings save: {e}");
        }
    }

    fn save_fish(&mut self) {
        if let Err(e) = save_json(&mut self.store, FISH_KEY, &self.fish) {
            log::warn!("Dropping fish save: {e}");
        }
    }

    /// Seed the achievement list if the player has none yet
    pub fn initialize_achievements(&mut self) {
        if self.user.achievements.is_empty() {
            self.user.achievements = default_achievements();
            self.save_user();
        }
    }

    // === Coins & hints ===

    pub fn add_coins(&mut self, amount: u32) {
        self.user.coins = self.user.coins.saturating_add(amount);
        self.save_user();
    }

    /// Pay `amount`; false (and nothing spent) when short
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if self.user.coins < amount {
            return false;
        }
        self.user.coins -= amount;
        self.save_user();
        true
    }

    /// Take one hint from the inventory; false when empty
    pub fn use_hint(&mut self) -> bool {
        if self.user.hints_available == 0 {
            return false;
        }
        self.user.hints_available -= 1;
        self.save_user();
        true
    }

    /// Buy `count` hints for `cost` coins
    pub fn buy_hints(&mut self, count: u32, cost: u32) -> bool {
        if !self.spend_coins(cost) {
            return false;
        }
        self.user.hints_available = self.user.hints_available.saturating_add(count);
        self.save_user();
        true
    }

    // === Puzzle results ===

    /// Apply a finished puzzle: counters, score, coins, best time, then
    /// achievements and fish unlocks
    pub fn complete_puzzle(&mut self, result: &PuzzleCompleted) -> Vec<ProgressEvent> {
        let mut events = Vec::new();

        self.user.puzzles_solved = self.user.puzzles_solved.saturating_add(1);

        let score = puzzle_score(
            result.difficulty,
            result.moves,
            result.max_moves,
            result.elapsed_secs,
            result.hints_used,
        );
        let coins = completion_coins(result.difficulty);
        self.user.total_score = self.user.total_score.saturating_add(score as u64);
        self.user.coins = self.user.coins.saturating_add(coins);
        events.push(ProgressEvent::ScoreAwarded { score, coins });

        if self.user.best_time == 0.0 || result.elapsed_secs < self.user.best_time {
            self.user.best_time = result.elapsed_secs;
            events.push(ProgressEvent::NewBestTime(result.elapsed_secs));
        }

        log::info!(
            "Puzzle {} complete: +{} score, +{} coins ({} solved)",
            result.puzzle_id,
            score,
            coins,
            self.user.puzzles_solved
        );

        events.extend(self.evaluate_achievements());
        events.extend(self.evaluate_fish_unlocks());
        self.save_user();
        events
    }

    /// Extra bookkeeping for the daily puzzle, on top of [`Self::complete_puzzle`]
    pub fn complete_daily_puzzle(&mut self, today: NaiveDate) -> Vec<ProgressEvent> {
        let mut events = vec![ProgressEvent::StreakUpdated(self.update_daily_streak(today))];
        self.add_coins(DAILY_BONUS_COINS);
        events.push(ProgressEvent::DailyBonus(DAILY_BONUS_COINS));
        events.extend(self.evaluate_achievements());
        events
    }

    /// Advance, keep or restart the streak based on the last day played.
    /// Returns the new streak.
    pub fn update_daily_streak(&mut self, today: NaiveDate) -> u32 {
        self.user.daily_streak = match self.user.last_played_date {
            None => 1,
            Some(last) => match (today - last).num_days() {
                1 => self.user.daily_streak.saturating_add(1),
                d if d > 1 => 1,
                // Same day (or a clock that went backwards)
                _ => self.user.daily_streak,
            },
        };
        self.user.last_played_date = Some(today);
        log::debug!("Daily streak now {}", self.user.daily_streak);
        self.save_user();
        self.user.daily_streak
    }

    /// Unlock every locked achievement whose predicate now holds. Rewards are
    /// credited immediately, so later predicates see them.
    pub fn evaluate_achievements(&mut self) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        for i in 0..self.user.achievements.len() {
            let achievement = &self.user.achievements[i];
            if achievement.is_unlocked || !achievement.id.is_met(&self.user) {
                continue;
            }
            let (id, reward_coins) = (achievement.id, achievement.reward_coins);
            self.user.achievements[i].is_unlocked = true;
            self.user.coins = self.user.coins.saturating_add(reward_coins);
            log::info!("Achievement unlocked: {:?} (+{} coins)", id, reward_coins);
            events.push(ProgressEvent::AchievementUnlocked { id, reward_coins });
        }
        if !events.is_empty() {
            self.save_user();
        }
        events
    }

    /// Unlock every locked fish the player has solved enough puzzles for
    pub fn evaluate_fish_unlocks(&mut self) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        for fish in &mut self.fish {
            if fish.is_unlocked || self.user.puzzles_solved < fish.unlock_requirement {
                continue;
            }
            fish.is_unlocked = true;
            if !self.user.unlocked_fish.contains(&fish.id) {
                self.user.unlocked_fish.push(fish.id);
            }
            log::info!("Fish unlocked: {} ({})", fish.name, fish.kind.as_str());
            events.push(ProgressEvent::FishUnlocked { id: fish.id });
        }
        if !events.is_empty() {
            self.save_fish();
            self.save_user();
        }
        events
    }

    // === Profile ===

    /// Finish first-run setup: set the name and seed achievements
    pub fn complete_onboarding(&mut self, raw_name: &str) -> Result<(), ProfileError> {
        self.update_username(raw_name)?;
        self.initialize_achievements();
        Ok(())
    }

    pub fn update_username(&mut self, raw_name: &str) -> Result<(), ProfileError> {
        let name = sanitize_username(raw_name);
        if !is_valid_username(&name) {
            return Err(ProfileError::InvalidUsername);
        }
        self.user.username = name;
        self.save_user();
        Ok(())
    }

    pub fn select_avatar(&mut self, avatar: &str) -> Result<(), ProfileError> {
        if !is_known_avatar(avatar) {
            return Err(ProfileError::UnknownAvatar(avatar.to_string()));
        }
        self.user.selected_avatar = avatar.to_string();
        self.save_user();
        Ok(())
    }

    pub fn select_theme(&mut self, theme: &str) -> Result<(), ProfileError> {
        if !is_known_theme(theme) {
            return Err(ProfileError::UnknownTheme(theme.to_string()));
        }
        self.user.selected_theme = theme.to_string();
        self.save_user();
        Ok(())
    }

    /// Wipe the player record back to a new player. Fish and settings stay.
    pub fn reset_progress(&mut self) {
        log::warn!("Resetting progress for {}", self.user.username);
        self.user = User::default();
        self.save_user();
    }

    /// Player record as pretty JSON
    pub fn export_data(&self) -> String {
        serde_json::to_string_pretty(&self.user).unwrap_or_default()
    }

    /// Fresh synthesized leaderboard
    pub fn leaderboard(&self, rng: &mut impl Rng) -> Leaderboard {
        Leaderboard::generate(&self.user, rng)
    }

    // === Settings ===

    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        self.save_settings();
        self.settings.sound_enabled
    }

    pub fn toggle_music(&mut self) -> bool {
        self.settings.music_enabled = !self.settings.music_enabled;
        self.save_settings();
        self.settings.music_enabled
    }

    pub fn toggle_vibration(&mut self) -> bool {
        self.settings.vibration_enabled = !self.settings.vibration_enabled;
        self.save_settings();
        self.settings.vibration_enabled
    }
}

impl<S: PersistenceGateway> HintWallet for ProgressionTracker<S> {
    fn use_hint(&mut self) -> bool {
        ProgressionTracker::use_hint(self)
    }

    fn spend_coins(&mut self, amount: u32) -> bool {
        ProgressionTracker::spend_coins(self, amount)
    }
}
