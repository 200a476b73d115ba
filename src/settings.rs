//! Player preferences
//!
//! Persisted separately from progress under [`SETTINGS_KEY`](crate::persistence::SETTINGS_KEY).

use serde::{Deserialize, Serialize};

/// Avatars a player can pick from
pub const AVATARS: [&str; 5] = ["default", "arctic", "explorer", "master", "legend"];
/// Color themes a player can pick from
pub const THEMES: [&str; 4] = ["arctic", "deep", "frozen", "crystal"];

/// Audio/feedback preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Sound effects
    #[serde(default = "enabled")]
    pub sound_enabled: bool,
    /// Background music
    #[serde(default = "enabled")]
    pub music_enabled: bool,
    /// Haptic feedback
    #[serde(default = "enabled")]
    pub vibration_enabled: bool,
    /// UI language code
    #[serde(default = "default_language")]
    pub language: String,
}

fn enabled() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            vibration_enabled: true,
            language: default_language(),
        }
    }
}

impl AppSettings {
    /// Effective sound: nothing plays with both channels off
    pub fn any_audio(&self) -> bool {
        self.sound_enabled || self.music_enabled
    }
}

/// Whether `avatar` is one of [`AVATARS`]
pub fn is_known_avatar(avatar: &str) -> bool {
    AVATARS.contains(&avatar)
}

/// Whether `theme` is one of [`THEMES`]
pub fn is_known_theme(theme: &str) -> bool {
    THEMES.contains(&theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = AppSettings::default();
        assert!(s.sound_enabled && s.music_enabled && s.vibration_enabled);
        assert_eq!(s.language, "en");
        assert!(s.any_audio());
    }

    #[test]
    fn test_missing_fields_fill_in() {
        let s: AppSettings = serde_json::from_str(r#"{"music_enabled":false}"#).unwrap();
        assert!(s.sound_enabled);
        assert!(!s.music_enabled);
        assert_eq!(s.language, "en");
    }

    #[test]
    fn test_known_choices() {
        assert!(is_known_avatar("legend"));
        assert!(!is_known_avatar("pirate"));
        assert!(is_known_theme("crystal"));
        assert!(!is_known_theme("lava"));
    }
}
