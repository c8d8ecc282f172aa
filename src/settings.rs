//! Game settings and preferences
//!
//! Persisted separately from the leaderboard, in the same store.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MAX_LEVEL;
use crate::error::StorageError;
use crate::persistence::{KeyValueStore, load_json, save_json};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Silence all sound cues
    pub muted: bool,
    /// Color theme
    pub theme: Theme,
    /// Highest level that offers "Next Level"; beyond it only "Play Again"
    pub max_level: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            theme: Theme::Dark,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "safe_box_settings";

    /// Whether a win on `level` should offer the next level
    pub fn offers_next_level(&self, level: u32) -> bool {
        level < self.max_level
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.muted);
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.offers_next_level(2));
        assert!(!settings.offers_next_level(3));
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.as_str(), "Light");
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let mut settings = Settings::default();
        settings.toggle_muted();
        settings.toggle_theme();
        settings.max_level = 5;
        settings.save(&mut store).unwrap();

        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut store = MemoryStore::new();
        store.set("safe_box_settings", r#"{"muted":true}"#).unwrap();
        let settings = Settings::load(&store);
        assert!(settings.muted);
        assert_eq!(settings.max_level, DEFAULT_MAX_LEVEL);
    }
}
