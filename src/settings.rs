//! Game settings and preferences
//!
//! Persisted separately from the run save in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence::storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Saves ===
    /// Save progress when the page is hidden or closed
    pub autosave: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: true,
            autosave: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "ridge_runner_settings";

    /// Parse stored settings; unknown or missing fields take defaults
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Load settings from storage, falling back to defaults
    pub fn load() -> Self {
        match storage::read(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Stored settings unreadable, using defaults");
            }
            Ok(None) => log::info!("Using default settings"),
            Err(e) => log::warn!("Settings unavailable: {}", e),
        }
        Self::default()
    }

    /// Save settings to storage (no-op on native)
    pub fn save(&self) {
        let Ok(json) = serde_json::to_string(self) else {
            return;
        };
        match storage::write(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}
