//! Player preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;
use crate::rules::RulesetKind;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which ruleset new runs use
    pub ruleset: RulesetKind,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Skip the red hurt flash
    pub reduced_flashing: bool,

    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ruleset: RulesetKind::Arena,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_flashing: false,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Gain applied to every sound effect
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Switch new runs to the next ruleset preset
    pub fn cycle_ruleset(&mut self) -> RulesetKind {
        self.ruleset = self.ruleset.next();
        self.ruleset
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn toggle_reduced_flashing(&mut self) -> bool {
        self.reduced_flashing = !self.reduced_flashing;
        self.reduced_flashing
    }

    /// Menu button captions: (ruleset, sound, flashing)
    pub fn labels(&self) -> (String, &'static str, &'static str) {
        (
            format!("Mode: {}", self.ruleset.as_str()),
            if self.muted { "Sound: off" } else { "Sound: on" },
            if self.reduced_flashing {
                "Flashing: reduced"
            } else {
                "Flashing: on"
            },
        )
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rune_raid_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
