//! Game settings: ruleset, actor tuning and effect quality
//!
//! Persisted in LocalStorage on the web. Only preferences live here; score
//! and level are never saved.

use serde::{Deserialize, Serialize};

use crate::sim::{LevelUpPolicy, ProblemRules, SpeedRange};

/// Effect density presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Next preset in Low -> Medium -> High -> Low order
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Maximum live effects for this preset
    pub fn max_effects(&self) -> usize {
        match self {
            QualityPreset::Low => 40,
            QualityPreset::Medium => 200,
            QualityPreset::High => 600,
        }
    }

    /// Burst size multiplier (1.0 = 20 sparks per answer)
    pub fn burst_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Operator set and operand scaling
    pub problems: ProblemRules,
    /// Score-threshold or streak level-up
    pub level_up: LevelUpPolicy,

    // === Actors ===
    /// Player movement per tick (pixels)
    pub player_speed: f32,
    /// Player health at the start of a run
    pub starting_health: u32,
    /// Enemy fall speed, redrawn on every reset
    pub enemy_speed: SpeedRange,

    // === Effects ===
    pub quality: QualityPreset,
    /// Particle bursts and floating text
    pub effects: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            problems: ProblemRules::default(),
            level_up: LevelUpPolicy::default(),

            player_speed: 7.0,
            starting_health: 100,
            enemy_speed: SpeedRange::fixed(3.0),

            quality: QualityPreset::Medium,
            effects: true,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields fall back to defaults.
    /// Values that would break the simulation are rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        settings
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(settings)
    }

    /// Check tuning values the simulation relies on
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.player_speed.is_finite() && self.player_speed > 0.0) {
            return Err("player_speed must be a positive number");
        }
        if self.starting_health == 0 {
            return Err("starting_health must be at least 1");
        }
        let speed = self.enemy_speed;
        if !(speed.min.is_finite() && speed.max.is_finite()) {
            return Err("enemy_speed bounds must be finite");
        }
        if !(speed.min > 0.0 && speed.min <= speed.max) {
            return Err("enemy_speed needs 0 < min <= max");
        }
        match self.level_up {
            LevelUpPolicy::ScoreThreshold { points_per_level: 0 } => {
                Err("points_per_level must be at least 1")
            }
            LevelUpPolicy::Streak { required, max_level } if required == 0 || max_level == 0 => {
                Err("streak required and max_level must be at least 1")
            }
            _ => Ok(()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Effective live-effect cap
    pub fn max_effects(&self) -> usize {
        if !self.effects {
            0
        } else {
            self.quality.max_effects()
        }
    }

    /// Number of sparks for a burst of nominal size `base`
    pub fn burst_count(&self, base: usize) -> usize {
        if !self.effects {
            return 0;
        }
        ((base as f32 * self.quality.burst_scale()).round() as usize).max(1)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "mathfall_settings";

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
                    Err(e) => log::warn!("Ignoring malformed stored settings: {}", e),
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
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
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
