//! Animation settings and preferences
//!
//! Persisted in LocalStorage on the web, read from a JSON file natively.

use serde::{Deserialize, Serialize};

use crate::sim::ExpiryPolicy;

/// Quality preset levels
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

    /// Number of background stars
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 50,
            QualityPreset::Medium => 100,
            QualityPreset::High => 200,
        }
    }

    /// Maximum live particles before the oldest are dropped
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 500,
            QualityPreset::Medium => 2000,
            QualityPreset::High => 6000,
        }
    }

    /// Maximum rockets in flight before the oldest is dropped
    pub fn max_projectiles(&self) -> usize {
        match self {
            QualityPreset::Low => 16,
            QualityPreset::Medium => 64,
            QualityPreset::High => 256,
        }
    }
}

/// Animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quality preset (population sizes)
    pub quality: QualityPreset,
    /// Launch rockets on a timer without input
    pub auto_launch: bool,
    /// Per-tick chance of an autonomous launch
    pub auto_launch_chance: f32,
    /// Particles per burst
    pub burst_size: usize,
    /// Opacity of the black wash drawn each frame (lower = longer trails)
    pub fade_alpha: f32,
    /// When a rocket is considered to have arrived
    pub expiry: ExpiryPolicy,
    /// Reduced motion (no bob, no glow)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            auto_launch: true,
            auto_launch_chance: 0.02,
            burst_size: 50,
            fade_alpha: 0.2,
            expiry: ExpiryPolicy::Bounds,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Effective autonomous launch chance (0 when auto launch is off)
    pub fn effective_launch_chance(&self) -> f32 {
        if self.auto_launch {
            self.auto_launch_chance.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }

    pub fn max_projectiles(&self) -> usize {
        self.quality.max_projectiles()
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "firework_horse_settings";

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
            if let Ok(json) = self.to_json() {
                if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                    log::info!("Settings saved");
                } else {
                    log::warn!("Could not write settings to LocalStorage");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_takes_defaults() {
        let settings = Settings::from_json(r#"{"burst_size": 40, "quality": "High"}"#).unwrap();
        assert_eq!(settings.burst_size, 40);
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.fade_alpha, 0.2);
        assert!(settings.auto_launch);
    }

    #[test]
    fn test_json_round_trip_keeps_expiry() {
        let settings = Settings {
            expiry: ExpiryPolicy::Proximity { fraction: 0.25 },
            ..Settings::default()
        };
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{not json").is_err());
    }

    #[test]
    fn test_auto_launch_off_disables_chance() {
        let settings = Settings {
            auto_launch: false,
            ..Settings::default()
        };
        assert_eq!(settings.effective_launch_chance(), 0.0);
        assert_eq!(Settings::default().effective_launch_chance(), 0.02);
    }

    #[test]
    fn test_preset_names_parse_back() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::from_str(preset.as_str()), Some(preset));
        }
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(Settings::from_preset(QualityPreset::Low).max_particles(), 500);
    }
}
