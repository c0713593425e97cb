//! Game settings and preferences
//!
//! Read-only at runtime. Native builds read a JSON file, web builds read
//! LocalStorage. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

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

    /// Ball mesh subdivision as (latitude bands, longitude slices)
    pub fn sphere_segments(&self) -> (u32, u32) {
        match self {
            QualityPreset::Low => (9, 18),
            QualityPreset::Medium => (18, 36),
            QualityPreset::High => (36, 72),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Display ===
    /// Initial window width (native)
    pub window_width: u32,
    /// Initial window height (native)
    pub window_height: u32,
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,
    /// Sync presentation to the display refresh
    pub vsync: bool,

    // === Controls ===
    /// Orbit degrees per pixel of horizontal mouse motion
    pub mouse_sensitivity: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start muted
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            window_width: SCREEN_WIDTH,
            window_height: SCREEN_HEIGHT,
            fov_degrees: FOV_DEGREES,
            vsync: true,

            mouse_sensitivity: MOUSE_SENSITIVITY,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Field of view clamped to something a perspective matrix accepts
    pub fn effective_fov(&self) -> f32 {
        self.fov_degrees.clamp(10.0, 120.0)
    }

    /// Replace the quality preset by name; unknown names keep the current one
    pub fn apply_quality_override(&mut self, name: &str) {
        match QualityPreset::from_str(name) {
            Some(preset) => {
                self.quality = preset;
                log::info!("Quality preset: {}", preset.as_str());
            }
            None => log::warn!(
                "Unknown quality preset '{}', keeping {}",
                name,
                self.quality.as_str()
            ),
        }
    }

    /// Environment variable overriding the quality preset (native only)
    #[allow(dead_code)]
    const QUALITY_ENV: &'static str = "BOUNCE_BLITZ_QUALITY";
    /// Environment variable naming the settings file (native only)
    #[allow(dead_code)]
    const PATH_ENV: &'static str = "BOUNCE_BLITZ_SETTINGS";
    /// Settings file looked up in the working directory (native only)
    #[allow(dead_code)]
    const DEFAULT_PATH: &'static str = "bounce_blitz.json";
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bounce_blitz_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from `$BOUNCE_BLITZ_SETTINGS` or `./bounce_blitz.json`,
    /// then apply `$BOUNCE_BLITZ_QUALITY` if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = Self::load_file();
        if let Ok(name) = std::env::var(Self::QUALITY_ENV) {
            settings.apply_quality_override(&name);
        }
        settings
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load_file() -> Self {
        let explicit = std::env::var(Self::PATH_ENV).ok();
        let path = explicit
            .clone()
            .unwrap_or_else(|| Self::DEFAULT_PATH.to_string());

        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json(&json)
            }
            Err(e) => {
                if explicit.is_some() {
                    log::warn!("Could not read settings file {}: {}", path, e);
                }
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("LOW"), Some(QualityPreset::Low));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_quality_override() {
        let mut settings = Settings::default();
        settings.apply_quality_override("high");
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.quality.sphere_segments(), (36, 72));

        settings.apply_quality_override("potato");
        assert_eq!(settings.quality, QualityPreset::High);
    }

    #[test]
    fn test_medium_sphere_segments() {
        assert_eq!(QualityPreset::default().sphere_segments(), (18, 36));
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.quality = QualityPreset::High;
        settings.mouse_sensitivity = 0.25;
        settings.muted = true;

        let json = serde_json::to_string(&settings).unwrap();
        let back = Settings::from_json(&json);
        assert_eq!(back.quality, QualityPreset::High);
        assert_eq!(back.mouse_sensitivity, 0.25);
        assert!(back.muted);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "vsync": false }"#);
        assert!(!settings.vsync);
        assert_eq!(settings.window_width, SCREEN_WIDTH);
        assert_eq!(settings.mouse_sensitivity, MOUSE_SENSITIVITY);
    }

    #[test]
    fn test_malformed_json_uses_defaults() {
        let settings = Settings::from_json("{ not json");
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert_eq!(settings.fov_degrees, FOV_DEGREES);
    }

    #[test]
    fn test_effective_fov_clamped() {
        let mut settings = Settings::default();
        settings.fov_degrees = 0.0;
        assert_eq!(settings.effective_fov(), 10.0);
        settings.fov_degrees = 45.0;
        assert_eq!(settings.effective_fov(), 45.0);
    }
}
