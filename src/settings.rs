//! Player preferences
//!
//! Persisted separately from tuning in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::CAMERA_SMOOTHING;

/// How the camera follows the torso
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraMode {
    /// Exponential smoothing toward the target offset
    #[default]
    Smoothed,
    /// Jump straight to the target offset every tick
    Snap,
}

impl CameraMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::Smoothed => "Smoothed",
            CameraMode::Snap => "Snap",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "smoothed" | "smooth" => Some(CameraMode::Smoothed),
            "snap" => Some(CameraMode::Snap),
            _ => None,
        }
    }
}

/// How the distance readout is derived from the torso position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceMode {
    /// Current torso x; goes down when the walker backs up
    #[default]
    Live,
    /// Furthest torso x reached this run
    HighWater,
}

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Camera follow policy
    pub camera_mode: CameraMode,
    /// Smoothing rate for `CameraMode::Smoothed` (1/s)
    pub camera_smoothing: f32,
    /// Distance readout policy
    pub distance_mode: DistanceMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera_mode: CameraMode::Smoothed,
            camera_smoothing: CAMERA_SMOOTHING,
            distance_mode: DistanceMode::Live,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hooded_walker_settings";

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        if !self.camera_smoothing.is_finite() || self.camera_smoothing <= 0.0 {
            self.camera_smoothing = CAMERA_SMOOTHING;
        }
        self
    }

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_mode_from_str() {
        assert_eq!(CameraMode::from_str("SNAP"), Some(CameraMode::Snap));
        assert_eq!(CameraMode::from_str("smooth"), Some(CameraMode::Smoothed));
        assert_eq!(CameraMode::from_str("wobbly"), None);
        assert_eq!(CameraMode::Snap.as_str(), "Snap");
    }

    #[test]
    fn test_settings_round_trip_through_storage_format() {
        let settings = Settings {
            camera_mode: CameraMode::Snap,
            camera_smoothing: 3.0,
            distance_mode: DistanceMode::HighWater,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_malformed_settings_use_defaults() {
        assert_eq!(Settings::from_json("[1, 2"), Settings::default());
        let s = Settings::from_json(r#"{ "camera_smoothing": -1.0 }"#);
        assert_eq!(s.camera_smoothing, CAMERA_SMOOTHING);
    }
}
