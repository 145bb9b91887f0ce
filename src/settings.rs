//! Field and scoring settings
//!
//! Persisted in LocalStorage on the web; read from a JSON file by the native
//! binary.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ScoreError;
use crate::field::{FieldGeometry, ScoringRules};

/// Scoring settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field units ===
    /// Canvas units per field inch
    pub pixels_per_inch: f32,
    /// Leg length of each corner triangle (inches)
    pub corner_leg_inches: f32,

    // === Scoring ===
    /// Per-axis tolerance when matching goals to the corner snapshot (canvas units)
    pub snapshot_epsilon: f32,
    /// Countdown second at which the corner snapshot is taken
    pub late_phase_secs: u32,

    // === Match ===
    /// Match length in seconds
    pub match_duration_secs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pixels_per_inch: PIXELS_PER_INCH,
            corner_leg_inches: CORNER_LEG_INCHES,

            snapshot_epsilon: SNAPSHOT_EPSILON,
            late_phase_secs: LATE_PHASE_SECS,

            match_duration_secs: MATCH_DURATION_SECS,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "high_stakes_settings";

    /// Parse and validate a settings document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| ScoreError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ScoreError> {
        serde_json::to_string_pretty(self).map_err(|e| ScoreError::Settings(e.to_string()))
    }

    /// Check every value is in a usable range
    pub fn validate(&self) -> Result<(), ScoreError> {
        if !is_positive(self.pixels_per_inch) {
            return Err(ScoreError::InvalidSetting {
                name: "pixels_per_inch",
                value: self.pixels_per_inch,
                expected: "> 0",
            });
        }
        if !(is_positive(self.corner_leg_inches) && self.corner_leg_inches <= FIELD_INCHES / 2.0) {
            return Err(ScoreError::InvalidSetting {
                name: "corner_leg_inches",
                value: self.corner_leg_inches,
                expected: "> 0 and <= half the field",
            });
        }
        if !is_positive(self.snapshot_epsilon) {
            return Err(ScoreError::InvalidSetting {
                name: "snapshot_epsilon",
                value: self.snapshot_epsilon,
                expected: "> 0",
            });
        }
        if self.late_phase_secs > self.match_duration_secs {
            return Err(ScoreError::InvalidSetting {
                name: "late_phase_secs",
                value: self.late_phase_secs as f32,
                expected: "<= match_duration_secs",
            });
        }
        Ok(())
    }

    /// Field dimensions in canvas units
    pub fn geometry(&self) -> FieldGeometry {
        FieldGeometry::new(
            FIELD_INCHES * self.pixels_per_inch,
            self.corner_leg_inches * self.pixels_per_inch,
        )
    }

    /// Scoring rules derived from these settings
    pub fn rules(&self) -> ScoringRules {
        ScoringRules {
            geometry: self.geometry(),
            late_phase_secs: self.late_phase_secs,
            snapshot_epsilon: self.snapshot_epsilon,
        }
    }

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

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }

    /// Load settings from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, ScoreError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ScoreError::Settings(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

/// Finite and strictly positive (rejects NaN and infinities)
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
