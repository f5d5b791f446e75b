//! Game settings and preferences
//!
//! Persisted by the host as JSON. Partial documents merge over the defaults;
//! anything unreadable falls back to safe values instead of failing.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Blood particles on kills; an absent key means disabled
    #[serde(default)]
    pub blood_effects: bool,
    /// Screen shake on hits
    pub screen_shake: bool,
    /// Vignette overlay
    pub vignette_effect: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sound_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            blood_effects: true,
            screen_shake: true,
            vignette_effect: true,

            master_volume: 1.0,
            music_volume: 0.3,
            sound_volume: 0.5,
        }
    }
}

impl Settings {
    /// Defaults with every optional effect turned off
    pub fn fallback() -> Self {
        Self {
            blood_effects: false,
            screen_shake: false,
            vignette_effect: false,
            ..Self::default()
        }
    }

    /// Parse a settings document, merging missing keys over the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read and parse a settings file
    pub fn read_from(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    /// Load settings, never failing
    ///
    /// A missing file yields the defaults; anything else that goes wrong
    /// yields [`Settings::fallback`].
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::fallback()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, self.to_json()?)
    }

    /// Effective sound-effect volume
    pub fn effective_sound_volume(&self) -> f32 {
        self.master_volume * self.sound_volume
    }

    /// Effective particle count cap (zero when blood effects are off)
    pub fn max_particles(&self) -> usize {
        if self.blood_effects {
            self.quality.max_particles()
        } else {
            0
        }
    }

    /// Volumes clamped to [0, 1]; non-finite values reset to the default
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |v: f32, d: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { d };
        self.master_volume = fix(self.master_volume, defaults.master_volume);
        self.music_volume = fix(self.music_volume, defaults.music_volume);
        self.sound_volume = fix(self.sound_volume, defaults.sound_volume);
        self
    }
}
