//! Motion preferences
//!
//! Speed scale and effects toggle, owned by the physics manager and edited
//! by the page's slider/checkbox. Persisted in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};

/// Named bands of the speed slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedTier {
    VerySlow,
    Slow,
    Normal,
    Fast,
    VeryFast,
    Extreme,
}

impl SpeedTier {
    /// Tier for a speed value
    pub fn for_speed(speed: f32) -> Self {
        if speed <= 40.0 {
            SpeedTier::VerySlow
        } else if speed <= 80.0 {
            SpeedTier::Slow
        } else if speed <= 160.0 {
            SpeedTier::Normal
        } else if speed <= 280.0 {
            SpeedTier::Fast
        } else if speed <= 400.0 {
            SpeedTier::VeryFast
        } else {
            SpeedTier::Extreme
        }
    }

    /// Label shown next to the slider
    pub fn label(&self) -> &'static str {
        match self {
            SpeedTier::VerySlow => "Très lent",
            SpeedTier::Slow => "Lent",
            SpeedTier::Normal => "Normal",
            SpeedTier::Fast => "Rapide",
            SpeedTier::VeryFast => "Très rapide",
            SpeedTier::Extreme => "Extrême",
        }
    }

    /// Label colour (CSS hex)
    pub fn color(&self) -> &'static str {
        match self {
            SpeedTier::VerySlow => "#6495ED",
            SpeedTier::Slow => "#4169E1",
            SpeedTier::Normal => "#4CAF50",
            SpeedTier::Fast => "#FF9800",
            SpeedTier::VeryFast => "#FF5252",
            SpeedTier::Extreme => "#B71C1C",
        }
    }
}

/// Colour for the percentage readout
pub fn percent_color(percent: u32) -> &'static str {
    match percent {
        0..=50 => "#6495ED",
        51..=100 => "#4CAF50",
        101..=250 => "#FF9800",
        _ => "#FF5252",
    }
}

/// Runtime-tunable motion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Global speed scale applied to every option
    pub speed: f32,
    /// Collision sparks and flashes
    pub effects_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            effects_enabled: true,
        }
    }
}

impl Settings {
    /// Set the speed scale, clamped to the slider range
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            DEFAULT_SPEED
        };
    }

    pub fn speed_tier(&self) -> SpeedTier {
        SpeedTier::for_speed(self.speed)
    }

    /// Speed relative to the default, in percent
    pub fn speed_percent(&self) -> u32 {
        (self.speed / DEFAULT_SPEED * 100.0).round() as u32
    }

    /// Parse stored JSON, falling back to defaults on anything malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                let speed = settings.speed;
                settings.set_speed(speed);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "option_drift_settings";

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
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Could not save settings");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No storage for {}, using defaults", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
