//! Game settings and tuning
//!
//! Every field has a default matching the stock game, so a settings file
//! only needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Physics tuning and screen layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ball_width: f32,
    /// Ball spawn point (top-left of the sprite)
    pub start_x: f32,
    pub start_y: f32,
    pub start_vx: f32,
    /// Vertical velocity assigned on activation
    pub launch_impulse: f32,
    /// Added to vertical velocity every active tick
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ball_width: BALL_WIDTH,
            start_x: BALL_START.x,
            start_y: BALL_START.y,
            start_vx: BALL_START_VX,
            launch_impulse: LAUNCH_IMPULSE,
            gravity: GRAVITY,
        }
    }
}

impl PhysicsConfig {
    /// Rightmost x the ball's top-left corner may occupy
    pub fn right_bound(&self) -> f32 {
        self.screen_width - self.ball_width
    }

    /// The bottom edge; reaching it ends the round
    pub fn floor(&self) -> f32 {
        self.screen_height
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let finite = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ball_width", self.ball_width),
            ("start_x", self.start_x),
            ("start_y", self.start_y),
            ("start_vx", self.start_vx),
            ("launch_impulse", self.launch_impulse),
            ("gravity", self.gravity),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("{value} is not a finite number"),
                });
            }
        }
        if self.ball_width <= 0.0 || self.ball_width >= self.screen_width {
            return Err(SettingsError::Invalid {
                field: "ball_width",
                reason: format!(
                    "must be positive and narrower than the screen ({})",
                    self.screen_width
                ),
            });
        }
        if !(0.0..=self.right_bound()).contains(&self.start_x) {
            return Err(SettingsError::Invalid {
                field: "start_x",
                reason: format!("must lie within 0..={}", self.right_bound()),
            });
        }
        if self.start_y >= self.screen_height {
            return Err(SettingsError::Invalid {
                field: "start_y",
                reason: "ball would start below the floor".to_string(),
            });
        }
        // Without a downward pull the ball never reaches the floor
        if self.gravity <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "gravity",
                reason: format!("must be positive, got {}", self.gravity),
            });
        }
        Ok(())
    }
}

/// Where and how results get shared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Page linked from the shared post
    pub url: String,
    pub hashtags: Vec<String>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            url: "https://hothukurou.com".to_string(),
            hashtags: vec!["sample".to_string()],
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsConfig,
    pub share: ShareConfig,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bounce_tap_settings";

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.physics.validate()?;
        Ok(settings)
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
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from an optional JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_layout() {
        let physics = PhysicsConfig::default();
        assert_eq!(physics.right_bound(), 340.0);
        assert_eq!(physics.floor(), 600.0);
        assert_eq!(physics.launch_impulse, -8.0);
    }

    #[test]
    fn test_partial_override() {
        let settings =
            Settings::from_json(r#"{ "physics": { "gravity": 0.2 }, "share": { "hashtags": [] } }"#)
                .unwrap();
        assert_eq!(settings.physics.gravity, 0.2);
        assert_eq!(settings.physics.start_vx, 5.0);
        assert!(settings.share.hashtags.is_empty());
        assert_eq!(settings.share.url, "https://hothukurou.com");
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ physics: 1").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_ball_wider_than_screen_rejected() {
        let err = Settings::from_json(r#"{ "physics": { "ball_width": 500.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "ball_width",
                ..
            }
        ));
    }

    #[test]
    fn test_start_below_floor_rejected() {
        let err = Settings::from_json(r#"{ "physics": { "start_y": 650.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("start_y"));
    }

    #[test]
    fn test_non_positive_gravity_rejected() {
        for json in [
            r#"{ "physics": { "gravity": 0.0 } }"#,
            r#"{ "physics": { "gravity": -0.1 } }"#,
        ] {
            let err = Settings::from_json(json).unwrap_err();
            assert!(
                matches!(err, SettingsError::Invalid { field: "gravity", .. }),
                "{json}: {err}"
            );
        }
    }
}
