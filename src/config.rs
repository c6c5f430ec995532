//! Game configuration
//!
//! Every tunable lives in [`GameConfig`]. A config is validated once when it
//! is built or loaded and treated as immutable for the rest of the run;
//! display scaling produces a new value instead of patching the old one.

use std::f32::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ACTOR_X_FRACTION, BASE_SCREEN_HEIGHT};

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: min {min} is greater than max {max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} = {value}: {reason}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
    #[error(
        "jump hold acceleration {jump_hold_accel} must push against gravity {gravity}, not with it"
    )]
    GravityDirection { gravity: f32, jump_hold_accel: f32 },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable game parameters
///
/// Y grows downward: gravity is positive, jump impulses are negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: u32,
    pub screen_height: u32,

    // === Ball ===
    pub radius: f32,
    /// Ground line (actor center rests here)
    pub ground_y: f32,

    // === Physics ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative = up)
    pub jump_velocity: f32,
    /// Seconds the jump button can be held for extra height
    pub max_jump_hold: f32,
    /// Extra acceleration while the jump is held (negative = up)
    pub jump_hold_accel: f32,

    // === Scrolling ===
    /// Platform scroll speed (px/s, leftward)
    pub scroll_speed: f32,

    // === Platforms ===
    /// Platform slots, and the score needed to win
    pub total_platforms: usize,
    /// Left-edge to left-edge spacing between consecutive platforms
    pub min_gap: f32,
    pub max_gap: f32,
    pub min_platform_width: f32,
    pub max_platform_width: f32,
    /// Platform thickness
    pub platform_height: f32,
    /// Ceiling: platform tops never go above this Y
    pub min_platform_y: f32,
    pub step_up_min: f32,
    pub step_up_max: f32,

    // === Background ===
    pub cloud_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        let screen_height: u32 = 450;
        Self {
            screen_width: 800,
            screen_height,

            radius: 20.0,
            ground_y: screen_height as f32 - 80.0,

            gravity: 1000.0,
            jump_velocity: -550.0,
            max_jump_hold: 0.25,
            jump_hold_accel: -1200.0,

            scroll_speed: 220.0,

            total_platforms: 200,
            min_gap: 260.0,
            max_gap: 420.0,
            min_platform_width: 120.0,
            max_platform_width: 200.0,
            platform_height: 14.0,
            min_platform_y: 20.0,
            step_up_min: 15.0,
            step_up_max: 35.0,

            cloud_count: 10,
        }
    }
}

impl GameConfig {
    /// Check every invariant, returning the config unchanged when it holds
    pub fn validate(self) -> Result<Self, ConfigError> {
        let finite = [
            ("radius", self.radius),
            ("ground_y", self.ground_y),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("max_jump_hold", self.max_jump_hold),
            ("jump_hold_accel", self.jump_hold_accel),
            ("scroll_speed", self.scroll_speed),
            ("min_gap", self.min_gap),
            ("max_gap", self.max_gap),
            ("min_platform_width", self.min_platform_width),
            ("max_platform_width", self.max_platform_width),
            ("platform_height", self.platform_height),
            ("min_platform_y", self.min_platform_y),
            ("step_up_min", self.step_up_min),
            ("step_up_max", self.step_up_max),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }

        let ranges = [
            ("gap", self.min_gap, self.max_gap),
            ("platform_width", self.min_platform_width, self.max_platform_width),
            ("step_up", self.step_up_min, self.step_up_max),
            ("platform_y", self.min_platform_y, self.ground_y),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(ConfigError::InvalidRange { name, min, max });
            }
        }

        let positive = [
            ("screen_width", self.screen_width as f32),
            ("screen_height", self.screen_height as f32),
            ("radius", self.radius),
            ("platform_height", self.platform_height),
            ("total_platforms", self.total_platforms as f32),
            ("gravity", self.gravity),
            ("min_platform_width", self.min_platform_width),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    reason: "must be positive",
                });
            }
        }

        let non_negative = [
            ("scroll_speed", self.scroll_speed),
            ("max_jump_hold", self.max_jump_hold),
            ("min_gap", self.min_gap),
            ("step_up_min", self.step_up_min),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    reason: "must not be negative",
                });
            }
        }

        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "jump_velocity",
                value: self.jump_velocity,
                reason: "must point up (negative)",
            });
        }

        if self.jump_hold_accel > 0.0 {
            return Err(ConfigError::GravityDirection {
                gravity: self.gravity,
                jump_hold_accel: self.jump_hold_accel,
            });
        }

        Ok(self)
    }

    /// Derive a config whose physics is scaled for the real display height
    ///
    /// Gravity and both jump accelerations scale with `height / 450` so a
    /// jump covers the same share of the screen at any resolution.
    pub fn with_display_height(&self, height: f32) -> Self {
        if !(height.is_finite() && height > 0.0) {
            log::warn!("Ignoring display height {height}, physics left unscaled");
            return self.clone();
        }

        let scale = height / BASE_SCREEN_HEIGHT;
        Self {
            gravity: self.gravity * scale,
            jump_velocity: self.jump_velocity * scale,
            jump_hold_accel: self.jump_hold_accel * scale,
            ..self.clone()
        }
    }

    /// Cosmetic roll rate in degrees per second
    ///
    /// One full turn per ball circumference of scrolled distance.
    pub fn roll_rate(&self) -> f32 {
        360.0 * self.scroll_speed / (2.0 * PI * self.radius)
    }

    /// Fixed horizontal position of the actor
    pub fn actor_start_x(&self) -> f32 {
        self.screen_width as f32 * ACTOR_X_FRACTION
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default().validate().unwrap();
        assert_eq!(config.ground_y, 370.0);
        assert_eq!(config.total_platforms, 200);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = GameConfig {
            min_gap: 500.0,
            max_gap: 300.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "gap", .. })
        ));

        let config = GameConfig {
            step_up_min: 40.0,
            step_up_max: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "step_up", .. })
        ));
    }

    #[test]
    fn test_rejects_ceiling_below_ground() {
        let config = GameConfig {
            min_platform_y: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                name: "platform_y",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_hold_acceleration_along_gravity() {
        let config = GameConfig {
            jump_hold_accel: 300.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GravityDirection { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_platforms_and_nan() {
        let config = GameConfig {
            total_platforms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                name: "total_platforms",
                ..
            })
        ));

        let config = GameConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { name: "gravity", .. })
        ));
    }

    #[test]
    fn test_display_scaling_is_pure() {
        let base = GameConfig::default();
        let scaled = base.with_display_height(900.0);

        assert_eq!(base, GameConfig::default());
        assert!((scaled.gravity - 2000.0).abs() < 1e-3);
        assert!((scaled.jump_velocity + 1100.0).abs() < 1e-3);
        assert!((scaled.jump_hold_accel + 2400.0).abs() < 1e-3);
        assert_eq!(scaled.scroll_speed, base.scroll_speed);
        assert_eq!(scaled.ground_y, base.ground_y);

        // Nonsense heights leave physics alone
        assert_eq!(base.with_display_height(0.0), base);
    }

    #[test]
    fn test_roll_rate_matches_circumference() {
        let config = GameConfig::default();
        // 360 * 220 / (2π * 20) ≈ 630 deg/s
        assert!((config.roll_rate() - 630.25).abs() < 0.1);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = GameConfig::from_json_str(r#"{ "total_platforms": 3, "scroll_speed": 100.0 }"#)
            .unwrap();
        assert_eq!(config.total_platforms, 3);
        assert_eq!(config.scroll_speed, 100.0);
        assert_eq!(config.radius, 20.0);

        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json_str(r#"{ "min_gap": 900.0 }"#),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("sky_hop_config_{}.json", std::process::id()));
        let config = GameConfig {
            total_platforms: 42,
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = GameConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            GameConfig::load("/definitely/not/here/sky_hop.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
