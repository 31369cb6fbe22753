//! Scroll configuration
//!
//! All physics constants live in [`ScrollConfig`]. It deserializes from TOML
//! using the same key names the constants are documented under:
//!
//! ```toml
//! threshold = 5
//! scrollHandleMinSize = 25
//!
//! [flicking]
//! triggerThreshold = 150
//! friction = 0.998
//! minSpeed = 0.15
//! timingFunc = [0.0, 0.3, 0.6, 1.0]
//!
//! [elasticity]
//! factorDrag = 0.5
//! factorFlick = 0.2
//! max = 100
//!
//! [snapBack]
//! timingFunc = [0.4, 0.0, 1.0, 1.0]
//! defaultTime = 400
//! alwaysDefaultTime = true
//! ```
//!
//! Missing keys keep their defaults, unknown keys are rejected.

use std::fs;
use std::path::Path;

use flick_animation::TimingFunction;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Flick detection and deceleration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FlickingConfig {
    /// Longest pause (ms) between the last move and the release that still flicks
    pub trigger_threshold: f32,
    /// Velocity kept per millisecond, in (0, 1). Lower values stop flicks sooner
    pub friction: f32,
    /// Speed (px/ms) below which a flick is over, or never starts
    pub min_speed: f32,
    /// Easing of flick animations
    pub timing_func: TimingFunction,
}

impl Default for FlickingConfig {
    fn default() -> Self {
        Self {
            trigger_threshold: 150.0,
            friction: 0.998,
            min_speed: 0.15,
            timing_func: TimingFunction::FLICK,
        }
    }
}

/// Rubber-band behavior past the content edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ElasticityConfig {
    /// Fraction of the overshoot kept while dragging
    pub factor_drag: f32,
    /// Fraction of the overshoot kept when a flick runs past the edge
    pub factor_flick: f32,
    /// Largest flick overshoot in pixels
    pub max: f32,
}

impl Default for ElasticityConfig {
    fn default() -> Self {
        Self {
            factor_drag: 0.5,
            factor_flick: 0.2,
            max: 100.0,
        }
    }
}

/// Return animation for overscrolled content
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SnapBackConfig {
    /// Easing of snap-back animations
    pub timing_func: TimingFunction,
    /// Snap-back duration in milliseconds
    pub default_time: f32,
    /// Always use `default_time`. When false the duration shrinks with the
    /// depth of the bounce relative to `elasticity.max`
    pub always_default_time: bool,
}

impl Default for SnapBackConfig {
    fn default() -> Self {
        Self {
            timing_func: TimingFunction::SNAP_BACK,
            default_time: 400.0,
            always_default_time: true,
        }
    }
}

/// Shared configuration for scroller instances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ScrollConfig {
    /// Pointer travel (px) before a press turns into a scroll
    pub threshold: f32,
    /// Smallest scrollbar indicator length in pixels
    pub scroll_handle_min_size: f32,
    pub flicking: FlickingConfig,
    pub elasticity: ElasticityConfig,
    pub snap_back: SnapBackConfig,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: 5.0,
            scroll_handle_min_size: 25.0,
            flicking: FlickingConfig::default(),
            elasticity: ElasticityConfig::default(),
            snap_back: SnapBackConfig::default(),
        }
    }
}

impl ScrollConfig {
    /// Short, tight flicks with a quick snap-back
    pub fn snappy() -> Self {
        Self {
            flicking: FlickingConfig {
                friction: 0.995,
                min_speed: 0.2,
                ..Default::default()
            },
            snap_back: SnapBackConfig {
                default_time: 250.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Set the drag threshold in pixels
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the per-millisecond friction factor
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.flicking.friction = friction;
        self
    }

    /// Set the minimum flick speed in px/ms
    pub fn with_min_speed(mut self, min_speed: f32) -> Self {
        self.flicking.min_speed = min_speed;
        self
    }

    /// Set the drag and flick elasticity factors
    pub fn with_elasticity(mut self, factor_drag: f32, factor_flick: f32, max: f32) -> Self {
        self.elasticity = ElasticityConfig {
            factor_drag,
            factor_flick,
            max,
        };
        self
    }

    /// Choose between a fixed and a bounce-depth snap-back duration
    pub fn with_snap_back_time(mut self, default_time: f32, always_default_time: bool) -> Self {
        self.snap_back.default_time = default_time;
        self.snap_back.always_default_time = always_default_time;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScrollConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would yield NaN, infinite or frozen motion
    pub fn validate(&self) -> Result<()> {
        non_negative("threshold", self.threshold)?;
        non_negative("scrollHandleMinSize", self.scroll_handle_min_size)?;

        positive(
            "flicking.triggerThreshold",
            self.flicking.trigger_threshold,
        )?;
        let friction = self.flicking.friction;
        if !(friction.is_finite() && friction > 0.0 && friction < 1.0) {
            return Err(invalid(
                "flicking.friction",
                friction,
                "must be strictly between 0 and 1",
            ));
        }
        positive("flicking.minSpeed", self.flicking.min_speed)?;

        fraction("elasticity.factorDrag", self.elasticity.factor_drag)?;
        fraction("elasticity.factorFlick", self.elasticity.factor_flick)?;
        non_negative("elasticity.max", self.elasticity.max)?;

        positive("snapBack.defaultTime", self.snap_back.default_time)?;
        Ok(())
    }
}

/// Per-instance scroller options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollerOptions {
    /// Let content travel past its edges under damping (default: false)
    pub elastic: bool,
    /// Maintain scrollbar metrics (default: true)
    pub scrollbars: bool,
}

impl Default for ScrollerOptions {
    fn default() -> Self {
        Self {
            elastic: false,
            scrollbars: true,
        }
    }
}

impl ScrollerOptions {
    /// Elastic scrolling with scrollbars
    pub fn elastic() -> Self {
        Self {
            elastic: true,
            ..Default::default()
        }
    }

    /// Enable or disable scrollbar metrics
    pub fn with_scrollbars(mut self, scrollbars: bool) -> Self {
        self.scrollbars = scrollbars;
        self
    }
}

fn invalid(key: &'static str, value: f32, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { key, value, reason }
}

fn non_negative(key: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(key, value, "must be a finite value >= 0"))
    }
}

fn positive(key: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(key, value, "must be a finite value > 0"))
    }
}

fn fraction(key: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(key, value, "must be within [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ScrollConfig::default().validate().is_ok());
        assert!(ScrollConfig::snappy().validate().is_ok());
    }

    #[test]
    fn test_parse_recognized_keys() {
        let config = ScrollConfig::from_toml_str(
            r#"
            threshold = 8
            scrollHandleMinSize = 30

            [flicking]
            triggerThreshold = 100
            minSpeed = 0.2
            timingFunc = [0.1, 0.2, 0.3, 1.0]

            [elasticity]
            factorDrag = 0.4
            max = 80

            [snapBack]
            defaultTime = 300
            alwaysDefaultTime = false
            "#,
        )
        .unwrap();

        assert_eq!(config.threshold, 8.0);
        assert_eq!(config.scroll_handle_min_size, 30.0);
        assert_eq!(config.flicking.trigger_threshold, 100.0);
        assert_eq!(config.flicking.min_speed, 0.2);
        // Unspecified keys keep their defaults
        assert_eq!(config.flicking.friction, 0.998);
        assert_eq!(config.flicking.timing_func.points(), [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(config.elasticity.factor_drag, 0.4);
        assert_eq!(config.elasticity.factor_flick, 0.2);
        assert_eq!(config.elasticity.max, 80.0);
        assert_eq!(config.snap_back.default_time, 300.0);
        assert!(!config.snap_back.always_default_time);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = ScrollConfig::default()
            .with_friction(-0.5)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "flicking.friction",
                ..
            }
        ));

        let err = ScrollConfig::default()
            .with_min_speed(0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "flicking.minSpeed",
                ..
            }
        ));

        assert!(ScrollConfig::default()
            .with_friction(1.0)
            .validate()
            .is_err());
        assert!(ScrollConfig::default()
            .with_elasticity(1.5, 0.2, 100.0)
            .validate()
            .is_err());
        assert!(ScrollConfig::default()
            .with_threshold(f32::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_curves() {
        assert!(matches!(
            ScrollConfig::from_toml_str("treshold = 5"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ScrollConfig::from_toml_str("[flicking]\ntimingFunc = [2.0, 0.0, 0.5, 1.0]"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ScrollConfig::from_toml_str("[flicking]\nfriction = 1.5"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_toml_round_trip_preserves_config() {
        let config = ScrollConfig::snappy().with_threshold(3.0);
        let text = config.to_toml().unwrap();
        assert_eq!(ScrollConfig::from_toml_str(&text).unwrap(), config);
    }
}
