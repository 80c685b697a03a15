#![forbid(unsafe_code)]

//! Widget configuration as data.
//!
//! [`WidgetConfig`] gathers every tunable of the widget into one struct that
//! can be loaded from TOML or JSON (feature `config`), so thresholds and
//! texts change without a rebuild.
//!
//! ```toml
//! # fab-widget.toml
//! margin = 16.0
//! drag_threshold = 5.0
//! click_cooldown_ms = 200
//! reveal_interval_ms = 35
//!
//! [initial_inset]
//! right = 140.0
//! bottom = 150.0
//! ```
//!
//! ```rust,ignore
//! let config = WidgetConfig::from_toml_file("fab-widget.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! `WidgetConfig::default()` reproduces the shipped widget exactly.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::geometry::{DEFAULT_ELEMENT_EXTENT, DEFAULT_MARGIN, Point, Size};
use crate::gesture::GestureConfig;
use crate::greeting::DEFAULT_GREETING;

/// Title used when no route matches the current location.
pub const DEFAULT_TITLE: &str = "育小星";

/// Distance of the widget's initial origin from the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct Inset {
    pub right: f64,
    pub bottom: f64,
}

impl Default for Inset {
    fn default() -> Self {
        Self {
            right: 140.0,
            bottom: 150.0,
        }
    }
}

/// All tunables of the floating widget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct WidgetConfig {
    /// Gap kept from each viewport edge, in pixels.
    pub margin: f64,
    /// Widget edge length assumed until it is measured.
    pub default_extent: f64,
    /// Per-axis travel that turns a press into a drag.
    pub drag_threshold: f64,
    /// Delay after release before clicks are honoured again.
    pub click_cooldown_ms: u64,
    /// Delay between two revealed greeting characters.
    pub reveal_interval_ms: u64,
    /// Hover greeting, also handed to the chat as its opening line.
    pub greeting: String,
    /// Initial placement relative to the bottom-right corner.
    pub initial_inset: Inset,
    /// Modal title when no route matches.
    pub fallback_title: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            default_extent: DEFAULT_ELEMENT_EXTENT,
            drag_threshold: 5.0,
            click_cooldown_ms: 200,
            reveal_interval_ms: 35,
            greeting: DEFAULT_GREETING.to_owned(),
            initial_inset: Inset::default(),
            fallback_title: DEFAULT_TITLE.to_owned(),
        }
    }
}

impl WidgetConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.margin.is_finite() || self.margin < 0.0 {
            errors.push(format!("margin must be finite and >= 0, got {}", self.margin));
        }
        if !self.default_extent.is_finite() || self.default_extent <= 0.0 {
            errors.push(format!(
                "default_extent must be finite and > 0, got {}",
                self.default_extent
            ));
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            errors.push(format!(
                "drag_threshold must be finite and >= 0, got {}",
                self.drag_threshold
            ));
        }
        if self.reveal_interval_ms == 0 {
            errors.push("reveal_interval_ms must be > 0".into());
        }
        if !self.initial_inset.right.is_finite() || !self.initial_inset.bottom.is_finite() {
            errors.push("initial_inset must be finite".into());
        }

        errors
    }

    /// Return `self` if valid, or every validation error at once.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Gesture thresholds derived from this config.
    #[must_use]
    pub fn gesture(&self) -> GestureConfig {
        GestureConfig {
            drag_threshold: self.drag_threshold,
            click_cooldown: Duration::from_millis(self.click_cooldown_ms),
        }
    }

    /// Greeting reveal interval.
    #[must_use]
    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms)
    }

    /// Unclamped initial origin for a viewport.
    #[must_use]
    pub fn initial_position(&self, viewport: Size) -> Point {
        Point::new(
            viewport.width - self.initial_inset.right,
            viewport.height - self.initial_inset.bottom,
        )
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a widget configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(WidgetConfig::default().validate().is_empty());
    }

    #[test]
    fn default_matches_shipped_constants() {
        let c = WidgetConfig::default();
        let g = c.gesture();
        assert_eq!(g.drag_threshold, 5.0);
        assert_eq!(g.click_cooldown, Duration::from_millis(200));
        assert_eq!(c.reveal_interval(), Duration::from_millis(35));
        assert_eq!(c.fallback_title, "育小星");
    }

    #[test]
    fn initial_position_uses_inset() {
        let c = WidgetConfig::default();
        assert_eq!(
            c.initial_position(Size::new(1440.0, 900.0)),
            Point::new(1300.0, 750.0)
        );
    }

    #[test]
    fn invalid_values_are_all_reported() {
        let c = WidgetConfig {
            margin: -1.0,
            default_extent: 0.0,
            drag_threshold: f64::NAN,
            reveal_interval_ms: 0,
            ..WidgetConfig::default()
        };
        let errors = c.validate();
        assert_eq!(errors.len(), 4);
        let err = c.validated().expect_err("config is invalid");
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 4));
        assert!(err.to_string().starts_with("validation errors: margin"));
    }
}
