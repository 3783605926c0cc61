//! Configuration for the reverse geocoder.
//!
//! Every field has a default, so a configuration can be loaded from a partial
//! JSON (or TOML, with the `toml` feature) document.

use crate::error::{GeocodeError, Result};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (IUGG).
pub const MEAN_EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// What to do when a record lands exactly on an already indexed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Store every record, coincident or not.
    #[default]
    Keep,
    /// Keep the first record and silently drop later coincident ones.
    Skip,
    /// Overwrite the stored record; its position in tie-break order is kept.
    Replace,
    /// Fail the insertion with [`GeocodeError::DuplicatePoint`].
    Reject,
}

/// Reverse geocoder configuration
///
/// # Example
///
/// ```rust
/// use revgeo::{Config, DuplicatePolicy};
///
/// let config = Config::default();
/// assert_eq!(config.duplicate_policy, DuplicatePolicy::Keep);
///
/// let json = r#"{
///     "duplicate_policy": "skip",
///     "strict_ranges": true
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.duplicate_policy, DuplicatePolicy::Skip);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Reject latitudes outside [-90, 90] and longitudes outside [-180, 180].
    /// Non-finite coordinates are always rejected.
    #[serde(default)]
    pub strict_ranges: bool,

    /// Sphere radius used to convert radii in meters to chord lengths.
    #[serde(default = "Config::default_earth_radius_meters")]
    pub earth_radius_meters: f64,
}

impl Config {
    const fn default_earth_radius_meters() -> f64 {
        MEAN_EARTH_RADIUS_METERS
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_strict_ranges(mut self, strict: bool) -> Self {
        self.strict_ranges = strict;
        self
    }

    pub fn with_earth_radius_meters(mut self, radius: f64) -> Self {
        self.earth_radius_meters = radius;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.earth_radius_meters.is_finite() || self.earth_radius_meters <= 0.0 {
            return Err(GeocodeError::InvalidConfig(format!(
                "earth radius must be finite and positive, got {}",
                self.earth_radius_meters
            )));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            strict_ranges: false,
            earth_radius_meters: Self::default_earth_radius_meters(),
        }
    }
}
