//! Error types for the reverse geocoder.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeocodeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// Coordinate cannot be projected (non-finite, or out of range in strict mode).
    #[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: String,
    },

    #[error("radius must be a number, got {0}")]
    InvalidRadius(f64),

    /// A coincident point is already indexed and the duplicate policy is `Reject`.
    #[error("a point already exists at ({latitude}, {longitude})")]
    DuplicatePoint { latitude: f64, longitude: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// Worker task behind an asynchronous entry point failed to complete.
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for GeocodeError {
    fn from(err: serde_json::Error) -> Self {
        GeocodeError::Serialization(err.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for GeocodeError {
    fn from(err: toml::de::Error) -> Self {
        GeocodeError::Serialization(err.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::ser::Error> for GeocodeError {
    fn from(err: toml::ser::Error) -> Self {
        GeocodeError::Serialization(err.to_string())
    }
}

#[cfg(feature = "async")]
impl From<tokio::task::JoinError> for GeocodeError {
    fn from(err: tokio::task::JoinError) -> Self {
        GeocodeError::Task(err.to_string())
    }
}
