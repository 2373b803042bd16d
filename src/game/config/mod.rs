//! Config Module
//!
//! Placement settings and the error type shared by every JSON-backed
//! configuration file (settings and rule tables).

pub mod placement_config;

pub use placement_config::{FloorLevel, PlacementConfig};

/// Failure loading or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
