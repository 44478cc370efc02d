//! Error types for configuration and simulation setup.
//!
//! The tick-driven state machines never fail; only loading tunables and
//! choosing a scenario can.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MarbleError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config syntax: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Tunable `{field}` must be non-negative and finite, got {value}")]
    InvalidTunable { field: &'static str, value: f32 },

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

pub type Result<T> = std::result::Result<T, MarbleError>;
