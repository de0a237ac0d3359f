// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PpschedError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Malformed chunk length '{0}': must be whole years ('5yr') or whole months ('6mo')")]
    MalformedInterval(String),

    #[error("Cannot decompose a {requested}-month aggregation into {sub}-month sub-chunks")]
    InvalidDecomposition { requested: u32, sub: u32 },

    #[error("State record for {unit} is corrupt: {reason}")]
    StateCorrupt { unit: String, reason: String },

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PpschedError>;
