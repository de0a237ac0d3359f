// src/config/loader.rs

//! Reading experiment files off disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::Result;

use super::model::{ConfigFile, RawConfigFile};

pub fn default_config_path() -> PathBuf {
    PathBuf::from("Experiment.toml")
}

pub fn load_from_path(path: &Path) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path)?;
    let raw = toml::from_str(&contents)?;
    Ok(raw)
}

pub fn load_and_validate(path: &Path) -> Result<ConfigFile> {
    info!(path = %path.display(), "loading experiment config");
    let raw = load_from_path(path)?;
    raw.try_into()
}
