// src/config/mod.rs

//! Experiment configuration: TOML schema, validation, loading.

mod loader;
mod model;
mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    ComponentSection, ConfigFile, ExperimentSection, OutputSection, RawConfigFile,
};
