// src/config/model.rs

//! Configuration schema.
//!
//! `RawConfigFile` mirrors the TOML exactly; `ConfigFile` is the same data
//! after validation, obtained through `TryFrom`. Code past the loader only
//! ever sees `ConfigFile`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::component::{AggKind, ChunkSpec, Component, Frequency};
use crate::errors::{PpschedError, Result};
use crate::interval::{CalendarType, ModelDate};

/// Deserialized form of an experiment file, unvalidated.
///
/// ```toml
/// [experiment]
/// name = "ESM4_historical"
/// state_dir = "/work/state"
/// archive_dir = "/archive/ESM4_historical"
/// base_date = "00010101"
/// calendar = "noleap"
///
/// [component.atmos_month]
/// time_series = [
///     { freq = "monthly", chunk = "1yr" },
///     { freq = "monthly", chunk = "5yr" },
/// ]
/// time_average = [{ freq = "annual", chunk = "5yr" }]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    pub experiment: ExperimentSection,
    #[serde(default)]
    pub component: BTreeMap<String, ComponentSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentSection {
    pub name: String,
    pub state_dir: PathBuf,
    pub archive_dir: PathBuf,
    /// Directory polled for checkpoint marker files. Checkpointing is off
    /// when unset.
    pub checkpoint_dir: Option<PathBuf>,
    /// Simulation start date, `yyyymmdd` or a bare year.
    pub base_date: String,
    /// Defaults to `julian`.
    pub calendar: Option<String>,
    /// Aggregation tool command template with `{stage}`, `{start}` and
    /// `{end}` placeholders. Stages only log when unset.
    pub tool_command: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentSection {
    /// Per-component simulation start, overriding the experiment base date.
    pub start: Option<String>,
    /// Per-component calendar override.
    pub calendar: Option<String>,
    #[serde(default)]
    pub time_series: Vec<OutputSection>,
    #[serde(default)]
    pub time_average: Vec<OutputSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub freq: String,
    pub chunk: String,
}

/// A validated configuration. Construct via `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    raw: RawConfigFile,
    sim_start: ModelDate,
    calendar: CalendarType,
}

impl ConfigFile {
    /// Wrap without validation. Validation lives in `TryFrom` so this is
    /// only for construction after the checks have passed.
    pub(super) fn new_unchecked(
        raw: RawConfigFile,
        sim_start: ModelDate,
        calendar: CalendarType,
    ) -> Self {
        ConfigFile {
            raw,
            sim_start,
            calendar,
        }
    }

    pub fn experiment(&self) -> &ExperimentSection {
        &self.raw.experiment
    }

    pub fn sim_start(&self) -> ModelDate {
        self.sim_start
    }

    pub fn calendar(&self) -> CalendarType {
        self.calendar
    }

    /// Materialize the configured components.
    pub fn components(&self) -> Result<Vec<Component>> {
        self.raw
            .component
            .iter()
            .map(|(name, section)| self.build_component(name, section))
            .collect()
    }

    /// Look up a single component by name.
    pub fn component(&self, name: &str) -> Result<Component> {
        let section = self.raw.component.get(name).ok_or_else(|| {
            PpschedError::ConfigError(format!("no such component: {name}"))
        })?;
        self.build_component(name, section)
    }

    fn build_component(&self, name: &str, section: &ComponentSection) -> Result<Component> {
        let sim_start = match &section.start {
            Some(s) => ModelDate::parse(s)?,
            None => self.sim_start,
        };
        let calendar = match &section.calendar {
            Some(c) => parse_calendar(c)?,
            None => self.calendar,
        };

        let mut outputs = Vec::new();
        for out in &section.time_series {
            outputs.push(parse_output(name, out, AggKind::TimeSeries)?);
        }
        for out in &section.time_average {
            outputs.push(parse_output(name, out, AggKind::TimeAverage)?);
        }

        Ok(Component {
            name: name.to_string(),
            sim_start,
            calendar,
            outputs,
        })
    }
}

pub(super) fn parse_calendar(s: &str) -> Result<CalendarType> {
    s.parse()
        .map_err(|e: PpschedError| PpschedError::ConfigError(e.to_string()))
}

fn parse_output(component: &str, out: &OutputSection, kind: AggKind) -> Result<ChunkSpec> {
    let freq: Frequency = out.freq.parse().map_err(|e: PpschedError| {
        PpschedError::ConfigError(format!("component {component}: {e}"))
    })?;
    // The chunk string stays unparsed in the ChunkSpec; the planner
    // validates it per-output at run time.
    Ok(ChunkSpec::new(freq, kind, out.chunk.clone()))
}
