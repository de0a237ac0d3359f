// src/component.rs

//! Domain model: components and their requested aggregated outputs.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::errors::{PpschedError, Result};
use crate::interval::{CalendarType, ChunkLength, ModelDate, TimeGrain};

/// Kind of aggregated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggKind {
    TimeSeries,
    TimeAverage,
}

impl AggKind {
    pub fn abbrev(&self) -> &'static str {
        match self {
            AggKind::TimeSeries => "TS",
            AggKind::TimeAverage => "AV",
        }
    }
}

/// Sampling frequency of the underlying diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Subhourly,
    Hourly,
    Daily,
    Monthly,
    Seasonal,
    Annual,
}

impl Frequency {
    pub fn grain(&self) -> TimeGrain {
        match self {
            Frequency::Subhourly => TimeGrain::Subhour,
            Frequency::Hourly => TimeGrain::Hour,
            Frequency::Daily => TimeGrain::Day,
            Frequency::Monthly => TimeGrain::Month,
            Frequency::Seasonal => TimeGrain::Season,
            Frequency::Annual => TimeGrain::Year,
        }
    }
}

impl FromStr for Frequency {
    type Err = PpschedError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        // Sub-hourly and multi-hourly diag streams ("30min", "6hr", ...)
        // all aggregate the same way.
        if s.ends_with("min") {
            return Ok(Frequency::Subhourly);
        }
        if s.ends_with("hr") {
            return Ok(Frequency::Hourly);
        }
        match s.to_lowercase().as_str() {
            "hourly" => Ok(Frequency::Hourly),
            "daily" | "day" => Ok(Frequency::Daily),
            "monthly" | "month" => Ok(Frequency::Monthly),
            "seasonal" => Ok(Frequency::Seasonal),
            "annual" => Ok(Frequency::Annual),
            other => Err(PpschedError::ConfigError(format!(
                "unknown output frequency '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Subhourly => "subhourly",
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
            Frequency::Monthly => "monthly",
            Frequency::Seasonal => "seasonal",
            Frequency::Annual => "annual",
        };
        f.write_str(s)
    }
}

/// One requested aggregated output of a component.
///
/// The chunk length stays a raw spec string here and is parsed at planning
/// time, so a malformed entry only poisons its own output, not its
/// siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpec {
    pub freq: Frequency,
    pub kind: AggKind,
    pub chunk: String,
}

impl ChunkSpec {
    pub fn new(freq: Frequency, kind: AggKind, chunk: impl Into<String>) -> Self {
        Self {
            freq,
            kind,
            chunk: chunk.into(),
        }
    }

    pub fn chunk_length(&self) -> Result<ChunkLength> {
        ChunkLength::parse(&self.chunk)
    }

    /// Stage name for this output inside one invocation, e.g. `annualTS_5yr`.
    pub fn stage_name(&self) -> String {
        format!("{}{}_{}", self.freq, self.kind.abbrev(), self.chunk)
    }
}

/// A named postprocessing component with its requested outputs.
///
/// Immutable for the duration of one invocation.
#[derive(Debug, Clone)]
pub struct Component {
    pub name: String,
    pub sim_start: ModelDate,
    pub calendar: CalendarType,
    pub outputs: Vec<ChunkSpec>,
}

impl Component {
    /// Chunk lengths (in months) of same-kind, same-frequency siblings of
    /// `spec`: the catalog of already-producible sub-chunks.
    ///
    /// Siblings with malformed chunk specs are skipped here; they fail on
    /// their own planning attempt.
    pub fn sibling_chunks(&self, spec: &ChunkSpec) -> Vec<u32> {
        self.outputs
            .iter()
            .filter(|o| o.kind == spec.kind && o.freq == spec.freq && o.chunk != spec.chunk)
            .filter_map(|o| match o.chunk_length() {
                Ok(cl) => Some(cl.in_months()),
                Err(_) => {
                    debug!(
                        component = %self.name,
                        chunk = %o.chunk,
                        "skipping malformed sibling chunk in sub-interval catalog"
                    );
                    None
                }
            })
            .collect()
    }
}
