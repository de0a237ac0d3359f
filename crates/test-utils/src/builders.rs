// crates/test-utils/src/builders.rs

//! Builders for the model types tests construct over and over.

use ppsched::component::{AggKind, ChunkSpec, Component, Frequency};
use ppsched::interval::{CalendarType, ModelDate};

/// Builds a `Component` with sensible defaults: simulation start at year
/// one, julian calendar, no outputs.
#[derive(Debug, Clone)]
pub struct ComponentBuilder {
    name: String,
    sim_start: ModelDate,
    calendar: CalendarType,
    outputs: Vec<ChunkSpec>,
}

impl ComponentBuilder {
    pub fn new(name: &str) -> Self {
        ComponentBuilder {
            name: name.to_string(),
            sim_start: ModelDate::new(1, 1, 1),
            calendar: CalendarType::Julian,
            outputs: Vec::new(),
        }
    }

    pub fn sim_start(mut self, year: i64) -> Self {
        self.sim_start = ModelDate::new(year, 1, 1);
        self
    }

    pub fn calendar(mut self, calendar: CalendarType) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn time_series(mut self, freq: Frequency, chunk: &str) -> Self {
        self.outputs
            .push(ChunkSpec::new(freq, AggKind::TimeSeries, chunk));
        self
    }

    pub fn time_average(mut self, freq: Frequency, chunk: &str) -> Self {
        self.outputs
            .push(ChunkSpec::new(freq, AggKind::TimeAverage, chunk));
        self
    }

    pub fn build(self) -> Component {
        Component {
            name: self.name,
            sim_start: self.sim_start,
            calendar: self.calendar,
            outputs: self.outputs,
        }
    }
}
