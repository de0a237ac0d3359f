// src/plan/context.rs

//! Per-invocation mutable state threaded through planning and execution.

use std::collections::BTreeSet;

use crate::interval::{CalendarType, ModelDate};

/// Mutable state for one (component, processing date) invocation.
///
/// Replaces the original system's process-wide accumulators: dependent
/// years and error counts live here and die with the invocation.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Start of the current processing period (t0).
    pub current_start: ModelDate,
    /// Inclusive end of the current processing period.
    pub current_end: ModelDate,
    /// Simulation start for this component (sim0).
    pub sim_start: ModelDate,
    /// Whether this is the first processing of the simulation.
    pub start_of_run: bool,
    /// Years whose units this invocation depends on.
    pub dependent_years: BTreeSet<i64>,
    /// Failures observed while executing this unit's own stages.
    pub errors_found: u32,
    /// How many of those failures were missing/incomplete raw input.
    pub history_errors: u32,
}

impl RunContext {
    /// Context for the one-year processing period starting at `t0`.
    pub fn for_period(t0: ModelDate, sim_start: ModelDate, cal: CalendarType) -> Self {
        Self {
            current_start: t0,
            current_end: t0.add_years(1, cal).prev_day(cal),
            sim_start,
            start_of_run: t0 == sim_start,
            dependent_years: BTreeSet::new(),
            errors_found: 0,
            history_errors: 0,
        }
    }

    pub fn record_error(&mut self) {
        self.errors_found += 1;
    }

    pub fn record_history_error(&mut self) {
        self.errors_found += 1;
        self.history_errors += 1;
    }
}
