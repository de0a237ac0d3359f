// src/plan/planner.rs

//! Aggregation readiness planning.

use std::collections::BTreeSet;

use tracing::{debug, error};

use crate::component::{ChunkSpec, Component};
use crate::errors::{PpschedError, Result};
use crate::interval::{
    best_sub_interval, decompose_into_subchunks, elapsed_years, is_due, SubPeriod,
};

use super::context::RunContext;

/// How a planned aggregation gets its input data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    /// Computed straight from raw history; no sub-dependencies.
    Direct,
    /// Combined from previously produced sub-chunks.
    FromSubchunks {
        sub_months: u32,
        sub_periods: Vec<SubPeriod>,
    },
}

/// One aggregation this invocation will compute.
#[derive(Debug, Clone)]
pub struct PlanResult {
    pub spec: ChunkSpec,
    pub period: SubPeriod,
    pub source: PlanSource,
}

impl PlanResult {
    /// Years of the (component, year) units this plan depends on.
    pub fn dep_years(&self) -> BTreeSet<i64> {
        match &self.source {
            PlanSource::Direct => BTreeSet::new(),
            PlanSource::FromSubchunks { sub_periods, .. } => {
                sub_periods.iter().map(|p| p.year()).collect()
            }
        }
    }
}

/// Outcome of planning one requested output.
#[derive(Debug, Clone)]
pub enum Plan {
    /// Not due this invocation. The normal "wait" outcome, not an error.
    Skip,
    Planned(PlanResult),
}

/// Decide whether `spec` is due at this invocation's date and how it
/// decomposes.
///
/// Pure apart from extending `ctx.dependent_years`; all I/O (state reads,
/// archive checks) happens later.
pub fn plan(component: &Component, spec: &ChunkSpec, ctx: &mut RunContext) -> Result<Plan> {
    let chunk = spec.chunk_length()?;
    let elapsed = elapsed_years(ctx.sim_start, ctx.current_end);

    if !is_due(&chunk, elapsed) {
        debug!(
            component = %component.name,
            output = %spec.stage_name(),
            elapsed,
            "not due yet; nothing to do"
        );
        return Ok(Plan::Skip);
    }

    let months = chunk.in_months();
    let period = SubPeriod::ending_at(ctx.current_end, months, component.calendar);
    let siblings = component.sibling_chunks(spec);

    let source = match best_sub_interval(months, &siblings) {
        None => {
            debug!(
                component = %component.name,
                output = %spec.stage_name(),
                "chunk={} subint=history", spec.chunk
            );
            PlanSource::Direct
        }
        Some(sub_months) => {
            debug!(
                component = %component.name,
                output = %spec.stage_name(),
                "chunk={} subint={}mo", spec.chunk, sub_months
            );
            let sub_periods =
                decompose_into_subchunks(months, sub_months, &period, component.calendar)?;
            PlanSource::FromSubchunks {
                sub_months,
                sub_periods,
            }
        }
    };

    let result = PlanResult {
        spec: spec.clone(),
        period,
        source,
    };
    ctx.dependent_years.extend(result.dep_years());
    Ok(Plan::Planned(result))
}

/// Plan every requested output of a component, in derivation order, so
/// that an output always comes after the sibling it is combined from.
///
/// A malformed chunk length fails only its own output: it is reported,
/// counted, and the siblings continue. If every output fails, planning for
/// the whole component is impossible and that is a hard error.
pub fn plan_component(component: &Component, ctx: &mut RunContext) -> Result<Vec<PlanResult>> {
    let order = super::derivation_order(component)?;
    let mut specs: Vec<&ChunkSpec> = Vec::with_capacity(component.outputs.len());
    for name in &order {
        if let Some(spec) = component.outputs.iter().find(|o| o.stage_name() == *name) {
            specs.push(spec);
        }
    }

    let mut planned = Vec::new();
    let mut failed = 0usize;

    for spec in specs {
        match plan(component, spec, ctx) {
            Ok(Plan::Skip) => {}
            Ok(Plan::Planned(result)) => planned.push(result),
            Err(err @ (PpschedError::MalformedInterval(_)
            | PpschedError::InvalidDecomposition { .. })) => {
                error!(
                    component = %component.name,
                    output = %spec.stage_name(),
                    %err,
                    "cannot plan this output; continuing with its siblings"
                );
                ctx.record_error();
                failed += 1;
            }
            Err(other) => return Err(other),
        }
    }

    if failed > 0 && failed == component.outputs.len() {
        return Err(PpschedError::ConfigError(format!(
            "no output of component '{}' has a usable chunk length",
            component.name
        )));
    }

    Ok(planned)
}
