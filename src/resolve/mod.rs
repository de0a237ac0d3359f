// src/resolve/mod.rs

//! Dependency resolution: walking the years a unit's plans depend on and
//! deciding, per year, whether the dependency is satisfied, needs a
//! (re)submission, or blocks the unit outright.

use std::collections::BTreeSet;

use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::sched::{SchedulerBackend, SubmitRequest};
use crate::state::{JobId, JobState, JobUnit, StateStore};

/// Knobs for a resolution pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Whether missing or failed dependencies may be submitted. Off for
    /// dry runs and unscheduled (interactive) invocations.
    pub allow_submit: bool,
    /// Redo dependencies even when their state is `OK`.
    pub force_redo: bool,
}

/// What a resolution pass found.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Job ids the unit's own submission must hold behind.
    pub hold_set: BTreeSet<JobId>,
    /// Years that block the unit but could not be submitted.
    pub unresolved_blocking: Vec<i64>,
    /// A dependency is `FATAL`; the unit cannot proceed until an operator
    /// clears its record.
    pub fatal_encountered: bool,
}

impl ResolutionOutcome {
    /// The unit may run now: nothing blocks it and nothing is in flight.
    pub fn is_clear(&self) -> bool {
        self.hold_set.is_empty() && self.unresolved_blocking.is_empty() && !self.fatal_encountered
    }
}

fn submit_dependency(
    unit: &JobUnit,
    store: &mut dyn StateStore,
    scheduler: &mut dyn SchedulerBackend,
    outcome: &mut ResolutionOutcome,
) -> Result<()> {
    let request = SubmitRequest::new(unit.component.clone(), unit.year);
    let id = scheduler.submit(&request)?;
    store.write(unit, &JobState::Running(id.clone()))?;
    info!(unit = %unit, job_id = %id, "submitted dependency");
    outcome.hold_set.insert(id);
    Ok(())
}

/// Resolve one dependency year for `component`. Submissions record the
/// new job id before returning, so a concurrent resolver sees the unit as
/// in flight rather than absent.
fn resolve_year(
    component: &str,
    year: i64,
    opts: ResolveOptions,
    self_job: Option<&JobId>,
    store: &mut dyn StateStore,
    scheduler: &mut dyn SchedulerBackend,
    outcome: &mut ResolutionOutcome,
) -> Result<()> {
    let unit = JobUnit::new(component, year);
    let state = store.read(&unit)?;

    match state {
        None => {
            if opts.allow_submit {
                debug!(unit = %unit, "dependency absent, submitting");
                submit_dependency(&unit, store, scheduler, outcome)?;
            } else {
                warn!(unit = %unit, "dependency absent and submission disabled");
                outcome.unresolved_blocking.push(year);
            }
        }
        Some(JobState::Ok) => {
            if opts.force_redo {
                if opts.allow_submit {
                    info!(unit = %unit, "dependency complete, redoing on request");
                    submit_dependency(&unit, store, scheduler, outcome)?;
                } else {
                    outcome.unresolved_blocking.push(year);
                }
            } else {
                debug!(unit = %unit, "dependency satisfied");
            }
        }
        Some(state @ (JobState::Error | JobState::Interactive | JobState::HistoryDataError)) => {
            if opts.allow_submit {
                info!(unit = %unit, state = %state, "dependency failed, resubmitting");
                submit_dependency(&unit, store, scheduler, outcome)?;
            } else {
                warn!(unit = %unit, state = %state, "dependency failed and submission disabled");
                outcome.unresolved_blocking.push(year);
            }
        }
        Some(JobState::Fatal) => {
            error!(
                unit = %unit,
                "dependency is FATAL after repeated failures; delete its state record to retry"
            );
            outcome.fatal_encountered = true;
        }
        Some(JobState::Running(id)) => {
            if Some(&id) == self_job {
                // The record names this very invocation: the year's own
                // stages run here, earlier in derivation order.
                debug!(unit = %unit, "dependency is produced by this invocation");
            } else if scheduler.is_job_running(&id)? {
                debug!(unit = %unit, job_id = %id, "dependency in flight, holding");
                outcome.hold_set.insert(id);
            } else if opts.allow_submit {
                // The record says running but the scheduler has no such
                // job: it died without writing a state. Resubmit.
                warn!(unit = %unit, job_id = %id, "recorded job is gone, resubmitting");
                submit_dependency(&unit, store, scheduler, outcome)?;
            } else {
                warn!(unit = %unit, job_id = %id, "recorded job is gone and submission disabled");
                outcome.unresolved_blocking.push(year);
            }
        }
    }
    Ok(())
}

/// Resolve every dependency year for a unit, in ascending year order.
///
/// `self_job` is the job id the caller itself runs under: a dependency
/// recorded as running under that id is this invocation's own earlier
/// stage, not something to hold on.
///
/// A `FATAL` dependency stops the walk immediately: later submissions
/// would be wasted since the unit cannot run until the record is cleared.
pub fn resolve(
    component: &str,
    dep_years: &BTreeSet<i64>,
    opts: ResolveOptions,
    self_job: Option<&JobId>,
    store: &mut dyn StateStore,
    scheduler: &mut dyn SchedulerBackend,
) -> Result<ResolutionOutcome> {
    let mut outcome = ResolutionOutcome::default();
    for &year in dep_years {
        resolve_year(component, year, opts, self_job, store, scheduler, &mut outcome)?;
        if outcome.fatal_encountered {
            break;
        }
    }
    Ok(outcome)
}
