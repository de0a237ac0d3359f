// src/engine/invocation.rs

//! One run of the engine for a (component, processing date) pair.

use tracing::{debug, error, info, warn};

use crate::archive::{ArchiveCatalog, december_artifact};
use crate::checkpoint::{CheckpointController, CheckpointSignal, StageGate};
use crate::component::{Component, Frequency};
use crate::errors::Result;
use crate::exec::{AggregationExecutor, StageJob};
use crate::interval::{DecemberSource, ModelDate, prior_december};
use crate::plan::{PlanResult, RunContext, plan_component};
use crate::resolve::{ResolveOptions, resolve};
use crate::sched::{SchedulerBackend, SubmitRequest};
use crate::state::{JobId, JobState, JobUnit, StateStore, final_state};

use super::stages::build_stages;

#[derive(Debug, Clone, Copy, Default)]
pub struct InvocationOptions {
    /// Whether this invocation may submit batch jobs (itself or its
    /// dependencies).
    pub allow_submit: bool,
    /// Redo the unit and its dependencies even where state says `OK`.
    pub force_redo: bool,
}

/// How one invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// State already says `OK` and no redo was requested.
    AlreadyComplete,
    /// This unit or a dependency is `FATAL`; operator must clear the record.
    FatalHalt,
    /// Another job is already executing this unit.
    StillRunning(JobId),
    /// Processing date precedes the simulation start.
    BeforeStart,
    /// No requested output is due at this date.
    NothingToDo,
    /// Dependencies block the unit and could not be submitted.
    Blocked,
    /// Dependencies are in flight; the unit was resubmitted behind them.
    Deferred { job: JobId, holds: Vec<JobId> },
    /// A checkpoint was requested; resume marker written.
    Interrupted { resume_at: String },
    /// Stages ran to completion; this state was written back.
    Completed { state: JobState },
}

/// Wires the component, its collaborators, and the invocation options
/// together for one `run`.
pub struct Invocation<'a> {
    pub component: &'a Component,
    pub store: &'a mut dyn StateStore,
    pub scheduler: &'a mut dyn SchedulerBackend,
    pub archive: &'a dyn ArchiveCatalog,
    pub signal: &'a dyn CheckpointSignal,
    pub executor: &'a mut dyn AggregationExecutor,
    pub options: InvocationOptions,
    pub host: String,
    pub job_id: String,
}

impl Invocation<'_> {
    pub fn run(&mut self, t0: ModelDate) -> Result<InvocationOutcome> {
        let component = self.component;
        if t0 < component.sim_start {
            warn!(
                component = %component.name,
                date = %t0,
                sim_start = %component.sim_start,
                "processing date precedes simulation start"
            );
            return Ok(InvocationOutcome::BeforeStart);
        }

        let unit = JobUnit::new(component.name.clone(), t0.year);
        let prev_state = self.store.read(&unit)?;
        match &prev_state {
            Some(JobState::Ok) if !self.options.force_redo => {
                info!(unit = %unit, "already complete");
                return Ok(InvocationOutcome::AlreadyComplete);
            }
            Some(JobState::Fatal) => {
                error!(
                    unit = %unit,
                    "unit is FATAL after repeated failures; delete its state record to retry"
                );
                return Ok(InvocationOutcome::FatalHalt);
            }
            Some(JobState::Running(id)) if *id != self.job_id => {
                if self.scheduler.is_job_running(id)? {
                    info!(unit = %unit, job_id = %id, "another job is already running this unit");
                    return Ok(InvocationOutcome::StillRunning(id.clone()));
                }
                warn!(unit = %unit, job_id = %id, "recorded job is gone, taking over");
            }
            _ => {}
        }

        let mut ctx = RunContext::for_period(t0, component.sim_start, component.calendar);
        let plans = plan_component(component, &mut ctx)?;
        if plans.is_empty() {
            info!(unit = %unit, "no output due at this date");
            return Ok(InvocationOutcome::NothingToDo);
        }

        let resolve_opts = ResolveOptions {
            allow_submit: self.options.allow_submit,
            force_redo: self.options.force_redo,
        };
        let outcome = resolve(
            &component.name,
            &ctx.dependent_years,
            resolve_opts,
            Some(&self.job_id),
            self.store,
            self.scheduler,
        )?;
        if outcome.fatal_encountered {
            return Ok(InvocationOutcome::FatalHalt);
        }
        if !outcome.unresolved_blocking.is_empty() {
            warn!(
                unit = %unit,
                years = ?outcome.unresolved_blocking,
                "blocked on unresolved dependencies"
            );
            return Ok(InvocationOutcome::Blocked);
        }
        if !outcome.hold_set.is_empty() {
            if !self.options.allow_submit {
                warn!(unit = %unit, "dependencies in flight and submission disabled");
                return Ok(InvocationOutcome::Blocked);
            }
            let holds: Vec<JobId> = outcome.hold_set.iter().cloned().collect();
            let request =
                SubmitRequest::new(component.name.clone(), t0.year).with_holds(holds.clone());
            let id = self.scheduler.submit(&request)?;
            self.store.write(&unit, &JobState::Running(id.clone()))?;
            info!(unit = %unit, job_id = %id, holds = ?holds, "deferred behind dependencies");
            return Ok(InvocationOutcome::Deferred { job: id, holds });
        }

        self.execute_stages(&unit, &plans, &mut ctx, prev_state)
    }

    fn execute_stages(
        &mut self,
        unit: &JobUnit,
        plans: &[PlanResult],
        ctx: &mut RunContext,
        prev_state: Option<JobState>,
    ) -> Result<InvocationOutcome> {
        let stages = build_stages(plans);
        let resume_from = self.store.read_resume(unit)?;
        let mut controller = CheckpointController::new(stages, resume_from.as_deref());

        loop {
            match controller.next(self.signal, &self.host, &self.job_id) {
                StageGate::Run { index } => {
                    let stage = controller.stage(index).clone();
                    if stage.preparatory {
                        debug!(unit = %unit, stage = %stage.name, "staging static files");
                        continue;
                    }
                    let plan = &plans[stage.plan_index.expect("aggregation stage has a plan")];
                    let job = StageJob {
                        stage: stage.name.clone(),
                        plan: plan.clone(),
                        december: self.december_source(plan, ctx),
                    };
                    info!(unit = %unit, stage = %stage.name, "running stage");
                    if let Err(e) = self.executor.execute(&job) {
                        error!(unit = %unit, stage = %stage.name, error = %e, "stage failed");
                        if e.is_history_data() {
                            ctx.record_history_error();
                        } else {
                            ctx.record_error();
                        }
                    }
                }
                StageGate::Interrupt { resume_at } => {
                    self.store.write_resume(unit, &resume_at)?;
                    info!(unit = %unit, resume_at = %resume_at, "interrupted at checkpoint");
                    return Ok(InvocationOutcome::Interrupted { resume_at });
                }
                StageGate::Done => break,
            }
        }

        if !controller.did_work() {
            info!(unit = %unit, "no aggregation stage ran");
            return Ok(InvocationOutcome::NothingToDo);
        }

        let state = final_state(ctx.errors_found, ctx.history_errors, prev_state.as_ref());
        self.store.clear_resume(unit)?;
        self.store.write(unit, &state)?;
        info!(unit = %unit, state = %state, "invocation complete");
        Ok(InvocationOutcome::Completed { state })
    }

    /// Prior-December source for seasonal plans; `None` otherwise.
    fn december_source(&self, plan: &PlanResult, ctx: &RunContext) -> Option<DecemberSource> {
        if plan.spec.freq != Frequency::Seasonal {
            return None;
        }
        let artifact = december_artifact(&self.component.name, plan.period.start.year - 1);
        Some(prior_december(
            ctx.start_of_run,
            plan.period.start,
            self.component.calendar,
            self.archive.contains(&artifact),
        ))
    }
}
