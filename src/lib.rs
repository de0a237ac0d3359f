// src/lib.rs

//! ppsched: temporal-aggregation planning and job scheduling for climate
//! model postprocessing.
//!
//! One invocation covers one (component, processing date) pair: it plans
//! which aggregated outputs are due, resolves their dependencies on prior
//! years through persisted job state, and either runs the due stages or
//! defers itself behind in-flight dependency jobs.

pub mod archive;
pub mod checkpoint;
pub mod cli;
pub mod component;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod interval;
pub mod logging;
pub mod plan;
pub mod resolve;
pub mod sched;
pub mod state;

use tracing::{info, warn};

use crate::archive::DirArchive;
use crate::checkpoint::{CheckpointSignal, FileMarkerSignal, NoCheckpoint};
use crate::cli::Args;
use crate::config::load_and_validate;
use crate::engine::{Invocation, InvocationOptions, InvocationOutcome};
use crate::errors::Result;
use crate::exec::{AggregationExecutor, CommandExecutor, LoggingExecutor};
use crate::interval::ModelDate;
use crate::sched::{SlurmScheduler, current_job_id};
use crate::state::{FileStateStore, JobState};

/// Everything finished or is safely parked with the scheduler.
pub const EXIT_OK: i32 = 0;
/// Something failed or blocks the unit.
pub const EXIT_FAILURE: i32 = 1;
/// Interrupted at a checkpoint; rerun to resume.
pub const EXIT_CHECKPOINT: i32 = 3;

/// Run one invocation as described by the CLI arguments. Returns the
/// process exit code.
pub fn run(args: &Args) -> Result<i32> {
    let config = load_and_validate(&args.config)?;
    let component = config.component(&args.component)?;
    let t0 = ModelDate::parse(&args.date)?;

    let experiment = config.experiment();
    let mut store = FileStateStore::new(&experiment.state_dir);
    let archive = DirArchive::new(&experiment.archive_dir);
    let mut scheduler = SlurmScheduler::new(submit_template(args));

    let signal: Box<dyn CheckpointSignal> = match &experiment.checkpoint_dir {
        Some(dir) => Box::new(FileMarkerSignal::new(dir)),
        None => Box::new(NoCheckpoint),
    };
    let mut executor: Box<dyn AggregationExecutor> = match &experiment.tool_command {
        Some(template) if !args.dry_run => Box::new(CommandExecutor::new(template.clone())),
        _ => Box::new(LoggingExecutor),
    };

    let mut invocation = Invocation {
        component: &component,
        store: &mut store,
        scheduler: &mut scheduler,
        archive: &archive,
        signal: signal.as_ref(),
        executor: executor.as_mut(),
        options: InvocationOptions {
            allow_submit: args.submit && !args.dry_run,
            force_redo: args.force_redo,
        },
        host: hostname(),
        job_id: current_job_id(),
    };

    let outcome = invocation.run(t0)?;
    Ok(exit_code(&outcome))
}

fn exit_code(outcome: &InvocationOutcome) -> i32 {
    match outcome {
        InvocationOutcome::AlreadyComplete
        | InvocationOutcome::BeforeStart
        | InvocationOutcome::NothingToDo
        | InvocationOutcome::StillRunning(_)
        | InvocationOutcome::Deferred { .. }
        | InvocationOutcome::Completed {
            state: JobState::Ok,
        } => EXIT_OK,
        InvocationOutcome::Interrupted { resume_at } => {
            info!(resume_at = %resume_at, "exiting for checkpoint");
            EXIT_CHECKPOINT
        }
        InvocationOutcome::FatalHalt | InvocationOutcome::Blocked => EXIT_FAILURE,
        InvocationOutcome::Completed { state } => {
            warn!(state = %state, "invocation finished with failures");
            EXIT_FAILURE
        }
    }
}

/// Command template a deferred or dependency submission re-runs. The
/// scheduler backend substitutes `{component}` and `{year}`.
fn submit_template(args: &Args) -> String {
    let exe = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "ppsched".to_string());
    let mut template = format!(
        "{exe} -c {} -C {{component}} -t {{year}}0101 --submit",
        args.config.display()
    );
    if args.force_redo {
        template.push_str(" --force-redo");
    }
    template
}

fn hostname() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string())
}
