// crates/test-utils/src/fakes.rs

//! Fake external collaborators: scheduler, archive, checkpoint signal and
//! aggregation executor, all scripted in-process.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use ppsched::archive::ArchiveCatalog;
use ppsched::checkpoint::CheckpointSignal;
use ppsched::errors::Result;
use ppsched::exec::{AggregationExecutor, ExecError, StageJob};
use ppsched::sched::{SchedulerBackend, SubmitRequest};
use ppsched::state::JobId;

/// In-memory scheduler. Assigns incrementing job ids starting at 1000 and
/// records every submission for inspection.
#[derive(Debug)]
pub struct FakeScheduler {
    next_id: u64,
    alive: HashSet<JobId>,
    pub submitted: Vec<SubmitRequest>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        FakeScheduler {
            next_id: 1000,
            alive: HashSet::new(),
            submitted: Vec::new(),
        }
    }

    /// Mark a job id as still active in queue.
    pub fn set_alive(&mut self, id: &str) {
        self.alive.insert(id.to_string());
    }

    pub fn last_submitted(&self) -> Option<&SubmitRequest> {
        self.submitted.last()
    }
}

impl Default for FakeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerBackend for FakeScheduler {
    fn submit(&mut self, request: &SubmitRequest) -> Result<JobId> {
        self.submitted.push(request.clone());
        let id = self.next_id.to_string();
        self.next_id += 1;
        // Submitted jobs are queued, hence alive.
        self.alive.insert(id.clone());
        Ok(id)
    }

    fn is_job_running(&self, id: &JobId) -> Result<bool> {
        Ok(self.alive.contains(id))
    }
}

/// Archive backed by a set of relative paths.
#[derive(Debug, Default)]
pub struct FakeArchive {
    present: HashSet<PathBuf>,
}

impl FakeArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<PathBuf>) {
        self.present.insert(path.into());
    }
}

impl ArchiveCatalog for FakeArchive {
    fn contains(&self, path: &Path) -> bool {
        self.present.contains(path)
    }
}

/// Checkpoint signal that fires after a fixed number of polls.
#[derive(Debug)]
pub struct FakeSignal {
    polls_before_firing: Cell<Option<u32>>,
}

impl FakeSignal {
    /// Never fires.
    pub fn quiet() -> Self {
        FakeSignal {
            polls_before_firing: Cell::new(None),
        }
    }

    /// Fires on the poll after `polls` unanswered ones.
    pub fn after(polls: u32) -> Self {
        FakeSignal {
            polls_before_firing: Cell::new(Some(polls)),
        }
    }
}

impl CheckpointSignal for FakeSignal {
    fn requested(&self, _host: &str, _job_id: &str) -> bool {
        match self.polls_before_firing.get() {
            None => false,
            Some(0) => true,
            Some(n) => {
                self.polls_before_firing.set(Some(n - 1));
                false
            }
        }
    }
}

/// How a scripted stage failure should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageFailure {
    /// Missing or incomplete raw history input.
    HistoryData,
    /// The aggregation tool itself failed.
    Tool,
}

/// Executor that records what it ran and fails stages on script.
#[derive(Debug, Default)]
pub struct FakeAggExecutor {
    failures: HashMap<String, StageFailure>,
    pub executed: Vec<StageJob>,
}

impl FakeAggExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_stage(&mut self, stage: &str, failure: StageFailure) {
        self.failures.insert(stage.to_string(), failure);
    }

    pub fn executed_stages(&self) -> Vec<&str> {
        self.executed.iter().map(|j| j.stage.as_str()).collect()
    }
}

impl AggregationExecutor for FakeAggExecutor {
    fn execute(&mut self, job: &StageJob) -> std::result::Result<(), ExecError> {
        self.executed.push(job.clone());
        match self.failures.get(&job.stage) {
            None => Ok(()),
            Some(StageFailure::HistoryData) => Err(ExecError::HistoryData(format!(
                "scripted history failure for {}",
                job.stage
            ))),
            Some(StageFailure::Tool) => {
                Err(ExecError::Tool(format!("scripted failure for {}", job.stage)))
            }
        }
    }
}
