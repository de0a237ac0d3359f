// src/checkpoint/controller.rs

//! Drives an invocation's stage loop: skipping already-done stages on
//! resume and stopping cleanly when a checkpoint is requested.

use tracing::{info, warn};

use super::signal::CheckpointSignal;

/// One unit of interruptible work inside an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Stable name, recorded in resume markers. Aggregation stages use
    /// the `<frequency><kind>_<chunk>` form, e.g. `annualTS_5yr`.
    pub name: String,
    /// Preparatory stages (static file staging) run even on resume but
    /// never count as aggregation work.
    pub preparatory: bool,
    /// Index into the invocation's plan list, for aggregation stages.
    pub plan_index: Option<usize>,
}

impl Stage {
    pub fn preparatory(name: impl Into<String>) -> Self {
        Stage {
            name: name.into(),
            preparatory: true,
            plan_index: None,
        }
    }

    pub fn aggregation(name: impl Into<String>, plan_index: usize) -> Self {
        Stage {
            name: name.into(),
            preparatory: false,
            plan_index: Some(plan_index),
        }
    }
}

/// What the stage loop should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageGate {
    /// Run the stage at this index.
    Run { index: usize },
    /// Stop now; record this stage name so the next invocation picks up
    /// here.
    Interrupt { resume_at: String },
    /// All stages consumed.
    Done,
}

/// Walks the stage list in order. On resume, all stages ordinally before
/// the resume point are skipped. Between stages the signal is polled; a
/// request interrupts before the next unstarted stage.
pub struct CheckpointController {
    stages: Vec<Stage>,
    next: usize,
    resume_index: usize,
    ran_aggregation: bool,
}

impl CheckpointController {
    pub fn new(stages: Vec<Stage>, resume_from: Option<&str>) -> Self {
        let resume_index = match resume_from {
            None => 0,
            Some(name) => match stages.iter().position(|s| s.name == name) {
                Some(idx) => {
                    info!(stage = name, "resuming from checkpoint");
                    idx
                }
                None => {
                    // Stale marker from an older stage list. Running from
                    // the start is safe since stages are idempotent.
                    warn!(stage = name, "resume stage not found, running all stages");
                    0
                }
            },
        };
        CheckpointController {
            stages,
            next: 0,
            resume_index,
            ran_aggregation: false,
        }
    }

    pub fn stage(&self, index: usize) -> &Stage {
        &self.stages[index]
    }

    /// Whether any aggregation stage actually ran this invocation.
    pub fn did_work(&self) -> bool {
        self.ran_aggregation
    }

    pub fn next(&mut self, signal: &dyn CheckpointSignal, host: &str, job_id: &str) -> StageGate {
        loop {
            if self.next >= self.stages.len() {
                return StageGate::Done;
            }
            let index = self.next;
            let stage = &self.stages[index];

            // Skipped-on-resume stages consume no checkpoint poll.
            if index < self.resume_index {
                info!(stage = %stage.name, "skipping completed stage");
                self.next += 1;
                continue;
            }

            if signal.requested(host, job_id) {
                info!(stage = %stage.name, "checkpoint requested, stopping before stage");
                return StageGate::Interrupt {
                    resume_at: stage.name.clone(),
                };
            }

            self.next += 1;
            if !stage.preparatory {
                self.ran_aggregation = true;
            }
            return StageGate::Run { index };
        }
    }
}
