// src/sched/mod.rs

//! Batch scheduler integration: submission requests, hold directives, and
//! the Slurm backend.

mod backend;
mod slurm;

pub use backend::{SchedulerBackend, SubmitRequest};
pub use slurm::SlurmScheduler;

/// Id of the job this process runs under, from the scheduler environment.
/// Falls back to `000000` when running outside the scheduler, so file
/// names built from it stay well-formed.
pub fn current_job_id() -> String {
    for var in ["SLURM_JOB_ID", "JOB_ID", "PBS_JOBID"] {
        if let Ok(id) = std::env::var(var) {
            let id = id.trim().to_string();
            if !id.is_empty() {
                return id;
            }
        }
    }
    "000000".to_string()
}
