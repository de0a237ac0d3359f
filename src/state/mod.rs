// src/state/mod.rs

//! Per-unit job state: the status machine and the stores that persist it.

mod job_state;
mod memory;
mod store;

use std::fmt;

pub use job_state::{JobState, final_state};
pub use memory::MemoryStateStore;
pub use store::{FileStateStore, StateStore};

/// Scheduler-assigned job identifier, opaque to us.
pub type JobId = String;

/// The unit of state tracking: one component for one model year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobUnit {
    pub component: String,
    pub year: i64,
}

impl JobUnit {
    pub fn new(component: impl Into<String>, year: i64) -> Self {
        JobUnit {
            component: component.into(),
            year,
        }
    }
}

impl fmt::Display for JobUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:04}", self.component, self.year)
    }
}
