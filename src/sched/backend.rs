// src/sched/backend.rs

//! The scheduler abstraction the resolver and engine run against.

use crate::errors::Result;
use crate::state::{JobId, JobUnit};

/// A request to (re)submit the invocation for one unit, held behind the
/// given in-flight jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub component: String,
    pub year: i64,
    /// Job ids the submission must wait for. Order is stable so the
    /// rendered directive is deterministic.
    pub holds: Vec<JobId>,
}

impl SubmitRequest {
    pub fn new(component: impl Into<String>, year: i64) -> Self {
        SubmitRequest {
            component: component.into(),
            year,
            holds: Vec::new(),
        }
    }

    pub fn with_holds(mut self, holds: Vec<JobId>) -> Self {
        self.holds = holds;
        self
    }

    pub fn unit(&self) -> JobUnit {
        JobUnit::new(self.component.clone(), self.year)
    }

    /// Dependency directive body, `afterok:<id>:<id>...`, or `None` when
    /// there is nothing to hold on.
    pub fn dependency_directive(&self) -> Option<String> {
        if self.holds.is_empty() {
            return None;
        }
        Some(format!("afterok:{}", self.holds.join(":")))
    }
}

/// What the engine needs from a batch scheduler.
pub trait SchedulerBackend {
    /// Submit the unit's invocation, returning the assigned job id.
    fn submit(&mut self, request: &SubmitRequest) -> Result<JobId>;

    /// Whether the job is still known to the scheduler (queued or running).
    fn is_job_running(&self, id: &JobId) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_joins_holds_with_colons() {
        let req = SubmitRequest::new("atmos_month", 1999)
            .with_holds(vec!["11".to_string(), "22".to_string()]);
        assert_eq!(req.dependency_directive().as_deref(), Some("afterok:11:22"));
    }

    #[test]
    fn no_holds_means_no_directive() {
        let req = SubmitRequest::new("atmos_month", 1999);
        assert_eq!(req.dependency_directive(), None);
    }
}
