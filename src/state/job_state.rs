// src/state/job_state.rs

//! Persisted per-(component, year) job status and its transition rules.

use std::fmt;

use super::JobId;

/// Status of a job unit as persisted in its state record.
///
/// The wire form is a single token: one of the status words below, or a
/// bare scheduler job id for an in-flight job. A unit with no record at
/// all is implicitly absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Unit completed cleanly.
    Ok,
    /// Unit failed once; eligible for one automatic retry.
    Error,
    /// Failed twice or unrecoverable. Terminal: only deleting the record
    /// clears it.
    Fatal,
    /// Partially run outside the scheduler; needs a proper resubmission.
    Interactive,
    /// Failed because raw history input was missing or incomplete.
    HistoryDataError,
    /// A job is in flight under this scheduler id.
    Running(JobId),
}

impl JobState {
    /// Parse the one-token wire form. `None` for an empty token (a corrupt
    /// record, handled by the store).
    pub fn from_token(token: &str) -> Option<JobState> {
        let t = token.trim();
        if t.is_empty() {
            return None;
        }
        Some(match t {
            "OK" => JobState::Ok,
            "ERROR" => JobState::Error,
            "FATAL" => JobState::Fatal,
            "INTERACTIVE" => JobState::Interactive,
            "HISTORYDATAERROR" => JobState::HistoryDataError,
            id => JobState::Running(id.to_string()),
        })
    }

    pub fn token(&self) -> String {
        match self {
            JobState::Ok => "OK".to_string(),
            JobState::Error => "ERROR".to_string(),
            JobState::Fatal => "FATAL".to_string(),
            JobState::Interactive => "INTERACTIVE".to_string(),
            JobState::HistoryDataError => "HISTORYDATAERROR".to_string(),
            JobState::Running(id) => id.clone(),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// End-of-execution write rule for a unit's own invocation.
///
/// No errors writes `OK`. A failure on top of a previous `ERROR` escalates
/// to `FATAL`, capping automatic retries at two attempts. Failures that
/// were all missing-history failures record `HISTORYDATAERROR` instead so
/// they stay retryable once the data arrives.
pub fn final_state(errors_found: u32, history_errors: u32, prev: Option<&JobState>) -> JobState {
    if errors_found == 0 {
        JobState::Ok
    } else if prev == Some(&JobState::Error) {
        JobState::Fatal
    } else if history_errors == errors_found {
        JobState::HistoryDataError
    } else {
        JobState::Error
    }
}
