// src/exec/backend.rs

//! The seam between the stage loop and whatever actually crunches data.

use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

use crate::interval::DecemberSource;
use crate::plan::PlanResult;

/// Failure of one aggregation stage. The distinction matters for what
/// state the invocation records afterwards: missing history stays
/// retryable once the data shows up.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("history data missing or incomplete: {0}")]
    HistoryData(String),
    #[error("aggregation tool failed: {0}")]
    Tool(String),
}

impl ExecError {
    pub fn is_history_data(&self) -> bool {
        matches!(self, ExecError::HistoryData(_))
    }
}

/// Everything an executor needs to run one aggregation stage.
#[derive(Debug, Clone)]
pub struct StageJob {
    pub stage: String,
    pub plan: PlanResult,
    /// Where the prior December comes from, for seasonal outputs only.
    pub december: Option<DecemberSource>,
}

impl StageJob {
    /// Canonical artifact label for the period, at the output's grain:
    /// e.g. `0001-0005` for a multi-year annual chunk, `000101-000512`
    /// for a monthly one.
    pub fn period_label(&self) -> String {
        let grain = self.plan.spec.freq.grain();
        format!(
            "{}-{}",
            grain.label(self.plan.period.start),
            grain.label(self.plan.period.end)
        )
    }
}

/// Runs one planned stage. Implementations wrap the site's aggregation
/// tooling; tests script failures through a fake.
pub trait AggregationExecutor {
    fn execute(&mut self, job: &StageJob) -> Result<(), ExecError>;
}

/// Executor that logs what it would run and succeeds. Backs dry runs.
#[derive(Debug, Default)]
pub struct LoggingExecutor;

impl AggregationExecutor for LoggingExecutor {
    fn execute(&mut self, job: &StageJob) -> Result<(), ExecError> {
        info!(
            stage = %job.stage,
            start = %job.plan.period.start,
            end = %job.plan.period.end,
            "would run aggregation"
        );
        Ok(())
    }
}

/// Executor that shells out to the site's aggregation tool.
///
/// The command template may use `{stage}`, `{start}`, `{end}` and
/// `{label}` placeholders. Exit status 2 is the tool's convention for
/// missing or incomplete history data; any other nonzero status is a tool
/// failure.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    template: String,
}

impl CommandExecutor {
    pub fn new(template: impl Into<String>) -> Self {
        CommandExecutor {
            template: template.into(),
        }
    }

    fn render(&self, job: &StageJob) -> String {
        self.template
            .replace("{stage}", &job.stage)
            .replace("{start}", &job.plan.period.start.to_string())
            .replace("{end}", &job.plan.period.end.to_string())
            .replace("{label}", &job.period_label())
    }
}

impl AggregationExecutor for CommandExecutor {
    fn execute(&mut self, job: &StageJob) -> Result<(), ExecError> {
        let command = self.render(job);
        debug!(stage = %job.stage, command = %command, "running aggregation tool");
        let output = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .output()
            .map_err(|e| ExecError::Tool(format!("failed to spawn '{command}': {e}")))?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        match output.status.code() {
            Some(2) => Err(ExecError::HistoryData(stderr)),
            code => Err(ExecError::Tool(format!(
                "'{command}' exited with {code:?}: {stderr}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{AggKind, ChunkSpec, Frequency};
    use crate::interval::{CalendarType, ModelDate, SubPeriod};
    use crate::plan::PlanSource;

    fn job() -> StageJob {
        StageJob {
            stage: "annualTS_5yr".to_string(),
            plan: PlanResult {
                spec: ChunkSpec::new(Frequency::Annual, AggKind::TimeSeries, "5yr"),
                period: SubPeriod::ending_at(
                    ModelDate::new(1999, 12, 31),
                    60,
                    CalendarType::Julian,
                ),
                source: PlanSource::Direct,
            },
            december: None,
        }
    }

    #[test]
    fn command_placeholders_render() {
        let exec = CommandExecutor::new("pp-tool {stage} {start} {end} {label}");
        assert_eq!(
            exec.render(&job()),
            "pp-tool annualTS_5yr 1995-01-01 1999-12-31 1995-1999"
        );
    }

    #[test]
    fn exit_code_two_is_a_history_data_error() {
        let mut exec = CommandExecutor::new("exit 2");
        assert!(matches!(
            exec.execute(&job()),
            Err(ExecError::HistoryData(_))
        ));
    }

    #[test]
    fn other_failures_are_tool_errors() {
        let mut exec = CommandExecutor::new("exit 1");
        assert!(matches!(exec.execute(&job()), Err(ExecError::Tool(_))));
        assert!(CommandExecutor::new("true").execute(&job()).is_ok());
    }
}
