// src/sched/slurm.rs

//! Slurm backend: submits via `sbatch` and checks liveness via `squeue`.

use std::process::Command;

use regex::Regex;
use tracing::{debug, info};

use crate::errors::{PpschedError, Result};
use crate::state::JobId;

use super::backend::{SchedulerBackend, SubmitRequest};

/// Submits re-invocations of this binary through `sbatch --wrap`.
pub struct SlurmScheduler {
    /// Command line to re-run for a unit, with `{component}` and `{year}`
    /// placeholders. Typically the current binary plus its config flags.
    command_template: String,
    job_id_re: Regex,
}

impl SlurmScheduler {
    pub fn new(command_template: impl Into<String>) -> Self {
        SlurmScheduler {
            command_template: command_template.into(),
            // sbatch prints "Submitted batch job <id>" as its last line.
            job_id_re: Regex::new(r"Submitted batch job (\d+)").expect("static regex"),
        }
    }

    fn render_command(&self, request: &SubmitRequest) -> String {
        self.command_template
            .replace("{component}", &request.component)
            .replace("{year}", &format!("{:04}", request.year))
    }

    fn parse_submit_output(&self, stdout: &str) -> Result<JobId> {
        let last = stdout.lines().rev().find(|l| !l.trim().is_empty());
        last.and_then(|line| self.job_id_re.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                PpschedError::Scheduler(format!(
                    "could not find a job id in sbatch output: {stdout:?}"
                ))
            })
    }
}

impl SchedulerBackend for SlurmScheduler {
    fn submit(&mut self, request: &SubmitRequest) -> Result<JobId> {
        let wrapped = self.render_command(request);
        let job_name = request.unit().to_string();

        let mut cmd = Command::new("sbatch");
        cmd.arg(format!("--job-name={job_name}"));
        if let Some(directive) = request.dependency_directive() {
            cmd.arg(format!("--dependency={directive}"));
        }
        cmd.arg(format!("--wrap={wrapped}"));

        debug!(unit = %job_name, "running sbatch");
        let output = cmd
            .output()
            .map_err(|e| PpschedError::Scheduler(format!("failed to run sbatch: {e}")))?;
        if !output.status.success() {
            return Err(PpschedError::Scheduler(format!(
                "sbatch failed for {job_name}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let id = self.parse_submit_output(&stdout)?;
        info!(unit = %job_name, job_id = %id, "submitted");
        Ok(id)
    }

    fn is_job_running(&self, id: &JobId) -> Result<bool> {
        let output = Command::new("squeue")
            .args(["-h", "-j", id])
            .output()
            .map_err(|e| PpschedError::Scheduler(format!("failed to run squeue: {e}")))?;
        // squeue exits nonzero for unknown (finished, purged) job ids;
        // treat that the same as empty output.
        if !output.status.success() {
            return Ok(false);
        }
        Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_job_id_from_last_line() {
        let sched = SlurmScheduler::new("ppsched --component={component} --date={year}");
        let id = sched
            .parse_submit_output("some banner\nSubmitted batch job 8675309\n")
            .unwrap();
        assert_eq!(id, "8675309");
    }

    #[test]
    fn rejects_output_without_an_id() {
        let sched = SlurmScheduler::new("ppsched");
        assert!(sched.parse_submit_output("sbatch: error\n").is_err());
    }

    #[test]
    fn renders_placeholders() {
        let sched = SlurmScheduler::new("ppsched -c cfg.toml -C {component} -t {year}0101");
        let req = SubmitRequest::new("atmos_month", 42);
        assert_eq!(
            sched.render_command(&req),
            "ppsched -c cfg.toml -C atmos_month -t 00420101"
        );
    }
}
