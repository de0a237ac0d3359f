// src/cli.rs

//! Command line interface for `ppsched`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Postprocessing scheduler: plans temporal aggregations for one
/// component at one processing date and drives their batch jobs.
#[derive(Debug, Parser)]
#[command(name = "ppsched", version, about)]
pub struct Args {
    /// Experiment configuration file.
    #[arg(short, long, default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Component to process.
    #[arg(short = 'C', long)]
    pub component: String,

    /// Start of the processing period, yyyymmdd or a bare year.
    #[arg(short = 't', long)]
    pub date: String,

    /// Allow submitting batch jobs (self and dependencies). Without this
    /// flag unresolved dependencies only warn.
    #[arg(short, long)]
    pub submit: bool,

    /// Redo aggregations even where state says OK.
    #[arg(long)]
    pub force_redo: bool,

    /// Plan and resolve only; log what would run, execute nothing.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Log verbosity. Falls back to PPSCHED_LOG, then info.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_usual_invocation() {
        let args = Args::parse_from([
            "ppsched",
            "-c",
            "exp.toml",
            "-C",
            "atmos_month",
            "-t",
            "19990101",
            "--submit",
        ]);
        assert_eq!(args.component, "atmos_month");
        assert_eq!(args.date, "19990101");
        assert!(args.submit);
        assert!(!args.dry_run);
    }

    #[test]
    fn config_path_defaults() {
        let args = Args::parse_from(["ppsched", "-C", "atmos_month", "-t", "1999"]);
        assert_eq!(args.config, default_config_path());
    }
}
