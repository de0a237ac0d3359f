// src/exec/mod.rs

//! Execution of planned aggregation stages.

mod backend;

pub use backend::{AggregationExecutor, CommandExecutor, ExecError, LoggingExecutor, StageJob};
