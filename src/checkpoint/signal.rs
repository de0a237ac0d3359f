// src/checkpoint/signal.rs

//! How an invocation learns that an operator wants it to stop.

use std::path::PathBuf;

/// Source of checkpoint requests, polled between stages.
pub trait CheckpointSignal {
    fn requested(&self, host: &str, job_id: &str) -> bool;
}

/// Marker-file signal: a request exists when `<dir>/<host>.<job_id>` does.
/// Operators create the file by hand or from a drain script.
#[derive(Debug, Clone)]
pub struct FileMarkerSignal {
    dir: PathBuf,
}

impl FileMarkerSignal {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileMarkerSignal { dir: dir.into() }
    }
}

impl CheckpointSignal for FileMarkerSignal {
    fn requested(&self, host: &str, job_id: &str) -> bool {
        self.dir.join(format!("{host}.{job_id}")).exists()
    }
}

/// Signal that never fires, for setups with checkpointing disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCheckpoint;

impl CheckpointSignal for NoCheckpoint {
    fn requested(&self, _host: &str, _job_id: &str) -> bool {
        false
    }
}
