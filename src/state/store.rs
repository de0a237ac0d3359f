// src/state/store.rs

//! Persistence of job state records.
//!
//! The on-disk layout is one file per unit, named `<component>.<year>`,
//! holding a single status token. Resume markers live alongside them with
//! a `.resume` suffix and hold the name of the stage to resume at.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{PpschedError, Result};

use super::{JobState, JobUnit};

/// Storage backend for unit state and resume markers.
pub trait StateStore {
    /// Current state for the unit, or `None` if no record exists.
    fn read(&self, unit: &JobUnit) -> Result<Option<JobState>>;
    fn write(&mut self, unit: &JobUnit, state: &JobState) -> Result<()>;
    /// Remove the record entirely, making the unit absent again.
    fn clear(&mut self, unit: &JobUnit) -> Result<()>;

    /// Stage name recorded by an interrupted invocation, if any.
    fn read_resume(&self, unit: &JobUnit) -> Result<Option<String>>;
    fn write_resume(&mut self, unit: &JobUnit, stage: &str) -> Result<()>;
    fn clear_resume(&mut self, unit: &JobUnit) -> Result<()>;
}

/// One-file-per-unit store rooted at a state directory.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    root: PathBuf,
}

impl FileStateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStateStore { root: root.into() }
    }

    fn record_path(&self, unit: &JobUnit) -> PathBuf {
        self.root.join(unit.to_string())
    }

    fn resume_path(&self, unit: &JobUnit) -> PathBuf {
        self.root.join(format!("{unit}.resume"))
    }

    /// Write via a temp file and rename so readers never see a partial
    /// record.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        // Append rather than `with_extension`: record names like
        // `atmos_month.1999` would lose their year part.
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn remove_if_exists(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl StateStore for FileStateStore {
    fn read(&self, unit: &JobUnit) -> Result<Option<JobState>> {
        let path = self.record_path(unit);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match JobState::from_token(&raw) {
            Some(state) => Ok(Some(state)),
            None => Err(PpschedError::StateCorrupt {
                unit: unit.to_string(),
                reason: "empty state record".to_string(),
            }),
        }
    }

    fn write(&mut self, unit: &JobUnit, state: &JobState) -> Result<()> {
        debug!(unit = %unit, state = %state, "writing state record");
        self.write_atomic(&self.record_path(unit), &state.token())
    }

    fn clear(&mut self, unit: &JobUnit) -> Result<()> {
        debug!(unit = %unit, "clearing state record");
        Self::remove_if_exists(&self.record_path(unit))
    }

    fn read_resume(&self, unit: &JobUnit) -> Result<Option<String>> {
        match fs::read_to_string(self.resume_path(unit)) {
            Ok(raw) => {
                let stage = raw.trim().to_string();
                if stage.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(stage))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_resume(&mut self, unit: &JobUnit, stage: &str) -> Result<()> {
        debug!(unit = %unit, stage, "writing resume marker");
        self.write_atomic(&self.resume_path(unit), stage)
    }

    fn clear_resume(&mut self, unit: &JobUnit) -> Result<()> {
        Self::remove_if_exists(&self.resume_path(unit))
    }
}
