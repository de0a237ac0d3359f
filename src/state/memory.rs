// src/state/memory.rs

//! In-memory state store used by tests and dry runs.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{PpschedError, Result};

use super::{JobState, JobUnit, StateStore};

#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: Mutex<HashMap<String, String>>,
    resume: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw record token directly, bypassing `JobState` encoding.
    /// Lets tests set up corrupt records.
    pub fn set_raw(&self, unit: &JobUnit, token: &str) {
        self.records
            .lock()
            .unwrap()
            .insert(unit.to_string(), token.to_string());
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self, unit: &JobUnit) -> Result<Option<JobState>> {
        let records = self.records.lock().unwrap();
        match records.get(&unit.to_string()) {
            None => Ok(None),
            Some(raw) => match JobState::from_token(raw) {
                Some(state) => Ok(Some(state)),
                None => Err(PpschedError::StateCorrupt {
                    unit: unit.to_string(),
                    reason: "empty state record".to_string(),
                }),
            },
        }
    }

    fn write(&mut self, unit: &JobUnit, state: &JobState) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(unit.to_string(), state.token());
        Ok(())
    }

    fn clear(&mut self, unit: &JobUnit) -> Result<()> {
        self.records.lock().unwrap().remove(&unit.to_string());
        Ok(())
    }

    fn read_resume(&self, unit: &JobUnit) -> Result<Option<String>> {
        Ok(self.resume.lock().unwrap().get(&unit.to_string()).cloned())
    }

    fn write_resume(&mut self, unit: &JobUnit, stage: &str) -> Result<()> {
        self.resume
            .lock()
            .unwrap()
            .insert(unit.to_string(), stage.to_string());
        Ok(())
    }

    fn clear_resume(&mut self, unit: &JobUnit) -> Result<()> {
        self.resume.lock().unwrap().remove(&unit.to_string());
        Ok(())
    }
}
