// src/archive.rs

//! Lookup of previously archived output artifacts.
//!
//! The only artifact the planner itself needs to see is the prior year's
//! December monthly file, used when assembling a DJF season at a chunk
//! boundary.

use std::path::{Path, PathBuf};

use crate::interval::{ModelDate, TimeGrain};

/// Read-only view of the output archive.
pub trait ArchiveCatalog {
    fn contains(&self, path: &Path) -> bool;
}

/// Archive rooted at a local directory.
#[derive(Debug, Clone)]
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirArchive { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArchiveCatalog for DirArchive {
    fn contains(&self, path: &Path) -> bool {
        self.root.join(path).is_file()
    }
}

/// Archive-relative path of a component's December monthly artifact for
/// the given year.
pub fn december_artifact(component: &str, year: i64) -> PathBuf {
    let label = TimeGrain::Month.label(ModelDate::new(year, 12, 1));
    PathBuf::from(".dec").join(format!("{component}.{label}.nc"))
}
