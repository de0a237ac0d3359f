// src/checkpoint/mod.rs

//! Cooperative checkpointing: an external signal asks the invocation to
//! stop between stages, and a resume marker lets the next invocation skip
//! the stages that already ran.

mod controller;
mod signal;

pub use controller::{CheckpointController, Stage, StageGate};
pub use signal::{CheckpointSignal, FileMarkerSignal, NoCheckpoint};
