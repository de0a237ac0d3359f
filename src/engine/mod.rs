// src/engine/mod.rs

//! The per-invocation engine: gates, planning, resolution, and the
//! checkpointed stage loop for one (component, year).

mod invocation;
mod stages;

pub use invocation::{Invocation, InvocationOptions, InvocationOutcome};
pub use stages::build_stages;
