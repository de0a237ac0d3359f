// src/plan/mod.rs

//! Aggregation readiness planning.
//!
//! - [`context`] carries the per-invocation mutable state.
//! - [`planner`] decides readiness and sub-chunk decomposition.
//! - [`derivation`] orders a component's outputs by derivation.

pub mod context;
pub mod derivation;
pub mod planner;

pub use context::RunContext;
pub use derivation::derivation_order;
pub use planner::{plan, plan_component, Plan, PlanResult, PlanSource};
