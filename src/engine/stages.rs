// src/engine/stages.rs

//! Builds the ordered stage list for an invocation from its plans.

use crate::checkpoint::Stage;
use crate::plan::PlanResult;

/// One preparatory static-file stage, then one aggregation stage per plan,
/// in the order the planner produced them (derivation order).
pub fn build_stages(plans: &[PlanResult]) -> Vec<Stage> {
    let mut stages = Vec::with_capacity(plans.len() + 1);
    stages.push(Stage::preparatory("static"));
    for (idx, plan) in plans.iter().enumerate() {
        stages.push(Stage::aggregation(plan.spec.stage_name(), idx));
    }
    stages
}
