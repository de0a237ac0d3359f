// src/plan/derivation.rs

//! Chunk-derivation ordering for a component's requested outputs.
//!
//! An output that can be combined from a smaller sibling's chunks depends
//! on that sibling being produced first. The resulting graph is what the
//! dry-run view prints and what config validation sanity-checks.

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::component::Component;
use crate::errors::{PpschedError, Result};
use crate::interval::best_sub_interval;

/// Stage names of the component's outputs in derivation order: every
/// output appears after the sibling it would be combined from.
pub fn derivation_order(component: &Component) -> Result<Vec<String>> {
    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();

    for i in 0..component.outputs.len() {
        graph.add_node(i);
    }

    for (i, spec) in component.outputs.iter().enumerate() {
        let Ok(chunk) = spec.chunk_length() else {
            // Malformed specs are reported at planning time.
            continue;
        };
        let siblings = component.sibling_chunks(spec);
        let Some(sub) = best_sub_interval(chunk.in_months(), &siblings) else {
            continue;
        };
        // Edge source -> derived output.
        for (j, other) in component.outputs.iter().enumerate() {
            if other.kind == spec.kind
                && other.freq == spec.freq
                && other.chunk_length().is_ok_and(|cl| cl.in_months() == sub)
            {
                graph.add_edge(j, i, ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(order) => Ok(order
            .into_iter()
            .map(|i| component.outputs[i].stage_name())
            .collect()),
        Err(cycle) => Err(PpschedError::ConfigError(format!(
            "cycle in chunk derivation for component '{}' involving '{}'",
            component.name,
            component.outputs[cycle.node_id()].stage_name()
        ))),
    }
}
