//! Subtree selection and removal for excluded finger modules

use std::collections::BTreeSet;

use generational_arena::Index;
use tracing::debug;

use crate::domain::{Document, Finger};

/// Collect every node whose module prefix marks it as part of an excluded
/// finger, in document order.
///
/// A node is recorded at most once: the first matching label wins and the
/// remaining labels are not tested for that node. Nodes without a module
/// prefix attribute simply never match. An empty exclusion set selects
/// nothing.
pub fn select_excluded(doc: &Document, exclude: &BTreeSet<Finger>) -> Vec<Index> {
    if exclude.is_empty() {
        return Vec::new();
    }

    let mut selected = Vec::new();
    for (idx, node) in doc.iter() {
        let Some(prefix) = node.element.module_prefix() else {
            continue;
        };
        for finger in exclude {
            if prefix.starts_with(&finger.module_prefix()) {
                debug!(
                    "select_excluded: <{}> prefix={} matches {}",
                    node.element.name, prefix, finger
                );
                selected.push(idx);
                break;
            }
        }
    }

    debug!("select_excluded: {} nodes selected", selected.len());
    selected
}

/// Detach the selected nodes from their parents.
///
/// Detaching a node removes its whole subtree from the serialized output,
/// so a node already gone with an earlier removal is skipped rather than
/// treated as an error. Returns the number of nodes actually detached.
pub fn detach_nodes(doc: &mut Document, nodes: &[Index]) -> usize {
    let mut removed = 0;
    for &idx in nodes {
        if doc.detach(idx) {
            removed += 1;
        }
    }
    debug!("detach_nodes: detached {} of {} selected", removed, nodes.len());
    removed
}
