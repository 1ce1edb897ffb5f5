//! Order the children of one layer-graph node.
//!
//! Nested subgraphs are sorted first (bottom-up) and then treated as a single movable unit
//! whose barycenter folds in their members'. A subgraph's border nodes are pinned to both ends
//! of its result.

use super::{
    BarycenterEntry, ConstraintGraph, LayerGraph, SortResult, barycenter, resolve_conflicts, sort,
};
use crate::graphlib::NodeId;
use rustc_hash::FxHashMap as HashMap;

pub fn sort_subgraph(
    lg: &LayerGraph,
    v: NodeId,
    cg: &ConstraintGraph,
    bias_right: bool,
) -> SortResult {
    let mut done: HashMap<NodeId, SortResult> = HashMap::default();
    for sg in subgraphs_bottom_up(lg, v) {
        let result = sort_one(lg, sg, cg, bias_right, &done);
        done.insert(sg, result);
    }
    done.remove(&v).unwrap_or_default()
}

/// `v` and every descendant subgraph of it, children before parents.
fn subgraphs_bottom_up(lg: &LayerGraph, v: NodeId) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::new();
    let mut stack: Vec<(NodeId, bool)> = vec![(v, false)];
    while let Some((sg, expanded)) = stack.pop() {
        if expanded {
            out.push(sg);
            continue;
        }
        stack.push((sg, true));
        let nested: Vec<NodeId> = lg.children(sg).filter(|&c| lg.has_children(c)).collect();
        stack.extend(nested.into_iter().rev().map(|c| (c, false)));
    }
    out
}

fn sort_one(
    lg: &LayerGraph,
    v: NodeId,
    cg: &ConstraintGraph,
    bias_right: bool,
    done: &HashMap<NodeId, SortResult>,
) -> SortResult {
    let node = &lg[v];
    let borders = node.border_left.zip(node.border_right);

    let mut movable: Vec<NodeId> = lg.children(v).collect();
    if let Some((bl, br)) = borders {
        movable.retain(|&w| w != bl && w != br);
    }

    let mut barycenters = barycenter(lg, &movable);
    for entry in &mut barycenters {
        if let Some(nested) = done.get(&entry.v) {
            merge_barycenters(entry, nested);
        }
    }

    let mut entries = resolve_conflicts(&barycenters, cg);
    for entry in &mut entries {
        entry.vs = entry
            .vs
            .iter()
            .flat_map(|w| match done.get(w) {
                Some(nested) => nested.vs.clone(),
                None => vec![*w],
            })
            .collect();
    }

    let mut result = sort(&entries, bias_right);
    let Some((bl, br)) = borders else {
        return result;
    };

    let mut vs = Vec::with_capacity(result.vs.len() + 2);
    vs.push(bl);
    vs.append(&mut result.vs);
    vs.push(br);
    result.vs = vs;

    let (Some(bl_pred), Some(br_pred)) = (
        lg.predecessors(bl).first().copied(),
        lg.predecessors(br).first().copied(),
    ) else {
        return result;
    };
    let bl_order = lg[bl_pred].order.unwrap_or(0) as f64;
    let br_order = lg[br_pred].order.unwrap_or(0) as f64;
    let bc = result.barycenter.unwrap_or(0.0);
    let w = result.weight.unwrap_or(0.0);
    result.barycenter = Some((bc * w + bl_order + br_order) / (w + 2.0));
    result.weight = Some(w + 2.0);
    result
}

fn merge_barycenters(target: &mut BarycenterEntry, other: &SortResult) {
    let (Some(other_bc), Some(other_w)) = (other.barycenter, other.weight) else {
        return;
    };
    match (target.barycenter, target.weight) {
        (Some(bc), Some(w)) => {
            target.barycenter = Some((bc * w + other_bc * other_w) / (w + other_w));
            target.weight = Some(w + other_w);
        }
        _ => {
            target.barycenter = Some(other_bc);
            target.weight = Some(other_w);
        }
    }
}
