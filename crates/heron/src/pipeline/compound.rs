//! Compound-graph helpers for the layout pipeline.

use crate::graphlib::NodeId;
use crate::{Dummy, LayoutGraph};

/// Annotates every subgraph with the rank span of its top/bottom borders and records the
/// largest rank used by any subgraph.
pub(super) fn assign_rank_min_max(g: &mut LayoutGraph) {
    let mut max_rank = 0;
    for v in g.node_ids() {
        let node = &g[v];
        let (Some(top), Some(bottom)) = (node.border_top, node.border_bottom) else {
            continue;
        };
        let min = g[top].rank;
        let max = g[bottom].rank;
        let node = &mut g[v];
        node.min_rank = min;
        node.max_rank = max;
        max_rank = max_rank.max(max.unwrap_or(0));
    }
    g.graph_mut().max_rank = Some(max_rank);
}

pub(super) fn remove_border_nodes(g: &mut LayoutGraph) {
    for v in g.node_ids() {
        if !g.has_children(v) {
            continue;
        }
        let Some(bounds) = border_bounds(g, v) else {
            continue;
        };
        let (left, right, top, bottom) = bounds;
        let width = (right - left).abs();
        let height = (bottom - top).abs();
        let node = &mut g[v];
        node.width = width;
        node.height = height;
        node.x = Some(left + width / 2.0);
        node.y = Some(top + height / 2.0);
    }

    let borders: Vec<NodeId> = g
        .node_labels()
        .filter(|(_, n)| n.dummy == Some(Dummy::Border))
        .map(|(v, _)| v)
        .collect();
    for v in borders {
        g.remove_node(v);
    }
}

/// `(left x, right x, top y, bottom y)` of a subgraph, read from its outermost border nodes.
fn border_bounds(g: &LayoutGraph, v: NodeId) -> Option<(f64, f64, f64, f64)> {
    let node = g.node(v)?;
    let left = (*node.border_left.last()?)?;
    let right = (*node.border_right.last()?)?;
    let top = g.node(node.border_top?)?.y?;
    let bottom = g.node(node.border_bottom?)?.y?;
    Some((g.node(left)?.x?, g.node(right)?.x?, top, bottom))
}
