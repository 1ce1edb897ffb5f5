//! Coordinate assignment.
//!
//! `y` comes from stacking ranks (tallest node per rank plus `ranksep`); `x` from Brandes–Köpf.
//! Subgraph nodes are left alone here: they are sized from their border nodes afterwards.

use crate::util::{as_non_compound_graph, build_layer_matrix};
use crate::LayoutGraph;

pub mod bk;

pub fn position(g: &mut LayoutGraph) -> crate::Result<()> {
    let mut ng = as_non_compound_graph(g);
    position_y(&mut ng);
    for (v, x) in bk::position_x(&ng)? {
        ng[v].x = Some(x);
    }

    for (v, n) in ng.node_labels() {
        if let Some(target) = g.node_mut(v) {
            target.x = n.x;
            target.y = n.y;
        }
    }
    Ok(())
}

pub fn position_y(g: &mut LayoutGraph) {
    let rank_sep = g.graph().options.ranksep;
    let mut prev_y = 0.0;
    for layer in build_layer_matrix(g) {
        let max_height = layer
            .iter()
            .map(|&v| g[v].height)
            .fold(0.0f64, f64::max);
        for &v in &layer {
            g[v].y = Some(prev_y + max_height / 2.0);
        }
        prev_y += max_height + rank_sep;
    }
}
