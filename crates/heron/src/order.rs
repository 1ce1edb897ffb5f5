//! Node ordering / crossing minimization.
//!
//! Starts from a depth-first initial order, then sweeps the ranks alternately downward (using
//! in-neighbors) and upward (using out-neighbors), reordering each rank by barycenter while
//! keeping subgraphs contiguous. The layering with the fewest crossings wins; the search stops
//! after four sweeps without improvement.

pub mod barycenter;
pub mod constraints;
pub mod cross_count;
pub mod init_order;
pub mod layer_graph;
pub mod resolve_conflicts;
pub mod sort;
pub mod sort_subgraph;

pub use barycenter::{BarycenterEntry, barycenter};
pub use constraints::{ConstraintGraph, add_subgraph_constraints, constraint_graph};
pub use cross_count::cross_count;
pub use init_order::init_order;
pub use layer_graph::{LayerGraph, LayerGraphLabel, LayerNode, WeightLabel, build_layer_graph};
pub use resolve_conflicts::{SortEntry, resolve_conflicts};
pub use sort::{SortResult, sort};
pub use sort_subgraph::sort_subgraph;

use crate::graphlib::NodeId;
use crate::util::{build_layer_matrix, max_rank};
use crate::LayoutGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    InEdges,
    OutEdges,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderOptions {
    /// Keep the initial depth-first order and skip the sweeps.
    pub disable_optimal_order_heuristic: bool,
}

pub fn order(g: &mut LayoutGraph, opts: OrderOptions) -> crate::Result<()> {
    let Some(max_rank) = max_rank(g) else {
        return Ok(());
    };
    let nodes_by_rank = nodes_by_rank(g, max_rank);

    let layering = init_order(g);
    assign_order(g, &layering);
    if opts.disable_optimal_order_heuristic {
        return Ok(());
    }

    let down: Vec<i32> = (1..=max_rank).collect();
    let up: Vec<i32> = (0..max_rank).rev().collect();

    let mut best_cc = f64::INFINITY;
    let mut best: Option<Vec<Vec<NodeId>>> = None;
    let mut i = 0usize;
    let mut last_best = 0usize;
    while last_best < 4 {
        let bias_right = i % 4 >= 2;
        if i % 2 == 1 {
            sweep(g, &nodes_by_rank, &down, Relationship::InEdges, bias_right)?;
        } else {
            sweep(g, &nodes_by_rank, &up, Relationship::OutEdges, bias_right)?;
        }

        let layering = build_layer_matrix(g);
        let cc = cross_count(g, &layering);
        tracing::trace!(sweep = i, crossings = cc, "order sweep");
        if cc < best_cc {
            last_best = 0;
            best_cc = cc;
            best = Some(layering);
        }
        i += 1;
        last_best += 1;
    }

    if let Some(best) = best {
        assign_order(g, &best);
    }
    Ok(())
}

/// Nodes that take part in ordering each rank: nodes on the rank plus every subgraph whose
/// rank span covers it, in graph order.
fn nodes_by_rank(g: &LayoutGraph, max_rank: i32) -> Vec<Vec<NodeId>> {
    let mut by_rank: Vec<Vec<NodeId>> = vec![Vec::new(); (max_rank.max(0) + 1) as usize];
    for (v, n) in g.node_labels() {
        if let Some(rank) = n.rank.filter(|&r| r >= 0) {
            by_rank[rank as usize].push(v);
        }
        if let (Some(min), Some(max)) = (n.min_rank, n.max_rank) {
            for r in min.max(0)..=max.min(max_rank) {
                if n.rank != Some(r) {
                    by_rank[r as usize].push(v);
                }
            }
        }
    }
    by_rank
}

fn assign_order(g: &mut LayoutGraph, layering: &[Vec<NodeId>]) {
    for layer in layering {
        for (i, &v) in layer.iter().enumerate() {
            g[v].order = Some(i);
        }
    }
}

fn sweep(
    g: &mut LayoutGraph,
    nodes_by_rank: &[Vec<NodeId>],
    ranks: &[i32],
    relationship: Relationship,
    bias_right: bool,
) -> crate::Result<()> {
    let mut cg = constraint_graph(g);
    for &rank in ranks {
        let nodes = nodes_by_rank
            .get(rank as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let lg = build_layer_graph(g, rank, relationship, Some(nodes))?;
        let sorted = sort_subgraph(&lg, lg.graph().root, &cg, bias_right);
        for (i, &v) in sorted.vs.iter().enumerate() {
            if let Some(n) = g.node_mut(v) {
                n.order = Some(i);
            }
        }
        add_subgraph_constraints(&lg, &mut cg, &sorted.vs)?;
    }
    Ok(())
}
