//! The layout pipeline.
//!
//! [`layout`] runs every phase on a private working copy of the caller's graph and copies the
//! results back, so the caller's labels only ever gain output fields.

mod compound;
mod edge_labels;
mod finalize;

use crate::order::OrderOptions;
use crate::{
    LayoutError, LayoutGraph, acyclic, add_border_segments, coordinate_system, nesting_graph,
    normalize, order, parent_dummy_chains, position, rank, self_edges, util,
};

/// Lays out `g` in place.
///
/// Every node gets `x`/`y` (its center); subgraph nodes also get the `width`/`height` that
/// encloses their children. Every edge gets `points`, from the boundary of its source node to
/// the boundary of its target node, and labelled edges get the label center in `x`/`y`. The
/// graph label gets the overall `width`/`height`.
pub fn layout(g: &mut LayoutGraph) -> crate::Result<()> {
    if !g.is_directed() {
        return Err(LayoutError::UndirectedGraph);
    }

    let mut work = g.clone();
    work.enable_compound();
    work.enable_multigraph();
    clear_outputs(&mut work);
    run_layout(&mut work)?;
    update_input_graph(g, &work);

    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        width = g.graph().width,
        height = g.graph().height,
        "layout finished"
    );
    Ok(())
}

/// Output fields start empty on the working copy, even when the caller lays out a graph twice.
fn clear_outputs(g: &mut LayoutGraph) {
    for (_, n) in g.node_labels_mut() {
        n.x = None;
        n.y = None;
    }
    for (_, e) in g.edge_labels_mut() {
        e.points.clear();
        e.x = None;
        e.y = None;
    }
}

fn phase<T>(name: &'static str, f: impl FnOnce() -> T) -> T {
    let _span = tracing::debug_span!("phase", name).entered();
    f()
}

fn run_layout(g: &mut LayoutGraph) -> crate::Result<()> {
    phase("make_space_for_edge_labels", || {
        edge_labels::make_space_for_edge_labels(g)
    });
    phase("remove_self_edges", || self_edges::remove_self_edges(g));
    phase("acyclic", || acyclic::run(g))?;
    phase("nesting_graph", || nesting_graph::run(g))?;
    phase("rank", || rank_leaves(g))?;
    phase("inject_edge_label_proxies", || {
        edge_labels::inject_edge_label_proxies(g)
    });
    phase("remove_empty_ranks", || util::remove_empty_ranks(g));
    phase("nesting_graph_cleanup", || nesting_graph::cleanup(g));
    phase("normalize_ranks", || util::normalize_ranks(g));
    phase("assign_rank_min_max", || compound::assign_rank_min_max(g));
    phase("remove_edge_label_proxies", || {
        edge_labels::remove_edge_label_proxies(g)
    });
    phase("normalize", || normalize::run(g))?;
    phase("parent_dummy_chains", || {
        parent_dummy_chains::parent_dummy_chains(g)
    })?;
    phase("add_border_segments", || {
        add_border_segments::add_border_segments(g)
    })?;
    let opts = OrderOptions {
        disable_optimal_order_heuristic: g.graph().options.disable_optimal_order_heuristic,
    };
    phase("order", || order::order(g, opts))?;
    phase("insert_self_edges", || self_edges::insert_self_edges(g));
    phase("adjust_coordinate_system", || coordinate_system::adjust(g));
    phase("position", || position::position(g))?;
    phase("position_self_edges", || self_edges::position_self_edges(g))?;
    phase("remove_border_nodes", || compound::remove_border_nodes(g));
    phase("normalize_undo", || normalize::undo(g))?;
    phase("fixup_edge_label_coords", || {
        edge_labels::fixup_edge_label_coords(g)
    });
    phase("undo_coordinate_system", || coordinate_system::undo(g));
    phase("translate_graph", || finalize::translate_graph(g));
    phase("assign_node_intersects", || finalize::assign_node_intersects(g));
    phase("reverse_points", || {
        finalize::reverse_points_for_reversed_edges(g)
    });
    phase("acyclic_undo", || acyclic::undo(g))?;
    Ok(())
}

/// Ranks the graph without its subgraph nodes; only leaves (including border nodes) get a rank.
fn rank_leaves(g: &mut LayoutGraph) -> crate::Result<()> {
    let mut leaves = util::as_non_compound_graph(g);
    rank::rank(&mut leaves)?;
    for (v, n) in leaves.node_labels() {
        g[v].rank = n.rank;
    }
    Ok(())
}

fn update_input_graph(input: &mut LayoutGraph, work: &LayoutGraph) {
    for v in input.node_ids() {
        let Some(laid_out) = work.node(v) else {
            continue;
        };
        let is_subgraph = work.has_children(v);
        let node = &mut input[v];
        node.x = laid_out.x;
        node.y = laid_out.y;
        if is_subgraph {
            node.width = laid_out.width;
            node.height = laid_out.height;
        }
    }

    for e in input.edge_ids() {
        let Some(key) = input.edge_key(e) else {
            continue;
        };
        let Some(laid_out) = work.find_edge_by_key(key).and_then(|we| work.edge(we)) else {
            continue;
        };
        let points = laid_out.points.clone();
        let (x, y) = (laid_out.x, laid_out.y);
        let edge = &mut input[e];
        edge.points = points;
        if x.is_some() {
            edge.x = x;
            edge.y = y;
        }
    }

    let gl = input.graph_mut();
    gl.width = work.graph().width;
    gl.height = work.graph().height;
}
