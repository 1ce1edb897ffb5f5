//! Shared helpers: dummy nodes, graph projections, rank bookkeeping and geometry.

use crate::graphlib::{Graph, NodeId};
use crate::{Dummy, EdgeLabel, LayoutGraph, NodeLabel, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn of(node: &NodeLabel) -> Self {
        Self {
            x: node.x.unwrap_or(0.0),
            y: node.y.unwrap_or(0.0),
            width: node.width,
            height: node.height,
        }
    }
}

/// Adds a synthesized node of the given kind under a fresh `{prefix}{n}` name.
pub fn add_dummy_node(g: &mut LayoutGraph, kind: Dummy, mut label: NodeLabel, prefix: &str) -> NodeId {
    label.dummy = Some(kind);
    loop {
        let seq = {
            let gl = g.graph_mut();
            gl.dummy_seq += 1;
            gl.dummy_seq
        };
        let name = format!("{prefix}{seq}");
        if !g.has_node(&name) {
            return g.add_node(name, label);
        }
    }
}

pub fn add_border_node(
    g: &mut LayoutGraph,
    prefix: &str,
    rank: Option<i32>,
    order: Option<usize>,
) -> NodeId {
    let label = NodeLabel {
        rank,
        order,
        ..Default::default()
    };
    add_dummy_node(g, Dummy::Border, label, prefix)
}

/// Collapses parallel edges into one edge per ordered pair: weights are summed and the
/// largest `minlen` wins. Node handles are preserved.
pub fn simplify(g: &LayoutGraph) -> crate::Result<LayoutGraph> {
    let mut simplified: LayoutGraph = g.filter_map(
        g.graph().clone(),
        |_, n| Some(n.clone()),
        |_, _, _| None::<EdgeLabel>,
    );
    for (_, key, label) in g.edge_entries() {
        match simplified.find_edge(key.v, key.w, None) {
            Some(e) => {
                let agg = &mut simplified[e];
                agg.weight += label.weight;
                agg.minlen = agg.minlen.max(label.minlen);
            }
            None => {
                simplified.add_edge(
                    key.v,
                    key.w,
                    EdgeLabel {
                        weight: label.weight,
                        minlen: label.minlen.max(1),
                        ..Default::default()
                    },
                )?;
            }
        }
    }
    Ok(simplified)
}

/// View of `g` without subgraph nodes (nodes that have children). Handles are preserved.
pub fn as_non_compound_graph(g: &LayoutGraph) -> LayoutGraph {
    g.filter_map(
        g.graph().clone(),
        |v, n| (!g.has_children(v)).then(|| n.clone()),
        |_, _, e| Some(e.clone()),
    )
}

pub fn max_rank<E, G>(g: &Graph<NodeLabel, E, G>) -> Option<i32> {
    g.node_labels().filter_map(|(_, n)| n.rank).max()
}

/// Nodes grouped by rank, each layer sorted by `order`.
pub fn build_layer_matrix<E, G>(g: &Graph<NodeLabel, E, G>) -> Vec<Vec<NodeId>> {
    let Some(max) = max_rank(g) else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<(usize, NodeId)>> = vec![Vec::new(); (max.max(0) + 1) as usize];
    for (v, n) in g.node_labels() {
        let Some(rank) = n.rank.filter(|&r| r >= 0) else {
            continue;
        };
        layers[rank as usize].push((n.order.unwrap_or(0), v));
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|&(order, _)| order);
            layer.into_iter().map(|(_, v)| v).collect()
        })
        .collect()
}

/// Shifts ranks so the smallest one is 0.
pub fn normalize_ranks<E, G>(g: &mut Graph<NodeLabel, E, G>) {
    let Some(min) = g.node_labels().filter_map(|(_, n)| n.rank).min() else {
        return;
    };
    for (_, n) in g.node_labels_mut() {
        if let Some(rank) = n.rank.as_mut() {
            *rank -= min;
        }
    }
}

/// Drops empty ranks, except those that are a multiple of `node_rank_factor` (those keep the
/// spacing subgraph borders rely on).
pub fn remove_empty_ranks(g: &mut LayoutGraph) {
    let factor = g.graph().node_rank_factor.filter(|&f| f > 0).unwrap_or(1);
    let Some(offset) = g.node_labels().filter_map(|(_, n)| n.rank).min() else {
        return;
    };
    let Some(max) = max_rank(g) else {
        return;
    };

    let mut layers: Vec<Vec<NodeId>> = vec![Vec::new(); (max - offset + 1) as usize];
    for (v, n) in g.node_labels() {
        if let Some(rank) = n.rank {
            layers[(rank - offset) as usize].push(v);
        }
    }

    let mut delta = 0;
    for (i, vs) in layers.iter().enumerate() {
        if vs.is_empty() && i as i32 % factor != 0 {
            delta -= 1;
        } else if delta != 0 {
            for &v in vs {
                if let Some(rank) = g[v].rank.as_mut() {
                    *rank += delta;
                }
            }
        }
    }
}

/// Point where the segment from the center of `rect` towards `point` leaves the rectangle.
pub fn intersect_rect(rect: Rect, point: Point) -> Point {
    let dx = point.x - rect.x;
    let dy = point.y - rect.y;
    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;

    // Degenerate: the point is the center. Pick the middle of the right side.
    if dx == 0.0 && dy == 0.0 {
        return Point::new(rect.x + w, rect.y);
    }

    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };

    Point::new(rect.x + sx, rect.y + sy)
}
