//! Rank-local graph used by one ordering step.
//!
//! Holds the nodes of one rank, the subgraphs spanning it (with that rank's left/right border
//! nodes), and the neighbors on the adjacent rank. Edges always point from the neighbor to the
//! node being ordered, with parallel edges merged by summing weights. Handles match the layout
//! graph; the synthetic root is the only extra node.

use super::Relationship;
use crate::graphlib::{EdgeId, Graph, GraphOptions, NodeId};
use crate::{LayoutGraph, NodeLabel};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerNode {
    pub order: Option<usize>,
    pub border_left: Option<NodeId>,
    pub border_right: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightLabel {
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerGraphLabel {
    pub root: NodeId,
}

pub type LayerGraph = Graph<LayerNode, WeightLabel, LayerGraphLabel>;

fn in_range(n: &NodeLabel, rank: i32) -> bool {
    n.rank == Some(rank)
        || matches!((n.min_rank, n.max_rank), (Some(min), Some(max)) if min <= rank && rank <= max)
}

/// Builds the layer graph for `rank`. `nodes` lists the nodes in range for the rank when the
/// caller already has them; otherwise the whole graph is scanned.
pub fn build_layer_graph(
    g: &LayoutGraph,
    rank: i32,
    relationship: Relationship,
    nodes: Option<&[NodeId]>,
) -> crate::Result<LayerGraph> {
    let scanned: Vec<NodeId>;
    let nodes = match nodes {
        Some(vs) => vs,
        None => {
            scanned = g
                .node_labels()
                .filter(|(_, n)| in_range(n, rank))
                .map(|(v, _)| v)
                .collect();
            &scanned
        }
    };

    let neighbor = |e: EdgeId| {
        let (v, w) = g.endpoints(e)?;
        Some(match relationship {
            Relationship::InEdges => v,
            Relationship::OutEdges => w,
        })
    };
    let incident = |v: NodeId| -> Vec<EdgeId> {
        match relationship {
            Relationship::InEdges => g.in_edges(v).collect(),
            Relationship::OutEdges => g.out_edges(v).collect(),
        }
    };

    let mut keep = vec![false; g.node_bound()];
    for &v in nodes {
        keep[v.index()] = true;
        for e in incident(v) {
            if let Some(u) = neighbor(e) {
                keep[u.index()] = true;
            }
        }
    }

    let mut lg: LayerGraph = g.filter_map_as(
        GraphOptions::default(),
        LayerGraphLabel {
            root: NodeId::new(g.node_bound()),
        },
        |v, n| {
            keep[v.index()].then(|| LayerNode {
                order: n.order,
                ..Default::default()
            })
        },
        |_, _, _| None,
    );
    lg.enable_compound();

    let mut root_name = String::from("_root");
    let mut seq = 0usize;
    while lg.has_node(&root_name) {
        seq += 1;
        root_name = format!("_root{seq}");
    }
    let root = lg.add_node(root_name, LayerNode::default());
    lg.graph_mut().root = root;

    for &v in nodes {
        let parent = g
            .parent(v)
            .filter(|&p| lg.contains_node(p))
            .unwrap_or(root);
        lg.set_parent(v, Some(parent))?;

        for e in incident(v) {
            let Some(u) = neighbor(e) else {
                continue;
            };
            let weight = g[e].weight;
            match lg.find_edge(u, v, None) {
                Some(existing) => lg[existing].weight += weight,
                None => {
                    lg.add_edge(u, v, WeightLabel { weight })?;
                }
            }
        }

        let n = &g[v];
        if n.min_rank.is_some() {
            let slot = |sides: &[Option<NodeId>]| {
                usize::try_from(rank)
                    .ok()
                    .and_then(|r| sides.get(r).copied().flatten())
            };
            lg[v] = LayerNode {
                order: None,
                border_left: slot(n.border_left.as_slice()),
                border_right: slot(n.border_right.as_slice()),
            };
        }
    }

    Ok(lg)
}
