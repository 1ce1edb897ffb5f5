//! Normalize long edges by inserting dummy nodes.
//!
//! Every edge spanning more than one rank becomes a chain of rank-adjacent edges through `Edge`
//! dummies so ordering and positioning only ever see unit-length edges. The first dummy of each
//! chain keeps the original edge label and key, and `undo` turns the chain back into polyline
//! points.

use crate::graphlib::NodeId;
use crate::util::add_dummy_node;
use crate::{Dummy, EdgeLabel, LayoutGraph, NodeLabel, Point};

pub fn run(g: &mut LayoutGraph) -> crate::Result<()> {
    g.graph_mut().dummy_chains.clear();
    for e in g.edge_ids() {
        let Some(key) = g.edge_key(e).cloned() else {
            continue;
        };
        let v_rank = g[key.v].rank.unwrap_or(0);
        let w_rank = g[key.w].rank.unwrap_or(0);
        if w_rank == v_rank + 1 {
            continue;
        }

        let Some(mut label) = g.remove_edge(e) else {
            continue;
        };
        label.points.clear();
        let weight = label.weight;
        let label_rank = label.label_rank;

        let mut prev = key.v;
        for rank in v_rank + 1..w_rank {
            let mut node = NodeLabel {
                rank: Some(rank),
                edge_label: Some(label.clone()),
                edge_obj: Some(key.clone()),
                ..Default::default()
            };
            let is_label_rank = label_rank == Some(rank);
            if is_label_rank {
                node.width = label.width;
                node.height = label.height;
                node.labelpos = Some(label.labelpos);
            }
            let kind = if is_label_rank {
                Dummy::EdgeLabel
            } else {
                Dummy::Edge
            };
            let dummy = add_dummy_node(g, kind, node, "_d");
            if prev == key.v {
                g.graph_mut().dummy_chains.push(dummy);
            }
            g.add_named_edge(prev, dummy, key.name.clone(), chain_edge(weight))?;
            prev = dummy;
        }
        g.add_named_edge(prev, key.w, key.name.clone(), chain_edge(weight))?;
    }
    Ok(())
}

fn chain_edge(weight: f64) -> EdgeLabel {
    EdgeLabel {
        weight,
        ..Default::default()
    }
}

/// Removes every dummy chain and restores its original edge, with `points` taken from the
/// dummies' coordinates and the label box from the `EdgeLabel` dummy.
pub fn undo(g: &mut LayoutGraph) -> crate::Result<()> {
    let chains = std::mem::take(&mut g.graph_mut().dummy_chains);
    for start in chains {
        let Some(head) = g.node(start) else {
            continue;
        };
        let (Some(mut label), Some(key)) = (head.edge_label.clone(), head.edge_obj.clone()) else {
            continue;
        };

        let mut v: Option<NodeId> = Some(start);
        while let Some(cur) = v {
            let Some(node) = g.node(cur) else {
                break;
            };
            if node.dummy.is_none() {
                break;
            }
            if let (Some(x), Some(y)) = (node.x, node.y) {
                label.points.push(Point::new(x, y));
                if node.dummy == Some(Dummy::EdgeLabel) {
                    label.x = Some(x);
                    label.y = Some(y);
                    label.width = node.width;
                    label.height = node.height;
                }
            }
            v = g.successors(cur).first().copied();
            g.remove_node(cur);
        }

        g.add_named_edge(key.v, key.w, key.name, label)?;
    }
    Ok(())
}
