//! Self-loop extraction and reinsertion.
//!
//! Self-loops carry no ranking or ordering constraint, so they are parked on their node before
//! cycle breaking. After ordering each one gets a `SelfEdge` dummy directly to the right of its
//! node; positioning then reserves room for the loop and `position_self_edges` turns the dummy
//! back into the edge.

use crate::util::{add_dummy_node, build_layer_matrix};
use crate::{Dummy, LayoutGraph, NodeLabel, Point, SelfEdge};

pub fn remove_self_edges(g: &mut LayoutGraph) {
    for e in g.edge_ids() {
        let Some(key) = g.edge_key(e).cloned() else {
            continue;
        };
        if key.v != key.w {
            continue;
        }
        let Some(label) = g.remove_edge(e) else {
            continue;
        };
        g[key.v].self_edges.push(SelfEdge {
            edge_obj: key,
            label,
        });
    }
}

pub fn insert_self_edges(g: &mut LayoutGraph) {
    for layer in build_layer_matrix(g) {
        let mut shift = 0usize;
        for (i, v) in layer.into_iter().enumerate() {
            g[v].order = Some(i + shift);
            let self_edges = std::mem::take(&mut g[v].self_edges);
            let rank = g[v].rank;
            for se in self_edges {
                shift += 1;
                let label = NodeLabel {
                    width: se.label.width,
                    height: se.label.height,
                    rank,
                    order: Some(i + shift),
                    edge_label: Some(se.label),
                    edge_obj: Some(se.edge_obj),
                    ..Default::default()
                };
                add_dummy_node(g, Dummy::SelfEdge, label, "_se");
            }
        }
    }
}

/// Replaces every `SelfEdge` dummy by its edge, drawn as a loop on the right side of the node
/// that reaches out to the dummy's position.
pub fn position_self_edges(g: &mut LayoutGraph) -> crate::Result<()> {
    for v in g.node_ids() {
        let node = &g[v];
        if node.dummy != Some(Dummy::SelfEdge) {
            continue;
        }
        let (Some(x), Some(y)) = (node.x, node.y) else {
            continue;
        };
        let (Some(key), Some(mut label)) = (node.edge_obj.clone(), node.edge_label.clone()) else {
            continue;
        };
        let owner = &g[key.v];
        let (Some(ox), Some(oy)) = (owner.x, owner.y) else {
            continue;
        };

        let left = ox + owner.width / 2.0;
        let dx = x - left;
        let dy = owner.height / 2.0;
        label.points = vec![
            Point::new(left + 2.0 * dx / 3.0, oy - dy),
            Point::new(left + 5.0 * dx / 6.0, oy - dy),
            Point::new(left + dx, oy),
            Point::new(left + 5.0 * dx / 6.0, oy + dy),
            Point::new(left + 2.0 * dx / 3.0, oy + dy),
        ];
        label.x = Some(x);
        label.y = Some(y);

        g.remove_node(v);
        g.add_named_edge(key.v, key.w, key.name, label)?;
    }
    Ok(())
}
