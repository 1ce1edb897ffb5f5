//! Break cycles by reversing a feedback arc set (FAS).
//!
//! Reversed edges are re-inserted under a fresh name and flagged, with their original name kept
//! in `forward_name`, so `undo` can restore them exactly.

use crate::graphlib::{EdgeId, NodeId};
use crate::{Acyclicer, EdgeLabel, LayoutGraph};

pub fn run(g: &mut LayoutGraph) -> crate::Result<()> {
    let fas = match g.graph().options.acyclicer {
        Acyclicer::Greedy => crate::greedy_fas::greedy_fas_with_weight(g, |lbl: &EdgeLabel| {
            if !lbl.weight.is_finite() {
                return 0;
            }
            lbl.weight.round() as i64
        }),
        Acyclicer::Dfs => dfs_fas(g),
    };

    for e in fas {
        let Some(key) = g.edge_key(e).cloned() else {
            continue;
        };
        if key.v == key.w {
            continue;
        }
        let Some(mut label) = g.remove_edge(e) else {
            continue;
        };
        label.forward_name = key.name;
        label.reversed = true;

        let name = unique_rev_name(g, key.w, key.v);
        g.add_named_edge(key.w, key.v, Some(name), label)?;
    }
    Ok(())
}

pub fn undo(g: &mut LayoutGraph) -> crate::Result<()> {
    for e in g.edge_ids() {
        if !g[e].reversed {
            continue;
        }
        let Some(key) = g.edge_key(e).cloned() else {
            continue;
        };
        let Some(mut label) = g.remove_edge(e) else {
            continue;
        };
        let forward_name = label.forward_name.take();
        label.reversed = false;
        g.add_named_edge(key.w, key.v, forward_name, label)?;
    }
    Ok(())
}

fn unique_rev_name(g: &LayoutGraph, v: NodeId, w: NodeId) -> String {
    let mut i = 1usize;
    loop {
        let candidate = format!("rev{i}");
        if g.find_edge(v, w, Some(&candidate)).is_none() {
            return candidate;
        }
        i += 1;
    }
}

/// Every edge that closes a cycle in a depth-first walk started from each node in insertion
/// order.
fn dfs_fas(g: &LayoutGraph) -> Vec<EdgeId> {
    let bound = g.node_bound();
    let mut fas: Vec<EdgeId> = Vec::new();
    let mut visited = vec![false; bound];
    let mut on_stack = vec![false; bound];
    let mut frames: Vec<(NodeId, Vec<EdgeId>, usize)> = Vec::new();

    for root in g.nodes() {
        if std::mem::replace(&mut visited[root.index()], true) {
            continue;
        }
        on_stack[root.index()] = true;
        frames.push((root, g.out_edges(root).collect(), 0));

        while let Some((v, edges, i)) = frames.last_mut() {
            let v = *v;
            if let Some(&e) = edges.get(*i) {
                *i += 1;
                let Some((_, w)) = g.endpoints(e) else {
                    continue;
                };
                if w == v {
                    continue;
                }
                if on_stack[w.index()] {
                    fas.push(e);
                } else if !std::mem::replace(&mut visited[w.index()], true) {
                    on_stack[w.index()] = true;
                    frames.push((w, g.out_edges(w).collect(), 0));
                }
                continue;
            }
            on_stack[v.index()] = false;
            frames.pop();
        }
    }
    fas
}
