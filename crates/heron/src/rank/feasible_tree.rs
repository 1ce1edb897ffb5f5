//! Feasible tree construction.
//!
//! Grows a spanning tree of tight edges (zero slack) from the first node. When the tight tree
//! stops growing, the whole tree is shifted by the smallest slack of an edge leaving it, which
//! makes that edge tight, and growth resumes. Disconnected inputs produce a forest: once no edge
//! leaves the tree, the next unreached node starts a new component.

use super::tree::{self, Tree, TreeEdge};
use super::util::slack;
use crate::graphlib::{EdgeId, NodeId};
use crate::LayoutGraph;

pub fn feasible_tree(g: &mut LayoutGraph) -> crate::Result<Tree> {
    let mut t = tree::empty_tree(g);
    let Some(start) = g.nodes().next() else {
        return Ok(t);
    };
    tree::add_member(&mut t, start);

    let size = g.node_count();
    while tight_tree(&mut t, g)? < size {
        match find_min_slack_edge(&t, g) {
            Some(e) => {
                let Some((v, _)) = g.endpoints(e) else {
                    break;
                };
                let delta = if tree::is_member(&t, v) {
                    slack(g, e)
                } else {
                    -slack(g, e)
                };
                shift_ranks(&t, g, delta);
            }
            None => {
                let Some(next) = g.nodes().find(|&v| !tree::is_member(&t, v)) else {
                    break;
                };
                tree::add_member(&mut t, next);
            }
        }
    }
    Ok(t)
}

/// Extends the tree depth-first along tight edges from every current member. Returns the
/// member count.
fn tight_tree(t: &mut Tree, g: &LayoutGraph) -> crate::Result<usize> {
    let starts = t.graph().members.clone();
    let mut frames: Vec<(NodeId, Vec<EdgeId>, usize)> = Vec::new();
    for start in starts {
        frames.push((start, g.node_edges(start), 0));
        while let Some((v, edges, i)) = frames.last_mut() {
            let v = *v;
            let Some(&e) = edges.get(*i) else {
                frames.pop();
                continue;
            };
            *i += 1;
            let Some((a, b)) = g.endpoints(e) else {
                continue;
            };
            let w = if a == v { b } else { a };
            if tree::is_member(t, w) || slack(g, e) != 0 {
                continue;
            }
            tree::add_member(t, w);
            t.add_edge(v, w, TreeEdge::default())?;
            frames.push((w, g.node_edges(w), 0));
        }
    }
    Ok(t.graph().members.len())
}

/// The first edge with exactly one endpoint in the tree and the smallest slack.
fn find_min_slack_edge(t: &Tree, g: &LayoutGraph) -> Option<EdgeId> {
    let mut best: Option<(i32, EdgeId)> = None;
    for (e, key, _) in g.edge_entries() {
        if tree::is_member(t, key.v) == tree::is_member(t, key.w) {
            continue;
        }
        let s = slack(g, e);
        if best.is_none_or(|(b, _)| s < b) {
            best = Some((s, e));
        }
    }
    best.map(|(_, e)| e)
}

fn shift_ranks(t: &Tree, g: &mut LayoutGraph, delta: i32) {
    for &v in &t.graph().members {
        let label = &mut g[v];
        label.rank = Some(label.rank.unwrap_or(0) + delta);
    }
}
