//! Network simplex ranker (Gansner et al., "A Technique for Drawing Directed Graphs").
//!
//! Starting from a feasible tree, repeatedly swap a tree edge with a negative cut value for the
//! non-tree edge of minimum slack that reconnects the two halves, until every cut value is
//! non-negative. Each swap renumbers the tree (low/lim), recomputes cut values and re-derives
//! ranks from the tree.

use super::feasible_tree::feasible_tree;
use super::tree::{self, Tree, TreeEdge};
use super::util::{longest_path, slack};
use crate::graphlib::{EdgeId, NodeId, alg};
use crate::util::simplify;
use crate::LayoutGraph;

pub fn network_simplex(g: &mut LayoutGraph) -> crate::Result<()> {
    let mut s = simplify(g)?;
    solve(&mut s)?;
    for (v, label) in s.node_labels() {
        if let Some(n) = g.node_mut(v) {
            n.rank = label.rank;
        }
    }
    Ok(())
}

/// Ranks a simple graph in place and returns the final spanning tree, whose cut values are all
/// non-negative unless the iteration limit was hit.
pub fn solve(s: &mut LayoutGraph) -> crate::Result<Tree> {
    longest_path(s);
    let mut t = feasible_tree(s)?;
    init_low_lim_values(&mut t);
    init_cut_values(&mut t, s);

    let limit = (s.node_count() + 1) * (s.edge_count() + 1);
    let mut iterations = 0usize;
    while let Some(e) = leave_edge(&t) {
        if iterations == limit {
            tracing::warn!(iterations, "network simplex hit its iteration limit");
            break;
        }
        iterations += 1;
        let Some(f) = enter_edge(&t, s, e) else {
            tracing::warn!("network simplex found no entering edge");
            break;
        };
        exchange_edges(&mut t, s, e, f)?;
    }
    tracing::trace!(iterations, "network simplex converged");
    Ok(t)
}

/// Numbers the tree in postorder: `lim` is a node's own number, `low` the smallest number in
/// its subtree. Also records each node's tree parent. Components are rooted at their first
/// member.
pub fn init_low_lim_values(t: &mut Tree) {
    let members = t.graph().members.clone();
    let mut visited = vec![false; t.node_bound()];
    let mut next_lim = 1;
    // (node, parent, neighbors, next neighbor, low)
    let mut frames: Vec<(NodeId, Option<NodeId>, Vec<NodeId>, usize, i32)> = Vec::new();

    for root in members {
        if std::mem::replace(&mut visited[root.index()], true) {
            continue;
        }
        frames.push((root, None, t.neighbors(root), 0, next_lim));
        while let Some((v, parent, neighbors, i, low)) = frames.last_mut() {
            if let Some(&w) = neighbors.get(*i) {
                *i += 1;
                if !std::mem::replace(&mut visited[w.index()], true) {
                    let v = *v;
                    frames.push((w, Some(v), t.neighbors(w), 0, next_lim));
                }
                continue;
            }
            let (v, parent, low) = (*v, *parent, *low);
            frames.pop();
            let label = &mut t[v];
            label.low = low;
            label.lim = next_lim;
            label.parent = parent;
            next_lim += 1;
        }
    }
}

/// Computes the cut value of every tree edge, children before parents.
pub fn init_cut_values(t: &mut Tree, g: &LayoutGraph) {
    let members = t.graph().members.clone();
    for v in alg::postorder(t, &members) {
        let Some(parent) = t[v].parent else {
            continue;
        };
        let cutvalue = calc_cut_value(t, g, v);
        if let Some(e) = tree::tree_edge(t, v, parent) {
            t[e].cutvalue = cutvalue;
        }
    }
}

/// Cut value of the tree edge between `child` and its parent, assuming the cut values of the
/// edges below `child` are already known.
pub fn calc_cut_value(t: &Tree, g: &LayoutGraph, child: NodeId) -> f64 {
    let Some(parent) = t[child].parent else {
        return 0.0;
    };
    let (graph_edge, child_is_tail) = match g.find_edge(child, parent, None) {
        Some(e) => (e, true),
        None => match g.find_edge(parent, child, None) {
            Some(e) => (e, false),
            None => return 0.0,
        },
    };

    let mut cut_value = g[graph_edge].weight;
    for e in g.node_edges(child) {
        let Some((a, b)) = g.endpoints(e) else {
            continue;
        };
        let is_out_edge = a == child;
        let other = if is_out_edge { b } else { a };
        if other == parent {
            continue;
        }
        let points_to_head = is_out_edge == child_is_tail;
        let other_weight = g[e].weight;
        cut_value += if points_to_head {
            other_weight
        } else {
            -other_weight
        };
        if let Some(te) = tree::tree_edge(t, child, other) {
            let other_cut_value = t[te].cutvalue;
            cut_value += if points_to_head {
                -other_cut_value
            } else {
                other_cut_value
            };
        }
    }
    cut_value
}

/// First tree edge (in insertion order) with a negative cut value.
pub fn leave_edge(t: &Tree) -> Option<EdgeId> {
    t.edge_entries()
        .find(|(_, _, label)| label.cutvalue < 0.0)
        .map(|(e, _, _)| e)
}

/// The minimum-slack graph edge that crosses the cut `tree_edge` induces in the same direction
/// as the tree edge's graph counterpart.
pub fn enter_edge(t: &Tree, g: &LayoutGraph, tree_edge: EdgeId) -> Option<EdgeId> {
    let (mut v, mut w) = t.endpoints(tree_edge)?;
    if g.find_edge(v, w, None).is_none() {
        std::mem::swap(&mut v, &mut w);
    }

    let (v_label, w_label) = (&t[v], &t[w]);
    let (tail_label, flip) = if v_label.lim > w_label.lim {
        (w_label, true)
    } else {
        (v_label, false)
    };

    let mut best: Option<(i32, EdgeId)> = None;
    for (e, key, _) in g.edge_entries() {
        let crosses = flip == tree::is_descendant(&t[key.v], tail_label)
            && flip != tree::is_descendant(&t[key.w], tail_label);
        if !crosses {
            continue;
        }
        let s = slack(g, e);
        if best.is_none_or(|(b, _)| s < b) {
            best = Some((s, e));
        }
    }
    best.map(|(_, e)| e)
}

pub fn exchange_edges(
    t: &mut Tree,
    g: &mut LayoutGraph,
    leaving: EdgeId,
    entering: EdgeId,
) -> crate::Result<()> {
    t.remove_edge(leaving);
    if let Some((v, w)) = g.endpoints(entering) {
        t.add_edge(v, w, TreeEdge::default())?;
    }
    init_low_lim_values(t);
    init_cut_values(t, g);
    update_ranks(t, g);
    Ok(())
}

/// Re-derives ranks top-down from each component root so every tree edge is tight.
pub fn update_ranks(t: &Tree, g: &mut LayoutGraph) {
    let roots: Vec<NodeId> = t
        .graph()
        .members
        .iter()
        .copied()
        .filter(|&v| t[v].parent.is_none())
        .collect();
    for root in roots {
        for v in alg::preorder(t, &[root]).into_iter().skip(1) {
            let Some(parent) = t[v].parent else {
                continue;
            };
            let (minlen, flipped) = match g.find_edge(v, parent, None) {
                Some(e) => (g[e].minlen as i32, false),
                None => match g.find_edge(parent, v, None) {
                    Some(e) => (g[e].minlen as i32, true),
                    None => continue,
                },
            };
            let parent_rank = g[parent].rank.unwrap_or(0);
            g[v].rank = Some(if flipped {
                parent_rank + minlen
            } else {
                parent_rank - minlen
            });
        }
    }
}
