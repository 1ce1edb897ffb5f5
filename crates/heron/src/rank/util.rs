//! Rank helpers (longest path, slack).

use crate::graphlib::{EdgeId, NodeId};
use crate::LayoutGraph;

/// Places every node on the lowest rank its out-edges allow, walking depth-first from the
/// sources. A node without out-edges gets rank 0; ranks grow more negative towards sources.
pub fn longest_path(g: &mut LayoutGraph) {
    let bound = g.node_bound();
    let mut ranks: Vec<Option<i32>> = vec![None; bound];
    let mut visited = vec![false; bound];
    // (node, out-edges, next edge, lowest candidate so far)
    let mut frames: Vec<(NodeId, Vec<EdgeId>, usize, Option<i32>)> = Vec::new();

    for source in g.sources() {
        if std::mem::replace(&mut visited[source.index()], true) {
            continue;
        }
        frames.push((source, g.out_edges(source).collect(), 0, None));

        while let Some((v, edges, i, best)) = frames.last_mut() {
            let Some(&e) = edges.get(*i) else {
                ranks[v.index()] = Some(best.unwrap_or(0));
                frames.pop();
                continue;
            };
            let Some((_, w)) = g.endpoints(e) else {
                *i += 1;
                continue;
            };
            match ranks[w.index()] {
                Some(w_rank) => {
                    let candidate = w_rank - g[e].minlen as i32;
                    *best = Some(best.map_or(candidate, |b| b.min(candidate)));
                    *i += 1;
                }
                None if visited[w.index()] => *i += 1,
                None => {
                    visited[w.index()] = true;
                    frames.push((w, g.out_edges(w).collect(), 0, None));
                }
            }
        }
    }

    for (v, label) in g.node_labels_mut() {
        if let Some(rank) = ranks[v.index()] {
            label.rank = Some(rank);
        }
    }
}

/// How many ranks an edge could shrink by: `rank(w) - rank(v) - minlen`.
pub fn slack(g: &LayoutGraph, e: EdgeId) -> i32 {
    let Some((v, w)) = g.endpoints(e) else {
        return 0;
    };
    let v_rank = g[v].rank.unwrap_or(0);
    let w_rank = g[w].rank.unwrap_or(0);
    w_rank - v_rank - g[e].minlen as i32
}
