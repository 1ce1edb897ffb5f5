//! Re-parent dummy chains in compound graphs.
//!
//! Each dummy of a long edge is moved into the deepest subgraph on the path between the edge's
//! endpoints (through their lowest common ancestor) whose rank span covers the dummy's rank.

use crate::graphlib::NodeId;
use crate::LayoutGraph;

#[derive(Debug, Clone, Copy, Default)]
struct PostorderNum {
    low: usize,
    lim: usize,
}

pub fn parent_dummy_chains(g: &mut LayoutGraph) -> crate::Result<()> {
    let nums = postorder(g);
    let chains = g.graph().dummy_chains.clone();

    for start in chains {
        let Some(key) = g.node(start).and_then(|n| n.edge_obj.clone()) else {
            continue;
        };
        let (path, lca) = find_path(g, &nums, key.v, key.w);

        let mut path_idx = 0usize;
        let mut path_v = path.first().copied().flatten();
        let mut ascending = true;
        let mut v = start;

        while v != key.w {
            let rank = g[v].rank.unwrap_or(0);

            if ascending {
                while path_v != lca
                    && path_v
                        .and_then(|p| g[p].max_rank)
                        .is_some_and(|max| max < rank)
                {
                    path_idx += 1;
                    path_v = path.get(path_idx).copied().flatten();
                }
                if path_v == lca {
                    ascending = false;
                }
            }

            if !ascending {
                while path_idx + 1 < path.len()
                    && path[path_idx + 1]
                        .and_then(|p| g[p].min_rank)
                        .is_some_and(|min| min <= rank)
                {
                    path_idx += 1;
                }
                path_v = path.get(path_idx).copied().flatten();
            }

            g.set_parent(v, path_v)?;

            let Some(next) = g.successors(v).first().copied() else {
                break;
            };
            v = next;
        }
    }
    Ok(())
}

/// Ancestors of `v` up to the lowest common ancestor of `v` and `w`, followed by the ancestors
/// of `w` below it, top-down. `None` stands for the graph root.
fn find_path(
    g: &LayoutGraph,
    nums: &[PostorderNum],
    v: NodeId,
    w: NodeId,
) -> (Vec<Option<NodeId>>, Option<NodeId>) {
    let (v_num, w_num) = (nums[v.index()], nums[w.index()]);
    let low = v_num.low.min(w_num.low);
    let lim = v_num.lim.max(w_num.lim);

    let mut path: Vec<Option<NodeId>> = Vec::new();
    let mut cur = v;
    let lca = loop {
        let parent = g.parent(cur);
        path.push(parent);
        let Some(p) = parent else {
            break None;
        };
        let num = nums[p.index()];
        if num.low <= low && lim <= num.lim {
            break Some(p);
        }
        cur = p;
    };

    let mut w_path: Vec<Option<NodeId>> = Vec::new();
    let mut cur = w;
    while let Some(p) = g.parent(cur) {
        if Some(p) == lca {
            break;
        }
        w_path.push(Some(p));
        cur = p;
    }
    path.extend(w_path.into_iter().rev());
    (path, lca)
}

/// Postorder numbering of the containment tree: `lim` is a node's own number and `low` the
/// smallest number in its subtree.
fn postorder(g: &LayoutGraph) -> Vec<PostorderNum> {
    let mut nums = vec![PostorderNum::default(); g.node_bound()];
    let mut lim = 0usize;
    // (node, children, next child, low)
    let mut frames: Vec<(NodeId, Vec<NodeId>, usize, usize)> = Vec::new();

    for root in g.root_children() {
        frames.push((root, g.children(root).collect(), 0, lim));
        while let Some((v, children, i, low)) = frames.last_mut() {
            if let Some(&child) = children.get(*i) {
                *i += 1;
                frames.push((child, g.children(child).collect(), 0, lim));
                continue;
            }
            nums[v.index()] = PostorderNum { low: *low, lim };
            lim += 1;
            frames.pop();
        }
    }
    nums
}
