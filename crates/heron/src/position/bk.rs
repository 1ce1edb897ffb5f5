//! Brandes & Köpf horizontal coordinate assignment.
//!
//! "Fast and Simple Horizontal Coordinate Assignment" (Brandes, Köpf, 2002). Four candidate
//! layouts are built, one per combination of vertical (up/down) and horizontal (left/right)
//! bias. Each aligns nodes into vertical blocks with a median neighbor, then compacts the
//! blocks horizontally. The candidates are aligned to the narrowest one and balanced.

use crate::graphlib::{Graph, GraphOptions, NodeId};
use crate::util::build_layer_matrix;
use crate::{Align, BorderSide, LabelPos, LayoutGraph};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

/// Unordered node pairs whose segments must not be aligned.
pub type Conflicts = HashSet<(NodeId, NodeId)>;

/// x coordinate per node.
pub type Xs = HashMap<NodeId, f64>;

pub fn add_conflict(conflicts: &mut Conflicts, v: NodeId, w: NodeId) {
    conflicts.insert((v.min(w), v.max(w)));
}

pub fn has_conflict(conflicts: &Conflicts, v: NodeId, w: NodeId) -> bool {
    conflicts.contains(&(v.min(w), v.max(w)))
}

fn is_dummy(g: &LayoutGraph, v: NodeId) -> bool {
    g[v].dummy.is_some()
}

fn order_of(g: &LayoutGraph, v: NodeId) -> usize {
    g[v].order.unwrap_or(0)
}

/// Type-1 conflicts: a non-inner segment crossing an inner segment (one between two dummies).
/// Inner segments win, so the crossing non-inner segment is marked.
pub fn find_type1_conflicts(g: &LayoutGraph, layering: &[Vec<NodeId>]) -> Conflicts {
    let mut conflicts = Conflicts::default();
    for pair in layering.windows(2) {
        let (prev_layer, layer) = (&pair[0], &pair[1]);
        let mut k0 = 0usize;
        let mut scan_pos = 0usize;
        let last = layer.last().copied();

        for (i, &v) in layer.iter().enumerate() {
            let w = find_other_inner_segment_node(g, v);
            let k1 = w.map_or(prev_layer.len(), |w| order_of(g, w));
            if w.is_none() && Some(v) != last {
                continue;
            }
            for &scan_node in &layer[scan_pos..=i] {
                for u in g.predecessors(scan_node) {
                    let u_pos = order_of(g, u);
                    if (u_pos < k0 || k1 < u_pos) && !(is_dummy(g, u) && is_dummy(g, scan_node)) {
                        add_conflict(&mut conflicts, u, scan_node);
                    }
                }
            }
            scan_pos = i + 1;
            k0 = k1;
        }
    }
    conflicts
}

/// Type-2 conflicts: two inner segments crossing, which only happens around subgraph borders.
pub fn find_type2_conflicts(g: &LayoutGraph, layering: &[Vec<NodeId>]) -> Conflicts {
    let mut conflicts = Conflicts::default();

    let scan = |conflicts: &mut Conflicts,
                south: &[NodeId],
                range: std::ops::Range<usize>,
                prev_north_border: Option<usize>,
                next_north_border: Option<usize>| {
        for &v in &south[range] {
            if !is_dummy(g, v) {
                continue;
            }
            for u in g.predecessors(v) {
                if !is_dummy(g, u) {
                    continue;
                }
                let u_order = order_of(g, u);
                let before = prev_north_border.is_some_and(|b| u_order < b);
                let after = next_north_border.is_some_and(|b| u_order > b);
                if before || after {
                    add_conflict(conflicts, u, v);
                }
            }
        }
    };

    for pair in layering.windows(2) {
        let (north, south) = (&pair[0], &pair[1]);
        // `None` as the previous border means "before the first node".
        let mut prev_north_pos: Option<usize> = None;
        let mut next_north_pos: Option<usize> = None;
        let mut south_pos = 0usize;

        for (lookahead, &v) in south.iter().enumerate() {
            if g[v].dummy == Some(crate::Dummy::Border) {
                if let Some(&u) = g.predecessors(v).first() {
                    next_north_pos = Some(order_of(g, u));
                    scan(
                        &mut conflicts,
                        south,
                        south_pos..lookahead,
                        prev_north_pos,
                        next_north_pos,
                    );
                    south_pos = lookahead;
                    prev_north_pos = next_north_pos;
                }
            }
            scan(
                &mut conflicts,
                south,
                south_pos..south.len(),
                next_north_pos,
                next_north_pos.map(|_| north.len()),
            );
        }
    }
    conflicts
}

fn find_other_inner_segment_node(g: &LayoutGraph, v: NodeId) -> Option<NodeId> {
    if !is_dummy(g, v) {
        return None;
    }
    g.predecessors(v).into_iter().find(|&u| is_dummy(g, u))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Block root of every node.
    pub root: HashMap<NodeId, NodeId>,
    /// Next node in the node's block, cycling back to the root.
    pub align: HashMap<NodeId, NodeId>,
}

/// Aligns each node with its median neighbor(s) in the previous layer of `layering`, unless the
/// connecting segment is marked as a conflict or would cross an alignment made earlier in the
/// layer.
pub fn vertical_alignment(
    layering: &[Vec<NodeId>],
    conflicts: &Conflicts,
    neighbor_fn: impl Fn(NodeId) -> Vec<NodeId>,
) -> Alignment {
    let mut root: HashMap<NodeId, NodeId> = HashMap::default();
    let mut align: HashMap<NodeId, NodeId> = HashMap::default();
    let mut pos: HashMap<NodeId, usize> = HashMap::default();
    for layer in layering {
        for (order, &v) in layer.iter().enumerate() {
            root.insert(v, v);
            align.insert(v, v);
            pos.insert(v, order);
        }
    }
    let pos_of = |w: &NodeId| pos.get(w).copied().unwrap_or(usize::MAX);

    for layer in layering {
        let mut prev_idx: Option<usize> = None;
        for &v in layer {
            let mut ws = neighbor_fn(v);
            if ws.is_empty() {
                continue;
            }
            ws.sort_by_key(pos_of);
            let mp = (ws.len() - 1) as f64 / 2.0;
            for &w in &ws[mp.floor() as usize..=mp.ceil() as usize] {
                let w_pos = pos_of(&w);
                let unaligned = align.get(&v) == Some(&v);
                if unaligned
                    && prev_idx.is_none_or(|p| p < w_pos)
                    && !has_conflict(conflicts, v, w)
                {
                    let w_root = root.get(&w).copied().unwrap_or(w);
                    align.insert(w, v);
                    align.insert(v, w_root);
                    root.insert(v, w_root);
                    prev_idx = Some(w_pos);
                }
            }
        }
    }

    Alignment { root, align }
}

type BlockGraph = Graph<(), f64, ()>;

/// Places every block as far left as separation allows, then pulls blocks right where that
/// removes slack. `reverse_sep` is set for the right-biased candidates, which are computed on
/// mirrored layers.
pub fn horizontal_compaction(
    g: &LayoutGraph,
    layering: &[Vec<NodeId>],
    root: &HashMap<NodeId, NodeId>,
    align: &HashMap<NodeId, NodeId>,
    reverse_sep: bool,
) -> crate::Result<Xs> {
    let block_g = build_block_graph(g, layering, root, reverse_sep)?;
    let border_type = if reverse_sep {
        BorderSide::Left
    } else {
        BorderSide::Right
    };
    let mut xs: Xs = HashMap::default();

    iterate(
        &block_g,
        |v| block_g.predecessors(v),
        |v| {
            let x = block_g
                .in_edges(v)
                .filter_map(|e| {
                    let (u, _) = block_g.endpoints(e)?;
                    Some(xs.get(&u).copied().unwrap_or(0.0) + block_g[e])
                })
                .fold(0.0, f64::max);
            xs.insert(v, x);
        },
    );

    iterate(
        &block_g,
        |v| block_g.successors(v),
        |v| {
            let min = block_g
                .out_edges(v)
                .filter_map(|e| {
                    let (_, w) = block_g.endpoints(e)?;
                    Some(xs.get(&w).copied().unwrap_or(0.0) - block_g[e])
                })
                .fold(f64::INFINITY, f64::min);
            if min.is_finite() && g[v].border_type != Some(border_type) {
                let cur = xs.get(&v).copied().unwrap_or(0.0);
                xs.insert(v, cur.max(min));
            }
        },
    );

    Ok(align
        .keys()
        .map(|&v| {
            let r = root.get(&v).copied().unwrap_or(v);
            (v, xs.get(&r).copied().unwrap_or(0.0))
        })
        .collect())
}

/// Depth-first over the block graph: `set` runs on a node once everything `next` returns for it
/// has been handled.
fn iterate(
    block_g: &BlockGraph,
    next: impl Fn(NodeId) -> Vec<NodeId>,
    mut set: impl FnMut(NodeId),
) {
    let mut stack: Vec<NodeId> = block_g.node_ids();
    let mut visited = vec![false; block_g.node_bound()];
    while let Some(v) = stack.pop() {
        if visited[v.index()] {
            set(v);
            continue;
        }
        visited[v.index()] = true;
        stack.push(v);
        stack.extend(next(v));
    }
}

/// One node per block root; an edge `u -> v` between the roots of horizontally adjacent nodes
/// carries the largest separation required between them.
fn build_block_graph(
    g: &LayoutGraph,
    layering: &[Vec<NodeId>],
    root: &HashMap<NodeId, NodeId>,
    reverse_sep: bool,
) -> crate::Result<BlockGraph> {
    let root_of = |v: NodeId| root.get(&v).copied().unwrap_or(v);
    let mut is_root = vec![false; g.node_bound()];
    for &v in layering.iter().flatten() {
        if let Some(slot) = is_root.get_mut(root_of(v).index()) {
            *slot = true;
        }
    }

    let mut block_g: BlockGraph = g.filter_map_as(
        GraphOptions::default(),
        (),
        |v, _| is_root[v.index()].then_some(()),
        |_, _, _| None,
    );
    for layer in layering {
        for pair in layer.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            let (u_root, v_root) = (root_of(u), root_of(v));
            let s = sep(g, v, u, reverse_sep);
            match block_g.find_edge(u_root, v_root, None) {
                Some(e) => block_g[e] = block_g[e].max(s),
                None => {
                    block_g.add_edge(u_root, v_root, s)?;
                }
            }
        }
    }
    Ok(block_g)
}

/// Minimum center distance between `v` and its left neighbor `w`.
fn sep(g: &LayoutGraph, v: NodeId, w: NodeId, reverse_sep: bool) -> f64 {
    let options = &g.graph().options;
    let (v_label, w_label) = (&g[v], &g[w]);
    let spacing = |dummy: bool| if dummy { options.edgesep } else { options.nodesep };
    let signed = |delta: f64| if reverse_sep { delta } else { -delta };

    let mut sum = v_label.width / 2.0;
    sum += match v_label.labelpos {
        Some(LabelPos::L) => signed(-v_label.width / 2.0),
        Some(LabelPos::R) => signed(v_label.width / 2.0),
        _ => 0.0,
    };
    sum += spacing(v_label.dummy.is_some()) / 2.0;
    sum += spacing(w_label.dummy.is_some()) / 2.0;
    sum += w_label.width / 2.0;
    sum += match w_label.labelpos {
        Some(LabelPos::L) => signed(w_label.width / 2.0),
        Some(LabelPos::R) => signed(-w_label.width / 2.0),
        _ => 0.0,
    };
    sum
}

fn extent(g: &LayoutGraph, xs: &Xs) -> (f64, f64) {
    xs.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (&v, &x)| {
        let half = g.node(v).map_or(0.0, |n| n.width / 2.0);
        (min.min(x - half), max.max(x + half))
    })
}

/// The candidate with the smallest overall width (node extents included). Earlier candidates
/// win ties.
pub fn find_smallest_width_alignment(g: &LayoutGraph, xss: &HashMap<Align, Xs>) -> Xs {
    let mut best: Option<(f64, &Xs)> = None;
    for align in Align::ALL {
        let Some(xs) = xss.get(&align) else {
            continue;
        };
        let (min, max) = extent(g, xs);
        let width = max - min;
        if best.is_none_or(|(w, _)| width < w) {
            best = Some((width, xs));
        }
    }
    best.map(|(_, xs)| xs.clone()).unwrap_or_default()
}

/// Shifts the left-biased candidates so their minimum matches `align_to`'s, and the
/// right-biased ones so their maximum does.
pub fn align_coordinates(xss: &mut HashMap<Align, Xs>, align_to: &Xs) {
    let (to_min, to_max) = min_max(align_to.values().copied());
    for align in Align::ALL {
        let Some(xs) = xss.get_mut(&align) else {
            continue;
        };
        let (min, max) = min_max(xs.values().copied());
        let delta = if align.is_left() {
            to_min - min
        } else {
            to_max - max
        };
        if delta != 0.0 && delta.is_finite() {
            for x in xs.values_mut() {
                *x += delta;
            }
        }
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), x| {
        (min.min(x), max.max(x))
    })
}

/// Final x per node: the requested candidate, or the mean of the two middle candidates.
pub fn balance(xss: &HashMap<Align, Xs>, align: Option<Align>) -> Xs {
    let Some(ul) = xss.get(&Align::UL) else {
        return Xs::default();
    };
    ul.keys()
        .map(|&v| {
            if let Some(align) = align {
                let x = xss
                    .get(&align)
                    .and_then(|xs| xs.get(&v))
                    .copied()
                    .unwrap_or(0.0);
                return (v, x);
            }
            let mut vals: Vec<f64> = Align::ALL
                .iter()
                .filter_map(|a| xss.get(a).and_then(|xs| xs.get(&v)).copied())
                .collect();
            vals.sort_by(f64::total_cmp);
            let x = match vals.len() {
                0 => 0.0,
                1 => vals[0],
                n => (vals[(n - 1) / 2] + vals[n / 2]) / 2.0,
            };
            (v, x)
        })
        .collect()
}

pub fn position_x(g: &LayoutGraph) -> crate::Result<Xs> {
    let layering = build_layer_matrix(g);
    let mut conflicts = find_type1_conflicts(g, &layering);
    conflicts.extend(find_type2_conflicts(g, &layering));

    let mut xss: HashMap<Align, Xs> = HashMap::default();
    for align in Align::ALL {
        let mut adjusted: Vec<Vec<NodeId>> = if align.is_up() {
            layering.clone()
        } else {
            layering.iter().rev().cloned().collect()
        };
        if !align.is_left() {
            for layer in &mut adjusted {
                layer.reverse();
            }
        }

        let alignment = if align.is_up() {
            vertical_alignment(&adjusted, &conflicts, |v| g.predecessors(v))
        } else {
            vertical_alignment(&adjusted, &conflicts, |v| g.successors(v))
        };
        let xs = horizontal_compaction(
            g,
            &adjusted,
            &alignment.root,
            &alignment.align,
            !align.is_left(),
        )?;
        let xs = if align.is_left() {
            xs
        } else {
            xs.into_iter().map(|(v, x)| (v, -x)).collect()
        };
        xss.insert(align, xs);
    }

    let smallest = find_smallest_width_alignment(g, &xss);
    align_coordinates(&mut xss, &smallest);
    Ok(balance(&xss, g.graph().options.align))
}
