//! Greedy feedback arc set (Eades, Lin & Smyth).
//!
//! Nodes are kept in buckets keyed by `out - in` weight. Sinks and sources are drained first;
//! when only cyclic structure remains, the node with the highest `out - in` is removed and its
//! remaining incoming edges join the feedback set. Used by `acyclic` when the `greedy` acyclicer
//! is selected.

use crate::data::list::BucketQueue;
use crate::graphlib::{EdgeId, Graph, NodeId};
use rustc_hash::FxHashMap as HashMap;

pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeId> {
    greedy_fas_with_weight(g, |_| 1)
}

/// Aggregated simple view of the input: one weighted pair per ordered `(v, w)`.
struct FasState {
    pairs: Vec<(NodeId, NodeId, i64)>,
    in_pairs: Vec<Vec<usize>>,
    out_pairs: Vec<Vec<usize>>,
    in_w: Vec<i64>,
    out_w: Vec<i64>,
    alive: Vec<bool>,
    remaining: usize,
    queue: BucketQueue,
    zero_idx: i64,
}

impl FasState {
    fn assign_bucket(&mut self, v: NodeId) {
        let i = v.index();
        let last = self.queue.bucket_count() - 1;
        let bucket = if self.out_w[i] == 0 {
            0
        } else if self.in_w[i] == 0 {
            last
        } else {
            (self.out_w[i] - self.in_w[i] + self.zero_idx).clamp(0, last as i64) as usize
        };
        self.queue.enqueue(bucket, i);
    }

    fn remove_node(&mut self, v: NodeId, feedback: Option<&mut Vec<(NodeId, NodeId)>>) {
        let i = v.index();
        if !std::mem::replace(&mut self.alive[i], false) {
            return;
        }
        self.remaining -= 1;
        self.queue.remove(i);

        let mut feedback = feedback;
        for k in 0..self.in_pairs[i].len() {
            let (u, _, weight) = self.pairs[self.in_pairs[i][k]];
            if !self.alive[u.index()] {
                continue;
            }
            if let Some(out) = feedback.as_deref_mut() {
                out.push((u, v));
            }
            self.out_w[u.index()] -= weight;
            self.assign_bucket(u);
        }
        for k in 0..self.out_pairs[i].len() {
            let (_, w, weight) = self.pairs[self.out_pairs[i][k]];
            if !self.alive[w.index()] {
                continue;
            }
            self.in_w[w.index()] -= weight;
            self.assign_bucket(w);
        }
    }
}

pub fn greedy_fas_with_weight<N, E, G>(
    g: &Graph<N, E, G>,
    weight_fn: impl Fn(&E) -> i64,
) -> Vec<EdgeId> {
    if g.node_count() <= 1 {
        return Vec::new();
    }

    let bound = g.node_bound();
    let mut in_w = vec![0i64; bound];
    let mut out_w = vec![0i64; bound];
    let mut pairs: Vec<(NodeId, NodeId, i64)> = Vec::new();
    let mut pair_index: HashMap<(NodeId, NodeId), usize> = HashMap::default();
    let mut in_pairs: Vec<Vec<usize>> = vec![Vec::new(); bound];
    let mut out_pairs: Vec<Vec<usize>> = vec![Vec::new(); bound];
    let (mut max_in, mut max_out) = (0i64, 0i64);

    for (_, key, label) in g.edge_entries() {
        if key.v == key.w {
            continue;
        }
        let weight = weight_fn(label);
        match pair_index.get(&(key.v, key.w)) {
            Some(&p) => pairs[p].2 += weight,
            None => {
                let p = pairs.len();
                pairs.push((key.v, key.w, weight));
                pair_index.insert((key.v, key.w), p);
                out_pairs[key.v.index()].push(p);
                in_pairs[key.w.index()].push(p);
            }
        }
        out_w[key.v.index()] += weight;
        max_out = max_out.max(out_w[key.v.index()]);
        in_w[key.w.index()] += weight;
        max_in = max_in.max(in_w[key.w.index()]);
    }

    let buckets = (max_out + max_in + 3).max(3) as usize;
    let mut state = FasState {
        pairs,
        in_pairs,
        out_pairs,
        in_w,
        out_w,
        alive: vec![false; bound],
        remaining: g.node_count(),
        queue: BucketQueue::new(buckets, bound),
        zero_idx: max_in + 1,
    };
    for v in g.nodes() {
        state.alive[v.index()] = true;
        state.assign_bucket(v);
    }

    let last = buckets - 1;
    let mut feedback: Vec<(NodeId, NodeId)> = Vec::new();
    while state.remaining > 0 {
        while let Some(i) = state.queue.dequeue(0) {
            state.remove_node(NodeId::new(i), None);
        }
        while let Some(i) = state.queue.dequeue(last) {
            state.remove_node(NodeId::new(i), None);
        }
        if state.remaining == 0 {
            break;
        }
        let Some(i) = (1..last).rev().find_map(|b| state.queue.dequeue(b)) else {
            break;
        };
        state.remove_node(NodeId::new(i), Some(&mut feedback));
    }

    feedback
        .into_iter()
        .flat_map(|(u, v)| g.out_edges_to(u, v).collect::<Vec<_>>())
        .collect()
}
