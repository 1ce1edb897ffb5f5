//! Reconcile barycenters with the constraint graph.
//!
//! A constraint edge `v -> w` asks for `v` to stay left of `w`. When the barycenters disagree
//! (or one is missing), the two entries are merged into one group whose barycenter is the
//! weighted mean of both. Groups come out in the order they were resolved; `i` is the smallest
//! original index in the group.

use super::{BarycenterEntry, ConstraintGraph};
use crate::graphlib::NodeId;
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    pub vs: Vec<NodeId>,
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone)]
struct Conflict {
    indegree: usize,
    ins: Vec<usize>,
    outs: Vec<usize>,
    vs: Vec<NodeId>,
    i: usize,
    barycenter: Option<f64>,
    weight: Option<f64>,
    merged: bool,
}

pub fn resolve_conflicts(entries: &[BarycenterEntry], cg: &ConstraintGraph) -> Vec<SortEntry> {
    let mut conflicts: Vec<Conflict> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| Conflict {
            indegree: 0,
            ins: Vec::new(),
            outs: Vec::new(),
            vs: vec![entry.v],
            i,
            barycenter: entry.barycenter,
            weight: entry.barycenter.and(entry.weight),
            merged: false,
        })
        .collect();

    let index: HashMap<NodeId, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.v, i))
        .collect();
    for (_, key, _) in cg.edge_entries() {
        let (Some(&v), Some(&w)) = (index.get(&key.v), index.get(&key.w)) else {
            continue;
        };
        conflicts[w].indegree += 1;
        conflicts[v].outs.push(w);
    }

    let mut sources: Vec<usize> = (0..conflicts.len())
        .filter(|&i| conflicts[i].indegree == 0)
        .collect();
    let mut resolved: Vec<usize> = Vec::new();
    while let Some(v) = sources.pop() {
        resolved.push(v);

        let ins = std::mem::take(&mut conflicts[v].ins);
        for u in ins.into_iter().rev() {
            if conflicts[u].merged {
                continue;
            }
            let out_of_order = match (conflicts[u].barycenter, conflicts[v].barycenter) {
                (Some(ub), Some(vb)) => ub >= vb,
                _ => true,
            };
            if out_of_order {
                merge(&mut conflicts, v, u);
            }
        }

        let outs = std::mem::take(&mut conflicts[v].outs);
        for w in outs {
            conflicts[w].ins.push(v);
            conflicts[w].indegree -= 1;
            if conflicts[w].indegree == 0 {
                sources.push(w);
            }
        }
    }

    let unmerged: Vec<usize> = resolved
        .into_iter()
        .filter(|&i| !conflicts[i].merged)
        .collect();
    unmerged
        .into_iter()
        .map(|i| {
            let c = &mut conflicts[i];
            SortEntry {
                vs: std::mem::take(&mut c.vs),
                i: c.i,
                barycenter: c.barycenter,
                weight: c.weight,
            }
        })
        .collect()
}

/// Folds `source` into `target`; the source's nodes go first.
fn merge(conflicts: &mut [Conflict], target: usize, source: usize) {
    let mut sum = 0.0;
    let mut weight = 0.0;
    for c in [&conflicts[target], &conflicts[source]] {
        if let (Some(b), Some(w)) = (c.barycenter, c.weight) {
            if w != 0.0 {
                sum += b * w;
                weight += w;
            }
        }
    }

    let source_i = conflicts[source].i;
    let mut vs = std::mem::take(&mut conflicts[source].vs);
    conflicts[source].merged = true;

    let t = &mut conflicts[target];
    vs.append(&mut t.vs);
    t.vs = vs;
    if weight != 0.0 {
        t.barycenter = Some(sum / weight);
        t.weight = Some(weight);
    }
    t.i = t.i.min(source_i);
}
