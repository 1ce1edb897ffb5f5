//! Weighted edge crossings of a layering (Barth, Jünger & Mutzel accumulator tree).

use crate::graphlib::NodeId;
use crate::LayoutGraph;

/// Sum of weighted crossings between each pair of adjacent layers.
pub fn cross_count(g: &LayoutGraph, layering: &[Vec<NodeId>]) -> f64 {
    layering
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[0], &pair[1]))
        .sum()
}

fn two_layer_cross_count(g: &LayoutGraph, north: &[NodeId], south: &[NodeId]) -> f64 {
    if south.is_empty() {
        return 0.0;
    }
    let mut south_pos: Vec<Option<usize>> = vec![None; g.node_bound()];
    for (i, v) in south.iter().enumerate() {
        south_pos[v.index()] = Some(i);
    }

    // (south position, weight), grouped by north node and sorted by position within a group.
    let mut south_entries: Vec<(usize, f64)> = Vec::new();
    for &v in north {
        let mut group: Vec<(usize, f64)> = g
            .out_edges(v)
            .filter_map(|e| {
                let (_, w) = g.endpoints(e)?;
                Some((south_pos[w.index()]?, g[e].weight))
            })
            .collect();
        group.sort_by_key(|&(pos, _)| pos);
        south_entries.extend(group);
    }

    let first_index = south.len().next_power_of_two() - 1;
    let mut tree = vec![0.0f64; 2 * first_index + 1];
    let mut cc = 0.0;
    for (pos, weight) in south_entries {
        let mut index = pos + first_index;
        tree[index] += weight;
        let mut weight_sum = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += weight;
        }
        cc += weight * weight_sum;
    }
    cc
}
