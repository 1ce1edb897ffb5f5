use crate::graphlib::NodeId;
use crate::LayoutGraph;

/// Initial order: a depth-first walk along successors, started from every non-subgraph node in
/// rank order (ties keep graph order). Each rank lists its nodes in discovery order.
pub fn init_order(g: &LayoutGraph) -> Vec<Vec<NodeId>> {
    let mut simple: Vec<(i32, NodeId)> = g
        .node_labels()
        .filter(|&(v, _)| !g.has_children(v))
        .filter_map(|(v, n)| n.rank.map(|r| (r, v)))
        .collect();
    let Some(max_rank) = simple.iter().map(|&(r, _)| r).max() else {
        return Vec::new();
    };
    simple.sort_by_key(|&(rank, _)| rank);

    let mut layers: Vec<Vec<NodeId>> = vec![Vec::new(); (max_rank.max(0) + 1) as usize];
    let mut visited = vec![false; g.node_bound()];
    let mut stack: Vec<NodeId> = Vec::new();
    for (_, start) in simple {
        stack.push(start);
        while let Some(v) = stack.pop() {
            if std::mem::replace(&mut visited[v.index()], true) {
                continue;
            }
            if let Some(layer) = g[v].rank.and_then(|r| layers.get_mut(r.max(0) as usize)) {
                layer.push(v);
            }
            stack.extend(g.successors(v).into_iter().rev());
        }
    }
    layers
}
