use super::LayerGraph;
use crate::graphlib::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: NodeId,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Weighted mean order of each movable node's in-neighbors. Nodes without in-edges get no
/// barycenter.
pub fn barycenter(lg: &LayerGraph, movable: &[NodeId]) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|&v| {
            let mut in_edges = lg.in_edges(v).peekable();
            if in_edges.peek().is_none() {
                return BarycenterEntry {
                    v,
                    barycenter: None,
                    weight: None,
                };
            }
            let (sum, weight) = in_edges.fold((0.0, 0.0), |(sum, weight), e| {
                let edge_weight = lg[e].weight;
                let u_order = lg
                    .endpoints(e)
                    .and_then(|(u, _)| lg[u].order)
                    .unwrap_or(0) as f64;
                (sum + edge_weight * u_order, weight + edge_weight)
            });
            BarycenterEntry {
                v,
                barycenter: Some(sum / weight),
                weight: Some(weight),
            }
        })
        .collect()
}
