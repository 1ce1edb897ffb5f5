use super::LayerGraph;
use crate::graphlib::{Graph, GraphOptions, NodeId};
use crate::LayoutGraph;

/// Left-to-right precedence between sibling subgraphs, accumulated over one sweep.
pub type ConstraintGraph = Graph<(), (), ()>;

/// An edgeless constraint graph over the layout graph's node handles.
pub fn constraint_graph(g: &LayoutGraph) -> ConstraintGraph {
    g.filter_map_as(GraphOptions::default(), (), |_, _| Some(()), |_, _, _| None)
}

/// Records, for the sorted layer `vs`, that each subgraph stays left of the next sibling
/// subgraph met after it.
pub fn add_subgraph_constraints(
    lg: &LayerGraph,
    cg: &mut ConstraintGraph,
    vs: &[NodeId],
) -> crate::Result<()> {
    let mut prev: Vec<Option<NodeId>> = vec![None; lg.node_bound()];
    let mut root_prev: Option<NodeId> = None;

    for &v in vs {
        let mut child = lg.parent(v);
        while let Some(c) = child {
            let parent = lg.parent(c);
            let prev_child = match parent {
                Some(p) => prev[p.index()].replace(c),
                None => root_prev.replace(c),
            };
            if let Some(prev_child) = prev_child.filter(|&pc| pc != c) {
                if cg.contains_node(prev_child) && cg.contains_node(c) {
                    cg.add_edge(prev_child, c, ())?;
                }
                break;
            }
            child = parent;
        }
    }
    Ok(())
}
