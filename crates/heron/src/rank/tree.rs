//! Spanning tree used by the feasible-tree and network simplex rankers.
//!
//! The tree is an undirected graph over the same node handles as the graph being ranked. Every
//! node of that graph is present, but only `members` (in the order they joined) belong to the
//! tree; the rest are isolated until they are pulled in.

use crate::graphlib::{EdgeId, Graph, GraphOptions, NodeId};
use crate::LayoutGraph;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    pub in_tree: bool,
    pub low: i32,
    pub lim: i32,
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeEdge {
    pub cutvalue: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeLabel {
    pub members: Vec<NodeId>,
}

pub type Tree = Graph<TreeNode, TreeEdge, TreeLabel>;

pub fn empty_tree(g: &LayoutGraph) -> Tree {
    g.filter_map_as(
        GraphOptions {
            directed: false,
            multigraph: false,
            compound: false,
        },
        TreeLabel::default(),
        |_, _| Some(TreeNode::default()),
        |_, _, _| None,
    )
}

pub fn add_member(t: &mut Tree, v: NodeId) {
    if let Some(node) = t.node_mut(v) {
        if !node.in_tree {
            node.in_tree = true;
            t.graph_mut().members.push(v);
        }
    }
}

pub fn is_member(t: &Tree, v: NodeId) -> bool {
    t.node(v).is_some_and(|n| n.in_tree)
}

pub fn tree_edge(t: &Tree, u: NodeId, v: NodeId) -> Option<EdgeId> {
    t.find_edge(u, v, None)
}

/// `v` lies in the subtree rooted at the node labelled `root`.
pub fn is_descendant(v: &TreeNode, root: &TreeNode) -> bool {
    root.low <= v.lim && v.lim <= root.lim
}
