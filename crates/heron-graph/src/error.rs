use crate::NodeId;

/// Structural errors reported by graph mutations.
///
/// A mutation that fails leaves the graph exactly as it was.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    MissingNode(NodeId),

    #[error("edge {0} does not exist")]
    MissingEdge(crate::EdgeId),

    #[error("cannot add edge named `{name}` to a graph that is not a multigraph")]
    NamedEdgeOnSimpleGraph { name: String },

    #[error("setting parent of `{child}` to `{parent}` would create a containment cycle")]
    ParentCycle { child: String, parent: String },

    #[error("cannot set parent in a graph that is not compound")]
    NotCompound,
}

pub type Result<T> = std::result::Result<T, GraphError>;
