//! Graph container used by `heron`.
//!
//! A directed-or-undirected, optionally compound, optionally multi graph whose nodes and edges
//! are addressed by stable arena handles. See [`Graph`].

pub mod error;
pub mod graph;

pub use error::{GraphError, Result};
pub use graph::{EdgeId, EdgeKey, Graph, GraphOptions, NodeId, alg};
