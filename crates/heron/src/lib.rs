//! Layered graph layout.
//!
//! Given a directed graph with node sizes, [`layout`] assigns every node a center, every edge a
//! polyline and every edge label a position, arranging nodes in horizontal ranks so that edges
//! mostly point one way and cross each other as little as possible. Subgraphs (compound nodes)
//! are laid out as boxes enclosing their children.
//!
//! ```
//! use heron::graphlib::GraphOptions;
//! use heron::{EdgeLabel, GraphLabel, LayoutGraph, NodeLabel};
//!
//! let mut g = LayoutGraph::with_label(GraphOptions::default(), GraphLabel::default());
//! let a = g.add_node("a", NodeLabel::sized(50.0, 20.0));
//! let b = g.add_node("b", NodeLabel::sized(50.0, 20.0));
//! g.add_edge(a, b, EdgeLabel::default()).unwrap();
//!
//! heron::layout(&mut g).unwrap();
//! assert!(g[a].y.unwrap() < g[b].y.unwrap());
//! ```

pub use heron_graph as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod data {
    pub mod list;
}

pub mod acyclic;
pub mod add_border_segments;
pub mod coordinate_system;
pub mod error;
pub mod greedy_fas;
pub mod model;
pub mod nesting_graph;
pub mod normalize;
pub mod order;
pub mod parent_dummy_chains;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod self_edges;
pub mod util;

pub use error::{LayoutError, Result};
pub use model::{
    Acyclicer, Align, BorderSide, Dummy, EdgeLabel, GraphLabel, LabelPos, LayoutGraph,
    LayoutOptions, NodeLabel, Point, RankDir, Ranker, SelfEdge,
};
pub use pipeline::layout;
