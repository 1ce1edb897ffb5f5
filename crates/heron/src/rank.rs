//! Rank assignment: every node gets an integer layer such that each edge `v -> w` spans at least
//! `minlen` layers, while keeping weighted edge length small.
//!
//! Runs on a non-compound view of the layout graph.

pub mod feasible_tree;
pub mod network_simplex;
pub mod tree;
pub mod util;

use crate::{LayoutGraph, Ranker};

pub fn rank(g: &mut LayoutGraph) -> crate::Result<()> {
    match g.graph().options.ranker {
        Ranker::NetworkSimplex => network_simplex::network_simplex(g)?,
        Ranker::TightTree => {
            util::longest_path(g);
            feasible_tree::feasible_tree(g)?;
        }
        Ranker::LongestPath => util::longest_path(g),
        Ranker::Manual => {}
    }
    Ok(())
}
