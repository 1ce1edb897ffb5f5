//! Stable handles into the graph arenas.
//!
//! Handles are plain indices. A graph never reuses a slot, so a handle stays valid (or becomes
//! permanently vacant) for the lifetime of the graph it came from. Handles survive `Clone` and
//! `Graph::filter_map`, which is what lets layout phases keep per-node side tables in `Vec`s.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u32);

impl EdgeId {
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Identity of an edge: its endpoints plus an optional name (multigraphs only).
///
/// Undirected graphs store the endpoints with the lower handle first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub v: NodeId,
    pub w: NodeId,
    pub name: Option<String>,
}

impl EdgeKey {
    pub fn new(v: NodeId, w: NodeId, name: Option<impl Into<String>>) -> Self {
        Self {
            v,
            w,
            name: name.map(Into::into),
        }
    }

    pub fn unnamed(v: NodeId, w: NodeId) -> Self {
        Self { v, w, name: None }
    }
}
