//! Compound multigraph container.
//!
//! Nodes and edges live in arenas addressed by [`NodeId`] / [`EdgeId`]. Every node also carries a
//! unique caller-facing name. Adjacency and containment are stored per node as insertion-ordered
//! index sets, so all iteration orders (nodes, edges, adjacency, children) are insertion order.

pub mod alg;
mod handle;

pub use handle::{EdgeId, EdgeKey, NodeId};

use crate::error::{GraphError, Result};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::ops::{Index, IndexMut};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type IdSet<T> = IndexSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    pub directed: bool,
    pub multigraph: bool,
    pub compound: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            directed: true,
            multigraph: false,
            compound: false,
        }
    }
}

/// Borrowed form of [`EdgeKey`] used for allocation-free lookups.
///
/// Its derived `Hash` must stay in lockstep with `EdgeKey`'s.
#[derive(Clone, Copy, Hash)]
struct EdgeKeyRef<'a> {
    v: NodeId,
    w: NodeId,
    name: Option<&'a str>,
}

impl hashbrown::Equivalent<EdgeKey> for EdgeKeyRef<'_> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w && key.name.as_deref() == self.name
    }
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    name: String,
    label: N,
    in_edges: IdSet<EdgeId>,
    out_edges: IdSet<EdgeId>,
    parent: Option<NodeId>,
    children: IdSet<NodeId>,
}

impl<N> NodeEntry<N> {
    fn new(name: String, label: N) -> Self {
        Self {
            name,
            label,
            in_edges: IdSet::default(),
            out_edges: IdSet::default(),
            parent: None,
            children: IdSet::default(),
        }
    }
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    key: EdgeKey,
    label: E,
}

#[derive(Debug, Clone)]
pub struct Graph<N, E, G> {
    options: GraphOptions,
    label: G,

    nodes: Vec<Option<NodeEntry<N>>>,
    node_count: usize,
    names: HashMap<String, NodeId>,

    edges: Vec<Option<EdgeEntry<E>>>,
    edge_count: usize,
    edge_index: HashMap<EdgeKey, EdgeId>,
}

impl<N, E, G: Default> Graph<N, E, G> {
    pub fn new(options: GraphOptions) -> Self {
        Self::with_label(options, G::default())
    }
}

impl<N, E, G> Graph<N, E, G> {
    pub fn with_label(options: GraphOptions, label: G) -> Self {
        Self {
            options,
            label,
            nodes: Vec::new(),
            node_count: 0,
            names: HashMap::default(),
            edges: Vec::new(),
            edge_count: 0,
            edge_index: HashMap::default(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    /// Turns on nesting support. Existing nodes stay at the top level.
    pub fn enable_compound(&mut self) {
        self.options.compound = true;
    }

    /// Turns on named parallel edges. Existing edges keep their keys.
    pub fn enable_multigraph(&mut self) {
        self.options.multigraph = true;
    }

    pub fn graph(&self) -> &G {
        &self.label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.label
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.label = label;
        self
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Upper bound (exclusive) of every node handle index ever issued by this graph.
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    /// Upper bound (exclusive) of every edge handle index ever issued by this graph.
    pub fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    fn entry(&self, v: NodeId) -> Option<&NodeEntry<N>> {
        self.nodes.get(v.index()).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, v: NodeId) -> Option<&mut NodeEntry<N>> {
        self.nodes.get_mut(v.index()).and_then(Option::as_mut)
    }

    fn edge_entry(&self, e: EdgeId) -> Option<&EdgeEntry<E>> {
        self.edges.get(e.index()).and_then(Option::as_ref)
    }

    // ---- nodes ----------------------------------------------------------------------------

    /// Inserts a node, or replaces the label of the node that already has this name.
    pub fn add_node(&mut self, name: impl Into<String>, label: N) -> NodeId {
        let name = name.into();
        if let Some(&v) = self.names.get(name.as_str()) {
            if let Some(entry) = self.entry_mut(v) {
                entry.label = label;
            }
            return v;
        }
        let v = NodeId::new(self.nodes.len());
        self.names.insert(name.clone(), v);
        self.nodes.push(Some(NodeEntry::new(name, label)));
        self.node_count += 1;
        v
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn contains_node(&self, v: NodeId) -> bool {
        self.entry(v).is_some()
    }

    pub fn node_name(&self, v: NodeId) -> Option<&str> {
        self.entry(v).map(|n| n.name.as_str())
    }

    /// Name of a live node.
    ///
    /// # Panics
    /// Panics if `v` is vacant, like indexing does.
    pub fn name(&self, v: NodeId) -> &str {
        match self.entry(v) {
            Some(n) => &n.name,
            None => panic!("node handle {v} is vacant"),
        }
    }

    pub fn node(&self, v: NodeId) -> Option<&N> {
        self.entry(v).map(|n| &n.label)
    }

    pub fn node_mut(&mut self, v: NodeId) -> Option<&mut N> {
        self.entry_mut(v).map(|n| &mut n.label)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&N> {
        self.node(self.node_id(name)?)
    }

    pub fn node_by_name_mut(&mut self, name: &str) -> Option<&mut N> {
        let v = self.node_id(name)?;
        self.node_mut(v)
    }

    /// Live node handles in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeId::new(i))
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes().collect()
    }

    pub fn node_labels(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId::new(i), &n.label)))
    }

    pub fn node_labels_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut N)> + '_ {
        self.nodes
            .iter_mut()
            .enumerate()
            .filter_map(|(i, n)| n.as_mut().map(|n| (NodeId::new(i), &mut n.label)))
    }

    /// Removes a node together with its incident edges.
    ///
    /// Children of the removed node are moved to the removed node's parent.
    pub fn remove_node(&mut self, v: NodeId) -> Option<N> {
        let entry = self.entry(v)?;
        let incident: Vec<EdgeId> = entry
            .in_edges
            .iter()
            .chain(entry.out_edges.iter())
            .copied()
            .collect();
        for e in incident {
            self.remove_edge(e);
        }

        let entry = self.nodes.get_mut(v.index())?.take()?;
        self.names.remove(entry.name.as_str());
        self.node_count -= 1;

        if let Some(p) = entry.parent {
            if let Some(parent) = self.entry_mut(p) {
                parent.children.shift_remove(&v);
            }
        }
        for child in entry.children {
            if let Some(c) = self.entry_mut(child) {
                c.parent = entry.parent;
            }
            if let Some(p) = entry.parent.and_then(|p| self.entry_mut(p)) {
                p.children.insert(child);
            }
        }
        Some(entry.label)
    }

    // ---- edges ----------------------------------------------------------------------------

    fn key_ref<'a>(&self, v: NodeId, w: NodeId, name: Option<&'a str>) -> EdgeKeyRef<'a> {
        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyRef { v, w, name }
    }

    /// Live edge handles in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeId::new(i))
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges().collect()
    }

    pub fn edge_entries(&self) -> impl Iterator<Item = (EdgeId, &EdgeKey, &E)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeId::new(i), &e.key, &e.label)))
    }

    pub fn edge_labels_mut(&mut self) -> impl Iterator<Item = (EdgeId, &mut E)> + '_ {
        self.edges
            .iter_mut()
            .enumerate()
            .filter_map(|(i, e)| e.as_mut().map(|e| (EdgeId::new(i), &mut e.label)))
    }

    pub fn edge(&self, e: EdgeId) -> Option<&E> {
        self.edge_entry(e).map(|e| &e.label)
    }

    pub fn edge_mut(&mut self, e: EdgeId) -> Option<&mut E> {
        self.edges
            .get_mut(e.index())
            .and_then(Option::as_mut)
            .map(|e| &mut e.label)
    }

    pub fn edge_key(&self, e: EdgeId) -> Option<&EdgeKey> {
        self.edge_entry(e).map(|e| &e.key)
    }

    pub fn endpoints(&self, e: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edge_entry(e).map(|e| (e.key.v, e.key.w))
    }

    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.edge_entry(e).is_some()
    }

    pub fn find_edge(&self, v: NodeId, w: NodeId, name: Option<&str>) -> Option<EdgeId> {
        self.edge_index.get(&self.key_ref(v, w, name)).copied()
    }

    pub fn find_edge_by_key(&self, key: &EdgeKey) -> Option<EdgeId> {
        self.find_edge(key.v, key.w, key.name.as_deref())
    }

    /// Looks up an edge by endpoint names.
    pub fn find_edge_by_name(&self, v: &str, w: &str, name: Option<&str>) -> Option<EdgeId> {
        self.find_edge(self.node_id(v)?, self.node_id(w)?, name)
    }

    pub fn has_edge(&self, v: NodeId, w: NodeId) -> bool {
        self.find_edge(v, w, None).is_some()
    }

    /// Inserts the unnamed edge `v -> w`, or replaces its label if it already exists.
    pub fn add_edge(&mut self, v: NodeId, w: NodeId, label: E) -> Result<EdgeId> {
        self.add_named_edge(v, w, None::<String>, label)
    }

    /// Inserts the edge `v -> w` identified by `name`, or replaces its label if it already
    /// exists. Named edges require a multigraph.
    pub fn add_named_edge(
        &mut self,
        v: NodeId,
        w: NodeId,
        name: Option<impl Into<String>>,
        label: E,
    ) -> Result<EdgeId> {
        if !self.contains_node(v) {
            return Err(GraphError::MissingNode(v));
        }
        if !self.contains_node(w) {
            return Err(GraphError::MissingNode(w));
        }
        let name: Option<String> = name.map(Into::into);
        if let Some(name) = &name {
            if !self.options.multigraph {
                return Err(GraphError::NamedEdgeOnSimpleGraph { name: name.clone() });
            }
        }

        if let Some(e) = self.find_edge(v, w, name.as_deref()) {
            if let Some(entry) = self.edges.get_mut(e.index()).and_then(Option::as_mut) {
                entry.label = label;
            }
            return Ok(e);
        }

        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        let key = EdgeKey { v, w, name };
        let e = EdgeId::new(self.edges.len());
        self.link_edge(e, &key);
        self.edge_index.insert(key.clone(), e);
        self.edges.push(Some(EdgeEntry { key, label }));
        self.edge_count += 1;
        Ok(e)
    }

    fn link_edge(&mut self, e: EdgeId, key: &EdgeKey) {
        let directed = self.options.directed;
        if let Some(n) = self.entry_mut(key.v) {
            n.out_edges.insert(e);
            if !directed {
                n.in_edges.insert(e);
            }
        }
        if let Some(n) = self.entry_mut(key.w) {
            n.in_edges.insert(e);
            if !directed {
                n.out_edges.insert(e);
            }
        }
    }

    pub fn remove_edge(&mut self, e: EdgeId) -> Option<E> {
        let entry = self.edges.get_mut(e.index())?.take()?;
        self.edge_index.remove(&entry.key);
        self.edge_count -= 1;
        for end in [entry.key.v, entry.key.w] {
            if let Some(n) = self.entry_mut(end) {
                n.in_edges.shift_remove(&e);
                n.out_edges.shift_remove(&e);
            }
        }
        Some(entry.label)
    }

    // ---- adjacency ------------------------------------------------------------------------

    /// Incoming edges of `v`. In an undirected graph this is every incident edge.
    pub fn in_edges(&self, v: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.entry(v)
            .into_iter()
            .flat_map(|n| n.in_edges.iter().copied())
    }

    /// Outgoing edges of `v`. In an undirected graph this is every incident edge.
    pub fn out_edges(&self, v: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.entry(v)
            .into_iter()
            .flat_map(|n| n.out_edges.iter().copied())
    }

    /// Outgoing edges of `v` whose other endpoint is `w`.
    pub fn out_edges_to(&self, v: NodeId, w: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_edges(v)
            .filter(move |&e| self.endpoints(e).is_some_and(|(a, b)| Self::opposite(a, b, v) == w))
    }

    /// Every edge incident on `v`: incoming edges first, then outgoing ones. Self-loops are
    /// reported once.
    pub fn node_edges(&self, v: NodeId) -> Vec<EdgeId> {
        let Some(n) = self.entry(v) else {
            return Vec::new();
        };
        let mut out: IdSet<EdgeId> = n.in_edges.clone();
        out.extend(n.out_edges.iter().copied());
        out.into_iter().collect()
    }

    fn opposite(a: NodeId, b: NodeId, v: NodeId) -> NodeId {
        if a == v { b } else { a }
    }

    pub fn predecessors(&self, v: NodeId) -> Vec<NodeId> {
        let directed = self.options.directed;
        let out: IdSet<NodeId> = self
            .in_edges(v)
            .filter_map(|e| self.endpoints(e))
            .map(|(a, b)| if directed { a } else { Self::opposite(a, b, v) })
            .collect();
        out.into_iter().collect()
    }

    pub fn successors(&self, v: NodeId) -> Vec<NodeId> {
        let directed = self.options.directed;
        let out: IdSet<NodeId> = self
            .out_edges(v)
            .filter_map(|e| self.endpoints(e))
            .map(|(a, b)| if directed { b } else { Self::opposite(a, b, v) })
            .collect();
        out.into_iter().collect()
    }

    /// Predecessors followed by successors, without duplicates.
    pub fn neighbors(&self, v: NodeId) -> Vec<NodeId> {
        let mut out: IdSet<NodeId> = self.predecessors(v).into_iter().collect();
        out.extend(self.successors(v));
        out.into_iter().collect()
    }

    pub fn sources(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|&v| self.in_edges(v).next().is_none())
            .collect()
    }

    pub fn sinks(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|&v| self.out_edges(v).next().is_none())
            .collect()
    }

    // ---- hierarchy ------------------------------------------------------------------------

    /// Moves `v` under `parent`, or back to the top level when `parent` is `None`.
    pub fn set_parent(&mut self, v: NodeId, parent: Option<NodeId>) -> Result<()> {
        if !self.options.compound {
            return Err(GraphError::NotCompound);
        }
        if !self.contains_node(v) {
            return Err(GraphError::MissingNode(v));
        }
        if let Some(p) = parent {
            if !self.contains_node(p) {
                return Err(GraphError::MissingNode(p));
            }
            let mut ancestor = Some(p);
            while let Some(a) = ancestor {
                if a == v {
                    return Err(GraphError::ParentCycle {
                        child: self.name(v).to_string(),
                        parent: self.name(p).to_string(),
                    });
                }
                ancestor = self.parent(a);
            }
        }

        if let Some(old) = self.parent(v) {
            if let Some(n) = self.entry_mut(old) {
                n.children.shift_remove(&v);
            }
        }
        if let Some(n) = self.entry_mut(v) {
            n.parent = parent;
        }
        if let Some(n) = parent.and_then(|p| self.entry_mut(p)) {
            n.children.insert(v);
        }
        Ok(())
    }

    pub fn parent(&self, v: NodeId) -> Option<NodeId> {
        self.entry(v).and_then(|n| n.parent)
    }

    pub fn children(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.entry(v)
            .into_iter()
            .flat_map(|n| n.children.iter().copied())
    }

    pub fn has_children(&self, v: NodeId) -> bool {
        self.entry(v).is_some_and(|n| !n.children.is_empty())
    }

    /// Top-level nodes: every node without a parent.
    pub fn root_children(&self) -> Vec<NodeId> {
        self.nodes().filter(|&v| self.parent(v).is_none()).collect()
    }

    // ---- projections ----------------------------------------------------------------------

    /// Builds a new graph from the nodes and edges the closures keep.
    ///
    /// Handles are preserved: a kept node or edge has the same handle in the result. Edges whose
    /// endpoints were dropped are dropped too. A kept node whose parent was dropped is attached
    /// to its nearest kept ancestor.
    pub fn filter_map<N2, E2, G2>(
        &self,
        label: G2,
        node_fn: impl FnMut(NodeId, &N) -> Option<N2>,
        edge_fn: impl FnMut(EdgeId, &EdgeKey, &E) -> Option<E2>,
    ) -> Graph<N2, E2, G2> {
        self.filter_map_as(self.options, label, node_fn, edge_fn)
    }

    /// [`Graph::filter_map`] into a graph with different options.
    ///
    /// Edge keys are re-canonicalized for the target: names are dropped when it is not a
    /// multigraph, endpoints are ordered when it is undirected, and an edge whose key collides
    /// with an earlier kept edge is dropped. Containment is only carried over into compound
    /// targets.
    pub fn filter_map_as<N2, E2, G2>(
        &self,
        options: GraphOptions,
        label: G2,
        mut node_fn: impl FnMut(NodeId, &N) -> Option<N2>,
        mut edge_fn: impl FnMut(EdgeId, &EdgeKey, &E) -> Option<E2>,
    ) -> Graph<N2, E2, G2> {
        let mut out: Graph<N2, E2, G2> = Graph::with_label(options, label);

        out.nodes.reserve(self.nodes.len());
        for (i, slot) in self.nodes.iter().enumerate() {
            let v = NodeId::new(i);
            let kept = slot
                .as_ref()
                .and_then(|n| node_fn(v, &n.label).map(|l| NodeEntry::new(n.name.clone(), l)));
            if let Some(entry) = &kept {
                out.names.insert(entry.name.clone(), v);
                out.node_count += 1;
            }
            out.nodes.push(kept);
        }

        out.edges.reserve(self.edges.len());
        for (i, slot) in self.edges.iter().enumerate() {
            let e = EdgeId::new(i);
            let kept = slot.as_ref().and_then(|entry| {
                let mut key = entry.key.clone();
                if !options.directed && key.v > key.w {
                    std::mem::swap(&mut key.v, &mut key.w);
                }
                if !options.multigraph {
                    key.name = None;
                }
                let usable = out.contains_node(key.v)
                    && out.contains_node(key.w)
                    && !out.edge_index.contains_key(&key);
                if !usable {
                    return None;
                }
                edge_fn(e, &entry.key, &entry.label).map(|l| EdgeEntry { key, label: l })
            });
            if let Some(entry) = &kept {
                out.link_edge(e, &entry.key);
                out.edge_index.insert(entry.key.clone(), e);
                out.edge_count += 1;
            }
            out.edges.push(kept);
        }

        if self.options.compound && options.compound {
            for v in out.node_ids() {
                let mut ancestor = self.parent(v);
                while let Some(a) = ancestor {
                    if out.contains_node(a) {
                        break;
                    }
                    ancestor = self.parent(a);
                }
                if let Some(p) = ancestor {
                    if let Some(n) = out.entry_mut(v) {
                        n.parent = Some(p);
                    }
                    if let Some(n) = out.entry_mut(p) {
                        n.children.insert(v);
                    }
                }
            }
        }

        out
    }
}

impl<N: Default, E, G> Graph<N, E, G> {
    /// Returns the node with this name, inserting it with a default label if needed.
    pub fn ensure_node(&mut self, name: &str) -> NodeId {
        match self.node_id(name) {
            Some(v) => v,
            None => self.add_node(name, N::default()),
        }
    }

    /// Name-based edge insertion that creates missing endpoints.
    pub fn set_edge(&mut self, v: &str, w: &str, label: E) -> EdgeId {
        let v = self.ensure_node(v);
        let w = self.ensure_node(w);
        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        if let Some(e) = self.find_edge(v, w, None) {
            if let Some(entry) = self.edges.get_mut(e.index()).and_then(Option::as_mut) {
                entry.label = label;
            }
            return e;
        }
        let key = EdgeKey::unnamed(v, w);
        let e = EdgeId::new(self.edges.len());
        self.link_edge(e, &key);
        self.edge_index.insert(key.clone(), e);
        self.edges.push(Some(EdgeEntry { key, label }));
        self.edge_count += 1;
        e
    }

    /// Name-based named-edge insertion that creates missing endpoints.
    pub fn set_named_edge(&mut self, v: &str, w: &str, name: &str, label: E) -> Result<EdgeId> {
        if !self.options.multigraph {
            return Err(GraphError::NamedEdgeOnSimpleGraph {
                name: name.to_string(),
            });
        }
        let v = self.ensure_node(v);
        let w = self.ensure_node(w);
        self.add_named_edge(v, w, Some(name), label)
    }
}

impl<N: Default, E: Default, G> Graph<N, E, G> {
    /// Adds an edge with a default label between every consecutive pair of `names`.
    pub fn set_path(&mut self, names: &[&str]) -> &mut Self {
        for pair in names.windows(2) {
            self.set_edge(pair[0], pair[1], E::default());
        }
        self
    }
}

impl<N, E, G> Index<NodeId> for Graph<N, E, G> {
    type Output = N;

    fn index(&self, v: NodeId) -> &N {
        match self.node(v) {
            Some(label) => label,
            None => panic!("node handle {v} is vacant"),
        }
    }
}

impl<N, E, G> IndexMut<NodeId> for Graph<N, E, G> {
    fn index_mut(&mut self, v: NodeId) -> &mut N {
        match self.node_mut(v) {
            Some(label) => label,
            None => panic!("node handle {v} is vacant"),
        }
    }
}

impl<N, E, G> Index<EdgeId> for Graph<N, E, G> {
    type Output = E;

    fn index(&self, e: EdgeId) -> &E {
        match self.edge(e) {
            Some(label) => label,
            None => panic!("edge handle {e} is vacant"),
        }
    }
}

impl<N, E, G> IndexMut<EdgeId> for Graph<N, E, G> {
    fn index_mut(&mut self, e: EdgeId) -> &mut E {
        match self.edge_mut(e) {
            Some(label) => label,
            None => panic!("edge handle {e} is vacant"),
        }
    }
}
