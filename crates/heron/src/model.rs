//! Layout label types, options and geometry primitives.
//!
//! Labels are plain `Clone` data. Fields marked as working state are written by the pipeline
//! while it runs and are meaningless to callers.

use crate::graphlib::{EdgeKey, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type LayoutGraph = Graph<NodeLabel, EdgeLabel, GraphLabel>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

/// Feedback arc set strategy used to break cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Acyclicer {
    #[default]
    Dfs,
    Greedy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranker {
    #[default]
    NetworkSimplex,
    TightTree,
    LongestPath,
    /// Keep the ranks already present on the nodes.
    #[serde(rename = "none")]
    Manual,
}

/// One of the four Brandes–Köpf alignments: vertical direction (`U`p/`D`own) then horizontal
/// bias (`L`eft/`R`ight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Align {
    UL,
    UR,
    DL,
    DR,
}

impl Align {
    pub const ALL: [Align; 4] = [Align::UL, Align::UR, Align::DL, Align::DR];

    pub fn is_up(self) -> bool {
        matches!(self, Align::UL | Align::UR)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Align::UL | Align::DL)
    }
}

/// Graph-level configuration recognized by [`crate::layout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub rankdir: RankDir,
    pub nodesep: f64,
    pub edgesep: f64,
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
    pub acyclicer: Acyclicer,
    pub ranker: Ranker,
    pub align: Option<Align>,
    #[serde(rename = "disableOptimalOrderHeuristic")]
    pub disable_optimal_order_heuristic: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            edgesep: 20.0,
            ranksep: 50.0,
            marginx: 0.0,
            marginy: 0.0,
            acyclicer: Acyclicer::Dfs,
            ranker: Ranker::NetworkSimplex,
            align: None,
            disable_optimal_order_heuristic: false,
        }
    }
}

impl LayoutOptions {
    /// Parses a graph-level configuration object. Missing keys take their defaults and unknown
    /// keys are ignored.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphLabel {
    pub options: LayoutOptions,

    /// Output: overall drawing size.
    pub width: f64,
    pub height: f64,

    // Working state.
    pub dummy_chains: Vec<NodeId>,
    pub nesting_root: Option<NodeId>,
    pub node_rank_factor: Option<i32>,
    pub max_rank: Option<i32>,
    pub dummy_seq: usize,
}

impl GraphLabel {
    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }
}

/// Kind of a synthesized node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dummy {
    /// One rank step of a long edge.
    Edge,
    /// The rank step of a long edge that carries its label box.
    EdgeLabel,
    /// Placeholder reserving the rank of an edge label before normalization.
    EdgeProxy,
    /// Subgraph border (top, bottom, left or right).
    Border,
    /// Nesting root.
    Root,
    /// Loop placeholder beside the node a self-edge belongs to.
    SelfEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelPos {
    L,
    C,
    #[default]
    R,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<i32>,
    pub order: Option<usize>,

    pub dummy: Option<Dummy>,
    /// Set on edge-label dummies only.
    pub labelpos: Option<LabelPos>,
    /// Held by the head of a dummy chain, edge proxies and self-edge dummies.
    pub edge_label: Option<EdgeLabel>,
    pub edge_obj: Option<EdgeKey>,

    pub min_rank: Option<i32>,
    pub max_rank: Option<i32>,
    pub border_type: Option<BorderSide>,
    pub border_left: Vec<Option<NodeId>>,
    pub border_right: Vec<Option<NodeId>>,
    pub border_top: Option<NodeId>,
    pub border_bottom: Option<NodeId>,
    pub self_edges: Vec<SelfEdge>,
}

impl NodeLabel {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub width: f64,
    pub height: f64,
    pub labelpos: LabelPos,
    pub labeloffset: f64,
    pub label_rank: Option<i32>,
    pub minlen: usize,
    pub weight: f64,

    pub nesting_edge: bool,
    pub reversed: bool,
    pub forward_name: Option<String>,
    /// Caller attributes carried through layout untouched.
    pub extras: BTreeMap<String, serde_json::Value>,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub points: Vec<Point>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            labelpos: LabelPos::R,
            labeloffset: 10.0,
            label_rank: None,
            minlen: 1,
            weight: 1.0,
            nesting_edge: false,
            reversed: false,
            forward_name: None,
            extras: BTreeMap::new(),
            x: None,
            y: None,
            points: Vec::new(),
        }
    }
}

impl EdgeLabel {
    pub fn labelled(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn has_label_box(&self) -> bool {
        self.width != 0.0 && self.height != 0.0
    }
}

/// A self-loop parked on its node between cycle breaking and positioning.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfEdge {
    pub edge_obj: EdgeKey,
    pub label: EdgeLabel,
}
