//! Nesting graph construction for compound graphs.
//!
//! Adds a synthetic root plus a top/bottom border pair per subgraph, and links them with
//! heavily weighted nesting edges so the ranker keeps every subgraph's descendants strictly
//! between its borders and sees one connected graph. Existing `minlen`s are scaled by
//! `node_rank_factor` so border ranks can later be told apart from node ranks.

use crate::graphlib::NodeId;
use crate::util::{add_border_node, add_dummy_node};
use crate::{Dummy, EdgeLabel, LayoutGraph, NodeLabel};

enum Step {
    Enter(NodeId),
    Link {
        v: NodeId,
        top: NodeId,
        bottom: NodeId,
        child: NodeId,
    },
    Exit {
        v: NodeId,
        top: NodeId,
    },
}

struct Nesting {
    root: NodeId,
    node_sep: usize,
    weight: f64,
    height: usize,
    depths: Vec<usize>,
}

pub fn run(g: &mut LayoutGraph) -> crate::Result<()> {
    let root = add_dummy_node(g, Dummy::Root, NodeLabel::default(), "_root");
    let depths = tree_depths(g);
    let height = depths.iter().copied().max().unwrap_or(1).saturating_sub(1);
    let node_sep = 2 * height + 1;
    g.graph_mut().nesting_root = Some(root);

    for (_, e) in g.edge_labels_mut() {
        e.minlen *= node_sep;
    }
    let weight = g.edge_entries().map(|(_, _, e)| e.weight).sum::<f64>() + 1.0;

    let nesting = Nesting {
        root,
        node_sep,
        weight,
        height,
        depths,
    };
    for child in g.root_children() {
        nesting.visit(g, child)?;
    }

    g.graph_mut().node_rank_factor = Some(node_sep as i32);
    Ok(())
}

impl Nesting {
    fn depth(&self, v: NodeId) -> usize {
        self.depths.get(v.index()).copied().unwrap_or(1)
    }

    fn visit(&self, g: &mut LayoutGraph, start: NodeId) -> crate::Result<()> {
        let mut stack: Vec<Step> = vec![Step::Enter(start)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(v) => {
                    let children: Vec<NodeId> = g.children(v).collect();
                    if children.is_empty() {
                        if v != self.root {
                            g.add_edge(
                                self.root,
                                v,
                                EdgeLabel {
                                    weight: 0.0,
                                    minlen: self.node_sep,
                                    ..Default::default()
                                },
                            )?;
                        }
                        continue;
                    }

                    let top = add_border_node(g, "_bt", None, None);
                    let bottom = add_border_node(g, "_bb", None, None);
                    g.set_parent(top, Some(v))?;
                    g.set_parent(bottom, Some(v))?;
                    g[v].border_top = Some(top);
                    g[v].border_bottom = Some(bottom);

                    stack.push(Step::Exit { v, top });
                    for &child in children.iter().rev() {
                        stack.push(Step::Link {
                            v,
                            top,
                            bottom,
                            child,
                        });
                        stack.push(Step::Enter(child));
                    }
                }
                Step::Link {
                    v,
                    top,
                    bottom,
                    child,
                } => {
                    let child_top = g[child].border_top.unwrap_or(child);
                    let child_bottom = g[child].border_bottom.unwrap_or(child);
                    let this_weight = if g[child].border_top.is_some() {
                        self.weight
                    } else {
                        2.0 * self.weight
                    };
                    let minlen = if child_top != child_bottom {
                        1
                    } else {
                        (self.height + 1).saturating_sub(self.depth(v))
                    };
                    let nesting = EdgeLabel {
                        weight: this_weight,
                        minlen,
                        nesting_edge: true,
                        ..Default::default()
                    };
                    g.add_edge(top, child_top, nesting.clone())?;
                    g.add_edge(child_bottom, bottom, nesting)?;
                }
                Step::Exit { v, top } => {
                    if g.parent(v).is_none() {
                        g.add_edge(
                            self.root,
                            top,
                            EdgeLabel {
                                weight: 0.0,
                                minlen: self.height + self.depth(v),
                                nesting_edge: true,
                                ..Default::default()
                            },
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Nesting depth of every node: top-level nodes have depth 1. Indexed by handle.
fn tree_depths(g: &LayoutGraph) -> Vec<usize> {
    let mut depths = vec![0usize; g.node_bound()];
    let mut stack: Vec<(NodeId, usize)> = g.root_children().into_iter().map(|v| (v, 1)).collect();
    while let Some((v, depth)) = stack.pop() {
        depths[v.index()] = depth;
        stack.extend(g.children(v).map(|c| (c, depth + 1)));
    }
    depths
}

pub fn cleanup(g: &mut LayoutGraph) {
    if let Some(root) = g.graph_mut().nesting_root.take() {
        g.remove_node(root);
    }
    for e in g.edge_ids() {
        if g[e].nesting_edge {
            g.remove_edge(e);
        }
    }
}
