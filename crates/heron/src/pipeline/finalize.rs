//! Final geometry passes: translation into positive space, edge endpoint clipping and
//! restoring the direction of reversed edges.

use crate::util::{Rect, intersect_rect};
use crate::{LayoutGraph, Point};

#[derive(Debug, Clone, Copy)]
struct Extent {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Extent {
    fn include(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.min_x = self.min_x.min(x - width / 2.0);
        self.max_x = self.max_x.max(x + width / 2.0);
        self.min_y = self.min_y.min(y - height / 2.0);
        self.max_y = self.max_y.max(y + height / 2.0);
    }
}

/// Shifts every node, edge point and label so the drawing's top-left corner lands at
/// `(marginx, marginy)`, and stores the overall size on the graph label.
pub(super) fn translate_graph(g: &mut LayoutGraph) {
    let marginx = g.graph().options.marginx;
    let marginy = g.graph().options.marginy;
    let mut extent = Extent {
        min_x: f64::INFINITY,
        max_x: 0.0,
        min_y: f64::INFINITY,
        max_y: 0.0,
    };

    for (_, n) in g.node_labels() {
        extent.include(n.x.unwrap_or(0.0), n.y.unwrap_or(0.0), n.width, n.height);
    }
    for (_, _, e) in g.edge_entries() {
        if let Some(x) = e.x {
            extent.include(x, e.y.unwrap_or(0.0), e.width, e.height);
        }
    }
    if !extent.min_x.is_finite() {
        extent.min_x = 0.0;
    }
    if !extent.min_y.is_finite() {
        extent.min_y = 0.0;
    }

    let dx = extent.min_x - marginx;
    let dy = extent.min_y - marginy;

    for (_, n) in g.node_labels_mut() {
        n.x = n.x.map(|x| x - dx);
        n.y = n.y.map(|y| y - dy);
    }
    for (_, e) in g.edge_labels_mut() {
        for p in &mut e.points {
            p.x -= dx;
            p.y -= dy;
        }
        e.x = e.x.map(|x| x - dx);
        e.y = e.y.map(|y| y - dy);
    }

    let gl = g.graph_mut();
    gl.width = extent.max_x - dx + marginx;
    gl.height = extent.max_y - dy + marginy;
}

/// Adds the points where each edge enters and leaves its endpoint nodes' boxes.
pub(super) fn assign_node_intersects(g: &mut LayoutGraph) {
    for e in g.edge_ids() {
        let Some((v, w)) = g.endpoints(e) else {
            continue;
        };
        let node_v = Rect::of(&g[v]);
        let node_w = Rect::of(&g[w]);
        let center = |r: Rect| Point::new(r.x, r.y);

        let edge = &mut g[e];
        let (p1, p2) = match (edge.points.first(), edge.points.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (center(node_w), center(node_v)),
        };
        edge.points.insert(0, intersect_rect(node_v, p1));
        edge.points.push(intersect_rect(node_w, p2));
    }
}

pub(super) fn reverse_points_for_reversed_edges(g: &mut LayoutGraph) {
    for (_, e) in g.edge_labels_mut() {
        if e.reversed {
            e.points.reverse();
        }
    }
}
