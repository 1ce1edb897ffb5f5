//! Rank direction handling.
//!
//! Positioning always works top-to-bottom. For `LR`/`RL` node and label boxes are transposed
//! beforehand; afterwards `BT`/`RL` are mirrored vertically and `LR`/`RL` transposed back.

use crate::{LayoutGraph, RankDir};

pub fn adjust(g: &mut LayoutGraph) {
    if matches!(g.graph().options.rankdir, RankDir::LR | RankDir::RL) {
        swap_width_height(g);
    }
}

pub fn undo(g: &mut LayoutGraph) {
    let rankdir = g.graph().options.rankdir;
    if matches!(rankdir, RankDir::BT | RankDir::RL) {
        reverse_y(g);
    }
    if matches!(rankdir, RankDir::LR | RankDir::RL) {
        swap_xy(g);
        swap_width_height(g);
    }
}

fn swap_width_height(g: &mut LayoutGraph) {
    for (_, n) in g.node_labels_mut() {
        std::mem::swap(&mut n.width, &mut n.height);
        for se in &mut n.self_edges {
            std::mem::swap(&mut se.label.width, &mut se.label.height);
        }
    }
    for (_, e) in g.edge_labels_mut() {
        std::mem::swap(&mut e.width, &mut e.height);
    }
}

fn reverse_y(g: &mut LayoutGraph) {
    for (_, n) in g.node_labels_mut() {
        n.y = n.y.map(|y| -y);
    }
    for (_, e) in g.edge_labels_mut() {
        for p in &mut e.points {
            p.y = -p.y;
        }
        e.y = e.y.map(|y| -y);
    }
}

fn swap_xy(g: &mut LayoutGraph) {
    for (_, n) in g.node_labels_mut() {
        std::mem::swap(&mut n.x, &mut n.y);
    }
    for (_, e) in g.edge_labels_mut() {
        for p in &mut e.points {
            std::mem::swap(&mut p.x, &mut p.y);
        }
        std::mem::swap(&mut e.x, &mut e.y);
    }
}
