//! Edge label bookkeeping around ranking and normalization.

use crate::util::add_dummy_node;
use crate::{Dummy, LabelPos, LayoutGraph, NodeLabel, RankDir};

/// Halves the rank separation and doubles every `minlen`, so a labelled edge always has a rank
/// in the middle for its label. Side labels are widened by `labeloffset`.
pub(super) fn make_space_for_edge_labels(g: &mut LayoutGraph) {
    let options = &mut g.graph_mut().options;
    options.ranksep /= 2.0;
    let rankdir = options.rankdir;

    for (_, e) in g.edge_labels_mut() {
        e.minlen = e.minlen.saturating_mul(2);
        if e.labelpos != LabelPos::C {
            match rankdir {
                RankDir::TB | RankDir::BT => e.width += e.labeloffset,
                RankDir::LR | RankDir::RL => e.height += e.labeloffset,
            }
        }
    }
}

/// Places an `EdgeProxy` dummy halfway between the endpoints of every labelled edge.
pub(super) fn inject_edge_label_proxies(g: &mut LayoutGraph) {
    let proxies: Vec<_> = g
        .edge_entries()
        .filter(|(_, _, e)| e.has_label_box())
        .filter_map(|(_, key, _)| {
            let v_rank = g[key.v].rank?;
            let w_rank = g[key.w].rank?;
            Some((key.clone(), v_rank + (w_rank - v_rank) / 2))
        })
        .collect();

    for (key, rank) in proxies {
        let label = NodeLabel {
            rank: Some(rank),
            edge_obj: Some(key),
            ..Default::default()
        };
        add_dummy_node(g, Dummy::EdgeProxy, label, "_ep");
    }
}

/// Stores each proxy's (normalized) rank as its edge's `label_rank` and drops the proxy.
pub(super) fn remove_edge_label_proxies(g: &mut LayoutGraph) {
    let proxies: Vec<_> = g
        .node_labels()
        .filter(|(_, n)| n.dummy == Some(Dummy::EdgeProxy))
        .map(|(v, _)| v)
        .collect();

    for v in proxies {
        let Some(proxy) = g.remove_node(v) else {
            continue;
        };
        let Some(e) = proxy.edge_obj.as_ref().and_then(|key| g.find_edge_by_key(key)) else {
            continue;
        };
        g[e].label_rank = proxy.rank;
    }
}

/// Moves side labels off the edge line: the label box keeps its original width and sits
/// `labeloffset` away from the edge.
pub(super) fn fixup_edge_label_coords(g: &mut LayoutGraph) {
    for (_, e) in g.edge_labels_mut() {
        let Some(x) = e.x.as_mut() else {
            continue;
        };
        match e.labelpos {
            LabelPos::L => {
                e.width -= e.labeloffset;
                *x -= e.width / 2.0 + e.labeloffset;
            }
            LabelPos::R => {
                e.width -= e.labeloffset;
                *x += e.width / 2.0 + e.labeloffset;
            }
            LabelPos::C => {}
        }
    }
}
