//! Left/right border segments for subgraphs.
//!
//! Every subgraph gets one `Border` dummy per side on each rank it spans, chained top to bottom
//! by weight-1 edges, so ordering keeps the subgraph's members between its sides and
//! positioning can size it from them.

use crate::graphlib::NodeId;
use crate::util::add_border_node;
use crate::{BorderSide, EdgeLabel, LayoutGraph};

pub fn add_border_segments(g: &mut LayoutGraph) -> crate::Result<()> {
    if !g.is_compound() {
        return Ok(());
    }

    // Children before parents.
    let mut order: Vec<NodeId> = Vec::new();
    let mut stack: Vec<(NodeId, bool)> = g
        .root_children()
        .into_iter()
        .rev()
        .map(|v| (v, false))
        .collect();
    while let Some((v, expanded)) = stack.pop() {
        if expanded {
            order.push(v);
            continue;
        }
        stack.push((v, true));
        let children: Vec<NodeId> = g.children(v).collect();
        stack.extend(children.into_iter().rev().map(|c| (c, false)));
    }

    for v in order {
        let (Some(min_rank), Some(max_rank)) = (g[v].min_rank, g[v].max_rank) else {
            continue;
        };
        let slots = max_rank.max(0) as usize + 1;
        g[v].border_left = vec![None; slots];
        g[v].border_right = vec![None; slots];

        for rank in min_rank..=max_rank {
            add_segment(g, v, rank, BorderSide::Left)?;
            add_segment(g, v, rank, BorderSide::Right)?;
        }
    }
    Ok(())
}

fn add_segment(g: &mut LayoutGraph, sg: NodeId, rank: i32, side: BorderSide) -> crate::Result<()> {
    let prefix = match side {
        BorderSide::Left => "_bl",
        BorderSide::Right => "_br",
    };
    let prev = usize::try_from(rank - 1)
        .ok()
        .and_then(|i| side_slots(g, sg, side).get(i).copied().flatten());

    let curr = add_border_node(g, prefix, Some(rank), None);
    g[curr].border_type = Some(side);

    let slots = match side {
        BorderSide::Left => &mut g[sg].border_left,
        BorderSide::Right => &mut g[sg].border_right,
    };
    let idx = rank.max(0) as usize;
    if idx >= slots.len() {
        slots.resize(idx + 1, None);
    }
    slots[idx] = Some(curr);

    g.set_parent(curr, Some(sg))?;
    if let Some(prev) = prev {
        g.add_edge(prev, curr, EdgeLabel::default())?;
    }
    Ok(())
}

fn side_slots(g: &LayoutGraph, sg: NodeId, side: BorderSide) -> &[Option<NodeId>] {
    match side {
        BorderSide::Left => &g[sg].border_left,
        BorderSide::Right => &g[sg].border_right,
    }
}
