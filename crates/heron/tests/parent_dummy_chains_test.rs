use heron::graphlib::{EdgeKey, GraphOptions, NodeId};
use heron::parent_dummy_chains::parent_dummy_chains;
use heron::{Dummy, LayoutGraph};

fn compound_graph() -> LayoutGraph {
    LayoutGraph::new(GraphOptions {
        compound: true,
        ..Default::default()
    })
}

fn subgraph(g: &mut LayoutGraph, name: &str, min_rank: i32, max_rank: i32) -> NodeId {
    let sg = g.ensure_node(name);
    g[sg].min_rank = Some(min_rank);
    g[sg].max_rank = Some(max_rank);
    sg
}

/// Chain `a -> d1 -> .. -> b` with the dummies on consecutive ranks starting at `first_rank`.
fn chain(g: &mut LayoutGraph, dummies: &[&str], first_rank: i32) -> Vec<NodeId> {
    let a = g.ensure_node("a");
    let b = g.ensure_node("b");
    let mut path = vec!["a"];
    path.extend_from_slice(dummies);
    path.push("b");
    g.set_path(&path);

    let ids: Vec<NodeId> = dummies.iter().map(|d| g.node_id(d).unwrap()).collect();
    for (i, &d) in ids.iter().enumerate() {
        g[d].rank = Some(first_rank + i as i32);
        g[d].dummy = Some(Dummy::Edge);
    }
    g[ids[0]].edge_obj = Some(EdgeKey::unnamed(a, b));
    g.graph_mut().dummy_chains = vec![ids[0]];
    ids
}

#[test]
fn parent_dummy_chains_leaves_top_level_chains_alone() {
    let mut g = compound_graph();
    let ids = chain(&mut g, &["d1"], 1);

    parent_dummy_chains(&mut g).unwrap();
    assert_eq!(g.parent(ids[0]), None);
}

#[test]
fn parent_dummy_chains_uses_the_tail_parent_first() {
    let mut g = compound_graph();
    let sg = subgraph(&mut g, "sg1", 0, 2);
    let a = g.ensure_node("a");
    g.set_parent(a, Some(sg)).unwrap();
    let ids = chain(&mut g, &["d1"], 2);

    parent_dummy_chains(&mut g).unwrap();
    assert_eq!(g.parent(ids[0]), Some(sg));
}

#[test]
fn parent_dummy_chains_uses_the_head_parent_when_the_tail_is_top_level() {
    let mut g = compound_graph();
    let sg = subgraph(&mut g, "sg1", 1, 3);
    let b = g.ensure_node("b");
    g.set_parent(b, Some(sg)).unwrap();
    let ids = chain(&mut g, &["d1"], 1);

    parent_dummy_chains(&mut g).unwrap();
    assert_eq!(g.parent(ids[0]), Some(sg));
}

#[test]
fn parent_dummy_chains_leaves_the_tail_subgraph_past_its_last_rank() {
    let mut g = compound_graph();
    let sg = subgraph(&mut g, "sg1", 0, 2);
    let a = g.ensure_node("a");
    g.set_parent(a, Some(sg)).unwrap();
    let ids = chain(&mut g, &["d1", "d2", "d3"], 2);

    parent_dummy_chains(&mut g).unwrap();
    assert_eq!(g.parent(ids[0]), Some(sg));
    assert_eq!(g.parent(ids[1]), None);
    assert_eq!(g.parent(ids[2]), None);
}

#[test]
fn parent_dummy_chains_enters_the_head_subgraph_at_its_first_rank() {
    let mut g = compound_graph();
    let sg = subgraph(&mut g, "sg1", 3, 5);
    let b = g.ensure_node("b");
    g.set_parent(b, Some(sg)).unwrap();
    let ids = chain(&mut g, &["d1", "d2", "d3"], 1);

    parent_dummy_chains(&mut g).unwrap();
    assert_eq!(g.parent(ids[0]), None);
    assert_eq!(g.parent(ids[1]), None);
    assert_eq!(g.parent(ids[2]), Some(sg));
}

#[test]
fn parent_dummy_chains_climbs_out_of_nested_subgraphs_through_the_common_ancestor() {
    let mut g = compound_graph();
    let outer = subgraph(&mut g, "outer", 0, 6);
    let left = subgraph(&mut g, "left", 0, 2);
    let right = subgraph(&mut g, "right", 4, 6);
    g.set_parent(left, Some(outer)).unwrap();
    g.set_parent(right, Some(outer)).unwrap();
    let a = g.ensure_node("a");
    let b = g.ensure_node("b");
    g.set_parent(a, Some(left)).unwrap();
    g.set_parent(b, Some(right)).unwrap();
    let ids = chain(&mut g, &["d1", "d2", "d3", "d4"], 2);

    parent_dummy_chains(&mut g).unwrap();
    assert_eq!(g.parent(ids[0]), Some(left));
    assert_eq!(g.parent(ids[1]), Some(outer));
    assert_eq!(g.parent(ids[2]), Some(right));
    assert_eq!(g.parent(ids[3]), Some(right));
}
