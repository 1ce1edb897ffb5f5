use heron::graphlib::{GraphOptions, NodeId};
use heron::order::{Relationship, build_layer_graph};
use heron::{EdgeLabel, LayoutGraph};

fn compound_multigraph() -> LayoutGraph {
    LayoutGraph::new(GraphOptions {
        compound: true,
        multigraph: true,
        ..Default::default()
    })
}

fn set_rank(g: &mut LayoutGraph, name: &str, rank: i32) -> NodeId {
    let v = g.ensure_node(name);
    g[v].rank = Some(rank);
    v
}

fn weighted(weight: f64) -> EdgeLabel {
    EdgeLabel {
        weight,
        ..Default::default()
    }
}

fn sample() -> LayoutGraph {
    let mut g = compound_multigraph();
    set_rank(&mut g, "a", 1);
    set_rank(&mut g, "b", 1);
    set_rank(&mut g, "c", 2);
    set_rank(&mut g, "d", 3);
    g.set_edge("a", "c", weighted(2.0));
    g.set_edge("b", "c", weighted(3.0));
    g.set_edge("c", "d", weighted(4.0));
    g
}

fn weight_between(lg: &heron::order::LayerGraph, g: &LayoutGraph, v: &str, w: &str) -> Option<f64> {
    let e = lg.find_edge(g.node_id(v)?, g.node_id(w)?, None)?;
    Some(lg[e].weight)
}

#[test]
fn build_layer_graph_places_movable_nodes_under_the_root() {
    let g = sample();
    let lg = build_layer_graph(&g, 1, Relationship::InEdges, None).unwrap();
    let root = lg.graph().root;
    assert!(lg.contains_node(root));
    assert_eq!(lg.root_children(), vec![root]);
    let children: Vec<&str> = lg.children(root).map(|v| lg.name(v)).collect();
    assert_eq!(children, vec!["a", "b"]);
}

#[test]
fn build_layer_graph_copies_the_nodes_of_the_rank() {
    let g = sample();
    for (rank, expected) in [(1, vec!["a", "b"]), (2, vec!["c"]), (3, vec!["d"])] {
        let lg = build_layer_graph(&g, rank, Relationship::OutEdges, None).unwrap();
        let root = lg.graph().root;
        let children: Vec<&str> = lg.children(root).map(|v| lg.name(v)).collect();
        assert_eq!(children, expected);
    }
}

#[test]
fn build_layer_graph_keeps_the_node_order() {
    let mut g = sample();
    let a = g.node_id("a").unwrap();
    g[a].order = Some(7);
    let lg = build_layer_graph(&g, 1, Relationship::InEdges, None).unwrap();
    assert_eq!(lg[a].order, Some(7));
}

#[test]
fn build_layer_graph_copies_in_edges() {
    let g = sample();

    let lg = build_layer_graph(&g, 1, Relationship::InEdges, None).unwrap();
    assert_eq!(lg.edge_count(), 0);

    let lg = build_layer_graph(&g, 2, Relationship::InEdges, None).unwrap();
    assert_eq!(lg.edge_count(), 2);
    assert_eq!(weight_between(&lg, &g, "a", "c"), Some(2.0));
    assert_eq!(weight_between(&lg, &g, "b", "c"), Some(3.0));

    let lg = build_layer_graph(&g, 3, Relationship::InEdges, None).unwrap();
    assert_eq!(lg.edge_count(), 1);
    assert_eq!(weight_between(&lg, &g, "c", "d"), Some(4.0));
}

#[test]
fn build_layer_graph_points_out_edges_at_the_rank() {
    let g = sample();

    let lg = build_layer_graph(&g, 1, Relationship::OutEdges, None).unwrap();
    assert_eq!(lg.edge_count(), 2);
    assert_eq!(weight_between(&lg, &g, "c", "a"), Some(2.0));
    assert_eq!(weight_between(&lg, &g, "c", "b"), Some(3.0));

    let lg = build_layer_graph(&g, 2, Relationship::OutEdges, None).unwrap();
    assert_eq!(lg.edge_count(), 1);
    assert_eq!(weight_between(&lg, &g, "d", "c"), Some(4.0));

    let lg = build_layer_graph(&g, 3, Relationship::OutEdges, None).unwrap();
    assert_eq!(lg.edge_count(), 0);
}

#[test]
fn build_layer_graph_merges_parallel_edges() {
    let mut g = compound_multigraph();
    set_rank(&mut g, "a", 1);
    set_rank(&mut g, "b", 2);
    g.set_edge("a", "b", weighted(2.0));
    g.set_named_edge("a", "b", "multi", weighted(3.0)).unwrap();

    let lg = build_layer_graph(&g, 2, Relationship::InEdges, None).unwrap();
    assert_eq!(lg.edge_count(), 1);
    assert_eq!(weight_between(&lg, &g, "a", "b"), Some(5.0));
}

#[test]
fn build_layer_graph_preserves_the_hierarchy_of_the_rank() {
    let mut g = compound_multigraph();
    let a = set_rank(&mut g, "a", 0);
    let b = set_rank(&mut g, "b", 0);
    set_rank(&mut g, "c", 0);
    let bl = set_rank(&mut g, "bl", 0);
    let br = set_rank(&mut g, "br", 0);
    let sg = g.ensure_node("sg");
    {
        let n = &mut g[sg];
        n.min_rank = Some(0);
        n.max_rank = Some(0);
        n.border_left = vec![Some(bl)];
        n.border_right = vec![Some(br)];
    }
    for v in [a, b, bl, br] {
        g.set_parent(v, Some(sg)).unwrap();
    }

    let lg = build_layer_graph(&g, 0, Relationship::InEdges, None).unwrap();
    let root = lg.graph().root;
    let mut top: Vec<&str> = lg.children(root).map(|v| lg.name(v)).collect();
    top.sort();
    assert_eq!(top, vec!["c", "sg"]);
    assert_eq!(lg.parent(a), Some(sg));
    assert_eq!(lg.parent(b), Some(sg));
    assert_eq!(lg[sg].border_left, Some(bl));
    assert_eq!(lg[sg].border_right, Some(br));
    assert_eq!(lg[sg].order, None);
}
