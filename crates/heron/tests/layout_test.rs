use heron::graphlib::{GraphOptions, NodeId};
use heron::{
    Acyclicer, Align, EdgeLabel, LabelPos, LayoutError, LayoutGraph, LayoutOptions, NodeLabel,
    Point, RankDir, Ranker, layout,
};
use std::collections::BTreeMap;

const RANKDIRS: [RankDir; 4] = [RankDir::TB, RankDir::BT, RankDir::LR, RankDir::RL];

fn new_graph() -> LayoutGraph {
    LayoutGraph::new(GraphOptions {
        multigraph: true,
        compound: true,
        ..Default::default()
    })
}

fn node(g: &mut LayoutGraph, name: &str, width: f64, height: f64) -> NodeId {
    g.add_node(name, NodeLabel::sized(width, height))
}

fn labelled(width: f64, height: f64, labelpos: LabelPos) -> EdgeLabel {
    EdgeLabel {
        width,
        height,
        labelpos,
        ..Default::default()
    }
}

fn coords(g: &LayoutGraph) -> BTreeMap<String, (f64, f64)> {
    g.node_labels()
        .map(|(v, n)| (g.name(v).to_string(), (n.x.unwrap(), n.y.unwrap())))
        .collect()
}

fn edge<'a>(g: &'a LayoutGraph, v: &str, w: &str) -> &'a EdgeLabel {
    let e = g.find_edge_by_name(v, w, None).unwrap();
    &g[e]
}

fn xy(g: &LayoutGraph, v: &str) -> (f64, f64) {
    let n = g.node_by_name(v).unwrap();
    (n.x.unwrap(), n.y.unwrap())
}

fn on_boundary(n: &NodeLabel, p: Point) -> bool {
    let (x, y) = (n.x.unwrap(), n.y.unwrap());
    let (hw, hh) = (n.width / 2.0, n.height / 2.0);
    let eps = 1e-6;
    let inside = (p.x - x).abs() <= hw + eps && (p.y - y).abs() <= hh + eps;
    let on_side = ((p.x - x).abs() - hw).abs() <= eps || ((p.y - y).abs() - hh).abs() <= eps;
    inside && on_side
}

fn assert_well_formed(g: &LayoutGraph) {
    for (v, n) in g.node_labels() {
        let (x, y) = (n.x.unwrap(), n.y.unwrap());
        assert!(x.is_finite() && y.is_finite(), "{} at ({x}, {y})", g.name(v));
    }
    for (_, key, e) in g.edge_entries() {
        assert!(e.points.len() >= 2, "{} -> {}", g.name(key.v), g.name(key.w));
        assert!(e.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        if key.v == key.w {
            continue;
        }
        let first = e.points[0];
        let last = e.points[e.points.len() - 1];
        assert!(on_boundary(&g[key.v], first), "{first:?} not on {}", g.name(key.v));
        assert!(on_boundary(&g[key.w], last), "{last:?} not on {}", g.name(key.w));
    }
    let gl = g.graph();
    assert!(gl.width.is_finite() && gl.height.is_finite());
}

#[test]
fn layout_can_layout_a_single_node() {
    let mut g = new_graph();
    node(&mut g, "a", 50.0, 100.0);
    layout(&mut g).unwrap();
    assert_eq!(coords(&g), [("a".to_string(), (25.0, 50.0))].into());
}

#[test]
fn layout_can_layout_two_nodes_on_the_same_rank() {
    let mut g = new_graph();
    g.graph_mut().options.nodesep = 200.0;
    node(&mut g, "a", 50.0, 100.0);
    node(&mut g, "b", 75.0, 200.0);
    layout(&mut g).unwrap();
    assert_eq!(
        coords(&g),
        [
            ("a".to_string(), (25.0, 100.0)),
            ("b".to_string(), (50.0 + 200.0 + 75.0 / 2.0, 100.0)),
        ]
        .into()
    );
}

#[test]
fn layout_can_layout_two_nodes_connected_by_an_edge() {
    let mut g = new_graph();
    g.graph_mut().options.ranksep = 300.0;
    node(&mut g, "a", 50.0, 100.0);
    node(&mut g, "b", 75.0, 200.0);
    g.set_edge("a", "b", EdgeLabel::default());
    layout(&mut g).unwrap();
    assert_eq!(
        coords(&g),
        [
            ("a".to_string(), (75.0 / 2.0, 100.0 / 2.0)),
            ("b".to_string(), (75.0 / 2.0, 100.0 + 300.0 + 200.0 / 2.0)),
        ]
        .into()
    );
    assert_eq!(edge(&g, "a", "b").x, None);
    assert_eq!(edge(&g, "a", "b").y, None);
}

#[test]
fn layout_can_layout_an_edge_with_a_label() {
    let mut g = new_graph();
    g.graph_mut().options.ranksep = 300.0;
    node(&mut g, "a", 50.0, 100.0);
    node(&mut g, "b", 75.0, 200.0);
    g.set_edge("a", "b", labelled(60.0, 70.0, LabelPos::C));
    layout(&mut g).unwrap();
    assert_eq!(
        coords(&g),
        [
            ("a".to_string(), (75.0 / 2.0, 100.0 / 2.0)),
            ("b".to_string(), (75.0 / 2.0, 100.0 + 150.0 + 70.0 + 150.0 + 200.0 / 2.0)),
        ]
        .into()
    );
    let e = edge(&g, "a", "b");
    assert_eq!((e.x, e.y), (Some(75.0 / 2.0), Some(100.0 + 150.0 + 70.0 / 2.0)));
}

#[test]
fn layout_keeps_long_labels_clear_of_neighbors() {
    for rankdir in RANKDIRS {
        let mut g = new_graph();
        g.graph_mut().options.nodesep = 10.0;
        g.graph_mut().options.edgesep = 10.0;
        g.graph_mut().options.rankdir = rankdir;
        for v in ["a", "b", "c", "d"] {
            node(&mut g, v, 10.0, 10.0);
        }
        g.set_edge("a", "c", labelled(2000.0, 10.0, LabelPos::C));
        g.set_edge("b", "d", labelled(1.0, 1.0, LabelPos::R));
        layout(&mut g).unwrap();

        let distance = match rankdir {
            RankDir::TB | RankDir::BT => {
                (edge(&g, "a", "c").x.unwrap() - edge(&g, "b", "d").x.unwrap()).abs()
            }
            RankDir::LR | RankDir::RL => (xy(&g, "a").0 - xy(&g, "c").0).abs(),
        };
        assert!(distance > 1000.0, "{rankdir:?}: {distance}");
    }
}

#[test]
fn layout_applies_the_label_offset() {
    for rankdir in RANKDIRS {
        let mut g = new_graph();
        g.graph_mut().options.nodesep = 10.0;
        g.graph_mut().options.edgesep = 10.0;
        g.graph_mut().options.rankdir = rankdir;
        for v in ["a", "b", "c", "d"] {
            node(&mut g, v, 10.0, 10.0);
        }
        g.set_edge(
            "a",
            "b",
            EdgeLabel {
                labeloffset: 1000.0,
                ..labelled(10.0, 10.0, LabelPos::L)
            },
        );
        g.set_edge(
            "c",
            "d",
            EdgeLabel {
                labeloffset: 1000.0,
                ..labelled(10.0, 10.0, LabelPos::R)
            },
        );
        layout(&mut g).unwrap();

        let (ab, cd) = (edge(&g, "a", "b"), edge(&g, "c", "d"));
        let (left, right) = match rankdir {
            RankDir::TB | RankDir::BT => (
                ab.x.unwrap() - ab.points[0].x,
                cd.x.unwrap() - cd.points[0].x,
            ),
            RankDir::LR | RankDir::RL => (
                ab.y.unwrap() - ab.points[0].y,
                cd.y.unwrap() - cd.points[0].y,
            ),
        };
        assert_eq!(left, -1000.0 - 10.0 / 2.0, "{rankdir:?}");
        assert_eq!(right, 1000.0 + 10.0 / 2.0, "{rankdir:?}");
    }
}

#[test]
fn layout_can_layout_a_short_cycle() {
    let mut g = new_graph();
    g.graph_mut().options.ranksep = 200.0;
    node(&mut g, "a", 100.0, 100.0);
    node(&mut g, "b", 100.0, 100.0);
    g.set_edge(
        "a",
        "b",
        EdgeLabel {
            weight: 2.0,
            ..Default::default()
        },
    );
    g.set_edge("b", "a", EdgeLabel::default());
    layout(&mut g).unwrap();

    assert_eq!(
        coords(&g),
        [
            ("a".to_string(), (100.0 / 2.0, 100.0 / 2.0)),
            ("b".to_string(), (100.0 / 2.0, 100.0 + 200.0 + 100.0 / 2.0)),
        ]
        .into()
    );
    // One edge points down, the other up.
    let down = &edge(&g, "a", "b").points;
    let up = &edge(&g, "b", "a").points;
    assert!(down[1].y > down[0].y);
    assert!(up[0].y > up[1].y);
    assert!(!edge(&g, "b", "a").reversed);
}

#[test]
fn layout_adds_rectangle_intersects_for_edges() {
    let mut g = new_graph();
    g.graph_mut().options.ranksep = 200.0;
    node(&mut g, "a", 100.0, 100.0);
    node(&mut g, "b", 100.0, 100.0);
    g.set_edge("a", "b", EdgeLabel::default());
    layout(&mut g).unwrap();
    assert_eq!(
        edge(&g, "a", "b").points,
        vec![
            Point::new(50.0, 100.0),
            Point::new(50.0, 200.0),
            Point::new(50.0, 300.0),
        ]
    );
}

#[test]
fn layout_adds_rectangle_intersects_for_edges_spanning_several_ranks() {
    let mut g = new_graph();
    g.graph_mut().options.ranksep = 200.0;
    node(&mut g, "a", 100.0, 100.0);
    node(&mut g, "b", 100.0, 100.0);
    g.set_edge(
        "a",
        "b",
        EdgeLabel {
            minlen: 2,
            ..Default::default()
        },
    );
    layout(&mut g).unwrap();
    assert_eq!(
        edge(&g, "a", "b").points,
        vec![
            Point::new(50.0, 100.0),
            Point::new(50.0, 200.0),
            Point::new(50.0, 300.0),
            Point::new(50.0, 400.0),
            Point::new(50.0, 500.0),
        ]
    );
}

#[test]
fn layout_can_layout_a_self_loop() {
    for rankdir in RANKDIRS {
        let mut g = new_graph();
        g.graph_mut().options.edgesep = 75.0;
        g.graph_mut().options.rankdir = rankdir;
        node(&mut g, "a", 100.0, 100.0);
        g.set_edge("a", "a", labelled(50.0, 50.0, LabelPos::R));
        layout(&mut g).unwrap();

        let a = g.node_by_name("a").unwrap();
        let (ax, ay) = (a.x.unwrap(), a.y.unwrap());
        let points = &edge(&g, "a", "a").points;
        assert_eq!(points.len(), 7, "{rankdir:?}");
        for p in points {
            match rankdir {
                RankDir::TB | RankDir::BT => {
                    assert!(p.x > ax, "{rankdir:?}: {p:?}");
                    assert!((p.y - ay).abs() <= a.height / 2.0, "{rankdir:?}: {p:?}");
                }
                RankDir::LR | RankDir::RL => {
                    assert!(p.y > ay, "{rankdir:?}: {p:?}");
                    assert!((p.x - ax).abs() <= a.width / 2.0, "{rankdir:?}: {p:?}");
                }
            }
        }
        assert!(edge(&g, "a", "a").x.is_some());
    }
}

#[test]
fn layout_can_layout_a_graph_with_subgraphs() {
    let mut g = new_graph();
    let a = node(&mut g, "a", 50.0, 50.0);
    let sg = g.ensure_node("sg1");
    g.set_parent(a, Some(sg)).unwrap();
    layout(&mut g).unwrap();
    assert_well_formed(&g);
}

#[test]
fn layout_minimizes_the_height_of_subgraphs() {
    let mut g = new_graph();
    for v in ["a", "b", "c", "d", "x", "y"] {
        node(&mut g, v, 50.0, 50.0);
    }
    g.set_path(&["a", "b", "c", "d"]);
    let heavy = EdgeLabel {
        weight: 100.0,
        ..Default::default()
    };
    g.set_edge("a", "x", heavy.clone());
    g.set_edge("y", "d", heavy);
    let sg = g.ensure_node("sg");
    for v in ["x", "y"] {
        let v = g.node_id(v).unwrap();
        g.set_parent(v, Some(sg)).unwrap();
    }
    layout(&mut g).unwrap();
    assert_eq!(xy(&g, "x").1, xy(&g, "y").1);
}

#[test]
fn layout_sizes_subgraphs_in_every_rankdir() {
    for rankdir in RANKDIRS {
        let mut g = new_graph();
        g.graph_mut().options.rankdir = rankdir;
        let a = node(&mut g, "a", 50.0, 50.0);
        let sg = g.ensure_node("sg");
        g.set_parent(a, Some(sg)).unwrap();
        layout(&mut g).unwrap();

        let sg = g.node_by_name("sg").unwrap();
        assert!(sg.width > 50.0, "{rankdir:?}");
        assert!(sg.height > 50.0, "{rankdir:?}");
        assert!(sg.x.unwrap() > 50.0 / 2.0, "{rankdir:?}");
        assert!(sg.y.unwrap() > 50.0 / 2.0, "{rankdir:?}");
    }
}

#[test]
fn layout_encloses_children_in_their_subgraph() {
    for rankdir in RANKDIRS {
        let mut g = new_graph();
        g.graph_mut().options.rankdir = rankdir;
        for v in ["a", "b", "c", "d"] {
            node(&mut g, v, 40.0, 30.0);
        }
        let outer = g.ensure_node("outer");
        let inner = g.ensure_node("inner");
        for (child, parent) in [("a", outer), ("b", inner), ("c", inner)] {
            let child = g.node_id(child).unwrap();
            g.set_parent(child, Some(parent)).unwrap();
        }
        g.set_parent(inner, Some(outer)).unwrap();
        g.set_path(&["a", "b", "c"]);
        g.set_path(&["d", "c"]);
        g.set_path(&["a", "d"]);
        layout(&mut g).unwrap();
        assert_well_formed(&g);

        let encloses = |parent: NodeId, child: NodeId| {
            let (p, c) = (&g[parent], &g[child]);
            let eps = 1e-6;
            (c.x.unwrap() - p.x.unwrap()).abs() + c.width / 2.0 <= p.width / 2.0 + eps
                && (c.y.unwrap() - p.y.unwrap()).abs() + c.height / 2.0 <= p.height / 2.0 + eps
        };
        for child in ["a", "inner"] {
            assert!(encloses(outer, g.node_id(child).unwrap()), "{rankdir:?}: {child}");
        }
        for child in ["b", "c"] {
            assert!(encloses(inner, g.node_id(child).unwrap()), "{rankdir:?}: {child}");
        }
    }
}

#[test]
fn layout_adds_dimensions_to_the_graph() {
    let mut g = new_graph();
    node(&mut g, "a", 100.0, 50.0);
    layout(&mut g).unwrap();
    assert_eq!(g.graph().width, 100.0);
    assert_eq!(g.graph().height, 50.0);
}

#[test]
fn layout_applies_margins() {
    let mut g = new_graph();
    g.graph_mut().options.marginx = 10.0;
    g.graph_mut().options.marginy = 20.0;
    node(&mut g, "a", 100.0, 50.0);
    layout(&mut g).unwrap();
    assert_eq!(xy(&g, "a"), (60.0, 45.0));
    assert_eq!(g.graph().width, 120.0);
    assert_eq!(g.graph().height, 90.0);
}

#[test]
fn layout_keeps_nodes_inside_the_bounding_box() {
    for rankdir in RANKDIRS {
        let mut g = new_graph();
        g.graph_mut().options.rankdir = rankdir;
        node(&mut g, "a", 100.0, 200.0);
        layout(&mut g).unwrap();
        assert_eq!(xy(&g, "a"), (50.0, 100.0), "{rankdir:?}");
    }
}

#[test]
fn layout_keeps_left_labels_inside_the_bounding_box() {
    for rankdir in RANKDIRS {
        let mut g = new_graph();
        g.graph_mut().options.rankdir = rankdir;
        node(&mut g, "a", 100.0, 100.0);
        node(&mut g, "b", 100.0, 100.0);
        g.set_edge(
            "a",
            "b",
            EdgeLabel {
                labeloffset: 0.0,
                ..labelled(1000.0, 2000.0, LabelPos::L)
            },
        );
        layout(&mut g).unwrap();

        let e = edge(&g, "a", "b");
        match rankdir {
            RankDir::TB | RankDir::BT => assert_eq!(e.x, Some(1000.0 / 2.0), "{rankdir:?}"),
            RankDir::LR | RankDir::RL => assert_eq!(e.y, Some(2000.0 / 2.0), "{rankdir:?}"),
        }
    }
}

#[test]
fn layout_orients_ranks_by_rankdir() {
    for rankdir in RANKDIRS {
        let mut g = new_graph();
        g.graph_mut().options.rankdir = rankdir;
        for v in ["a", "b", "c"] {
            node(&mut g, v, 30.0, 20.0);
        }
        g.set_path(&["a", "b", "c"]);
        layout(&mut g).unwrap();
        assert_well_formed(&g);

        let (a, b, c) = (xy(&g, "a"), xy(&g, "b"), xy(&g, "c"));
        match rankdir {
            RankDir::TB => assert!(a.1 < b.1 && b.1 < c.1),
            RankDir::BT => assert!(a.1 > b.1 && b.1 > c.1),
            RankDir::LR => assert!(a.0 < b.0 && b.0 < c.0),
            RankDir::RL => assert!(a.0 > b.0 && b.0 > c.0),
        }
    }
}

#[test]
fn layout_handles_cycles_and_parallel_edges_in_every_rankdir() {
    for acyclicer in [Acyclicer::Dfs, Acyclicer::Greedy] {
        for rankdir in RANKDIRS {
            let mut g = new_graph();
            g.graph_mut().options.rankdir = rankdir;
            g.graph_mut().options.acyclicer = acyclicer;
            for v in ["a", "b", "c", "d"] {
                node(&mut g, v, 20.0, 20.0);
            }
            g.set_path(&["a", "b", "c", "a"]);
            g.set_path(&["c", "d"]);
            g.set_named_edge("a", "b", "second", labelled(15.0, 10.0, LabelPos::C))
                .unwrap();
            layout(&mut g).unwrap();
            assert_well_formed(&g);
            assert!(g.edge_entries().all(|(_, _, e)| !e.reversed));
            assert!(g.find_edge_by_name("c", "a", None).is_some());
            assert!(g.find_edge_by_name("a", "b", Some("second")).is_some());
        }
    }
}

#[test]
fn layout_leaves_caller_inputs_untouched() {
    let mut g = new_graph();
    node(&mut g, "a", 50.0, 50.0);
    node(&mut g, "b", 50.0, 50.0);
    let mut label = labelled(30.0, 20.0, LabelPos::L);
    label
        .extras
        .insert("style".to_string(), serde_json::json!({ "stroke": "red" }));
    g.set_edge("a", "b", label);
    let ranksep = g.graph().options.ranksep;
    layout(&mut g).unwrap();

    let e = edge(&g, "a", "b");
    assert_eq!(e.minlen, 1);
    assert_eq!(e.width, 30.0);
    assert_eq!(e.height, 20.0);
    assert_eq!(e.extras["style"], serde_json::json!({ "stroke": "red" }));
    assert!(e.x.is_some());
    assert_eq!(g.graph().options.ranksep, ranksep);
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert!(g.node_labels().all(|(_, n)| n.rank.is_none() && n.dummy.is_none()));
}

#[test]
fn layout_is_repeatable() {
    let build = || {
        let mut g = new_graph();
        for v in ["a", "b", "c", "d", "e"] {
            node(&mut g, v, 25.0, 15.0);
        }
        g.set_path(&["a", "b", "d"]);
        g.set_path(&["a", "c", "d", "e"]);
        g.set_path(&["b", "e"]);
        g
    };
    let mut first = build();
    layout(&mut first).unwrap();
    let mut second = build();
    layout(&mut second).unwrap();
    assert_eq!(coords(&first), coords(&second));

    let before = coords(&first);
    layout(&mut first).unwrap();
    assert_eq!(coords(&first), before);
}

#[test]
fn layout_honors_manual_ranks() {
    let mut g = new_graph();
    g.graph_mut().options.ranker = Ranker::Manual;
    for (v, rank) in [("a", 0), ("b", 4), ("c", 0)] {
        let v = node(&mut g, v, 20.0, 20.0);
        g[v].rank = Some(rank);
    }
    g.set_path(&["a", "b"]);
    layout(&mut g).unwrap();
    assert_well_formed(&g);
    assert_eq!(xy(&g, "a").1, xy(&g, "c").1);
    assert!(xy(&g, "b").1 > xy(&g, "a").1);
}

#[test]
fn layout_honors_a_fixed_alignment() {
    for align in Align::ALL {
        let mut g = new_graph();
        g.graph_mut().options.align = Some(align);
        for v in ["a", "b", "c"] {
            node(&mut g, v, 20.0, 20.0);
        }
        g.set_path(&["a", "b"]);
        g.set_path(&["a", "c"]);
        layout(&mut g).unwrap();
        assert_well_formed(&g);
    }
}

#[test]
fn layout_without_order_heuristic_still_lays_out() {
    let mut g = new_graph();
    g.graph_mut().options.disable_optimal_order_heuristic = true;
    for v in ["a", "b", "c", "d"] {
        node(&mut g, v, 20.0, 20.0);
    }
    g.set_path(&["a", "c"]);
    g.set_path(&["b", "d"]);
    g.set_path(&["a", "d"]);
    layout(&mut g).unwrap();
    assert_well_formed(&g);
}

#[test]
fn layout_rejects_undirected_graphs() {
    let mut g = LayoutGraph::new(GraphOptions {
        directed: false,
        ..Default::default()
    });
    node(&mut g, "a", 10.0, 10.0);
    let err = layout(&mut g).unwrap_err();
    assert!(matches!(err, LayoutError::UndirectedGraph));
    assert_eq!(g.node_by_name("a").unwrap().x, None);
}

#[test]
fn layout_options_parse_from_json() {
    let options = LayoutOptions::from_json(
        r#"{
            "rankdir": "LR",
            "nodesep": 10,
            "ranker": "tight-tree",
            "acyclicer": "greedy",
            "align": "DL",
            "disableOptimalOrderHeuristic": true,
            "somethingElse": [1, 2, 3]
        }"#,
    )
    .unwrap();
    assert_eq!(
        options,
        LayoutOptions {
            rankdir: RankDir::LR,
            nodesep: 10.0,
            ranker: Ranker::TightTree,
            acyclicer: Acyclicer::Greedy,
            align: Some(Align::DL),
            disable_optimal_order_heuristic: true,
            ..Default::default()
        }
    );

    let manual = LayoutOptions::from_json(r#"{ "ranker": "none" }"#).unwrap();
    assert_eq!(manual.ranker, Ranker::Manual);
    assert_eq!(LayoutOptions::from_json("{}").unwrap(), LayoutOptions::default());

    let err = LayoutOptions::from_json(r#"{ "nodesep": "wide" }"#).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidOptions(_)));
}

#[test]
fn layout_options_have_the_documented_defaults() {
    let options = LayoutOptions::default();
    assert_eq!(options.rankdir, RankDir::TB);
    assert_eq!(
        (options.nodesep, options.edgesep, options.ranksep),
        (50.0, 20.0, 50.0)
    );
    assert_eq!((options.marginx, options.marginy), (0.0, 0.0));
    assert_eq!(options.acyclicer, Acyclicer::Dfs);
    assert_eq!(options.ranker, Ranker::NetworkSimplex);
    assert_eq!(options.align, None);
    assert!(!options.disable_optimal_order_heuristic);
}
