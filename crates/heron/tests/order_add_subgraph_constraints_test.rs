use heron::graphlib::{GraphOptions, NodeId};
use heron::order::{
    ConstraintGraph, LayerGraph, LayerGraphLabel, add_subgraph_constraints,
};

fn layer_graph(names: &[&str]) -> LayerGraph {
    let mut lg = LayerGraph::with_label(
        GraphOptions {
            compound: true,
            ..Default::default()
        },
        LayerGraphLabel {
            root: NodeId::new(0),
        },
    );
    for v in names {
        lg.ensure_node(v);
    }
    lg
}

fn nest(lg: &mut LayerGraph, child: &str, parent: &str) {
    let c = lg.ensure_node(child);
    let p = lg.ensure_node(parent);
    lg.set_parent(c, Some(p)).unwrap();
}

fn constraint_graph_of(lg: &LayerGraph) -> ConstraintGraph {
    lg.filter_map_as(GraphOptions::default(), (), |_, _| Some(()), |_, _, _| None)
}

fn ids(lg: &LayerGraph, vs: &[&str]) -> Vec<NodeId> {
    vs.iter().map(|v| lg.node_id(v).unwrap()).collect()
}

fn edges(lg: &LayerGraph, cg: &ConstraintGraph) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = cg
        .edge_entries()
        .map(|(_, key, _)| (lg.name(key.v).to_string(), lg.name(key.w).to_string()))
        .collect();
    out.sort();
    out
}

#[test]
fn add_subgraph_constraints_ignores_a_flat_layer() {
    let lg = layer_graph(&["a", "b", "c", "d"]);
    let mut cg = constraint_graph_of(&lg);
    add_subgraph_constraints(&lg, &mut cg, &ids(&lg, &["a", "b", "c", "d"])).unwrap();
    assert_eq!(cg.edge_count(), 0);
}

#[test]
fn add_subgraph_constraints_ignores_contiguous_subgraph_nodes() {
    let mut lg = layer_graph(&["a", "b", "c"]);
    for v in ["a", "b", "c"] {
        nest(&mut lg, v, "sg");
    }
    let mut cg = constraint_graph_of(&lg);
    add_subgraph_constraints(&lg, &mut cg, &ids(&lg, &["a", "b", "c"])).unwrap();
    assert_eq!(cg.edge_count(), 0);
}

#[test]
fn add_subgraph_constraints_orders_adjacent_sibling_subgraphs() {
    let mut lg = layer_graph(&["a", "b"]);
    nest(&mut lg, "a", "sg1");
    nest(&mut lg, "b", "sg2");
    let mut cg = constraint_graph_of(&lg);
    add_subgraph_constraints(&lg, &mut cg, &ids(&lg, &["a", "b"])).unwrap();
    assert_eq!(edges(&lg, &cg), vec![("sg1".to_string(), "sg2".to_string())]);
}

#[test]
fn add_subgraph_constraints_works_across_nesting_levels() {
    let vs = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let mut lg = layer_graph(&vs);
    nest(&mut lg, "b", "sg2");
    nest(&mut lg, "sg2", "sg1");
    nest(&mut lg, "c", "sg1");
    nest(&mut lg, "d", "sg3");
    nest(&mut lg, "sg3", "sg1");
    nest(&mut lg, "f", "sg4");
    nest(&mut lg, "g", "sg5");
    nest(&mut lg, "sg5", "sg4");
    let mut cg = constraint_graph_of(&lg);
    add_subgraph_constraints(&lg, &mut cg, &ids(&lg, &vs)).unwrap();
    assert_eq!(
        edges(&lg, &cg),
        vec![
            ("sg1".to_string(), "sg4".to_string()),
            ("sg2".to_string(), "sg3".to_string()),
        ]
    );
}
