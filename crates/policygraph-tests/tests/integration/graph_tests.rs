use policygraph_core::{GraphError, Node, NodeType, PolicyGraph, Probability, Scenario};

fn named(names: &[&str]) -> Vec<Scenario<()>> {
    names.iter().map(|n| Scenario::new(*n, ())).collect()
}

#[test]
fn stochastic_node_with_excess_mass_is_rejected() {
    let err = Node::new("n", named(&["A", "B"]), vec![0.5, 0.6]).unwrap_err();
    assert!(matches!(err, GraphError::InvalidDistribution { .. }));
}

#[test]
fn second_stage_2_is_a_duplicate() {
    let mut graph: PolicyGraph<()> = PolicyGraph::new(Scenario::new("try", ()));
    let first = Node::new("stage_2", named(&["a"]), vec![1.0])
        .unwrap()
        .with_parent("root");
    let second = Node::new("stage_2", named(&["x", "y"]), vec![0.5, 0.5])
        .unwrap()
        .with_parent("root");

    graph.add_node(first).unwrap();
    let err = graph.add_node(second).unwrap_err();
    assert_eq!(err, GraphError::DuplicateNode("stage_2".to_string()));
    assert_eq!(graph.node("stage_2").unwrap().node_type(), NodeType::Deterministic);
}

#[test]
fn branching_tree_keeps_one_parent_per_node() {
    let mut graph: PolicyGraph<(), u8> = PolicyGraph::new(Scenario::new("try", ()));
    graph
        .add_child("root", "wet", named(&["lo", "hi"]), vec![0.3, 0.7])
        .unwrap();
    graph
        .add_child("root", "dry", named(&["only"]), vec![0.4])
        .unwrap();
    graph
        .add_child("wet", "wet_next", named(&["a", "b", "c"]), vec![0.2, 0.2, 0.6])
        .unwrap();

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    for name in ["wet", "dry", "wet_next"] {
        let incoming = graph
            .edges()
            .iter()
            .filter(|e| graph.node_by_id(e.dst).unwrap().name() == name)
            .count();
        assert_eq!(incoming, 1, "{} should have one incoming edge", name);
    }
    assert_eq!(
        graph.edge_probability("root", "dry"),
        Some(&Probability::Scalar(0.4))
    );
    assert_eq!(graph.children_names("root").unwrap(), vec!["wet", "dry"]);
    assert_eq!(graph.parent_name("wet_next").unwrap(), "wet");
    assert_eq!(graph.stage_count(), 3);
    assert_eq!(graph.depth("dry").unwrap(), 1);
}

#[test]
fn root_has_no_parent() {
    let graph: PolicyGraph<()> = PolicyGraph::new(Scenario::new("try", ()));
    assert_eq!(
        graph.parent_name("root").unwrap_err(),
        GraphError::NoParent("root".to_string())
    );
}

#[test]
fn failed_insert_leaves_graph_unchanged() {
    let mut graph: PolicyGraph<(), u8> = PolicyGraph::new(Scenario::new("try", ()));
    graph.add_child("root", "a", named(&["x"]), vec![1.0]).unwrap();

    let before_nodes: Vec<String> = graph.node_names().map(str::to_string).collect();
    let before_edges = graph.edges().to_vec();

    assert!(graph.add_child("ghost", "b", named(&["x"]), vec![1.0]).is_err());
    assert!(graph.add_child("a", "b", named(&["x", "y"]), vec![0.9, 0.9]).is_err());
    assert!(graph.add_child("a", "a", named(&["x"]), vec![1.0]).is_err());
    assert!(graph.add_child("a", "b", named(&["x"]), vec![0.0]).is_err());

    let after_nodes: Vec<String> = graph.node_names().map(str::to_string).collect();
    assert_eq!(before_nodes, after_nodes);
    assert_eq!(before_edges, graph.edges());
}

#[test]
fn assignment_errors_name_the_node() {
    let mut graph: PolicyGraph<(), u8> = PolicyGraph::new(Scenario::new("try", ()));
    let err = graph.assign(1, "stage_9").unwrap_err();
    assert_eq!(err.to_string(), "node 'stage_9' is not in the policy graph");
    assert!(graph.assignment_map().is_empty());
}
