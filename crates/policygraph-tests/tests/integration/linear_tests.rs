use policygraph_core::{GraphConfig, GraphError, LinearPolicyGraph, PolicyGraph, Scenario};

fn numbered(n: usize) -> Vec<Scenario<Option<i32>>> {
    (0..n).map(|i| Scenario::new(i.to_string(), None)).collect()
}

#[test]
fn demo_plan_builds_four_stage_chain() {
    let mut lpg: LinearPolicyGraph<Option<i32>, &str> =
        LinearPolicyGraph::new(Scenario::new("try", None));
    lpg.add_stage(numbered(3), None).unwrap();
    lpg.add_stage(numbered(4), None).unwrap();
    lpg.add_stage(numbered(4), None).unwrap();

    let stage_2 = lpg.graph().node("stage_2").unwrap();
    assert_eq!(stage_2.len(), 3);
    for p in stage_2.probabilities() {
        assert!((p - 1.0 / 3.0).abs() < 1e-12);
    }

    lpg.assign_subproblem("abstract_subproblem");
    let graph: PolicyGraph<_, _> = lpg.into();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.stage_count(), 4);
    assert!(graph.unassigned_nodes().is_empty());
    assert_eq!(
        graph.node_names().collect::<Vec<_>>(),
        vec!["root", "stage_2", "stage_3", "stage_4"]
    );
}

#[test]
fn explicit_probabilities_are_kept() {
    let mut lpg: LinearPolicyGraph<Option<i32>> =
        LinearPolicyGraph::new(Scenario::new("try", None));
    lpg.add_stage(numbered(2), Some(vec![0.1, 0.9])).unwrap();
    assert_eq!(
        lpg.graph().node("stage_2").unwrap().probabilities(),
        &[0.1, 0.9]
    );
}

#[test]
fn mismatched_probability_list_is_propagated() {
    let mut lpg: LinearPolicyGraph<Option<i32>> =
        LinearPolicyGraph::new(Scenario::new("try", None));
    let err = lpg
        .add_stage(numbered(3), Some(vec![0.5, 0.5]))
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidDistribution { .. }));
    assert_eq!(lpg.graph().node_count(), 1);
    assert_eq!(lpg.num_stages(), 1);
}

#[test]
fn configured_tolerance_applies_to_stages() {
    let cfg = GraphConfig::default().with_density_tolerance(0.05);
    let mut lpg: LinearPolicyGraph<Option<i32>> =
        LinearPolicyGraph::with_config(Scenario::new("try", None), cfg).unwrap();
    lpg.add_stage(numbered(2), Some(vec![0.5, 0.48])).unwrap();

    let strict = GraphConfig::default().with_density_tolerance(0.0);
    let mut lpg: LinearPolicyGraph<Option<i32>> =
        LinearPolicyGraph::with_config(Scenario::new("try", None), strict).unwrap();
    assert!(lpg.add_stage(numbered(2), Some(vec![0.5, 0.4999])).is_err());
}

#[test]
fn assignments_after_new_stage_show_gap() {
    let mut lpg: LinearPolicyGraph<Option<i32>, u32> =
        LinearPolicyGraph::new(Scenario::new("try", None));
    lpg.add_stage(numbered(2), None).unwrap();
    lpg.assign_subproblem(7);
    lpg.add_stage(numbered(2), None).unwrap();
    assert_eq!(lpg.graph().unassigned_nodes(), vec!["stage_3"]);

    lpg.assign(8, "stage_3").unwrap();
    assert!(lpg.graph().unassigned_nodes().is_empty());
    assert_eq!(lpg.graph().assignment("stage_3"), Some(&8));
}
