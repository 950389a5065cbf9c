use policygraph_core::{LinearPolicyGraph, NodeType, Scenario};
use serde_json::json;

fn demand_graph() -> LinearPolicyGraph<serde_json::Value> {
    let mut lpg = LinearPolicyGraph::new(Scenario::new("try", json!({ "1": "try" })));
    lpg.add_stage(
        vec![
            Scenario::new("low", json!({ "demand": 2 })),
            Scenario::new("high", json!({ "demand": 5 })),
        ],
        Some(vec![0.6, 0.4]),
    )
    .unwrap();
    lpg.add_stage(vec![Scenario::new("flat", json!({ "demand": 3 }))], None)
        .unwrap();
    lpg
}

#[test]
fn summary_reports_every_node_and_stage_count() {
    let summary = demand_graph().graph().summary();
    assert_eq!(summary.nodes.len(), 3);
    assert_eq!(summary.stages, 3);
    assert_eq!(summary.nodes[1].node_type, NodeType::Stochastic);
    assert_eq!(summary.nodes[2].scenarios, vec!["flat"]);
    assert!(summary.to_string().ends_with("Stages: 3"));
}

#[test]
fn json_export_round_trips_payloads() {
    let export = demand_graph().graph().export();
    let value = serde_json::to_value(&export).unwrap();

    assert_eq!(value["nodes"][1]["type"], "Stochastic");
    assert_eq!(value["nodes"][1]["names"], json!(["stage_2_low", "stage_2_high"]));
    assert_eq!(value["nodes"][1]["data"][1]["data"]["demand"], 5);
    assert_eq!(value["nodes"][2]["p"], 1.0);
    assert_eq!(value["edges"][1], json!({ "from": "stage_2", "to": "stage_3", "p": 1.0 }));

    let back: policygraph_core::GraphExport<serde_json::Value> =
        serde_json::from_value(value).unwrap();
    assert_eq!(back, export);
}
