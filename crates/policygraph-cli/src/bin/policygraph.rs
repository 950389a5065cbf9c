//! Policygraph CLI - build a linear policy graph from a JSON stage plan
//!
//! Usage:
//!   policygraph <plan.json>                        # Validate and print a summary
//!   policygraph <plan.json> -o json                # Dump nodes and edges as JSON
//!   policygraph <plan.json> --sample-seed 7        # Draw one scenario per stage
//!
//! Plan format:
//!
//! ```json
//! {
//!   "config": { "density_tolerance": 0.001 },
//!   "root": { "name": "try", "data": null },
//!   "stages": [
//!     { "scenarios": [{ "name": "lo", "data": 1 }, { "name": "hi", "data": 3 }],
//!       "probabilities": [0.4, 0.6] }
//!   ],
//!   "subproblem": "model.lp"
//! }
//! ```

use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use policygraph_core::{GraphConfig, LinearPolicyGraph, PolicyGraph, Scenario};
use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "policygraph")]
#[command(version)]
#[command(about = "Build and inspect linear policy graphs for multi-stage stochastic programs")]
struct Cli {
    /// Input stage plan (JSON)
    #[arg(value_name = "FILE")]
    file: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary, value_name = "FORMAT")]
    output: OutputFormat,

    /// Draw one scenario per stage with this seed
    #[arg(long, value_name = "SEED")]
    sample_seed: Option<u64>,

    /// Follow stage probabilities when sampling instead of drawing uniformly
    #[arg(long, requires = "sample_seed")]
    weighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per node plus the stage count
    Summary,
    /// Nodes and edges as JSON
    Json,
    /// Rust debug dump of the graph
    Debug,
}

#[derive(Debug, Deserialize)]
struct StagePlan {
    #[serde(default)]
    config: GraphConfig,
    root: Scenario<Value>,
    #[serde(default)]
    stages: Vec<StageSpec>,
    subproblem: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StageSpec {
    scenarios: Vec<Scenario<Value>>,
    probabilities: Option<Vec<f64>>,
}

type PlanGraph = PolicyGraph<Value, String>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("reading plan '{}'", cli.file))?;
    let plan: StagePlan = serde_json::from_str(&source)
        .with_context(|| format!("parsing plan '{}'", cli.file))?;
    let graph = build(plan)?;

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "policy graph built"
    );

    match cli.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&graph.export())
                .context("serializing policy graph")?;
            println!("{}", json);
        }
        OutputFormat::Debug => println!("{:#?}", graph),
        OutputFormat::Summary => println!("{}", graph.summary()),
    }

    if let Some(seed) = cli.sample_seed {
        print_sample(&graph, seed, cli.weighted);
    }
    Ok(())
}

fn build(plan: StagePlan) -> Result<PlanGraph> {
    let mut lpg = LinearPolicyGraph::with_config(plan.root, plan.config)
        .context("invalid graph configuration")?;
    for (i, stage) in plan.stages.into_iter().enumerate() {
        lpg.add_stage(stage.scenarios, stage.probabilities)
            .with_context(|| format!("stage {} of the plan", i + 1))?;
    }
    if let Some(subproblem) = plan.subproblem {
        lpg.assign_subproblem(subproblem);
    }

    let unassigned = lpg.graph().unassigned_nodes();
    if !unassigned.is_empty() {
        tracing::warn!(?unassigned, "nodes without a subproblem");
    }
    Ok(lpg.into_graph())
}

fn print_sample(graph: &PlanGraph, seed: u64, weighted: bool) {
    println!("\nSampled path (seed {}):", seed);
    for node in graph.nodes() {
        let scenario = if weighted {
            node.random_weighted_scenario(seed)
        } else {
            node.random_scenario(seed)
        };
        println!("  {} -> {} ({})", node.name(), scenario.name(), scenario.data());
    }
}
