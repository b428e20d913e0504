//! Import command implementation

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::cli::logging::log;
use crate::cli::{ImportArgs, LogLevel};
use crate::onnx::{
    Backend, BackendCall, HandlerRegistry, NameGenerator, OnnxGraph, OnnxImporter,
    RandomNameGenerator, RecordingBackend,
};

/// Parameter copy performed while importing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableCopy {
    pub from: String,
    pub to: String,
}

/// Everything a dry-run import emitted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub opset: u32,
    pub calls: Vec<BackendCall>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub copies: Vec<VariableCopy>,
    /// Graph tensor name to the backend tensor bound to it
    pub outputs: BTreeMap<String, String>,
}

/// Operator types in `graph` with no registered handler, in first-seen order
pub fn unsupported_op_types<B: Backend>(
    graph: &OnnxGraph,
    registry: &HandlerRegistry<B>,
) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for node in &graph.nodes {
        if !registry.supports(&node.op_type) && !missing.contains(&node.op_type) {
            missing.push(node.op_type.clone());
        }
    }
    missing
}

/// Import `graph` against a [`RecordingBackend`] that knows its initializers
pub fn import_to_report(
    graph: &OnnxGraph,
    opset: u32,
    names: Box<dyn NameGenerator>,
) -> Result<ImportReport, String> {
    let mut backend = RecordingBackend::with_variables(graph.initializers.iter().cloned());
    let mut env: HashMap<String, String> = graph
        .inputs
        .iter()
        .chain(&graph.initializers)
        .map(|name| (name.clone(), name.clone()))
        .collect();

    let mut importer = OnnxImporter::new(names);
    let missing = unsupported_op_types(graph, importer.registry());
    if !missing.is_empty() {
        tracing::warn!(ops = ?missing, "graph uses operators with no handler");
    }
    importer
        .import_graph(&mut backend, &graph.nodes, &mut env, opset)
        .map_err(|e| format!("Import failed: {e}"))?;

    let outputs = graph
        .nodes
        .iter()
        .flat_map(|node| &node.outputs)
        .filter_map(|name| env.get(name).map(|tensor| (name.clone(), tensor.clone())))
        .collect();

    Ok(ImportReport {
        opset,
        calls: backend.calls().to_vec(),
        copies: backend
            .copies()
            .iter()
            .map(|(from, to)| VariableCopy { from: from.clone(), to: to.clone() })
            .collect(),
        outputs,
    })
}

pub fn run_import(args: ImportArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Verbose, &format!("Loading graph: {}", args.graph.display()));

    let graph = OnnxGraph::load(&args.graph).map_err(|e| format!("Graph error: {e}"))?;
    let opset = args.opset.unwrap_or(graph.opset);
    let names: Box<dyn NameGenerator> = match args.seed {
        Some(seed) => Box::new(RandomNameGenerator::with_seed(seed)),
        None => Box::new(RandomNameGenerator::new()),
    };

    log(
        level,
        LogLevel::Verbose,
        &format!("Importing {} nodes at opset {opset}", graph.nodes.len()),
    );
    let report = import_to_report(&graph, opset, names)?;

    let yaml =
        serde_yaml::to_string(&report).map_err(|e| format!("Failed to serialize report: {e}"))?;
    println!("{yaml}");
    Ok(())
}
