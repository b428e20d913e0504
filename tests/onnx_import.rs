//! Integration tests: graph descriptions imported onto a recording backend

use std::collections::HashMap;

use trainconf::onnx::{
    BackendCall, CounterNameGenerator, OnnxGraph, OnnxImporter, Padding, RandomNameGenerator,
    RecordingBackend,
};
use trainconf::Error;

const LENET_BLOCK: &str = r"
opset: 11
inputs: [image, label]
initializers: [conv_w, conv_b, bn_scale, bn_bias, bn_mean, bn_var]
nodes:
  - name: conv1
    op_type: Conv
    inputs: [image, conv_w, conv_b]
    outputs: [c1]
    attrs: { kernel_shape: [5, 5], pads: [2, 2, 2, 2] }
  - name: bn1
    op_type: BatchNormalization
    inputs: [c1, bn_scale, bn_bias, bn_mean, bn_var]
    outputs: [b1]
    attrs: { epsilon: 0.001 }
  - name: relu1
    op_type: Relu
    inputs: [b1]
    outputs: [r1]
  - name: pool1
    op_type: AveragePool
    inputs: [r1]
    outputs: [p1]
    attrs: { kernel_shape: [2, 2], strides: [2, 2], auto_pad: VALID }
";

fn bind_free_tensors(graph: &OnnxGraph) -> HashMap<String, String> {
    graph.inputs.iter().chain(&graph.initializers).map(|n| (n.clone(), n.clone())).collect()
}

#[test]
fn test_import_block_emits_calls_in_order() {
    let graph = OnnxGraph::from_yaml(LENET_BLOCK).expect("parse should succeed");
    let mut backend = RecordingBackend::with_variables(graph.initializers.clone());
    let mut env = bind_free_tensors(&graph);
    let mut importer = OnnxImporter::new(Box::new(CounterNameGenerator::new()));

    importer
        .import_graph(&mut backend, &graph.nodes, &mut env, graph.opset)
        .expect("import should succeed");

    let calls = backend.calls();
    assert_eq!(calls.len(), 4);
    match &calls[0] {
        BackendCall::Conv { input, weight, bias, params, .. } => {
            assert_eq!(input, "image");
            assert_eq!(weight, "conv_w");
            assert_eq!(bias.as_deref(), Some("conv_b"));
            assert_eq!(params.padding, Padding::Explicit(vec![[2, 2], [2, 2]]));
        }
        other => panic!("expected conv, got {other:?}"),
    }
    match &calls[1] {
        BackendCall::BatchNormalization { input, params, .. } => {
            assert_eq!(input, "conv_0");
            assert_eq!(params.name, "bn_0");
            assert!((params.epsilon - 0.001).abs() < 1e-9);
        }
        other => panic!("expected batch norm, got {other:?}"),
    }
    match &calls[3] {
        BackendCall::AvgPool2d { input, params, .. } => {
            assert_eq!(input, "relu_2");
            assert_eq!(params.padding, Padding::Valid);
        }
        other => panic!("expected avg pool, got {other:?}"),
    }

    assert!(backend.has_variable("bn_0-moving_variance"));
    assert_eq!(env["p1"], "avg_pool2d_3");
}

#[test]
fn test_random_names_are_reproducible_with_seed() {
    let graph = OnnxGraph::from_yaml(LENET_BLOCK).expect("parse should succeed");

    let run = |seed: u64| {
        let mut backend = RecordingBackend::with_variables(graph.initializers.clone());
        let mut env = bind_free_tensors(&graph);
        let mut importer = OnnxImporter::new(Box::new(RandomNameGenerator::with_seed(seed)));
        importer
            .import_graph(&mut backend, &graph.nodes, &mut env, graph.opset)
            .expect("import should succeed");
        backend.copies().to_vec()
    };

    let first = run(42);
    assert_eq!(first, run(42));
    let prefix = first[0].1.split('-').next().expect("copy target has a prefix").to_string();
    assert!(prefix.starts_with("bn_"));
    assert_eq!(prefix.len(), "bn_".len() + 8);
    assert!(first.iter().all(|(_, to)| to.starts_with(&prefix)));
}

#[test]
fn test_import_stops_at_first_unsupported_node() {
    let graph = OnnxGraph::from_yaml(
        r"
inputs: [x]
nodes:
  - op_type: Relu
    inputs: [x]
    outputs: [a]
  - op_type: Gemm
    inputs: [a]
    outputs: [b]
  - op_type: Relu
    inputs: [b]
    outputs: [c]
",
    )
    .expect("parse should succeed");
    let mut backend = RecordingBackend::new();
    let mut env = bind_free_tensors(&graph);
    let mut importer = OnnxImporter::new(Box::new(CounterNameGenerator::new()));

    let err = importer.import_graph(&mut backend, &graph.nodes, &mut env, graph.opset).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOp { ref op_type } if op_type == "Gemm"));
    assert_eq!(backend.calls().len(), 1);
    assert!(env.contains_key("a"));
    assert!(!env.contains_key("c"));
}
