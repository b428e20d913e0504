//! ONNX node import
//!
//! Each node is dispatched to the handler registered for its operator type
//! and the graph's opset, which rewrites it into calls against a
//! [`Backend`].
//!
//! # Op Mapping
//!
//! | ONNX Op | Opsets | Backend call |
//! |---------|--------|--------------|
//! | `Conv` | 1, 11 | `conv` |
//! | `BatchNormalization` | 1, 6, 7, 9 | `batch_normalization` |
//! | `AveragePool` | 1, 7, 10, 11 | `avg_pool2d` |
//! | `MaxPool` | 1, 8, 10, 11, 12 | `max_pool2d` |
//! | `Relu` | 1, 6 | `relu` |
//! | `SoftmaxCrossEntropyLoss` | 12 | `sparse_softmax_cross_entropy` |

mod backend;
mod graph;
mod handlers;
mod names;
mod node;
mod recording;
mod registry;

use std::collections::HashMap;

pub use backend::{
    Backend, BatchNormParams, ConvParams, DataFormat, Padding, ParameterStore, Pool2dParams,
};
pub use graph::OnnxGraph;
pub use handlers::HandlerContext;
pub use names::{CounterNameGenerator, NameGenerator, RandomNameGenerator};
pub use node::{AttrValue, OnnxNode};
pub use recording::{BackendCall, RecordingBackend};
pub use registry::{Handler, HandlerRegistry};

use crate::error::Result;

/// Dispatches ONNX nodes to their versioned handlers
pub struct OnnxImporter<B: Backend> {
    registry: HandlerRegistry<B>,
    names: Box<dyn NameGenerator>,
}

impl<B: Backend> OnnxImporter<B> {
    /// Importer with every built-in handler
    pub fn new(names: Box<dyn NameGenerator>) -> Self {
        Self::with_registry(HandlerRegistry::default(), names)
    }

    pub fn with_registry(registry: HandlerRegistry<B>, names: Box<dyn NameGenerator>) -> Self {
        Self { registry, names }
    }

    pub fn registry(&self) -> &HandlerRegistry<B> {
        &self.registry
    }

    /// Import one node, returning the tensors it produces
    pub fn import_node(
        &mut self,
        backend: &mut B,
        node: &OnnxNode,
        env: &HashMap<String, B::Tensor>,
        opset: u32,
    ) -> Result<Vec<B::Tensor>> {
        let handler = self.registry.resolve(&node.op_type, opset)?;
        let mut ctx = HandlerContext { backend, env, names: self.names.as_mut() };
        handler(&mut ctx, node)
    }

    /// Import `nodes` in order, binding each output name in `env`
    ///
    /// Stops at the first failing node; outputs of earlier nodes stay bound.
    pub fn import_graph(
        &mut self,
        backend: &mut B,
        nodes: &[OnnxNode],
        env: &mut HashMap<String, B::Tensor>,
        opset: u32,
    ) -> Result<()> {
        for node in nodes {
            let outputs = self.import_node(backend, node, env, opset)?;
            if node.outputs.is_empty() {
                tracing::warn!(op_type = %node.op_type, node = %node.name, "node declares no outputs, result dropped");
                continue;
            }
            for (name, tensor) in node.outputs.iter().zip(outputs) {
                env.insert(name.clone(), tensor);
            }
        }
        Ok(())
    }
}
