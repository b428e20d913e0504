//! Versioned handler registry
//!
//! Each operator type maps to handlers keyed by the earliest opset they
//! support. Resolution picks the greatest key not above the requested opset.

use std::collections::{BTreeMap, HashMap};

use super::backend::Backend;
use super::handlers::{self, HandlerContext};
use super::node::OnnxNode;
use crate::error::{Error, Result};

/// Handler turning one node into primitive operator calls
pub type Handler<B> =
    fn(&mut HandlerContext<'_, B>, &OnnxNode) -> Result<Vec<<B as Backend>::Tensor>>;

/// `op_type -> (since_version -> handler)`
pub struct HandlerRegistry<B: Backend> {
    handlers: HashMap<String, BTreeMap<u32, Handler<B>>>,
}

impl<B: Backend> HandlerRegistry<B> {
    /// Registry with no handlers
    pub fn empty() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Register `handler` for `op_type` from opset `since_version` on
    ///
    /// Replaces any handler already registered for the same pair.
    pub fn register(&mut self, op_type: &str, since_version: u32, handler: Handler<B>) {
        self.handlers.entry(op_type.to_string()).or_default().insert(since_version, handler);
    }

    fn register_all(&mut self, op_type: &str, versions: &[u32], handler: Handler<B>) {
        for &version in versions {
            self.register(op_type, version, handler);
        }
    }

    /// Handler for `op_type` at `opset`
    pub fn resolve(&self, op_type: &str, opset: u32) -> Result<Handler<B>> {
        let versions = self
            .handlers
            .get(op_type)
            .ok_or_else(|| Error::UnsupportedOp { op_type: op_type.to_string() })?;

        match versions.range(..=opset).next_back() {
            Some((&since, &handler)) => {
                tracing::debug!(op_type, opset, since, "resolved handler");
                Ok(handler)
            }
            None => Err(Error::UnsupportedOpVersion {
                op_type: op_type.to_string(),
                version: opset,
                earliest: versions.keys().next().copied().unwrap_or_default(),
            }),
        }
    }

    pub fn supports(&self, op_type: &str) -> bool {
        self.handlers.contains_key(op_type)
    }

    /// Registered versions of `op_type`, ascending
    pub fn versions(&self, op_type: &str) -> Vec<u32> {
        self.handlers.get(op_type).map(|v| v.keys().copied().collect()).unwrap_or_default()
    }

    /// Registered operator types, sorted
    pub fn op_types(&self) -> Vec<&str> {
        let mut ops: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ops.sort_unstable();
        ops
    }
}

impl<B: Backend> Default for HandlerRegistry<B> {
    /// Registry with every built-in handler
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_all("Conv", &[1, 11], handlers::conv::<B>);
        registry.register_all("BatchNormalization", &[1, 6, 7, 9], handlers::batch_norm::<B>);
        registry.register_all("AveragePool", &[1, 7, 10, 11], handlers::average_pool::<B>);
        registry.register_all("MaxPool", &[1, 8, 10, 11, 12], handlers::max_pool::<B>);
        registry.register_all("Relu", &[1, 6], handlers::relu::<B>);
        registry.register_all("SoftmaxCrossEntropyLoss", &[12], handlers::softmax_cross_entropy::<B>);
        registry
    }
}
