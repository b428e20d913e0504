//! SoftmaxCrossEntropyLoss

use super::HandlerContext;
use crate::error::Result;
use crate::onnx::backend::Backend;
use crate::onnx::node::OnnxNode;

/// ONNX orders inputs `(scores, labels)`; the primitive takes labels first
pub(crate) fn softmax_cross_entropy<B: Backend>(
    ctx: &mut HandlerContext<'_, B>,
    node: &OnnxNode,
) -> Result<Vec<B::Tensor>> {
    let logits = ctx.input(node, 0)?;
    let labels = ctx.input(node, 1)?;
    Ok(vec![ctx.backend.sparse_softmax_cross_entropy(labels, logits)?])
}
