//! Relu

use super::HandlerContext;
use crate::error::Result;
use crate::onnx::backend::Backend;
use crate::onnx::node::OnnxNode;

pub(crate) fn relu<B: Backend>(
    ctx: &mut HandlerContext<'_, B>,
    node: &OnnxNode,
) -> Result<Vec<B::Tensor>> {
    let x = ctx.input(node, 0)?;
    Ok(vec![ctx.backend.relu(x)?])
}
