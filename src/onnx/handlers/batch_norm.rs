//! BatchNormalization

use super::HandlerContext;
use crate::error::Result;
use crate::onnx::backend::{Backend, BatchNormParams};
use crate::onnx::node::OnnxNode;

const DEFAULT_EPSILON: f32 = 1e-5;
const DEFAULT_MOMENTUM: f32 = 0.9;

/// Suffixes the primitive appends to the layer name, in ONNX input order
/// (scale, B, mean, var)
const PARAM_SUFFIXES: [&str; 4] = ["gamma", "beta", "moving_mean", "moving_variance"];

/// Batch normalization over the channel axis
///
/// The primitive looks its parameters up by layer name, so every node gets a
/// fresh `bn_<id>` prefix and its scale, bias, mean and variance are copied
/// under that prefix. Only the data input is passed on.
pub(crate) fn batch_norm<B: Backend>(
    ctx: &mut HandlerContext<'_, B>,
    node: &OnnxNode,
) -> Result<Vec<B::Tensor>> {
    let params = BatchNormParams {
        name: format!("bn_{}", ctx.names.next_id()),
        axis: 1,
        epsilon: node.float_attr("epsilon", DEFAULT_EPSILON)?,
        momentum: node.float_attr("momentum", DEFAULT_MOMENTUM)?,
    };

    for (slot, suffix) in PARAM_SUFFIXES.iter().enumerate() {
        let source = node.input(slot + 1)?;
        let target = format!("{}-{suffix}", params.name);
        tracing::debug!(node = %node.name, source, target = %target, "copy batch norm parameter");
        ctx.backend.copy_variable(source, &target)?;
    }

    let mut node = node.clone();
    node.inputs.truncate(1);

    let x = ctx.input(&node, 0)?;
    Ok(vec![ctx.backend.batch_normalization(x, &params)?])
}
