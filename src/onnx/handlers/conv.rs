//! Conv

use super::{ones_or, padding, HandlerContext};
use crate::error::Result;
use crate::onnx::backend::{Backend, ConvParams};
use crate::onnx::node::OnnxNode;

/// Inputs: `X`, `W` and an optional bias `B`
pub(crate) fn conv<B: Backend>(
    ctx: &mut HandlerContext<'_, B>,
    node: &OnnxNode,
) -> Result<Vec<B::Tensor>> {
    let kernel_shape = node.required_ints("kernel_shape")?;
    let spatial = kernel_shape.len();

    let params = ConvParams {
        strides: ones_or(node, "strides", spatial)?,
        dilations: ones_or(node, "dilations", spatial)?,
        group: node.int_attr("group", 1)?,
        padding: padding(node, spatial)?,
        kernel_shape,
    };

    let x = ctx.input(node, 0)?;
    let w = ctx.input(node, 1)?;
    let bias = node.optional_input(2).map(|name| ctx.tensor(name)).transpose()?;

    Ok(vec![ctx.backend.conv(x, w, bias, &params)?])
}
