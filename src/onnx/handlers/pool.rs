//! AveragePool and MaxPool

use super::{ones_or, padding, unsupported, HandlerContext};
use crate::error::{Error, Result};
use crate::onnx::backend::{Backend, DataFormat, Padding, Pool2dParams};
use crate::onnx::node::OnnxNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolKind {
    Avg,
    Max,
    MaxWithArgmax,
}

pub(crate) fn average_pool<B: Backend>(
    ctx: &mut HandlerContext<'_, B>,
    node: &OnnxNode,
) -> Result<Vec<B::Tensor>> {
    pool(ctx, node, PoolKind::Avg)
}

/// A second declared output requests argmax indices
pub(crate) fn max_pool<B: Backend>(
    ctx: &mut HandlerContext<'_, B>,
    node: &OnnxNode,
) -> Result<Vec<B::Tensor>> {
    let kind = if node.outputs.len() <= 1 { PoolKind::Max } else { PoolKind::MaxWithArgmax };
    pool(ctx, node, kind)
}

fn pool<B: Backend>(
    ctx: &mut HandlerContext<'_, B>,
    node: &OnnxNode,
    kind: PoolKind,
) -> Result<Vec<B::Tensor>> {
    let kernel_size = node.required_ints("kernel_shape")?;
    let spatial = kernel_size.len();

    let strides = ones_or(node, "strides", spatial)?;
    let dilations = ones_or(node, "dilations", spatial)?;

    let ceil_mode = node.int_attr("ceil_mode", 0)?;
    if ceil_mode != 0 {
        return Err(unsupported(node, "ceil_mode", ceil_mode));
    }

    let padding = match padding(node, spatial)? {
        // Batch and channel dimensions are never padded.
        Padding::Explicit(pairs) => {
            Padding::Explicit([[0, 0], [0, 0]].into_iter().chain(pairs).collect())
        }
        other => other,
    };

    let count_include_pad = node.int_attr("count_include_pad", 0)?;
    if count_include_pad != 0 {
        return Err(unsupported(node, "count_include_pad", count_include_pad));
    }

    if kind == PoolKind::MaxWithArgmax {
        return Err(Error::UnsupportedPooling { op_type: node.op_type.clone() });
    }

    if spatial != 2 {
        return Err(unsupported(node, "kernel_shape", format!("{kernel_size:?} (only 2D pooling)")));
    }

    let storage_order = node.int_attr("storage_order", 0)?;
    if storage_order != 0 {
        return Err(unsupported(node, "storage_order", storage_order));
    }

    let params = Pool2dParams {
        kernel_size,
        strides,
        dilations,
        padding,
        data_format: DataFormat::Nchw,
    };

    let x = ctx.input(node, 0)?;
    let y = match kind {
        PoolKind::Avg => ctx.backend.avg_pool2d(x, &params)?,
        _ => ctx.backend.max_pool2d(x, &params)?,
    };
    Ok(vec![y])
}
