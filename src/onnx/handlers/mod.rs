//! Built-in operator handlers

mod activation;
mod batch_norm;
mod conv;
mod loss;
mod pool;


use std::collections::HashMap;

pub(crate) use activation::relu;
pub(crate) use batch_norm::batch_norm;
pub(crate) use conv::conv;
pub(crate) use loss::softmax_cross_entropy;
pub(crate) use pool::{average_pool, max_pool};

use super::backend::{Backend, Padding};
use super::names::NameGenerator;
use super::node::OnnxNode;
use crate::error::{Error, Result};

/// Everything a handler may touch while importing one node
pub struct HandlerContext<'a, B: Backend> {
    pub backend: &'a mut B,
    pub env: &'a HashMap<String, B::Tensor>,
    pub names: &'a mut dyn NameGenerator,
}

impl<'a, B: Backend> HandlerContext<'a, B> {
    /// Tensor bound to `name` in the import environment
    pub fn tensor(&self, name: &str) -> Result<&'a B::Tensor> {
        let env: &'a HashMap<String, B::Tensor> = self.env;
        env.get(name).ok_or_else(|| Error::MissingTensor { name: name.to_string() })
    }

    /// Tensor bound to input slot `index` of `node`
    pub fn input(&self, node: &OnnxNode, index: usize) -> Result<&'a B::Tensor> {
        self.tensor(node.input(index)?)
    }
}

/// List attribute defaulting to `spatial` ones
fn ones_or(node: &OnnxNode, attr: &str, spatial: usize) -> Result<Vec<i64>> {
    let values = node.ints_attr(attr)?.unwrap_or_else(|| vec![1; spatial]);
    check_len(node, attr, spatial, values.len())?;
    Ok(values)
}

fn check_len(node: &OnnxNode, attr: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::AttributeLength {
            op_type: node.op_type.clone(),
            attr: attr.to_string(),
            expected,
            actual,
        })
    }
}

fn unsupported(node: &OnnxNode, attr: &str, value: impl ToString) -> Error {
    Error::UnsupportedAttribute {
        op_type: node.op_type.clone(),
        attr: attr.to_string(),
        value: value.to_string(),
    }
}

/// Padding from `auto_pad` / `pads`
///
/// Under `NOTSET` the flat `pads` list `[x1_begin, x2_begin, .., x1_end, x2_end, ..]`
/// becomes one `[begin, end]` pair per spatial dimension.
fn padding(node: &OnnxNode, spatial: usize) -> Result<Padding> {
    match node.string_attr("auto_pad", "NOTSET")? {
        "NOTSET" => {
            let pads = node.ints_attr("pads")?.unwrap_or_else(|| vec![0; 2 * spatial]);
            check_len(node, "pads", 2 * spatial, pads.len())?;
            let pairs = (0..spatial).map(|i| [pads[i], pads[i + spatial]]).collect();
            Ok(Padding::Explicit(pairs))
        }
        "SAME_UPPER" => Ok(Padding::SameUpper),
        "SAME_LOWER" => Ok(Padding::SameLower),
        "VALID" => Ok(Padding::Valid),
        other => Err(unsupported(node, "auto_pad", other)),
    }
}
