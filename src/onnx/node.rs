//! ONNX node records and typed attribute access

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// ONNX attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Float(f32),
    String(String),
    Ints(Vec<i64>),
    Floats(Vec<f32>),
    Strings(Vec<String>),
}

impl AttrValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Ints(_) => "ints",
            Self::Floats(_) => "floats",
            Self::Strings(_) => "strings",
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(v: Vec<i64>) -> Self {
        Self::Ints(v)
    }
}

impl From<Vec<f32>> for AttrValue {
    fn from(v: Vec<f32>) -> Self {
        Self::Floats(v)
    }
}

/// A single ONNX graph node
///
/// Created per import pass and dropped once the matching primitive call has
/// been emitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnnxNode {
    #[serde(default)]
    pub name: String,
    pub op_type: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, AttrValue>,
}

impl OnnxNode {
    pub fn new(op_type: impl Into<String>) -> Self {
        Self { op_type: op_type.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = outputs.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Name of input slot `index`
    pub fn input(&self, index: usize) -> Result<&str> {
        self.inputs
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingInput { op_type: self.op_type.clone(), index })
    }

    /// Name of input slot `index`, `None` when absent or empty
    ///
    /// ONNX marks skipped optional inputs with an empty name.
    pub fn optional_input(&self, index: usize) -> Option<&str> {
        self.inputs.get(index).map(String::as_str).filter(|name| !name.is_empty())
    }

    pub fn int_attr(&self, name: &str, default: i64) -> Result<i64> {
        match self.attrs.get(name) {
            None => Ok(default),
            Some(AttrValue::Int(v)) => Ok(*v),
            Some(other) => Err(type_error(name, "int", other)),
        }
    }

    pub fn float_attr(&self, name: &str, default: f32) -> Result<f32> {
        match self.attrs.get(name) {
            None => Ok(default),
            Some(AttrValue::Float(v)) => Ok(*v),
            // Integral literals in hand-written graphs
            Some(AttrValue::Int(v)) => Ok(*v as f32),
            Some(other) => Err(type_error(name, "float", other)),
        }
    }

    pub fn string_attr<'a>(&'a self, name: &str, default: &'a str) -> Result<&'a str> {
        match self.attrs.get(name) {
            None => Ok(default),
            Some(AttrValue::String(v)) => Ok(v),
            Some(other) => Err(type_error(name, "string", other)),
        }
    }

    /// Integer list attribute, `None` when absent
    pub fn ints_attr(&self, name: &str) -> Result<Option<Vec<i64>>> {
        match self.attrs.get(name) {
            None => Ok(None),
            Some(AttrValue::Ints(v)) => Ok(Some(v.clone())),
            Some(other) => Err(type_error(name, "ints", other)),
        }
    }

    /// Integer list attribute that must be present
    pub fn required_ints(&self, name: &str) -> Result<Vec<i64>> {
        self.ints_attr(name)?.ok_or_else(|| Error::MissingAttribute {
            op_type: self.op_type.clone(),
            attr: name.to_string(),
        })
    }
}

fn type_error(attr: &str, expected: &'static str, actual: &AttrValue) -> Error {
    Error::AttributeType { attr: attr.to_string(), expected, actual: actual.kind() }
}
