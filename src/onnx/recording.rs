//! Backend that records calls instead of executing them

use std::collections::BTreeSet;

use serde::Serialize;

use super::backend::{Backend, BatchNormParams, ConvParams, ParameterStore, Pool2dParams};
use crate::error::{Error, Result};

/// One emitted primitive call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BackendCall {
    Conv { input: String, weight: String, bias: Option<String>, params: ConvParams, output: String },
    AvgPool2d { input: String, params: Pool2dParams, output: String },
    MaxPool2d { input: String, params: Pool2dParams, output: String },
    BatchNormalization { input: String, params: BatchNormParams, output: String },
    Relu { input: String, output: String },
    SparseSoftmaxCrossEntropy { labels: String, logits: String, output: String },
}

/// Dry-run backend whose tensors are names
///
/// Every call appends a [`BackendCall`] and returns a fresh name
/// `<op>_<n>`. Variables copied through [`ParameterStore`] must already be
/// known, either declared up front or created by an earlier copy.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    copies: Vec<(String, String)>,
    variables: BTreeSet<String>,
    strict_variables: bool,
}

impl RecordingBackend {
    /// Backend that accepts copies of any variable
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that only copies the given variables
    pub fn with_variables<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
            strict_variables: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// `(from, to)` pairs in copy order
    pub fn copies(&self) -> &[(String, String)] {
        &self.copies
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    fn output_name(&self, op: &str) -> String {
        format!("{op}_{}", self.calls.len())
    }
}

impl ParameterStore for RecordingBackend {
    fn copy_variable(&mut self, from: &str, to: &str) -> Result<()> {
        if self.strict_variables && !self.variables.contains(from) {
            return Err(Error::MissingTensor { name: from.to_string() });
        }
        self.variables.insert(to.to_string());
        self.copies.push((from.to_string(), to.to_string()));
        Ok(())
    }
}

impl Backend for RecordingBackend {
    type Tensor = String;

    fn conv(
        &mut self,
        input: &String,
        weight: &String,
        bias: Option<&String>,
        params: &ConvParams,
    ) -> Result<String> {
        let output = self.output_name("conv");
        self.calls.push(BackendCall::Conv {
            input: input.clone(),
            weight: weight.clone(),
            bias: bias.cloned(),
            params: params.clone(),
            output: output.clone(),
        });
        Ok(output)
    }

    fn avg_pool2d(&mut self, input: &String, params: &Pool2dParams) -> Result<String> {
        let output = self.output_name("avg_pool2d");
        self.calls.push(BackendCall::AvgPool2d {
            input: input.clone(),
            params: params.clone(),
            output: output.clone(),
        });
        Ok(output)
    }

    fn max_pool2d(&mut self, input: &String, params: &Pool2dParams) -> Result<String> {
        let output = self.output_name("max_pool2d");
        self.calls.push(BackendCall::MaxPool2d {
            input: input.clone(),
            params: params.clone(),
            output: output.clone(),
        });
        Ok(output)
    }

    fn batch_normalization(&mut self, input: &String, params: &BatchNormParams) -> Result<String> {
        let output = self.output_name("batch_normalization");
        self.calls.push(BackendCall::BatchNormalization {
            input: input.clone(),
            params: params.clone(),
            output: output.clone(),
        });
        Ok(output)
    }

    fn relu(&mut self, input: &String) -> Result<String> {
        let output = self.output_name("relu");
        self.calls.push(BackendCall::Relu { input: input.clone(), output: output.clone() });
        Ok(output)
    }

    fn sparse_softmax_cross_entropy(&mut self, labels: &String, logits: &String) -> Result<String> {
        let output = self.output_name("sparse_softmax_cross_entropy");
        self.calls.push(BackendCall::SparseSoftmaxCrossEntropy {
            labels: labels.clone(),
            logits: logits.clone(),
            output: output.clone(),
        });
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_copy_requires_known_variable() {
        let mut backend = RecordingBackend::with_variables(["w"]);
        backend.copy_variable("w", "bn_0-gamma").expect("operation should succeed");
        assert!(backend.has_variable("bn_0-gamma"));

        let err = backend.copy_variable("missing", "bn_0-beta").unwrap_err();
        assert!(matches!(err, Error::MissingTensor { ref name } if name == "missing"));
    }

    #[test]
    fn test_output_names_are_unique() {
        let mut backend = RecordingBackend::new();
        let a = backend.relu(&"x".to_string()).expect("operation should succeed");
        let b = backend.relu(&a).expect("operation should succeed");
        assert_eq!(a, "relu_0");
        assert_eq!(b, "relu_1");
        assert_eq!(backend.calls().len(), 2);
    }
}
