//! Graph descriptions read by the `import` command

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::node::OnnxNode;
use crate::error::{Error, Result};

const DEFAULT_OPSET: u32 = 12;

fn default_opset() -> u32 {
    DEFAULT_OPSET
}

/// Topologically ordered node list with its free tensors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnnxGraph {
    #[serde(default = "default_opset")]
    pub opset: u32,

    /// Graph inputs bound before import
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Stored parameters, bound as tensors and available for copying
    #[serde(default)]
    pub initializers: Vec<String>,

    pub nodes: Vec<OnnxNode>,
}

impl OnnxGraph {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read graph {}", path.display()), e))?;
        Self::from_yaml(&yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_graph() {
        let graph = OnnxGraph::from_yaml(
            r"
inputs: [x]
initializers: [w]
nodes:
  - op_type: Conv
    inputs: [x, w]
    outputs: [y]
    attrs: { kernel_shape: [3, 3] }
",
        )
        .expect("operation should succeed");
        assert_eq!(graph.opset, DEFAULT_OPSET);
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].outputs, vec!["y".to_string()]);
    }

    #[test]
    fn test_graph_requires_nodes() {
        assert!(OnnxGraph::from_yaml("opset: 11\n").is_err());
    }
}
