//! Error types with actionable diagnostics.
//!
//! Every failure in this crate is a precondition violation reported
//! synchronously to the caller. Nothing is retried, and calls already made
//! on a collaborator before the failure are not rolled back.

use crate::config::ValidationError;
use thiserror::Error;

/// Result type alias for trainconf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building training configurations or importing ONNX nodes.
#[derive(Error, Debug)]
pub enum Error {
    /// Piecewise-constant schedule needs exactly one more value than boundaries.
    #[error("Piecewise schedule has {boundaries} boundaries but {values} values\n  → Provide exactly boundaries + 1 values")]
    BoundaryValueMismatch { boundaries: usize, values: usize },

    /// Piecewise-scaling schedule got a scale list of the wrong length.
    #[error("Piecewise scaling has {boundaries} boundaries but {scales} scales\n  → Provide one scale per boundary, or a single scalar")]
    ScaleLengthMismatch { boundaries: usize, scales: usize },

    /// AdamW was given both include and exclude weight-decay patterns.
    #[error("weight_decay_includes and weight_decay_excludes are mutually exclusive\n  → Keep only one of the two pattern lists")]
    ConflictingWeightDecayFilters,

    /// A training configuration was already registered with the job.
    #[error("Training configuration already registered for this job\n  → Call minimize once per job")]
    TrainConfAlreadySet,

    /// No handler registered for the operator type.
    #[error("Unsupported ONNX operator: {op_type}")]
    UnsupportedOp { op_type: String },

    /// Handlers exist, but none for an opset this old.
    #[error("Unsupported version of ONNX operator {op_type}: opset {version} (earliest supported: {earliest})")]
    UnsupportedOpVersion { op_type: String, version: u32, earliest: u32 },

    /// Attribute value the underlying primitive cannot express.
    #[error("{op_type}: {attr} = {value} is not supported")]
    UnsupportedAttribute { op_type: String, attr: String, value: String },

    /// Max pooling that also produces argmax indices.
    #[error("{op_type}: max pooling with argmax is not supported")]
    UnsupportedPooling { op_type: String },

    /// Required attribute absent from the node.
    #[error("{op_type}: missing required attribute '{attr}'")]
    MissingAttribute { op_type: String, attr: String },

    /// Attribute present but of the wrong kind.
    #[error("Attribute '{attr}' has type {actual}, expected {expected}")]
    AttributeType { attr: String, expected: &'static str, actual: &'static str },

    /// Attribute list has an unusable length.
    #[error("{op_type}: attribute '{attr}' has length {actual}, expected {expected}")]
    AttributeLength { op_type: String, attr: String, expected: usize, actual: usize },

    /// Node references an input slot it does not have.
    #[error("{op_type}: missing input #{index}")]
    MissingInput { op_type: String, index: usize },

    /// Named tensor is not bound in the tensor environment.
    #[error("Tensor '{name}' not found in the import environment\n  → Bind graph inputs and initializers before importing")]
    MissingTensor { name: String },

    /// Failure reported by a collaborator (primitive op layer, parameter store, job context).
    #[error("Backend error: {0}")]
    Backend(String),

    /// Declarative configuration could not be turned into a builder call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Declarative configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML/JSON (de)serialization failure.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Check if this error stems from user input rather than a collaborator.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Backend(_) | Self::Io { .. })
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BoundaryValueMismatch { .. } => "E001",
            Self::ScaleLengthMismatch { .. } => "E002",
            Self::ConflictingWeightDecayFilters => "E003",
            Self::TrainConfAlreadySet => "E004",
            Self::UnsupportedOp { .. } => "E010",
            Self::UnsupportedOpVersion { .. } => "E011",
            Self::UnsupportedAttribute { .. } => "E012",
            Self::UnsupportedPooling { .. } => "E013",
            Self::MissingAttribute { .. } => "E020",
            Self::AttributeType { .. } => "E021",
            Self::AttributeLength { .. } => "E022",
            Self::MissingInput { .. } => "E023",
            Self::MissingTensor { .. } => "E024",
            Self::Backend(_) => "E030",
            Self::Config(_) => "E040",
            Self::Validation(_) => "E041",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization { message: e.to_string() }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization { message: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let errors = vec![
            Error::BoundaryValueMismatch { boundaries: 1, values: 1 },
            Error::ScaleLengthMismatch { boundaries: 1, scales: 2 },
            Error::ConflictingWeightDecayFilters,
            Error::TrainConfAlreadySet,
            Error::UnsupportedOp { op_type: "".into() },
            Error::UnsupportedOpVersion { op_type: "".into(), version: 0, earliest: 1 },
            Error::UnsupportedAttribute { op_type: "".into(), attr: "".into(), value: "".into() },
            Error::UnsupportedPooling { op_type: "".into() },
            Error::MissingAttribute { op_type: "".into(), attr: "".into() },
            Error::AttributeType { attr: "".into(), expected: "int", actual: "float" },
            Error::AttributeLength { op_type: "".into(), attr: "".into(), expected: 4, actual: 3 },
            Error::MissingInput { op_type: "".into(), index: 0 },
            Error::MissingTensor { name: "".into() },
            Error::Backend("".into()),
            Error::Config("".into()),
            Error::Serialization { message: "".into() },
        ];

        let codes: Vec<_> = errors.iter().map(Error::code).collect();
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_boundary_mismatch_message_is_actionable() {
        let msg = Error::BoundaryValueMismatch { boundaries: 2, values: 2 }.to_string();
        assert!(msg.contains("2 boundaries"));
        assert!(msg.contains("boundaries + 1"));
    }

    #[test]
    fn test_backend_error_not_user_error() {
        assert!(!Error::Backend("device lost".into()).is_user_error());
        assert!(Error::ConflictingWeightDecayFilters.is_user_error());
    }

    #[test]
    fn test_io_error_constructor() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io("reading config", io_err);

        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn test_yaml_error_converts_to_serialization() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("{not: a list").unwrap_err();
        let err: Error = yaml_err.into();
        assert_eq!(err.code(), "E051");
    }
}
