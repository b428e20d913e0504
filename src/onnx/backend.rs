//! Primitive operator layer the importer emits calls against

use serde::Serialize;

use crate::error::Result;

/// Spatial padding accepted by the primitive operators
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Padding {
    /// One `[low, high]` pair per dimension
    Explicit(Vec<[i64; 2]>),
    SameUpper,
    SameLower,
    Valid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataFormat {
    #[serde(rename = "NCHW")]
    Nchw,
}

/// Parameters of `avg_pool2d` / `max_pool2d`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pool2dParams {
    pub kernel_size: Vec<i64>,
    pub strides: Vec<i64>,
    pub dilations: Vec<i64>,
    /// Explicit pads cover batch and channel dimensions too
    pub padding: Padding,
    pub data_format: DataFormat,
}

/// Parameters of `conv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvParams {
    pub kernel_shape: Vec<i64>,
    pub strides: Vec<i64>,
    pub dilations: Vec<i64>,
    pub group: i64,
    /// Explicit pads cover spatial dimensions only
    pub padding: Padding,
}

/// Parameters of `batch_normalization`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchNormParams {
    /// Layer name; gamma, beta and moving statistics are looked up as
    /// `<name>-gamma`, `<name>-beta`, `<name>-moving_mean`, `<name>-moving_variance`
    pub name: String,
    pub axis: i64,
    pub epsilon: f32,
    pub momentum: f32,
}

/// Named parameter storage
pub trait ParameterStore {
    /// Copy the stored parameter `from` under the new name `to`
    fn copy_variable(&mut self, from: &str, to: &str) -> Result<()>;
}

/// Neural-network primitive operators
///
/// Each call returns the tensor produced by the operator. Implementations
/// report their own failures as [`Error::Backend`](crate::Error::Backend).
pub trait Backend: ParameterStore {
    type Tensor: Clone;

    fn conv(
        &mut self,
        input: &Self::Tensor,
        weight: &Self::Tensor,
        bias: Option<&Self::Tensor>,
        params: &ConvParams,
    ) -> Result<Self::Tensor>;

    fn avg_pool2d(&mut self, input: &Self::Tensor, params: &Pool2dParams) -> Result<Self::Tensor>;

    fn max_pool2d(&mut self, input: &Self::Tensor, params: &Pool2dParams) -> Result<Self::Tensor>;

    fn batch_normalization(
        &mut self,
        input: &Self::Tensor,
        params: &BatchNormParams,
    ) -> Result<Self::Tensor>;

    fn relu(&mut self, input: &Self::Tensor) -> Result<Self::Tensor>;

    fn sparse_softmax_cross_entropy(
        &mut self,
        labels: &Self::Tensor,
        logits: &Self::Tensor,
    ) -> Result<Self::Tensor>;
}
