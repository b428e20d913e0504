//! Piecewise learning rate policies

use crate::error::{Error, Result};
use crate::optim::train_conf::LearningRateDecayConf;

/// Piecewise constant policy
///
/// ```text
/// boundaries = [1000, 2000], values = [0.1, 0.01, 0.001]
/// step < 1000         -> 0.1
/// 1000 <= step < 2000 -> 0.01
/// step >= 2000        -> 0.001
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseConstant {
    pub(crate) boundaries: Vec<i64>,
    pub(crate) values: Vec<f32>,
}

impl PiecewiseConstant {
    /// Fails unless there is exactly one more value than boundaries
    pub fn new(boundaries: Vec<i64>, values: Vec<f32>) -> Result<Self> {
        if values.len() != boundaries.len() + 1 {
            return Err(Error::BoundaryValueMismatch {
                boundaries: boundaries.len(),
                values: values.len(),
            });
        }
        Ok(Self { boundaries, values })
    }

    pub fn boundaries(&self) -> &[i64] {
        &self.boundaries
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub(crate) fn decay_conf(&self) -> LearningRateDecayConf {
        LearningRateDecayConf::PiecewiseConstant {
            boundaries: self.boundaries.clone(),
            values: self.values.clone(),
        }
    }

    pub(crate) fn decayed_lr(&self, step: i64) -> f32 {
        self.values[interval_index(&self.boundaries, step)]
    }
}

/// Scale factor argument of [`PiecewiseScaling`]
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    /// One factor broadcast to every boundary
    Scalar(f32),
    /// One factor per boundary
    PerBoundary(Vec<f32>),
}

impl From<f32> for Scale {
    fn from(scale: f32) -> Self {
        Self::Scalar(scale)
    }
}

impl From<Vec<f32>> for Scale {
    fn from(scales: Vec<f32>) -> Self {
        Self::PerBoundary(scales)
    }
}

impl From<&[f32]> for Scale {
    fn from(scales: &[f32]) -> Self {
        Self::PerBoundary(scales.to_vec())
    }
}

/// Piecewise scaling policy
///
/// ```text
/// base_lr = 0.1, boundaries = [1000, 2000], scale = [0.1, 0.01]
/// step < 1000         -> base_lr
/// 1000 <= step < 2000 -> 0.1 * base_lr
/// step >= 2000        -> 0.01 * base_lr
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseScaling {
    pub(crate) boundaries: Vec<i64>,
    /// `[1.0]` followed by one factor per boundary
    pub(crate) scales: Vec<f32>,
}

impl PiecewiseScaling {
    pub fn new(boundaries: Vec<i64>, scale: Scale) -> Result<Self> {
        let per_boundary = match scale {
            Scale::Scalar(s) => vec![s; boundaries.len()],
            Scale::PerBoundary(list) => {
                if list.len() != boundaries.len() {
                    return Err(Error::ScaleLengthMismatch {
                        boundaries: boundaries.len(),
                        scales: list.len(),
                    });
                }
                list
            }
        };

        let mut scales = Vec::with_capacity(per_boundary.len() + 1);
        scales.push(1.0);
        scales.extend(per_boundary);
        Ok(Self { boundaries, scales })
    }

    pub fn boundaries(&self) -> &[i64] {
        &self.boundaries
    }

    /// Scale factors including the leading implicit `1.0`
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub(crate) fn decay_conf(&self) -> LearningRateDecayConf {
        LearningRateDecayConf::PiecewiseScaling {
            boundaries: self.boundaries.clone(),
            scales: self.scales.clone(),
        }
    }

    pub(crate) fn decayed_lr(&self, base_lr: f32, step: i64) -> f32 {
        base_lr * self.scales[interval_index(&self.boundaries, step)]
    }
}

/// Index of the interval `step` falls into: the number of boundaries `<= step`
fn interval_index(boundaries: &[i64], step: i64) -> usize {
    boundaries.iter().take_while(|&&b| step >= b).count()
}
