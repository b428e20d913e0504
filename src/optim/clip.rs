//! Gradient clipping policies

use super::train_conf::ClipConf;

/// Gradient clipping policy
#[derive(Debug, Clone, PartialEq)]
pub enum ClipPolicy {
    /// Scale all gradients down together when their global L2 norm exceeds `clip_norm`
    ///
    /// `out = clip_norm * g / max(global_norm, clip_norm)`
    GlobalNorm { clip_norm: f32 },
}

impl ClipPolicy {
    /// Clip by global norm
    pub fn by_global_norm(clip_norm: f32) -> Self {
        Self::GlobalNorm { clip_norm }
    }

    /// Configuration record for this policy
    pub fn clip_conf(&self) -> ClipConf {
        match *self {
            Self::GlobalNorm { clip_norm } => ClipConf::ClipByGlobalNorm { clip_norm },
        }
    }

    /// Apply the policy to a set of gradient buffers in place
    ///
    /// Returns the global norm measured before clipping.
    pub fn apply(&self, grads: &mut [&mut [f32]]) -> f32 {
        match *self {
            Self::GlobalNorm { clip_norm } => clip_grad_norm(grads, clip_norm),
        }
    }
}

/// Clip gradients by global norm
///
/// 1. global_norm = sqrt(sum of all squared gradient entries)
/// 2. if global_norm > max_norm, every gradient is scaled by max_norm / global_norm
fn clip_grad_norm(grads: &mut [&mut [f32]], max_norm: f32) -> f32 {
    let total_norm_sq: f32 =
        grads.iter().map(|g| g.iter().map(|&x| x * x).sum::<f32>()).sum();
    let global_norm = total_norm_sq.sqrt();

    if global_norm > max_norm {
        let clip_coef = max_norm / global_norm;
        for grad in grads.iter_mut() {
            for x in grad.iter_mut() {
                *x *= clip_coef;
            }
        }
    }

    global_norm
}
