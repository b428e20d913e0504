//! AdamW optimizer (Adam with decoupled weight decay)

use super::adam::Adam;
use super::train_conf::{UpdateRule, WeightDecayConf, WeightDecayFilter};
use crate::error::{Error, Result};

/// AdamW hyperparameters
///
/// AdamW decouples weight decay from the gradient-based update: the engine
/// applies `θ_t = (1 - lr * λ) * θ_{t-1} - lr * m_t / (√v_t + ε)`.
/// Decay can be restricted to variables whose names match `includes`, or
/// applied to everything except `excludes`, but not both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdamW {
    pub adam: Adam,
    pub weight_decay: Option<f32>,
    pub weight_decay_includes: Option<Vec<String>>,
    pub weight_decay_excludes: Option<Vec<String>>,
}

impl AdamW {
    pub fn new(adam: Adam) -> Self {
        Self { adam, ..Self::default() }
    }

    #[must_use]
    pub fn with_weight_decay(mut self, weight_decay: f32) -> Self {
        self.weight_decay = Some(weight_decay);
        self
    }

    /// Restrict decay to variables matching these patterns
    ///
    /// Accepts a single pattern or a list.
    #[must_use]
    pub fn with_includes<P: Into<Patterns>>(mut self, patterns: P) -> Self {
        self.weight_decay_includes = Some(patterns.into().0);
        self
    }

    /// Exempt variables matching these patterns from decay
    #[must_use]
    pub fn with_excludes<P: Into<Patterns>>(mut self, patterns: P) -> Self {
        self.weight_decay_excludes = Some(patterns.into().0);
        self
    }

    pub(crate) fn update_rule(&self) -> UpdateRule {
        self.adam.update_rule()
    }

    /// Weight decay record, checked for conflicting filters
    pub(crate) fn weight_decay_conf(&self) -> Result<Option<WeightDecayConf>> {
        if self.weight_decay_includes.is_some() && self.weight_decay_excludes.is_some() {
            return Err(Error::ConflictingWeightDecayFilters);
        }

        let Some(weight_decay_rate) = self.weight_decay else {
            return Ok(None);
        };

        let filter = match (&self.weight_decay_includes, &self.weight_decay_excludes) {
            (Some(includes), _) => Some(WeightDecayFilter::Includes(includes.clone())),
            (None, Some(excludes)) => Some(WeightDecayFilter::Excludes(excludes.clone())),
            (None, None) => None,
        };

        Ok(Some(WeightDecayConf { weight_decay_rate, filter }))
    }
}

/// Name patterns given either as one string or as a list
#[derive(Debug, Clone, PartialEq)]
pub struct Patterns(pub Vec<String>);

impl From<&str> for Patterns {
    fn from(pattern: &str) -> Self {
        Self(vec![pattern.to_string()])
    }
}

impl From<String> for Patterns {
    fn from(pattern: String) -> Self {
        Self(vec![pattern])
    }
}

impl From<Vec<String>> for Patterns {
    fn from(patterns: Vec<String>) -> Self {
        Self(patterns)
    }
}

impl From<&[&str]> for Patterns {
    fn from(patterns: &[&str]) -> Self {
        Self(patterns.iter().map(|p| (*p).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Patterns {
    fn from(patterns: [&str; N]) -> Self {
        Self(patterns.iter().map(|p| (*p).to_string()).collect())
    }
}
