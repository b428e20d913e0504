//! Job build context: the sink that receives a training configuration and
//! the losses to minimize

use super::train_conf::TrainConf;
use crate::error::{Error, Result};

/// Training-configuration sink supplied by the caller
///
/// Implemented by whatever is assembling the job. `set_train_conf` is called
/// once per [`Optimizer::minimize`](super::Optimizer::minimize), followed by
/// one `add_loss` per loss term in order.
pub trait JobBuildContext {
    /// Handle identifying a loss tensor
    type Loss;

    fn set_train_conf(&mut self, conf: TrainConf) -> Result<()>;

    fn add_loss(&mut self, loss: Self::Loss) -> Result<()>;
}

/// One loss or a sequence of losses
#[derive(Debug, Clone, PartialEq)]
pub enum LossTerms<L> {
    Single(L),
    Sequence(Vec<L>),
}

impl<L> LossTerms<L> {
    pub fn single(loss: L) -> Self {
        Self::Single(loss)
    }

    /// Losses in enqueue order
    pub fn into_vec(self) -> Vec<L> {
        match self {
            Self::Single(loss) => vec![loss],
            Self::Sequence(losses) => losses,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Sequence(losses) => losses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<L> From<Vec<L>> for LossTerms<L> {
    fn from(losses: Vec<L>) -> Self {
        Self::Sequence(losses)
    }
}

impl From<&str> for LossTerms<String> {
    fn from(loss: &str) -> Self {
        Self::single(loss.to_string())
    }
}

impl From<String> for LossTerms<String> {
    fn from(loss: String) -> Self {
        Self::single(loss)
    }
}

/// In-memory job context that records what it is given
///
/// Accepts a single training configuration; a second registration fails
/// with [`Error::TrainConfAlreadySet`].
#[derive(Debug, Default, Clone)]
pub struct RecordingJob {
    train_conf: Option<TrainConf>,
    losses: Vec<String>,
}

impl RecordingJob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn train_conf(&self) -> Option<&TrainConf> {
        self.train_conf.as_ref()
    }

    pub fn losses(&self) -> &[String] {
        &self.losses
    }
}

impl JobBuildContext for RecordingJob {
    type Loss = String;

    fn set_train_conf(&mut self, conf: TrainConf) -> Result<()> {
        if self.train_conf.is_some() {
            return Err(Error::TrainConfAlreadySet);
        }
        self.train_conf = Some(conf);
        Ok(())
    }

    fn add_loss(&mut self, loss: String) -> Result<()> {
        self.losses.push(loss);
        Ok(())
    }
}
