//! Capabilities the agent needs from an action-value estimator

use super::memory::Transition;
use super::observation::Observation;
use crate::error::Result;
use crate::game::NUM_ACTIONS;
use std::path::Path;

/// Estimated value of each relative action, indexed like `RelativeAction`
pub type ActionValues = [f32; NUM_ACTIONS];

/// Action-value estimator driven by the agent
///
/// Any numerical backend can sit behind this trait; the agent and the
/// training loop only ever call these two operations.
pub trait Predictor {
    /// Estimate the value of each action in `observation`
    fn predict(&self, observation: &Observation) -> Result<ActionValues>;

    /// Take one optimisation step on `batch`, discounting future value by
    /// `gamma`, and return the loss
    fn train_step(&mut self, batch: &[Transition], gamma: f32) -> Result<f32>;
}

/// Persistence of predictor parameters
pub trait Checkpoint {
    /// Write parameters to `path`, overwriting any previous checkpoint
    fn save(&self, path: &Path) -> anyhow::Result<()>;

    /// Replace parameters with those stored at `path`
    fn load(&mut self, path: &Path) -> anyhow::Result<()>;
}
