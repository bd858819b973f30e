//! Temporal-difference trainer for the Q-network
//!
//! Implements [`Predictor`] and [`Checkpoint`] on top of burn. Each training
//! step regresses the value of the taken action towards
//!
//! ```text
//! Q_target = r                              if the step was terminal
//! Q_target = r + γ * max_a' Q(s', a')       otherwise
//! ```
//!
//! while the values of the untaken actions are left as their own targets.

use super::config::AgentConfig;
use super::memory::Transition;
use super::network::{QNetwork, QNetworkConfig};
use super::observation::{Observation, OBSERVATION_SIZE};
use super::predictor::{ActionValues, Checkpoint, Predictor};
use crate::error::{Error, Result};
use crate::game::NUM_ACTIONS;
use anyhow::Context;
use burn::{
    module::{AutodiffModule, Module},
    optim::{adaptor::OptimizerAdaptor, Adam, AdamConfig, GradientsParams, Optimizer},
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion, Tensor, TensorData,
    },
};
use std::path::Path;

/// Q-network plus its Adam optimizer
///
/// # Example
///
/// ```rust
/// use snake_dqn::rl::{default_device, AgentConfig, Observation, Predictor, QTrainer, TrainingBackend};
///
/// let trainer = QTrainer::<TrainingBackend>::new(&AgentConfig::default(), default_device()).unwrap();
/// let values = trainer.predict(&Observation::default()).unwrap();
/// assert_eq!(values.len(), 3);
/// ```
pub struct QTrainer<B: AutodiffBackend> {
    /// Action-value network being trained
    network: QNetwork<B>,

    /// Adam optimizer for network parameters
    optim: OptimizerAdaptor<Adam, QNetwork<B>, B>,

    learning_rate: f64,

    /// Device for tensor operations
    device: B::Device,
}

impl<B: AutodiffBackend> QTrainer<B> {
    /// Create a trainer with freshly initialised weights
    ///
    /// Fails if the configuration is invalid, in particular if `gamma` is
    /// not below 1.
    pub fn new(config: &AgentConfig, device: B::Device) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;

        let network = QNetworkConfig::new(config.hidden_size).init::<B>(&device);
        let optim = AdamConfig::new().init();

        Ok(Self {
            network,
            optim,
            learning_rate: config.learning_rate,
            device,
        })
    }

    /// Get a reference to the neural network
    pub fn network(&self) -> &QNetwork<B> {
        &self.network
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }
}

/// Stack observations into a `[batch, 15]` tensor
fn observation_batch<'a, BB: Backend>(
    observations: impl ExactSizeIterator<Item = &'a Observation>,
    device: &BB::Device,
) -> Tensor<BB, 2> {
    let n = observations.len();
    let data: Vec<f32> = observations.flat_map(|obs| obs.to_floats()).collect();

    Tensor::from_data(TensorData::new(data, [n, OBSERVATION_SIZE]), device)
}

fn tensor_values<BB: Backend, const D: usize>(tensor: Tensor<BB, D>) -> Result<Vec<f32>> {
    tensor
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| Error::Tensor(format!("{:?}", e)))
}

impl<B: AutodiffBackend> Predictor for QTrainer<B> {
    fn predict(&self, observation: &Observation) -> Result<ActionValues> {
        let network = self.network.clone().valid();
        let input = observation_batch::<B::InnerBackend>(std::iter::once(observation), &self.device);

        let values = tensor_values(network.forward(input))?;
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::Diverged(format!(
                "non-finite action values {:?}",
                values
            )));
        }

        values.try_into().map_err(|v: Vec<f32>| {
            Error::Tensor(format!("expected {} action values, got {}", NUM_ACTIONS, v.len()))
        })
    }

    fn train_step(&mut self, batch: &[Transition], gamma: f32) -> Result<f32> {
        if batch.is_empty() {
            return Ok(0.0);
        }
        let n = batch.len();

        // Bootstrap values come from the current weights without gradient tracking
        let next_states = observation_batch::<B::InnerBackend>(
            batch.iter().map(|t| &t.next_state),
            &self.device,
        );
        let next_max = tensor_values(self.network.clone().valid().forward(next_states).max_dim(1))?;

        let states = observation_batch::<B>(batch.iter().map(|t| &t.state), &self.device);
        let predicted = self.network.forward(states);

        let mut targets = tensor_values(predicted.clone())?;
        for (i, transition) in batch.iter().enumerate() {
            let mut q_new = transition.reward;
            if !transition.terminated {
                q_new += gamma * next_max[i];
            }
            targets[i * NUM_ACTIONS + transition.action.index()] = q_new;
        }
        let targets: Tensor<B, 2> =
            Tensor::from_data(TensorData::new(targets, [n, NUM_ACTIONS]), &self.device);

        // Mean squared TD error
        let diff = predicted - targets;
        let loss = (diff.clone() * diff).mean();

        let loss_value = loss.clone().into_scalar().elem::<f32>();
        if !loss_value.is_finite() {
            return Err(Error::Diverged(format!("training loss is {}", loss_value)));
        }

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.network);
        self.network = self
            .optim
            .step(self.learning_rate, self.network.clone(), grads);

        Ok(loss_value)
    }
}

impl<B: AutodiffBackend> Checkpoint for QTrainer<B> {
    fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        recorder
            .record(self.network.clone().into_record(), path.to_path_buf())
            .context("Failed to save network weights")?;

        Ok(())
    }

    fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let record = recorder
            .load(path.to_path_buf(), &self.device)
            .with_context(|| format!("Failed to load network weights from {:?}", path))?;

        self.network = self.network.clone().load_record(record);

        Ok(())
    }
}
