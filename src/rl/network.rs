//! Q-network for the Snake agent
//!
//! A small fully connected network mapping the 15-flag observation to one
//! value estimate per relative action.
//!
//! # Architecture
//!
//! ```text
//! Input: [batch, 15]
//!   ↓ Linear(15 → hidden) + ReLU
//!   ↓ Linear(hidden → 3)
//! Output: [batch, 3] action values (straight, right, left)
//! ```
//!
//! # Example
//!
//! ```rust
//! use snake_dqn::rl::{default_device, InferenceBackend, QNetworkConfig};
//! use burn::tensor::Tensor;
//!
//! let device = default_device();
//! let network = QNetworkConfig::new(256).init::<InferenceBackend>(&device);
//!
//! let observation = Tensor::zeros([4, 15], &device);
//! let values = network.forward(observation);
//!
//! assert_eq!(values.dims(), [4, 3]);
//! ```

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{activation::relu, backend::Backend, Tensor},
};

use super::observation::OBSERVATION_SIZE;
use crate::game::NUM_ACTIONS;

/// Configuration for the Q-network
#[derive(Debug, Clone)]
pub struct QNetworkConfig {
    /// Number of input features (default: 15)
    pub input_size: usize,

    /// Width of the hidden layer
    pub hidden_size: usize,

    /// Number of actions (default: 3)
    pub num_actions: usize,
}

impl QNetworkConfig {
    pub fn new(hidden_size: usize) -> Self {
        Self {
            input_size: OBSERVATION_SIZE,
            hidden_size,
            num_actions: NUM_ACTIONS,
        }
    }

    /// Initialize the network with fresh weights on `device`
    pub fn init<B: Backend>(&self, device: &B::Device) -> QNetwork<B> {
        QNetwork {
            hidden: LinearConfig::new(self.input_size, self.hidden_size).init(device),
            output: LinearConfig::new(self.hidden_size, self.num_actions).init(device),
        }
    }
}

impl Default for QNetworkConfig {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Two-layer action-value network
#[derive(Module, Debug)]
pub struct QNetwork<B: Backend> {
    hidden: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> QNetwork<B> {
    /// Forward pass, `[batch, 15]` in and `[batch, 3]` out
    pub fn forward(&self, observation: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden.forward(observation);
        let x = relu(x);
        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{default_device, InferenceBackend, TrainingBackend};
    use burn::tensor::{Distribution, TensorData};

    #[test]
    fn test_forward_pass_shapes() {
        let device = default_device();
        let network = QNetworkConfig::default().init::<InferenceBackend>(&device);

        for batch_size in [1, 4, 32] {
            let observation = Tensor::zeros([batch_size, OBSERVATION_SIZE], &device);
            let values = network.forward(observation);
            assert_eq!(values.dims(), [batch_size, NUM_ACTIONS]);
        }
    }

    #[test]
    fn test_output_finite() {
        let device = default_device();
        let network = QNetworkConfig::new(32).init::<InferenceBackend>(&device);

        let observation = Tensor::random(
            [8, OBSERVATION_SIZE],
            Distribution::Uniform(0.0, 1.0),
            &device,
        );
        let values: TensorData = network.forward(observation).into_data();

        for &val in values.as_slice::<f32>().unwrap() {
            assert!(val.is_finite(), "Values should be finite, got: {}", val);
        }
    }

    #[test]
    fn test_gradient_flow() {
        let device = default_device();
        let network = QNetworkConfig::new(16).init::<TrainingBackend>(&device);

        let observation = Tensor::ones([2, OBSERVATION_SIZE], &device).require_grad();
        let loss = network.forward(observation.clone()).sum();
        let gradients = loss.backward();

        assert!(
            observation.grad(&gradients).is_some(),
            "Gradients should flow back to the observation"
        );
    }
}
