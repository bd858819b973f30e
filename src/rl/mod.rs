//! Deep Q-learning for the snake game
//!
//! Provides:
//! - 15-flag state observations
//! - Bounded experience replay
//! - Epsilon-greedy agent over a pluggable action-value predictor
//! - Burn Q-network and temporal-difference trainer
//! - Environment wrapper with rendering, frame pacing and quit polling
//! - Best-so-far checkpoint persistence

pub mod agent;
pub mod backend;
pub mod config;
pub mod environment;
pub mod memory;
pub mod network;
pub mod observation;
pub mod persistence;
pub mod predictor;
pub mod trainer;

pub use agent::{argmax, epsilon, Agent};
pub use backend::{default_device, InferenceBackend, TrainingBackend};
pub use config::AgentConfig;
pub use environment::{EnvStep, SnakeEnvironment};
pub use memory::{ReplayMemory, Transition};
pub use network::{QNetwork, QNetworkConfig};
pub use observation::{create_observation, Observation, OBSERVATION_SIZE};
pub use persistence::{checkpoint_exists, load_metadata, load_model, save_model, ModelMetadata};
pub use predictor::{ActionValues, Checkpoint, Predictor};
pub use trainer::QTrainer;
