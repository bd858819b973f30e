//! Epsilon-greedy Q-learning agent
//!
//! Owns the predictor and the replay memory. Every environment step is
//! learned from twice: once immediately (online update) and again later
//! when it is replayed as part of an end-of-episode batch.

use super::config::AgentConfig;
use super::memory::{ReplayMemory, Transition};
use super::observation::Observation;
use super::predictor::{ActionValues, Predictor};
use crate::error::{Error, Result};
use crate::game::{RelativeAction, NUM_ACTIONS};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Exploration rate is `epsilon / EXPLORATION_RANGE`
pub const EXPLORATION_RANGE: u32 = 200;

/// Epsilon never decays below this
pub const MIN_EPSILON: u32 = 2;

/// Episodes over which epsilon decays linearly
pub const EPSILON_DECAY_EPISODES: u32 = 100;

/// Exploration threshold for a given episode
///
/// `max(2, 100 - episode)`, so the agent explores with probability
/// 50% at the start and 1% from episode 98 onwards.
pub fn epsilon(episode: usize) -> u32 {
    let episode = u32::try_from(episode).unwrap_or(u32::MAX);
    EPSILON_DECAY_EPISODES
        .saturating_sub(episode)
        .max(MIN_EPSILON)
}

/// Index of the largest value, first one wins on ties
pub fn argmax(values: &ActionValues) -> usize {
    let mut best = 0;
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = idx;
        }
    }
    best
}

/// Q-learning agent
///
/// # Example
///
/// ```rust
/// use snake_dqn::rl::{default_device, Agent, AgentConfig, Observation, QTrainer, TrainingBackend};
///
/// let config = AgentConfig::default();
/// let trainer = QTrainer::<TrainingBackend>::new(&config, default_device()).unwrap();
/// let mut agent = Agent::new(trainer, config).unwrap();
///
/// let action = agent.select_action(&Observation::default(), 0).unwrap();
/// assert!(action.index() < 3);
/// ```
pub struct Agent<P: Predictor> {
    predictor: P,
    memory: ReplayMemory,
    config: AgentConfig,
    rng: StdRng,
}

impl<P: Predictor> Agent<P> {
    /// Create an agent, rejecting invalid hyperparameters
    pub fn new(predictor: P, config: AgentConfig) -> Result<Self> {
        Self::with_rng(predictor, config, StdRng::from_entropy())
    }

    /// Create an agent with a deterministic random source
    pub fn with_seed(predictor: P, config: AgentConfig, seed: u64) -> Result<Self> {
        Self::with_rng(predictor, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(predictor: P, config: AgentConfig, rng: StdRng) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;

        Ok(Self {
            memory: ReplayMemory::new(config.memory_capacity),
            predictor,
            config,
            rng,
        })
    }

    /// Pick an action for `observation` during episode `episode`
    ///
    /// Explores uniformly at random when a draw from `[0, 200)` falls
    /// below `epsilon(episode)`, otherwise acts greedily.
    pub fn select_action(
        &mut self,
        observation: &Observation,
        episode: usize,
    ) -> Result<RelativeAction> {
        if self.rng.gen_range(0..EXPLORATION_RANGE) < epsilon(episode) {
            let idx = self.rng.gen_range(0..NUM_ACTIONS);
            return Ok(RelativeAction::from_index(idx));
        }

        self.greedy_action(observation)
    }

    /// Highest-valued action according to the predictor
    pub fn greedy_action(&self, observation: &Observation) -> Result<RelativeAction> {
        let values = self.predictor.predict(observation)?;
        Ok(RelativeAction::from_index(argmax(&values)))
    }

    /// Train on a single fresh transition
    pub fn update_online(&mut self, transition: &Transition) -> Result<f32> {
        self.predictor
            .train_step(std::slice::from_ref(transition), self.config.gamma)
    }

    /// Store a transition for later replay
    pub fn remember(&mut self, transition: Transition) {
        self.memory.push(transition);
    }

    /// Train on a batch replayed from memory
    pub fn update_batch(&mut self) -> Result<f32> {
        let batch = self.memory.sample(self.config.batch_size, &mut self.rng);
        if batch.is_empty() {
            return Ok(0.0);
        }

        self.predictor.train_step(&batch, self.config.gamma)
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn predictor_mut(&mut self) -> &mut P {
        &mut self.predictor
    }

    pub fn memory(&self) -> &ReplayMemory {
        &self.memory
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}
