//! Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Hyperparameters shared by the agent and its trainer
///
/// # Example
///
/// ```rust
/// use snake_dqn::rl::AgentConfig;
///
/// let config = AgentConfig {
///     batch_size: 64,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum number of transitions kept in replay memory
    ///
    /// Default: 100_000
    pub memory_capacity: usize,

    /// Number of transitions replayed at the end of each episode
    ///
    /// Default: 1000
    pub batch_size: usize,

    /// Learning rate for the Adam optimizer
    ///
    /// Default: 0.005
    pub learning_rate: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Must stay strictly below 1 so the Bellman update is a contraction.
    ///
    /// Default: 0.9
    pub gamma: f32,

    /// Width of the Q-network hidden layer
    ///
    /// Default: 256
    pub hidden_size: usize,
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    ///
    /// # Example
    ///
    /// ```rust
    /// use snake_dqn::rl::AgentConfig;
    ///
    /// let mut config = AgentConfig::default();
    /// config.gamma = 1.0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        if !(0.0..1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1), got {}", self.gamma));
        }

        if self.memory_capacity == 0 {
            return Err("memory_capacity must be at least 1".to_string());
        }

        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }

        if self.hidden_size == 0 {
            return Err("hidden_size must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            memory_capacity: 100_000,
            batch_size: 1000,
            learning_rate: 0.005,
            gamma: 0.9,
            hidden_size: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.memory_capacity, 100_000);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.learning_rate, 0.005);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.hidden_size, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_gamma_must_be_below_one() {
        let mut config = AgentConfig::default();
        config.gamma = 1.0;
        assert!(config.validate().is_err());

        config.gamma = -0.1;
        assert!(config.validate().is_err());

        config.gamma = f32::NAN;
        assert!(config.validate().is_err());

        config.gamma = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_learning_rate() {
        let mut config = AgentConfig::default();
        config.learning_rate = 0.0;
        assert!(config.validate().is_err());

        config.learning_rate = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_sizes() {
        let mut config = AgentConfig::default();
        config.batch_size = 0;
        assert!(config.validate().is_err());

        let mut config = AgentConfig::default();
        config.memory_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = AgentConfig::default();
        config.hidden_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = AgentConfig {
            batch_size: 32,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AgentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
