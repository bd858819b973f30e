use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the game
///
/// Coordinates are in pixels and every cell is `block_size` wide, so a
/// 640x480 board with 20px blocks is a 32x24 grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in pixels
    pub width: i32,
    /// Height of the board in pixels
    pub height: i32,
    /// Side length of one cell in pixels
    pub block_size: i32,
    /// Frames per second when pacing is enabled, 0 runs unthrottled
    pub tick_rate: u32,
    /// Episode is cut off once steps exceed `factor * snake length`
    pub stall_factor: Option<u32>,
    /// Seed for food placement, random when unset
    pub seed: Option<u64>,

    // Rewards (for RL)
    /// Reward for eating food
    pub food_reward: f32,
    /// Penalty for any terminal step
    pub death_penalty: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            block_size: 20,
            tick_rate: 20,
            stall_factor: Some(100),
            seed: None,
            food_reward: 10.0,
            death_penalty: -10.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size in pixels
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Small unthrottled board for tests
    pub fn small() -> Self {
        Self {
            width: 200,
            height: 200,
            tick_rate: 0,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cells horizontally
    pub fn columns(&self) -> usize {
        (self.width / self.block_size) as usize
    }

    /// Number of cells vertically
    pub fn rows(&self) -> usize {
        (self.height / self.block_size) as usize
    }

    /// Delay between frames, `None` when unthrottled
    pub fn frame_interval(&self) -> Option<Duration> {
        if self.tick_rate == 0 {
            None
        } else {
            Some(Duration::from_secs_f64(1.0 / self.tick_rate as f64))
        }
    }

    /// Check that the board can hold the initial three-cell snake
    pub fn validate(&self) -> Result<(), String> {
        if self.block_size <= 0 {
            return Err(format!(
                "block_size must be positive, got {}",
                self.block_size
            ));
        }

        if self.width <= 0 || self.height <= 0 {
            return Err(format!(
                "board size must be positive, got {}x{}",
                self.width, self.height
            ));
        }

        if self.width % self.block_size != 0 || self.height % self.block_size != 0 {
            return Err(format!(
                "board {}x{} is not a multiple of block_size {}",
                self.width, self.height, self.block_size
            ));
        }

        // Compared before the usize cast in columns() and rows()
        if self.width / self.block_size < 4 || self.height / self.block_size < 1 {
            return Err(format!(
                "board {}x{} is too small for the initial snake",
                self.width, self.height
            ));
        }

        if self.stall_factor == Some(0) {
            return Err("stall_factor must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.block_size, 20);
        assert_eq!(config.columns(), 32);
        assert_eq!(config.rows(), 24);
        assert_eq!(config.stall_factor, Some(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_frame_interval() {
        let config = GameConfig::default();
        assert_eq!(config.frame_interval(), Some(Duration::from_millis(50)));

        let config = GameConfig::small();
        assert_eq!(config.frame_interval(), None);
    }

    #[test]
    fn test_validation() {
        let mut config = GameConfig::default();
        config.width = 650;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.block_size = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::new(40, 20);
        assert!(config.validate().is_err());
        config.width = 80;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_positive_board() {
        let config = GameConfig {
            width: -80,
            height: -80,
            ..GameConfig::small()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("must be positive"), "{}", err);

        let config = GameConfig {
            width: 0,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            height: -20,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
