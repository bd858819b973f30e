//! Watch a trained agent play
//!
//! Loads the best-so-far checkpoint and plays greedily, without exploration
//! or learning, until the episode limit or a quit request.

use anyhow::{Context, Result};
use std::path::Path;

use crate::game::{GameConfig, RelativeAction};
use crate::render::Display;
use crate::rl::{argmax, load_model, Checkpoint, ModelMetadata, Predictor, SnakeEnvironment};

use super::train::StopReason;

/// Totals reported when play stops
#[derive(Debug, Clone, PartialEq)]
pub struct PlaySummary {
    pub episodes: usize,
    pub best_score: u32,
    pub total_score: u64,
    pub stop_reason: StopReason,
}

pub struct PlayMode<P: Predictor + Checkpoint, D: Display> {
    predictor: P,
    env: SnakeEnvironment<D>,
    metadata: ModelMetadata,
}

impl<P: Predictor + Checkpoint, D: Display> PlayMode<P, D> {
    /// Load weights from `checkpoint_path` into `predictor`
    ///
    /// The predictor must have the architecture the checkpoint was saved with.
    pub fn new(
        checkpoint_path: &Path,
        config: GameConfig,
        mut predictor: P,
        display: D,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(crate::Error::InvalidConfig)
            .context("Invalid game configuration")?;

        let metadata = load_model(&mut predictor, checkpoint_path)
            .with_context(|| format!("Failed to load model from {:?}", checkpoint_path))?;

        log::info!(
            "Loaded {:?}: {} episodes trained, record {}, version {}",
            checkpoint_path,
            metadata.episodes_trained,
            metadata.record,
            metadata.version
        );

        Ok(Self {
            predictor,
            env: SnakeEnvironment::new(config, display),
            metadata,
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Play episodes until `max_episodes` or a quit request
    pub fn run(&mut self, max_episodes: Option<usize>) -> Result<PlaySummary> {
        let mut episodes = 0;
        let mut best_score = 0u32;
        let mut total_score = 0u64;

        let stop_reason = loop {
            if max_episodes.is_some_and(|max| episodes >= max) {
                break StopReason::EpisodeLimit;
            }
            if self.env.quit_requested()? {
                break StopReason::QuitRequested;
            }

            let values = self.predictor.predict(&self.env.observation())?;
            let step = self.env.step(RelativeAction::from_index(argmax(&values)))?;

            if step.terminated {
                episodes += 1;
                best_score = best_score.max(step.score);
                total_score += u64::from(step.score);
                log::info!("Game {} | Score {} | Best {}", episodes, step.score, best_score);
                self.env.reset();
            }
        };

        Ok(PlaySummary {
            episodes,
            best_score,
            total_score,
            stop_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Headless;
    use crate::rl::{default_device, save_model, AgentConfig, QTrainer, TrainingBackend};
    use tempfile::TempDir;

    fn agent_config() -> AgentConfig {
        AgentConfig {
            hidden_size: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_checkpoint_fails() {
        let dir = TempDir::new().unwrap();
        let trainer = QTrainer::<TrainingBackend>::new(&agent_config(), default_device()).unwrap();

        let result = PlayMode::new(
            &dir.path().join("best_sofar"),
            GameConfig::small(),
            trainer,
            Headless,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_plays_bounded_episodes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best_sofar");

        let trainer = QTrainer::<TrainingBackend>::new(&agent_config(), default_device()).unwrap();
        save_model(&trainer, &ModelMetadata::new(agent_config(), 12, 2), &path).unwrap();

        let restored = QTrainer::<TrainingBackend>::new(&agent_config(), default_device()).unwrap();
        let mut mode =
            PlayMode::new(&path, GameConfig::small().with_seed(9), restored, Headless).unwrap();
        assert_eq!(mode.metadata().episodes_trained, 12);

        let summary = mode.run(Some(2)).unwrap();
        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.stop_reason, StopReason::EpisodeLimit);
        assert!(u64::from(summary.best_score) <= summary.total_score);
    }
}
