//! Training mode for the Q-learning agent
//!
//! Runs the agent in the environment one frame at a time. Every transition
//! is learned from immediately and stored for replay. When an episode ends
//! the environment is reset, a batch is replayed from memory, and the model
//! is checkpointed if the score set a new record.
//!
//! # Example
//!
//! ```rust,no_run
//! use snake_dqn::modes::{TrainConfig, TrainMode};
//! use snake_dqn::render::Headless;
//! use snake_dqn::rl::{default_device, QTrainer, TrainingBackend};
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut config = TrainConfig::new(PathBuf::from("model"));
//! config.max_episodes = Some(500);
//!
//! let trainer = QTrainer::<TrainingBackend>::new(&config.agent_config, default_device())?;
//! let mut train_mode = TrainMode::new(config, trainer, Headless)?;
//! let summary = train_mode.run()?;
//! println!("record: {}", summary.record);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::game::GameConfig;
use crate::metrics::TrainingStats;
use crate::render::Display;
use crate::rl::{
    checkpoint_exists, load_model, save_model, Agent, AgentConfig, Checkpoint, ModelMetadata,
    Predictor, SnakeEnvironment, Transition,
};

/// File stem of the best-so-far checkpoint inside the checkpoint directory
pub const CHECKPOINT_NAME: &str = "best_sofar";

/// Episodes kept in the rolling windows of the training log
const STATS_WINDOW: usize = 100;

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Stop after this many episodes, run until quit when unset
    pub max_episodes: Option<usize>,

    /// Directory holding the best-so-far checkpoint
    pub checkpoint_dir: PathBuf,

    /// Write the score history here when training stops
    pub scores_path: Option<PathBuf>,

    /// Continue from an existing checkpoint in `checkpoint_dir`
    pub resume: bool,

    /// Seed for exploration and replay sampling
    pub agent_seed: Option<u64>,

    pub game_config: GameConfig,

    pub agent_config: AgentConfig,
}

impl TrainConfig {
    /// Unbounded training with default game and agent settings
    pub fn new(checkpoint_dir: PathBuf) -> Self {
        Self {
            max_episodes: None,
            checkpoint_dir,
            scores_path: None,
            resume: false,
            agent_seed: None,
            game_config: GameConfig::default(),
            agent_config: AgentConfig::default(),
        }
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.checkpoint_dir.join(CHECKPOINT_NAME)
    }
}

/// Why training stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EpisodeLimit,
    QuitRequested,
}

/// Telemetry for a finished episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    /// Episodes played so far, including this one
    pub episode: usize,
    pub score: u32,
    pub steps: u32,
    /// Mean of every score recorded in this run
    pub mean_score: f32,
    pub record: u32,
    /// Whether this episode set the record and was checkpointed
    pub new_record: bool,
    /// Loss of the end-of-episode replay batch
    pub batch_loss: f32,
}

/// Result of advancing training by one frame
#[derive(Debug, Clone, PartialEq)]
pub enum StepStatus {
    Running,
    EpisodeFinished(EpisodeReport),
    QuitRequested,
}

/// Totals reported when training stops
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSummary {
    /// Episodes played, counting those of a resumed checkpoint
    pub episodes: usize,
    pub record: u32,
    pub stop_reason: StopReason,
}

/// Episode orchestrator
///
/// Generic over the predictor so the loop can be driven by the burn trainer
/// or by any other action-value estimator that can be checkpointed.
pub struct TrainMode<P: Predictor + Checkpoint, D: Display> {
    agent: Agent<P>,
    env: SnakeEnvironment<D>,
    stats: TrainingStats,
    config: TrainConfig,

    /// Episodes played, drives the exploration schedule
    episodes: usize,
}

impl<P: Predictor + Checkpoint, D: Display> TrainMode<P, D> {
    /// Set up the agent and environment, resuming from a checkpoint if asked
    pub fn new(config: TrainConfig, mut predictor: P, display: D) -> Result<Self> {
        config
            .game_config
            .validate()
            .map_err(crate::Error::InvalidConfig)
            .context("Invalid game configuration")?;

        let mut episodes = 0;
        let mut stats = TrainingStats::new(STATS_WINDOW);

        let checkpoint_path = config.checkpoint_path();
        if config.resume {
            if checkpoint_exists(&checkpoint_path) {
                let metadata = load_model(&mut predictor, &checkpoint_path)
                    .with_context(|| format!("Failed to resume from {:?}", checkpoint_path))?;
                log::info!(
                    "Resumed from {:?}: {} episodes, record {}",
                    checkpoint_path,
                    metadata.episodes_trained,
                    metadata.record
                );
                episodes = metadata.episodes_trained;
                stats = stats.with_record(metadata.record);
            } else {
                log::warn!(
                    "No checkpoint at {:?}, starting from scratch",
                    checkpoint_path
                );
            }
        }

        let agent = match config.agent_seed {
            Some(seed) => Agent::with_seed(predictor, config.agent_config.clone(), seed),
            None => Agent::new(predictor, config.agent_config.clone()),
        }
        .context("Invalid agent configuration")?;

        let env = SnakeEnvironment::new(config.game_config.clone(), display);

        Ok(Self {
            agent,
            env,
            stats,
            config,
            episodes,
        })
    }

    /// Train until the episode limit or a quit request
    pub fn run(&mut self) -> Result<TrainSummary> {
        self.log_header();

        let stop_reason = loop {
            if self
                .config
                .max_episodes
                .is_some_and(|max| self.stats.total_episodes() >= max)
            {
                break StopReason::EpisodeLimit;
            }

            match self.run_step()? {
                StepStatus::Running => {}
                StepStatus::EpisodeFinished(report) => {
                    log::info!(
                        "Game {} | Score {} | Mean {:.2} | Record {} | Steps {} | Loss {:.4}",
                        report.episode,
                        report.score,
                        report.mean_score,
                        report.record,
                        report.steps,
                        report.batch_loss
                    );
                }
                StepStatus::QuitRequested => break StopReason::QuitRequested,
            }
        };

        if let Some(path) = &self.config.scores_path {
            self.stats.write_json(path)?;
            log::info!("Score history written to {:?}", path);
        }

        log::info!("Training stopped ({:?}): {}", stop_reason, self.stats.format_summary());

        Ok(TrainSummary {
            episodes: self.episodes,
            record: self.stats.record(),
            stop_reason,
        })
    }

    /// Advance training by one frame
    pub fn run_step(&mut self) -> Result<StepStatus> {
        if self.env.quit_requested()? {
            return Ok(StepStatus::QuitRequested);
        }

        let state = self.env.observation();
        let action = self.agent.select_action(&state, self.episodes)?;
        let step = self.env.step(action)?;

        let transition = Transition {
            state,
            action,
            reward: step.reward,
            next_state: step.observation,
            terminated: step.terminated,
        };
        self.agent.update_online(&transition)?;
        self.agent.remember(transition);

        if !step.terminated {
            return Ok(StepStatus::Running);
        }

        let steps = self.env.state().steps;
        self.env.reset();
        self.episodes += 1;

        let batch_loss = self.agent.update_batch()?;
        self.stats.record_loss(batch_loss);

        let new_record = self.stats.record_episode(step.score, steps as usize);
        if new_record {
            self.save_checkpoint()?;
        }

        Ok(StepStatus::EpisodeFinished(EpisodeReport {
            episode: self.episodes,
            score: step.score,
            steps,
            mean_score: self.stats.mean_score(),
            record: self.stats.record(),
            new_record,
            batch_loss,
        }))
    }

    /// Overwrite the best-so-far checkpoint with the current weights
    fn save_checkpoint(&self) -> Result<()> {
        let path = self.config.checkpoint_path();
        let metadata = ModelMetadata::new(
            self.config.agent_config.clone(),
            self.episodes,
            self.stats.record(),
        );

        save_model(self.agent.predictor(), &metadata, &path)
            .with_context(|| format!("Failed to save checkpoint to {:?}", path))?;

        log::debug!("Checkpoint saved: {:?}", path);
        Ok(())
    }

    fn log_header(&self) {
        let game = &self.config.game_config;
        let agent = &self.config.agent_config;

        log::info!(
            "Training on a {}x{} board ({}x{} cells)",
            game.width,
            game.height,
            game.columns(),
            game.rows()
        );
        log::info!(
            "lr {} | gamma {} | batch {} | memory {} | hidden {}",
            agent.learning_rate,
            agent.gamma,
            agent.batch_size,
            agent.memory_capacity,
            agent.hidden_size
        );
        match self.config.max_episodes {
            Some(max) => log::info!("Episode limit: {}", max),
            None => log::info!("No episode limit, quit to stop"),
        }
        log::info!("Checkpoint: {:?}", self.config.checkpoint_path());
    }

    pub fn agent(&self) -> &Agent<P> {
        &self.agent
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }
}
