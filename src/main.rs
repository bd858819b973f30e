use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use snake_dqn::game::GameConfig;
use snake_dqn::modes::{HumanMode, PlayMode, TrainConfig, TrainMode, CHECKPOINT_NAME};
use snake_dqn::render::{Display, Headless, Renderer, TerminalDisplay};
use snake_dqn::rl::{default_device, load_metadata, QTrainer, TrainingBackend};

#[derive(Parser)]
#[command(name = "snake_dqn")]
#[command(version, about = "Snake game with a deep Q-learning agent")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "train")]
    mode: Mode,

    /// Board width in pixels
    #[arg(long, default_value = "640")]
    width: i32,

    /// Board height in pixels
    #[arg(long, default_value = "480")]
    height: i32,

    /// Side of one cell in pixels
    #[arg(long, default_value = "20")]
    block_size: i32,

    /// Frames per second while rendering, 0 for unthrottled [default: 20]
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Stop after this many episodes (runs until quit when omitted)
    #[arg(long)]
    episodes: Option<usize>,

    /// Directory of the best-so-far checkpoint
    #[arg(long, default_value = "model")]
    checkpoint_dir: PathBuf,

    /// Continue training from the checkpoint
    #[arg(long)]
    resume: bool,

    /// Draw the game in the terminal while training
    #[arg(long)]
    render: bool,

    /// Seed for food placement and exploration
    #[arg(long)]
    seed: Option<u64>,

    /// Write the score history as JSON when training stops
    #[arg(long)]
    scores: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Train the agent
    Train,
    /// Watch the checkpointed agent play
    Play,
    /// Play snake with keyboard controls
    Human,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            block_size: self.block_size,
            tick_rate: self
                .tick_rate
                .unwrap_or_else(|| GameConfig::default().tick_rate),
            seed: self.seed,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would tear through the full-screen display
    let terminal_in_use = cli.render || !matches!(cli.mode, Mode::Train);
    let default_filter = if terminal_in_use { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.mode {
        Mode::Train => {
            let mut config = TrainConfig::new(cli.checkpoint_dir.clone());
            config.max_episodes = cli.episodes;
            config.scores_path = cli.scores.clone();
            config.resume = cli.resume;
            config.agent_seed = cli.seed;
            config.game_config = cli.game_config();

            if cli.render {
                let display = TerminalDisplay::new().context("Failed to set up terminal")?;
                train(config, display)?;
            } else {
                config.game_config.tick_rate = headless_tick_rate(cli.tick_rate);
                train(config, Headless)?;
            }
        }
        Mode::Play => {
            let checkpoint = cli.checkpoint_dir.join(CHECKPOINT_NAME);
            let metadata = load_metadata(&checkpoint)
                .with_context(|| format!("No checkpoint found at {:?}", checkpoint))?;
            let trainer = QTrainer::<TrainingBackend>::new(&metadata.agent_config, default_device())?;

            let display = TerminalDisplay::new().context("Failed to set up terminal")?;
            let mut play_mode = PlayMode::new(&checkpoint, cli.game_config(), trainer, display)?;
            let summary = play_mode.run(cli.episodes)?;
            drop(play_mode);

            println!(
                "Played {} games, best score {}",
                summary.episodes, summary.best_score
            );
        }
        Mode::Human => {
            let display = TerminalDisplay::with_renderer(Renderer::for_keyboard_play())
                .context("Failed to set up terminal")?;
            let mut human_mode = HumanMode::new(cli.game_config(), display)?;
            human_mode.run().await?;
        }
    }

    Ok(())
}

/// Headless training is never paced since nothing is drawn
fn headless_tick_rate(requested: Option<u32>) -> u32 {
    if let Some(rate) = requested.filter(|&rate| rate > 0) {
        log::warn!("--tick-rate {} is ignored without --render", rate);
    }
    0
}

fn train<D: Display>(config: TrainConfig, display: D) -> Result<()> {
    let trainer = QTrainer::<TrainingBackend>::new(&config.agent_config, default_device())?;

    let summary = {
        let mut train_mode = TrainMode::new(config, trainer, display)?;
        train_mode.run()?
    };

    // The terminal is restored once the display is dropped
    println!(
        "Trained {} episodes, record {} ({:?})",
        summary.episodes, summary.record, summary.stop_reason
    );

    Ok(())
}
