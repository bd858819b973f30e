use super::observation::{create_observation, Observation};
use crate::error::Result;
use crate::game::{GameConfig, GameEngine, GameState, RelativeAction, StepInfo};
use crate::render::Display;

/// Outcome of one environment step as seen by the agent
#[derive(Debug, Clone, PartialEq)]
pub struct EnvStep {
    /// Observation after the step
    pub observation: Observation,
    pub reward: f32,
    pub terminated: bool,
    /// Score of the episode so far
    pub score: u32,
    pub info: StepInfo,
}

/// Snake environment for reinforcement learning
///
/// Wraps the pure game engine and adds the side effects of a live game:
/// - every surviving frame is handed to the display
/// - frames are paced at `tick_rate` (unthrottled when 0)
/// - quit requests are polled from the display
pub struct SnakeEnvironment<D: Display> {
    engine: GameEngine,
    state: GameState,
    display: D,
}

impl<D: Display> SnakeEnvironment<D> {
    pub fn new(config: GameConfig, display: D) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        Self {
            engine,
            state,
            display,
        }
    }

    /// Start a new episode and return its first observation
    pub fn reset(&mut self) -> Observation {
        self.state = self.engine.reset();
        self.display.on_episode_start();
        create_observation(&self.state)
    }

    /// Apply `action` for one frame
    ///
    /// Terminal frames are neither rendered nor paced; the display only
    /// hears the final score.
    pub fn step(&mut self, action: RelativeAction) -> Result<EnvStep> {
        let result = self.engine.step(&mut self.state, action);

        if result.terminated {
            self.display.on_episode_end(result.score);
        } else {
            self.display.render(&self.state)?;
            if let Some(interval) = self.engine.config().frame_interval() {
                std::thread::sleep(interval);
            }
        }

        Ok(EnvStep {
            observation: create_observation(&self.state),
            reward: result.reward,
            terminated: result.terminated,
            score: result.score,
            info: result.info,
        })
    }

    /// True once the display has asked to stop
    pub fn quit_requested(&mut self) -> Result<bool> {
        self.display.poll_quit_request()
    }

    /// Current observation without stepping
    pub fn observation(&self) -> Observation {
        create_observation(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
