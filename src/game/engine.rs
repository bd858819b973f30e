use super::{
    action::{Direction, RelativeAction},
    config::GameConfig,
    state::{GameState, Position, Snake, TerminationCause},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Length of the snake after a reset
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the episode ended, if it did
    pub cause: Option<TerminationCause>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Score after the step
    pub score: u32,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    ///
    /// Three cells pointing right, head at the block nearest the centre.
    pub fn reset(&mut self) -> GameState {
        let block = self.config.block_size;
        let center_x = (self.config.width / 2 / block) * block;
        let center_y = (self.config.height / 2 / block) * block;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
            block,
        );

        let food = self.spawn_food_avoid_snake(&snake);

        GameState::new(
            snake,
            food,
            self.config.width,
            self.config.height,
            block,
        )
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: RelativeAction) -> StepResult {
        if !state.is_alive {
            return StepResult {
                reward: 0.0,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    cause: None,
                },
            };
        }

        state.steps += 1;

        state.snake.direction = action.apply(state.snake.direction);
        let new_head = state.probe(state.snake.direction);

        // Collision is judged against the body before the move
        let collision = state.collision_at(new_head);
        state.snake.body.insert(0, new_head);

        let cause = collision.or_else(|| self.check_stall(state));
        if let Some(cause) = cause {
            // Tail stays put, the losing frame is kept as-is
            state.is_alive = false;

            return StepResult {
                reward: self.config.death_penalty,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    cause: Some(cause),
                },
            };
        }

        let ate_food = new_head == state.food;
        let mut reward = 0.0;

        if ate_food {
            state.score += 1;
            reward = self.config.food_reward;
            state.food = self.spawn_food_avoid_snake(&state.snake);
        } else {
            state.snake.body.pop();
        }

        StepResult {
            reward,
            terminated: false,
            score: state.score,
            info: StepInfo {
                ate_food,
                cause: None,
            },
        }
    }

    fn check_stall(&self, state: &GameState) -> Option<TerminationCause> {
        let factor = self.config.stall_factor?;
        let limit = factor as usize * state.snake.len();

        if state.steps as usize > limit {
            Some(TerminationCause::Stalled)
        } else {
            None
        }
    }

    /// Pick a random free cell, retrying until it misses the snake
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Position {
        let block = self.config.block_size;
        let max_x = (self.config.width - block) / block;
        let max_y = (self.config.height - block) / block;

        loop {
            let x = self.rng.gen_range(0..=max_x) * block;
            let y = self.rng.gen_range(0..=max_y) * block;
            let pos = Position::new(x, y);

            if !snake.body.contains(&pos) {
                return pos;
            }
        }
    }
}
