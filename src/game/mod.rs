//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It is driven both by keyboard play and by the training loop.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, RelativeAction, NUM_ACTIONS};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult, INITIAL_SNAKE_LENGTH};
pub use state::{GameState, Position, Snake, TerminationCause};
