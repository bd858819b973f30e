//! Snake DQN - a snake game and a deep Q-learning agent that learns to play it
//!
//! This library provides:
//! - Core game logic (game module)
//! - Observations, replay memory, the agent and its burn Q-network (rl module)
//! - TUI rendering and keyboard mapping (render and input modules)
//! - Score tracking and export (metrics module)
//! - Training, playback and keyboard play (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;

pub use error::{Error, Result};
