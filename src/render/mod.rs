//! Display collaborators for the environment
//!
//! The environment only needs two things from a display: draw the current
//! frame and say whether the user asked to quit. `Headless` does neither,
//! `TerminalDisplay` draws with ratatui and reads keys from crossterm.

pub mod renderer;

pub use renderer::Renderer;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;

use crate::error::Result;
use crate::game::GameState;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;

/// Rendering and quit polling for a running game
pub trait Display {
    /// Draw the current frame
    fn render(&mut self, state: &GameState) -> Result<()>;

    /// True if the user asked to stop, never blocks
    fn poll_quit_request(&mut self) -> Result<bool>;

    /// Called when a fresh game starts after a reset or restart
    fn on_episode_start(&mut self) {}

    /// Called once when an episode ends with its final score
    fn on_episode_end(&mut self, _score: u32) {}
}

/// Display that draws nothing and never asks to quit
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Display for Headless {
    fn render(&mut self, _state: &GameState) -> Result<()> {
        Ok(())
    }

    fn poll_quit_request(&mut self) -> Result<bool> {
        Ok(false)
    }
}

/// Full-screen terminal display
///
/// Enters raw mode and the alternate screen on creation and restores the
/// terminal when dropped. Quit keys are q, Esc and Ctrl-C.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    input_handler: InputHandler,
    metrics: GameMetrics,
}

impl TerminalDisplay {
    /// Take over the terminal for watching the agent
    pub fn new() -> Result<Self> {
        Self::with_renderer(Renderer::new())
    }

    pub fn with_renderer(renderer: Renderer) -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stderr();
        execute!(out, EnterAlternateScreen)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(out))?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            renderer,
            input_handler: InputHandler::new(),
            metrics: GameMetrics::new(),
        })
    }
}

impl Display for TerminalDisplay {
    fn render(&mut self, state: &GameState) -> Result<()> {
        self.metrics.update();

        let renderer = &self.renderer;
        let metrics = &self.metrics;
        self.terminal
            .draw(|frame| renderer.render(frame, state, metrics))?;

        Ok(())
    }

    fn poll_quit_request(&mut self) -> Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && self.input_handler.handle_key_event(key) == KeyAction::Quit
                {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    fn on_episode_start(&mut self) {
        self.metrics.on_game_start();
    }

    fn on_episode_end(&mut self, score: u32) {
        self.metrics.on_game_over(score);
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};

    #[test]
    fn test_headless_never_quits() {
        let mut display = Headless;
        let state = GameEngine::new(GameConfig::small().with_seed(1)).reset();

        for _ in 0..10 {
            display.render(&state).unwrap();
            assert!(!display.poll_quit_request().unwrap());
        }
        display.on_episode_end(4);
    }
}
