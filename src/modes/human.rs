//! Keyboard play
//!
//! Arrow keys or WASD pick an absolute heading, which is turned into the
//! relative action the engine understands. Reversing into the body is not
//! possible and such keys keep the snake going straight. There is no stall
//! cutoff in this mode.

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Direction, GameConfig, GameEngine, GameState, RelativeAction};
use crate::input::{InputHandler, KeyAction};
use crate::render::Display;

/// Tick used when the configuration runs unthrottled
const DEFAULT_TICK: Duration = Duration::from_millis(125);

/// Redraw period, 30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct HumanMode<D: Display> {
    engine: GameEngine,
    state: GameState,
    display: D,
    input_handler: InputHandler,
    tick: Duration,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl<D: Display> HumanMode<D> {
    pub fn new(mut config: GameConfig, display: D) -> Result<Self> {
        config
            .validate()
            .map_err(crate::Error::InvalidConfig)
            .context("Invalid game configuration")?;

        config.stall_factor = None;
        let tick = config.frame_interval().unwrap_or(DEFAULT_TICK);

        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            display,
            input_handler: InputHandler::new(),
            tick,
            should_quit: false,
            pending_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick);
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if self.state.is_alive {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    self.display
                        .render(&self.state)
                        .context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => self.pending_direction = Some(direction),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// Advance one tick, steering towards the last key pressed
    fn update_game(&mut self) {
        let action = match self.pending_direction.take() {
            Some(desired) => RelativeAction::toward(self.state.snake.direction, desired),
            None => RelativeAction::Straight,
        };

        let result = self.engine.step(&mut self.state, action);
        if result.terminated {
            self.display.on_episode_end(result.score);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.pending_direction = None;
        self.display.on_episode_start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Headless;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn create_mode() -> HumanMode<Headless> {
        HumanMode::new(GameConfig::small().with_seed(2), Headless).unwrap()
    }

    /// Display that records game starts and ends
    #[derive(Default)]
    struct GameLog {
        started: usize,
        finished: Vec<u32>,
    }

    impl Display for GameLog {
        fn render(&mut self, _state: &GameState) -> crate::Result<()> {
            Ok(())
        }

        fn poll_quit_request(&mut self) -> crate::Result<bool> {
            Ok(false)
        }

        fn on_episode_start(&mut self) {
            self.started += 1;
        }

        fn on_episode_end(&mut self, score: u32) {
            self.finished.push(score);
        }
    }

    #[test]
    fn test_game_initialization() {
        let mode = create_mode();
        assert!(mode.state.is_alive);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.engine.config().stall_factor, None);
        assert_eq!(mode.tick, DEFAULT_TICK);
    }

    #[test]
    fn test_key_turns_snake() {
        let mut mode = create_mode();
        assert_eq!(mode.state.snake.direction, Direction::Right);

        mode.handle_event(key(KeyCode::Down));
        mode.update_game();
        assert_eq!(mode.state.snake.direction, Direction::Down);

        // Without a key the snake keeps its heading
        mode.update_game();
        assert_eq!(mode.state.snake.direction, Direction::Down);
    }

    #[test]
    fn test_reverse_key_goes_straight() {
        let mut mode = create_mode();
        let head = mode.state.snake.head();

        mode.handle_event(key(KeyCode::Left));
        mode.update_game();

        assert!(mode.state.is_alive);
        assert_eq!(mode.state.snake.direction, Direction::Right);
        assert_eq!(mode.state.snake.head().x, head.x + 20);
    }

    #[test]
    fn test_quit_and_restart_keys() {
        let mut mode = create_mode();
        mode.state.score = 10;
        mode.state.is_alive = false;

        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_alive);
        assert!(!mode.should_quit);

        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_restart_key_starts_new_display_game() {
        let mut mode = HumanMode::new(GameConfig::small().with_seed(2), GameLog::default()).unwrap();

        // Head straight into the right wall
        while mode.state.is_alive {
            mode.update_game();
        }
        assert_eq!(mode.display.finished.len(), 1);
        assert_eq!(mode.display.started, 0);

        mode.handle_event(key(KeyCode::Char('r')));
        assert!(mode.state.is_alive);
        assert_eq!(mode.display.started, 1);
        assert_eq!(mode.display.finished.len(), 1);
    }

    #[test]
    fn test_invalid_board_rejected() {
        let config = GameConfig {
            width: -80,
            height: -80,
            ..GameConfig::small()
        };
        assert!(HumanMode::new(config, Headless).is_err());
    }

    #[test]
    fn test_no_stall_cutoff() {
        let mut mode = create_mode();

        // Circling forever would hit the stall cap with the default config
        for _ in 0..2000 {
            mode.pending_direction = Some(mode.state.snake.direction.clockwise());
            mode.update_game();
            if !mode.state.is_alive {
                break;
            }
        }

        assert!(mode.state.steps > 300 || mode.state.score > 0);
    }
}
