use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Action, Direction, GameConfig, GameSession, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::HighScoreStore;
use crate::render::Renderer;

use super::signals::{Shutdown, ShutdownSignals};

/// Keyboard-driven play in the terminal
pub struct HumanMode<S: HighScoreStore> {
    session: GameSession<S>,
    tick_interval: Duration,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl<S: HighScoreStore> HumanMode<S> {
    pub fn new(config: &GameConfig, store: S) -> Self {
        Self {
            session: GameSession::new(config, store),
            tick_interval: config.tick_interval(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut signals = ShutdownSignals::new()?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal, &mut signals).await;

        // The record is saved whichever way the loop ended
        self.close_session();
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        signals: &mut ShutdownSignals,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let state = self.session.render_state();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // SIGINT, SIGTERM, SIGHUP
                reason = signals.recv() => {
                    self.handle_shutdown(reason);
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
                KeyAction::Turn(dir) => {
                    // Checked against the committed direction; the latest
                    // accepted key before the tick wins
                    if let Some(dir) = self
                        .input_handler
                        .filter_turn(self.session.direction(), dir)
                    {
                        self.pending_direction = Some(dir);
                    }
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    info!("Quit requested");
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn handle_shutdown(&mut self, reason: Shutdown) {
        info!("Stopping on {:?}", reason);
        self.should_quit = true;
    }

    fn close_session(&mut self) {
        self.session.finish();
    }

    fn update_game(&mut self) -> TickOutcome {
        let action = Action::from(self.pending_direction.take());
        let outcome = self.session.tick(action);

        match outcome {
            TickOutcome::Collided { length } => self.metrics.on_run_over(length),
            TickOutcome::AteApple | TickOutcome::BoardFilled { .. } => {
                self.metrics.observe_length(self.session.snake().length())
            }
            TickOutcome::Moved => {}
        }

        outcome
    }

    fn reset_game(&mut self) {
        self.metrics.on_run_over(self.session.snake().length());
        self.session.restart();
        self.pending_direction = None;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};
    use crate::persistence::MemoryHighScoreStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode<MemoryHighScoreStore> {
        let config = GameConfig {
            seed: Some(5),
            ..GameConfig::small()
        };
        let mut mode = HumanMode::new(&config, MemoryHighScoreStore::new());
        mode.session.place_apple(Position::new(0, 0));
        mode
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.session.snake().length(), 1);
        assert!(!mode.should_quit);
        assert_eq!(mode.tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_turn_key_applies_on_next_tick() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.pending_direction, Some(Direction::Up));

        assert_eq!(mode.update_game(), TickOutcome::Moved);
        assert_eq!(mode.session.direction(), Direction::Up);
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_reverse_key_is_filtered() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_latest_key_wins() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up));
        mode.handle_event(key(KeyCode::Down));
        assert_eq!(mode.pending_direction, Some(Direction::Down));
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_terminate_signal_saves_record() {
        let mut mode = mode();
        mode.session.set_snake(Snake::from_segments(
            [(3, 3), (2, 3), (1, 3), (0, 3)].map(Position::from),
            Direction::Right,
            Position::new(5, 5),
        ));

        mode.handle_shutdown(Shutdown::Terminate);
        assert!(mode.should_quit);

        mode.close_session();
        assert_eq!(mode.session.high_score(), 4);
        assert_eq!(mode.session.store().saves(), &[4]);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.session.set_snake(Snake::from_segments(
            [(3, 3), (2, 3), (1, 3)].map(Position::from),
            Direction::Right,
            Position::new(5, 5),
        ));
        mode.pending_direction = Some(Direction::Up);

        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.session.snake().length(), 1);
        assert_eq!(mode.session.high_score(), 3);
        assert_eq!(mode.pending_direction, None);
        assert_eq!(mode.metrics.runs, 2);
        assert_eq!(mode.metrics.best_length, 3);
    }
}
