use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, sleep};
use tracing::{debug, info};

use super::clock::TickClock;
use crate::game::{GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive terminal game: keyboard in, one frame out per render tick
pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    clock: TickClock,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(mut engine: GameEngine) -> Result<Self> {
        let state = engine.reset().context("Failed to set up the arena")?;
        let clock = TickClock::new(state.tick_length, Instant::now());

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            clock,
            should_quit: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        self.clock.resume(Instant::now());

        loop {
            let until_tick = self.clock.until_next_tick(Instant::now());

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Next tick boundary
                _ = sleep(until_tick) => {
                    self.update_game(Instant::now())?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let paused = self.clock.is_paused();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, paused);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
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

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    if self.state.is_running() && !self.clock.is_paused() {
                        self.state.set_player_direction(direction);
                    }
                }
                KeyAction::TogglePause => self.toggle_pause(Instant::now()),
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    /// Run however many ticks have elapsed by `now`
    fn update_game(&mut self, now: Instant) -> Result<()> {
        let steps = self.clock.elapsed_ticks(now);
        if steps == 0 || !self.state.is_running() {
            return Ok(());
        }
        if steps > 1 {
            debug!(steps, "catching up");
        }

        let result = self
            .engine
            .advance(&mut self.state, steps)
            .context("Simulation failed")?;

        if let Some(outcome) = result.outcome {
            self.metrics.on_game_over(outcome, self.state.score());
        }

        Ok(())
    }

    fn toggle_pause(&mut self, now: Instant) {
        if !self.state.is_running() {
            return;
        }
        if self.clock.is_paused() {
            self.clock.resume(now);
            self.metrics.on_resume();
        } else {
            self.clock.pause();
            self.metrics.on_pause();
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = self.engine.reset().context("Failed to reset the arena")?;
        self.clock.resume(Instant::now());
        self.metrics.on_game_start();
        info!(games_played = self.metrics.games_played, "restarted");
        Ok(())
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
    use crate::game::{Direction, GameConfig, Outcome, Position, Snake};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> PlayMode {
        PlayMode::new(GameEngine::with_seed(GameConfig::small(), 8)).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.state().is_running());
        assert_eq!(mode.state().player.len(), 1);
        assert_eq!(mode.metrics().games_played, 0);
    }

    #[test]
    fn test_turn_keys_steer_the_player() {
        let mut mode = mode();

        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(mode.state.player.direction, Direction::Up);

        // Reversal is ignored
        mode.handle_event(key(KeyCode::Down)).unwrap();
        assert_eq!(mode.state.player.direction, Direction::Up);
    }

    #[test]
    fn test_pause_blocks_ticks_and_turns() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert!(mode.clock.is_paused());

        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(mode.state.player.direction, Direction::Right);

        mode.update_game(Instant::now() + Duration::from_secs(10)).unwrap();
        assert_eq!(mode.state.ticks, 0);

        mode.handle_event(key(KeyCode::Char('p'))).unwrap();
        assert!(!mode.clock.is_paused());
    }

    #[test]
    fn test_elapsed_time_drives_ticks() {
        let mut mode = mode();
        let tick = mode.state.tick_length;

        mode.update_game(Instant::now() + tick * 2 + tick / 2).unwrap();

        assert_eq!(mode.state.ticks, 2);
        assert!(mode.state.food.is_some());
    }

    #[test]
    fn test_game_over_is_recorded() {
        let mut mode = mode();
        mode.state.ai = None;
        let color = mode.state.player.color;
        mode.state.player = Snake::new(Position::new(1, 5), Direction::Left, 8, color);

        mode.update_game(Instant::now() + Duration::from_secs(1)).unwrap();

        assert_eq!(mode.state.outcome, Some(Outcome::WallCollision));
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.last_outcome, Some(Outcome::WallCollision));
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.state.outcome = Some(Outcome::SelfCollision);

        mode.handle_event(key(KeyCode::Char('r'))).unwrap();

        assert!(mode.state.is_running());
        assert_eq!(mode.state.ticks, 0);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }
}
