use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Position, Rgb};
use crate::metrics::GameMetrics;

/// What occupies a single block of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Food,
    PlayerHead,
    PlayerBody,
    AiHead,
    AiBody,
}

impl Cell {
    /// Classify a block. Snakes are drawn over food, and heads over bodies.
    pub fn at(state: &GameState, pos: Position) -> Cell {
        if state.wall.contains(pos) {
            return Cell::Wall;
        }
        if state.player.head() == pos {
            return Cell::PlayerHead;
        }
        if let Some(ai) = state.ai.as_ref() {
            if ai.snake.head() == pos {
                return Cell::AiHead;
            }
        }
        if state.player.contains(pos) {
            return Cell::PlayerBody;
        }
        if state.ai.as_ref().is_some_and(|ai| ai.snake.contains(pos)) {
            return Cell::AiBody;
        }
        if state.food == Some(pos) {
            return Cell::Food;
        }
        Cell::Empty
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics, paused);
        frame.render_widget(stats, chunks[0]);

        if state.is_running() {
            let grid = self.render_grid(state);
            frame.render_widget(grid, chunks[1]);
        } else {
            let game_over = self.render_game_over(state, metrics);
            frame.render_widget(game_over, centered(chunks[1], 44, 11));
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let player_color = color(state.player.color);
        let ai_color = state
            .ai
            .as_ref()
            .map(|ai| color(ai.snake.color))
            .unwrap_or(Color::Reset);

        let mut lines = Vec::with_capacity(state.map_height as usize + 1);

        for y in 0..=state.map_height {
            let mut spans = Vec::with_capacity(state.map_width as usize + 1);

            for x in 0..=state.map_width {
                let cell = match Cell::at(state, Position::new(x, y)) {
                    Cell::Wall => {
                        Span::styled("██", Style::default().fg(color(state.wall_color)))
                    }
                    // Heads get an outlined glyph so they stand out from the body
                    Cell::PlayerHead => Span::styled(
                        "▣ ",
                        Style::default().fg(player_color).add_modifier(Modifier::BOLD),
                    ),
                    Cell::PlayerBody => Span::styled("■ ", Style::default().fg(player_color)),
                    Cell::AiHead => Span::styled(
                        "▣ ",
                        Style::default().fg(ai_color).add_modifier(Modifier::BOLD),
                    ),
                    Cell::AiBody => Span::styled("■ ", Style::default().fg(ai_color)),
                    Cell::Food => Span::styled(
                        "● ",
                        Style::default()
                            .fg(color(state.food_color))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" SNAKE-O-TRON "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        paused: bool,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Length: ", label),
            Span::styled(
                format!("{}/{}", state.player.len(), state.player.target_length),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Ticks: ", label),
            Span::styled(state.ticks.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ];
        if let Some(ai) = state.ai.as_ref() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Rival: ", label));
            spans.push(Span::styled(
                ai.snake.len().to_string(),
                Style::default().fg(color(ai.snake.color)),
            ));
        }
        if paused {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let survived = state.outcome.is_some_and(|o| o.player_survived());
        let (title, title_color) = if survived {
            ("YOU WIN", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(title_color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Reason: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.info(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   ({} won of {})", metrics.wins, metrics.games_played),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(title_color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Magenta)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{AiSnake, Direction, Outcome, Snake};
    use ratatui::{backend::TestBackend, Terminal};

    fn state() -> GameState {
        let mut player = Snake::new(Position::new(3, 5), Direction::Right, 8, Rgb(0, 0, 200));
        player.move_forward();
        let ai_start = Position::new(7, 2);
        let ai = AiSnake::new(Snake::new(ai_start, Direction::Left, 8, Rgb(200, 120, 0)));
        let mut state = GameState::new(player, Some(ai), 10, 10);
        state.food = Some(Position::new(8, 8));
        state
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cell_classification() {
        let state = state();
        assert_eq!(Cell::at(&state, Position::new(0, 0)), Cell::Wall);
        assert_eq!(Cell::at(&state, Position::new(4, 5)), Cell::PlayerHead);
        assert_eq!(Cell::at(&state, Position::new(3, 5)), Cell::PlayerBody);
        assert_eq!(Cell::at(&state, Position::new(7, 2)), Cell::AiHead);
        assert_eq!(Cell::at(&state, Position::new(8, 8)), Cell::Food);
        assert_eq!(Cell::at(&state, Position::new(5, 5)), Cell::Empty);
    }

    #[test]
    fn test_render_running_round() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let metrics = GameMetrics::new();
        let state = state();

        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &metrics, true))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("SNAKE-O-TRON"));
        assert!(text.contains("PAUSED"));
        assert!(text.contains("▣"));
    }

    #[test]
    fn test_render_game_over_shows_reason() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let metrics = GameMetrics::new();
        let mut state = state();
        state.outcome = Some(Outcome::WallCollision);

        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &metrics, false))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("death by wall"));
    }
}
