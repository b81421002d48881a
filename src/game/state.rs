use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ai::AiSnake;
use super::arena::Wall;
use super::direction::Direction;

/// A position on the game grid, in blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one block in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Display colour attached to a drawable entity. The simulation never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A snake in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    pub body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Length the body grows towards
    pub target_length: usize,
    pub color: Rgb,
}

impl Snake {
    /// Create a one-block snake that will grow to `target_length`
    pub fn new(start: Position, direction: Direction, target_length: usize, color: Rgb) -> Self {
        Self {
            body: VecDeque::from([start]),
            direction,
            target_length,
            color,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Advance one block in the current direction.
    ///
    /// The tail is dropped only once the body is longer than `target_length`,
    /// so growth after eating shows up one block per move. Bounds and
    /// collisions are not checked here.
    pub fn move_forward(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if self.body.len() > self.target_length {
            self.body.pop_back();
        }
    }

    /// Raise the target length; the body catches up over the next moves
    pub fn eat(&mut self, blocks: usize) {
        self.target_length += blocks;
    }

    /// Check if any segment, head included, is at `pos`
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == pos)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Player head hit the wall
    WallCollision,
    /// Player head ran into the player's own body
    SelfCollision,
    /// Player head ran into the computer snake
    OpponentCollision,
    /// The computer snake had no surviving move
    AiStuck,
    /// Player grew past the victory length
    Victory,
}

impl Outcome {
    /// Short reason string reported at the end of a round
    pub fn reason(&self) -> &'static str {
        match self {
            Outcome::WallCollision => "death by wall",
            Outcome::SelfCollision => "death by self",
            Outcome::OpponentCollision => "death by snake",
            Outcome::AiStuck => "ai lost",
            Outcome::Victory => "moneywin",
        }
    }

    pub fn is_victory(&self) -> bool {
        matches!(self, Outcome::Victory)
    }

    /// True for every ending in which the player is still alive
    pub fn player_survived(&self) -> bool {
        matches!(self, Outcome::Victory | Outcome::AiStuck)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub player: Snake,
    /// Computer-controlled rival, absent when disabled in the config
    pub ai: Option<AiSnake>,
    pub wall: Wall,
    /// `None` between being eaten and the end of the current `advance`
    pub food: Option<Position>,
    /// Far wall column, in blocks
    pub map_width: i32,
    /// Far wall row, in blocks
    pub map_height: i32,
    pub tick_length: Duration,
    pub ticks: u64,
    pub wall_color: Rgb,
    pub food_color: Rgb,
    /// Set once the round is over
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Create a running round with the wall built from the map dimensions
    pub fn new(player: Snake, ai: Option<AiSnake>, map_width: i32, map_height: i32) -> Self {
        Self {
            player,
            ai,
            wall: Wall::build(map_width, map_height),
            food: None,
            map_width,
            map_height,
            tick_length: Duration::from_millis(300),
            ticks: 0,
            wall_color: Rgb(116, 0, 0),
            food_color: Rgb(59, 255, 0),
            outcome: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.outcome.is_none()
    }

    /// Terminal reason, empty while the round is still running
    pub fn info(&self) -> &'static str {
        self.outcome.map(|o| o.reason()).unwrap_or("")
    }

    /// Turn the player, ignoring a request to reverse straight into itself
    pub fn set_player_direction(&mut self, direction: Direction) {
        if direction == self.player.direction.opposite() {
            return;
        }
        self.player.direction = direction;
    }

    /// Score derived from the player's length
    pub fn score(&self) -> u32 {
        self.player.len() as u32
    }

    /// Check if a position is occupied by either snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.player.contains(pos) || self.ai.as_ref().is_some_and(|ai| ai.snake.contains(pos))
    }

    pub(crate) fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(x: i32, y: i32, direction: Direction) -> Snake {
        Snake::new(Position::new(x, y), direction, 8, Rgb(0, 0, 200))
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_in_direction(Direction::Right), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = snake_at(10, 10, Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.target_length, 8);
    }

    #[test]
    fn test_snake_grows_one_block_per_move_up_to_target() {
        let mut snake = snake_at(1, 1, Direction::Right);

        for expected in 2..=8 {
            let before = snake.len();
            snake.move_forward();
            assert_eq!(snake.len(), expected);
            assert!(snake.len() <= before + 1);
        }

        for _ in 0..5 {
            snake.move_forward();
            assert_eq!(snake.len(), 8);
            assert!(snake.len() <= snake.target_length);
        }
        assert_eq!(snake.head(), Position::new(13, 1));
        assert_eq!(*snake.body.back().unwrap(), Position::new(6, 1));
    }

    #[test]
    fn test_eat_only_changes_target_length() {
        let mut snake = snake_at(5, 5, Direction::Up);
        snake.move_forward();
        let body = snake.body.clone();

        snake.eat(3);
        assert_eq!(snake.target_length, 11);
        assert_eq!(snake.body, body);

        snake.eat(1);
        assert_eq!(snake.target_length, 12);
    }

    #[test]
    fn test_collision_detection() {
        let mut snake = snake_at(5, 5, Direction::Right);
        snake.move_forward();
        snake.move_forward();
        // Body: (7,5), (6,5), (5,5)
        assert!(!snake.collides_with_body(Position::new(7, 5)));
        assert!(snake.collides_with_body(Position::new(5, 5)));
        assert!(snake.contains(Position::new(7, 5)));
        assert!(!snake.contains(Position::new(10, 10)));
    }

    #[test]
    fn test_set_player_direction_ignores_reversal() {
        let mut state = GameState::new(snake_at(5, 5, Direction::Right), None, 10, 10);

        state.set_player_direction(Direction::Left);
        assert_eq!(state.player.direction, Direction::Right);

        state.set_player_direction(Direction::Up);
        assert_eq!(state.player.direction, Direction::Up);

        state.set_player_direction(Direction::Down);
        assert_eq!(state.player.direction, Direction::Up);

        state.set_player_direction(Direction::Up);
        assert_eq!(state.player.direction, Direction::Up);
    }

    #[test]
    fn test_set_player_direction_is_noop_only_for_opposite() {
        for current in Direction::ALL {
            for requested in Direction::ALL {
                let mut state = GameState::new(snake_at(5, 5, current), None, 10, 10);
                state.set_player_direction(requested);
                if requested == current.opposite() {
                    assert_eq!(state.player.direction, current);
                } else {
                    assert_eq!(state.player.direction, requested);
                }
            }
        }
    }

    #[test]
    fn test_info_tracks_outcome() {
        let mut state = GameState::new(snake_at(5, 5, Direction::Right), None, 10, 10);
        assert!(state.is_running());
        assert_eq!(state.info(), "");

        state.finish(Outcome::Victory);
        assert!(!state.is_running());
        assert_eq!(state.info(), "moneywin");
        assert!(state.outcome.unwrap().is_victory());
    }

    #[test]
    fn test_outcome_reasons() {
        assert_eq!(Outcome::WallCollision.to_string(), "death by wall");
        assert_eq!(Outcome::AiStuck.to_string(), "ai lost");
        assert!(Outcome::AiStuck.player_survived());
        assert!(!Outcome::SelfCollision.player_survived());
        assert!(!Outcome::OpponentCollision.is_victory());
    }
}
