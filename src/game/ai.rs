//! Greedy controller for the computer snake.
//!
//! Every tick the controller looks only at the four cells around its head:
//! it discards moves into a wall or any snake body, then prefers the moves
//! that close the distance to the food along one axis. It never looks
//! further ahead, so it will happily steer into a dead end.

use rand::seq::SliceRandom;
use rand::Rng;

use super::arena::Wall;
use super::direction::Direction;
use super::state::{Position, Snake};

/// What the computer snake can see of the world when choosing a move
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub wall: &'a Wall,
    pub opponent: &'a Snake,
    pub food: Option<Position>,
}

/// The computer-controlled snake
#[derive(Debug, Clone, PartialEq)]
pub struct AiSnake {
    pub snake: Snake,
}

impl AiSnake {
    pub fn new(snake: Snake) -> Self {
        Self { snake }
    }

    /// True if stepping onto `pos` would kill the snake
    pub fn occupied(&self, surroundings: &Surroundings<'_>, pos: Position) -> bool {
        surroundings.wall.contains(pos)
            || self.snake.contains(pos)
            || surroundings.opponent.contains(pos)
    }

    /// Directions whose neighbouring cell is free. May be empty.
    pub fn will_not_die(&self, surroundings: &Surroundings<'_>) -> Vec<Direction> {
        let head = self.snake.head();
        Direction::ALL
            .into_iter()
            .filter(|&d| !self.occupied(surroundings, head.moved_in_direction(d)))
            .collect()
    }

    /// Directions that bring the head closer to `food` on one axis
    pub fn preferred_directions(&self, food: Option<Position>) -> Vec<Direction> {
        let Some(food) = food else {
            return Vec::new();
        };
        let head = self.snake.head();

        let mut preferred = Vec::with_capacity(2);
        if food.x < head.x {
            preferred.push(Direction::Left);
        }
        if food.x > head.x {
            preferred.push(Direction::Right);
        }
        if food.y < head.y {
            preferred.push(Direction::Up);
        }
        if food.y > head.y {
            preferred.push(Direction::Down);
        }
        preferred
    }

    /// Pick and apply the next direction.
    ///
    /// Returns `None` when every neighbouring cell is deadly; the direction is
    /// left unchanged in that case.
    pub fn decide_new_direction<R: Rng + ?Sized>(
        &mut self,
        surroundings: &Surroundings<'_>,
        rng: &mut R,
    ) -> Option<Direction> {
        let legal = self.will_not_die(surroundings);
        if legal.is_empty() {
            return None;
        }

        let preferred = self.preferred_directions(surroundings.food);
        let optimal: Vec<Direction> = legal
            .iter()
            .copied()
            .filter(|d| preferred.contains(d))
            .collect();

        let candidates = if optimal.is_empty() { &legal } else { &optimal };
        let choice = *candidates.choose(rng)?;
        self.snake.direction = choice;
        Some(choice)
    }
}
