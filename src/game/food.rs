use rand::Rng;
use tracing::{debug, warn};

use super::error::GameError;
use super::state::{Position, Snake};

/// Pick a random interior cell that no snake occupies.
///
/// Draws from `[1, map_width - 1] x [1, map_height - 1]` and rejects cells
/// covered by any segment of any snake in `snakes`. Gives up after
/// `max_attempts` draws, which only happens when the interior is (nearly)
/// saturated.
pub fn place_new_food<R: Rng + ?Sized>(
    rng: &mut R,
    map_width: i32,
    map_height: i32,
    snakes: &[&Snake],
    max_attempts: u32,
) -> Result<Position, GameError> {
    if map_width < 2 || map_height < 2 {
        return Err(GameError::ArenaTooSmall {
            width: map_width,
            height: map_height,
        });
    }

    for attempt in 1..=max_attempts {
        let pos = Position::new(
            rng.gen_range(1..map_width),
            rng.gen_range(1..map_height),
        );

        if !snakes.iter().any(|snake| snake.contains(pos)) {
            debug!(%pos, attempt, "placed food");
            return Ok(pos);
        }
    }

    warn!(max_attempts, "arena interior is saturated, giving up on food");
    Err(GameError::FoodPlacementExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Rgb};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn straight_snake(start: Position, direction: Direction, len: usize) -> Snake {
        let mut snake = Snake::new(start, direction, len, Rgb(0, 0, 0));
        for _ in 1..len {
            snake.move_forward();
        }
        snake
    }

    #[test]
    fn test_food_avoids_both_snakes() {
        let mut rng = StdRng::seed_from_u64(7);
        let player = straight_snake(Position::new(1, 1), Direction::Right, 8);
        let ai = straight_snake(Position::new(1, 2), Direction::Right, 8);

        for _ in 0..500 {
            let food = place_new_food(&mut rng, 21, 21, &[&player, &ai], 10_000).unwrap();
            assert!(!player.contains(food));
            assert!(!ai.contains(food));
            assert!((1..21).contains(&food.x));
            assert!((1..21).contains(&food.y));
        }
    }

    #[test]
    fn test_food_placement_terminates_quickly_on_open_arena() {
        // 20x20 interior, 16 occupied cells: 50 draws fail with probability 0.04^50
        let mut rng = StdRng::seed_from_u64(99);
        let player = straight_snake(Position::new(1, 1), Direction::Right, 8);
        let ai = straight_snake(Position::new(1, 20), Direction::Right, 8);

        for _ in 0..200 {
            assert!(place_new_food(&mut rng, 21, 21, &[&player, &ai], 50).is_ok());
        }
    }

    #[test]
    fn test_food_placement_fails_on_saturated_interior() {
        let mut rng = StdRng::seed_from_u64(1);
        // 3x1 interior of a 4x2 map, fully covered
        let snake = straight_snake(Position::new(1, 1), Direction::Right, 3);

        assert_eq!(
            place_new_food(&mut rng, 4, 2, &[&snake], 100),
            Err(GameError::FoodPlacementExhausted { attempts: 100 })
        );
    }

    #[test]
    fn test_food_placement_finds_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = straight_snake(Position::new(1, 1), Direction::Right, 2);

        let food = place_new_food(&mut rng, 4, 2, &[&snake], 10_000).unwrap();
        assert_eq!(food, Position::new(3, 1));
    }
}
