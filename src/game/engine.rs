use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{
    ai::{AiSnake, Surroundings},
    config::GameConfig,
    direction::Direction,
    error::GameError,
    food,
    state::{GameState, Outcome, Position, Snake},
};

/// What happened during a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInfo {
    pub player_ate: bool,
    pub ai_ate: bool,
    /// Set if this tick ended the round
    pub outcome: Option<Outcome>,
}

/// Result of advancing the world by some number of ticks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceResult {
    /// Ticks actually simulated; fewer than requested if the round ended
    pub ticks_run: u32,
    /// Food items eaten by the player
    pub player_food: u32,
    /// Food items eaten by the computer snake
    pub ai_food: u32,
    pub terminated: bool,
    pub outcome: Option<Outcome>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food and AI choices are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh round: wall, both snakes and the first food
    pub fn reset(&mut self) -> Result<GameState, GameError> {
        self.config.validate()?;
        let arena = self.config.arena()?;

        let player = Snake::new(
            self.config.player_start(arena),
            Direction::Right,
            self.config.initial_length,
            self.config.player_color,
        );
        let ai = self.config.ai_enabled.then(|| {
            AiSnake::new(Snake::new(
                self.config.ai_start(arena),
                Direction::Left,
                self.config.initial_length,
                self.config.ai_color,
            ))
        });

        let mut state = GameState::new(player, ai, arena.width, arena.height);
        state.tick_length = self.config.tick_length();
        state.wall_color = self.config.wall_color;
        state.food_color = self.config.food_color;

        self.place_new_food(&mut state)?;

        info!(
            width = arena.width,
            height = arena.height,
            ai = self.config.ai_enabled,
            "new round"
        );
        Ok(state)
    }

    /// Simulate up to `steps` ticks.
    ///
    /// Stops at the first tick that ends the round. Eaten food is replaced
    /// once, after the last tick, and only while the round is still running;
    /// after an early stop the food stays absent. A finished round is left
    /// untouched.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        steps: u32,
    ) -> Result<AdvanceResult, GameError> {
        let mut result = AdvanceResult::default();

        if !state.is_running() {
            result.terminated = true;
            result.outcome = state.outcome;
            return Ok(result);
        }

        for _ in 0..steps {
            let tick = self.advance_one_tick(state);
            result.ticks_run += 1;
            result.player_food += u32::from(tick.player_ate);
            result.ai_food += u32::from(tick.ai_ate);

            if let Some(outcome) = tick.outcome {
                info!(
                    %outcome,
                    ticks = state.ticks,
                    length = state.player.len(),
                    "round over"
                );
                result.terminated = true;
                result.outcome = Some(outcome);
                return Ok(result);
            }
        }

        if state.food.is_none() {
            self.place_new_food(state)?;
        }

        Ok(result)
    }

    /// Run one tick: move the player, let the AI choose and move, then
    /// resolve collisions, eating and victory. Does not replace food.
    pub fn advance_one_tick(&mut self, state: &mut GameState) -> TickInfo {
        let mut info = TickInfo::default();
        state.ticks += 1;

        state.player.move_forward();

        let mut ai_stuck = false;
        if let Some(ai) = state.ai.as_mut() {
            let surroundings = Surroundings {
                wall: &state.wall,
                opponent: &state.player,
                food: state.food,
            };
            match ai.decide_new_direction(&surroundings, &mut self.rng) {
                Some(_) => ai.snake.move_forward(),
                None => ai_stuck = true,
            }
        }
        if ai_stuck {
            return Self::end_round(state, info, Outcome::AiStuck);
        }

        if let Some(outcome) = Self::check_player_collision(state) {
            return Self::end_round(state, info, outcome);
        }

        let growth = self.config.growth_per_food;
        if let Some(food) = state.food {
            if state.player.contains(food) {
                state.player.eat(growth);
                state.food = None;
                info.player_ate = true;
                debug!(%food, target = state.player.target_length, "player ate");
            }
        }
        if let (Some(food), Some(ai)) = (state.food, state.ai.as_mut()) {
            if ai.snake.contains(food) {
                ai.snake.eat(growth);
                state.food = None;
                info.ai_ate = true;
                debug!(%food, target = ai.snake.target_length, "ai ate");
            }
        }

        if state.player.target_length > self.config.victory_length {
            return Self::end_round(state, info, Outcome::Victory);
        }

        info
    }

    /// Put food on a random free interior cell
    pub fn place_new_food(&mut self, state: &mut GameState) -> Result<Position, GameError> {
        let mut snakes = vec![&state.player];
        if let Some(ai) = state.ai.as_ref() {
            snakes.push(&ai.snake);
        }

        let pos = food::place_new_food(
            &mut self.rng,
            state.map_width,
            state.map_height,
            &snakes,
            self.config.max_food_attempts,
        )?;
        state.food = Some(pos);
        Ok(pos)
    }

    /// Check the player's head against the wall, its own body and the AI.
    /// The AI needs no such check: it only ever moves onto free cells.
    fn check_player_collision(state: &GameState) -> Option<Outcome> {
        let head = state.player.head();

        if state.wall.contains(head) {
            return Some(Outcome::WallCollision);
        }
        if state.player.collides_with_body(head) {
            return Some(Outcome::SelfCollision);
        }
        if state.ai.as_ref().is_some_and(|ai| ai.snake.contains(head)) {
            return Some(Outcome::OpponentCollision);
        }
        None
    }

    fn end_round(state: &mut GameState, mut info: TickInfo, outcome: Outcome) -> TickInfo {
        state.finish(outcome);
        info.outcome = Some(outcome);
        info
    }
}
