use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::arena::ArenaSize;
use super::error::GameError;
use super::state::{Position, Rgb};

/// Configuration for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Drawing area width in pixels
    pub canvas_width: u32,
    /// Drawing area height in pixels
    pub canvas_height: u32,
    /// Size of one block in pixels
    pub block_size: u32,
    /// Length of one tick in milliseconds
    pub tick_length_ms: u64,

    /// Target length a fresh snake grows towards
    pub initial_length: usize,
    /// Blocks added to the target length per food eaten
    pub growth_per_food: usize,
    /// The player wins once its target length exceeds this
    pub victory_length: usize,
    /// Draws before food placement gives up
    pub max_food_attempts: u32,

    /// Whether the computer snake takes part
    pub ai_enabled: bool,

    pub player_color: Rgb,
    pub ai_color: Rgb,
    pub wall_color: Rgb,
    pub food_color: Rgb,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Nokia C5 "large" canvas
            canvas_width: 240,
            canvas_height: 293,
            block_size: 8,
            tick_length_ms: 300,
            initial_length: 8,
            growth_per_food: 3,
            victory_length: 38,
            max_food_attempts: 10_000,
            ai_enabled: true,
            player_color: Rgb(0, 0, 200),
            ai_color: Rgb(200, 120, 0),
            wall_color: Rgb(116, 0, 0),
            food_color: Rgb(59, 255, 0),
        }
    }
}

impl GameConfig {
    /// Create a new configuration for a canvas of the given pixel size
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Default::default()
        }
    }

    /// A 10x10 block map, used by tests
    pub fn small() -> Self {
        Self::new(88, 88)
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_length(&self) -> Duration {
        Duration::from_millis(self.tick_length_ms)
    }

    /// Arena dimensions derived from the canvas
    pub fn arena(&self) -> Result<ArenaSize, GameError> {
        ArenaSize::from_canvas(self.canvas_width, self.canvas_height, self.block_size)
    }

    /// Where the player starts: a third of the way across, mid height
    pub fn player_start(&self, arena: ArenaSize) -> Position {
        Position::new((arena.width / 3).max(1), (arena.height / 2).max(1))
    }

    /// Where the computer snake starts: two thirds across, a third down
    pub fn ai_start(&self, arena: ArenaSize) -> Position {
        Position::new(
            (arena.width * 2 / 3).min(arena.width - 1),
            (arena.height / 3).max(1),
        )
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.arena()?;
        if self.tick_length_ms == 0 {
            return Err(GameError::InvalidConfig("tick length must be positive".into()));
        }
        if self.initial_length == 0 {
            return Err(GameError::InvalidConfig("initial length must be positive".into()));
        }
        if self.victory_length < self.initial_length {
            return Err(GameError::InvalidConfig(format!(
                "victory length {} is below the initial length {}",
                self.victory_length, self.initial_length
            )));
        }
        if self.max_food_attempts == 0 {
            return Err(GameError::InvalidConfig("food attempts must be positive".into()));
        }
        Ok(())
    }
}
