use thiserror::Error;

/// Internal failures of the simulation. Round-ending collisions are not
/// errors; they are reported through [`Outcome`](super::Outcome).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no free cell for food after {attempts} attempts")]
    FoodPlacementExhausted { attempts: u32 },

    #[error("arena of {width}x{height} blocks is too small to play on")]
    ArenaTooSmall { width: i32, height: i32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
