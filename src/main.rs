use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use snakeotron::game::{GameConfig, GameEngine};
use snakeotron::modes::PlayMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snakeotron")]
#[command(version, about = "Snake against a greedy computer rival")]
struct Cli {
    /// JSON file with game settings; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drawing area width in pixels
    #[arg(long)]
    canvas_width: Option<u32>,

    /// Drawing area height in pixels
    #[arg(long)]
    canvas_height: Option<u32>,

    /// Pixels per block
    #[arg(long)]
    block_size: Option<u32>,

    /// Tick length in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Play without the computer snake
    #[arg(long)]
    no_ai: bool,

    /// Seed for food placement and AI choices
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.canvas_width {
            config.canvas_width = width;
        }
        if let Some(height) = self.canvas_height {
            config.canvas_height = height;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_length_ms = tick_ms;
        }
        if self.no_ai {
            config.ai_enabled = false;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

/// Send tracing output to a file; the terminal belongs to the game screen
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut play_mode = PlayMode::new(engine)?;
    play_mode.run().await?;

    let state = play_mode.state();
    if state.is_running() {
        println!("Quit after {} ticks, length {}", state.ticks, state.score());
    } else {
        println!("Round over: {} (score {})", state.info(), state.score());
    }
    let metrics = play_mode.metrics();
    println!(
        "Games played: {}, won: {}, best score: {}",
        metrics.games_played, metrics.wins, metrics.high_score
    );

    Ok(())
}
