use std::time::{Duration, Instant};

use crate::game::Outcome;

/// Per-session bookkeeping shown alongside the arena
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub wins: u32,
    pub last_outcome: Option<Outcome>,
    paused_at: Option<Instant>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            wins: 0,
            last_outcome: None,
            paused_at: None,
        }
    }

    pub fn update(&mut self) {
        if self.paused_at.is_none() {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.paused_at = None;
    }

    pub fn on_pause(&mut self) {
        self.paused_at.get_or_insert_with(Instant::now);
    }

    /// Shift the start time so the paused span does not count
    pub fn on_resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.start_time += paused_at.elapsed();
        }
    }

    pub fn on_game_over(&mut self, outcome: Outcome, final_score: u32) {
        self.games_played += 1;
        if outcome.player_survived() {
            self.wins += 1;
        }
        if final_score > self.high_score {
            self.high_score = final_score;
        }
        self.last_outcome = Some(outcome);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
