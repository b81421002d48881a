use std::time::{Duration, Instant};

/// Fixed-timestep clock.
///
/// Converts elapsed wall-clock time into whole simulation ticks. The part of a
/// tick that has not fully elapsed is carried over to the next call, so the
/// simulation keeps pace with real time regardless of frame timing.
#[derive(Debug, Clone)]
pub struct TickClock {
    tick_length: Duration,
    last_update: Instant,
    paused: bool,
}

impl TickClock {
    pub fn new(tick_length: Duration, now: Instant) -> Self {
        Self {
            tick_length,
            last_update: now,
            paused: false,
        }
    }

    pub fn tick_length(&self) -> Duration {
        self.tick_length
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of whole ticks elapsed since the last consumed tick boundary
    pub fn elapsed_ticks(&mut self, now: Instant) -> u32 {
        if self.paused || self.tick_length.is_zero() {
            return 0;
        }

        let elapsed = now.saturating_duration_since(self.last_update);
        let steps = (elapsed.as_nanos() / self.tick_length.as_nanos()) as u32;
        self.last_update += self.tick_length * steps;
        steps
    }

    /// Time left until the next tick boundary. A paused clock reports a full tick.
    pub fn until_next_tick(&self, now: Instant) -> Duration {
        if self.paused {
            return self.tick_length;
        }
        let elapsed = now.saturating_duration_since(self.last_update);
        self.tick_length.saturating_sub(elapsed)
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume counting from `now`; time spent paused is dropped
    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.last_update = now;
    }
}
