use std::time::{Duration, Instant};

use rand::Rng;

pub const LOADING_MESSAGES: [&str; 7] = [
    "Touring the country looking for festivals...",
    "Warming up the cotton candy machine...",
    "Grilling skewers at the night market...",
    "Printing festival pamphlets...",
    "Loading the fireworks...",
    "Turning up the speakers...",
    "Waiting in line at the food trucks...",
];

pub const ROTATION_INTERVAL: Duration = Duration::from_millis(2500);

/// Picks a message index different from `current` whenever there is a choice.
pub fn next_message_index<R: Rng + ?Sized>(current: usize, len: usize, rng: &mut R) -> usize {
    if len <= 1 {
        return 0;
    }
    let offset = rng.gen_range(1..len);
    (current + offset) % len
}

/// Rotating witty message shown while the festival feed loads.
#[derive(Debug, Clone)]
pub struct LoadingTicker {
    current: usize,
    last_rotation: Instant,
}

impl LoadingTicker {
    pub fn new(now: Instant) -> Self {
        Self {
            current: 0,
            last_rotation: now,
        }
    }

    pub fn message(&self) -> &'static str {
        LOADING_MESSAGES[self.current]
    }

    /// Rotates once the interval has elapsed. Returns whether the message changed.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        if now.saturating_duration_since(self.last_rotation) < ROTATION_INTERVAL {
            return false;
        }
        self.current = next_message_index(self.current, LOADING_MESSAGES.len(), rng);
        self.last_rotation = now;
        true
    }

    pub fn time_until_next(&self, now: Instant) -> Duration {
        ROTATION_INTERVAL.saturating_sub(now.saturating_duration_since(self.last_rotation))
    }
}
