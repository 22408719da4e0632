use crate::*;
use std::time::Duration;
use tokio::time::Instant;

/// Configuration for duel timeouts.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    pub join: Duration,
    pub choice: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            join: Duration::from_secs(JOIN_TIMEOUT),
            choice: Duration::from_secs(CHOICE_TIMEOUT),
        }
    }
}

/// Deadline tracking for the join and choice phases of one duel.
#[derive(Debug, Clone)]
pub struct Timer {
    config: TimerConfig,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            deadline: None,
        }
    }
    pub fn start_join(&mut self) {
        self.deadline = Some(Instant::now() + self.config.join);
    }
    pub fn start_choice(&mut self) {
        self.deadline = Some(Instant::now() + self.config.choice);
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
    pub fn expired_at(&self, now: Instant) -> bool {
        self.deadline.map(|d| now >= d).unwrap_or(false)
    }
}
