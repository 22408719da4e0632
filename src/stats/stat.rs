use super::*;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime counters for one player.
/// Draws raise `played` only, so `played - wins - losses` is the draw count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub username: String,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerStat {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
    pub fn tally(&mut self, outcome: Outcome) {
        self.played += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Played => {}
        }
    }
    pub fn draws(&self) -> u32 {
        self.played.saturating_sub(self.wins + self.losses)
    }
    /// Wins as a percentage of games played.
    pub fn win_rate(&self) -> f64 {
        match self.played {
            0 => 0.0,
            n => self.wins as f64 / n as f64 * 100.0,
        }
    }
}
