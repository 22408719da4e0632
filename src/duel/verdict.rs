use super::*;

/// Result of two simultaneous choices, from the challenger's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Draw,
    Challenger,
    Opponent,
}

impl Verdict {
    /// Pairwise resolution; equal shapes draw.
    pub fn resolve(challenger: Choice, opponent: Choice) -> Self {
        match (challenger, opponent) {
            (a, b) if a == b => Self::Draw,
            (a, b) if a.beats(&b) => Self::Challenger,
            _ => Self::Opponent,
        }
    }
}
