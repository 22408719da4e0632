use crate::duel::Verdict;

/// How a finished match counts for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    /// Counted as played without a win or a loss (draws).
    Played,
}

impl Outcome {
    /// Outcomes for (challenger, opponent).
    pub fn split(verdict: Verdict) -> (Self, Self) {
        match verdict {
            Verdict::Draw => (Self::Played, Self::Played),
            Verdict::Challenger => (Self::Win, Self::Loss),
            Verdict::Opponent => (Self::Loss, Self::Win),
        }
    }
}
