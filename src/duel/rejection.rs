/// Reasons an interaction is refused without touching duel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Challenger pressed join on their own duel.
    SelfJoin,
    /// Actor is already a participant in some live duel.
    AlreadyDueling,
    /// Someone other than the challenger tried to cancel.
    NotChallenger,
    /// Someone outside the duel tried to pick a shape.
    NotParticipant,
    /// Participant tried to change a recorded choice.
    AlreadyChose,
    /// Event arrived for a duel that is over or never existed.
    Ended,
    /// Event does not apply to the duel's current phase.
    OutOfPhase,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfJoin => write!(f, "cannot join your own duel"),
            Self::AlreadyDueling => write!(f, "already in another duel"),
            Self::NotChallenger => write!(f, "only the challenger may cancel"),
            Self::NotParticipant => write!(f, "not a participant of this duel"),
            Self::AlreadyChose => write!(f, "choice already recorded"),
            Self::Ended => write!(f, "duel has ended"),
            Self::OutOfPhase => write!(f, "duel is not accepting that right now"),
        }
    }
}

impl std::error::Error for Rejection {}
