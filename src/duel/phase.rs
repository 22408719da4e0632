/// Lifecycle of a single duel.
///
/// ```text
/// AwaitingOpponent ──join──▶ InProgress ──both chose──▶ Resolved
///        │                        │
///        ├──cancel──▶ Cancelled    └──timer──▶ TimedOutNoChoice
///        └──timer───▶ TimedOutNoJoin
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingOpponent,
    InProgress,
    Resolved,
    Cancelled,
    TimedOutNoJoin,
    TimedOutNoChoice,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingOpponent => write!(f, "awaiting opponent"),
            Self::InProgress => write!(f, "in progress"),
            Self::Resolved => write!(f, "resolved"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::TimedOutNoJoin => write!(f, "timed out (no join)"),
            Self::TimedOutNoChoice => write!(f, "timed out (no choice)"),
        }
    }
}
