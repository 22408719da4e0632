use super::*;
use std::time::Duration;

/// Public state of a duel message, rendered by the presentation layer.
/// Every variant after the challenge removes the join and cancel buttons.
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    /// Opponent joined; both players are choosing.
    Started {
        challenger: Player,
        opponent: Player,
        window: Duration,
    },
    /// Challenger withdrew before anyone joined.
    Cancelled { challenger: Player },
    /// Nobody joined within the join window.
    Unanswered { challenger: Player },
    /// At least one participant did not choose in time.
    Unfinished { missing: Vec<Player> },
    /// Both chose; the duel is scored.
    Result {
        challenger: Player,
        opponent: Player,
        challenger_choice: Choice,
        opponent_choice: Choice,
        verdict: Verdict,
    },
}

impl View {
    /// Result view of a resolved duel.
    pub fn result(duel: &Duel) -> Option<Self> {
        Some(Self::Result {
            challenger: duel.challenger().clone(),
            opponent: duel.opponent()?.clone(),
            challenger_choice: duel.challenger_choice()?,
            opponent_choice: duel.opponent_choice()?,
            verdict: duel.verdict()?,
        })
    }
    /// Winner's player, if the view is a decisive result.
    pub fn winner(&self) -> Option<&Player> {
        match self {
            Self::Result {
                verdict: Verdict::Challenger,
                challenger,
                ..
            } => Some(challenger),
            Self::Result {
                verdict: Verdict::Opponent,
                opponent,
                ..
            } => Some(opponent),
            _ => None,
        }
    }
}

/// Private message to a single actor.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// The interaction was refused; nothing changed.
    Rejected(Rejection),
    /// Choice accepted.
    Chose(Choice),
    /// Something broke on our side.
    Failure,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(Rejection::SelfJoin) => {
                write!(f, "You can't join your own duel! Wait for someone else to accept.")
            }
            Self::Rejected(Rejection::AlreadyDueling) => {
                write!(f, "You're already in a rock-paper-scissors duel! Finish that one first.")
            }
            Self::Rejected(Rejection::NotChallenger) => {
                write!(f, "You didn't start this duel, so you can't cancel it!")
            }
            Self::Rejected(Rejection::NotParticipant) => {
                write!(f, "You're not allowed to choose in this duel!")
            }
            Self::Rejected(Rejection::AlreadyChose) => {
                write!(f, "You've already chosen! Please wait for your opponent.")
            }
            Self::Rejected(Rejection::Ended) => {
                write!(f, "This duel has already ended or been cancelled.")
            }
            Self::Rejected(Rejection::OutOfPhase) => {
                write!(f, "This duel isn't accepting that right now.")
            }
            Self::Chose(choice) => write!(f, "You chose: {} ✅", choice.emoji()),
            Self::Failure => write!(f, "Something went wrong while handling that. Please try again."),
        }
    }
}
