use crate::duel::*;
use crate::*;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// One side of a finished match as it was at completion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contestant {
    pub id: String,
    pub username: String,
    pub choice: Choice,
}

/// Immutable entry of the match history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub timestamp: DateTime<Utc>,
    pub game_type: String,
    pub player1: Contestant,
    pub player2: Contestant,
    pub result: String,
    pub winner_id: Option<String>,
}

impl MatchRecord {
    /// Builds the history entry for a resolved duel.
    /// Returns None unless both participants have chosen.
    pub fn from_duel(duel: &Duel) -> Option<Self> {
        let challenger = duel.challenger();
        let opponent = duel.opponent()?;
        let verdict = duel.verdict()?;
        let winner = match verdict {
            Verdict::Draw => None,
            Verdict::Challenger => Some(challenger),
            Verdict::Opponent => Some(opponent),
        };
        Some(Self {
            timestamp: Utc::now(),
            game_type: GAME_TYPE.to_string(),
            player1: Contestant {
                id: challenger.id().to_string(),
                username: challenger.label().to_string(),
                choice: duel.challenger_choice()?,
            },
            player2: Contestant {
                id: opponent.id().to_string(),
                username: opponent.label().to_string(),
                choice: duel.opponent_choice()?,
            },
            result: match winner {
                Some(p) => format!("{} wins!", p.label()),
                None => "Draw!".to_string(),
            },
            winner_id: winner.map(|p| p.id().to_string()),
        })
    }
}
