use serde::Deserialize;
use serde::Serialize;

/// Hand shapes in Rock-Paper-Scissors.
///
/// Standard rules apply: R beats S, S beats P, P beats R.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// Rock — beats Scissors, loses to Paper.
    Rock,
    /// Paper — beats Rock, loses to Scissors.
    Paper,
    /// Scissors — beats Paper, loses to Rock.
    Scissors,
}

impl Choice {
    pub const ALL: [Self; 3] = [Self::Rock, Self::Paper, Self::Scissors];
    /// The shape this one defeats.
    pub fn prey(&self) -> Self {
        match self {
            Self::Rock => Self::Scissors,
            Self::Paper => Self::Rock,
            Self::Scissors => Self::Paper,
        }
    }
    pub fn beats(&self, other: &Self) -> bool {
        self.prey() == *other
    }
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Rock => "✊",
            Self::Paper => "✋",
            Self::Scissors => "✌️",
        }
    }
}

impl TryFrom<&str> for Choice {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "rock" | "r" => Ok(Self::Rock),
            "paper" | "p" => Ok(Self::Paper),
            "scissors" | "s" => Ok(Self::Scissors),
            _ => Err(anyhow::anyhow!("invalid choice: {}", s)),
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rock => write!(f, "rock"),
            Self::Paper => write!(f, "paper"),
            Self::Scissors => write!(f, "scissors"),
        }
    }
}
