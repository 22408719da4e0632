use crate::MessageId;
use crate::duel::Choice;

/// Namespace shared by every component id this bot emits.
pub const PREFIX: &str = "rps_";
/// Custom id of the join button on a public challenge.
pub const JOIN: &str = const_format::concatcp!(PREFIX, "join");
/// Custom id of the cancel button on a public challenge.
pub const CANCEL: &str = const_format::concatcp!(PREFIX, "cancel");
/// Prefix of the choice buttons in a private prompt.
/// Full form is `rps_choice_<shape>_<message>`.
pub const CHOICE: &str = const_format::concatcp!(PREFIX, "choice_");

/// Errors that can occur while decoding a component id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    Unknown(String),
    Malformed(String),
}

impl std::fmt::Display for ControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(s) => write!(f, "unknown component: {}", s),
            Self::Malformed(s) => write!(f, "malformed component: {}", s),
        }
    }
}

impl std::error::Error for ControlError {}

/// A button press, decoded from its custom id.
/// Join and cancel are identified by the message they sit on; choice buttons
/// live on a private prompt, so they carry the duel's message themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Join,
    Cancel,
    Choice(Choice, MessageId),
}

impl Control {
    pub fn encode(&self) -> String {
        match self {
            Self::Join => JOIN.to_string(),
            Self::Cancel => CANCEL.to_string(),
            Self::Choice(choice, message) => format!("{}{}_{}", CHOICE, choice, message),
        }
    }
}

impl TryFrom<&str> for Control {
    type Error = ControlError;
    fn try_from(id: &str) -> Result<Self, Self::Error> {
        match id {
            JOIN => Ok(Self::Join),
            CANCEL => Ok(Self::Cancel),
            _ => {
                let rest = id
                    .strip_prefix(CHOICE)
                    .ok_or_else(|| ControlError::Unknown(id.to_string()))?;
                let (shape, message) = rest
                    .split_once('_')
                    .ok_or_else(|| ControlError::Malformed(id.to_string()))?;
                let choice = Choice::try_from(shape).map_err(|_| ControlError::Malformed(id.to_string()))?;
                let message = message
                    .parse::<MessageId>()
                    .map_err(|_| ControlError::Malformed(id.to_string()))?;
                Ok(Self::Choice(choice, message))
            }
        }
    }
}
