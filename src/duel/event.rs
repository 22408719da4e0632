use super::*;
use crate::*;

/// A button press on a duel, delivered by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Someone wants to take up the challenge.
    Join { actor: Player, message: MessageId },
    /// Someone wants to withdraw the challenge.
    Cancel { actor: Player, message: MessageId },
    /// A participant picked a shape.
    Choice {
        actor: Player,
        message: MessageId,
        choice: Choice,
    },
}

/// Everything the arena loop consumes.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// A player issued `/rps` in a channel.
    Challenge { challenger: Player, channel: ChannelId },
    /// A button press on an existing duel.
    Event(Event),
}

impl From<Event> for Command {
    fn from(event: Event) -> Self {
        Command::Event(event)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::Join { actor, message } => write!(f, "{} joins #{}", actor, message),
            Event::Cancel { actor, message } => write!(f, "{} cancels #{}", actor, message),
            Event::Choice { actor, message, .. } => write!(f, "{} chooses in #{}", actor, message),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Command::Challenge { challenger, channel } => {
                write!(f, "{} challenges in channel {}", challenger, channel)
            }
            Command::Event(event) => write!(f, "{}", event),
        }
    }
}
