use crate::*;

/// A participant as seen at the moment they interacted.
/// Names are refreshed on every interaction, so they may lag behind the platform.
/// The ticket names that interaction; private replies to this snapshot go
/// through it and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    id: PlayerId,
    name: String,
    ticket: Ticket,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ticket: 0,
        }
    }
    /// Same player, seen through interaction `ticket`.
    pub fn via(mut self, ticket: Ticket) -> Self {
        self.ticket = ticket;
        self
    }
    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
    /// Display name, or a placeholder when the platform gave us none.
    pub fn label(&self) -> &str {
        match self.name.trim() {
            "" => UNKNOWN_PLAYER,
            _ => &self.name,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.id)
    }
}
