use super::*;
use crate::*;
use tokio::sync::mpsc::UnboundedSender;

/// Cloneable sending side of a running [`Arena`].
/// Every interaction on every duel goes through one of these.
#[derive(Clone)]
pub struct ArenaHandle {
    tx: UnboundedSender<Command>,
}

impl ArenaHandle {
    pub fn new(tx: UnboundedSender<Command>) -> Self {
        Self { tx }
    }
    /// Fails only once the arena task is gone.
    pub fn send(&self, command: Command) -> anyhow::Result<()> {
        self.tx
            .send(command)
            .map_err(|e| anyhow::anyhow!("arena stopped, dropped {}", e.0))
    }
    pub fn challenge(&self, challenger: Player, channel: ChannelId) -> anyhow::Result<()> {
        self.send(Command::Challenge {
            challenger,
            channel,
        })
    }
    pub fn submit(&self, event: Event) -> anyhow::Result<()> {
        self.send(Command::Event(event))
    }
}
