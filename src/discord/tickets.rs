use crate::Ticket;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// How long the platform honours an interaction token.
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(15 * 60);

/// Interactions waiting for the arena to answer them, keyed by ticket.
///
/// Entries leave when they are taken, or once their token can no longer be
/// used. Every insert sweeps the expired ones.
#[derive(Debug)]
pub struct Tickets<T> {
    entries: HashMap<Ticket, (Instant, T)>,
    lifetime: Duration,
}

impl<T> Default for Tickets<T> {
    fn default() -> Self {
        Self::new(TOKEN_LIFETIME)
    }
}

impl<T> Tickets<T> {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lifetime,
        }
    }
    pub fn insert(&mut self, ticket: Ticket, value: T) {
        self.sweep(Instant::now());
        self.entries.insert(ticket, (Instant::now(), value));
    }
    /// Retires the interaction.
    pub fn take(&mut self, ticket: Ticket) -> Option<T> {
        self.entries
            .remove(&ticket)
            .filter(|(at, _)| at.elapsed() < self.lifetime)
            .map(|(_, value)| value)
    }
    pub fn forget(&mut self, ticket: Ticket) {
        self.entries.remove(&ticket);
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    fn sweep(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.entries
            .retain(|_, (at, _)| now.saturating_duration_since(*at) < lifetime);
    }
}

impl<T> Tickets<T>
where
    T: Clone,
{
    /// Borrows the interaction without retiring it.
    pub fn peek(&self, ticket: Ticket) -> Option<T> {
        self.entries
            .get(&ticket)
            .filter(|(at, _)| at.elapsed() < self.lifetime)
            .map(|(_, value)| value.clone())
    }
}
