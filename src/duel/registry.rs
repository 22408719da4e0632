use super::*;
use crate::*;
use std::collections::HashMap;
use tokio::time::Instant;

/// Outcome of an accepted choice.
#[derive(Debug)]
pub enum Progress {
    /// Recorded; still waiting on the other participant.
    Waiting,
    /// Both shapes are in. The duel has been released from the registry.
    Finished(Duel),
}

/// Process-wide bookkeeping of live duels.
///
/// - `duels` maps a public message to its duel
/// - `participation` maps a player to the one duel they are in
///
/// A player key exists in `participation` iff that player is the challenger or
/// opponent of the duel stored under the mapped message. Terminal duels are
/// removed immediately, so anything still stored here is live.
#[derive(Debug, Default)]
pub struct Registry {
    duels: HashMap<MessageId, Duel>,
    participation: HashMap<PlayerId, MessageId>,
}

impl Registry {
    pub fn get(&self, message: MessageId) -> Option<&Duel> {
        self.duels.get(&message)
    }
    /// The live duel a player is currently part of.
    pub fn active_for(&self, player: PlayerId) -> Option<MessageId> {
        self.participation.get(&player).copied()
    }
    pub fn len(&self) -> usize {
        self.duels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.duels.is_empty()
    }
    /// Fails if the player already holds a participation slot.
    pub fn vacant(&self, player: PlayerId) -> Result<(), Rejection> {
        match self.participation.contains_key(&player) {
            true => Err(Rejection::AlreadyDueling),
            false => Ok(()),
        }
    }
    /// Earliest deadline among live duels.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.duels.values().filter_map(Duel::deadline).min()
    }
}

/// Transitions.
impl Registry {
    /// Registers a freshly created duel and its challenger.
    pub fn open(&mut self, duel: Duel) -> Result<(), Rejection> {
        self.vacant(duel.challenger().id())?;
        self.participation
            .insert(duel.challenger().id(), duel.message());
        self.duels.insert(duel.message(), duel);
        Ok(())
    }
    pub fn join(&mut self, message: MessageId, opponent: Player) -> Result<&Duel, Rejection> {
        let duel = self.duels.get(&message).ok_or(Rejection::Ended)?;
        if duel.phase() != Phase::AwaitingOpponent {
            return Err(Rejection::OutOfPhase);
        }
        if duel.challenger().id() == opponent.id() {
            return Err(Rejection::SelfJoin);
        }
        self.vacant(opponent.id())?;
        let id = opponent.id();
        let duel = self.duels.get_mut(&message).ok_or(Rejection::Ended)?;
        duel.join(opponent)?;
        self.participation.insert(id, message);
        Ok(&*duel)
    }
    /// Cancels and releases the duel.
    pub fn cancel(&mut self, message: MessageId, actor: PlayerId) -> Result<Duel, Rejection> {
        self.duels
            .get_mut(&message)
            .ok_or(Rejection::Ended)?
            .cancel(actor)?;
        self.release(message).ok_or(Rejection::Ended)
    }
    /// Records a choice, releasing the duel once it resolves.
    pub fn choose(
        &mut self,
        message: MessageId,
        actor: PlayerId,
        choice: Choice,
    ) -> Result<Progress, Rejection> {
        let verdict = self
            .duels
            .get_mut(&message)
            .ok_or(Rejection::Ended)?
            .choose(actor, choice)?;
        match verdict {
            None => Ok(Progress::Waiting),
            Some(_) => self
                .release(message)
                .map(Progress::Finished)
                .ok_or(Rejection::Ended),
        }
    }
    /// Applies every timeout due at `now` and releases the affected duels.
    pub fn expire(&mut self, now: Instant) -> Vec<Duel> {
        let expired = self
            .duels
            .iter_mut()
            .filter_map(|(id, duel)| duel.expire(now).map(|_| *id))
            .collect::<Vec<_>>();
        expired
            .into_iter()
            .filter_map(|id| self.release(id))
            .collect()
    }
    /// Removes a duel and every participation slot pointing at it.
    pub fn release(&mut self, message: MessageId) -> Option<Duel> {
        let duel = self.duels.remove(&message)?;
        for player in duel.participants() {
            if self.participation.get(&player.id()) == Some(&message) {
                self.participation.remove(&player.id());
            }
        }
        Some(duel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn alice() -> Player {
        Player::new(1, "alice")
    }
    fn bob() -> Player {
        Player::new(2, "bob")
    }
    fn carol() -> Player {
        Player::new(3, "carol")
    }
    fn duel(challenger: Player, message: MessageId) -> Duel {
        Duel::new(challenger, 10, message, TimerConfig::default())
    }
    /// Every participation slot points at a live duel containing that player, and vice versa.
    fn consistent(registry: &Registry) -> bool {
        let forward = registry.participation.iter().all(|(player, message)| {
            registry
                .duels
                .get(message)
                .map(|d| d.is_participant(*player))
                .unwrap_or(false)
        });
        let backward = registry.duels.iter().all(|(message, d)| {
            d.participants()
                .iter()
                .all(|p| registry.participation.get(&p.id()) == Some(message))
        });
        forward && backward
    }

    #[test]
    fn open_registers_challenger() {
        let mut registry = Registry::default();
        registry.open(duel(alice(), 100)).unwrap();
        assert_eq!(registry.active_for(1), Some(100));
        assert_eq!(registry.len(), 1);
        assert!(consistent(&registry));
    }
    #[test]
    fn participant_cannot_open_second_duel() {
        let mut registry = Registry::default();
        registry.open(duel(alice(), 100)).unwrap();
        assert_eq!(registry.open(duel(alice(), 101)), Err(Rejection::AlreadyDueling));
        assert!(registry.get(101).is_none());
        assert!(consistent(&registry));
    }
    #[test]
    fn participant_cannot_join_second_duel() {
        let mut registry = Registry::default();
        registry.open(duel(alice(), 100)).unwrap();
        registry.open(duel(bob(), 200)).unwrap();
        assert_eq!(registry.join(200, alice()).err(), Some(Rejection::AlreadyDueling));
        assert_eq!(registry.get(200).map(Duel::phase), Some(Phase::AwaitingOpponent));
        assert_eq!(registry.active_for(1), Some(100));
        assert!(consistent(&registry));
    }
    #[test]
    fn self_join_reports_self_join() {
        let mut registry = Registry::default();
        registry.open(duel(alice(), 100)).unwrap();
        assert_eq!(registry.join(100, alice()).err(), Some(Rejection::SelfJoin));
        assert_eq!(registry.get(100).map(Duel::phase), Some(Phase::AwaitingOpponent));
    }
    #[test]
    fn join_registers_opponent() {
        let mut registry = Registry::default();
        registry.open(duel(alice(), 100)).unwrap();
        let phase = registry.join(100, bob()).map(Duel::phase);
        assert_eq!(phase, Ok(Phase::InProgress));
        assert_eq!(registry.active_for(2), Some(100));
        assert_eq!(registry.join(100, carol()).err(), Some(Rejection::OutOfPhase));
        assert_eq!(registry.active_for(3), None);
        assert!(consistent(&registry));
    }
    #[test]
    fn cancel_releases_challenger() {
        let mut registry = Registry::default();
        registry.open(duel(alice(), 100)).unwrap();
        assert_eq!(registry.cancel(100, 2).err(), Some(Rejection::NotChallenger));
        assert!(registry.get(100).is_some());
        let cancelled = registry.cancel(100, 1).unwrap();
        assert_eq!(cancelled.phase(), Phase::Cancelled);
        assert!(registry.is_empty());
        assert_eq!(registry.active_for(1), None);
        assert!(registry.open(duel(alice(), 101)).is_ok());
    }
    #[test]
    fn resolution_releases_both() {
        let mut registry = Registry::default();
        registry.open(duel(alice(), 100)).unwrap();
        registry.join(100, bob()).unwrap();
        assert!(matches!(registry.choose(100, 1, Choice::Rock), Ok(Progress::Waiting)));
        assert!(matches!(registry.choose(100, 3, Choice::Rock), Err(Rejection::NotParticipant)));
        match registry.choose(100, 2, Choice::Scissors) {
            Ok(Progress::Finished(d)) => assert_eq!(d.verdict(), Some(Verdict::Challenger)),
            other => panic!("expected finished duel, got {:?}", other),
        }
        assert!(registry.is_empty());
        assert_eq!(registry.active_for(1), None);
        assert_eq!(registry.active_for(2), None);
    }
    #[test]
    fn events_for_released_duels_are_ended() {
        let mut registry = Registry::default();
        assert_eq!(registry.join(100, bob()).err(), Some(Rejection::Ended));
        assert_eq!(registry.cancel(100, 1).err(), Some(Rejection::Ended));
        assert!(matches!(registry.choose(100, 1, Choice::Rock), Err(Rejection::Ended)));
    }
    #[test]
    fn expiry_releases_only_due_duels() {
        let mut registry = Registry::default();
        registry.open(duel(alice(), 100)).unwrap();
        registry.open(duel(bob(), 200)).unwrap();
        registry.join(200, carol()).unwrap();
        assert!(registry.expire(Instant::now()).is_empty());
        let later = Instant::now() + Duration::from_secs(JOIN_TIMEOUT.max(CHOICE_TIMEOUT) + 1);
        let mut expired = registry.expire(later);
        expired.sort_by_key(Duel::message);
        assert_eq!(expired.len(), 2);
        assert_eq!(expired[0].phase(), Phase::TimedOutNoJoin);
        assert_eq!(expired[1].phase(), Phase::TimedOutNoChoice);
        assert!(registry.is_empty());
        assert!(registry.next_deadline().is_none());
        assert!(consistent(&registry));
    }
}
