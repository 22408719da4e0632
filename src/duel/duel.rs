use super::*;
use crate::*;
use tokio::time::Instant;

/// One public challenge, from creation until it reaches a terminal phase.
///
/// Transitions are checked here; registry bookkeeping (one live duel per
/// player) lives in [`Registry`]. Every rejected transition leaves the duel
/// exactly as it was.
#[derive(Debug, Clone)]
pub struct Duel {
    challenger: Player,
    opponent: Option<Player>,
    challenger_choice: Option<Choice>,
    opponent_choice: Option<Choice>,
    channel: ChannelId,
    message: MessageId,
    phase: Phase,
    timer: Timer,
}

impl Duel {
    /// Opens a challenge and arms the join timer.
    pub fn new(challenger: Player, channel: ChannelId, message: MessageId, config: TimerConfig) -> Self {
        let mut timer = Timer::new(config);
        timer.start_join();
        Self {
            challenger,
            opponent: None,
            challenger_choice: None,
            opponent_choice: None,
            channel,
            message,
            phase: Phase::AwaitingOpponent,
            timer,
        }
    }
    pub fn challenger(&self) -> &Player {
        &self.challenger
    }
    pub fn opponent(&self) -> Option<&Player> {
        self.opponent.as_ref()
    }
    pub fn challenger_choice(&self) -> Option<Choice> {
        self.challenger_choice
    }
    pub fn opponent_choice(&self) -> Option<Choice> {
        self.opponent_choice
    }
    pub fn channel(&self) -> ChannelId {
        self.channel
    }
    pub fn message(&self) -> MessageId {
        self.message
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }
    pub fn is_participant(&self, id: PlayerId) -> bool {
        self.participants().iter().any(|p| p.id() == id)
    }
    pub fn participants(&self) -> Vec<&Player> {
        std::iter::once(&self.challenger)
            .chain(self.opponent.as_ref())
            .collect()
    }
    /// Participants who have not picked a shape yet.
    pub fn missing(&self) -> Vec<&Player> {
        let mut missing = Vec::new();
        if self.challenger_choice.is_none() {
            missing.push(&self.challenger);
        }
        if let Some(opponent) = self.opponent.as_ref() {
            if self.opponent_choice.is_none() {
                missing.push(opponent);
            }
        }
        missing
    }
    pub fn verdict(&self) -> Option<Verdict> {
        match (self.challenger_choice, self.opponent_choice) {
            (Some(a), Some(b)) => Some(Verdict::resolve(a, b)),
            _ => None,
        }
    }
}

/// Transitions.
impl Duel {
    /// AwaitingOpponent → InProgress. Swaps the join timer for the choice timer.
    pub fn join(&mut self, opponent: Player) -> Result<(), Rejection> {
        if self.phase != Phase::AwaitingOpponent {
            return Err(Rejection::OutOfPhase);
        }
        if opponent.id() == self.challenger.id() {
            return Err(Rejection::SelfJoin);
        }
        self.opponent = Some(opponent);
        self.phase = Phase::InProgress;
        self.timer.start_choice();
        Ok(())
    }
    /// AwaitingOpponent → Cancelled, challenger only.
    pub fn cancel(&mut self, actor: PlayerId) -> Result<(), Rejection> {
        if self.phase != Phase::AwaitingOpponent {
            return Err(Rejection::OutOfPhase);
        }
        if actor != self.challenger.id() {
            return Err(Rejection::NotChallenger);
        }
        self.phase = Phase::Cancelled;
        self.timer.clear();
        Ok(())
    }
    /// Records a choice; returns the verdict once both are in (InProgress → Resolved).
    pub fn choose(&mut self, actor: PlayerId, choice: Choice) -> Result<Option<Verdict>, Rejection> {
        if !self.is_participant(actor) {
            return Err(Rejection::NotParticipant);
        }
        if self.phase != Phase::InProgress {
            return Err(Rejection::OutOfPhase);
        }
        let slot = match actor == self.challenger.id() {
            true => &mut self.challenger_choice,
            false => &mut self.opponent_choice,
        };
        if slot.is_some() {
            return Err(Rejection::AlreadyChose);
        }
        *slot = Some(choice);
        match self.verdict() {
            Some(verdict) => {
                self.phase = Phase::Resolved;
                self.timer.clear();
                Ok(Some(verdict))
            }
            None => Ok(None),
        }
    }
    /// Applies the timeout for the current phase if its deadline has passed.
    /// Returns the terminal phase entered, if any.
    pub fn expire(&mut self, now: Instant) -> Option<Phase> {
        if !self.timer.expired_at(now) {
            return None;
        }
        let next = match self.phase {
            Phase::AwaitingOpponent => Phase::TimedOutNoJoin,
            Phase::InProgress if self.verdict().is_none() => Phase::TimedOutNoChoice,
            _ => return None,
        };
        self.phase = next;
        self.timer.clear();
        Some(next)
    }
}
