use super::*;
use crate::stats::Ledger;
use crate::store::Repository;
use crate::*;
use tokio::sync::mpsc::*;
use tokio::time::Instant;

/// Owns every live duel and serializes all interactions on them.
///
/// A single task consumes [`Command`]s and wakes up for the earliest duel
/// deadline, so a join, a choice and a timeout on the same duel can never
/// interleave. Registry state is settled before any rendering is awaited;
/// presentation failures are logged and otherwise ignored.
pub struct Arena<P, R> {
    registry: Registry,
    presenter: P,
    ledger: Ledger<R>,
    config: TimerConfig,
}

impl<P, R> Arena<P, R>
where
    P: Presenter + 'static,
    R: Repository + 'static,
{
    pub fn new(presenter: P, ledger: Ledger<R>, config: TimerConfig) -> Self {
        Self {
            registry: Registry::default(),
            presenter,
            ledger,
            config,
        }
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn presenter(&self) -> &P {
        &self.presenter
    }
    pub fn ledger(&self) -> &Ledger<R> {
        &self.ledger
    }

    /// Moves the arena onto its own task and returns the sending half.
    pub fn spawn(self) -> ArenaHandle {
        let (tx, rx) = unbounded_channel();
        tokio::spawn(self.run(rx));
        ArenaHandle::new(tx)
    }
    /// Processes commands and deadlines until every handle is dropped.
    pub async fn run(mut self, mut commands: UnboundedReceiver<Command>) {
        log::info!("[arena] accepting duels");
        loop {
            let deadline = self.registry.next_deadline();
            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(command) => self.dispatch(command).await,
                    None => break,
                },
                _ = alarm(deadline) => self.expire(Instant::now()).await,
            }
        }
        log::info!("[arena] shutting down with {} live duels", self.registry.len());
    }
    /// Handles one command. Overdue timeouts are applied first, so an
    /// interaction arriving after a deadline finds the duel already gone.
    pub async fn dispatch(&mut self, command: Command) {
        self.expire(Instant::now()).await;
        log::debug!("[arena] {}", command);
        match command {
            Command::Challenge { challenger, channel } => self.challenge(challenger, channel).await,
            Command::Event(Event::Join { actor, message }) => self.join(actor, message).await,
            Command::Event(Event::Cancel { actor, message }) => self.cancel(actor, message).await,
            Command::Event(Event::Choice {
                actor,
                message,
                choice,
            }) => self.choose(actor, message, choice).await,
        }
    }
}

/// Transitions.
impl<P, R> Arena<P, R>
where
    P: Presenter + 'static,
    R: Repository + 'static,
{
    pub async fn challenge(&mut self, challenger: Player, channel: ChannelId) {
        if let Err(rejection) = self.registry.vacant(challenger.id()) {
            return self.reject(&challenger, rejection).await;
        }
        let window = self.config.join;
        let message = match self
            .presenter
            .render_challenge(channel, &challenger, window)
            .await
        {
            Ok(message) => message,
            Err(e) => {
                log::error!("[arena] failed to post challenge by {}: {}", challenger, e);
                return self.notify(&challenger, Notice::Failure).await;
            }
        };
        let duel = Duel::new(challenger.clone(), channel, message, self.config);
        match self.registry.open(duel) {
            Ok(()) => log::info!("[arena {}] opened by {}", message, challenger),
            Err(rejection) => self.reject(&challenger, rejection).await,
        }
    }
    pub async fn join(&mut self, actor: Player, message: MessageId) {
        let joined = self
            .registry
            .join(message, actor.clone())
            .map(Duel::clone);
        let duel = match joined {
            Ok(duel) => duel,
            Err(rejection) => return self.reject(&actor, rejection).await,
        };
        log::info!("[arena {}] {} joined", message, actor);
        let window = self.config.choice;
        let view = View::Started {
            challenger: duel.challenger().clone(),
            opponent: actor.clone(),
            window,
        };
        self.publish(&duel, &view).await;
        let (a, b) = futures::join!(
            self.presenter.prompt_choice(duel.challenger(), message, window),
            self.presenter.prompt_choice(&actor, message, window),
        );
        for (player, result) in [(duel.challenger(), a), (&actor, b)] {
            if let Err(e) = result {
                log::warn!("[arena {}] failed to prompt {}: {}", message, player, e);
            }
        }
    }
    pub async fn cancel(&mut self, actor: Player, message: MessageId) {
        match self.registry.cancel(message, actor.id()) {
            Err(rejection) => self.reject(&actor, rejection).await,
            Ok(duel) => {
                log::info!("[arena {}] cancelled by {}", message, actor);
                let view = View::Cancelled {
                    challenger: duel.challenger().clone(),
                };
                self.publish(&duel, &view).await;
            }
        }
    }
    pub async fn choose(&mut self, actor: Player, message: MessageId, choice: Choice) {
        match self.registry.choose(message, actor.id(), choice) {
            Err(rejection) => self.reject(&actor, rejection).await,
            Ok(progress) => {
                log::debug!("[arena {}] {} chose", message, actor);
                self.notify(&actor, Notice::Chose(choice)).await;
                if let Progress::Finished(duel) = progress {
                    self.resolve(duel).await;
                }
            }
        }
    }
    /// Applies every timeout due at `now`.
    pub async fn expire(&mut self, now: Instant) {
        for duel in self.registry.expire(now) {
            match duel.phase() {
                Phase::TimedOutNoJoin => {
                    log::info!("[arena {}] nobody joined", duel.message());
                    let view = View::Unanswered {
                        challenger: duel.challenger().clone(),
                    };
                    self.publish(&duel, &view).await;
                }
                Phase::TimedOutNoChoice => {
                    let missing = duel.missing().into_iter().cloned().collect::<Vec<_>>();
                    log::info!(
                        "[arena {}] timed out waiting on {} player(s)",
                        duel.message(),
                        missing.len()
                    );
                    self.publish(&duel, &View::Unfinished { missing }).await;
                    for player in duel.participants() {
                        if let Err(e) = self.presenter.retract_prompts(player, duel.message()).await {
                            log::debug!("[arena {}] prompt for {} stays: {}", duel.message(), player, e);
                        }
                    }
                }
                phase => log::warn!("[arena {}] unexpected expiry into {}", duel.message(), phase),
            }
        }
    }
}

/// Effects.
impl<P, R> Arena<P, R>
where
    P: Presenter + 'static,
    R: Repository + 'static,
{
    async fn resolve(&self, duel: Duel) {
        self.ledger.settle(&duel).await;
        match View::result(&duel) {
            Some(view) => {
                log::info!(
                    "[arena {}] resolved: {}",
                    duel.message(),
                    view.winner().map(Player::label).unwrap_or("draw")
                );
                self.publish(&duel, &view).await;
            }
            None => log::error!("[arena {}] finished without a verdict", duel.message()),
        }
    }
    async fn publish(&self, duel: &Duel, view: &View) {
        if let Err(e) = self
            .presenter
            .update_message(duel.channel(), duel.message(), view)
            .await
        {
            log::warn!("[arena {}] failed to update message: {}", duel.message(), e);
        }
    }
    async fn reject(&self, actor: &Player, rejection: Rejection) {
        log::debug!("[arena] rejected {}: {}", actor, rejection);
        self.notify(actor, Notice::Rejected(rejection)).await;
    }
    async fn notify(&self, actor: &Player, notice: Notice) {
        if let Err(e) = self.presenter.send_private(actor, &notice).await {
            log::warn!("[arena] failed to notify {}: {}", actor, e);
        }
    }
}

/// Resolves at `deadline`, or never when nothing is pending.
async fn alarm(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Memory;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::AtomicU64;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Challenge(ChannelId, PlayerId),
        Update(MessageId, View),
        Private(PlayerId, Notice),
        Prompt(PlayerId, MessageId),
        Retract(PlayerId, MessageId),
    }

    /// Presenter that records every call and hands out sequential messages.
    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<Call>>>,
        next: Arc<AtomicU64>,
        broken: Arc<AtomicBool>,
        routes: Arc<Mutex<Vec<(PlayerId, Ticket)>>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
        /// Which interaction each private delivery went through.
        fn routes(&self) -> Vec<(PlayerId, Ticket)> {
            self.routes.lock().unwrap().clone()
        }
        fn clear(&self) {
            self.calls.lock().unwrap().clear();
        }
        fn push(&self, call: Call) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(call);
            match self.broken.load(Ordering::SeqCst) {
                true => Err(anyhow::anyhow!("gateway unavailable")),
                false => Ok(()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Presenter for Recorder {
        async fn render_challenge(
            &self,
            channel: ChannelId,
            challenger: &Player,
            _: Duration,
        ) -> anyhow::Result<MessageId> {
            self.push(Call::Challenge(channel, challenger.id()))?;
            Ok(100 + self.next.fetch_add(1, Ordering::SeqCst))
        }
        async fn update_message(&self, _: ChannelId, message: MessageId, view: &View) -> anyhow::Result<()> {
            self.push(Call::Update(message, view.clone()))
        }
        async fn send_private(&self, actor: &Player, notice: &Notice) -> anyhow::Result<()> {
            self.routes.lock().unwrap().push((actor.id(), actor.ticket()));
            self.push(Call::Private(actor.id(), notice.clone()))
        }
        async fn prompt_choice(&self, actor: &Player, message: MessageId, _: Duration) -> anyhow::Result<()> {
            self.routes.lock().unwrap().push((actor.id(), actor.ticket()));
            self.push(Call::Prompt(actor.id(), message))
        }
        async fn retract_prompts(&self, actor: &Player, message: MessageId) -> anyhow::Result<()> {
            self.push(Call::Retract(actor.id(), message))
        }
    }

    fn alice() -> Player {
        Player::new(1, "alice")
    }
    fn bob() -> Player {
        Player::new(2, "bob")
    }
    fn carol() -> Player {
        Player::new(3, "carol")
    }
    fn arena() -> (Arena<Recorder, Memory>, Recorder) {
        let recorder = Recorder::default();
        let ledger = Ledger::new(Memory::default());
        let arena = Arena::new(recorder.clone(), ledger, TimerConfig::default());
        (arena, recorder)
    }
    fn join(actor: Player, message: MessageId) -> Command {
        Event::Join { actor, message }.into()
    }
    fn cancel(actor: Player, message: MessageId) -> Command {
        Event::Cancel { actor, message }.into()
    }
    fn choose(actor: Player, message: MessageId, choice: Choice) -> Command {
        Event::Choice {
            actor,
            message,
            choice,
        }
        .into()
    }
    fn challenge(challenger: Player) -> Command {
        Command::Challenge {
            challenger,
            channel: 10,
        }
    }
    /// Opens a duel by alice, joined by bob. Returns its message.
    async fn started(arena: &mut Arena<Recorder, Memory>) -> MessageId {
        arena.dispatch(challenge(alice())).await;
        let message = arena.registry().active_for(1).unwrap();
        arena.dispatch(join(bob(), message)).await;
        message
    }

    #[tokio::test(start_paused = true)]
    async fn decisive_duel_is_scored_and_released() {
        let (mut arena, recorder) = arena();
        let message = started(&mut arena).await;
        assert_eq!(arena.registry().get(message).unwrap().phase(), Phase::InProgress);
        assert!(recorder.calls().contains(&Call::Prompt(1, message)));
        assert!(recorder.calls().contains(&Call::Prompt(2, message)));
        recorder.clear();
        arena.dispatch(choose(alice(), message, Choice::Rock)).await;
        arena.dispatch(choose(bob(), message, Choice::Scissors)).await;
        assert!(arena.registry().is_empty());
        assert!(arena.registry().active_for(1).is_none());
        assert!(arena.registry().active_for(2).is_none());
        let calls = recorder.calls();
        assert_eq!(calls[0], Call::Private(1, Notice::Chose(Choice::Rock)));
        assert_eq!(calls[1], Call::Private(2, Notice::Chose(Choice::Scissors)));
        match &calls[2] {
            Call::Update(m, view) => {
                assert_eq!(*m, message);
                assert_eq!(view.winner().map(Player::id), Some(1));
            }
            other => panic!("expected result render, got {:?}", other),
        }
        let data = arena.ledger().repository().load().await;
        let (a, b) = (data.stat("1").unwrap(), data.stat("2").unwrap());
        assert_eq!((a.played, a.wins, a.losses), (1, 1, 0));
        assert_eq!((b.played, b.wins, b.losses), (1, 0, 1));
        assert_eq!(data.game_results.len(), 1);
        assert_eq!(data.game_results[0].winner_id.as_deref(), Some("1"));
    }
    #[tokio::test(start_paused = true)]
    async fn draw_counts_played_only() {
        let (mut arena, _) = arena();
        let message = started(&mut arena).await;
        arena.dispatch(choose(bob(), message, Choice::Paper)).await;
        arena.dispatch(choose(alice(), message, Choice::Paper)).await;
        let data = arena.ledger().repository().load().await;
        for id in ["1", "2"] {
            let stat = data.stat(id).unwrap();
            assert_eq!((stat.played, stat.wins, stat.losses), (1, 0, 0));
        }
        assert!(data.game_results[0].winner_id.is_none());
        assert_eq!(data.game_results[0].result, "Draw!");
    }
    #[tokio::test(start_paused = true)]
    async fn unanswered_challenge_expires() {
        let (mut arena, recorder) = arena();
        arena.dispatch(challenge(alice())).await;
        let message = arena.registry().active_for(1).unwrap();
        tokio::time::advance(Duration::from_secs(JOIN_TIMEOUT + 1)).await;
        arena.expire(Instant::now()).await;
        assert!(arena.registry().is_empty());
        assert!(recorder.calls().contains(&Call::Update(
            message,
            View::Unanswered {
                challenger: alice()
            }
        )));
        let data = arena.ledger().repository().load().await;
        assert!(data.player_stats.is_empty());
        assert!(data.game_results.is_empty());
    }
    #[tokio::test(start_paused = true)]
    async fn late_join_finds_duel_gone() {
        let (mut arena, recorder) = arena();
        arena.dispatch(challenge(alice())).await;
        let message = arena.registry().active_for(1).unwrap();
        tokio::time::advance(Duration::from_secs(JOIN_TIMEOUT + 1)).await;
        arena.dispatch(join(bob(), message)).await;
        assert!(arena.registry().is_empty());
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Private(2, Notice::Rejected(Rejection::Ended)))
        );
    }
    #[tokio::test(start_paused = true)]
    async fn challenger_cancels() {
        let (mut arena, recorder) = arena();
        arena.dispatch(challenge(alice())).await;
        let message = arena.registry().active_for(1).unwrap();
        arena.dispatch(cancel(bob(), message)).await;
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Private(2, Notice::Rejected(Rejection::NotChallenger)))
        );
        arena.dispatch(cancel(alice(), message)).await;
        assert!(arena.registry().is_empty());
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Update(
                message,
                View::Cancelled {
                    challenger: alice()
                }
            ))
        );
        tokio::time::advance(Duration::from_secs(JOIN_TIMEOUT * 2)).await;
        recorder.clear();
        arena.expire(Instant::now()).await;
        assert!(recorder.calls().is_empty());
    }
    #[tokio::test(start_paused = true)]
    async fn self_join_is_rejected() {
        let (mut arena, recorder) = arena();
        arena.dispatch(challenge(alice())).await;
        let message = arena.registry().active_for(1).unwrap();
        arena.dispatch(join(alice(), message)).await;
        assert_eq!(
            arena.registry().get(message).unwrap().phase(),
            Phase::AwaitingOpponent
        );
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Private(1, Notice::Rejected(Rejection::SelfJoin)))
        );
    }
    #[tokio::test(start_paused = true)]
    async fn busy_players_cannot_start_or_join() {
        let (mut arena, recorder) = arena();
        let first = started(&mut arena).await;
        arena.dispatch(challenge(bob())).await;
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Private(2, Notice::Rejected(Rejection::AlreadyDueling)))
        );
        arena.dispatch(challenge(carol())).await;
        let second = arena.registry().active_for(3).unwrap();
        assert_ne!(first, second);
        arena.dispatch(join(alice(), second)).await;
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Private(1, Notice::Rejected(Rejection::AlreadyDueling)))
        );
        assert_eq!(arena.registry().len(), 2);
    }
    #[tokio::test(start_paused = true)]
    async fn one_missing_choice_times_out() {
        let (mut arena, recorder) = arena();
        let message = started(&mut arena).await;
        arena.dispatch(choose(alice(), message, Choice::Rock)).await;
        recorder.clear();
        tokio::time::advance(Duration::from_secs(CHOICE_TIMEOUT + 1)).await;
        arena.expire(Instant::now()).await;
        assert!(arena.registry().is_empty());
        let calls = recorder.calls();
        assert_eq!(
            calls[0],
            Call::Update(message, View::Unfinished { missing: vec![bob()] })
        );
        assert!(calls.contains(&Call::Retract(1, message)));
        assert!(calls.contains(&Call::Retract(2, message)));
        let data = arena.ledger().repository().load().await;
        assert!(data.player_stats.is_empty());
        arena.dispatch(choose(bob(), message, Choice::Paper)).await;
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Private(2, Notice::Rejected(Rejection::Ended)))
        );
    }
    #[tokio::test(start_paused = true)]
    async fn outsiders_and_repeat_choices_are_rejected() {
        let (mut arena, recorder) = arena();
        let message = started(&mut arena).await;
        arena.dispatch(choose(carol(), message, Choice::Rock)).await;
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Private(3, Notice::Rejected(Rejection::NotParticipant)))
        );
        arena.dispatch(choose(alice(), message, Choice::Rock)).await;
        arena.dispatch(choose(alice(), message, Choice::Paper)).await;
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Private(1, Notice::Rejected(Rejection::AlreadyChose)))
        );
        assert_eq!(
            arena.registry().get(message).unwrap().challenger_choice(),
            Some(Choice::Rock)
        );
    }
    #[tokio::test(start_paused = true)]
    async fn failed_render_does_not_open_duel() {
        let (mut arena, recorder) = arena();
        recorder.broken.store(true, Ordering::SeqCst);
        arena.dispatch(challenge(alice())).await;
        assert!(arena.registry().is_empty());
        assert!(arena.registry().vacant(1).is_ok());
    }
    #[tokio::test(start_paused = true)]
    async fn failed_updates_still_release_duel() {
        let (mut arena, recorder) = arena();
        let message = started(&mut arena).await;
        recorder.broken.store(true, Ordering::SeqCst);
        arena.dispatch(choose(alice(), message, Choice::Paper)).await;
        arena.dispatch(choose(bob(), message, Choice::Rock)).await;
        assert!(arena.registry().is_empty());
        let data = arena.ledger().repository().load().await;
        assert_eq!(data.stat("1").unwrap().wins, 1);
    }
    #[tokio::test(start_paused = true)]
    async fn spawned_arena_fires_timeouts() {
        let (arena, recorder) = arena();
        let handle = arena.spawn();
        handle.challenge(alice(), 10).unwrap();
        tokio::time::sleep(Duration::from_secs(JOIN_TIMEOUT + 1)).await;
        let calls = recorder.calls();
        assert_eq!(calls[0], Call::Challenge(10, 1));
        assert!(matches!(calls.last(), Some(Call::Update(_, View::Unanswered { .. }))));
    }
    #[tokio::test(start_paused = true)]
    async fn spawned_arena_abandons_unfinished_duel() {
        let (arena, recorder) = arena();
        let handle = arena.spawn();
        handle.challenge(alice(), 10).unwrap();
        handle.submit(Event::Join { actor: bob(), message: 100 }).unwrap();
        handle
            .submit(Event::Choice {
                actor: alice(),
                message: 100,
                choice: Choice::Scissors,
            })
            .unwrap();
        tokio::time::sleep(Duration::from_secs(CHOICE_TIMEOUT + 1)).await;
        let calls = recorder.calls();
        assert!(calls.contains(&Call::Update(100, View::Unfinished { missing: vec![bob()] })));
        assert!(calls.contains(&Call::Retract(1, 100)));
        assert!(calls.contains(&Call::Retract(2, 100)));
        handle
            .submit(Event::Choice {
                actor: bob(),
                message: 100,
                choice: Choice::Rock,
            })
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(
            recorder.calls().last(),
            Some(&Call::Private(2, Notice::Rejected(Rejection::Ended)))
        );
    }
    #[tokio::test(start_paused = true)]
    async fn private_output_follows_the_causing_interaction() {
        let (mut arena, recorder) = arena();
        arena.dispatch(challenge(alice().via(11))).await;
        let message = arena.registry().active_for(1).unwrap();
        arena.dispatch(join(bob().via(21), message)).await;
        arena.dispatch(cancel(bob().via(22), message)).await;
        arena.dispatch(choose(bob().via(23), message, Choice::Rock)).await;
        arena.dispatch(choose(bob().via(24), message, Choice::Paper)).await;
        assert_eq!(
            recorder.routes(),
            vec![(1, 11), (2, 21), (2, 22), (2, 23), (2, 24)]
        );
    }
}
