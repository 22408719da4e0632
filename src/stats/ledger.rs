use super::*;
use crate::duel::Duel;
use crate::duel::Player;
use crate::store::*;
use std::sync::Arc;

/// What `/rpscheck` shows: the caller's own counters plus the top of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub personal: Option<PlayerStat>,
    pub leaders: Vec<Standing>,
}

/// Reads and updates statistics through a [`Repository`].
///
/// Every write is a whole-document load-modify-save. Write failures are
/// logged and swallowed: by the time we record, the duel is already over
/// from the players' point of view.
pub struct Ledger<R> {
    repo: Arc<R>,
}

impl<R> Clone for Ledger<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R> Ledger<R>
where
    R: Repository,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
    pub fn repository(&self) -> &R {
        &self.repo
    }
    pub async fn record_outcome(&self, player: &Player, outcome: Outcome) {
        let mut dataset = self.repo.load().await;
        let key = player.id().to_string();
        let stat = dataset
            .player_stats
            .entry(key)
            .or_insert_with(|| PlayerStat::new(player.label()));
        stat.tally(outcome);
        stat.username = player.label().to_string();
        match self.repo.save(&dataset).await {
            Ok(()) => log::debug!("[ledger] {} {:?}", player, outcome),
            Err(e) => log::error!("[ledger] failed to record {:?} for {}: {}", outcome, player, e),
        }
    }
    pub async fn append_match(&self, record: MatchRecord) {
        let mut dataset = self.repo.load().await;
        dataset.game_results.push(record);
        if let Err(e) = self.repo.save(&dataset).await {
            log::error!("[ledger] failed to append match record: {}", e);
        }
    }
    /// Scores a resolved duel: both players' counters, then the history entry.
    /// Duels without a verdict are ignored.
    pub async fn settle(&self, duel: &Duel) {
        let (Some(opponent), Some(verdict)) = (duel.opponent(), duel.verdict()) else {
            log::warn!("[ledger] refusing to settle unresolved duel {}", duel.message());
            return;
        };
        let (first, second) = Outcome::split(verdict);
        self.record_outcome(duel.challenger(), first).await;
        self.record_outcome(opponent, second).await;
        if let Some(record) = MatchRecord::from_duel(duel) {
            self.append_match(record).await;
        }
        log::info!("[ledger] settled duel {}: {:?}", duel.message(), verdict);
    }
    pub async fn report(&self, player: crate::PlayerId, limit: usize) -> Report {
        let dataset = self.repo.load().await;
        Report {
            personal: dataset
                .stat(&player.to_string())
                .filter(|s| s.played > 0)
                .cloned(),
            leaders: rank_leaderboard(&dataset, limit),
        }
    }
}
