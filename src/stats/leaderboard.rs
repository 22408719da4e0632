use super::*;
use crate::store::Dataset;

/// A ranked leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub rank: usize,
    pub player: String,
    pub stat: PlayerStat,
}

/// Players who have played, most wins first, ties broken by games played.
/// Pure function of the snapshot.
pub fn rank_leaderboard(dataset: &Dataset, limit: usize) -> Vec<Standing> {
    let mut rows = dataset
        .player_stats
        .iter()
        .filter(|(_, stat)| stat.played > 0)
        .collect::<Vec<_>>();
    rows.sort_by(|(_, a), (_, b)| b.wins.cmp(&a.wins).then(b.played.cmp(&a.played)));
    rows.into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (player, stat))| Standing {
            rank: i + 1,
            player: player.clone(),
            stat: stat.clone(),
        })
        .collect()
}
