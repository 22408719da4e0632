//! Player statistics and leaderboard ranking.
//!
//! - [`PlayerStat`] — played / wins / losses per player
//! - [`Outcome`] — how one match counts for one player
//! - [`Ledger`] — load-modify-save aggregator over a [`Repository`](crate::store::Repository)
//! - [`rank_leaderboard`] — pure ranking of a dataset snapshot
mod leaderboard;
mod ledger;
mod outcome;
mod stat;

pub use leaderboard::*;
pub use ledger::*;
pub use outcome::*;
pub use stat::*;
