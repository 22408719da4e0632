//! Persistence of player statistics and match history.
//!
//! - [`Dataset`] — The whole file: `gameResults` log plus `playerStats` map
//! - [`MatchRecord`] — Append-only history entry
//! - [`Repository`] — Load/save contract with [`JsonFile`] and [`Memory`] backends
mod dataset;
mod record;
mod repository;

pub use dataset::*;
pub use record::*;
pub use repository::*;
