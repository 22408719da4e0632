//! Duel lifecycle: state machine, registry and the coordinating arena.
//!
//! ## Core Types
//!
//! - [`Duel`] — one public challenge and its transitions
//! - [`Registry`] — live duels plus the one-duel-per-player index
//! - [`Arena`] — single task that serializes interactions and timeouts
//! - [`Presenter`] — where views and private notices go
//!
//! ## Vocabulary
//!
//! - [`Choice`], [`Verdict`], [`Phase`], [`Player`]
//! - [`Event`] / [`Command`] — inbound interactions
//! - [`View`] / [`Notice`] — outbound public and private content
mod arena;
mod choice;
#[allow(clippy::module_inception)]
mod duel;
mod event;
mod handle;
mod phase;
mod player;
mod presenter;
mod registry;
mod rejection;
mod timer;
mod verdict;
mod view;

pub use arena::*;
pub use choice::*;
pub use duel::*;
pub use event::*;
pub use handle::*;
pub use phase::*;
pub use player::*;
pub use presenter::*;
pub use registry::*;
pub use rejection::*;
pub use timer::*;
pub use verdict::*;
pub use view::*;
