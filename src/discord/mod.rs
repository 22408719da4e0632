//! Serenity adapter.
//!
//! - [`Handler`] — gateway events in, arena commands out
//! - [`DiscordPresenter`] — embeds, buttons and ephemeral replies
//! - [`Control`] — component custom ids
//! - [`Tickets`] — interactions awaiting an answer, until their token expires
//! - [`commands`] — slash command definitions and registration
mod commands;
mod handler;
mod presenter;
mod protocol;
pub mod render;
mod tickets;

pub use commands::*;
pub use handler::*;
pub use presenter::*;
pub use protocol::*;
pub use tickets::*;
