//! Bot Binary
//!
//! Connects to the Discord gateway and hosts rock-paper-scissors duels.
//! Statistics persist to the configured JSON file.

use clap::Parser;
use rochambot::config::Config;
use rochambot::discord::*;
use rochambot::duel::Arena;
use rochambot::stats::Ledger;
use rochambot::store::JsonFile;
use rochambot::*;
use serenity::all::ApplicationId;
use serenity::all::Client;
use serenity::all::GatewayIntents;
use serenity::all::Http;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    kys();
    let config = Config::parse();
    let http = Arc::new(Http::new(&config.token));
    let application = match config.application {
        Some(id) => ApplicationId::new(id),
        None => http.get_current_application_info().await?.id,
    };
    http.set_application_id(application);
    let ledger = Ledger::new(JsonFile::new(config.data.clone()));
    let presenter = DiscordPresenter::new(http);
    let arena = Arena::new(presenter.clone(), ledger.clone(), config.timers()).spawn();
    let handler = Handler::new(arena, presenter, ledger, config.leaderboard);
    log::info!("[bot] statistics in {}", config.data.display());
    Client::builder(&config.token, GatewayIntents::GUILDS)
        .event_handler(handler)
        .await?
        .start()
        .await?;
    Ok(())
}
