//! Register Binary
//!
//! Installs the slash commands, in one guild when `DISCORD_GUILD_ID` is set
//! and globally otherwise. Run once after changing command definitions.

use clap::Parser;
use rochambot::config::Config;
use rochambot::discord::register;
use rochambot::*;
use serenity::all::ApplicationId;
use serenity::all::Http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    let config = Config::parse();
    let http = Http::new(&config.token);
    let application = match config.application {
        Some(id) => ApplicationId::new(id),
        None => http.get_current_application_info().await?.id,
    };
    http.set_application_id(application);
    let scope = config
        .guild
        .map(|guild| format!("guild {}", guild))
        .unwrap_or_else(|| "global scope".to_string());
    log::info!("[register] refreshing commands in {}", scope);
    let count = register(&http, config.guild).await?;
    log::info!("[register] {} commands installed in {}", count, scope);
    Ok(())
}
