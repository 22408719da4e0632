//! Public rock-paper-scissors duels for Discord.
//!
//! A challenger opens a duel in a channel, anyone else may join it, and both
//! participants pick a hand shape in private. Finished duels are scored into a
//! JSON-backed leaderboard.
//!
//! ## Modules
//!
//! - [`duel`] — Duel state machine, participation registry and the [`Arena`](duel::Arena) coordinator
//! - [`stats`] — Per-player counters, match outcomes and leaderboard ranking
//! - [`store`] — JSON file persistence of statistics and match history
//! - [`config`] — Command-line and environment configuration
//! - `discord` — Serenity adapter (feature `discord`)

pub mod config;
pub mod duel;
pub mod stats;
pub mod store;

#[cfg(feature = "discord")]
pub mod discord;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stable platform identity of a player.
pub type PlayerId = u64;
/// Channel hosting a public duel message.
pub type ChannelId = u64;
/// Public duel message; doubles as the duel's identity.
pub type MessageId = u64;
/// Platform interaction a [`Player`](duel::Player) snapshot was taken from.
pub type Ticket = u64;

// ============================================================================
// DUEL PARAMETERS
// ============================================================================
/// Seconds a challenge stays open for someone to join.
pub const JOIN_TIMEOUT: u64 = 60;
/// Seconds both participants have to pick a hand shape.
pub const CHOICE_TIMEOUT: u64 = 60;
/// Label used when a participant's display name is unavailable.
pub const UNKNOWN_PLAYER: &str = "your opponent";

// ============================================================================
// PERSISTENCE
// ============================================================================
/// Default location of the statistics file.
pub const DATA_FILE: &str = "data.json";
/// Tag written into every match record.
pub const GAME_TYPE: &str = "PvP_PublicJoin";
/// Number of players shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .add_filter_allow_str("rochambot")
        .add_filter_allow_str("bot")
        .add_filter_allow_str("register")
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate termination.
/// In-flight duels are dropped; they are never persisted.
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, abandoning active duels and exiting");
            std::process::exit(0);
        }
    });
}
