use crate::duel::TimerConfig;
use crate::*;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration, from flags or the environment.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Rock-paper-scissors duels for Discord", long_about = None)]
pub struct Config {
    /// Bot token used to connect to the gateway.
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: String,
    /// Statistics and match history file.
    #[arg(long, env = "RPS_DATA_FILE", default_value = DATA_FILE)]
    pub data: PathBuf,
    /// Seconds a challenge waits for an opponent.
    #[arg(long, env = "RPS_JOIN_TIMEOUT", default_value_t = JOIN_TIMEOUT)]
    pub join_timeout: u64,
    /// Seconds both participants have to choose.
    #[arg(long, env = "RPS_CHOICE_TIMEOUT", default_value_t = CHOICE_TIMEOUT)]
    pub choice_timeout: u64,
    /// Rows shown by `/rpscheck`.
    #[arg(long, env = "RPS_LEADERBOARD_SIZE", default_value_t = LEADERBOARD_SIZE)]
    pub leaderboard: usize,
    /// Register commands in this guild only instead of globally.
    #[arg(long, env = "DISCORD_GUILD_ID")]
    pub guild: Option<u64>,
    /// Application to register commands for; defaults to the token's own.
    #[arg(long, env = "DISCORD_APPLICATION_ID")]
    pub application: Option<u64>,
}

impl Config {
    pub fn timers(&self) -> TimerConfig {
        TimerConfig {
            join: Duration::from_secs(self.join_timeout),
            choice: Duration::from_secs(self.choice_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = Config::try_parse_from(["bot", "--token", "abc"]).unwrap();
        assert_eq!(config.data, PathBuf::from(DATA_FILE));
        assert_eq!(config.leaderboard, LEADERBOARD_SIZE);
        assert_eq!(config.timers().join, Duration::from_secs(JOIN_TIMEOUT));
        assert_eq!(config.timers().choice, Duration::from_secs(CHOICE_TIMEOUT));
        assert!(config.guild.is_none());
    }
    #[test]
    fn flags_override() {
        let config = Config::try_parse_from([
            "bot",
            "--token",
            "abc",
            "--data",
            "/tmp/rps.json",
            "--join-timeout",
            "5",
            "--choice-timeout",
            "7",
            "--leaderboard",
            "3",
            "--guild",
            "42",
        ])
        .unwrap();
        assert_eq!(config.data, PathBuf::from("/tmp/rps.json"));
        assert_eq!(config.timers().join, Duration::from_secs(5));
        assert_eq!(config.timers().choice, Duration::from_secs(7));
        assert_eq!(config.leaderboard, 3);
        assert_eq!(config.guild, Some(42));
    }
    #[test]
    fn rejects_garbage_timeout() {
        assert!(Config::try_parse_from(["bot", "--token", "abc", "--join-timeout", "soon"]).is_err());
    }
}
