use serenity::all::Command;
use serenity::all::CreateCommand;
use serenity::all::GuildId;
use serenity::all::Http;

pub const PING: &str = "ping";
pub const RPS: &str = "rps";
pub const RPSCHECK: &str = "rpscheck";

/// Every slash command the bot answers.
pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(PING).description("Replies with Pong!"),
        CreateCommand::new(RPS).description("Start a rock-paper-scissors duel anyone can join!"),
        CreateCommand::new(RPSCHECK).description("See your rock-paper-scissors stats and the leaderboard"),
    ]
}

/// Installs [`commands`] in one guild, or globally when none is given.
/// Returns how many commands the platform now lists.
pub async fn register(http: &Http, guild: Option<u64>) -> anyhow::Result<usize> {
    let registered = match guild {
        Some(guild) => GuildId::new(guild).set_commands(http, commands()).await?,
        None => Command::set_global_commands(http, commands()).await?,
    };
    for command in registered.iter() {
        log::info!("[register] /{} ({})", command.name, command.id);
    }
    Ok(registered.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_three_commands() {
        assert_eq!(commands().len(), 3);
    }
}
