use super::*;
use crate::duel::ArenaHandle;
use crate::duel::Event;
use crate::duel::Player;
use crate::stats::Ledger;
use crate::store::Repository;
use serenity::all::CommandInteraction;
use serenity::all::ComponentInteraction;
use serenity::all::Context;
use serenity::all::CreateEmbed;
use serenity::all::CreateInteractionResponse;
use serenity::all::CreateInteractionResponseFollowup;
use serenity::all::CreateInteractionResponseMessage;
use serenity::all::EventHandler;
use serenity::all::Interaction;
use serenity::all::Ready;
use serenity::all::User;

const NOT_FOUND: &str = "Command not found!";
const FAILED: &str = "Something went wrong while running this command!";

/// Gateway entry point. Slash commands and button presses are turned into
/// arena commands; `/ping` and `/rpscheck` are answered directly.
pub struct Handler<R> {
    arena: ArenaHandle,
    presenter: DiscordPresenter,
    ledger: Ledger<R>,
    leaderboard: usize,
}

impl<R> Handler<R>
where
    R: Repository + 'static,
{
    pub fn new(
        arena: ArenaHandle,
        presenter: DiscordPresenter,
        ledger: Ledger<R>,
        leaderboard: usize,
    ) -> Self {
        Self {
            arena,
            presenter,
            ledger,
            leaderboard,
        }
    }

    async fn command(&self, ctx: &Context, command: CommandInteraction) {
        log::debug!("[discord] /{} from {}", command.data.name, command.user.id);
        if let Err(e) = self.run(ctx, &command).await {
            log::error!("[discord] /{} failed: {}", command.data.name, e);
            reply(ctx, &command, FAILED).await;
        }
    }
    async fn run(&self, ctx: &Context, command: &CommandInteraction) -> anyhow::Result<()> {
        match command.data.name.as_str() {
            PING => {
                let reply = CreateInteractionResponseMessage::new().content("Pong!!");
                command
                    .create_response(&ctx.http, CreateInteractionResponse::Message(reply))
                    .await?;
            }
            RPS => {
                let ticket = command.id.get();
                let challenger = player(&command.user).via(ticket);
                self.presenter
                    .track(ticket, Origin::Command(command.clone()));
                self.arena.challenge(challenger, command.channel_id.get())?;
            }
            RPSCHECK => {
                let report = self
                    .ledger
                    .report(command.user.id.get(), self.leaderboard)
                    .await;
                let reply = CreateInteractionResponseMessage::new()
                    .embed(CreateEmbed::from(render::report(&report)));
                command
                    .create_response(&ctx.http, CreateInteractionResponse::Message(reply))
                    .await?;
            }
            name => {
                log::error!("[discord] no command matching /{}", name);
                reply(ctx, command, NOT_FOUND).await;
            }
        }
        Ok(())
    }
    async fn component(&self, ctx: &Context, component: ComponentInteraction) {
        let control = match Control::try_from(component.data.custom_id.as_str()) {
            Ok(control) => control,
            Err(e) => {
                log::debug!("[discord] ignoring {}", e);
                return;
            }
        };
        if let Err(e) = component
            .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
            .await
        {
            log::warn!("[discord] failed to acknowledge {}: {}", component.data.custom_id, e);
        }
        let ticket = component.id.get();
        let actor = player(&component.user).via(ticket);
        let event = match control {
            Control::Join => Event::Join {
                actor: actor.clone(),
                message: component.message.id.get(),
            },
            Control::Cancel => Event::Cancel {
                actor: actor.clone(),
                message: component.message.id.get(),
            },
            Control::Choice(choice, message) => Event::Choice {
                actor: actor.clone(),
                message,
                choice,
            },
        };
        self.presenter
            .track(ticket, Origin::Component(component));
        if let Err(e) = self.arena.submit(event) {
            log::error!("[discord] {}", e);
        }
    }
}

#[serenity::async_trait]
impl<R> EventHandler for Handler<R>
where
    R: Repository + 'static,
{
    async fn ready(&self, _: Context, ready: Ready) {
        log::info!("[discord] connected as {}", ready.user.name);
    }
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.command(&ctx, command).await,
            Interaction::Component(component) => self.component(&ctx, component).await,
            other => log::debug!("[discord] ignoring {:?} interaction", other.kind()),
        }
    }
}

/// Captures who acted, under the name they have right now.
fn player(user: &User) -> Player {
    Player::new(user.id.get(), user.name.clone())
}

/// Ephemeral text reply, falling back to a followup if already answered.
async fn reply(ctx: &Context, command: &CommandInteraction, content: &str) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    if command.create_response(&ctx.http, response).await.is_ok() {
        return;
    }
    let followup = CreateInteractionResponseFollowup::new()
        .content(content)
        .ephemeral(true);
    if let Err(e) = command.create_followup(&ctx.http, followup).await {
        log::warn!("[discord] could not reply to /{}: {}", command.data.name, e);
    }
}
