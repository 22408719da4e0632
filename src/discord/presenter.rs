use super::*;
use crate::duel::Notice;
use crate::duel::Player;
use crate::duel::Presenter;
use crate::duel::View;
use crate::*;
use serenity::all::CommandInteraction;
use serenity::all::ComponentInteraction;
use serenity::all::CreateEmbed;
use serenity::all::CreateInteractionResponse;
use serenity::all::CreateInteractionResponseFollowup;
use serenity::all::CreateInteractionResponseMessage;
use serenity::all::CreateMessage;
use serenity::all::EditInteractionResponse;
use serenity::all::EditMessage;
use serenity::all::Http;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

type Slot = (MessageId, PlayerId);

/// An interaction a player reached us through.
/// Private output can only be delivered as a reply to one of these.
#[derive(Clone)]
pub enum Origin {
    /// Slash command, not yet answered.
    Command(CommandInteraction),
    /// Button press, already acknowledged.
    Component(ComponentInteraction),
}

impl Origin {
    /// Ephemeral reply, as the first response if still possible.
    async fn whisper(&self, http: &Http, content: String) -> anyhow::Result<()> {
        match self {
            Self::Command(command) => {
                let reply = CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(content.clone())
                        .ephemeral(true),
                );
                if command.create_response(http, reply).await.is_err() {
                    let followup = CreateInteractionResponseFollowup::new()
                        .content(content)
                        .ephemeral(true);
                    command.create_followup(http, followup).await?;
                }
                Ok(())
            }
            Self::Component(component) => {
                let followup = CreateInteractionResponseFollowup::new()
                    .content(content)
                    .ephemeral(true);
                component.create_followup(http, followup).await?;
                Ok(())
            }
        }
    }
    async fn followup(
        &self,
        http: &Http,
        followup: CreateInteractionResponseFollowup,
    ) -> anyhow::Result<serenity::all::MessageId> {
        let message = match self {
            Self::Command(command) => command.create_followup(http, followup).await?,
            Self::Component(component) => component.create_followup(http, followup).await?,
        };
        Ok(message.id)
    }
    async fn delete(&self, http: &Http, message: serenity::all::MessageId) -> anyhow::Result<()> {
        match self {
            Self::Command(command) => command.delete_followup(http, message).await?,
            Self::Component(component) => component.delete_followup(http, message).await?,
        }
        Ok(())
    }
}

/// [`Presenter`] backed by the Discord REST API.
///
/// - `pending`: interactions not yet answered, by ticket
/// - `prompts`: prompt followups still showing shape buttons
#[derive(Clone)]
pub struct DiscordPresenter {
    http: Arc<Http>,
    pending: Arc<Mutex<Tickets<Origin>>>,
    prompts: Arc<Mutex<HashMap<Slot, (Origin, serenity::all::MessageId)>>>,
}

impl DiscordPresenter {
    pub fn new(http: Arc<Http>) -> Self {
        Self {
            http,
            pending: Arc::default(),
            prompts: Arc::default(),
        }
    }
    /// Remembers the interaction behind `ticket`.
    /// Must happen before the command is handed to the arena.
    pub fn track(&self, ticket: Ticket, origin: Origin) {
        lock(&self.pending).insert(ticket, origin);
    }
    fn take(&self, player: &Player) -> anyhow::Result<Origin> {
        lock(&self.pending)
            .take(player.ticket())
            .ok_or_else(|| anyhow::anyhow!("interaction {} of {} is gone", player.ticket(), player))
    }
}

#[async_trait::async_trait]
impl Presenter for DiscordPresenter {
    async fn render_challenge(
        &self,
        channel: ChannelId,
        challenger: &Player,
        window: Duration,
    ) -> anyhow::Result<MessageId> {
        let embed = CreateEmbed::from(render::challenge(challenger, window));
        // the command stays pending: the challenger's prompt hangs off it
        let origin = lock(&self.pending).peek(challenger.ticket());
        let message = match origin {
            Some(Origin::Command(command)) => {
                let reply = CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .components(render::lobby());
                command
                    .create_response(&*self.http, CreateInteractionResponse::Message(reply))
                    .await?;
                command.get_response(&*self.http).await?.id.get()
            }
            _ => {
                let post = CreateMessage::new().embed(embed).components(render::lobby());
                serenity::all::ChannelId::new(channel)
                    .send_message(&*self.http, post)
                    .await?
                    .id
                    .get()
            }
        };
        log::debug!("[discord] posted challenge {} in {}", message, channel);
        Ok(message)
    }
    async fn update_message(
        &self,
        channel: ChannelId,
        message: MessageId,
        view: &View,
    ) -> anyhow::Result<()> {
        if let View::Cancelled { challenger } | View::Unanswered { challenger } = view {
            lock(&self.pending).forget(challenger.ticket());
        }
        let edit = EditMessage::new()
            .embed(CreateEmbed::from(render::view(view)))
            .components(vec![]);
        serenity::all::ChannelId::new(channel)
            .edit_message(&*self.http, serenity::all::MessageId::new(message), edit)
            .await?;
        Ok(())
    }
    async fn send_private(&self, actor: &Player, notice: &Notice) -> anyhow::Result<()> {
        let origin = self.take(actor)?;
        match (notice, &origin) {
            (Notice::Chose(_), Origin::Component(component)) => {
                // the prompt itself becomes the confirmation
                let edit = EditInteractionResponse::new()
                    .content(notice.to_string())
                    .components(vec![]);
                component.edit_response(&*self.http, edit).await?;
                if let Ok(Control::Choice(_, message)) = Control::try_from(component.data.custom_id.as_str()) {
                    lock(&self.prompts).remove(&(message, actor.id()));
                }
                Ok(())
            }
            _ => origin.whisper(&self.http, notice.to_string()).await,
        }
    }
    async fn prompt_choice(
        &self,
        actor: &Player,
        message: MessageId,
        window: Duration,
    ) -> anyhow::Result<()> {
        let origin = self.take(actor)?;
        let followup = CreateInteractionResponseFollowup::new()
            .content(render::prompt(window))
            .components(render::shapes(message))
            .ephemeral(true);
        let prompt = origin.followup(&self.http, followup).await?;
        lock(&self.prompts).insert((message, actor.id()), (origin, prompt));
        Ok(())
    }
    async fn retract_prompts(&self, actor: &Player, message: MessageId) -> anyhow::Result<()> {
        let prompt = lock(&self.prompts).remove(&(message, actor.id()));
        match prompt {
            Some((origin, prompt)) => origin.delete(&self.http, prompt).await,
            None => Ok(()),
        }
    }
}

/// Poisoning only follows a panic elsewhere; the maps stay usable.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
