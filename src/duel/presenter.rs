use super::*;
use crate::*;
use std::time::Duration;

/// Output side of the arena: everything players see.
///
/// Failures are reported back so the arena can log them, but they never
/// change duel state. Implementors must be cheap to call from a single
/// task; nothing here should block on another interaction.
#[async_trait::async_trait]
pub trait Presenter: Send + Sync {
    /// Posts the public challenge with its join and cancel controls.
    /// Returns the handle that identifies the duel from now on.
    async fn render_challenge(
        &self,
        channel: ChannelId,
        challenger: &Player,
        window: Duration,
    ) -> anyhow::Result<MessageId>;
    /// Replaces the public message of a duel.
    async fn update_message(
        &self,
        channel: ChannelId,
        message: MessageId,
        view: &View,
    ) -> anyhow::Result<()>;
    /// Tells one actor something nobody else should see.
    async fn send_private(&self, actor: &Player, notice: &Notice) -> anyhow::Result<()>;
    /// Privately offers the three shapes to a participant.
    async fn prompt_choice(
        &self,
        actor: &Player,
        message: MessageId,
        window: Duration,
    ) -> anyhow::Result<()>;
    /// Withdraws any prompt still showing for an expired duel.
    async fn retract_prompts(&self, _actor: &Player, _message: MessageId) -> anyhow::Result<()> {
        Ok(())
    }
}
