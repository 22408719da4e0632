use super::*;
use crate::duel::*;
use crate::stats::Report;
use serenity::all::ButtonStyle;
use serenity::all::CreateActionRow;
use serenity::all::CreateButton;
use serenity::all::CreateEmbed;
use serenity::all::CreateEmbedFooter;
use serenity::all::Timestamp;
use std::time::Duration;

const ORANGE: u32 = 0xFFA500;
const SKY: u32 = 0x00BFFF;
const CRIMSON: u32 = 0xDC143C;
const BRICK: u32 = 0xCD5C5C;
const GREEN: u32 = 0x00FF00;
const RED: u32 = 0xFF0000;
const GOLD: u32 = 0xFFD700;
const PURPLE: u32 = 0x8B008B;

/// Platform-neutral embed content. Kept separate from the serenity builder
/// so the wording can be checked without a gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub fields: Vec<(String, String, bool)>,
    pub footer: Option<String>,
}

impl Card {
    fn new(title: impl Into<String>, description: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            colour,
            fields: Vec::new(),
            footer: None,
        }
    }
    fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push((name.into(), value.into(), inline));
        self
    }
    fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }
}

impl From<Card> for CreateEmbed {
    fn from(card: Card) -> Self {
        let embed = CreateEmbed::new()
            .title(card.title)
            .description(card.description)
            .colour(card.colour)
            .fields(card.fields)
            .timestamp(Timestamp::now());
        match card.footer {
            Some(text) => embed.footer(CreateEmbedFooter::new(text)),
            None => embed,
        }
    }
}

/// Public challenge, before anyone joins.
pub fn challenge(challenger: &Player, window: Duration) -> Card {
    Card::new(
        "✨ Rock-paper-scissors duel! ✨",
        format!("**{}** is looking for an opponent!", challenger.label()),
        ORANGE,
    )
    .field(
        "🤔 How do I join?",
        "Press **🎮 Join duel!** below to take the challenge.",
        false,
    )
    .field(
        "⏳ Time limit",
        format!("The challenge stays open for **{} seconds**.", window.as_secs()),
        false,
    )
    .footer(format!("Challenger: {}", challenger.label()))
}

/// Public message after a duel moved on.
pub fn view(view: &View) -> Card {
    match view {
        View::Started {
            challenger,
            opponent,
            window,
        } => Card::new(
            "🤝 The duel has begun! 🤝",
            format!(
                "**{}** vs **{}**!\n\nCheck your private prompt and pick your move within {} seconds.",
                challenger.label(),
                opponent.label(),
                window.as_secs()
            ),
            SKY,
        )
        .footer("Good luck to you both!"),
        View::Cancelled { challenger } => Card::new(
            "🚫 Duel cancelled",
            format!("**{}** withdrew the challenge.", challenger.label()),
            CRIMSON,
        )
        .footer("Start a new one any time with /rps"),
        View::Unanswered { challenger } => Card::new(
            "💤 Nobody joined..",
            format!(
                "**{}** found no opponent in time. The challenge was closed automatically.",
                challenger.label()
            ),
            ORANGE,
        )
        .footer("Invite a friend next time!"),
        View::Unfinished { missing } => Card::new(
            "⏰ Time's up!",
            format!(
                "❌ Duel abandoned: **{}** did not choose in time.",
                missing
                    .iter()
                    .map(Player::label)
                    .collect::<Vec<_>>()
                    .join(" and ")
            ),
            BRICK,
        ),
        View::Result {
            challenger,
            opponent,
            challenger_choice,
            opponent_choice,
            verdict,
        } => {
            let (outcome, colour) = match verdict {
                Verdict::Draw => ("🤝 It's a draw!".to_string(), GOLD),
                Verdict::Challenger => (format!("🎉 **{}** wins!", challenger.label()), GREEN),
                Verdict::Opponent => (format!("🎉 **{}** wins!", opponent.label()), RED),
            };
            Card::new("🏆 Duel result! 🏆", "The dust has settled. Here's who won!", colour)
                .field(format!("{} chose", challenger.label()), shape(*challenger_choice), true)
                .field(format!("{} chose", opponent.label()), shape(*opponent_choice), true)
                .field("🌟 Result", outcome, false)
                .footer("Thanks for playing!")
        }
    }
}

/// `/rpscheck`: personal counters followed by the leaderboard.
pub fn report(report: &Report) -> Card {
    let personal = match &report.personal {
        Some(stat) => format!(
            "**Your stats:**\n⚔️ Played: `{}`\n✅ Wins: `{}`\n❌ Losses: `{}`\n🤝 Draws: `{}`\n📈 Win rate: `{:.2}%`\n",
            stat.played,
            stat.wins,
            stat.losses,
            stat.draws(),
            stat.win_rate()
        ),
        None => "You haven't played yet! Use `/rps` to start your first duel.\n".to_string(),
    };
    let mut board = String::from("\n**🏆 Leaderboard 🏆**\n");
    match report.leaders.is_empty() {
        true => board.push_str("No games recorded yet. Be the first!"),
        false => {
            for standing in report.leaders.iter() {
                board.push_str(&format!(
                    "**{}. {}** - Wins: `{}` | Played: `{}`\n",
                    standing.rank, standing.stat.username, standing.stat.wins, standing.stat.played
                ));
            }
        }
    }
    Card::new(
        "✨ Rock-paper-scissors stats ✨",
        format!("{}\n{}", personal, board),
        PURPLE,
    )
    .footer("Keep on playing!")
}

fn shape(choice: Choice) -> String {
    format!("`{} {}`", choice.emoji(), choice.to_string().to_uppercase())
}

/// Join and cancel buttons under a public challenge.
pub fn lobby() -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(Control::Join.encode())
            .label("🎮 Join duel!")
            .style(ButtonStyle::Primary),
        CreateButton::new(Control::Cancel.encode())
            .label("🚫 Cancel")
            .style(ButtonStyle::Danger),
    ])]
}

/// The three shape buttons of a private prompt for `message`.
pub fn shapes(message: crate::MessageId) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(
        Choice::ALL
            .iter()
            .map(|choice| {
                CreateButton::new(Control::Choice(*choice, message).encode())
                    .label(format!("{} {}", choice.emoji(), choice))
                    .style(ButtonStyle::Primary)
            })
            .collect(),
    )]
}

/// Text of a private prompt.
pub fn prompt(window: Duration) -> String {
    format!("Your turn! Pick your move within {} seconds:", window.as_secs())
}
