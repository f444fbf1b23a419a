use std::time::Duration;

use poise::CreateReply;
use poise::serenity_prelude as serenity;
use tracing::instrument;

use crate::discord::bot::{Context, EMBED_COLOR};
use crate::error::AppError;

/// See information about the bot
#[poise::command(slash_command)]
#[instrument(skip_all, fields(user_id = %ctx.author().id))]
pub async fn info(ctx: Context<'_>) -> Result<(), AppError> {
    let data = ctx.data();

    let developers = if data.developers.is_empty() {
        "Unknown".to_string()
    } else {
        data.developers
            .iter()
            .map(|id| format!("<@{id}>"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let latency = ctx.ping().await;
    let guilds = ctx.cache().guild_count();

    let embed = serenity::CreateEmbed::new()
        .color(EMBED_COLOR)
        .title("Vreezy")
        .description("Rates Brawl Stars players and renders their profile cards.")
        .field("Developers", developers, false)
        .field("Uptime", format_uptime(data.started_at.elapsed()), true)
        .field("Latency", format!("{} ms", latency.as_millis()), true)
        .field("Servers", guilds.to_string(), true)
        .footer(serenity::CreateEmbedFooter::new(concat!(
            "Vreezy v",
            env!("CARGO_PKG_VERSION")
        )));

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}d {}h {}m {}s",
        secs / 86_400,
        secs % 86_400 / 3_600,
        secs % 3_600 / 60,
        secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_breaks_into_units() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0d 0h 0m 0s");
        assert_eq!(
            format_uptime(Duration::from_secs(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5)),
            "2d 3h 4m 5s"
        );
    }
}
