use poise::CreateReply;
use poise::serenity_prelude as serenity;
use tracing::{Span, info, instrument, warn};

use super::{reply_error, require_profile};
use crate::brawl::rank_name;
use crate::discord::bot::{Context, EMBED_COLOR};
use crate::error::AppError;
use crate::rating::{RatingSummary, ingest, rate as rate_battles};

/// Check your V-Rating
///
/// Only rating yourself saves the result.
#[poise::command(slash_command, guild_only)]
#[instrument(skip_all, fields(user_id = %ctx.author().id, target_id))]
pub async fn rate(
    ctx: Context<'_>,
    #[description = "The user you want to check"] user: Option<serenity::User>,
) -> Result<(), AppError> {
    ctx.defer().await?;

    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    Span::current().record("target_id", target.id.get());
    let is_self = target.id == ctx.author().id;

    // held across the read and the write of the profile
    let _guard = ctx.data().rate_locks.lock(target.id.get()).await;

    let Some(profile) = require_profile(ctx, target).await? else {
        return Ok(());
    };

    let data = ctx.data();
    let (player, log) = tokio::try_join!(
        data.brawl.get_player(&profile.player_tag),
        data.brawl.get_battle_log(&profile.player_tag),
    )?;

    if log.is_empty() {
        let description = if is_self {
            "Failed to calculate your V-Rating. You don't have any battle logs.".to_string()
        } else {
            format!(
                "Failed to calculate **{}**'s V-Rating. They don't have any battle logs.",
                target.name
            )
        };
        return reply_error(ctx, description).await;
    }

    let ingested = ingest(&log);
    let summary = rate_battles(&profile.to_state(), &ingested.battles, &data.rating);

    if summary.malformed > 0 || !ingested.rejected.is_empty() {
        warn!(
            malformed = summary.malformed,
            rejected = ingested.rejected.len(),
            "🎮 ⚠️ Some battles could not be rated"
        );
    }

    if is_self {
        data.db.save_rating(target.id.get(), &summary).await?;
        info!(
            score = summary.new_score,
            delta = summary.score_delta,
            battles = summary.battles(),
            "🎮 Rating saved"
        );
    }

    let embed = serenity::CreateEmbed::new()
        .color(EMBED_COLOR)
        .title("Rating")
        .description(rating_description(&player.name, &profile.player_tag, &summary))
        .footer(serenity::CreateEmbedFooter::new(concat!(
            "Vreezy v",
            env!("CARGO_PKG_VERSION")
        )));

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn rating_description(name: &str, tag: &str, summary: &RatingSummary) -> String {
    format!(
        "Name: **{name}**\n\
         Tag: **{tag}**\n\
         Highest Power League Rank: **{rank}**\n\n\
         __Recent Data__\n\
         > Wins: **{wins}**\n\
         > Losses: **{losses}**\n\
         > Draws: **{draws}**\n\
         > Higher Enemies Faced: **{higher}**\n\
         > Lower Enemies Faced: **{lower}**\n\
         > Winrate: **{winrate:.0}** %\n\n\
         Gain: **{delta}**\n\
         ## [V-Rating:](https://vreezy.gitbook.io/vreezy/) {score}",
        rank = rank_name(summary.new_power_league_rank),
        wins = summary.wins,
        losses = summary.losses,
        draws = summary.draws,
        higher = summary.higher_opponents,
        lower = summary.lower_opponents,
        winrate = summary.win_rate(),
        delta = summary.score_delta,
        score = summary.new_score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_lists_recent_data() {
        let summary = RatingSummary {
            wins: 2,
            losses: 1,
            higher_opponents: 4,
            lower_opponents: 2,
            score_delta: 212,
            new_score: 712,
            new_power_league_rank: 7,
            ..RatingSummary::default()
        };

        let text = rating_description("Vreezy", "#2PP0Q8", &summary);

        assert!(text.contains("Highest Power League Rank: **Gold I**"));
        assert!(text.contains("> Wins: **2**"));
        assert!(text.contains("> Higher Enemies Faced: **4**"));
        assert!(text.contains("> Winrate: **67** %"));
        assert!(text.contains("Gain: **212**"));
        assert!(text.ends_with("712"));
    }
}
