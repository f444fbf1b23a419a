use poise::CreateReply;
use poise::serenity_prelude as serenity;
use tracing::{Span, instrument};

use super::require_profile;
use crate::brawl::PlayerBrawlerDto;
use crate::discord::bot::{Context, EMBED_COLOR};
use crate::error::AppError;

const SHOWN_BRAWLERS: usize = 30;

/// See your or another player's highest ranked brawlers
#[poise::command(slash_command, guild_only)]
#[instrument(skip_all, fields(user_id = %ctx.author().id, target_id))]
pub async fn brawlers(
    ctx: Context<'_>,
    #[description = "Mention a user"] user: Option<serenity::User>,
) -> Result<(), AppError> {
    ctx.defer().await?;

    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    Span::current().record("target_id", target.id.get());

    let Some(profile) = require_profile(ctx, target).await? else {
        return Ok(());
    };

    let data = ctx.data();
    let player = data.brawl.get_player(&profile.player_tag).await?;
    let total = data.catalog.len().await;

    let list = top_brawlers(&player.brawlers)
        .iter()
        .enumerate()
        .map(|(i, b)| {
            format!(
                "`{:>2}.` **{}** · Rank {} · 🏆 {} · Power {}",
                i + 1,
                b.name,
                b.rank,
                b.trophies,
                b.power
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let embed = serenity::CreateEmbed::new()
        .color(EMBED_COLOR)
        .author(serenity::CreateEmbedAuthor::new(format!(
            "{} | {}",
            player.name, player.tag
        )))
        .title(format!(
            "Brawlers Unlocked: {}/{}",
            player.brawlers.len(),
            total
        ))
        .description(if list.is_empty() {
            "No brawlers unlocked.".to_string()
        } else {
            list
        });

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Highest ranked first. Ties keep the order the game lists them in.
fn top_brawlers(roster: &[PlayerBrawlerDto]) -> Vec<&PlayerBrawlerDto> {
    let mut sorted: Vec<&PlayerBrawlerDto> = roster.iter().collect();
    sorted.sort_by(|a, b| b.rank.cmp(&a.rank));
    sorted.truncate(SHOWN_BRAWLERS);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brawler(id: u32, rank: u32) -> PlayerBrawlerDto {
        PlayerBrawlerDto {
            id,
            name: format!("B{id}"),
            power: 9,
            rank,
            trophies: 500,
            highest_trophies: 600,
        }
    }

    #[test]
    fn sorts_by_rank_keeping_ties_stable() {
        let roster = [brawler(1, 10), brawler(2, 25), brawler(3, 10), brawler(4, 30)];

        let ids: Vec<u32> = top_brawlers(&roster).iter().map(|b| b.id).collect();

        assert_eq!(ids, [4, 2, 1, 3]);
    }

    #[test]
    fn caps_the_list() {
        let roster: Vec<_> = (0..40).map(|id| brawler(id, id)).collect();

        let top = top_brawlers(&roster);

        assert_eq!(top.len(), SHOWN_BRAWLERS);
        assert_eq!(top[0].id, 39);
    }
}
