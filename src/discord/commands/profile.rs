use poise::CreateReply;
use poise::serenity_prelude as serenity;
use tracing::{Span, debug, instrument};

use super::require_profile;
use crate::brawl::{PlayerBrawlerDto, rank_name};
use crate::discord::bot::{Context, EMBED_COLOR};
use crate::discord::image_gen::ProfileCard;
use crate::discord::theme::Theme;
use crate::error::AppError;
use crate::rating::{compute_season_reset, ingest, ranked_win_percentage};

/// Check your or another player's stats
#[poise::command(slash_command, guild_only)]
#[instrument(skip_all, fields(user_id = %ctx.author().id, target_id))]
pub async fn profile(
    ctx: Context<'_>,
    #[description = "Mention a user"] user: Option<serenity::User>,
) -> Result<(), AppError> {
    ctx.defer().await?;

    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    Span::current().record("target_id", target.id.get());
    let is_self = target.id == ctx.author().id;

    let Some(profile) = require_profile(ctx, target).await? else {
        return Ok(());
    };

    let data = ctx.data();
    let (player, log) = tokio::try_join!(
        data.brawl.get_player(&profile.player_tag),
        data.brawl.get_battle_log(&profile.player_tag),
    )?;

    let season = compute_season_reset(&player.roster());
    let win_percentage = ranked_win_percentage(&ingest(&log).battles);
    let brawlers_total = data.catalog.len().await;

    let favourite = match favourite_brawler_id(profile.favourite_brawler, &player.brawlers) {
        Some(id) => {
            let name = match data.catalog.find(id).await {
                Some(info) => info.name,
                None => player
                    .brawlers
                    .iter()
                    .find(|b| b.id == id)
                    .map_or_else(|| "Unknown".to_string(), |b| b.name.clone()),
            };
            Some((id, name))
        }
        None => None,
    };

    let power_league = rank_name(profile.power_league_rank);
    let card = ProfileCard {
        player: &player,
        season,
        win_percentage,
        favourite_brawler: favourite.as_ref().map(|(id, name)| (*id, name.as_str())),
        power_league,
        brawlers_total,
        theme: Theme::resolve(profile.favourite_theme.as_deref(), &data.seasonal_theme),
    };
    let png = data.image_gen.generate_profile_card(&card).await?;

    let club = match &player.club.tag {
        Some(tag) => format!("{} `({tag})`", player.club_name()),
        None => player.club_name().to_string(),
    };
    let favourite_name = favourite.as_ref().map_or("Unknown", |(_, name)| name.as_str());

    let embed = serenity::CreateEmbed::new()
        .color(EMBED_COLOR)
        .author(
            serenity::CreateEmbedAuthor::new(format!("{} | {}", player.name, player.tag))
                .icon_url(player.icon_url()),
        )
        .field("Trophies", format!("🏆 {}", player.trophies), true)
        .field("Highest Trophies", format!("🏅 {}", player.highest_trophies), true)
        .field("Season Reset", format!("🏆 {}", season.trophies_after_reset), true)
        .field("3 vs 3 Victories", format!("⚔️ {}", player.trio_victories), true)
        .field("Solo Victories", format!("💀 {}", player.solo_victories), true)
        .field("Duo Victories", format!("🤝 {}", player.duo_victories), true)
        .field("Favourite Brawler", format!("⭐ {favourite_name}"), true)
        .field("Exp Level", format!("📈 {}", player.exp_level), true)
        .field("Win Rate", format!("📊 {win_percentage:.2}%"), true)
        .field("Season Rewards", format!("💎 {}", season.total_reward), true)
        .field(
            "Brawlers Unlocked",
            format!("🧩 {}/{}", player.brawlers.len(), brawlers_total),
            true,
        )
        .field("Power League", format!("🎖️ {power_league}"), true)
        .field("Club", format!("🛡️ {club}"), true)
        .image("attachment://stats.png");

    ctx.send(
        CreateReply::default()
            .embed(embed)
            .attachment(serenity::CreateAttachment::bytes(png, "stats.png")),
    )
    .await?;

    if is_self && profile.favourite_brawler.is_none() {
        debug!("🎮 Suggesting a favourite brawler");
        ctx.send(
            CreateReply::default()
                .content(
                    "It seems like you haven't set your favourite brawler yet. Use `/set brawler` \
                     to set it. Until then your highest trophy brawler is shown.",
                )
                .ephemeral(true),
        )
        .await?;
    }

    Ok(())
}

/// Saved favourite, else the highest trophy brawler. Ties go to the one the
/// game lists first.
fn favourite_brawler_id(saved: Option<i64>, roster: &[PlayerBrawlerDto]) -> Option<u32> {
    saved.and_then(|id| u32::try_from(id).ok()).or_else(|| {
        roster
            .iter()
            .rev()
            .max_by_key(|brawler| brawler.trophies)
            .map(|brawler| brawler.id)
    })
}
