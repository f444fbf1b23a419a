use std::time::Duration;

use poise::serenity_prelude as serenity;
use poise::{ChoiceParameter, CreateReply, ReplyHandle};
use tracing::{debug, info, instrument};

use super::{reply_error, require_profile};
use crate::brawl::{PlayerDto, PowerLeagueRank, tag};
use crate::discord::bot::{Context, EMBED_COLOR, ERROR_COLOR};
use crate::discord::theme::Theme;
use crate::discord::webhook_log::LogChannel;
use crate::error::AppError;

const OVERWRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Save your profile or customise it
#[poise::command(
    slash_command,
    guild_only,
    subcommands("tag", "brawler", "theme"),
    subcommand_required
)]
pub async fn set(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Set your Brawl Stars tag
#[poise::command(slash_command, guild_only)]
#[instrument(
    skip_all,
    fields(user_id = %ctx.author().id, input_tag = %player_tag, rank = %powerleague)
)]
pub async fn tag(
    ctx: Context<'_>,
    #[rename = "tag"]
    #[description = "Your Brawl Stars tag"]
    player_tag: String,
    #[description = "Your highest solo power league rank"] powerleague: PowerLeagueRank,
    #[rename = "profile"]
    #[description = "Attach a screenshot of your profile"]
    screenshot: serenity::Attachment,
) -> Result<(), AppError> {
    ctx.defer().await?;

    let player = ctx
        .data()
        .brawl
        .get_player(&tag::normalize(&player_tag))
        .await?;

    let user_id = ctx.author().id.get();
    let existing = ctx.data().db.get_profile(user_id).await?;

    let prompt = match existing {
        Some(_) => match confirm_overwrite(ctx).await? {
            Some(prompt) => Some(prompt),
            None => return Ok(()),
        },
        None => None,
    };

    ctx.data()
        .db
        .upsert_profile(user_id, &player.tag, powerleague.rank())
        .await?;

    let verb = if prompt.is_some() { "updated" } else { "saved" };
    let embed = player_embed(&player).description(format!(
        "✅ · **{}**, your profile has been {verb}.",
        ctx.author().name
    ));
    let reply = CreateReply::default().embed(embed).components(Vec::new());
    match prompt {
        Some(prompt) => prompt.edit(ctx, reply).await?,
        None => {
            ctx.send(reply).await?;
        }
    }

    info!(player_tag = %player.tag, "🎮 Profile {verb}");

    forward_screenshot(ctx, &player, powerleague, &screenshot).await
}

fn player_embed(player: &PlayerDto) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new().color(EMBED_COLOR).author(
        serenity::CreateEmbedAuthor::new(format!("{} | {}", player.name, player.tag))
            .icon_url(player.icon_url()),
    )
}

/// Asks the author whether to overwrite their saved profile and returns the
/// prompt when they accept. Only the author may answer; no answer within the
/// timeout counts as cancel.
async fn confirm_overwrite<'a>(ctx: Context<'a>) -> Result<Option<ReplyHandle<'a>>, AppError> {
    let accept_id = format!("{}-accept", ctx.id());
    let cancel_id = format!("{}-cancel", ctx.id());
    let buttons = |disabled: bool| {
        vec![serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&accept_id)
                .label("Accept")
                .style(serenity::ButtonStyle::Success)
                .disabled(disabled),
            serenity::CreateButton::new(&cancel_id)
                .label("Cancel")
                .style(serenity::ButtonStyle::Danger)
                .disabled(disabled),
        ])]
    };

    let prompt = serenity::CreateEmbed::new()
        .color(ERROR_COLOR)
        .description(format!(
            "⚠️ · **{}**, you already have a profile saved. Do you want to overwrite it?",
            ctx.author().name
        ))
        .footer(serenity::CreateEmbedFooter::new(
            "This message will expire in 30 seconds.",
        ));

    let reply = ctx
        .send(CreateReply::default().embed(prompt).components(buttons(false)))
        .await?;
    let message_id = reply.message().await?.id;

    let ids = [accept_id.clone(), cancel_id.clone()];
    let answer = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
        .author_id(ctx.author().id)
        .message_id(message_id)
        .timeout(OVERWRITE_TIMEOUT)
        .filter(move |press| ids.contains(&press.data.custom_id))
        .await;

    let Some(press) = answer else {
        debug!("🎮 Overwrite prompt expired");
        reply
            .edit(ctx, CreateReply::default().components(buttons(true)))
            .await?;
        return Ok(None);
    };

    press
        .create_response(ctx, serenity::CreateInteractionResponse::Acknowledge)
        .await?;

    if press.data.custom_id == accept_id {
        return Ok(Some(reply));
    }

    let embed = serenity::CreateEmbed::new().color(EMBED_COLOR).description(format!(
        "❌ · **{}**, your profile has not been updated.",
        ctx.author().name
    ));
    reply
        .edit(
            ctx,
            CreateReply::default().embed(embed).components(Vec::new()),
        )
        .await?;

    Ok(None)
}

async fn forward_screenshot(
    ctx: Context<'_>,
    player: &PlayerDto,
    rank: PowerLeagueRank,
    screenshot: &serenity::Attachment,
) -> Result<(), AppError> {
    let webhooks = &ctx.data().webhooks;
    if !webhooks.is_enabled(LogChannel::Profile) {
        return Ok(());
    }

    let bytes = screenshot.download().await?;
    let author = ctx.author();
    let embed = serenity::CreateEmbed::new()
        .color(EMBED_COLOR)
        .author(
            serenity::CreateEmbedAuthor::new(format!("{}'s profile", author.name))
                .icon_url(author.face()),
        )
        .image("attachment://profile.png")
        .field("User", format!("<@{}>", author.id), true)
        .field("Tag", &player.tag, true)
        .field("Power League Rank", rank.display_name(), true)
        .footer(serenity::CreateEmbedFooter::new(author.id.to_string()))
        .timestamp(serenity::Timestamp::now());

    webhooks
        .send_with_files(
            LogChannel::Profile,
            embed,
            vec![serenity::CreateAttachment::bytes(bytes, "profile.png")],
        )
        .await;
    Ok(())
}

async fn autocomplete_brawler(
    ctx: Context<'_>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    ctx.data()
        .catalog
        .search(partial)
        .await
        .into_iter()
        .map(|brawler| serenity::AutocompleteChoice::new(brawler.name, brawler.id.to_string()))
        .collect()
}

/// Set your favourite brawler
#[poise::command(slash_command, guild_only)]
#[instrument(skip(ctx), fields(user_id = %ctx.author().id))]
pub async fn brawler(
    ctx: Context<'_>,
    #[description = "The brawler you want to set as your favourite"]
    #[autocomplete = "autocomplete_brawler"]
    brawler: String,
) -> Result<(), AppError> {
    ctx.defer().await?;

    let known = match brawler.trim().parse::<u32>() {
        Ok(id) => ctx.data().catalog.find(id).await,
        Err(_) => None,
    };
    let Some(known) = known else {
        return reply_error(ctx, format!("❌ · **{brawler}** is not a valid brawler.")).await;
    };

    let Some(profile) = require_profile(ctx, ctx.author()).await? else {
        return Ok(());
    };

    let player = ctx.data().brawl.get_player(&profile.player_tag).await?;
    if !player.brawlers.iter().any(|owned| owned.id == known.id) {
        return reply_error(
            ctx,
            format!("❌ · You don't have **{}** unlocked.", known.name),
        )
        .await;
    }

    ctx.data()
        .db
        .set_favourite_brawler(ctx.author().id.get(), known.id)
        .await?;

    let embed = serenity::CreateEmbed::new().color(EMBED_COLOR).description(format!(
        "✅ · **{}**, your favourite brawler has been updated to **{}**.",
        ctx.author().name,
        known.name
    ));
    ctx.send(CreateReply::default().embed(embed)).await?;

    info!(brawler_id = known.id, "🎮 Favourite brawler updated");
    Ok(())
}

/// Set the theme of your profile card (developers and server boosters)
#[poise::command(slash_command, guild_only)]
#[instrument(skip(ctx), fields(user_id = %ctx.author().id, theme = ?theme))]
pub async fn theme(
    ctx: Context<'_>,
    #[description = "The theme you want to set as your favourite"] theme: Theme,
) -> Result<(), AppError> {
    ctx.defer().await?;

    if require_profile(ctx, ctx.author()).await?.is_none() {
        return Ok(());
    }

    let is_booster = match ctx.author_member().await {
        Some(member) => member.premium_since.is_some(),
        None => false,
    };
    if !ctx.data().is_developer(ctx.author().id) && !is_booster {
        return reply_error(
            ctx,
            "❌ · Only developers and server boosters can use this command.",
        )
        .await;
    }

    ctx.data()
        .db
        .set_favourite_theme(ctx.author().id.get(), theme.id())
        .await?;

    let embed = serenity::CreateEmbed::new().color(EMBED_COLOR).description(format!(
        "✅ · **{}**, your favourite theme has been updated to **{}**.",
        ctx.author().name,
        theme.name()
    ));
    ctx.send(CreateReply::default().embed(embed)).await?;

    Ok(())
}
