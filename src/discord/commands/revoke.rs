use poise::serenity_prelude as serenity;
use poise::{ChoiceParameter, CreateReply};
use tracing::{debug, info, instrument};

use crate::discord::bot::{Context, EMBED_COLOR, ERROR_COLOR};
use crate::discord::webhook_log::LogChannel;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum BlacklistDuration {
    #[name = "1 hour"]
    Hour,
    #[name = "12 hours"]
    HalfDay,
    #[name = "1 day"]
    Day,
    #[name = "3 days"]
    ThreeDays,
    #[name = "1 week"]
    Week,
    #[name = "1 month"]
    Month,
}

impl BlacklistDuration {
    pub fn seconds(self) -> i64 {
        const HOUR: i64 = 3_600;
        const DAY: i64 = 24 * HOUR;
        match self {
            Self::Hour => HOUR,
            Self::HalfDay => 12 * HOUR,
            Self::Day => DAY,
            Self::ThreeDays => 3 * DAY,
            Self::Week => 7 * DAY,
            Self::Month => 30 * DAY,
        }
    }
}

/// Moderation commands
#[poise::command(
    slash_command,
    guild_only,
    subcommands("user", "blacklist", "whitelist"),
    subcommand_required,
    required_permissions = "MODERATE_MEMBERS",
    default_member_permissions = "MODERATE_MEMBERS"
)]
pub async fn revoke(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Delete a user's saved profile
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS",
    default_member_permissions = "MODERATE_MEMBERS"
)]
#[instrument(skip_all, fields(moderator_id = %ctx.author().id, target_id = %user.id))]
pub async fn user(
    ctx: Context<'_>,
    #[description = "The user whose profile is removed"] user: serenity::User,
    #[description = "Why the profile is removed"] reason: String,
) -> Result<(), AppError> {
    ctx.defer_ephemeral().await?;

    if !ctx.data().db.delete_profile(user.id.get()).await? {
        return reply(ctx, ERROR_COLOR, format!("⚠️ · <@{}> does not have a profile saved.", user.id)).await;
    }
    info!(reason = %reason, "🎮 Profile revoked");

    record(ctx, &user, "Profile revoked", &reason, None).await;
    notify(
        ctx,
        &user,
        format!("Your Vreezy profile has been removed.\nReason: {reason}"),
    )
    .await;

    reply(ctx, EMBED_COLOR, format!("✅ · Profile of <@{}> has been removed.", user.id)).await
}

/// Ban a user from using the bot for a while
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS",
    default_member_permissions = "MODERATE_MEMBERS"
)]
#[instrument(skip_all, fields(moderator_id = %ctx.author().id, target_id = %user.id, duration = ?duration))]
pub async fn blacklist(
    ctx: Context<'_>,
    #[description = "The user to ban"] user: serenity::User,
    #[description = "How long the ban lasts"] duration: BlacklistDuration,
    #[description = "Why the user is banned"] reason: String,
) -> Result<(), AppError> {
    ctx.defer_ephemeral().await?;

    let until = chrono::Utc::now().timestamp() + duration.seconds();
    ctx.data().db.blacklist_user(user.id.get(), until).await?;
    info!(banned_until = until, reason = %reason, "🎮 User blacklisted");

    record(ctx, &user, "Blacklisted", &reason, Some(until)).await;
    notify(
        ctx,
        &user,
        format!(
            "You have been banned from using Vreezy for {} (until <t:{until}:f>).\nReason: {reason}",
            duration.name()
        ),
    )
    .await;

    reply(
        ctx,
        EMBED_COLOR,
        format!("✅ · <@{}> is banned until <t:{until}:f>.", user.id),
    )
    .await
}

/// Lift a user's ban
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS",
    default_member_permissions = "MODERATE_MEMBERS"
)]
#[instrument(skip_all, fields(moderator_id = %ctx.author().id, target_id = %user.id))]
pub async fn whitelist(
    ctx: Context<'_>,
    #[description = "The user to unban"] user: serenity::User,
) -> Result<(), AppError> {
    ctx.defer_ephemeral().await?;

    if !ctx.data().db.whitelist_user(user.id.get()).await? {
        return reply(ctx, ERROR_COLOR, format!("⚠️ · <@{}> is not blacklisted.", user.id)).await;
    }
    info!("🎮 User whitelisted");

    record(ctx, &user, "Whitelisted", "Ban lifted", None).await;
    notify(ctx, &user, "Your Vreezy ban has been lifted.".to_string()).await;

    reply(ctx, EMBED_COLOR, format!("✅ · <@{}> has been whitelisted.", user.id)).await
}

async fn reply(ctx: Context<'_>, color: u32, description: String) -> Result<(), AppError> {
    ctx.send(
        CreateReply::default()
            .embed(serenity::CreateEmbed::new().color(color).description(description))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Criminal record entry for the moderation log.
async fn record(
    ctx: Context<'_>,
    target: &serenity::User,
    action: &str,
    reason: &str,
    until: Option<i64>,
) {
    let mut embed = serenity::CreateEmbed::new()
        .color(ERROR_COLOR)
        .author(serenity::CreateEmbedAuthor::new(&target.name).icon_url(target.face()))
        .title(action)
        .field("User", format!("<@{}>", target.id), true)
        .field("Moderator", format!("<@{}>", ctx.author().id), true)
        .field("Reason", reason, false)
        .footer(serenity::CreateEmbedFooter::new(target.id.to_string()))
        .timestamp(serenity::Timestamp::now());
    if let Some(until) = until {
        embed = embed.field("Until", format!("<t:{until}:f>"), true);
    }

    ctx.data().webhooks.send(LogChannel::Record, embed).await;
}

/// Targets with closed DMs are skipped.
async fn notify(ctx: Context<'_>, target: &serenity::User, message: String) {
    let embed = serenity::CreateEmbed::new().color(ERROR_COLOR).description(message);
    if let Err(e) = target
        .direct_message(ctx, serenity::CreateMessage::new().embed(embed))
        .await
    {
        debug!(error = %e, target_id = %target.id, "🎮 Could not DM user");
    }
}
