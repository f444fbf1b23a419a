use std::sync::Arc;
use std::time::Instant;

use poise::serenity_prelude as serenity;
use poise::CreateReply;
use tracing::{debug, error, info, warn};

use crate::brawl::BrawlClient;
use crate::db::Repository;
use crate::error::AppError;
use crate::poller::BrawlerCatalog;
use crate::rating::RatingConfig;

use super::commands;
use super::image_gen::ImageGenerator;
use super::locks::UserLocks;
use super::webhook_log::{CommandLog, WebhookLogger};

/// Colour of every regular bot embed.
pub const EMBED_COLOR: u32 = 0xCB35F9;
pub const ERROR_COLOR: u32 = 0xE74C3C;

/// Shared data accessible in all commands
pub struct Data {
    pub db: Repository,
    pub brawl: BrawlClient,
    pub image_gen: Arc<ImageGenerator>,
    pub catalog: BrawlerCatalog,
    pub rating: RatingConfig,
    pub webhooks: Arc<WebhookLogger>,
    pub developers: Vec<u64>,
    pub seasonal_theme: String,
    pub rate_locks: UserLocks,
    pub started_at: Instant,
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("db", &self.db)
            .field("brawl", &self.brawl)
            .field("image_gen", &"<ImageGenerator>")
            .field("developers", &self.developers)
            .finish_non_exhaustive()
    }
}

impl Data {
    pub fn is_developer(&self, user_id: serenity::UserId) -> bool {
        self.developers.contains(&user_id.get())
    }
}

pub type Context<'a> = poise::Context<'a, Data, AppError>;

pub fn create_framework(data: Data) -> poise::Framework<Data, AppError> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::set(),
                commands::profile(),
                commands::rate(),
                commands::brawlers(),
                commands::info(),
                commands::revoke(),
            ],
            command_check: Some(|ctx| Box::pin(reject_blacklisted(ctx))),
            pre_command: |ctx| {
                Box::pin(async move {
                    ctx.set_invocation_data(Instant::now()).await;
                })
            },
            post_command: |ctx| Box::pin(log_command(ctx)),
            on_error: |error| {
                Box::pin(async move {
                    handle_error(error).await;
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                data.webhooks.set_identity(&ready.user).await;
                info!(
                    bot_name = %ready.user.name,
                    guild_count = ready.guilds.len(),
                    "🎮 Bot is ready"
                );
                Ok(data)
            })
        })
        .build()
}

/// Runs before every command. Blacklisted users get told until when and the
/// command is skipped.
async fn reject_blacklisted(ctx: Context<'_>) -> Result<bool, AppError> {
    let now = chrono::Utc::now().timestamp();
    let Some(ban) = ctx.data().db.active_ban(ctx.author().id.get(), now).await? else {
        return Ok(true);
    };

    debug!(
        user_id = %ctx.author().id,
        banned_until = ban.banned_until,
        "🎮 Blacklisted user rejected"
    );
    ctx.send(
        CreateReply::default()
            .content(format!(
                "You are banned from using the bot until <t:{}:f>.",
                ban.banned_until
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(false)
}

async fn log_command(ctx: Context<'_>) {
    let elapsed_ms = match ctx.invocation_data::<Instant>().await {
        Some(started) => started.elapsed().as_millis(),
        None => 0,
    };
    let command = ctx.command().qualified_name.as_str();

    debug!(command, elapsed_ms, user_id = %ctx.author().id, "🎮 Command completed");

    let guild_name = ctx.guild().map(|guild| guild.name.clone());
    ctx.data()
        .webhooks
        .log_command(CommandLog {
            command,
            user_id: ctx.author().id.get(),
            channel_id: ctx.channel_id().get(),
            guild_id: ctx.guild_id().map(|id| id.get()),
            guild_name,
            elapsed_ms,
        })
        .await;
}

fn error_reply(message: &str) -> CreateReply {
    CreateReply::default()
        .embed(
            serenity::CreateEmbed::new()
                .color(ERROR_COLOR)
                .description(message),
        )
        .ephemeral(true)
}

async fn handle_error(error: poise::FrameworkError<'_, Data, AppError>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command_name = ctx.command().qualified_name.as_str();
            error!(
                error = ?error,
                command = command_name,
                user_id = %ctx.author().id,
                "🎮 ❌ Command execution failed"
            );
            ctx.data().webhooks.log_error(command_name, &error).await;
            let _ = ctx.send(error_reply(error.user_message())).await;
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => match error {
            Some(error) => {
                error!(
                    error = ?error,
                    command = ctx.command().qualified_name.as_str(),
                    "🎮 ❌ Command check failed"
                );
                ctx.data()
                    .webhooks
                    .log_error(&ctx.command().qualified_name, &error)
                    .await;
                let _ = ctx.send(error_reply(error.user_message())).await;
            }
            None => debug!(
                command = ctx.command().qualified_name.as_str(),
                "🎮 Command check rejected invocation"
            ),
        },
        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
            warn!(
                error = %error,
                command = ctx.command().name.as_str(),
                "🎮 ⚠️ Invalid command argument"
            );
            let _ = ctx
                .send(error_reply(&format!("Invalid argument: {}", error)))
                .await;
        }
        poise::FrameworkError::MissingBotPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            warn!(
                permissions = %missing_permissions,
                command = ctx.command().name.as_str(),
                "🎮 ⚠️ Bot missing permissions"
            );
            let _ = ctx
                .send(error_reply(&format!(
                    "Missing permissions: {}",
                    missing_permissions
                )))
                .await;
        }
        poise::FrameworkError::MissingUserPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            warn!(
                permissions = ?missing_permissions,
                user_id = %ctx.author().id,
                command = ctx.command().name.as_str(),
                "🎮 ⚠️ User missing permissions"
            );
            let _ = ctx
                .send(error_reply(
                    "❌ · You do not have permission to use this command.",
                ))
                .await;
        }
        other => {
            error!(error = ?other, "🎮 ❌ Unhandled framework error");
        }
    }
}
