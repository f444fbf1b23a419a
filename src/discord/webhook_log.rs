//! Audit trail posted to Discord channels through webhooks.

use std::sync::Arc;

use poise::serenity_prelude::{
    self as serenity, CreateAttachment, CreateEmbed, ExecuteWebhook, Http, Webhook,
};
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, warn};

use crate::config::WebhookUrls;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogChannel {
    Profile,
    Error,
    Command,
    Record,
}

impl LogChannel {
    fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile Logs",
            Self::Error => "Error Logs",
            Self::Command => "Command Logs",
            Self::Record => "Criminal Record",
        }
    }
}

struct WebhookTarget {
    url: String,
    webhook: OnceCell<Webhook>,
}

impl WebhookTarget {
    fn new(url: Option<String>) -> Option<Self> {
        url.map(|url| Self {
            url,
            webhook: OnceCell::new(),
        })
    }
}

#[derive(Debug, Clone, Default)]
struct Identity {
    name: String,
    avatar_url: Option<String>,
}

/// Posts embeds to the configured log webhooks. Channels without a URL are
/// silently disabled and delivery failures are only logged.
pub struct WebhookLogger {
    http: Arc<Http>,
    profile: Option<WebhookTarget>,
    error: Option<WebhookTarget>,
    command: Option<WebhookTarget>,
    record: Option<WebhookTarget>,
    identity: RwLock<Identity>,
}

impl WebhookLogger {
    pub fn new(http: Arc<Http>, urls: WebhookUrls) -> Self {
        Self {
            http,
            profile: WebhookTarget::new(urls.profile),
            error: WebhookTarget::new(urls.error),
            command: WebhookTarget::new(urls.command),
            record: WebhookTarget::new(urls.record),
            identity: RwLock::new(Identity {
                name: "Vreezy".to_string(),
                avatar_url: None,
            }),
        }
    }

    /// Webhook posts are signed with the bot's own name and avatar.
    pub async fn set_identity(&self, bot: &serenity::CurrentUser) {
        *self.identity.write().await = Identity {
            name: bot.name.clone(),
            avatar_url: bot.avatar_url(),
        };
    }

    pub fn is_enabled(&self, channel: LogChannel) -> bool {
        self.target(channel).is_some()
    }

    fn target(&self, channel: LogChannel) -> Option<&WebhookTarget> {
        match channel {
            LogChannel::Profile => self.profile.as_ref(),
            LogChannel::Error => self.error.as_ref(),
            LogChannel::Command => self.command.as_ref(),
            LogChannel::Record => self.record.as_ref(),
        }
    }

    pub async fn send(&self, channel: LogChannel, embed: CreateEmbed) {
        self.send_with_files(channel, embed, Vec::new()).await;
    }

    pub async fn send_with_files(
        &self,
        channel: LogChannel,
        embed: CreateEmbed,
        files: Vec<CreateAttachment>,
    ) {
        let Some(target) = self.target(channel) else {
            debug!(channel = ?channel, "🪝 Webhook disabled, skipping");
            return;
        };

        if let Err(e) = self.execute(channel, target, embed, files).await {
            warn!(error = ?e, channel = ?channel, "🪝 ⚠️ Failed to deliver webhook log");
        }
    }

    async fn execute(
        &self,
        channel: LogChannel,
        target: &WebhookTarget,
        embed: CreateEmbed,
        files: Vec<CreateAttachment>,
    ) -> Result<(), AppError> {
        let webhook = target
            .webhook
            .get_or_try_init(|| Webhook::from_url(&self.http, &target.url))
            .await?;

        let identity = self.identity.read().await.clone();
        let mut builder = ExecuteWebhook::new()
            .username(format!("{} | {}", identity.name, channel.label()))
            .embed(embed)
            .add_files(files);
        if let Some(avatar_url) = identity.avatar_url {
            builder = builder.avatar_url(avatar_url);
        }

        webhook.execute(&self.http, false, builder).await?;
        Ok(())
    }

    pub async fn log_error(&self, command: &str, error: &AppError) {
        let embed = CreateEmbed::new()
            .color(0xE74C3C)
            .description(format!("Command: `/{command}`\nError: `{error}`"))
            .timestamp(serenity::Timestamp::now());

        self.send(LogChannel::Error, embed).await;
    }

    pub async fn log_command(&self, entry: CommandLog<'_>) {
        let guild = match (entry.guild_name, entry.guild_id) {
            (Some(name), Some(id)) => format!("{name} ({id})"),
            (None, Some(id)) => id.to_string(),
            _ => "Direct message".to_string(),
        };
        let embed = CreateEmbed::new()
            .color(0x5865F2)
            .description(format!(
                "Command: `/{}`\nUser: <@{}>\nChannel: <#{}>\nGuild: {}\nExecution time: {} ms",
                entry.command, entry.user_id, entry.channel_id, guild, entry.elapsed_ms
            ))
            .timestamp(serenity::Timestamp::now());

        self.send(LogChannel::Command, embed).await;
    }
}

pub struct CommandLog<'a> {
    pub command: &'a str,
    pub user_id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub guild_name: Option<String>,
    pub elapsed_ms: u128,
}
