use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use poise::serenity_prelude as serenity;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::brawl::BrawlClient;
use crate::config::Config;
use crate::db::{Repository, run_migrations};
use crate::discord::{Data, ImageGenerator, UserLocks, WebhookLogger, create_framework};
use crate::error::AppError;
use crate::poller::BrawlerCatalog;

mod brawl;
mod config;
mod db;
mod discord;
mod error;
mod logging;
mod poller;
mod rating;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    logging::init()?;

    info!(version = env!("CARGO_PKG_VERSION"), "⭐ Starting Vreezy");

    let options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    run_migrations(&pool).await?;

    let brawl = BrawlClient::new(
        config.brawl_api_key.clone(),
        config.brawl_api_url.clone(),
        config.brawl_rate_limit_per_second,
    );
    let image_gen = Arc::new(ImageGenerator::new()?);

    // first tick refreshes right away
    let catalog = BrawlerCatalog::new();
    tokio::spawn(poller::start_polling(
        catalog.clone(),
        brawl.clone(),
        config.brawler_catalog_url.clone(),
        config.brawler_refresh_secs,
    ));

    let webhooks = Arc::new(WebhookLogger::new(
        Arc::new(serenity::Http::new(&config.discord_token)),
        config.webhooks,
    ));

    let data = Data {
        db: Repository::new(pool),
        brawl,
        image_gen,
        catalog,
        rating: config.rating,
        webhooks,
        developers: config.developer_ids,
        seasonal_theme: config.seasonal_theme,
        rate_locks: UserLocks::default(),
        started_at: Instant::now(),
    };

    let mut client =
        serenity::ClientBuilder::new(&config.discord_token, serenity::GatewayIntents::GUILDS)
            .framework(create_framework(data))
            .await?;

    info!("🌐 Connecting to the Discord gateway");
    client.start().await?;

    Ok(())
}
