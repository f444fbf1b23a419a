use std::collections::HashSet;
use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::AppError;
use crate::rating::{BattleMode, BattleType, RankPenaltyTable, RatingConfig};

#[derive(Debug, Clone, Default)]
pub struct WebhookUrls {
    pub profile: Option<String>,
    pub error: Option<String>,
    pub command: Option<String>,
    pub record: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub brawl_api_key: String,
    pub brawl_api_url: String,
    pub brawler_catalog_url: String,
    pub database_url: String,
    pub brawl_rate_limit_per_second: NonZeroU32,
    pub brawler_refresh_secs: u64,
    pub rating: RatingConfig,
    pub developer_ids: Vec<u64>,
    pub seasonal_theme: String,
    pub webhooks: WebhookUrls,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        const DEFAULT_BRAWL_API_URL: &str = "https://api.brawlstars.com/v1";
        const DEFAULT_BRAWLER_CATALOG_URL: &str = "https://api.brawlify.com/v1/brawlers";
        const DEFAULT_BRAWLER_REFRESH_SECS: u64 = 3600;
        const DEFAULT_BRAWL_RATE_LIMIT_PER_SECOND: u32 = 10;
        const DEFAULT_SEASONAL_THEME: &str = "0";

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| AppError::Config("DISCORD_TOKEN must be set".into()))?;

        let brawl_api_key = env::var("BRAWL_API_KEY")
            .map_err(|_| AppError::Config("BRAWL_API_KEY must be set".into()))?;

        let brawl_api_url =
            env::var("BRAWL_API_URL").unwrap_or_else(|_| DEFAULT_BRAWL_API_URL.into());

        let brawler_catalog_url = env::var("BRAWLER_CATALOG_URL")
            .unwrap_or_else(|_| DEFAULT_BRAWLER_CATALOG_URL.into());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:vreezy.db".into());

        let brawl_rate_limit_per_second = env::var("BRAWL_RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_BRAWL_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let brawler_refresh_secs = env::var("BRAWLER_REFRESH_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BRAWLER_REFRESH_SECS);

        let rating = rating_config(
            env::var("ALLOWED_MODES").ok().as_deref(),
            env::var("ALLOWED_TYPES").ok().as_deref(),
            env::var("RANK_PENALTIES").ok().as_deref(),
        )?;

        let developer_ids = match env::var("DEVELOPER_IDS") {
            Ok(raw) => parse_list::<u64>(&raw, "DEVELOPER_IDS")?,
            Err(_) => Vec::new(),
        };

        let seasonal_theme =
            env::var("SEASONAL_THEME").unwrap_or_else(|_| DEFAULT_SEASONAL_THEME.into());

        let webhooks = WebhookUrls {
            profile: non_empty_var("PROFILE_WEBHOOK_URL"),
            error: non_empty_var("ERROR_WEBHOOK_URL"),
            command: non_empty_var("COMMAND_WEBHOOK_URL"),
            record: non_empty_var("RECORD_WEBHOOK_URL"),
        };

        Ok(Self {
            discord_token,
            brawl_api_key,
            brawl_api_url,
            brawler_catalog_url,
            database_url,
            brawl_rate_limit_per_second,
            brawler_refresh_secs,
            rating,
            developer_ids,
            seasonal_theme,
            webhooks,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Builds the rating configuration from comma separated overrides. Unset
/// values fall back to the defaults.
fn rating_config(
    modes: Option<&str>,
    types: Option<&str>,
    penalties: Option<&str>,
) -> Result<RatingConfig, AppError> {
    let mut config = RatingConfig::default();

    if let Some(raw) = modes {
        let allowed_modes: HashSet<BattleMode> = split(raw).map(BattleMode::from).collect();
        if let Some(unknown) = allowed_modes.iter().find(|mode| !mode.is_known()) {
            return Err(AppError::Config(format!(
                "ALLOWED_MODES contains unknown mode `{unknown}`"
            )));
        }
        config.allowed_modes = allowed_modes;
    }

    if let Some(raw) = types {
        config.allowed_types = split(raw)
            .map(BattleType::from_str)
            .collect::<Result<_, _>>()
            .map_err(|e| AppError::Config(format!("ALLOWED_TYPES: {e}")))?;
    }

    if let Some(raw) = penalties {
        config.rank_penalties = RankPenaltyTable::new(parse_list(raw, "RANK_PENALTIES")?);
    }

    Ok(config)
}

fn split(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_list<T: FromStr>(raw: &str, key: &str) -> Result<Vec<T>, AppError> {
    split(raw)
        .map(|item| {
            item.parse()
                .map_err(|_| AppError::Config(format!("{key} contains invalid value `{item}`")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = rating_config(None, None, None).unwrap();
        assert_eq!(config, RatingConfig::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = rating_config(
            Some("gemGrab, heist"),
            Some("soloRanked"),
            Some("30,20,10"),
        )
        .unwrap();

        assert_eq!(
            config.allowed_modes,
            HashSet::from([BattleMode::GemGrab, BattleMode::Heist])
        );
        assert_eq!(config.allowed_types, HashSet::from([BattleType::SoloRanked]));
        assert_eq!(config.rank_penalties, RankPenaltyTable::new(vec![30, 20, 10]));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = rating_config(Some("gemGrab,pinball"), None, None).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("pinball")));
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(matches!(
            rating_config(None, Some("ranked,casual"), None),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn invalid_penalty_is_rejected() {
        assert!(matches!(
            rating_config(None, None, Some("10,ten")),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn developer_ids_parse() {
        let ids: Vec<u64> = parse_list("1, 2,,3", "DEVELOPER_IDS").unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
