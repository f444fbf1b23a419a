use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine;
use reqwest::Client;
use tiny_skia::Pixmap;
use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};
use usvg::fontdb::Database;
use usvg::{Options, Tree};

use super::theme::Theme;
use crate::brawl::PlayerDto;
use crate::error::AppError;
use crate::rating::{SeasonReset, trophy_road_tier};

const SVG_TEMPLATE: &str = include_str!("../../assets/profile_template.svg");

const CACHE_TTL: Duration = Duration::from_secs(24 * 3600);
const CACHE_MAX_ENTRIES: usize = 512;

#[derive(Debug, Clone)]
struct CacheEntry {
    data_uri: String,
    fetched_at: Instant,
}

/// In-memory cache of remote images as data URIs, ready to embed in SVG.
#[derive(Default)]
pub struct ImageCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ImageCache {
    async fn get_or_fetch(&self, http: &Client, url: &str) -> Option<String> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(url)
                && entry.fetched_at.elapsed() <= CACHE_TTL
            {
                trace!(url, "🖼️ Cache hit");
                return Some(entry.data_uri.clone());
            }
        }

        trace!(url, "🖼️ Fetching image");
        let bytes = match http.get(url).send().await {
            Ok(response) if response.status().is_success() => match response.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(url, error = ?e, "🖼️ ⚠️ Failed to read image bytes");
                    return None;
                }
            },
            Ok(response) => {
                warn!(
                    url,
                    status = response.status().as_u16(),
                    "🖼️ ⚠️ Image fetch failed"
                );
                return None;
            }
            Err(e) => {
                warn!(url, error = ?e, "🖼️ ⚠️ Image request failed");
                return None;
            }
        };

        let data_uri = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );

        let mut entries = self.entries.write().await;
        if entries.len() >= CACHE_MAX_ENTRIES {
            entries.retain(|_, entry| entry.fetched_at.elapsed() <= CACHE_TTL);
            if entries.len() >= CACHE_MAX_ENTRIES {
                entries.clear();
            }
        }
        entries.insert(
            url.to_string(),
            CacheEntry {
                data_uri: data_uri.clone(),
                fetched_at: Instant::now(),
            },
        );

        debug!(url, "🖼️ ✅ Image cached");
        Some(data_uri)
    }
}

/// Everything drawn on a profile card.
pub struct ProfileCard<'a> {
    pub player: &'a PlayerDto,
    pub season: SeasonReset,
    pub win_percentage: f64,
    pub favourite_brawler: Option<(u32, &'a str)>,
    pub power_league: &'a str,
    pub brawlers_total: usize,
    pub theme: Theme,
}

pub struct ImageGenerator {
    http: Client,
    cache: ImageCache,
    fontdb: Arc<Database>,
}

impl ImageGenerator {
    pub fn new() -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(concat!("Vreezy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut fontdb = Database::new();
        fontdb.load_system_fonts();
        info!(font_count = fontdb.len(), "🖼️ Loaded system fonts");

        Ok(Self {
            http,
            cache: ImageCache::default(),
            fontdb: Arc::new(fontdb),
        })
    }

    pub async fn generate_profile_card(&self, card: &ProfileCard<'_>) -> Result<Vec<u8>, AppError> {
        let player_icon = self
            .cache
            .get_or_fetch(&self.http, &card.player.icon_url())
            .await;

        let portrait = match card.favourite_brawler {
            Some((id, _)) => {
                let url = format!("https://cdn.brawlify.com/brawlers/borderless/{id}.png");
                self.cache.get_or_fetch(&self.http, &url).await
            }
            None => None,
        };

        let svg = build_svg(card, player_icon.as_deref(), portrait.as_deref());
        self.render_svg_to_png(&svg)
    }

    fn render_svg_to_png(&self, svg_content: &str) -> Result<Vec<u8>, AppError> {
        let options = Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };

        let tree =
            Tree::from_str(svg_content, &options).map_err(|e| AppError::ImageGeneration {
                message: format!("Failed to parse SVG: {}", e),
            })?;

        let size = tree.size();
        let width = size.width() as u32;
        let height = size.height() as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| AppError::ImageGeneration {
            message: "Failed to create pixmap".to_string(),
        })?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let png_data = pixmap.encode_png().map_err(|e| AppError::ImageGeneration {
            message: format!("Failed to encode PNG: {}", e),
        })?;

        debug!(
            width,
            height,
            size = png_data.len(),
            "🖼️ ✅ Image generated"
        );
        Ok(png_data)
    }
}

fn build_svg(card: &ProfileCard<'_>, player_icon: Option<&str>, portrait: Option<&str>) -> String {
    let player = card.player;
    let palette = card.theme.palette();
    let favourite = card.favourite_brawler.map_or("Unknown", |(_, name)| name);

    let replacements = [
        ("{{bg_start}}", palette.background_start.to_string()),
        ("{{bg_end}}", palette.background_end.to_string()),
        ("{{panel}}", palette.panel.to_string()),
        ("{{accent}}", palette.accent.to_string()),
        ("{{player_name}}", xml_escape(&player.name)),
        ("{{club_name}}", xml_escape(player.club_name())),
        ("{{highest_trophies}}", player.highest_trophies.to_string()),
        ("{{trio_victories}}", player.trio_victories.to_string()),
        ("{{solo_victories}}", player.solo_victories.to_string()),
        ("{{duo_victories}}", player.duo_victories.to_string()),
        (
            "{{trophies_after_reset}}",
            card.season.trophies_after_reset.to_string(),
        ),
        ("{{season_rewards}}", card.season.total_reward.to_string()),
        ("{{win_percentage}}", format!("{:.2}", card.win_percentage)),
        (
            "{{tier}}",
            trophy_road_tier(player.highest_trophies).to_string(),
        ),
        ("{{power_league}}", xml_escape(card.power_league)),
        ("{{favourite_brawler}}", xml_escape(favourite)),
        (
            "{{brawlers_unlocked}}",
            format!("{}/{}", player.brawlers.len(), card.brawlers_total),
        ),
        ("{{version}}", env!("CARGO_PKG_VERSION").to_string()),
        ("{{player_icon}}", player_icon.unwrap_or_default().to_string()),
        ("{{portrait}}", portrait.unwrap_or_default().to_string()),
    ];

    let mut svg = handle_conditional_block(SVG_TEMPLATE, "player_icon", player_icon.is_some());
    svg = handle_conditional_block(&svg, "portrait", portrait.is_some());

    for (placeholder, value) in &replacements {
        svg = svg.replace(placeholder, value);
    }

    svg
}

/// Mustache-like conditional blocks: `{{#name}}content{{/name}}`
fn handle_conditional_block(svg: &str, name: &str, show: bool) -> String {
    let tag_open = format!("{{{{#{}}}}}", name);
    let tag_close = format!("{{{{/{}}}}}", name);

    if show {
        return svg.replace(&tag_open, "").replace(&tag_close, "");
    }

    let mut result = svg.to_string();
    if let (Some(start), Some(end)) = (result.find(&tag_open), result.find(&tag_close)) {
        result.replace_range(start..end + tag_close.len(), "");
    }
    result
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brawl::types::{ClubDto, IconDto};

    fn player() -> PlayerDto {
        PlayerDto {
            tag: "#2PP0Q8".into(),
            name: "<Vreezy & co>".into(),
            trophies: 25000,
            highest_trophies: 26012,
            exp_level: 180,
            trio_victories: 9000,
            solo_victories: 700,
            duo_victories: 800,
            icon: IconDto { id: 28000000 },
            club: ClubDto::default(),
            brawlers: Vec::new(),
        }
    }

    fn card(player: &PlayerDto) -> ProfileCard<'_> {
        ProfileCard {
            player,
            season: SeasonReset {
                trophies_after_reset: 24100,
                total_reward: 440,
            },
            win_percentage: 66.666,
            favourite_brawler: Some((16000000, "Shelly")),
            power_league: "Mythic II",
            brawlers_total: 80,
            theme: Theme::Midnight,
        }
    }

    #[test]
    fn every_placeholder_is_filled() {
        let player = player();
        let svg = build_svg(&card(&player), Some("data:image/png;base64,AA=="), None);

        assert!(!svg.contains("{{"), "unfilled placeholder in {svg}");
        assert!(svg.contains("&lt;Vreezy &amp; co&gt;"));
        assert!(svg.contains("No Club"));
        assert!(svg.contains("24100"));
        assert!(svg.contains("66.67"));
        assert!(svg.contains("0/80"));
        assert!(svg.contains("#050A1F"));
        assert!(svg.contains("data:image/png;base64,AA=="));
    }

    #[test]
    fn missing_images_drop_their_blocks() {
        let player = player();
        let svg = build_svg(&card(&player), None, None);

        assert!(!svg.contains("<image"));
    }

    #[test]
    fn conditional_blocks() {
        let svg = "a{{#x}}b{{/x}}c";
        assert_eq!(handle_conditional_block(svg, "x", true), "abc");
        assert_eq!(handle_conditional_block(svg, "x", false), "ac");
    }

    #[test]
    fn renders_png() {
        let generator = ImageGenerator {
            http: Client::new(),
            cache: ImageCache::default(),
            fontdb: Arc::new(Database::new()),
        };
        let png = generator
            .render_svg_to_png(r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4" fill="red"/></svg>"#)
            .unwrap();

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
