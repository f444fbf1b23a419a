use serde::Deserialize;

use crate::rating::BrawlerRecord;

// ============================================================================
// Players
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub tag: String,
    pub name: String,
    pub trophies: u32,
    pub highest_trophies: u32,
    pub exp_level: u32,
    #[serde(rename = "3vs3Victories")]
    pub trio_victories: u32,
    pub solo_victories: u32,
    pub duo_victories: u32,
    pub icon: IconDto,
    #[serde(default)]
    pub club: ClubDto,
    #[serde(default)]
    pub brawlers: Vec<PlayerBrawlerDto>,
}

impl PlayerDto {
    pub fn roster(&self) -> Vec<BrawlerRecord> {
        self.brawlers
            .iter()
            .map(|b| BrawlerRecord {
                id: b.id,
                trophies: b.trophies,
            })
            .collect()
    }

    pub fn club_name(&self) -> &str {
        self.club.name.as_deref().unwrap_or("No Club")
    }

    pub fn icon_url(&self) -> String {
        format!("https://cdn.brawlify.com/profile/{}.png", self.icon.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IconDto {
    pub id: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubDto {
    pub tag: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBrawlerDto {
    pub id: u32,
    pub name: String,
    pub power: u32,
    pub rank: u32,
    pub trophies: u32,
    pub highest_trophies: u32,
}

// ============================================================================
// Battle log
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BattleLogDto {
    pub items: Vec<BattleLogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleLogEntry {
    /// Formatted as `20240512T184501.000Z`.
    pub battle_time: String,
    #[serde(default)]
    pub event: Option<EventDto>,
    pub battle: BattleDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDto {
    pub mode: Option<String>,
    pub map: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BattleDto {
    pub mode: Option<String>,
    #[serde(rename = "type")]
    pub battle_type: Option<String>,
    pub result: Option<String>,
    /// Absent for placement modes such as showdown.
    pub teams: Option<Vec<Vec<BattlePlayerDto>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BattlePlayerDto {
    pub tag: String,
    pub name: String,
    pub brawler: BattleBrawlerDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BattleBrawlerDto {
    pub id: u32,
    pub name: String,
    pub trophies: i64,
}

// ============================================================================
// Brawler catalog
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BrawlerCatalogDto {
    pub list: Vec<BrawlerInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrawlerInfo {
    pub id: u32,
    pub name: String,
}

/// Error body returned by the game API on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDto {
    pub reason: Option<String>,
    pub message: Option<String>,
}
