use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use super::error::RatingError;
use crate::brawl::types::BattleLogEntry;

const BATTLE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S%.3fZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleResult {
    Victory,
    Defeat,
    Draw,
}

impl FromStr for BattleResult {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "victory" => Ok(Self::Victory),
            "defeat" => Ok(Self::Defeat),
            "draw" => Ok(Self::Draw),
            _ => Err(RatingError::UnknownVariant {
                kind: "result",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleType {
    Ranked,
    SoloRanked,
    TeamRanked,
    Friendly,
    Challenge,
    Tournament,
    ChampionshipChallenge,
}

impl BattleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ranked => "ranked",
            Self::SoloRanked => "soloRanked",
            Self::TeamRanked => "teamRanked",
            Self::Friendly => "friendly",
            Self::Challenge => "challenge",
            Self::Tournament => "tournament",
            Self::ChampionshipChallenge => "championshipChallenge",
        }
    }
}

impl FromStr for BattleType {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ranked" => Ok(Self::Ranked),
            "soloRanked" => Ok(Self::SoloRanked),
            "teamRanked" => Ok(Self::TeamRanked),
            "friendly" => Ok(Self::Friendly),
            "challenge" => Ok(Self::Challenge),
            "tournament" => Ok(Self::Tournament),
            "championshipChallenge" => Ok(Self::ChampionshipChallenge),
            _ => Err(RatingError::UnknownVariant {
                kind: "type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BattleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game modes. Modes rotate often, so anything unknown is kept as `Other`
/// and never matches an allow-list built from known modes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BattleMode {
    GemGrab,
    BrawlBall,
    Heist,
    Bounty,
    HotZone,
    Knockout,
    Siege,
    Wipeout,
    Duels,
    SoloShowdown,
    DuoShowdown,
    Other(String),
}

impl BattleMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::GemGrab => "gemGrab",
            Self::BrawlBall => "brawlBall",
            Self::Heist => "heist",
            Self::Bounty => "bounty",
            Self::HotZone => "hotZone",
            Self::Knockout => "knockout",
            Self::Siege => "siege",
            Self::Wipeout => "wipeout",
            Self::Duels => "duels",
            Self::SoloShowdown => "soloShowdown",
            Self::DuoShowdown => "duoShowdown",
            Self::Other(mode) => mode,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for BattleMode {
    fn from(s: &str) -> Self {
        match s {
            "gemGrab" => Self::GemGrab,
            "brawlBall" => Self::BrawlBall,
            "heist" => Self::Heist,
            "bounty" => Self::Bounty,
            "hotZone" => Self::HotZone,
            "knockout" => Self::Knockout,
            "siege" => Self::Siege,
            "wipeout" => Self::Wipeout,
            "duels" => Self::Duels,
            "soloShowdown" => Self::SoloShowdown,
            "duoShowdown" => Self::DuoShowdown,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BattleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub tag: String,
    pub brawler_trophies: i64,
}

pub type Team = Vec<Participant>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleRecord {
    pub mode: BattleMode,
    pub battle_type: BattleType,
    pub result: BattleResult,
    pub timestamp_unix: i64,
    pub teams: Vec<Team>,
}

impl BattleRecord {
    /// Converts one battle log entry. Entries that can never be rated (no
    /// team result, no mode or type) are `Ok(None)`.
    pub fn from_entry(entry: &BattleLogEntry) -> Result<Option<Self>, RatingError> {
        let battle = &entry.battle;

        let mode = battle
            .mode
            .as_deref()
            .or_else(|| entry.event.as_ref().and_then(|e| e.mode.as_deref()));

        let (Some(mode), Some(battle_type), Some(result), Some(teams)) = (
            mode,
            battle.battle_type.as_deref(),
            battle.result.as_deref(),
            battle.teams.as_ref(),
        ) else {
            return Ok(None);
        };

        let teams = teams
            .iter()
            .map(|team| {
                team.iter()
                    .map(|player| Participant {
                        tag: player.tag.clone(),
                        brawler_trophies: player.brawler.trophies,
                    })
                    .collect()
            })
            .collect();

        Ok(Some(Self {
            mode: BattleMode::from(mode),
            battle_type: battle_type.parse()?,
            result: result.parse()?,
            timestamp_unix: parse_battle_time(&entry.battle_time)?,
            teams,
        }))
    }
}

pub fn parse_battle_time(battle_time: &str) -> Result<i64, RatingError> {
    NaiveDateTime::parse_from_str(battle_time, BATTLE_TIME_FORMAT)
        .map(|time| time.and_utc().timestamp())
        .map_err(|_| RatingError::InvalidBattleTime(battle_time.to_string()))
}

#[derive(Debug, Default)]
pub struct Ingested {
    pub battles: Vec<BattleRecord>,
    pub rejected: Vec<RatingError>,
}

/// Converts a raw battle log, keeping its order (newest first).
pub fn ingest(entries: &[BattleLogEntry]) -> Ingested {
    let mut ingested = Ingested::default();

    for entry in entries {
        match BattleRecord::from_entry(entry) {
            Ok(Some(battle)) => ingested.battles.push(battle),
            Ok(None) => debug!(battle_time = %entry.battle_time, "⚔️ Skipping placement battle"),
            Err(e) => {
                warn!(error = %e, battle_time = %entry.battle_time, "⚔️ ⚠️ Rejected battle log entry");
                ingested.rejected.push(e);
            }
        }
    }

    ingested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brawl::types::BattleLogDto;

    const LOG: &str = r##"{
        "items": [
            {
                "battleTime": "20240512T184501.000Z",
                "event": { "mode": "gemGrab", "map": "Hard Rock Mine" },
                "battle": {
                    "mode": "gemGrab",
                    "type": "soloRanked",
                    "result": "victory",
                    "duration": 120,
                    "teams": [
                        [
                            { "tag": "#P1", "name": "me", "brawler": { "id": 16000000, "name": "SHELLY", "power": 11, "trophies": 12 } },
                            { "tag": "#P2", "name": "ally", "brawler": { "id": 16000001, "name": "COLT", "power": 11, "trophies": 11 } }
                        ],
                        [
                            { "tag": "#E1", "name": "foe", "brawler": { "id": 16000002, "name": "BULL", "power": 11, "trophies": 13 } }
                        ]
                    ]
                }
            },
            {
                "battleTime": "20240512T180000.000Z",
                "event": { "mode": "soloShowdown", "map": "Skull Creek" },
                "battle": { "mode": "soloShowdown", "type": "ranked", "rank": 3, "players": [] }
            },
            {
                "battleTime": "20240512T170000.000Z",
                "battle": { "mode": "brawlBall", "type": "ranked", "result": "forfeit", "teams": [] }
            }
        ]
    }"##;

    #[test]
    fn parses_battle_time() {
        assert_eq!(parse_battle_time("19700101T000010.000Z"), Ok(10));
        assert_eq!(parse_battle_time("20240512T184501.000Z"), Ok(1_715_539_501));
        assert!(parse_battle_time("2024-05-12").is_err());
    }

    #[test]
    fn unknown_variants_are_rejected() {
        assert!("forfeit".parse::<BattleResult>().is_err());
        assert!("casual".parse::<BattleType>().is_err());
        assert_eq!("soloRanked".parse::<BattleType>(), Ok(BattleType::SoloRanked));
    }

    #[test]
    fn unknown_modes_are_kept() {
        let mode = BattleMode::from("paintBrawl");
        assert_eq!(mode, BattleMode::Other("paintBrawl".to_string()));
        assert!(!mode.is_known());
        assert_eq!(BattleMode::from("hotZone"), BattleMode::HotZone);
    }

    #[test]
    fn ingests_battle_log() {
        let log: BattleLogDto = serde_json::from_str(LOG).unwrap();
        let ingested = ingest(&log.items);

        assert_eq!(ingested.battles.len(), 1);
        assert_eq!(ingested.rejected.len(), 1);

        let battle = &ingested.battles[0];
        assert_eq!(battle.mode, BattleMode::GemGrab);
        assert_eq!(battle.battle_type, BattleType::SoloRanked);
        assert_eq!(battle.result, BattleResult::Victory);
        assert_eq!(battle.timestamp_unix, 1_715_539_501);
        assert_eq!(battle.teams.len(), 2);
        assert_eq!(battle.teams[0][0].tag, "#P1");
        assert_eq!(battle.teams[1][0].brawler_trophies, 13);
    }
}
