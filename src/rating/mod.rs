//! Rating engine: turns a battle log and the stored profile into an updated
//! score, and projects the season reset of a roster.
//!
//! Everything in here is synchronous and free of I/O. Persisting the
//! resulting [`RatingSummary`] is up to the caller.

use std::collections::HashSet;

mod aggregate;
mod bands;
mod battle;
mod error;
mod score;
mod season;

pub use bands::trophy_road_tier;
pub use battle::{BattleMode, BattleRecord, BattleResult, BattleType, ingest};
pub use score::RankPenaltyTable;
pub use season::{BrawlerRecord, SeasonReset, compute_season_reset};

use aggregate::aggregate;
use score::{rank_change_bonus, score_delta};

/// Battles needed before the profile card shows a win percentage.
const MIN_RANKED_BATTLES_FOR_WIN_RATE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingConfig {
    pub allowed_modes: HashSet<BattleMode>,
    pub allowed_types: HashSet<BattleType>,
    pub rank_penalties: RankPenaltyTable,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            allowed_modes: HashSet::from([
                BattleMode::GemGrab,
                BattleMode::BrawlBall,
                BattleMode::Heist,
                BattleMode::Bounty,
                BattleMode::HotZone,
                BattleMode::Knockout,
            ]),
            allowed_types: HashSet::from([BattleType::Ranked, BattleType::SoloRanked]),
            rank_penalties: RankPenaltyTable::default(),
        }
    }
}

/// Rating fields of a stored profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileState {
    pub player_tag: String,
    pub score: i64,
    pub power_league_rank: i64,
    pub last_recorded_battle_time: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSummary {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub higher_opponents: u32,
    pub lower_opponents: u32,
    pub equal_opponents: u32,
    pub total_opponents: u32,
    pub score_delta: i64,
    pub new_score: i64,
    pub new_power_league_rank: i64,
    pub new_last_recorded_battle_time: i64,
    /// Battles that were eligible but could not be attributed to the player.
    pub malformed: usize,
}

impl RatingSummary {
    pub fn battles(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f64 {
        match self.battles() {
            0 => 0.0,
            total => f64::from(self.wins) / f64::from(total) * 100.0,
        }
    }
}

/// Rates every battle newer than the profile's last recorded battle.
///
/// `battles` is expected newest first, as the battle log returns it. The new
/// power league rank comes from the first counted solo ranked battle.
pub fn rate(profile: &ProfileState, battles: &[BattleRecord], config: &RatingConfig) -> RatingSummary {
    let aggregation = aggregate(
        battles,
        &profile.player_tag,
        config,
        profile.last_recorded_battle_time,
    );

    let new_power_league_rank = aggregation
        .counted
        .iter()
        .find_map(|battle| battle.power_league_trophies)
        .unwrap_or(profile.power_league_rank);

    let score_delta = score_delta(&aggregation.counted, &config.rank_penalties)
        + rank_change_bonus(profile.power_league_rank, new_power_league_rank);

    let new_last_recorded_battle_time = battles
        .first()
        .map_or(profile.last_recorded_battle_time, |newest| {
            newest.timestamp_unix.max(profile.last_recorded_battle_time)
        });

    RatingSummary {
        wins: aggregation.tally.wins,
        losses: aggregation.tally.losses,
        draws: aggregation.tally.draws,
        higher_opponents: aggregation.opponents.higher,
        lower_opponents: aggregation.opponents.lower,
        equal_opponents: aggregation.opponents.equal,
        total_opponents: aggregation.opponents.total,
        score_delta,
        new_score: profile.score + score_delta,
        new_power_league_rank,
        new_last_recorded_battle_time,
        malformed: aggregation.malformed.len(),
    }
}

/// Win percentage over trophy ladder battles, shown on the profile card.
/// Fewer than ten such battles is not enough to show anything.
pub fn ranked_win_percentage(battles: &[BattleRecord]) -> f64 {
    let ranked: Vec<&BattleRecord> = battles
        .iter()
        .filter(|battle| battle.battle_type == BattleType::Ranked)
        .collect();

    if ranked.len() < MIN_RANKED_BATTLES_FOR_WIN_RATE {
        return 0.0;
    }

    let wins = ranked
        .iter()
        .filter(|battle| battle.result == BattleResult::Victory)
        .count();
    let losses = ranked
        .iter()
        .filter(|battle| battle.result == BattleResult::Defeat)
        .count();

    match wins + losses {
        0 => 0.0,
        total => wins as f64 / total as f64 * 100.0,
    }
}
