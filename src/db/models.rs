use sqlx::FromRow;

use crate::rating::ProfileState;

#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub user_id: i64,
    pub player_tag: String,
    pub power_league_rank: i64,
    pub score: i64,
    pub last_recorded_battle_time: i64,
    pub favourite_brawler: Option<i64>,
    pub favourite_theme: Option<String>,
}

impl Profile {
    pub fn to_state(&self) -> ProfileState {
        ProfileState {
            player_tag: self.player_tag.clone(),
            score: self.score,
            power_league_rank: self.power_league_rank,
            last_recorded_battle_time: self.last_recorded_battle_time,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct BlacklistEntry {
    pub user_id: i64,
    /// Unix seconds.
    pub banned_until: i64,
}
