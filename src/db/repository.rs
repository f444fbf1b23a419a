use sqlx::SqlitePool;

use super::models::{BlacklistEntry, Profile};
use crate::error::AppError;
use crate::rating::RatingSummary;

const PROFILE_COLUMNS: &str = "user_id, player_tag, power_league_rank, score, \
    last_recorded_battle_time, favourite_brawler, favourite_theme";

/// Score a fresh profile starts with for each power league rank.
const SCORE_PER_RANK: i64 = 100;

#[derive(Clone, Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // === Profile operations ===

    pub async fn get_profile(&self, user_id: u64) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ?"
        ))
        .bind(user_id as i64)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Creates or overwrites a profile. The score restarts from the declared
    /// rank. The last recorded battle time and the favourites are kept.
    pub async fn upsert_profile(
        &self,
        user_id: u64,
        player_tag: &str,
        power_league_rank: i64,
    ) -> Result<Profile, AppError> {
        let query = format!(
            r#"
            INSERT INTO profiles (user_id, player_tag, power_league_rank, score, last_recorded_battle_time)
            VALUES (?, ?, ?, ?, 0)
            ON CONFLICT(user_id) DO UPDATE SET
                player_tag = excluded.player_tag,
                power_league_rank = excluded.power_league_rank,
                score = excluded.score
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(user_id as i64)
            .bind(player_tag)
            .bind(power_league_rank)
            .bind(power_league_rank * SCORE_PER_RANK)
            .fetch_one(&self.pool)
            .await?;
        Ok(profile)
    }

    pub async fn save_rating(&self, user_id: u64, summary: &RatingSummary) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                score = ?,
                power_league_rank = ?,
                last_recorded_battle_time = ?
            WHERE user_id = ?
            "#,
        )
        .bind(summary.new_score)
        .bind(summary.new_power_league_rank)
        .bind(summary.new_last_recorded_battle_time)
        .bind(user_id as i64)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProfileNotFound);
        }
        Ok(())
    }

    pub async fn set_favourite_brawler(&self, user_id: u64, brawler_id: u32) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE profiles SET favourite_brawler = ? WHERE user_id = ?")
            .bind(i64::from(brawler_id))
            .bind(user_id as i64)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProfileNotFound);
        }
        Ok(())
    }

    pub async fn set_favourite_theme(&self, user_id: u64, theme: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE profiles SET favourite_theme = ? WHERE user_id = ?")
            .bind(theme)
            .bind(user_id as i64)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProfileNotFound);
        }
        Ok(())
    }

    /// Returns whether a profile existed.
    pub async fn delete_profile(&self, user_id: u64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = ?")
            .bind(user_id as i64)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // === Blacklist operations ===

    pub async fn blacklist_user(&self, user_id: u64, banned_until: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO blacklist (user_id, banned_until) VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET banned_until = excluded.banned_until
            "#,
        )
        .bind(user_id as i64)
        .bind(banned_until)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Returns whether the user was blacklisted.
    pub async fn whitelist_user(&self, user_id: u64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blacklist WHERE user_id = ?")
            .bind(user_id as i64)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ban still in effect at `now` (unix seconds), if any.
    pub async fn active_ban(&self, user_id: u64, now: i64) -> Result<Option<BlacklistEntry>, AppError> {
        let entry = sqlx::query_as::<_, BlacklistEntry>(
            "SELECT user_id, banned_until FROM blacklist WHERE user_id = ? AND banned_until > ?",
        )
        .bind(user_id as i64)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }
}
