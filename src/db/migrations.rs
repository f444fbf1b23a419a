use sqlx::SqlitePool;
use tracing::info;

use crate::error::AppError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
    user_id INTEGER PRIMARY KEY,
    player_tag TEXT NOT NULL,
    power_league_rank INTEGER NOT NULL DEFAULT 0,
    score INTEGER NOT NULL,
    last_recorded_battle_time INTEGER NOT NULL DEFAULT 0,
    favourite_brawler INTEGER,
    favourite_theme TEXT,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
);

CREATE TABLE IF NOT EXISTS blacklist (
    user_id INTEGER PRIMARY KEY,
    banned_until INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_profiles_player_tag ON profiles(player_tag);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("🗄️ Database migrations completed");
    Ok(())
}
