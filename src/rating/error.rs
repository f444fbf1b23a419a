use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("Battle at {timestamp} has no single team for {player_tag} and a single opposing team")]
    MalformedBattle { player_tag: String, timestamp: i64 },

    #[error("Unknown battle {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Invalid battle time: {0}")]
    InvalidBattleTime(String),
}
