use tracing::warn;

use super::RatingConfig;
use super::battle::{BattleRecord, BattleResult, BattleType, Participant, Team};
use super::error::RatingError;

/// How an opponent compares to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// The opponent is stronger than the player.
    Higher,
    /// The opponent is weaker than the player.
    Lower,
    Equal,
}

impl Standing {
    pub fn between(player_strength: i64, opponent_strength: i64) -> Self {
        match opponent_strength.cmp(&player_strength) {
            std::cmp::Ordering::Greater => Self::Higher,
            std::cmp::Ordering::Less => Self::Lower,
            std::cmp::Ordering::Equal => Self::Equal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opponent {
    pub tag: String,
    pub strength: i64,
    pub standing: Standing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredBattle {
    pub battle: BattleRecord,
    pub player_strength: i64,
    pub opponents: Vec<Opponent>,
    /// The player's in-battle power league rank, for solo ranked battles.
    pub power_league_trophies: Option<i64>,
}

impl FilteredBattle {
    pub fn result(&self) -> BattleResult {
        self.battle.result
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Tally {
    fn record(&mut self, result: BattleResult) {
        match result {
            BattleResult::Victory => self.wins += 1,
            BattleResult::Defeat => self.losses += 1,
            BattleResult::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpponentTally {
    pub higher: u32,
    pub lower: u32,
    pub equal: u32,
    pub total: u32,
}

impl OpponentTally {
    fn record(&mut self, standing: Standing) {
        match standing {
            Standing::Higher => self.higher += 1,
            Standing::Lower => self.lower += 1,
            Standing::Equal => self.equal += 1,
        }
        self.total += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub counted: Vec<FilteredBattle>,
    pub tally: Tally,
    pub opponents: OpponentTally,
    pub malformed: Vec<RatingError>,
}

/// Divides and rounds half up, like the game's own rank display.
pub(crate) fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

/// Maps in-battle trophies onto the power league rank scale.
pub fn comparison_strength(battle_type: BattleType, trophies: i64) -> i64 {
    match battle_type {
        BattleType::SoloRanked => trophies,
        _ => round_half_up(trophies, 100),
    }
}

fn resolve_teams<'a>(
    battle: &'a BattleRecord,
    player_tag: &str,
) -> Result<(&'a Participant, &'a Team), RatingError> {
    let malformed = || RatingError::MalformedBattle {
        player_tag: player_tag.to_string(),
        timestamp: battle.timestamp_unix,
    };

    let (player_teams, enemy_teams): (Vec<&Team>, Vec<&Team>) = battle
        .teams
        .iter()
        .partition(|team| team.iter().any(|p| p.tag == player_tag));

    match (player_teams.as_slice(), enemy_teams.as_slice()) {
        ([player_team], [enemy_team]) if !enemy_team.is_empty() => {
            let player = player_team
                .iter()
                .find(|p| p.tag == player_tag)
                .ok_or_else(malformed)?;
            Ok((player, enemy_team))
        }
        _ => Err(malformed()),
    }
}

fn is_eligible(battle: &BattleRecord, config: &RatingConfig, since_unix: i64) -> bool {
    config.allowed_modes.contains(&battle.mode)
        && config.allowed_types.contains(&battle.battle_type)
        && battle.timestamp_unix > since_unix
}

/// Filters the battle log down to rateable battles and classifies every
/// opponent against the player. Malformed battles are skipped and reported.
pub fn aggregate(
    battles: &[BattleRecord],
    player_tag: &str,
    config: &RatingConfig,
    since_unix: i64,
) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for battle in battles {
        if !is_eligible(battle, config, since_unix) {
            continue;
        }

        let (player, enemy_team) = match resolve_teams(battle, player_tag) {
            Ok(teams) => teams,
            Err(e) => {
                warn!(error = %e, mode = %battle.mode, "⚔️ ⚠️ Skipping malformed battle");
                aggregation.malformed.push(e);
                continue;
            }
        };

        let player_strength = comparison_strength(battle.battle_type, player.brawler_trophies);

        let opponents: Vec<Opponent> = enemy_team
            .iter()
            .map(|enemy| {
                let strength = comparison_strength(battle.battle_type, enemy.brawler_trophies);
                Opponent {
                    tag: enemy.tag.clone(),
                    strength,
                    standing: Standing::between(player_strength, strength),
                }
            })
            .collect();

        aggregation.tally.record(battle.result);
        for opponent in &opponents {
            aggregation.opponents.record(opponent.standing);
        }

        let power_league_trophies =
            (battle.battle_type == BattleType::SoloRanked).then_some(player.brawler_trophies);

        aggregation.counted.push(FilteredBattle {
            battle: battle.clone(),
            player_strength,
            opponents,
            power_league_trophies,
        });
    }

    aggregation
}
