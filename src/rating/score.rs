use super::aggregate::{FilteredBattle, Opponent, Standing, round_half_up};
use super::battle::BattleResult;

/// Points awarded per power league rank gained.
pub const RANK_STEP_BONUS: i64 = 100;

/// Penalties for losses, indexed by rank tier. Indices outside the table are
/// clamped to its first or last entry; an empty table never penalises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankPenaltyTable(Vec<i64>);

impl RankPenaltyTable {
    pub fn new(penalties: Vec<i64>) -> Self {
        Self(penalties)
    }

    pub fn penalty(&self, index: i64) -> i64 {
        let Some(last) = self.0.len().checked_sub(1) else {
            return 0;
        };
        let index = index.clamp(0, last as i64) as usize;
        self.0[index]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RankPenaltyTable {
    /// One entry per power league rank, Bronze I first. Losing to a low rank
    /// costs the most.
    fn default() -> Self {
        Self((1..=19).rev().collect())
    }
}

/// Score contribution of a single battle/opponent pair.
pub fn pair_contribution(
    result: BattleResult,
    player_strength: i64,
    opponent: &Opponent,
    penalties: &RankPenaltyTable,
) -> i64 {
    let enemy_strength = opponent.strength;

    match (result, opponent.standing) {
        (BattleResult::Draw, _) => 0,
        (_, Standing::Equal) => round_half_up(player_strength, 2),
        (BattleResult::Victory, Standing::Higher | Standing::Lower) => enemy_strength,
        (BattleResult::Defeat, Standing::Lower) => -penalties.penalty(enemy_strength - 1),
        (BattleResult::Defeat, Standing::Higher) => {
            -penalties.penalty(enemy_strength - player_strength - 1)
        }
    }
}

/// Sum of every pair contribution, without the rank change bonus.
pub fn score_delta(counted: &[FilteredBattle], penalties: &RankPenaltyTable) -> i64 {
    counted
        .iter()
        .flat_map(|battle| {
            battle.opponents.iter().map(|opponent| {
                pair_contribution(battle.result(), battle.player_strength, opponent, penalties)
            })
        })
        .sum()
}

pub fn rank_change_bonus(old_rank: i64, new_rank: i64) -> i64 {
    (new_rank - old_rank) * RANK_STEP_BONUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingConfig;
    use crate::rating::aggregate::aggregate;
    use crate::rating::aggregate::tests::{PLAYER, battle};
    use crate::rating::battle::BattleType;

    fn opponent(strength: i64, player_strength: i64) -> Opponent {
        Opponent {
            tag: "#ENEMY".to_string(),
            strength,
            standing: Standing::between(player_strength, strength),
        }
    }

    fn table() -> RankPenaltyTable {
        RankPenaltyTable::new(vec![50, 40, 30, 20, 10])
    }

    #[test]
    fn penalty_index_is_clamped() {
        let table = table();
        assert_eq!(table.penalty(-1), 50);
        assert_eq!(table.penalty(0), 50);
        assert_eq!(table.penalty(3), 20);
        assert_eq!(table.penalty(4), 10);
        assert_eq!(table.penalty(99), 10);
        assert_eq!(RankPenaltyTable::new(Vec::new()).penalty(2), 0);
    }

    #[test]
    fn default_table_covers_every_rank() {
        let table = RankPenaltyTable::default();
        assert_eq!(table.len(), 19);
        assert_eq!(table.penalty(0), 19);
        assert_eq!(table.penalty(18), 1);
    }

    #[test]
    fn victories_grant_enemy_strength() {
        let table = table();
        assert_eq!(pair_contribution(BattleResult::Victory, 10, &opponent(4, 10), &table), 4);
        assert_eq!(pair_contribution(BattleResult::Victory, 10, &opponent(15, 10), &table), 15);
    }

    #[test]
    fn equal_opponents_always_add_half_strength() {
        let table = table();
        let equal = opponent(7, 7);
        assert_eq!(pair_contribution(BattleResult::Victory, 7, &equal, &table), 4);
        assert_eq!(pair_contribution(BattleResult::Defeat, 7, &equal, &table), 4);
    }

    #[test]
    fn draws_score_nothing() {
        let table = table();
        for strength in [3, 10, 12] {
            let result = pair_contribution(BattleResult::Draw, 10, &opponent(strength, 10), &table);
            assert_eq!(result, 0);
        }
    }

    #[test]
    fn defeat_by_weaker_opponent_uses_enemy_rank() {
        // enemy rank 3 -> index 2
        assert_eq!(
            pair_contribution(BattleResult::Defeat, 10, &opponent(3, 10), &table()),
            -30
        );
    }

    #[test]
    fn defeat_by_stronger_opponent_uses_rank_gap() {
        // gap of 2 -> index 1
        assert_eq!(
            pair_contribution(BattleResult::Defeat, 10, &opponent(12, 10), &table()),
            -40
        );
        // huge gap clamps to the cheapest penalty
        assert_eq!(
            pair_contribution(BattleResult::Defeat, 1, &opponent(19, 1), &table()),
            -10
        );
    }

    #[test]
    fn score_delta_folds_every_pair() {
        let config = RatingConfig {
            rank_penalties: table(),
            ..RatingConfig::default()
        };
        let battles = [
            // 1000 -> strength 10 vs 8 and 12: +8 +12
            battle(BattleType::Ranked, BattleResult::Victory, 3, 1000, &[800, 1200]),
            // equal: +5
            battle(BattleType::Ranked, BattleResult::Defeat, 2, 1000, &[1000]),
            battle(BattleType::Ranked, BattleResult::Draw, 1, 1000, &[500]),
        ];
        let aggregation = aggregate(&battles, PLAYER, &config, 0);

        assert_eq!(score_delta(&aggregation.counted, &config.rank_penalties), 25);
    }

    #[test]
    fn rank_bonus() {
        assert_eq!(rank_change_bonus(5, 7), 200);
        assert_eq!(rank_change_bonus(7, 5), -200);
        assert_eq!(rank_change_bonus(4, 4), 0);
    }
}
