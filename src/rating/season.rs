use super::bands::{lookup_reset_value, lookup_reward};

/// Brawlers at or below this count are untouched by the reset.
pub const RESET_FLOOR: u32 = 500;
/// Only the best brawlers above the floor are reset and rewarded.
pub const RESET_SLOTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrawlerRecord {
    pub id: u32,
    pub trophies: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonReset {
    pub trophies_after_reset: u64,
    pub total_reward: u64,
}

pub fn compute_season_reset(roster: &[BrawlerRecord]) -> SeasonReset {
    let mut sorted = roster.to_vec();
    sorted.sort_by(|a, b| b.trophies.cmp(&a.trophies));

    let mut reset = SeasonReset::default();
    let mut slots_used = 0;

    for brawler in &sorted {
        if brawler.trophies > RESET_FLOOR && slots_used < RESET_SLOTS {
            slots_used += 1;
            // Above the floor every band lookup hits, a miss means "no change".
            let kept = lookup_reset_value(brawler.trophies).unwrap_or(brawler.trophies);
            reset.trophies_after_reset += u64::from(kept);
            reset.total_reward += u64::from(lookup_reward(brawler.trophies).unwrap_or(0));
        } else {
            reset.trophies_after_reset += u64::from(brawler.trophies);
        }
    }

    reset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(trophies: &[u32]) -> Vec<BrawlerRecord> {
        trophies
            .iter()
            .enumerate()
            .map(|(i, &trophies)| BrawlerRecord {
                id: 16_000_000 + i as u32,
                trophies,
            })
            .collect()
    }

    #[test]
    fn empty_roster_is_zero() {
        assert_eq!(compute_season_reset(&[]), SeasonReset::default());
    }

    #[test]
    fn roster_below_floor_is_conserved() {
        let brawlers = roster(&[0, 120, 499, 500, 321]);
        let reset = compute_season_reset(&brawlers);

        assert_eq!(reset.trophies_after_reset, 120 + 499 + 500 + 321);
        assert_eq!(reset.total_reward, 0);
    }

    #[test]
    fn only_ten_brawlers_are_reset() {
        let brawlers = roster(&[1000; 15]);
        let reset = compute_season_reset(&brawlers);

        assert_eq!(reset.trophies_after_reset, 10 * 999 + 5 * 1000);
        assert_eq!(reset.total_reward, 10 * 44);
    }

    #[test]
    fn mixed_roster() {
        let brawlers = roster(&[600, 400]);
        let reset = compute_season_reset(&brawlers);

        assert_eq!(reset.trophies_after_reset, 599 + 400);
        assert_eq!(reset.total_reward, 12);
    }

    #[test]
    fn lowest_band_keeps_its_floor() {
        let reset = compute_season_reset(&roster(&[510]));

        assert_eq!(reset.trophies_after_reset, 500);
        assert_eq!(reset.total_reward, 4);
    }

    #[test]
    fn the_highest_brawlers_take_the_slots() {
        let mut trophies = vec![510; 10];
        trophies.push(1500);
        let brawlers = roster(&trophies);
        let reset = compute_season_reset(&brawlers);

        // 1500 and nine of the 510s are reset, one 510 keeps its trophies
        assert_eq!(reset.trophies_after_reset, 1499 + 9 * 500 + 510);
        assert_eq!(reset.total_reward, 64 + 9 * 4);
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let forward = roster(&[700, 1200, 30, 950, 501, 1600]);
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(
            compute_season_reset(&forward),
            compute_season_reset(&backward)
        );
    }
}
