//! Step tables used to project a brawler's trophies through a season reset.

/// One step of a banding table: every trophy count at or above `lower_bound`
/// (and below the next band) maps to `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrophyBand {
    pub lower_bound: u32,
    pub value: u32,
}

const fn band(lower_bound: u32, value: u32) -> TrophyBand {
    TrophyBand { lower_bound, value }
}

/// Trophies that are kept after the season ends.
pub static RESET_BANDS: [TrophyBand; 31] = [
    band(500, 500),
    band(525, 524),
    band(550, 549),
    band(575, 574),
    band(600, 599),
    band(625, 624),
    band(650, 649),
    band(675, 674),
    band(700, 699),
    band(725, 724),
    band(750, 749),
    band(775, 774),
    band(800, 799),
    band(825, 824),
    band(850, 849),
    band(875, 874),
    band(900, 899),
    band(925, 924),
    band(950, 949),
    band(975, 974),
    band(1000, 999),
    band(1050, 1049),
    band(1100, 1099),
    band(1150, 1149),
    band(1200, 1199),
    band(1250, 1249),
    band(1300, 1299),
    band(1350, 1349),
    band(1400, 1399),
    band(1450, 1449),
    band(1500, 1499),
];

/// Bling granted for the trophies lost in the reset.
pub static REWARD_BANDS: [TrophyBand; 31] = [
    band(500, 4),
    band(525, 6),
    band(550, 8),
    band(575, 10),
    band(600, 12),
    band(625, 14),
    band(650, 16),
    band(675, 18),
    band(700, 20),
    band(725, 22),
    band(750, 24),
    band(775, 26),
    band(800, 28),
    band(825, 30),
    band(850, 32),
    band(875, 34),
    band(900, 36),
    band(925, 38),
    band(950, 40),
    band(975, 42),
    band(1000, 44),
    band(1050, 46),
    band(1100, 48),
    band(1150, 50),
    band(1200, 52),
    band(1250, 54),
    band(1300, 56),
    band(1350, 58),
    band(1400, 60),
    band(1450, 62),
    band(1500, 64),
];

/// Highest band whose lower bound does not exceed `trophies`.
pub fn lookup(bands: &[TrophyBand], trophies: u32) -> Option<u32> {
    bands
        .iter()
        .take_while(|band| trophies >= band.lower_bound)
        .last()
        .map(|band| band.value)
}

pub fn lookup_reset_value(trophies: u32) -> Option<u32> {
    lookup(&RESET_BANDS, trophies)
}

pub fn lookup_reward(trophies: u32) -> Option<u32> {
    lookup(&REWARD_BANDS, trophies)
}

const TROPHY_ROAD_THRESHOLDS: [u32; 10] =
    [1000, 2000, 3000, 4000, 6000, 8000, 10000, 16000, 30000, 50000];

/// Trophy road tier (1..=11) shown on the profile card.
pub fn trophy_road_tier(highest_trophies: u32) -> u8 {
    let passed = TROPHY_ROAD_THRESHOLDS
        .iter()
        .take_while(|&&threshold| highest_trophies >= threshold)
        .count();
    passed as u8 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_floor_has_no_band() {
        assert_eq!(lookup_reset_value(0), None);
        assert_eq!(lookup_reset_value(499), None);
        assert_eq!(lookup_reward(499), None);
    }

    #[test]
    fn lookup_picks_the_band_floor() {
        assert_eq!(lookup_reset_value(500), Some(500));
        assert_eq!(lookup_reset_value(524), Some(500));
        assert_eq!(lookup_reset_value(525), Some(524));
        assert_eq!(lookup_reset_value(600), Some(599));
        assert_eq!(lookup_reward(600), Some(12));
        assert_eq!(lookup_reset_value(1049), Some(999));
        assert_eq!(lookup_reward(1000), Some(44));
    }

    #[test]
    fn top_band_is_open_ended() {
        assert_eq!(lookup_reset_value(1500), Some(1499));
        assert_eq!(lookup_reset_value(4000), Some(1499));
        assert_eq!(lookup_reward(4000), Some(64));
    }

    #[test]
    fn tables_are_strictly_increasing() {
        for bands in [&RESET_BANDS, &REWARD_BANDS] {
            for pair in bands.windows(2) {
                assert!(pair[0].lower_bound < pair[1].lower_bound);
                assert!(pair[0].value <= pair[1].value);
            }
        }
    }

    #[test]
    fn lookups_are_monotonic() {
        let mut previous = (None, None);
        for trophies in 0..2000 {
            let current = (lookup_reset_value(trophies), lookup_reward(trophies));
            assert!(previous.0 <= current.0, "reset value dropped at {trophies}");
            assert!(previous.1 <= current.1, "reward dropped at {trophies}");
            previous = current;
        }
    }

    #[test]
    fn trophy_road_tiers() {
        assert_eq!(trophy_road_tier(0), 1);
        assert_eq!(trophy_road_tier(999), 1);
        assert_eq!(trophy_road_tier(1000), 2);
        assert_eq!(trophy_road_tier(5999), 5);
        assert_eq!(trophy_road_tier(6000), 6);
        assert_eq!(trophy_road_tier(49999), 10);
        assert_eq!(trophy_road_tier(50000), 11);
    }
}
