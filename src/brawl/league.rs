use std::fmt;

use poise::ChoiceParameter;

/// Highest solo power league rank a player reached, as declared on `/set tag`.
///
/// Solo ranked battles report this rank in place of brawler trophies, Bronze I
/// being 1 and Masters 19.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ChoiceParameter)]
pub enum PowerLeagueRank {
    #[name = "Bronze I"]
    Bronze1,
    #[name = "Bronze II"]
    Bronze2,
    #[name = "Bronze III"]
    Bronze3,
    #[name = "Silver I"]
    Silver1,
    #[name = "Silver II"]
    Silver2,
    #[name = "Silver III"]
    Silver3,
    #[name = "Gold I"]
    Gold1,
    #[name = "Gold II"]
    Gold2,
    #[name = "Gold III"]
    Gold3,
    #[name = "Diamond I"]
    Diamond1,
    #[name = "Diamond II"]
    Diamond2,
    #[name = "Diamond III"]
    Diamond3,
    #[name = "Mythic I"]
    Mythic1,
    #[name = "Mythic II"]
    Mythic2,
    #[name = "Mythic III"]
    Mythic3,
    #[name = "Legendary I"]
    Legendary1,
    #[name = "Legendary II"]
    Legendary2,
    #[name = "Legendary III"]
    Legendary3,
    #[name = "Masters"]
    Masters,
}

impl PowerLeagueRank {
    pub const ALL: [Self; 19] = [
        Self::Bronze1,
        Self::Bronze2,
        Self::Bronze3,
        Self::Silver1,
        Self::Silver2,
        Self::Silver3,
        Self::Gold1,
        Self::Gold2,
        Self::Gold3,
        Self::Diamond1,
        Self::Diamond2,
        Self::Diamond3,
        Self::Mythic1,
        Self::Mythic2,
        Self::Mythic3,
        Self::Legendary1,
        Self::Legendary2,
        Self::Legendary3,
        Self::Masters,
    ];

    pub fn rank(self) -> i64 {
        Self::ALL
            .iter()
            .position(|&r| r == self)
            .map_or(0, |index| index as i64 + 1)
    }

    pub fn from_rank(rank: i64) -> Option<Self> {
        let index = usize::try_from(rank).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bronze1 => "Bronze I",
            Self::Bronze2 => "Bronze II",
            Self::Bronze3 => "Bronze III",
            Self::Silver1 => "Silver I",
            Self::Silver2 => "Silver II",
            Self::Silver3 => "Silver III",
            Self::Gold1 => "Gold I",
            Self::Gold2 => "Gold II",
            Self::Gold3 => "Gold III",
            Self::Diamond1 => "Diamond I",
            Self::Diamond2 => "Diamond II",
            Self::Diamond3 => "Diamond III",
            Self::Mythic1 => "Mythic I",
            Self::Mythic2 => "Mythic II",
            Self::Mythic3 => "Mythic III",
            Self::Legendary1 => "Legendary I",
            Self::Legendary2 => "Legendary II",
            Self::Legendary3 => "Legendary III",
            Self::Masters => "Masters",
        }
    }
}

impl fmt::Display for PowerLeagueRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Display name for a stored rank; ranks outside the league show as unranked.
pub fn rank_name(rank: i64) -> &'static str {
    PowerLeagueRank::from_rank(rank).map_or("Unranked", PowerLeagueRank::display_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_round_trip_through_numbers() {
        for (index, rank) in PowerLeagueRank::ALL.iter().enumerate() {
            assert_eq!(rank.rank(), index as i64 + 1);
            assert_eq!(PowerLeagueRank::from_rank(rank.rank()), Some(*rank));
        }
    }

    #[test]
    fn out_of_league_ranks() {
        assert_eq!(PowerLeagueRank::from_rank(0), None);
        assert_eq!(PowerLeagueRank::from_rank(20), None);
        assert_eq!(PowerLeagueRank::from_rank(-3), None);
        assert_eq!(rank_name(0), "Unranked");
        assert_eq!(rank_name(19), "Masters");
    }
}
