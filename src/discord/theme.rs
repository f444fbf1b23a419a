use poise::ChoiceParameter;

/// Colour scheme of the profile card. Stored by id in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ChoiceParameter)]
pub enum Theme {
    #[name = "Classic"]
    Classic,
    #[name = "Midnight"]
    Midnight,
    #[name = "Candy"]
    Candy,
    #[name = "Inferno"]
    Inferno,
    #[name = "Frost"]
    Frost,
}

pub struct Palette {
    pub background_start: &'static str,
    pub background_end: &'static str,
    pub panel: &'static str,
    pub accent: &'static str,
}

impl Theme {
    pub fn id(self) -> &'static str {
        match self {
            Self::Classic => "0",
            Self::Midnight => "1",
            Self::Candy => "2",
            Self::Inferno => "3",
            Self::Frost => "4",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim() {
            "0" => Some(Self::Classic),
            "1" => Some(Self::Midnight),
            "2" => Some(Self::Candy),
            "3" => Some(Self::Inferno),
            "4" => Some(Self::Frost),
            _ => None,
        }
    }

    /// Theme for a profile: its favourite, else the seasonal one, else classic.
    pub fn resolve(favourite: Option<&str>, seasonal: &str) -> Self {
        favourite
            .and_then(Self::from_id)
            .or_else(|| Self::from_id(seasonal))
            .unwrap_or(Self::Classic)
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Classic => Palette {
                background_start: "#2B1D6B",
                background_end: "#CB35F9",
                panel: "#1A1240",
                accent: "#FFC93C",
            },
            Self::Midnight => Palette {
                background_start: "#050A1F",
                background_end: "#1F3A93",
                panel: "#0B1433",
                accent: "#57C7FF",
            },
            Self::Candy => Palette {
                background_start: "#FF6FB5",
                background_end: "#FFD36E",
                panel: "#7A2453",
                accent: "#FFFFFF",
            },
            Self::Inferno => Palette {
                background_start: "#3A0000",
                background_end: "#FF5E00",
                panel: "#2A0A00",
                accent: "#FFD000",
            },
            Self::Frost => Palette {
                background_start: "#0F4C75",
                background_end: "#BBE1FA",
                panel: "#123456",
                accent: "#E8F6FF",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favourite_wins_over_seasonal() {
        assert_eq!(Theme::resolve(Some("3"), "1"), Theme::Inferno);
        assert_eq!(Theme::resolve(None, "1"), Theme::Midnight);
        assert_eq!(Theme::resolve(Some("bogus"), "4"), Theme::Frost);
        assert_eq!(Theme::resolve(None, "bogus"), Theme::Classic);
    }

    #[test]
    fn ids_are_stable() {
        for theme in [Theme::Classic, Theme::Midnight, Theme::Candy, Theme::Inferno, Theme::Frost] {
            assert_eq!(Theme::from_id(theme.id()), Some(theme));
        }
    }
}
