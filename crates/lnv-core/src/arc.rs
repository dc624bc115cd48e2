use serde::{Deserialize, Serialize};

/// One narrative stage of a night: a display label and the tags it wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub label: &'static str,
    pub vibes: &'static [&'static str],
}

/// Named three-phase templates for structuring a night out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VibeArc {
    #[default]
    ChillToWild,
    DateNight,
    Party,
    Explore,
    LowKey,
}

const CHILL_TO_WILD: [Phase; 3] = [
    Phase {
        label: "Warm up",
        vibes: &["chill", "casual", "date-friendly"],
    },
    Phase {
        label: "Peak energy",
        vibes: &["high-energy", "dancey", "loud", "rowdy"],
    },
    Phase {
        label: "Late eats",
        vibes: &["late-eats", "food-focused", "chill"],
    },
];

const DATE_NIGHT: [Phase; 3] = [
    Phase {
        label: "Start classy",
        vibes: &["chill", "date-friendly", "upscale"],
    },
    Phase {
        label: "Impress",
        vibes: &["upscale", "views", "rooftop", "live-music"],
    },
    Phase {
        label: "Wind down",
        vibes: &["late-eats", "chill", "sweet"],
    },
];

const PARTY: [Phase; 3] = [
    Phase {
        label: "Get moving",
        vibes: &["dancey", "high-energy", "loud"],
    },
    Phase {
        label: "Go all out",
        vibes: &["rowdy", "high-energy", "dancey", "karaoke"],
    },
    Phase {
        label: "Refuel",
        vibes: &["late-eats", "late-night", "food-focused"],
    },
];

const EXPLORE: [Phase; 3] = [
    Phase {
        label: "Start chill",
        vibes: &["chill", "casual", "views"],
    },
    Phase {
        label: "Something different",
        vibes: &["live-music", "karaoke", "games", "playful"],
    },
    Phase {
        label: "Finish strong",
        vibes: &["late-night", "divey", "casual"],
    },
];

const LOW_KEY: [Phase; 3] = [
    Phase {
        label: "Easy start",
        vibes: &["chill", "casual", "date-friendly"],
    },
    Phase {
        label: "Keep it mellow",
        vibes: &["chill", "casual", "group-friendly"],
    },
    Phase {
        label: "Night cap",
        vibes: &["chill", "late-night", "casual"],
    },
];

impl VibeArc {
    pub const ALL: [VibeArc; 5] = [
        VibeArc::ChillToWild,
        VibeArc::DateNight,
        VibeArc::Party,
        VibeArc::Explore,
        VibeArc::LowKey,
    ];

    pub fn key(self) -> &'static str {
        match self {
            VibeArc::ChillToWild => "chill-to-wild",
            VibeArc::DateNight => "date-night",
            VibeArc::Party => "party",
            VibeArc::Explore => "explore",
            VibeArc::LowKey => "low-key",
        }
    }

    /// Exact key lookup.
    pub fn parse_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|arc| arc.key() == key)
    }

    /// Key lookup that falls back to `chill-to-wild` for anything unknown.
    pub fn from_key(key: &str) -> Self {
        Self::parse_key(key).unwrap_or_default()
    }

    pub fn phases(self) -> &'static [Phase; 3] {
        match self {
            VibeArc::ChillToWild => &CHILL_TO_WILD,
            VibeArc::DateNight => &DATE_NIGHT,
            VibeArc::Party => &PARTY,
            VibeArc::Explore => &EXPLORE,
            VibeArc::LowKey => &LOW_KEY,
        }
    }

    pub fn phase(self, index: usize) -> &'static Phase {
        let phases = self.phases();
        &phases[index.min(phases.len() - 1)]
    }
}

impl std::fmt::Display for VibeArc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Phase index for `slot` when spreading the arc over `stop_count` slots.
/// Earlier phases absorb the remainder.
pub fn phase_index(slot: usize, stop_count: usize) -> usize {
    if stop_count == 0 {
        return 0;
    }
    (slot * 3 / stop_count).min(2)
}
