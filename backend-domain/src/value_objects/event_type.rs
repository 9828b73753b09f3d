// Event type value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Armory,
    ProQuest,
    Calling,
    #[serde(rename = "Battle Hardened")]
    BattleHardened,
    #[serde(rename = "Pre-Release")]
    PreRelease,
    Skirmish,
    #[serde(rename = "Road to Nationals")]
    RoadToNationals,
    Nationals,
    Other,
}

/// Priority order for event type detection. "road to nationals" has to be
/// tested before "nationals".
const EVENT_TYPE_KEYWORDS: &[(&[&str], EventType)] = &[
    (&["proquest", "pro quest"], EventType::ProQuest),
    (&["calling"], EventType::Calling),
    (&["battle hardened"], EventType::BattleHardened),
    (&["pre-release", "prerelease"], EventType::PreRelease),
    (&["skirmish"], EventType::Skirmish),
    (&["road to nationals"], EventType::RoadToNationals),
    (&["nationals"], EventType::Nationals),
    (&["armory"], EventType::Armory),
];

/// Words that mark a context line as an event title rather than a venue.
const EVENT_NAME_KEYWORDS: &[&str] = &[
    "armory",
    "proquest",
    "pro quest",
    "calling",
    "battle hardened",
    "pre-release",
    "prerelease",
    "skirmish",
    "road to nationals",
    "nationals",
    "showdown",
    "tournament",
    "championship",
    "qualifier",
    "league",
    "sealed",
    "draft",
    "constructed",
];

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Armory => "Armory",
            EventType::ProQuest => "ProQuest",
            EventType::Calling => "Calling",
            EventType::BattleHardened => "Battle Hardened",
            EventType::PreRelease => "Pre-Release",
            EventType::Skirmish => "Skirmish",
            EventType::RoadToNationals => "Road to Nationals",
            EventType::Nationals => "Nationals",
            EventType::Other => "Other",
        }
    }

    /// Scans every text in priority order of event type, not text order.
    pub fn detect<S: AsRef<str>>(texts: &[S]) -> EventType {
        let lowered: Vec<String> = texts.iter().map(|text| text.as_ref().to_lowercase()).collect();
        for (keywords, event_type) in EVENT_TYPE_KEYWORDS {
            let hit = lowered
                .iter()
                .any(|text| keywords.iter().any(|keyword| text.contains(keyword)));
            if hit {
                return *event_type;
            }
        }
        EventType::Other
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        EventType::detect(&[s])
    }
}

/// True when `line` carries any of the event naming keywords.
pub fn has_event_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    EVENT_NAME_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
