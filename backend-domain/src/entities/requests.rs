// Request payloads accepted by the import and hero commands

use serde::Deserialize;

use crate::entities::EventDetails;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeroUpdate {
    #[serde(default)]
    pub hero_played: Option<String>,
    #[serde(default)]
    pub opponent_hero: Option<String>,
}

impl HeroUpdate {
    /// Blank values mean "leave the field alone".
    pub fn normalized(self) -> Self {
        Self {
            hero_played: normalize_optional_text(self.hero_played),
            opponent_hero: normalize_optional_text(self.opponent_hero),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hero_played.is_none() && self.opponent_hero.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleEventImport {
    pub event: EventDetails,
    pub rows: String,
}

fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
