// Imported event entity
// Transient result of parsing pasted history, consumed by the import command

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::NewMatch;
use crate::value_objects::{unknown_hero, EventType, GameFormat, MatchResult};

/// One parsed round row, before event details are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    pub round_label: String,
    pub opponent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_external_id: Option<String>,
    pub result: MatchResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_delta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedEvent {
    pub name: String,
    pub date: NaiveDate,
    pub format: GameFormat,
    pub rated: bool,
    pub venue: Option<String>,
    pub event_type: EventType,
    pub matches: Vec<MatchRow>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Copy the `(digits)` opponent id from pasted rows onto stored records.
    pub capture_paste_external_ids: bool,
}

impl ImportedEvent {
    pub fn to_new_matches(&self, options: ImportOptions) -> Vec<NewMatch> {
        self.matches
            .iter()
            .map(|row| NewMatch {
                date: self.date,
                event_name: self.name.clone(),
                round_label: row.round_label.clone(),
                rating_delta: row.rating_delta.clone(),
                hero_played: unknown_hero(),
                opponent_hero: unknown_hero(),
                opponent_name: row.opponent_name.clone(),
                opponent_external_id: if options.capture_paste_external_ids {
                    row.opponent_external_id.clone()
                } else {
                    None
                },
                result: row.result,
                format: self.format,
                event_type: self.event_type,
                venue: self.venue.clone(),
                rated: self.rated,
            })
            .collect()
    }
}

/// Event details typed in by the user for a single-event import.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDetails {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub format: Option<GameFormat>,
    #[serde(default)]
    pub rated: bool,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub event_type: Option<EventType>,
}

/// Player metadata carried in the `# Key: Value` header of a CSV export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub events: usize,
    pub matches: usize,
    pub skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImportMetadata>,
}
