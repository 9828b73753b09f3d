// Match record entity
// One player's stored view of one game

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::{unknown_hero, EventType, GameFormat, MatchId, MatchResult};

pub const NOTES_DELIMITER: &str = " | ";

/// A fully described match that has not been given an identity yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub date: NaiveDate,
    pub event_name: String,
    pub round_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_delta: Option<String>,
    #[serde(default = "unknown_hero")]
    pub hero_played: String,
    #[serde(default = "unknown_hero")]
    pub opponent_hero: String,
    pub opponent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_external_id: Option<String>,
    pub result: MatchResult,
    pub format: GameFormat,
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default)]
    pub rated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub date: NaiveDate,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub round_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_delta: Option<String>,
    #[serde(default = "unknown_hero")]
    pub hero_played: String,
    #[serde(default = "unknown_hero")]
    pub opponent_hero: String,
    pub opponent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_external_id: Option<String>,
    pub result: MatchResult,
    pub format: GameFormat,
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default)]
    pub rated: bool,
    /// Legacy free-text encoding, only present on records written before the
    /// structured fields existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub comment_count: u32,
}

impl MatchRecord {
    pub fn from_new(id: MatchId, new: NewMatch) -> Self {
        Self {
            id,
            date: new.date,
            event_name: new.event_name,
            round_label: new.round_label,
            rating_delta: new.rating_delta,
            hero_played: new.hero_played,
            opponent_hero: new.opponent_hero,
            opponent_name: new.opponent_name,
            opponent_external_id: new.opponent_external_id,
            result: new.result,
            format: new.format,
            event_type: new.event_type,
            venue: new.venue,
            rated: new.rated,
            notes: None,
            comment_count: 0,
        }
    }

    /// `eventName | roundInfo | ratingInfo`, the shape older clients expect.
    pub fn render_notes(&self) -> String {
        let mut parts = vec![self.event_name.clone(), self.round_label.clone()];
        if let Some(delta) = &self.rating_delta {
            parts.push(format!("Rating {}", delta));
        }
        parts.join(NOTES_DELIMITER)
    }

    /// Fills empty structured fields from the legacy notes string, then drops it.
    pub fn backfill_from_notes(&mut self) {
        let Some(notes) = self.notes.take() else {
            return;
        };
        let fields = NotesFields::parse(&notes);
        if self.event_name.trim().is_empty() {
            self.event_name = fields.event_name;
        }
        if self.round_label.trim().is_empty() {
            self.round_label = fields.round_label;
        }
        if self.rating_delta.is_none() {
            self.rating_delta = fields.rating_delta;
        }
    }
}

/// Positional fields of the legacy notes encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesFields {
    pub event_name: String,
    pub round_label: String,
    pub rating_delta: Option<String>,
}

impl NotesFields {
    pub fn parse(notes: &str) -> Self {
        let mut parts = notes.split(NOTES_DELIMITER).map(str::trim);
        let event_name = parts.next().unwrap_or_default().to_string();
        let round_label = parts.next().unwrap_or_default().to_string();
        let rating_delta = parts
            .next()
            .map(|info| info.trim_start_matches("Rating").trim().to_string())
            .filter(|info| !info.is_empty());
        Self {
            event_name,
            round_label,
            rating_delta,
        }
    }
}
