use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{MatchRecord, NotesFields};
use crate::utils::format_date;

/// Identity of one real-world game: `date|event|round`, lowercased.
///
/// Also used as the key that routes both players' comments on a game into a
/// single thread, so the rendering must not change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(date: NaiveDate, event_name: &str, round_label: &str) -> Self {
        Self(format!(
            "{}|{}|{}",
            format_date(date).to_lowercase(),
            event_name.trim().to_lowercase(),
            round_label.trim().to_lowercase()
        ))
    }

    pub fn of(record: &MatchRecord) -> Self {
        Self::new(record.date, &record.event_name, &record.round_label)
    }

    /// Same key computed from the legacy `eventName | roundInfo | ratingInfo` notes.
    pub fn from_notes(date: NaiveDate, notes: &str) -> Self {
        let fields = NotesFields::parse(notes);
        Self::new(date, &fields.event_name, &fields.round_label)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl MatchRecord {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self)
    }
}
