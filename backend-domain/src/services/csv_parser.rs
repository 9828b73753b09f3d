// Companion-script CSV export -> flat match list
//
// Shape: optional BOM, `# Key: Value` metadata lines, one header line, data rows.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::entities::{ImportMetadata, NewMatch};
use crate::utils::parse_event_date_or_today;
use crate::value_objects::{unknown_hero, EventType, GameFormat, MatchResult};

pub const COL_EVENT_NAME: &str = "event name";
pub const COL_EVENT_DATE: &str = "event date";
pub const COL_RATED: &str = "rated";
pub const COL_ROUND: &str = "round";
pub const COL_OPPONENT: &str = "opponent";
pub const COL_RESULT: &str = "result";
pub const COL_RATING_CHANGE: &str = "rating change";

static OPPONENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\((\d+)\)\s*$").expect("valid opponent regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CsvImport {
    pub metadata: ImportMetadata,
    pub matches: Vec<NewMatch>,
    pub skipped: usize,
}

/// Case-insensitive column lookup built from the header line.
struct ColumnMap {
    index: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_header(header: &str) -> Self {
        let index = split_csv_line(header)
            .into_iter()
            .enumerate()
            .map(|(position, name)| (name.trim().to_lowercase(), position))
            .collect();
        Self { index }
    }

    /// Missing columns and short rows read as an empty string.
    fn get<'a>(&self, fields: &'a [String], column: &str) -> &'a str {
        self.index
            .get(column)
            .and_then(|position| fields.get(*position))
            .map(|value| value.trim())
            .unwrap_or("")
    }
}

pub fn parse_csv(text: &str) -> CsvImport {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut import = CsvImport::default();
    let mut columns: Option<ColumnMap> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(columns) = columns.as_ref() else {
            if let Some(meta) = line.strip_prefix('#') {
                apply_metadata_line(&mut import.metadata, meta);
            } else {
                columns = Some(ColumnMap::from_header(line));
            }
            continue;
        };

        let fields = split_csv_line(line);
        match parse_row(columns, &fields) {
            Some(record) => import.matches.push(record),
            None => import.skipped += 1,
        }
    }
    import
}

fn apply_metadata_line(metadata: &mut ImportMetadata, line: &str) {
    let Some((key, value)) = line.split_once(':') else {
        return;
    };
    let key = key.trim().to_lowercase();
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    let value = Some(value.to_string());
    if key.contains("id") {
        metadata.external_id = value;
    } else if key.contains("rating") {
        metadata.rating = value;
    } else if key.contains("date") || key.contains("export") {
        metadata.export_date = value;
    } else if key.contains("name") || key.contains("player") {
        metadata.player_name = value;
    }
}

fn parse_row(columns: &ColumnMap, fields: &[String]) -> Option<NewMatch> {
    let opponent_raw = columns.get(fields, COL_OPPONENT);
    if opponent_raw.eq_ignore_ascii_case("bye") {
        return None;
    }
    let result = MatchResult::from_localized(columns.get(fields, COL_RESULT))?;

    let (opponent_name, opponent_external_id) = split_opponent(opponent_raw);
    let event_name = columns.get(fields, COL_EVENT_NAME).to_string();
    let round_raw = columns.get(fields, COL_ROUND);
    let round_label = match round_raw.parse::<u32>() {
        Ok(round) => format!("Round {}", round),
        Err(_) => round_raw.to_string(),
    };
    let rating_delta = Some(columns.get(fields, COL_RATING_CHANGE))
        .filter(|delta| !delta.is_empty())
        .map(ToString::to_string);

    Some(NewMatch {
        date: parse_event_date_or_today(columns.get(fields, COL_EVENT_DATE)),
        format: GameFormat::from(event_name.as_str()),
        event_type: EventType::from(event_name.as_str()),
        rated: parse_rated(columns.get(fields, COL_RATED)),
        event_name,
        round_label,
        rating_delta,
        hero_played: unknown_hero(),
        opponent_hero: unknown_hero(),
        opponent_name,
        opponent_external_id,
        result,
        venue: None,
    })
}

fn split_opponent(raw: &str) -> (String, Option<String>) {
    match OPPONENT_ID_RE.captures(raw) {
        Some(caps) => (caps[1].trim().to_string(), Some(caps[2].to_string())),
        None => (raw.to_string(), None),
    }
}

fn parse_rated(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "yes" | "y" | "true" | "rated" | "1"
    )
}

/// Splits one CSV line. Double-quoted segments are literal (commas inside do
/// not split) and doubled quotes unescape to one.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
