// Pasted tournament history -> events and match rows
//
// Lines are labelled by the classifier, then fed through a small state machine
// that uses date lines as event boundaries.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::entities::{EventDetails, ImportedEvent, MatchRow};
use crate::services::line_classifier::{
    classify_line, normalized_lines, LineKind, DATE_PATTERN, MATCH_ROW_PATTERN,
};
use crate::utils::{parse_event_date, parse_event_date_or_today, today};
use crate::value_objects::{has_event_keyword, EventType, GameFormat, MatchResult};

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(DATE_PATTERN).expect("valid date regex"));
static MATCH_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MATCH_ROW_PATTERN).expect("valid match row regex"));

const UNNAMED_EVENT: &str = "Unnamed Event";
const VENUE_LOOKAHEAD: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasteImport {
    pub events: Vec<ImportedEvent>,
    pub skipped: usize,
}

impl PasteImport {
    pub fn match_count(&self) -> usize {
        self.events.iter().map(|event| event.matches.len()).sum()
    }
}

pub fn parse_paste(text: &str) -> PasteImport {
    let mut detector = EventBoundaryDetector::default();
    for line in normalized_lines(text) {
        detector.push_line(&line);
    }
    detector.finish()
}

/// Parses `<round> <name> (<id>) <result> [delta]`. Rows whose result token is
/// a bye or not in the localized tables yield `None`.
pub fn parse_match_row(line: &str) -> Option<MatchRow> {
    let caps = MATCH_ROW_RE.captures(line)?;
    let result = MatchResult::from_localized(&caps[4])?;
    let round = caps[1]
        .parse::<u32>()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| caps[1].to_string());
    Some(MatchRow {
        round_label: format!("Round {}", round),
        opponent_name: caps[2].trim().to_string(),
        opponent_external_id: Some(caps[3].to_string()),
        result,
        rating_delta: caps.get(5).map(|delta| delta.as_str().to_string()),
    })
}

/// Single-event import: the user typed the event details, the text only holds
/// round rows. Returns `None` for the event when no row survives.
pub fn parse_single_event(details: &EventDetails, text: &str) -> (Option<ImportedEvent>, usize) {
    let mut rows = Vec::new();
    let mut skipped = 0;
    for line in normalized_lines(text) {
        match classify_line(&line) {
            LineKind::MatchRow => match parse_match_row(&line) {
                Some(row) => rows.push(row),
                None => skipped += 1,
            },
            LineKind::Bye => skipped += 1,
            _ => {}
        }
    }
    if rows.is_empty() {
        return (None, skipped);
    }

    let name = details.name.trim().to_string();
    let venue = details
        .venue
        .as_ref()
        .map(|venue| venue.trim().to_string())
        .filter(|venue| !venue.is_empty());
    let event = ImportedEvent {
        format: details.format.unwrap_or_else(|| GameFormat::from(name.as_str())),
        event_type: details
            .event_type
            .unwrap_or_else(|| EventType::detect(&[name.as_str()])),
        date: parse_event_date_or_today(&details.date),
        rated: details.rated,
        venue,
        name,
        matches: rows,
    };
    (Some(event), skipped)
}

struct OpenEvent {
    date: NaiveDate,
    pre_context: Vec<String>,
    post_context: Vec<String>,
    rows: Vec<MatchRow>,
    rows_started: bool,
}

#[derive(Default)]
enum DetectorState {
    #[default]
    CollectingContext,
    EventOpen(OpenEvent),
}

#[derive(Default)]
struct EventBoundaryDetector {
    state: DetectorState,
    buffer: Vec<String>,
    events: Vec<ImportedEvent>,
    skipped: usize,
}

impl EventBoundaryDetector {
    fn push_line(&mut self, line: &str) {
        match classify_line(line) {
            LineKind::Noise => {}
            LineKind::Bye => {
                self.skipped += 1;
                self.mark_rows_started();
            }
            LineKind::Date => {
                let date = date_from_line(line);
                self.flush();
                self.state = DetectorState::EventOpen(OpenEvent {
                    date,
                    pre_context: std::mem::take(&mut self.buffer),
                    post_context: Vec::new(),
                    rows: Vec::new(),
                    rows_started: false,
                });
            }
            LineKind::MatchRow => {
                let Some(row) = parse_match_row(line) else {
                    self.skipped += 1;
                    self.mark_rows_started();
                    return;
                };
                if let DetectorState::CollectingContext = self.state {
                    // Rows ahead of any date line: synthesize from what we have.
                    self.state = DetectorState::EventOpen(OpenEvent {
                        date: today(),
                        pre_context: std::mem::take(&mut self.buffer),
                        post_context: Vec::new(),
                        rows: Vec::new(),
                        rows_started: false,
                    });
                }
                if let DetectorState::EventOpen(event) = &mut self.state {
                    event.rows.push(row);
                    event.rows_started = true;
                }
            }
            LineKind::Context => match &mut self.state {
                DetectorState::EventOpen(event) if !event.rows_started => {
                    event.post_context.push(line.to_string());
                }
                _ => self.buffer.push(line.to_string()),
            },
        }
    }

    /// Context after the first round row belongs to the next event.
    fn mark_rows_started(&mut self) {
        if let DetectorState::EventOpen(event) = &mut self.state {
            event.rows_started = true;
        }
    }

    fn flush(&mut self) {
        let DetectorState::EventOpen(open) = std::mem::take(&mut self.state) else {
            return;
        };
        if open.rows.is_empty() {
            return;
        }
        self.events.push(describe_event(open));
    }

    fn finish(mut self) -> PasteImport {
        self.flush();
        PasteImport {
            events: self.events,
            skipped: self.skipped,
        }
    }
}

fn date_from_line(line: &str) -> NaiveDate {
    DATE_RE
        .find(line)
        .and_then(|found| parse_event_date(found.as_str()))
        .unwrap_or_else(today)
}

fn rated_flag(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "rated" => Some(true),
        "not rated" | "unrated" => Some(false),
        _ => None,
    }
}

fn is_metadata_line(line: &str) -> bool {
    GameFormat::is_format_line(line) || rated_flag(line).is_some()
}

fn describe_event(open: OpenEvent) -> ImportedEvent {
    let (pre_name, pre_venue) = pick_name_and_venue(&open.pre_context);

    let name = pre_name
        .or_else(|| {
            open.post_context
                .iter()
                .find(|line| !is_metadata_line(line) && has_event_keyword(line))
                .cloned()
        })
        .unwrap_or_else(|| UNNAMED_EVENT.to_string());

    let venue = pre_venue.or_else(|| {
        open.post_context
            .iter()
            .take(VENUE_LOOKAHEAD)
            .find(|line| **line != name && !is_metadata_line(line) && !has_event_keyword(line))
            .cloned()
    });

    let all_context: Vec<&str> = open
        .pre_context
        .iter()
        .chain(open.post_context.iter())
        .map(String::as_str)
        .collect();

    let format = GameFormat::detect_in_lines(&all_context);
    let rated = all_context
        .iter()
        .find_map(|line| rated_flag(line))
        .unwrap_or(false);
    let mut type_texts = all_context.clone();
    type_texts.push(name.as_str());
    let event_type = EventType::detect(&type_texts);

    ImportedEvent {
        name,
        date: open.date,
        format,
        rated,
        venue,
        event_type,
        matches: open.rows,
    }
}

/// Event name and venue from the lines seen before the date boundary.
fn pick_name_and_venue(pre_context: &[String]) -> (Option<String>, Option<String>) {
    let qualifying: Vec<&String> = pre_context
        .iter()
        .filter(|line| !DATE_RE.is_match(line) && !is_metadata_line(line))
        .collect();

    match qualifying.as_slice() {
        [] => (None, None),
        [only] => (Some((*only).clone()), None),
        _ => {
            if let Some(name) = qualifying.iter().find(|line| has_event_keyword(line)) {
                let venue = qualifying
                    .iter()
                    .find(|line| **line != *name && !has_event_keyword(line))
                    .map(|line| (*line).clone());
                return (Some((*name).clone()), venue);
            }
            let mut by_length = qualifying.clone();
            by_length.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
            (
                by_length.first().map(|line| (*line).clone()),
                by_length.get(1).map(|line| (*line).clone()),
            )
        }
    }
}
