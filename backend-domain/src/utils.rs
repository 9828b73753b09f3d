use chrono::{Local, NaiveDate};

/// Formats tried against a raw date, before and after punctuation cleanup.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a human date: strict attempt first, then a retry with the
/// abbreviated-month punctuation ("Feb.", "Sept.") stripped.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(date) = parse_with_formats(trimmed) {
        return Some(date);
    }
    let cleaned = strip_month_punctuation(trimmed);
    parse_with_formats(&cleaned)
}

/// Like [`parse_event_date`] but never fails: unparseable input becomes today.
pub fn parse_event_date_or_today(raw: &str) -> NaiveDate {
    parse_event_date(raw).unwrap_or_else(today)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_with_formats(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn strip_month_punctuation(value: &str) -> String {
    let without_dots = value.replace('.', " ");
    let words: Vec<String> = without_dots
        .split_whitespace()
        .map(|word| {
            if word.eq_ignore_ascii_case("sept") {
                "Sep".to_string()
            } else {
                word.to_string()
            }
        })
        .collect();
    words.join(" ").replace(" ,", ",")
}
