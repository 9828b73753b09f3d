use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Noise,
    Bye,
    Date,
    MatchRow,
    Context,
}

struct LineRule {
    pattern: Regex,
    kind: LineKind,
}

impl LineRule {
    fn new(pattern: &str, kind: LineKind) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid line rule"),
            kind,
        }
    }
}

pub(crate) const DATE_PATTERN: &str = r"(?i)^(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\.?\s+(\d{1,2}),?\s+(\d{4})\b";

pub(crate) const MATCH_ROW_PATTERN: &str =
    r"^(\d+)\s+(.+?)\s*\((\d+)\)\s+(.+?)(?:\s+([+-]\d+))?\s*$";

/// Tested top to bottom; the first hit labels the line.
static LINE_RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    vec![
        // site navigation chrome
        LineRule::new(
            r"(?i)^(home|events?|event history|history|my profile|profile|log ?in|log ?out|sign ?in|sign ?out|menu|search|back|next|previous|view (more|all|details)|load more|show more|settings|dashboard|help|faq|news|shop|store locator)$",
            LineKind::Noise,
        ),
        // legal and contact boilerplate
        LineRule::new(
            r"(?i)(privacy policy|terms of (use|service)|cookie (policy|settings|preferences)|copyright|©|all rights reserved|contact us)",
            LineKind::Noise,
        ),
        // table headers
        LineRule::new(r"(?i)^round\s+opponent\b", LineKind::Noise),
        LineRule::new(r"(?i)^(round|opponent|result|results|record|rating change|decklist)$", LineKind::Noise),
        // bare score strings
        LineRule::new(r"^\d+\s*-\s*\d+(\s*-\s*\d+)?$", LineKind::Noise),
        // pure numbers of three or more digits
        LineRule::new(r"^\d{3,}$", LineKind::Noise),
        // signed rating deltas
        LineRule::new(r"^[+-]\d+(\.\d+)?$", LineKind::Noise),
        // player counts
        LineRule::new(r"(?i)^(\d+\s+players?|players?:?\s*\d+)$", LineKind::Noise),
        LineRule::new(r"(?i)^\d+\s+bye\b", LineKind::Bye),
        LineRule::new(DATE_PATTERN, LineKind::Date),
        LineRule::new(MATCH_ROW_PATTERN, LineKind::MatchRow),
    ]
});

/// Splits raw text into trimmed, non-empty lines with non-breaking spaces
/// folded into plain spaces.
pub fn normalized_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.replace('\u{a0}', " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn classify_line(line: &str) -> LineKind {
    LINE_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(line))
        .map(|rule| rule.kind)
        .unwrap_or(LineKind::Context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_lines_are_discarded() {
        for line in [
            "Home",
            "Log In",
            "Privacy Policy",
            "Cookie Policy",
            "Cookie Settings",
            "© 2026 Legend Story Studios",
            "Round Opponent Result",
            "3-1",
            "2-1-1",
            "1002",
            "+15",
            "-8",
            "32 Players",
        ] {
            assert_eq!(classify_line(line), LineKind::Noise, "{line}");
        }
    }

    #[test]
    fn dates_rows_and_context_are_labelled() {
        assert_eq!(classify_line("February 3, 2026"), LineKind::Date);
        assert_eq!(classify_line("Feb. 3, 2026"), LineKind::Date);
        assert_eq!(classify_line("1 Jane Doe (1002) Win"), LineKind::MatchRow);
        assert_eq!(classify_line("4 Bye"), LineKind::Bye);
        assert_eq!(classify_line("Armory Night"), LineKind::Context);
        assert_eq!(classify_line("Rated"), LineKind::Context);
        assert_eq!(classify_line("Mayfair Games"), LineKind::Context);
        assert_eq!(classify_line("Cookie Cup Armory"), LineKind::Context);
    }

    #[test]
    fn multi_word_results_stay_match_rows() {
        assert_eq!(classify_line("1 Jane Doe (1002) Match nul"), LineKind::MatchRow);
        assert_eq!(classify_line("2 Sam Roe (1003) Win +12"), LineKind::MatchRow);
    }

    #[test]
    fn non_breaking_spaces_are_normalized() {
        let lines = normalized_lines("  Round\u{a0}Opponent\n\n  1 Jane Doe (1002) Win  \n");
        assert_eq!(lines, vec!["Round Opponent", "1 Jane Doe (1002) Win"]);
        assert_eq!(classify_line(&lines[0]), LineKind::Noise);
    }
}
