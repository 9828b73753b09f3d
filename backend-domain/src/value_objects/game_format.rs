// Game format value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameFormat {
    ClassicConstructed,
    Blitz,
    Draft,
    Sealed,
    Clash,
    UltimatePitFight,
    Other,
}

/// Scan order for format keywords. The first keyword found wins.
const FORMAT_KEYWORDS: &[(&str, GameFormat)] = &[
    ("classic constructed", GameFormat::ClassicConstructed),
    ("blitz", GameFormat::Blitz),
    ("draft", GameFormat::Draft),
    ("sealed", GameFormat::Sealed),
    ("clash", GameFormat::Clash),
    ("ultimate pit fight", GameFormat::UltimatePitFight),
];

impl GameFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameFormat::ClassicConstructed => "Classic Constructed",
            GameFormat::Blitz => "Blitz",
            GameFormat::Draft => "Draft",
            GameFormat::Sealed => "Sealed",
            GameFormat::Clash => "Clash",
            GameFormat::UltimatePitFight => "Ultimate Pit Fight",
            GameFormat::Other => "Other",
        }
    }

    /// First format keyword contained in `text`, if any.
    pub fn detect(text: &str) -> Option<GameFormat> {
        let lower = text.to_lowercase();
        FORMAT_KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, format)| *format)
    }

    /// First keyword hit across `lines`, in line order; `Other` when none hits.
    pub fn detect_in_lines<S: AsRef<str>>(lines: &[S]) -> GameFormat {
        lines
            .iter()
            .find_map(|line| GameFormat::detect(line.as_ref()))
            .unwrap_or(GameFormat::Other)
    }

    /// True when the whole line is nothing but a format name.
    pub fn is_format_line(line: &str) -> bool {
        let lower = line.trim().to_lowercase();
        FORMAT_KEYWORDS.iter().any(|(keyword, _)| lower == *keyword)
    }
}

impl From<&str> for GameFormat {
    fn from(s: &str) -> Self {
        GameFormat::detect(s).unwrap_or(GameFormat::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_first_format_keyword_in_line_order() {
        let lines = ["Armory Night", "Blitz", "Classic Constructed"];
        assert_eq!(GameFormat::detect_in_lines(&lines), GameFormat::Blitz);
    }

    #[test]
    fn missing_keyword_defaults_to_other() {
        let lines = ["Calling: Denver"];
        assert_eq!(GameFormat::detect_in_lines(&lines), GameFormat::Other);
        assert_eq!(GameFormat::from("Booster Draft Night"), GameFormat::Draft);
    }

    #[test]
    fn format_line_requires_exact_name() {
        assert!(GameFormat::is_format_line("Classic Constructed"));
        assert!(GameFormat::is_format_line(" ultimate pit fight "));
        assert!(!GameFormat::is_format_line("Blitz Armory"));
    }
}
