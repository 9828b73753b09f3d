// Match result value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

/// Localized result tokens, one table per result class.
/// Covers English, German, French, Spanish, Italian and Japanese exports.
const WIN_TOKENS: &[&str] = &["win", "won", "w", "sieg", "gewonnen", "victoire", "victoria", "vittoria", "勝利", "勝ち"];
const LOSS_TOKENS: &[&str] = &[
    "loss", "lost", "l", "niederlage", "verloren", "défaite", "defaite", "derrota", "sconfitta", "敗北", "負け",
];
const DRAW_TOKENS: &[&str] = &[
    "draw", "d", "tie", "unentschieden", "égalité", "egalite", "nul", "match nul", "empate", "pareggio", "引き分け",
];

impl MatchResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchResult::Win => "Win",
            MatchResult::Loss => "Loss",
            MatchResult::Draw => "Draw",
        }
    }

    /// The result the other player must have recorded for the same game.
    pub fn opposite(&self) -> MatchResult {
        match self {
            MatchResult::Win => MatchResult::Loss,
            MatchResult::Loss => MatchResult::Win,
            MatchResult::Draw => MatchResult::Draw,
        }
    }

    pub fn is_opposite_of(&self, other: MatchResult) -> bool {
        self.opposite() == other
    }

    /// Maps a localized result token onto a result class. Byes and anything
    /// not in the tables yield `None`.
    pub fn from_localized(token: &str) -> Option<MatchResult> {
        let normalized = token
            .trim()
            .trim_end_matches(|ch: char| matches!(ch, '.' | ',' | ';' | ':' | '!'))
            .to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        if WIN_TOKENS.contains(&normalized.as_str()) {
            return Some(MatchResult::Win);
        }
        if LOSS_TOKENS.contains(&normalized.as_str()) {
            return Some(MatchResult::Loss);
        }
        if DRAW_TOKENS.contains(&normalized.as_str()) {
            return Some(MatchResult::Draw);
        }
        None
    }
}
