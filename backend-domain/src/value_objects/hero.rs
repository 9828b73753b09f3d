// Hero placeholder handling

pub const UNKNOWN_HERO: &str = "Unknown";

pub fn unknown_hero() -> String {
    UNKNOWN_HERO.to_string()
}

/// A hero field counts as known when it holds anything but the placeholder.
pub fn is_known_hero(hero: &str) -> bool {
    let trimmed = hero.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case(UNKNOWN_HERO)
}
