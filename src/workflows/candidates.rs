//! Search-string generation and the season-consistency heuristic.
//!
//! Media servers report "Show Title" plus a season number, while AniList keeps a
//! separate entry per season under names like "Show Title 2nd Season" or
//! "Show Title II". We try a fixed list of spellings, most specific first.

use regex::Regex;
use std::sync::LazyLock;

static INLINE_SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*season\s*\d+").expect("valid season regex"));

/// Ordinal words AniList uses in season titles. Seasons past 3 rely on the
/// numeral and Roman markers alone.
const ORDINAL_MARKERS: &[(u32, &str)] = &[(2, "2nd"), (3, "3rd")];

const ROMAN_TABLE: &[(u32, &str)] = &[(10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I")];

/// Roman numeral for 1..=10, the decimal string for anything else.
pub fn roman_numeral(n: u32) -> String {
    if !(1..=10).contains(&n) {
        return n.to_string();
    }
    let mut remaining = n;
    let mut out = String::new();
    for &(value, symbol) in ROMAN_TABLE {
        while remaining >= value {
            out.push_str(symbol);
            remaining -= value;
        }
    }
    out
}

/// `title` with any inline "Season N" removed.
pub fn base_title(title: &str) -> String {
    INLINE_SEASON.replace_all(title, "").trim().to_string()
}

/// Ordered, de-duplicated search strings; the raw title is always last.
pub fn candidate_patterns(title: &str, season: u32) -> Vec<String> {
    let mut patterns = Vec::new();

    if season > 1 {
        let base = base_title(title);
        let roman = roman_numeral(season);

        patterns.push(format!("{base} Season {season}"));
        patterns.push(format!("{base} {season}"));
        if roman != season.to_string() {
            patterns.push(format!("{base} {roman}"));
        }
        if season == 2 {
            patterns.push(format!("{base} 2nd Season"));
        } else {
            patterns.push(format!("{base} {season}rd Season"));
        }
    }
    patterns.push(title.to_string());

    let mut unique: Vec<String> = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        if !unique.contains(&pattern) {
            unique.push(pattern);
        }
    }
    unique
}

/// Lower-case substrings that identify `season` inside a catalog title.
pub fn season_markers(season: u32) -> Vec<String> {
    let mut markers = vec![season.to_string(), roman_numeral(season).to_lowercase()];
    markers.extend(
        ORDINAL_MARKERS
            .iter()
            .filter(|(s, _)| *s == season)
            .map(|(_, word)| word.to_string()),
    );
    markers
}

/// Whether a lower-cased catalog title plausibly names `season`.
pub fn is_season_consistent(found_title: &str, season: u32) -> bool {
    season_markers(season)
        .iter()
        .any(|marker| found_title.contains(marker.as_str()))
}
