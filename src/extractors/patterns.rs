// src/extractors/patterns.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

// --- Month Tables ---
// Shared by the pattern set, the expanders and the normalizer.
const MONTH_ABBREVIATIONS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

const ABBR_MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)";
const FULL_MONTH: &str =
    r"(?:january|february|march|april|may|june|july|august|september|october|november|december)";
const ORDINAL: &str = r"(?:st|nd|rd|th)";

/// Regex alternation matching a whole month word, full names listed first so
/// leftmost-first matching prefers "january" over "jan".
pub const MONTH_WORD: &str = r"(?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\.?";

/// Resolves a month token by its first three letters, case-insensitively.
/// "FEB", "February" and "Febru" all give 2.
pub fn month_number(token: &str) -> Option<u32> {
    let prefix: String = token.chars().take(3).collect::<String>().to_ascii_lowercase();
    if prefix.chars().count() < 3 {
        return None;
    }
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == prefix)
        .map(|(_, number)| *number)
}

/// Stricter lookup for single dates: the word must be a full month name, a
/// three-letter abbreviation or "sept" (a trailing period is allowed).
pub fn month_from_name(word: &str) -> Option<u32> {
    let word = word.trim_end_matches('.').to_ascii_lowercase();
    if word == "sept" {
        return Some(9);
    }
    if let Some(index) = MONTH_NAMES.iter().position(|name| *name == word) {
        return Some(index as u32 + 1);
    }
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == word)
        .map(|(_, number)| *number)
}

/// True when `text` contains any month name, full or abbreviated.
pub fn contains_month_name(text: &str) -> bool {
    let lowered = text.to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .any(|(abbr, _)| lowered.contains(abbr))
}

// --- Pattern Library ---

/// Which date shape a pattern recognizes. Declaration order is scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    NumericDayMonthYear,
    NumericYearFirst,
    AbbrevMonthDayYear,
    DayAbbrevMonthYear,
    FullMonthDayYear,
    OrdinalOfMonthYear,
    CommaDayList,
    OrdinalDayList,
    DashDayRange,
}

/// Where a match goes after scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Single,
    Compound,
}

impl PatternKind {
    pub fn route(self) -> Route {
        match self {
            PatternKind::CommaDayList | PatternKind::OrdinalDayList | PatternKind::DashDayRange => {
                Route::Compound
            }
            _ => Route::Single,
        }
    }
}

pub struct DatePattern {
    pub kind: PatternKind,
    pub regex: Regex,
}

/// A raw match. `start` only keeps ordering stable and is never displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCandidate<'a> {
    pub text: &'a str,
    pub kind: PatternKind,
    pub start: usize,
}

static DATE_PATTERNS: Lazy<Vec<DatePattern>> = Lazy::new(|| {
    [
        (PatternKind::NumericDayMonthYear, r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b".to_string()),
        (PatternKind::NumericYearFirst, r"\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b".to_string()),
        (
            PatternKind::AbbrevMonthDayYear,
            format!(r"\b{ABBR_MONTH}[a-z]* \d{{1,2}},? \d{{4}}\b"),
        ),
        (
            PatternKind::DayAbbrevMonthYear,
            format!(r"\b\d{{1,2}} {ABBR_MONTH}[a-z]* \d{{4}}\b"),
        ),
        (
            PatternKind::FullMonthDayYear,
            format!(r"\b{FULL_MONTH} \d{{1,2}},? \d{{4}}\b"),
        ),
        (
            PatternKind::OrdinalOfMonthYear,
            format!(r"\b\d{{1,2}}{ORDINAL}? (?:of )?{FULL_MONTH},? \d{{4}}\b"),
        ),
        (
            PatternKind::CommaDayList,
            format!(r"\b\d{{1,2}}(?: *, *\d{{1,2}})+ +{ABBR_MONTH}[a-z]*,? +\d{{4}}\b"),
        ),
        (
            PatternKind::OrdinalDayList,
            format!(
                r"\b\d{{1,2}}{ORDINAL}(?: *(?:,|&) *| +and +)\d{{1,2}}{ORDINAL}(?:(?: *(?:,|&) *| +and +)\d{{1,2}}{ORDINAL})* +{ABBR_MONTH}[a-z]*,? +\d{{4}}\b"
            ),
        ),
        // Month token left open here; the expander decides whether it resolves.
        (
            PatternKind::DashDayRange,
            format!(r"\b\d{{1,2}}{ORDINAL}? *[-–] *\d{{1,2}}{ORDINAL}? +[a-z]{{3,}}\.?,? +\d{{4}}\b"),
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| DatePattern {
        kind,
        regex: Regex::new(&format!("(?i){pattern}"))
            .expect("Failed to compile DATE_PATTERNS"),
    })
    .collect()
});

/// Ordered pattern set.
pub fn date_patterns() -> &'static [DatePattern] {
    &DATE_PATTERNS
}

/// Applies every pattern to the full text. Overlapping matches from different
/// patterns are all kept; order is pattern declaration order, then position.
pub fn scan(text: &str) -> Vec<DateCandidate<'_>> {
    let mut candidates = Vec::new();
    for pattern in date_patterns() {
        for mat in pattern.regex.find_iter(text) {
            candidates.push(DateCandidate {
                text: mat.as_str(),
                kind: pattern.kind,
                start: mat.start(),
            });
        }
    }
    tracing::trace!("Pattern scan found {} candidates", candidates.len());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_for(text: &str) -> Vec<(PatternKind, &str)> {
        scan(text).into_iter().map(|c| (c.kind, c.text)).collect()
    }

    #[test]
    fn test_month_number_uses_three_letter_prefix() {
        assert_eq!(month_number("FEB"), Some(2));
        assert_eq!(month_number("february"), Some(2));
        assert_eq!(month_number("Sept"), Some(9));
        assert_eq!(month_number("Foo"), None);
        assert_eq!(month_number("ma"), None);
    }

    #[test]
    fn test_month_from_name_rejects_loose_words() {
        assert_eq!(month_from_name("March"), Some(3));
        assert_eq!(month_from_name("mar."), Some(3));
        assert_eq!(month_from_name("sept"), Some(9));
        assert_eq!(month_from_name("Marching"), None);
    }

    #[test]
    fn test_numeric_patterns() {
        let found = kinds_for("due 03/05/2026 or 2026-03-05");
        assert_eq!(
            found,
            vec![
                (PatternKind::NumericDayMonthYear, "03/05/2026"),
                (PatternKind::NumericYearFirst, "2026-03-05"),
            ]
        );
    }

    #[test]
    fn test_month_name_patterns_are_case_insensitive() {
        let found = kinds_for("MARCH 5, 2026 and 5 mar 2026 and the 7th of March 2026");
        assert!(found.contains(&(PatternKind::FullMonthDayYear, "MARCH 5, 2026")));
        assert!(found.contains(&(PatternKind::AbbrevMonthDayYear, "MARCH 5, 2026")));
        assert!(found.contains(&(PatternKind::DayAbbrevMonthYear, "5 mar 2026")));
        assert!(found.contains(&(PatternKind::OrdinalOfMonthYear, "7th of March 2026")));
    }

    #[test]
    fn test_compound_patterns_overlap_single_patterns() {
        let found = kinds_for("25,26,27 FEB 2026");
        assert_eq!(
            found,
            vec![
                (PatternKind::DayAbbrevMonthYear, "27 FEB 2026"),
                (PatternKind::CommaDayList, "25,26,27 FEB 2026"),
            ]
        );
    }

    #[test]
    fn test_ordinal_list_and_dash_range() {
        let list = kinds_for("1st & 2nd Mar 2026");
        assert!(list.contains(&(PatternKind::OrdinalDayList, "1st & 2nd Mar 2026")));

        let range = kinds_for("7th - 8th March, 2026");
        assert!(range.contains(&(PatternKind::DashDayRange, "7th - 8th March, 2026")));
        assert_eq!(PatternKind::DashDayRange.route(), Route::Compound);
        assert_eq!(PatternKind::FullMonthDayYear.route(), Route::Single);
    }

    #[test]
    fn test_contains_month_name() {
        assert!(contains_month_name("Jan 2026"));
        assert!(contains_month_name("DECEMBER"));
        assert!(!contains_month_name("Summer Fest"));
    }
}
