// src/extractors/preprocess.rs
use crate::extractors::patterns::MONTH_WORD;
use once_cell::sync::Lazy;
use regex::Regex;

// Day list on one line, month (maybe with year) on the next:
// "25,26,27\nFEB 2026" -> "25,26,27 FEB 2026"
static DAY_LIST_THEN_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?im)\b(\d{{1,2}}(?:(?:[ \t]*,[ \t]*|[ \t]+)\d{{1,2}})*)[ \t]*\r?\n[ \t]*({MONTH_WORD}(?:[ \t]+\d{{4}})?)\b"
    ))
    .expect("Failed to compile DAY_LIST_THEN_MONTH_RE regex")
});

// Month name on one line, bare year on the next: "March\n2026" -> "March 2026"
static MONTH_THEN_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?im)\b({MONTH_WORD})[ \t]*\r?\n[ \t]*(\d{{4}})\b"))
        .expect("Failed to compile MONTH_THEN_YEAR_RE regex")
});

/// Rejoins date fragments that OCR split across two lines. Text that does not
/// have one of the two shapes passes through untouched, and a second run over
/// the output changes nothing.
pub fn rejoin_ocr_lines(text: &str) -> String {
    let days_joined = DAY_LIST_THEN_MONTH_RE.replace_all(text, "${1} ${2}");
    MONTH_THEN_YEAR_RE
        .replace_all(&days_joined, "${1} ${2}")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_day_list_and_month_line() {
        assert_eq!(rejoin_ocr_lines("25,26,27\nFEB 2026"), "25,26,27 FEB 2026");
        assert_eq!(rejoin_ocr_lines("Dates: 3, 4\r\nMarch 2026"), "Dates: 3, 4 March 2026");
    }

    #[test]
    fn test_joins_month_and_year_line() {
        assert_eq!(rejoin_ocr_lines("Opening 5 March\n2026"), "Opening 5 March 2026");
    }

    #[test]
    fn test_three_line_split_needs_both_rules() {
        assert_eq!(rejoin_ocr_lines("12\nJune\n2026"), "12 June 2026");
    }

    #[test]
    fn test_space_separated_days_are_joined_too() {
        // Only the last day reaches a pattern; nothing expands "3 4 Mar 2026".
        assert_eq!(rejoin_ocr_lines("3 4\nMar\n2026"), "3 4 Mar 2026");
    }

    #[test]
    fn test_unrelated_text_untouched() {
        let text = "Summer Fest\nTickets on sale\nRoom 2026\nLobby";
        assert_eq!(rejoin_ocr_lines(text), text);
    }

    #[test]
    fn test_is_idempotent() {
        let inputs = [
            "25,26,27\nFEB 2026\nMarch\n2026\nApril",
            "7th - 8th March\n2026",
            "no dates at all\n",
        ];
        for input in inputs {
            let once = rejoin_ocr_lines(input);
            assert_eq!(rejoin_ocr_lines(&once), once, "input: {input:?}");
        }
    }
}
