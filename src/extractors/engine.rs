// src/extractors/engine.rs
use crate::extractors::dedup::DeduplicationTracker;
use crate::extractors::expand;
use crate::extractors::normalize::{DateNormalizer, DateOrder};
use crate::extractors::patterns::{self, Route};
use crate::extractors::preprocess::rejoin_ocr_lines;

/// Output of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Canonical `YYYY-MM-DD` dates and raw fallbacks, first-seen order, no repeats.
    pub dates: Vec<String>,
    /// Compound fragments that expanded to nothing.
    pub dropped_expansions: usize,
}

/// Text in, ordered deduplicated date strings out.
#[derive(Debug, Clone, Default)]
pub struct DateExtractor {
    normalizer: DateNormalizer,
}

impl DateExtractor {
    pub fn new(order: DateOrder) -> Self {
        Self::with_normalizer(DateNormalizer::new(order))
    }

    pub fn with_normalizer(normalizer: DateNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn extract(&self, text: &str) -> Extraction {
        let prepared = rejoin_ocr_lines(text);
        let mut tracker = DeduplicationTracker::new();
        let mut dropped_expansions = 0;

        for candidate in patterns::scan(&prepared) {
            match candidate.kind.route() {
                Route::Single => match self.normalizer.normalize(candidate.text) {
                    Ok(date) => {
                        tracker.offer(date);
                    }
                    Err(e) => {
                        tracing::trace!("Keeping raw fragment '{}': {}", candidate.text, e);
                        tracker.offer(candidate.text.to_string());
                    }
                },
                Route::Compound => match expand::expand(candidate.text) {
                    Ok(dates) => {
                        for date in dates {
                            tracker.offer(date);
                        }
                    }
                    Err(e) => {
                        tracing::trace!("Dropping compound fragment '{}': {}", candidate.text, e);
                        dropped_expansions += 1;
                    }
                },
            }
        }

        if dropped_expansions > 0 {
            tracing::debug!("{} compound date fragments expanded to nothing", dropped_expansions);
        }

        Extraction {
            dates: tracker.into_dates(),
            dropped_expansions,
        }
    }

    pub fn extract_dates(&self, text: &str) -> Vec<String> {
        self.extract(text).dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DateExtractor {
        DateExtractor::with_normalizer(DateNormalizer::new(DateOrder::MonthFirst).with_pivot_year(2026))
    }

    fn sorted(mut dates: Vec<String>) -> Vec<String> {
        dates.sort();
        dates
    }

    #[test]
    fn test_month_name_date_is_canonicalized() {
        let dates = extractor().extract_dates("The launch is on March 5, 2026 at noon.");
        assert_eq!(dates, vec!["2026-03-05"]);
    }

    #[test]
    fn test_equivalent_mentions_collapse_to_one() {
        let dates = extractor().extract_dates("Due 03/05/2026 (that is March 5, 2026).");
        assert_eq!(dates, vec!["2026-03-05"]);
    }

    #[test]
    fn test_order_follows_pattern_declaration_then_position() {
        let dates = extractor().extract_dates("Jan 9, 2026 then 02/01/2026 then 1/3/2026");
        assert_eq!(dates, vec!["2026-02-01", "2026-01-03", "2026-01-09"]);
    }

    #[test]
    fn test_comma_list_expands_all_days() {
        let extraction = extractor().extract("Sessions: 25,26,27 FEB 2026");
        // "27 FEB 2026" also matches the day-month-year pattern, which comes first.
        assert_eq!(
            extraction.dates,
            vec!["2026-02-27", "2026-02-25", "2026-02-26"]
        );
        assert_eq!(extraction.dropped_expansions, 0);
    }

    #[test]
    fn test_line_split_list_matches_single_line() {
        let split = extractor().extract_dates("25,26,27\nFEB 2026");
        let joined = extractor().extract_dates("25,26,27 FEB 2026");
        assert_eq!(split, joined);
        assert_eq!(sorted(split), vec!["2026-02-25", "2026-02-26", "2026-02-27"]);
    }

    #[test]
    fn test_dash_range() {
        let dates = extractor().extract_dates("Festival 7th - 8th March 2026");
        assert_eq!(sorted(dates), vec!["2026-03-07", "2026-03-08"]);
    }

    #[test]
    fn test_bad_compound_does_not_disturb_other_matches() {
        let extraction = extractor().extract("7th - 8th Foo 2026, and the deadline is June 1, 2026");
        assert_eq!(extraction.dates, vec!["2026-06-01"]);
        assert_eq!(extraction.dropped_expansions, 1);
    }

    #[test]
    fn test_unparseable_single_fragment_is_kept_raw() {
        let dates = extractor().extract_dates("Ref 13/13/2026 and 2026-02-30");
        assert_eq!(dates, vec!["13/13/2026", "2026-02-30"]);
    }

    #[test]
    fn test_space_separated_day_list_keeps_only_last_day() {
        let extraction = extractor().extract("3 4\nMar\n2026");
        assert_eq!(extraction.dates, vec!["2026-03-04"]);
        assert_eq!(extraction.dropped_expansions, 0);
    }

    #[test]
    fn test_no_dates() {
        assert!(extractor().extract_dates("nothing to see here").is_empty());
    }
}
