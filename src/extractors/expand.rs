// src/extractors/expand.rs
//! Expansion of compound fragments ("25,26,27 FEB 2026", "7th - 8th March 2026")
//! into one canonical date per day. Only days literally named or literally
//! spanned are produced, always inside the single stated month and year.

use crate::extractors::normalize::strip_ordinal;
use crate::extractors::patterns::month_number;
use crate::utils::error::ExpandError;
use once_cell::sync::Lazy;
use regex::Regex;

static LIST_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:,|&|\band\b)\s*").expect("Failed to compile LIST_SEPARATOR_RE regex")
});

/// Picks the expander from the fragment's shape: a dash means a range,
/// anything else is a day list.
pub fn expand(fragment: &str) -> Result<Vec<String>, ExpandError> {
    if fragment.contains(['-', '–']) {
        expand_range(fragment)
    } else {
        expand_list(fragment)
    }
}

/// `D1,D2,D3 Month Year` (also `&`/`and` separators and ordinal suffixes).
pub fn expand_list(fragment: &str) -> Result<Vec<String>, ExpandError> {
    let (days, month, year) = split_month_year(fragment)?;

    let days = LIST_SEPARATOR_RE
        .split(days.trim())
        .map(|piece| parse_day(piece, fragment))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(days
        .into_iter()
        .map(|day| canonical(year, month, day))
        .collect())
}

/// `D1[suffix] - D2[suffix] Month[,] Year`, every day from D1 to D2 inclusive.
pub fn expand_range(fragment: &str) -> Result<Vec<String>, ExpandError> {
    let (days, month, year) = split_month_year(fragment)?;

    let (start, end) = days
        .split_once(['-', '–'])
        .ok_or_else(|| ExpandError::Malformed(fragment.to_string()))?;
    let start = parse_day(start, fragment)?;
    let end = parse_day(end, fragment)?;
    if start > end {
        return Err(ExpandError::Malformed(format!("range runs backwards: {fragment}")));
    }

    Ok((start..=end).map(|day| canonical(year, month, day)).collect())
}

// Splits off the trailing "Month[,] Year" and resolves both.
fn split_month_year(fragment: &str) -> Result<(String, u32, u32), ExpandError> {
    let tokens: Vec<&str> = fragment.split_whitespace().collect();
    let [days @ .., month_token, year_token] = tokens.as_slice() else {
        return Err(ExpandError::Malformed(fragment.to_string()));
    };
    if days.is_empty() {
        return Err(ExpandError::Malformed(fragment.to_string()));
    }

    let month_token = month_token.trim_end_matches([',', '.']);
    let month = month_number(month_token)
        .ok_or_else(|| ExpandError::UnknownMonth(month_token.to_string()))?;

    if year_token.len() != 4 {
        return Err(ExpandError::Malformed(fragment.to_string()));
    }
    let year = year_token
        .parse::<u32>()
        .map_err(|_| ExpandError::Malformed(fragment.to_string()))?;

    Ok((days.join(" "), month, year))
}

fn parse_day(piece: &str, fragment: &str) -> Result<u32, ExpandError> {
    let day = strip_ordinal(piece.trim())
        .and_then(|digits| digits.parse::<u32>().ok())
        .ok_or_else(|| ExpandError::Malformed(fragment.to_string()))?;
    if !(1..=31).contains(&day) {
        return Err(ExpandError::DayOutOfRange(fragment.to_string()));
    }
    Ok(day)
}

fn canonical(year: u32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}
