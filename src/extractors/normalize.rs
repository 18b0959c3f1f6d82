// src/extractors/normalize.rs
use crate::extractors::patterns::month_from_name;
use crate::utils::error::NormalizeError;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// How an all-numeric `a/b/year` fragment is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum DateOrder {
    /// 03/05/2026 is March 5th.
    #[default]
    #[value(name = "mdy")]
    MonthFirst,
    /// 03/05/2026 is May 3rd.
    #[value(name = "dmy")]
    DayFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Number {
    value: u32,
    digits: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number(Number),
    Month(u32),
}

/// Parses a single (non-compound) date fragment and renders it as `YYYY-MM-DD`.
/// Never guesses: anything it cannot read strictly is an error, and the caller
/// keeps the raw text instead.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    order: DateOrder,
    pivot_year: i32,
}

impl DateNormalizer {
    pub fn new(order: DateOrder) -> Self {
        Self {
            order,
            pivot_year: Local::now().year(),
        }
    }

    /// Year two-digit years are resolved against (defaults to the current year).
    #[cfg(test)]
    pub fn with_pivot_year(mut self, year: i32) -> Self {
        self.pivot_year = year;
        self
    }

    pub fn normalize(&self, fragment: &str) -> Result<String, NormalizeError> {
        let tokens = tokenize(fragment)?;

        let date = match tokens.as_slice() {
            [Token::Number(first), Token::Number(second), Token::Number(third)] => {
                if first.digits == 4 {
                    calendar_date(first.value as i32, second.value, third.value)
                        .ok_or_else(|| NormalizeError::InvalidDate(fragment.to_string()))?
                } else {
                    self.resolve_numeric(*first, *second, *third)
                        .ok_or_else(|| NormalizeError::InvalidDate(fragment.to_string()))?
                }
            }
            [Token::Month(month), Token::Number(day), Token::Number(year)]
            | [Token::Number(day), Token::Month(month), Token::Number(year)] => {
                calendar_date(self.resolve_year(*year), *month, day.value)
                    .ok_or_else(|| NormalizeError::InvalidDate(fragment.to_string()))?
            }
            _ => return Err(NormalizeError::Shape(fragment.to_string())),
        };

        Ok(date.format("%Y-%m-%d").to_string())
    }

    // Configured order first; if that is not a real date but the swapped
    // reading is, take the swapped one.
    fn resolve_numeric(&self, first: Number, second: Number, year: Number) -> Option<NaiveDate> {
        let year = self.resolve_year(year);
        let (month, day) = match self.order {
            DateOrder::MonthFirst => (first.value, second.value),
            DateOrder::DayFirst => (second.value, first.value),
        };
        calendar_date(year, month, day).or_else(|| calendar_date(year, day, month))
    }

    // Two-digit years land within 50 years of the pivot.
    fn resolve_year(&self, year: Number) -> i32 {
        if year.digits > 2 {
            return year.value as i32;
        }
        let century = self.pivot_year - self.pivot_year.rem_euclid(100);
        let resolved = century + year.value as i32;
        if resolved >= self.pivot_year + 50 {
            resolved - 100
        } else if resolved < self.pivot_year - 50 {
            resolved + 100
        } else {
            resolved
        }
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new(DateOrder::default())
    }
}

fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Strips an ordinal suffix ("7th" -> "7"). Returns the digits only when the
/// remainder is purely numeric.
pub(crate) fn strip_ordinal(word: &str) -> Option<&str> {
    let lowered = word.to_ascii_lowercase();
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| lowered.strip_suffix(*suffix).map(|rest| &word[..rest.len()]))
        .unwrap_or(word);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

fn tokenize(fragment: &str) -> Result<Vec<Token>, NormalizeError> {
    let mut tokens = Vec::new();
    let pieces = fragment
        .split(|c: char| c.is_whitespace() || matches!(c, '/' | '-' | ','))
        .filter(|piece| !piece.is_empty());

    for piece in pieces {
        if piece.eq_ignore_ascii_case("of") {
            continue;
        }
        if let Some(digits) = strip_ordinal(piece) {
            let value = digits
                .parse::<u32>()
                .map_err(|_| NormalizeError::UnknownToken(piece.to_string()))?;
            tokens.push(Token::Number(Number {
                value,
                digits: digits.len(),
            }));
        } else if let Some(month) = month_from_name(piece) {
            tokens.push(Token::Month(month));
        } else {
            return Err(NormalizeError::UnknownToken(piece.to_string()));
        }
    }

    Ok(tokens)
}
