// src/extractors/title.rs
use crate::extractors::patterns::contains_month_name;
use crate::sources::models::OcrWord;
use std::collections::HashMap;

/// Words recognized below this confidence are ignored.
pub const MIN_WORD_CONFIDENCE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub block: u32,
    pub paragraph: u32,
    pub line: u32,
}

/// Words of one OCR line plus the tallest word height, used as font size.
#[derive(Debug, Clone)]
pub struct TextLine {
    pub words: Vec<String>,
    pub max_height: u32,
}

impl TextLine {
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Groups confident, non-empty words into lines, keeping table order.
pub fn group_lines(words: &[OcrWord]) -> Vec<TextLine> {
    let mut lines: Vec<TextLine> = Vec::new();
    let mut index: HashMap<LineKey, usize> = HashMap::new();

    for word in words {
        let text = word.text.trim();
        if word.confidence < MIN_WORD_CONFIDENCE || text.is_empty() {
            continue;
        }
        let key = LineKey {
            block: word.block,
            paragraph: word.paragraph,
            line: word.line,
        };
        let slot = *index.entry(key).or_insert_with(|| {
            lines.push(TextLine {
                words: Vec::new(),
                max_height: 0,
            });
            lines.len() - 1
        });
        let line = &mut lines[slot];
        line.words.push(text.to_string());
        line.max_height = line.max_height.max(word.height);
    }

    lines
}

/// A line reads as a date when it names a month or is mostly digits.
pub fn looks_like_date(text: &str) -> bool {
    if contains_month_name(text) {
        return true;
    }
    let total = text.chars().count();
    let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
    total > 0 && digits * 2 > total
}

/// Text of the tallest line that is not date-like, else `fallback`.
pub fn select_title(words: &[OcrWord], fallback: &str) -> String {
    let mut lines = group_lines(words);
    // Stable: equal heights keep reading order.
    lines.sort_by(|a, b| b.max_height.cmp(&a.max_height));

    match lines
        .iter()
        .map(TextLine::text)
        .find(|text| !looks_like_date(text))
    {
        Some(title) => {
            tracing::debug!("Selected title '{}' from {} OCR lines", title, lines.len());
            title
        }
        None => {
            tracing::debug!("No title line found, using fallback '{}'", fallback);
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(line: u32, height: u32, confidence: f32, text: &str) -> OcrWord {
        OcrWord {
            block: 1,
            paragraph: 1,
            line,
            height,
            confidence,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_tallest_non_date_line_wins() {
        let words = vec![
            word(1, 10, 90.0, "Jan"),
            word(1, 10, 90.0, "2026"),
            word(2, 40, 90.0, "Summer"),
            word(2, 38, 90.0, "Fest"),
            word(3, 15, 90.0, "Tickets"),
        ];
        assert_eq!(select_title(&words, "poster"), "Summer Fest");
    }

    #[test]
    fn test_low_confidence_and_blank_words_are_dropped() {
        let words = vec![
            word(1, 50, 12.0, "Blurry"),
            word(1, 50, 95.0, "   "),
            word(2, 20, 80.0, "Gala"),
        ];
        let lines = group_lines(&words);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Gala");
        assert_eq!(select_title(&words, "poster"), "Gala");
    }

    #[test]
    fn test_falls_back_when_everything_is_date_like() {
        let words = vec![
            word(1, 30, 90.0, "12/05/2026"),
            word(2, 25, 90.0, "MAY"),
            word(3, 60, 5.0, "Concert"),
        ];
        assert_eq!(select_title(&words, "flyer"), "flyer");
        assert_eq!(select_title(&[], "flyer"), "flyer");
    }

    #[test]
    fn test_falls_back_when_no_word_is_confident() {
        let words = vec![
            word(1, 60, 29.9, "Harvest"),
            word(1, 60, 10.0, "Dance"),
            word(2, 20, 0.0, "Tickets"),
        ];
        assert!(group_lines(&words).is_empty());
        assert_eq!(select_title(&words, "flyer"), "flyer");
    }

    #[test]
    fn test_looks_like_date() {
        assert!(looks_like_date("Jan 2026"));
        assert!(looks_like_date("2026 / 05"));
        assert!(!looks_like_date("Room 12"));
        assert!(!looks_like_date(""));
    }

    #[test]
    fn test_line_height_is_tallest_word() {
        let words = vec![word(1, 12, 90.0, "a"), word(1, 30, 90.0, "b"), word(1, 18, 90.0, "c")];
        let lines = group_lines(&words);
        assert_eq!(lines[0].max_height, 30);
        assert_eq!(lines[0].words, vec!["a", "b", "c"]);
    }
}
