// src/sources/ocr.rs
use crate::sources::models::{OcrPage, OcrWord};
use crate::utils::error::SourceError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Anything that can turn an image into text plus a word table.
pub trait OcrBackend {
    fn recognize(&self, image: &Path) -> Result<OcrPage, SourceError>;
}

/// Where to find Tesseract and its language data. Only ever handed to the
/// child process, never written into this process's environment.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub tesseract_cmd: PathBuf,
    pub tessdata_dir: Option<PathBuf>,
    pub lang: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from("tesseract"),
            tessdata_dir: None,
            lang: "eng".to_string(),
        }
    }
}

/// Runs the `tesseract` binary in TSV mode.
pub struct TesseractOcr {
    config: OcrConfig,
}

impl TesseractOcr {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }
}

impl OcrBackend for TesseractOcr {
    fn recognize(&self, image: &Path) -> Result<OcrPage, SourceError> {
        let mut command = Command::new(&self.config.tesseract_cmd);
        command
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.lang)
            .arg("tsv");
        if let Some(tessdata) = &self.config.tessdata_dir {
            command.env("TESSDATA_PREFIX", tessdata);
        }

        tracing::debug!("Running OCR: {:?}", command);
        let output = command.output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SourceError::BackendUnavailable(format!(
                    "tesseract not found at '{}'",
                    self.config.tesseract_cmd.display()
                ))
            } else {
                SourceError::Io(e)
            }
        })?;

        if !output.status.success() {
            return Err(SourceError::Command {
                program: self.config.tesseract_cmd.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let words = parse_tsv_words(&tsv);
        let text = page_text(&words);
        tracing::info!("Extracted text from {} ({} words)", image.display(), words.len());

        Ok(OcrPage { text, words })
    }
}

/// Parses Tesseract TSV output into word rows.
/// Columns: level page_num block_num par_num line_num word_num left top width height conf text
pub fn parse_tsv_words(tsv: &str) -> Vec<OcrWord> {
    let mut words = Vec::new();

    for line in tsv.lines().skip(1) {
        // Skip header row
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }
        // Level 5 = word
        if fields[0].trim() != "5" {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        let parsed = (|| {
            Some(OcrWord {
                block: fields[2].parse().ok()?,
                paragraph: fields[3].parse().ok()?,
                line: fields[4].parse().ok()?,
                height: fields[9].parse().ok()?,
                confidence: fields[10].parse().ok()?,
                text: text.to_string(),
            })
        })();

        match parsed {
            Some(word) => words.push(word),
            None => tracing::trace!("Skipping malformed TSV row: {}", line),
        }
    }

    words
}

// Rebuilds plain text from the word table: one line per OCR line,
// a blank line between blocks.
fn page_text(words: &[OcrWord]) -> String {
    let mut text = String::new();
    let mut previous: Option<(u32, u32, u32)> = None;

    for word in words {
        let key = (word.block, word.paragraph, word.line);
        match previous {
            Some(prev) if prev == key => text.push(' '),
            Some((block, _, _)) if block != word.block => text.push_str("\n\n"),
            Some(_) => text.push('\n'),
            None => {}
        }
        text.push_str(&word.text);
        previous = Some(key);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSV: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t\n\
5\t1\t1\t1\t1\t1\t10\t10\t200\t42\t96.5\tSummer\n\
5\t1\t1\t1\t1\t2\t220\t10\t120\t40\t95.1\tFest\n\
5\t1\t1\t1\t2\t1\t10\t60\t40\t18\t91\t25,26,27\n\
5\t1\t2\t1\t1\t1\t10\t90\t40\t18\t88\tFEB\n\
5\t1\t2\t1\t1\t2\t60\t90\t40\t18\t87\t2026\n\
5\t1\t2\t1\t1\t3\t60\t90\t40\t18\t-1\t \n";

    #[test]
    fn test_parse_tsv_words() {
        let words = parse_tsv_words(TSV);
        assert_eq!(words.len(), 5);
        assert_eq!(words[0].text, "Summer");
        assert_eq!(words[0].height, 42);
        assert!((words[0].confidence - 96.5).abs() < f32::EPSILON);
        assert_eq!((words[3].block, words[3].paragraph, words[3].line), (2, 1, 1));
    }

    #[test]
    fn test_page_text_keeps_lines() {
        let words = parse_tsv_words(TSV);
        assert_eq!(page_text(&words), "Summer Fest\n25,26,27\n\nFEB 2026");
    }

    #[test]
    fn test_missing_binary_is_backend_unavailable() {
        let ocr = TesseractOcr::new(OcrConfig {
            tesseract_cmd: PathBuf::from("/nonexistent/tesseract-for-tests"),
            ..OcrConfig::default()
        });
        let result = ocr.recognize(Path::new("poster.png"));
        assert!(matches!(result, Err(SourceError::BackendUnavailable(_))));
    }
}
