// src/pipeline.rs
use crate::extractors::{select_title, DateExtractor};
use crate::sources::{email, text, DocumentKind, OcrBackend, PdfBackend};
use crate::utils::error::SourceError;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Which part of a document a date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum DateOrigin {
    Text,
    Page(usize),
    EmailDate,
    Subject,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateEntry {
    pub value: String,
    pub origin: DateOrigin,
}

impl fmt::Display for DateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            DateOrigin::Text => write!(f, "{}", self.value),
            DateOrigin::Page(page) => write!(f, "{} (page {})", self.value, page),
            DateOrigin::EmailDate => write!(f, "Email Date: {}", self.value),
            DateOrigin::Subject => write!(f, "Subject: {}", self.value),
            DateOrigin::Body => write!(f, "Body: {}", self.value),
        }
    }
}

/// One processed document. Always carries a label, even when no title was found.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub file: PathBuf,
    pub label: String,
    pub dates: Vec<DateEntry>,
}

// Dates of one document plus the compound fragments that expanded to nothing.
#[derive(Debug, Default)]
struct DocumentDates {
    dates: Vec<DateEntry>,
    dropped_expansions: usize,
}

impl DocumentDates {
    fn absorb(&mut self, other: DocumentDates) {
        self.dates.extend(other.dates);
        self.dropped_expansions += other.dropped_expansions;
    }
}

/// Runs each document through its backend and the date engine, and keeps
/// the results of the whole run.
pub struct ExtractionPipeline {
    extractor: DateExtractor,
    ocr: Box<dyn OcrBackend>,
    pdf: Box<dyn PdfBackend>,
    results: Vec<ExtractionResult>,
    failures: usize,
    dropped_expansions: usize,
}

impl ExtractionPipeline {
    pub fn new(extractor: DateExtractor, ocr: Box<dyn OcrBackend>, pdf: Box<dyn PdfBackend>) -> Self {
        Self {
            extractor,
            ocr,
            pdf,
            results: Vec::new(),
            failures: 0,
            dropped_expansions: 0,
        }
    }

    pub fn results(&self) -> &[ExtractionResult] {
        &self.results
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Compound fragments dropped across every document of the run.
    pub fn dropped_expansions(&self) -> usize {
        self.dropped_expansions
    }

    /// File or directory. Returns how many documents were processed; an empty
    /// directory is readable and gives `Ok(0)`. Errors when the path is missing,
    /// the file failed, or every file below the directory failed.
    pub fn process_path(&mut self, path: &Path) -> Result<usize, SourceError> {
        if path.is_file() {
            match self.process_file(path) {
                Ok(_) => Ok(1),
                Err(e) => {
                    tracing::error!("Error processing {}: {}", path.display(), e);
                    self.failures += 1;
                    Err(e)
                }
            }
        } else if path.is_dir() {
            let failures_before = self.failures;
            let processed = self.process_directory(path);
            if processed == 0 && self.failures > failures_before {
                Err(SourceError::NothingReadable(path.to_path_buf()))
            } else {
                Ok(processed)
            }
        } else {
            tracing::warn!("{} not found", path.display());
            Err(SourceError::NotFound(path.to_path_buf()))
        }
    }

    /// Every file below `directory`, in file-name order.
    pub fn process_directory(&mut self, directory: &Path) -> usize {
        let mut processed = 0;
        let entries = WalkDir::new(directory)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", directory.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file());

        for entry in entries {
            match self.process_file(entry.path()) {
                Ok(_) => processed += 1,
                Err(e) => {
                    tracing::error!("Error processing {}: {}", entry.path().display(), e);
                    self.failures += 1;
                }
            }
        }
        processed
    }

    /// Extracts one document and appends its result.
    pub fn process_file(&mut self, path: &Path) -> Result<&ExtractionResult, SourceError> {
        fs::metadata(path)?;
        let fallback_label = file_label(path);

        let (label, found) = match DocumentKind::from_path(path) {
            DocumentKind::Image => self.extract_image(path, &fallback_label)?,
            DocumentKind::Pdf => (fallback_label, self.extract_pdf(path)?),
            DocumentKind::Email => (fallback_label, self.extract_email(path)?),
            DocumentKind::Text => {
                let content = text::read_text(path)?;
                (fallback_label, self.tag(&content, DateOrigin::Text))
            }
        };

        tracing::info!(
            "Extracted {} dates from {} ({} compound fragments dropped)",
            found.dates.len(),
            path.display(),
            found.dropped_expansions
        );
        self.dropped_expansions += found.dropped_expansions;
        self.results.push(ExtractionResult {
            file: path.to_path_buf(),
            label,
            dates: found.dates,
        });
        Ok(&self.results[self.results.len() - 1])
    }

    fn extract_image(
        &self,
        path: &Path,
        fallback_label: &str,
    ) -> Result<(String, DocumentDates), SourceError> {
        match self.ocr.recognize(path) {
            Ok(page) => {
                let label = select_title(&page.words, fallback_label);
                Ok((label, self.tag(&page.text, DateOrigin::Text)))
            }
            Err(SourceError::BackendUnavailable(reason)) => {
                tracing::warn!("Skipping image {}: OCR not available ({})", path.display(), reason);
                Ok((fallback_label.to_string(), DocumentDates::default()))
            }
            Err(e) => Err(e),
        }
    }

    fn extract_pdf(&self, path: &Path) -> Result<DocumentDates, SourceError> {
        let pages = match self.pdf.pages(path) {
            Ok(pages) => pages,
            Err(SourceError::BackendUnavailable(reason)) => {
                tracing::warn!("Skipping PDF {}: {}", path.display(), reason);
                return Ok(DocumentDates::default());
            }
            Err(e) => return Err(e),
        };

        let mut found = DocumentDates::default();
        for (index, page) in pages.iter().enumerate() {
            found.absorb(self.tag(page, DateOrigin::Page(index + 1)));
        }
        Ok(found)
    }

    fn extract_email(&self, path: &Path) -> Result<DocumentDates, SourceError> {
        let parts = email::read_email(path)?;
        let mut found = DocumentDates::default();
        if let Some(date) = &parts.date {
            found.absorb(self.tag(date, DateOrigin::EmailDate));
        }
        if let Some(subject) = &parts.subject {
            found.absorb(self.tag(subject, DateOrigin::Subject));
        }
        found.absorb(self.tag(&parts.body, DateOrigin::Body));
        Ok(found)
    }

    // One extraction call, so dedup is scoped to this piece of text.
    fn tag(&self, text: &str, origin: DateOrigin) -> DocumentDates {
        let extraction = self.extractor.extract(text);
        DocumentDates {
            dates: extraction
                .dates
                .into_iter()
                .map(|value| DateEntry { value, origin })
                .collect(),
            dropped_expansions: extraction.dropped_expansions,
        }
    }
}

/// File name without its extension.
pub fn file_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Unknown Event")
        .to_string()
}
