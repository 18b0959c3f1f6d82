// src/sources/pdf.rs
use crate::utils::error::SourceError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Anything that can split a PDF into per-page text.
pub trait PdfBackend {
    fn pages(&self, pdf: &Path) -> Result<Vec<String>, SourceError>;
}

/// Shells out to poppler's `pdftotext`.
pub struct PdftotextBackend {
    program: PathBuf,
}

impl PdftotextBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PdftotextBackend {
    fn default() -> Self {
        Self::new("pdftotext")
    }
}

impl PdfBackend for PdftotextBackend {
    fn pages(&self, pdf: &Path) -> Result<Vec<String>, SourceError> {
        let output = Command::new(&self.program)
            .arg("-enc")
            .arg("UTF-8")
            .arg(pdf)
            .arg("-")
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    SourceError::BackendUnavailable(format!(
                        "pdftotext not found at '{}'",
                        self.program.display()
                    ))
                } else {
                    SourceError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(SourceError::Command {
                program: self.program.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let pages = split_pages(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!("pdftotext returned {} pages for {}", pages.len(), pdf.display());
        Ok(pages)
    }
}

/// Splits pdftotext output on form feeds. The trailing feed after the last
/// page does not start a new page.
pub fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();
    if pages.len() > 1 && pages.last().is_some_and(|last| last.trim().is_empty()) {
        pages.pop();
    }
    pages
}
