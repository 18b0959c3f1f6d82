// src/sources/mod.rs
//! Collaborators that turn a file on disk into the strings (or OCR word
//! table) the date engine reads.

pub mod email;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod text;

use std::path::Path;

#[allow(unused_imports)]
pub use models::{EmailParts, OcrPage, OcrWord};
#[allow(unused_imports)]
pub use ocr::{OcrBackend, OcrConfig, TesseractOcr};
#[allow(unused_imports)]
pub use pdf::{PdfBackend, PdftotextBackend};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff"];
const EMAIL_EXTENSIONS: &[&str] = &["eml", "msg"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Image,
    Pdf,
    Email,
    Text,
}

impl DocumentKind {
    /// Picks the backend by extension. Unknown extensions are read as text.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            DocumentKind::Image
        } else if extension == "pdf" {
            DocumentKind::Pdf
        } else if EMAIL_EXTENSIONS.contains(&extension.as_str()) {
            DocumentKind::Email
        } else {
            if !TEXT_EXTENSIONS.contains(&extension.as_str()) {
                tracing::info!(
                    "Unknown extension '{}' for {}, attempting to read as text",
                    extension,
                    path.display()
                );
            }
            DocumentKind::Text
        }
    }
}
