// src/sources/models.rs
use serde::{Deserialize, Serialize};

/// One word row of an OCR word table (Tesseract TSV level 5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    pub block: u32,
    pub paragraph: u32,
    pub line: u32,
    pub height: u32,     // Bounding-box height in pixels
    pub confidence: f32, // 0-100, -1 when the engine gave none
    pub text: String,
}

/// What the OCR collaborator hands back for one image.
#[derive(Debug, Clone, Default)]
pub struct OcrPage {
    pub text: String,
    pub words: Vec<OcrWord>,
}

/// The three strings the core reads out of an email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailParts {
    pub date: Option<String>,
    pub subject: Option<String>,
    pub body: String,
}
