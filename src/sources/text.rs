// src/sources/text.rs
use crate::utils::error::SourceError;
use std::fs;
use std::path::Path;

/// Reads a file as text, replacing invalid UTF-8 rather than failing.
pub fn read_text(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
