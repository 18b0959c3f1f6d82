// src/storage/mod.rs
pub mod saved;

use crate::pipeline::ExtractionResult;
use crate::utils::error::StorageError;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[allow(unused_imports)]
pub use saved::{SavedDate, SavedDateStore};

const RULE_WIDTH: usize = 80;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the human-readable report of a run.
    pub fn save_report(
        &self,
        results: &[ExtractionResult],
        filename: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);
        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        fs::write(&file_path, render_report(results, &generated)).map_err(StorageError::IoError)?;

        let files_with_dates = results.iter().filter(|r| !r.dates.is_empty()).count();
        let total_dates: usize = results.iter().map(|r| r.dates.len()).sum();
        tracing::info!("Results saved to: {}", file_path.display());
        tracing::info!("Total files processed: {}", results.len());
        tracing::info!("Files with dates: {}, total dates found: {}", files_with_dates, total_dates);

        Ok(file_path)
    }

    /// Saves the results as JSON next to the report.
    pub fn save_json(
        &self,
        results: &[ExtractionResult],
        filename: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);

        let document = serde_json::json!({
            "generated": chrono::Utc::now().to_rfc3339(),
            "results": results,
        });
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved JSON results to {}", file_path.display());
        Ok(file_path)
    }
}

/// Report body. Files without dates are left out.
pub fn render_report(results: &[ExtractionResult], generated: &str) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "Date Extraction Results");
    let _ = writeln!(report, "Generated: {}", generated);
    let _ = writeln!(report, "{}\n", "=".repeat(RULE_WIDTH));

    let with_dates: Vec<&ExtractionResult> = results.iter().filter(|r| !r.dates.is_empty()).collect();
    if with_dates.is_empty() {
        report.push_str("No dates found.\n");
        return report;
    }

    for result in with_dates {
        let _ = writeln!(report, "File: {}", result.file.display());
        let _ = writeln!(report, "Event: {}", result.label);
        let _ = writeln!(report, "{}", "-".repeat(RULE_WIDTH));
        for date in &result.dates {
            let _ = writeln!(report, "  • {}", date);
        }
        report.push('\n');
    }
    report
}
