// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Errors raised by the collaborators that turn a file into text
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String), // OCR/PDF tool missing, degrade to no dates

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("{program} exited with failure: {stderr}")]
    Command { program: String, stderr: String },

    #[error("{0} not found")]
    NotFound(PathBuf),

    #[error("No file under {0} could be read")]
    NothingReadable(PathBuf),
}

// A single fragment that will not parse as one calendar date.
// Recovered locally by keeping the raw fragment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Unrecognized token '{0}'")]
    UnknownToken(String),

    #[error("Unexpected date shape: {0}")]
    Shape(String),

    #[error("Not a calendar date: {0}")]
    InvalidDate(String),
}

// A compound fragment whose structure or month could not be resolved.
// Recovered locally by contributing zero dates.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExpandError {
    #[error("Malformed compound fragment: {0}")]
    Malformed(String),

    #[error("Unknown month '{0}'")]
    UnknownMonth(String),

    #[error("Day out of range: {0}")]
    DayOutOfRange(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Source read failed: {0}")]
    Source(#[from] SourceError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
