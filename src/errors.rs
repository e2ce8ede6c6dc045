//! Unified application error type.
//! The outer surfaces (db, cli, config, export) return AppError; the decoder,
//! normalizer, merger and filter engine are total and never produce one.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Log source error: {0}")]
    LogSource(String),

    // user input
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid action: {0} (expected create, update or delete)")]
    InvalidAction(String),

    #[error("Invalid domain: {0} (expected bookings or coach_assignment)")]
    InvalidDomain(String),

    #[error("Invalid operation: {0} (expected create, update, delete or schedule)")]
    InvalidOperation(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // config
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read configuration file {}", .0.display())]
    ConfigLoad(PathBuf),

    #[error("Failed to write configuration file {}", .0.display())]
    ConfigSave(PathBuf),

    // import / export
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error at row {row}: {message}")]
    Import { row: usize, message: String },
}

pub type AppResult<T> = Result<T, AppError>;
