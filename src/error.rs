//! Error types for shipment-matcher

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel export error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unsupported output: {0}")]
    UnsupportedOutput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
