// Spreadsheet report assembly: workbook writing and chart embedding.

pub mod embed;
pub mod writer;

use std::path::PathBuf;

/// Output I/O failure shared by the report writer and the chart embedder:
/// workbook creation, re-open, image lookup, or save.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to write workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("failed to open workbook {path}: {message}")]
    Open { path: PathBuf, message: String },

    #[error("failed to save workbook {path}: {message}")]
    Save { path: PathBuf, message: String },

    #[error("chart image not found: {path}")]
    MissingImage { path: PathBuf },

    #[error("failed to prepare sheet `{name}`: {message}")]
    Sheet { name: String, message: String },
}
