// Source dataset loading.
//
// Reads a full source table into memory with no transformation applied.
// Two serialization forms are supported, selected by file extension:
// `.xlsx` is read as a spreadsheet workbook, anything else as delimited
// text with a header row.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::{RawDataset, RawRecord, COLUMNS};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("input file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed delimited text in {path}: {source}")]
    Format { path: PathBuf, source: csv::Error },

    #[error("malformed workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One delimited-text row. Every cell is optional so the loader never
/// rejects a row for missing data; that is the cleaner's concern. Columns
/// outside the schema are silently ignored.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawCsvRow {
    #[serde(default)]
    Player: Option<String>,
    #[serde(default)]
    Role: Option<String>,
    #[serde(default)]
    Team: Option<String>,
    #[serde(default)]
    Matches: Option<String>,
    #[serde(default)]
    Runs: Option<String>,
    #[serde(default)]
    Bat_SR: Option<String>,
    #[serde(default)]
    Wickets: Option<String>,
    #[serde(default)]
    Econ: Option<String>,
}

impl From<RawCsvRow> for RawRecord {
    fn from(row: RawCsvRow) -> Self {
        RawRecord {
            name: row.Player,
            role: row.Role,
            team: row.Team,
            matches: row.Matches,
            runs: row.Runs,
            batting_strike_rate: row.Bat_SR,
            wickets: row.Wickets,
            economy: row.Econ,
        }
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader (private, enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_delimited_from_reader<R: Read>(rdr: R) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawCsvRow>() {
        rows.push(result?.into());
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Workbook branch
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let workbook_err = |message: String| LoadError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| workbook_err(e.to_string()))?;
    let sheet = book
        .get_sheet(&0)
        .ok_or_else(|| workbook_err("workbook has no sheets".into()))?;

    let highest_row = sheet.get_highest_row();
    let highest_column = sheet.get_highest_column();

    // Map each schema column to the sheet column whose header matches it
    // exactly. Unknown headers are ignored; absent headers leave every cell
    // in that column missing.
    let mut schema_columns: [Option<u32>; COLUMNS.len()] = [None; COLUMNS.len()];
    for col in 1..=highest_column {
        let header = sheet.get_value((col, 1));
        if let Some(pos) = COLUMNS.iter().position(|c| *c == header) {
            schema_columns[pos] = Some(col);
        }
    }

    let mut rows = Vec::new();
    for row in 2..=highest_row {
        let cell = |i: usize| -> Option<String> {
            let value = sheet.get_value((schema_columns[i]?, row));
            if value.is_empty() {
                None
            } else {
                Some(value)
            }
        };
        rows.push(RawRecord {
            name: cell(0),
            role: cell(1),
            team: cell(2),
            matches: cell(3),
            runs: cell(4),
            batting_strike_rate: cell(5),
            wickets: cell(6),
            economy: cell(7),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Public loader
// ---------------------------------------------------------------------------

/// Load the source dataset at `path` into memory, untransformed.
///
/// The `.xlsx` extension selects the workbook branch; any other extension
/// is treated as delimited text and may fail with [`LoadError::Format`]
/// if the content is malformed.
pub fn load_dataset(path: &Path) -> Result<RawDataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let rows = if path.extension().and_then(|e| e.to_str()) == Some("xlsx") {
        load_workbook(path)?
    } else {
        let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        load_delimited_from_reader(file).map_err(|e| LoadError::Format {
            path: path.to_path_buf(),
            source: e,
        })?
    };

    Ok(RawDataset { rows })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
