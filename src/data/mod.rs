// In-memory table types: the untyped rows the loader produces and the
// typed records the cleaner guarantees.

pub mod clean;
pub mod load;

/// The fixed column schema of a source dataset, in column order. Header
/// matching is case-sensitive.
pub const COLUMNS: [&str; 8] = [
    "Player", "Role", "Team", "Matches", "Runs", "Bat_SR", "Wickets", "Econ",
];

/// Replacement for a missing text cell.
pub const MISSING_TEXT: &str = "Unknown";

// ---------------------------------------------------------------------------
// Raw (loader output)
// ---------------------------------------------------------------------------

/// One row as read from the source file, untouched. A `None` cell was
/// missing in the source; cell contents are kept verbatim, including
/// whitespace and unparseable numerics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub name: Option<String>,
    pub role: Option<String>,
    pub team: Option<String>,
    pub matches: Option<String>,
    pub runs: Option<String>,
    pub batting_strike_rate: Option<String>,
    pub wickets: Option<String>,
    pub economy: Option<String>,
}

/// The ordered, untransformed table produced by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDataset {
    pub rows: Vec<RawRecord>,
}

impl RawDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Cleaned (cleaner output)
// ---------------------------------------------------------------------------

/// One player's attribute row after cleaning. Every field holds a valid
/// value; numeric fields are non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub role: String,
    pub team: String,
    pub matches: u32,
    pub runs: u32,
    pub batting_strike_rate: f64,
    pub wickets: u32,
    pub economy: f64,
}

impl Record {
    /// Deduplication identity: `(name, team)`.
    pub fn identity(&self) -> (&str, &str) {
        (&self.name, &self.team)
    }
}

/// The ordered collection of cleaned records. Constructed only by the
/// cleaner, so no two records share a `(name, team)` identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Typed -> raw conversion
// ---------------------------------------------------------------------------

/// A cleaned record rendered back to raw cells. Used by callers that want
/// to re-run cleaning on an already-clean table (cleaning is idempotent
/// across this round trip) and by tests.
impl From<&Record> for RawRecord {
    fn from(record: &Record) -> Self {
        RawRecord {
            name: Some(record.name.clone()),
            role: Some(record.role.clone()),
            team: Some(record.team.clone()),
            matches: Some(record.matches.to_string()),
            runs: Some(record.runs.to_string()),
            batting_strike_rate: Some(record.batting_strike_rate.to_string()),
            wickets: Some(record.wickets.to_string()),
            economy: Some(record.economy.to_string()),
        }
    }
}

impl From<&Dataset> for RawDataset {
    fn from(dataset: &Dataset) -> Self {
        RawDataset {
            rows: dataset.records.iter().map(RawRecord::from).collect(),
        }
    }
}
