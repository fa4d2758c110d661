// Dataset cleaning and normalization.
//
// Turns the loader's untyped rows into typed records: text fields default
// to "Unknown", numeric fields are coerced with invalid input becoming 0,
// and duplicate (name, team) identities are dropped keeping the first
// occurrence. Pure; the input is never mutated.

use std::collections::HashSet;

use tracing::warn;

use crate::data::{Dataset, RawDataset, RawRecord, Record, MISSING_TEXT};

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// A missing or whitespace-only text cell becomes "Unknown"; anything else
/// is trimmed.
fn fill_text(cell: &Option<String>) -> String {
    match cell.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => MISSING_TEXT.to_string(),
    }
}

/// Coerce a numeric cell. Missing, unparseable, non-finite, or negative
/// values become 0.
fn coerce_number(cell: &Option<String>) -> f64 {
    cell.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Coerce a count cell, rounding fractional input.
fn coerce_count(cell: &Option<String>) -> u32 {
    coerce_number(cell).round() as u32
}

fn clean_record(row: &RawRecord) -> Record {
    Record {
        name: fill_text(&row.name),
        role: fill_text(&row.role),
        team: fill_text(&row.team),
        matches: coerce_count(&row.matches),
        runs: coerce_count(&row.runs),
        batting_strike_rate: coerce_number(&row.batting_strike_rate),
        wickets: coerce_count(&row.wickets),
        economy: coerce_number(&row.economy),
    }
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Clean a raw dataset into a typed one.
///
/// After this returns, no field is missing, every numeric field is a valid
/// non-negative number, and no two records share a `(name, team)` identity
/// (first occurrence wins, original order preserved).
pub fn clean_dataset(raw: &RawDataset) -> Dataset {
    let mut records = Vec::with_capacity(raw.rows.len());
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for row in &raw.rows {
        let record = clean_record(row);
        if !seen.insert((record.name.clone(), record.team.clone())) {
            warn!(
                "dropping duplicate record for '{}' ({})",
                record.name, record.team
            );
            continue;
        }
        records.push(record);
    }

    Dataset { records }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(name: &str, team: &str, runs: &str) -> RawRecord {
        RawRecord {
            name: Some(name.into()),
            role: Some("Batter".into()),
            team: Some(team.into()),
            matches: Some("10".into()),
            runs: Some(runs.into()),
            batting_strike_rate: Some("130.5".into()),
            wickets: Some("0".into()),
            economy: Some("0".into()),
        }
    }

    // -- Missing value fills --

    #[test]
    fn missing_text_fields_filled_with_unknown() {
        let raw = RawDataset {
            rows: vec![RawRecord::default()],
        };
        let dataset = clean_dataset(&raw);
        assert_eq!(dataset.records[0].name, "Unknown");
        assert_eq!(dataset.records[0].role, "Unknown");
        assert_eq!(dataset.records[0].team, "Unknown");
    }

    #[test]
    fn missing_numeric_fields_filled_with_zero() {
        let raw = RawDataset {
            rows: vec![RawRecord::default()],
        };
        let dataset = clean_dataset(&raw);
        let record = &dataset.records[0];
        assert_eq!(record.matches, 0);
        assert_eq!(record.runs, 0);
        assert_eq!(record.wickets, 0);
        assert_eq!(record.batting_strike_rate, 0.0);
        assert_eq!(record.economy, 0.0);
    }

    #[test]
    fn whitespace_only_text_treated_as_missing() {
        let raw = RawDataset {
            rows: vec![RawRecord {
                name: Some("   ".into()),
                ..RawRecord::default()
            }],
        };
        let dataset = clean_dataset(&raw);
        assert_eq!(dataset.records[0].name, "Unknown");
    }

    #[test]
    fn text_fields_trimmed() {
        let raw = RawDataset {
            rows: vec![RawRecord {
                name: Some("  Virat Kohli ".into()),
                team: Some(" RCB ".into()),
                ..RawRecord::default()
            }],
        };
        let dataset = clean_dataset(&raw);
        assert_eq!(dataset.records[0].name, "Virat Kohli");
        assert_eq!(dataset.records[0].team, "RCB");
    }

    // -- Numeric coercion --

    #[test]
    fn unparseable_numerics_become_zero() {
        let mut row = raw_row("A", "T1", "not_a_number");
        row.economy = Some("n/a".into());
        let dataset = clean_dataset(&RawDataset { rows: vec![row] });
        assert_eq!(dataset.records[0].runs, 0);
        assert_eq!(dataset.records[0].economy, 0.0);
    }

    #[test]
    fn negative_numerics_become_zero() {
        let mut row = raw_row("A", "T1", "-50");
        row.economy = Some("-3.5".into());
        let dataset = clean_dataset(&RawDataset { rows: vec![row] });
        assert_eq!(dataset.records[0].runs, 0);
        assert_eq!(dataset.records[0].economy, 0.0);
    }

    #[test]
    fn non_finite_numerics_become_zero() {
        let mut row = raw_row("A", "T1", "inf");
        row.batting_strike_rate = Some("NaN".into());
        let dataset = clean_dataset(&RawDataset { rows: vec![row] });
        assert_eq!(dataset.records[0].runs, 0);
        assert_eq!(dataset.records[0].batting_strike_rate, 0.0);
    }

    #[test]
    fn fractional_counts_rounded() {
        let row = raw_row("A", "T1", "740.6");
        let dataset = clean_dataset(&RawDataset { rows: vec![row] });
        assert_eq!(dataset.records[0].runs, 741);
    }

    #[test]
    fn valid_numerics_kept() {
        let mut row = raw_row("A", "T1", "741");
        row.batting_strike_rate = Some("154.7".into());
        row.economy = Some("6.5".into());
        let dataset = clean_dataset(&RawDataset { rows: vec![row] });
        let record = &dataset.records[0];
        assert_eq!(record.runs, 741);
        assert!((record.batting_strike_rate - 154.7).abs() < f64::EPSILON);
        assert!((record.economy - 6.5).abs() < f64::EPSILON);
    }

    // -- Deduplication --

    #[test]
    fn duplicate_identity_keeps_first_occurrence() {
        let raw = RawDataset {
            rows: vec![
                raw_row("A", "T1", "50"),
                raw_row("B", "T1", "80"),
                raw_row("A", "T1", "999"),
            ],
        };
        let dataset = clean_dataset(&raw);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].name, "A");
        assert_eq!(dataset.records[0].runs, 50);
        assert_eq!(dataset.records[1].name, "B");
    }

    #[test]
    fn same_name_different_team_kept() {
        let raw = RawDataset {
            rows: vec![raw_row("A", "T1", "50"), raw_row("A", "T2", "80")],
        };
        let dataset = clean_dataset(&raw);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn dedup_applies_after_fills() {
        // Two rows with missing name and team collapse to one "Unknown" row.
        let raw = RawDataset {
            rows: vec![RawRecord::default(), RawRecord::default()],
        };
        let dataset = clean_dataset(&raw);
        assert_eq!(dataset.len(), 1);
    }

    // -- Purity and idempotence --

    #[test]
    fn input_not_mutated() {
        let raw = RawDataset {
            rows: vec![raw_row("A", "T1", "50")],
        };
        let before = raw.clone();
        let _ = clean_dataset(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let raw = RawDataset {
            rows: vec![
                raw_row("A", "T1", "50"),
                RawRecord::default(),
                raw_row("A", "T1", "60"),
            ],
        };
        let once = clean_dataset(&raw);
        let twice = clean_dataset(&RawDataset::from(&once));
        assert_eq!(once, twice);
    }
}
