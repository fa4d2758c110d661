// Aggregation over a cleaned dataset: ranked top-N views, scalar summary
// statistics, and the overview counts the presentation layer displays.
//
// Everything here is deterministic and side-effect-free.

use std::collections::HashSet;

use crate::data::{Dataset, Record};

/// Maximum number of entries in a ranked view.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// The metric a ranked view is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Runs,
    Wickets,
}

impl Metric {
    /// Column header used for this metric in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Runs => "Runs",
            Metric::Wickets => "Wickets",
        }
    }

    fn value(&self, record: &Record) -> u32 {
        match self {
            Metric::Runs => record.runs,
            Metric::Wickets => record.wickets,
        }
    }
}

// ---------------------------------------------------------------------------
// Ranked views
// ---------------------------------------------------------------------------

/// One row of a ranked view: the projected fields only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopEntry {
    pub name: String,
    pub team: String,
    pub value: u32,
}

/// Up to [`TOP_N`] records projected to `(name, team, value)`, sorted
/// descending by the metric. Ties keep original dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopView {
    pub metric: Metric,
    pub entries: Vec<TopEntry>,
}

/// Rank the dataset by `metric`, descending and stable, truncated to
/// `limit` entries.
pub fn top_by_metric(dataset: &Dataset, metric: Metric, limit: usize) -> TopView {
    let mut ranked: Vec<&Record> = dataset.records.iter().collect();
    // Vec::sort_by is stable, so equal values keep dataset order.
    ranked.sort_by(|a, b| metric.value(b).cmp(&metric.value(a)));
    ranked.truncate(limit);

    TopView {
        metric,
        entries: ranked
            .into_iter()
            .map(|r| TopEntry {
                name: r.name.clone(),
                team: r.team.clone(),
                value: metric.value(r),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Named scalar aggregates over the whole dataset.
///
/// `avg_bowling_economy` averages only records with nonzero economy: zero
/// marks a non-bowler and is excluded from numerator and denominator. When
/// no record has a nonzero economy the average is `None`, never 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub avg_batting_strike_rate: Option<f64>,
    pub avg_bowling_economy: Option<f64>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Compute the summary statistics for a cleaned dataset.
pub fn summary_stats(dataset: &Dataset) -> SummaryStats {
    SummaryStats {
        avg_batting_strike_rate: mean(dataset.records.iter().map(|r| r.batting_strike_rate)),
        avg_bowling_economy: mean(
            dataset
                .records
                .iter()
                .map(|r| r.economy)
                .filter(|e| *e != 0.0),
        ),
    }
}

// ---------------------------------------------------------------------------
// Combined analysis
// ---------------------------------------------------------------------------

/// The full analyzer output consumed by the report writer.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub top_runs: TopView,
    pub top_wickets: TopView,
    pub summary: SummaryStats,
}

/// Run the analyzer: top-10 run scorers, top-10 wicket takers, and the
/// summary statistics.
pub fn analyze(dataset: &Dataset) -> Analysis {
    Analysis {
        top_runs: top_by_metric(dataset, Metric::Runs, TOP_N),
        top_wickets: top_by_metric(dataset, Metric::Wickets, TOP_N),
        summary: summary_stats(dataset),
    }
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Headline counts for display by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetOverview {
    pub players: usize,
    pub teams: usize,
}

/// Record count and distinct team count.
pub fn overview(dataset: &Dataset) -> DatasetOverview {
    let teams: HashSet<&str> = dataset.records.iter().map(|r| r.team.as_str()).collect();
    DatasetOverview {
        players: dataset.len(),
        teams: teams.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, team: &str, runs: u32, wickets: u32, economy: f64) -> Record {
        Record {
            name: name.into(),
            role: "Unknown".into(),
            team: team.into(),
            matches: 10,
            runs,
            batting_strike_rate: 125.0,
            wickets,
            economy,
        }
    }

    fn dataset(records: Vec<Record>) -> Dataset {
        Dataset { records }
    }

    // -- Ranked views --

    #[test]
    fn top_runs_sorted_descending() {
        let ds = dataset(vec![
            record("A", "T1", 50, 0, 0.0),
            record("B", "T1", 80, 2, 7.5),
            record("C", "T2", 65, 0, 0.0),
        ]);
        let view = top_by_metric(&ds, Metric::Runs, TOP_N);
        let names: Vec<&str> = view.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
        assert_eq!(view.entries[0].value, 80);
    }

    #[test]
    fn top_view_truncated_to_limit() {
        let records = (0..15)
            .map(|i| record(&format!("P{i}"), "T1", i, 0, 0.0))
            .collect();
        let view = top_by_metric(&dataset(records), Metric::Runs, TOP_N);
        assert_eq!(view.entries.len(), TOP_N);
        assert_eq!(view.entries[0].value, 14);
    }

    #[test]
    fn top_view_smaller_dataset_keeps_all() {
        let ds = dataset(vec![
            record("A", "T1", 50, 0, 0.0),
            record("B", "T1", 80, 0, 0.0),
        ]);
        let view = top_by_metric(&ds, Metric::Runs, TOP_N);
        assert_eq!(view.entries.len(), 2);
    }

    #[test]
    fn ties_keep_dataset_order() {
        let ds = dataset(vec![
            record("First", "T1", 50, 0, 0.0),
            record("Second", "T2", 50, 0, 0.0),
            record("Third", "T3", 50, 0, 0.0),
        ]);
        let view = top_by_metric(&ds, Metric::Runs, TOP_N);
        let names: Vec<&str> = view.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn top_wickets_uses_wicket_values() {
        let ds = dataset(vec![
            record("A", "T1", 500, 2, 8.0),
            record("B", "T1", 10, 21, 6.5),
        ]);
        let view = top_by_metric(&ds, Metric::Wickets, TOP_N);
        assert_eq!(view.entries[0].name, "B");
        assert_eq!(view.entries[0].value, 21);
    }

    // -- Summary statistics --

    #[test]
    fn strike_rate_mean_over_all_records() {
        let mut a = record("A", "T1", 50, 0, 0.0);
        a.batting_strike_rate = 100.0;
        let mut b = record("B", "T1", 80, 0, 0.0);
        b.batting_strike_rate = 150.0;
        let stats = summary_stats(&dataset(vec![a, b]));
        assert_eq!(stats.avg_batting_strike_rate, Some(125.0));
    }

    #[test]
    fn economy_mean_excludes_zero() {
        let ds = dataset(vec![
            record("A", "T1", 50, 0, 0.0),
            record("B", "T1", 80, 2, 7.5),
        ]);
        let stats = summary_stats(&ds);
        assert_eq!(stats.avg_bowling_economy, Some(7.5));
    }

    #[test]
    fn economy_mean_none_when_no_bowlers() {
        let ds = dataset(vec![
            record("A", "T1", 50, 0, 0.0),
            record("B", "T1", 80, 0, 0.0),
        ]);
        let stats = summary_stats(&ds);
        assert_eq!(stats.avg_bowling_economy, None);
    }

    #[test]
    fn empty_dataset_has_no_means() {
        let stats = summary_stats(&dataset(vec![]));
        assert_eq!(stats.avg_batting_strike_rate, None);
        assert_eq!(stats.avg_bowling_economy, None);
    }

    #[test]
    fn economy_mean_over_nonzero_subset() {
        let ds = dataset(vec![
            record("A", "T1", 0, 10, 6.0),
            record("B", "T1", 0, 12, 8.0),
            record("C", "T1", 500, 0, 0.0),
        ]);
        let stats = summary_stats(&ds);
        assert_eq!(stats.avg_bowling_economy, Some(7.0));
    }

    // -- Combined analysis --

    #[test]
    fn analyze_matches_component_functions() {
        let ds = dataset(vec![
            record("A", "T1", 50, 0, 0.0),
            record("B", "T1", 80, 2, 7.5),
        ]);
        let analysis = analyze(&ds);
        assert_eq!(analysis.top_runs.entries[0].name, "B");
        assert_eq!(analysis.top_runs.entries[1].name, "A");
        assert_eq!(analysis.top_wickets.entries[0].name, "B");
        assert_eq!(analysis.summary.avg_bowling_economy, Some(7.5));
    }

    // -- Overview --

    #[test]
    fn overview_counts_players_and_distinct_teams() {
        let ds = dataset(vec![
            record("A", "T1", 50, 0, 0.0),
            record("B", "T1", 80, 0, 0.0),
            record("C", "T2", 65, 0, 0.0),
        ]);
        let ov = overview(&ds);
        assert_eq!(ov.players, 3);
        assert_eq!(ov.teams, 2);
    }
}
