// Chart rendering.
//
// Produces the four report charts as PNG files: runs and wickets
// distributions (20-bin histogram with a Gaussian density overlay) and
// per-team totals for both metrics (descending bar charts). Filenames are
// fixed per chart; re-running overwrites prior images.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::analysis::Metric;
use crate::data::Dataset;

/// Bin count for the distribution charts.
pub const DISTRIBUTION_BINS: usize = 20;

const DISTRIBUTION_SIZE: (u32, u32) = (800, 500);
const TEAM_CHART_SIZE: (u32, u32) = (1000, 500);

const BAR_COLOR: RGBColor = RGBColor(59, 130, 246);
const DENSITY_COLOR: RGBColor = RGBColor(244, 63, 94);

// ---------------------------------------------------------------------------
// Chart identifiers and artifacts
// ---------------------------------------------------------------------------

/// The fixed set of report charts, in render (and embed) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Runs,
    Wickets,
    TeamRuns,
    TeamWickets,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Runs,
        ChartKind::Wickets,
        ChartKind::TeamRuns,
        ChartKind::TeamWickets,
    ];

    /// Fixed output filename inside the chart directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::Runs => "runs_dist.png",
            ChartKind::Wickets => "wickets_dist.png",
            ChartKind::TeamRuns => "team_runs.png",
            ChartKind::TeamWickets => "team_wickets.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Runs => "Runs Distribution",
            ChartKind::Wickets => "Wickets Distribution",
            ChartKind::TeamRuns => "Total Runs by Team",
            ChartKind::TeamWickets => "Total Wickets by Team",
        }
    }
}

/// A rendered chart image and its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact {
    pub kind: ChartKind,
    pub path: PathBuf,
}

/// All rendered charts, in [`ChartKind::ALL`] order. Iteration order is the
/// order images are embedded into the report workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSet {
    pub artifacts: Vec<ChartArtifact>,
}

impl ChartSet {
    pub fn iter(&self) -> std::slice::Iter<'_, ChartArtifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn path_for(&self, kind: ChartKind) -> Option<&Path> {
        self.artifacts
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.path.as_path())
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot render charts from an empty dataset")]
    EmptyDataset,

    #[error("failed to create chart directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to render chart {path}: {message}")]
    Chart { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Histogram and density helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct HistogramBin {
    start: f64,
    end: f64,
    count: usize,
}

/// Bucket `values` into `bins` equal-width bins spanning their range. A
/// degenerate range (all values equal) spans one unit so every value lands
/// in the first bin.
fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let width = span / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Gaussian kernel density estimate sampled at `samples` evenly spaced
/// points across `[x_min, x_max]`, using Silverman's rule of thumb for the
/// bandwidth. Returns an empty curve when the values have no spread (the
/// bandwidth would collapse to zero).
fn kde_curve(values: &[f64], x_min: f64, x_max: f64, samples: usize) -> Vec<(f64, f64)> {
    let n = values.len() as f64;
    if n < 2.0 {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev <= 0.0 {
        return Vec::new();
    }
    let bandwidth = 1.06 * std_dev * n.powf(-0.2);

    let step = (x_max - x_min) / (samples.max(2) - 1) as f64;
    (0..samples)
        .map(|i| {
            let x = x_min + i as f64 * step;
            let density = values
                .iter()
                .map(|&v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
            (x, density)
        })
        .collect()
}

/// Sum `metric` per team, sorted descending by total. Ties keep the
/// alphabetical team order so the output is deterministic.
fn team_totals(dataset: &Dataset, metric: Metric) -> Vec<(String, u64)> {
    let mut totals: std::collections::BTreeMap<&str, u64> = std::collections::BTreeMap::new();
    for record in &dataset.records {
        let value = match metric {
            Metric::Runs => record.runs,
            Metric::Wickets => record.wickets,
        };
        *totals.entry(record.team.as_str()).or_insert(0) += u64::from(value);
    }

    let mut ranked: Vec<(String, u64)> = totals
        .into_iter()
        .map(|(team, total)| (team.to_string(), total))
        .collect();
    // Stable sort over the alphabetical BTreeMap order keeps ties deterministic.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn chart_error(path: &Path, message: impl ToString) -> RenderError {
    RenderError::Chart {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

fn render_distribution(values: &[f64], title: &str, path: &Path) -> Result<(), RenderError> {
    let bins = histogram_bins(values, DISTRIBUTION_BINS);
    let x_min = bins.first().map(|b| b.start).unwrap_or(0.0);
    let x_max = bins.last().map(|b| b.end).unwrap_or(1.0);
    let bin_width = (x_max - x_min) / DISTRIBUTION_BINS as f64;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;

    // Scale the density curve from probability space to count space so it
    // overlays the histogram (count = density * n * bin_width).
    let n = values.len() as f64;
    let curve: Vec<(f64, f64)> = kde_curve(values, x_min, x_max, 200)
        .into_iter()
        .map(|(x, d)| (x, d * n * bin_width))
        .collect();

    let curve_max = curve.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    let y_max = (max_count.max(curve_max) * 1.1).max(1.0);

    let root = BitMapBackend::new(path, DISTRIBUTION_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| chart_error(path, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| chart_error(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Count")
        .draw()
        .map_err(|e| chart_error(path, e))?;

    chart
        .draw_series(bins.iter().map(|b| {
            Rectangle::new(
                [(b.start, 0.0), (b.end, b.count as f64)],
                BAR_COLOR.mix(0.6).filled(),
            )
        }))
        .map_err(|e| chart_error(path, e))?;

    if !curve.is_empty() {
        chart
            .draw_series(LineSeries::new(curve, DENSITY_COLOR.stroke_width(2)))
            .map_err(|e| chart_error(path, e))?;
    }

    root.present().map_err(|e| chart_error(path, e))?;
    Ok(())
}

fn render_team_chart(
    totals: &[(String, u64)],
    metric: Metric,
    title: &str,
    path: &Path,
) -> Result<(), RenderError> {
    let n = totals.len();
    let max_total = totals.iter().map(|t| t.1).max().unwrap_or(0) as f64;
    let y_max = (max_total * 1.1).max(1.0);

    let root = BitMapBackend::new(path, TEAM_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| chart_error(path, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(110)
        .y_label_area_size(60)
        .build_cartesian_2d(0..n as i32, 0.0..y_max)
        .map_err(|e| chart_error(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| {
            totals
                .get(*x as usize)
                .map(|(team, _)| team.clone())
                .unwrap_or_default()
        })
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_desc(format!("Total {}", metric.label()))
        .draw()
        .map_err(|e| chart_error(path, e))?;

    chart
        .draw_series(totals.iter().enumerate().map(|(i, (_, total))| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, *total as f64)],
                BAR_COLOR.filled(),
            )
        }))
        .map_err(|e| chart_error(path, e))?;

    root.present().map_err(|e| chart_error(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Public renderer
// ---------------------------------------------------------------------------

/// Render all four charts into `dir` (created if absent) and return the
/// identifier → path mapping in render order.
///
/// The dataset is validated before any file is touched, so an
/// [`RenderError::EmptyDataset`] failure leaves no partial output.
pub fn render_charts(dataset: &Dataset, dir: &Path) -> Result<ChartSet, RenderError> {
    if dataset.is_empty() {
        return Err(RenderError::EmptyDataset);
    }

    std::fs::create_dir_all(dir).map_err(|e| RenderError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let runs: Vec<f64> = dataset.records.iter().map(|r| f64::from(r.runs)).collect();
    let wickets: Vec<f64> = dataset
        .records
        .iter()
        .map(|r| f64::from(r.wickets))
        .collect();

    let mut artifacts = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let path = dir.join(kind.file_name());
        match kind {
            ChartKind::Runs => render_distribution(&runs, kind.title(), &path)?,
            ChartKind::Wickets => render_distribution(&wickets, kind.title(), &path)?,
            ChartKind::TeamRuns => render_team_chart(
                &team_totals(dataset, Metric::Runs),
                Metric::Runs,
                kind.title(),
                &path,
            )?,
            ChartKind::TeamWickets => render_team_chart(
                &team_totals(dataset, Metric::Wickets),
                Metric::Wickets,
                kind.title(),
                &path,
            )?,
        }
        info!("rendered chart {}", path.display());
        artifacts.push(ChartArtifact { kind, path });
    }

    Ok(ChartSet { artifacts })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
