// End-to-end pipeline orchestration.
//
// Runs the six operations in their required order: load, clean, analyze,
// write the report workbook, render the charts, embed the charts into the
// workbook. The embed step mutates the file the writer produced, so both
// upstream branches complete before it runs.
//
// One invocation owns its dataset and views exclusively; nothing is
// retained across runs. Concurrent runs against the same output paths are
// the caller's responsibility to serialize.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::analysis::{self, Analysis, DatasetOverview};
use crate::charts::{self, ChartSet, RenderError};
use crate::data::clean::clean_dataset;
use crate::data::load::{load_dataset, LoadError};
use crate::report::embed::embed_charts;
use crate::report::writer::write_report;
use crate::report::WriteError;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// Everything a collaborator needs to present a completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub analysis: Analysis,
    pub overview: DatasetOverview,
    pub charts: ChartSet,
    pub report_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Run the full pipeline: `source` → cleaned dataset → report workbook at
/// `report_path` with charts rendered under `charts_dir` and embedded into
/// the workbook's Charts sheet.
pub fn run(source: &Path, report_path: &Path, charts_dir: &Path) -> Result<PipelineReport, PipelineError> {
    // 1. Load
    let raw = load_dataset(source)?;
    info!("loaded {} rows from {}", raw.len(), source.display());

    // 2. Clean
    let dataset = clean_dataset(&raw);
    info!("cleaned dataset: {} records", dataset.len());

    // 3. Analyze
    let analysis = analysis::analyze(&dataset);
    let overview = analysis::overview(&dataset);

    // 4. Write the report sheets
    write_report(report_path, &analysis)?;

    // 5. Render charts
    let charts = charts::render_charts(&dataset, charts_dir)?;

    // 6. Embed charts into the workbook
    embed_charts(report_path, &charts)?;

    info!("pipeline complete: {}", report_path.display());
    Ok(PipelineReport {
        analysis,
        overview,
        charts,
        report_path: report_path.to_path_buf(),
    })
}
