// Report workbook writer.
//
// Creates a fresh spreadsheet (overwriting any existing file at the path)
// with one sheet per analysis artifact: Top_Run_Scorers, Top_Wicket_Takers,
// Summary. Row order matches the analyzer's ordering; nothing is re-sorted
// here. The Charts sheet is added later by the embedder.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::analysis::{Analysis, SummaryStats, TopView};
use crate::report::WriteError;

/// Sheet names, in workbook order.
pub const TOP_RUNS_SHEET: &str = "Top_Run_Scorers";
pub const TOP_WICKETS_SHEET: &str = "Top_Wicket_Takers";
pub const SUMMARY_SHEET: &str = "Summary";

/// Metric labels in the Summary sheet, matching the analyzer fields.
pub const AVG_BATTING_SR_LABEL: &str = "Avg_Batting_SR";
pub const AVG_BOWLING_ECON_LABEL: &str = "Avg_Bowling_Econ";

// ---------------------------------------------------------------------------
// Sheet builders
// ---------------------------------------------------------------------------

fn write_top_sheet(
    workbook: &mut Workbook,
    name: &str,
    view: &TopView,
    header: &Format,
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    sheet.write_string_with_format(0, 0, "Player", header)?;
    sheet.write_string_with_format(0, 1, "Team", header)?;
    sheet.write_string_with_format(0, 2, view.metric.label(), header)?;

    for (i, entry) in view.entries.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &entry.name)?;
        sheet.write_string(row, 1, &entry.team)?;
        sheet.write_number(row, 2, entry.value)?;
    }

    sheet.set_column_width(0, 24)?;
    sheet.set_column_width(1, 18)?;
    Ok(())
}

fn write_summary_sheet(
    workbook: &mut Workbook,
    summary: &SummaryStats,
    header: &Format,
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;

    sheet.write_string_with_format(0, 0, "Metric", header)?;
    sheet.write_string_with_format(0, 1, "Value", header)?;

    // An undefined average leaves its value cell blank.
    sheet.write_string(1, 0, AVG_BATTING_SR_LABEL)?;
    if let Some(value) = summary.avg_batting_strike_rate {
        sheet.write_number(1, 1, value)?;
    }
    sheet.write_string(2, 0, AVG_BOWLING_ECON_LABEL)?;
    if let Some(value) = summary.avg_bowling_economy {
        sheet.write_number(2, 1, value)?;
    }

    sheet.set_column_width(0, 20)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Public writer
// ---------------------------------------------------------------------------

/// Write the analysis to a new workbook at `path`, replacing any existing
/// file. Sheet order: Top_Run_Scorers, Top_Wicket_Takers, Summary.
pub fn write_report(path: &Path, analysis: &Analysis) -> Result<(), WriteError> {
    let build = |workbook: &mut Workbook| -> Result<(), XlsxError> {
        let header = Format::new().set_bold();
        write_top_sheet(workbook, TOP_RUNS_SHEET, &analysis.top_runs, &header)?;
        write_top_sheet(workbook, TOP_WICKETS_SHEET, &analysis.top_wickets, &header)?;
        write_summary_sheet(workbook, &analysis.summary, &header)?;
        Ok(())
    };

    let mut workbook = Workbook::new();
    build(&mut workbook).map_err(|e| WriteError::Workbook {
        path: path.to_path_buf(),
        source: e,
    })?;
    workbook.save(path).map_err(|e| WriteError::Workbook {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("wrote report workbook {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
