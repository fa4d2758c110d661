// Chart embedding.
//
// Re-opens the workbook the writer produced and places the rendered chart
// images on a Charts sheet, stacked vertically with a fixed row stride so
// they never overlap. Runs strictly after the writer; it mutates the same
// file in place.

use std::path::Path;

use tracing::info;
use umya_spreadsheet::structs::drawing::spreadsheet::MarkerType;
use umya_spreadsheet::structs::Image;

use crate::charts::ChartSet;
use crate::report::WriteError;

/// Name of the sheet that receives the chart images.
pub const CHARTS_SHEET: &str = "Charts";

/// Vertical distance between successive image anchors, in row units.
pub const CHART_ROW_STRIDE: u32 = 25;

/// Anchor cell for the image at position `index` in the chart set.
fn anchor_cell(index: usize) -> String {
    format!("A{}", 1 + index as u32 * CHART_ROW_STRIDE)
}

/// Embed every chart image into the workbook at `path`.
///
/// The Charts sheet is created if absent and appended to otherwise; an
/// existing sheet is never replaced. Images are anchored in the chart
/// set's iteration order. All image files are checked before the workbook
/// is touched, so a missing image fails the call without a partial save.
pub fn embed_charts(path: &Path, charts: &ChartSet) -> Result<(), WriteError> {
    for artifact in charts.iter() {
        if !artifact.path.exists() {
            return Err(WriteError::MissingImage {
                path: artifact.path.clone(),
            });
        }
    }

    let mut book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| WriteError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if book.get_sheet_by_name(CHARTS_SHEET).is_none() {
        book.new_sheet(CHARTS_SHEET).map_err(|e| WriteError::Sheet {
            name: CHARTS_SHEET.into(),
            message: e.to_string(),
        })?;
    }
    let sheet = book
        .get_sheet_by_name_mut(CHARTS_SHEET)
        .ok_or_else(|| WriteError::Sheet {
            name: CHARTS_SHEET.into(),
            message: "sheet vanished after creation".into(),
        })?;

    for (i, artifact) in charts.iter().enumerate() {
        let mut marker = MarkerType::default();
        marker.set_coordinate(anchor_cell(i).as_str());
        let mut image = Image::default();
        image.new_image(&artifact.path.to_string_lossy(), marker);
        sheet.add_image(image);
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| WriteError::Save {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    info!(
        "embedded {} charts into {}",
        charts.len(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
