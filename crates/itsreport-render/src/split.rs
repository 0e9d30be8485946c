//! Split-sheet layouts
//!
//! Records are partitioned by category: those matching the primary category
//! form the first group, everything else the second. Input order is kept
//! within each group.
//!
//! - **Vertical**: two column blocks side by side. The left block starts at
//!   column A, a narrow spacer column follows the last left column, and the
//!   right block starts one column after the spacer. Each block has its own
//!   row cursor.
//! - **Horizontal**: one table; a labelled separator row precedes each group.

use itsreport_core::{ExportConfig, ExportRecord, ReportError, SplitMode, StyleDescriptor};
use tracing::debug;

use crate::layout::{column_at, render_plain, write_header, RowStyler};
use crate::registry::{StyleHandle, StyleRegistry};
use crate::sheet::Sheet;

/// Width of the spacer column between vertical blocks
pub const SPACER_WIDTH: f64 = 2.0;

/// Height of every row below the header in horizontal layout
pub const HORIZONTAL_ROW_HEIGHT: f64 = 30.0;

/// Render an export config into `sheet`, returning the next free row
pub fn render_export<R: ExportRecord>(
    config: &ExportConfig<R>,
    sheet: &mut Sheet,
    registry: &mut StyleRegistry,
) -> Result<u32, ReportError> {
    config.validate()?;
    let next = match config.split {
        SplitMode::None => render_plain(config, sheet, registry)?,
        SplitMode::Vertical => render_vertical(config, sheet, registry)?,
        SplitMode::Horizontal => render_horizontal(config, sheet, registry)?,
    };
    debug!(
        sheet = sheet.name(),
        split = ?config.split,
        records = config.records.len(),
        "rendered report"
    );
    Ok(next)
}

fn partition<'a, R: ExportRecord>(config: &'a ExportConfig<R>) -> (Vec<&'a R>, Vec<&'a R>) {
    config
        .records
        .iter()
        .partition(|r| config.categories.is_primary(r.category()))
}

// ============================================================================
// Vertical
// ============================================================================

/// Side-by-side blocks; returns the larger of the two row cursors
pub fn render_vertical<R: ExportRecord>(
    config: &ExportConfig<R>,
    sheet: &mut Sheet,
    registry: &mut StyleRegistry,
) -> Result<u32, ReportError> {
    let width = config.columns.len();
    let left = 0u16;
    let spacer = column_at(left, width)?;
    let right = column_at(left, width + 1)?;

    let header = registry.register(&StyleDescriptor::header())?;
    let region = registry.register(&StyleDescriptor::data_region())?;
    let divider = registry.register(&StyleDescriptor::divider())?;
    let styler = RowStyler::from_config(config, registry)?;

    write_header(sheet, 0, left, &config.columns, header)?;
    write_header(sheet, 0, right, &config.columns, header)?;
    sheet.set_column_width(spacer, SPACER_WIDTH)?;

    let (primary, secondary) = partition(config);
    let left_end = write_block(sheet, &styler, left, width, &primary, region)?;
    let right_end = write_block(sheet, &styler, right, width, &secondary, region)?;

    let last = left_end.max(right_end);
    sheet.set_style_range(0, spacer, last - 1, spacer, divider)?;
    Ok(last)
}

/// Write one block from row 1, bordering only its own rows
fn write_block<R: ExportRecord>(
    sheet: &mut Sheet,
    styler: &RowStyler<R>,
    origin: u16,
    width: usize,
    records: &[&R],
    region: StyleHandle,
) -> Result<u32, ReportError> {
    let first = 1u32;
    let end = first + records.len() as u32;
    if end > first {
        let last_col = column_at(origin, width.saturating_sub(1))?;
        sheet.set_style_range(first, origin, end - 1, last_col, region)?;
    }
    for (offset, record) in records.iter().enumerate() {
        styler.write_row(sheet, first + offset as u32, origin, record)?;
    }
    Ok(end)
}

// ============================================================================
// Horizontal
// ============================================================================

/// Stacked groups under one header
///
/// Both separators are always written, so a report whose records all share
/// one category still shows the (empty) second group's label.
pub fn render_horizontal<R: ExportRecord>(
    config: &ExportConfig<R>,
    sheet: &mut Sheet,
    registry: &mut StyleRegistry,
) -> Result<u32, ReportError> {
    let header = registry.register(&StyleDescriptor::header())?;
    let separator = match &config.styles.separator {
        Some(style) => registry.register(style)?,
        None => registry.register(&StyleDescriptor::separator())?,
    };
    let styler = RowStyler::from_config(config, registry)?;

    write_header(sheet, 0, 0, &config.columns, header)?;

    let (primary, secondary) = partition(config);
    let width = config.columns.len();
    let mut row = 1u32;
    for (label, group) in [
        (config.categories.primary_label(), primary),
        (config.categories.secondary_label(), secondary),
    ] {
        write_separator(sheet, row, width, label, separator)?;
        row += 1;
        for record in group {
            styler.write_row(sheet, row, 0, record)?;
            row += 1;
        }
    }

    for r in 1..row {
        sheet.set_row_height(r, HORIZONTAL_ROW_HEIGHT)?;
    }
    Ok(row)
}

/// Separator row spanning all columns, label in the middle column
fn write_separator(
    sheet: &mut Sheet,
    row: u32,
    width: usize,
    label: &str,
    style: StyleHandle,
) -> Result<(), ReportError> {
    let last_col = column_at(0, width.saturating_sub(1))?;
    sheet.set_style_range(row, 0, row, last_col, style)?;
    sheet.write(row, column_at(0, width / 2)?, label.into())
}
