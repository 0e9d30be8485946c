//! `.xlsx` serialization through rust_xlsxwriter
//!
//! Converts the in-memory [`Workbook`] into an Office Open XML package:
//! every registered style becomes one `Format`, merged regions are written
//! with their anchor cell's value, and sheet settings (column widths, row
//! heights, hidden gridlines) are applied per worksheet.

use std::collections::HashMap;

use itsreport_core::{BorderEdge, BorderLine, CellValue, HAlign, ReportError, StyleDescriptor, VAlign};
use rust_xlsxwriter::{
    Format, FormatAlign, FormatBorder, FormatPattern, Workbook as XlsxWorkbook, Worksheet, XlsxError,
};
use tracing::debug;

use crate::registry::StyleHandle;
use crate::sheet::{MergeRange, Sheet};
use crate::workbook::Workbook;

fn xlsx_err(e: XlsxError) -> ReportError {
    ReportError::Xlsx(e.to_string())
}

/// Serialize a workbook to `.xlsx` bytes
pub fn to_bytes(workbook: &Workbook) -> Result<Vec<u8>, ReportError> {
    if workbook.sheets().is_empty() {
        return Err(ReportError::InvalidData("workbook has no sheets".into()));
    }

    let formats: HashMap<StyleHandle, Format> = workbook
        .styles()
        .iter()
        .map(|(handle, descriptor)| (handle, to_format(descriptor)))
        .collect();

    let mut xlsx = XlsxWorkbook::new();
    for sheet in workbook.sheets() {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(sheet.name()).map_err(xlsx_err)?;
        write_sheet(worksheet, sheet, &formats)?;
    }

    let bytes = xlsx.save_to_buffer().map_err(xlsx_err)?;
    debug!(
        sheets = workbook.sheets().len(),
        styles = formats.len(),
        bytes = bytes.len(),
        "serialized workbook"
    );
    Ok(bytes)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &Sheet,
    formats: &HashMap<StyleHandle, Format>,
) -> Result<(), ReportError> {
    for (col, width) in sheet.column_widths() {
        worksheet.set_column_width(col, width).map_err(xlsx_err)?;
    }
    for (row, height) in sheet.row_heights() {
        worksheet.set_row_height(row, height).map_err(xlsx_err)?;
    }

    let plain = Format::new();
    for merge in sheet.merges() {
        write_merge(worksheet, sheet, merge, formats, &plain)?;
    }

    for ((row, col), cell) in sheet.cells() {
        if sheet.merges().iter().any(|m| m.contains(row, col)) {
            continue;
        }
        let format = formats.get(&cell.style);
        match (&cell.value, format) {
            (CellValue::Text(text), _) if text.is_empty() => {
                if let Some(format) = format {
                    worksheet.write_blank(row, col, format).map_err(xlsx_err)?;
                }
            }
            (CellValue::Text(text), Some(format)) => {
                worksheet
                    .write_string_with_format(row, col, text, format)
                    .map_err(xlsx_err)?;
            }
            (CellValue::Text(text), None) => {
                worksheet.write_string(row, col, text).map_err(xlsx_err)?;
            }
            (CellValue::Number(n), Some(format)) => {
                worksheet
                    .write_number_with_format(row, col, *n, format)
                    .map_err(xlsx_err)?;
            }
            (CellValue::Number(n), None) => {
                worksheet.write_number(row, col, *n).map_err(xlsx_err)?;
            }
            (CellValue::Empty, Some(format)) => {
                worksheet.write_blank(row, col, format).map_err(xlsx_err)?;
            }
            (CellValue::Empty, None) => {}
        }
    }

    if sheet.gridlines_hidden() {
        worksheet.set_screen_gridlines(false);
    }
    Ok(())
}

fn write_merge(
    worksheet: &mut Worksheet,
    sheet: &Sheet,
    merge: &MergeRange,
    formats: &HashMap<StyleHandle, Format>,
    plain: &Format,
) -> Result<(), ReportError> {
    let anchor = sheet.cell(merge.first_row, merge.first_col);
    let format = anchor
        .and_then(|c| formats.get(&c.style))
        .unwrap_or(plain);
    let text = match anchor.map(|c| &c.value) {
        Some(CellValue::Text(s)) => s.as_str(),
        _ => "",
    };
    worksheet
        .merge_range(
            merge.first_row,
            merge.first_col,
            merge.last_row,
            merge.last_col,
            text,
            format,
        )
        .map_err(xlsx_err)?;

    // merge_range only writes strings; a numeric anchor overwrites its first cell
    if let Some(CellValue::Number(n)) = anchor.map(|c| &c.value) {
        worksheet
            .write_number_with_format(merge.first_row, merge.first_col, *n, format)
            .map_err(xlsx_err)?;
    }
    Ok(())
}

// ============================================================================
// Style Conversion
// ============================================================================

/// Build the rust_xlsxwriter format for a descriptor
pub fn to_format(descriptor: &StyleDescriptor) -> Format {
    let mut format = Format::new();

    if let Some(fill) = descriptor.fill {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(fill.value());
    }

    if let Some(font) = &descriptor.font {
        if font.bold {
            format = format.set_bold();
        }
        if let Some(color) = font.color {
            format = format.set_font_color(color.value());
        }
        if let Some(size) = font.size {
            format = format.set_font_size(f64::from(size));
        }
        if let Some(family) = &font.family {
            format = format.set_font_name(family);
        }
    }

    if let Some(alignment) = &descriptor.alignment {
        if let Some(h) = alignment.horizontal {
            format = format.set_align(match h {
                HAlign::Left => FormatAlign::Left,
                HAlign::Center => FormatAlign::Center,
                HAlign::Right => FormatAlign::Right,
            });
        }
        if let Some(v) = alignment.vertical {
            format = format.set_align(match v {
                VAlign::Top => FormatAlign::Top,
                VAlign::Center => FormatAlign::VerticalCenter,
                VAlign::Bottom => FormatAlign::Bottom,
            });
        }
        if alignment.wrap {
            format = format.set_text_wrap();
        }
    }

    let borders = &descriptor.borders;
    if let Some(edge) = borders.left {
        format = format
            .set_border_left(border_line(edge))
            .set_border_left_color(edge.color.value());
    }
    if let Some(edge) = borders.right {
        format = format
            .set_border_right(border_line(edge))
            .set_border_right_color(edge.color.value());
    }
    if let Some(edge) = borders.top {
        format = format
            .set_border_top(border_line(edge))
            .set_border_top_color(edge.color.value());
    }
    if let Some(edge) = borders.bottom {
        format = format
            .set_border_bottom(border_line(edge))
            .set_border_bottom_color(edge.color.value());
    }

    if let Some(num_format) = &descriptor.num_format {
        format = format.set_num_format(num_format);
    }

    format
}

fn border_line(edge: BorderEdge) -> FormatBorder {
    match edge.line {
        BorderLine::Thin => FormatBorder::Thin,
        BorderLine::Medium => FormatBorder::Medium,
    }
}
