//! In-memory worksheet model
//!
//! Layout engines write into a [`Sheet`] instead of straight into the xlsx
//! writer so that cell styles can be read back while rendering (the calendar
//! grid only styles detail cells nobody painted). The model is serialized
//! once, at the end of an export, by [`crate::xlsx`].

use std::collections::BTreeMap;

use itsreport_core::{CellValue, ReportError};

use crate::registry::StyleHandle;

/// Rows per worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Columns per worksheet
pub const MAX_COLS: u16 = 16_384;

const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// One cell: value plus style handle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: StyleHandle,
}

/// Rectangular merged region, inclusive on both ends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl MergeRange {
    pub fn contains(&self, row: u32, col: u16) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }

    fn overlaps(&self, other: &MergeRange) -> bool {
        self.first_row <= other.last_row
            && other.first_row <= self.last_row
            && self.first_col <= other.last_col
            && other.first_col <= self.last_col
    }
}

/// A worksheet under construction
#[derive(Clone, Debug)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u16), Cell>,
    column_widths: BTreeMap<u16, f64>,
    row_heights: BTreeMap<u32, f64>,
    merges: Vec<MergeRange>,
    gridlines_hidden: bool,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Result<Self, ReportError> {
        let name = name.into();
        validate_sheet_name(&name)?;
        Ok(Self::blank(name))
    }

    /// Sheet with an already validated name
    pub(crate) fn blank(name: String) -> Self {
        Self {
            name,
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            merges: Vec::new(),
            gridlines_hidden: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ------------------------------------------------------------------------
    // Cells
    // ------------------------------------------------------------------------

    /// Write a value, keeping any style already on the cell
    pub fn write(&mut self, row: u32, col: u16, value: CellValue) -> Result<(), ReportError> {
        check_address(row, col)?;
        self.cells.entry((row, col)).or_default().value = value;
        Ok(())
    }

    /// Write a value together with its style
    pub fn write_styled(
        &mut self,
        row: u32,
        col: u16,
        value: CellValue,
        style: StyleHandle,
    ) -> Result<(), ReportError> {
        check_address(row, col)?;
        self.cells.insert((row, col), Cell { value, style });
        Ok(())
    }

    /// Style a cell, keeping its value
    pub fn set_style(&mut self, row: u32, col: u16, style: StyleHandle) -> Result<(), ReportError> {
        check_address(row, col)?;
        self.cells.entry((row, col)).or_default().style = style;
        Ok(())
    }

    /// Style every cell of an inclusive rectangle
    pub fn set_style_range(
        &mut self,
        first_row: u32,
        first_col: u16,
        last_row: u32,
        last_col: u16,
        style: StyleHandle,
    ) -> Result<(), ReportError> {
        check_address(last_row, last_col)?;
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                self.set_style(row, col, style)?;
            }
        }
        Ok(())
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn value(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cell(row, col).map(|c| &c.value)
    }

    /// Style handle of a cell; [`StyleHandle::NONE`] for untouched cells
    pub fn style(&self, row: u32, col: u16) -> StyleHandle {
        self.cell(row, col).map_or(StyleHandle::NONE, |c| c.style)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &Cell)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }

    /// Highest row index holding a cell
    pub fn last_row(&self) -> Option<u32> {
        self.cells.keys().map(|(r, _)| *r).max()
    }

    /// Rows in `col` holding a non-empty value
    pub fn filled_rows(&self, col: u16) -> Vec<u32> {
        self.cells
            .iter()
            .filter(|((_, c), cell)| *c == col && !cell.value.is_empty())
            .map(|((r, _), _)| *r)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Dimensions
    // ------------------------------------------------------------------------

    pub fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), ReportError> {
        check_address(0, col)?;
        self.column_widths.insert(col, width);
        Ok(())
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.column_widths.iter().map(|(c, w)| (*c, *w))
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<(), ReportError> {
        check_address(row, 0)?;
        self.row_heights.insert(row, height);
        Ok(())
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.row_heights.iter().map(|(r, h)| (*r, *h))
    }

    // ------------------------------------------------------------------------
    // Merges & view
    // ------------------------------------------------------------------------

    /// Merge an inclusive rectangle; overlapping merges are rejected
    pub fn merge(
        &mut self,
        first_row: u32,
        first_col: u16,
        last_row: u32,
        last_col: u16,
    ) -> Result<(), ReportError> {
        check_address(last_row, last_col)?;
        if first_row > last_row || first_col > last_col {
            return Err(ReportError::InvalidData(format!(
                "empty merge range {}:{}",
                cell_ref(first_row, first_col),
                cell_ref(last_row, last_col)
            )));
        }
        let range = MergeRange {
            first_row,
            first_col,
            last_row,
            last_col,
        };
        if self.merges.iter().any(|m| m.overlaps(&range)) {
            return Err(ReportError::InvalidData(format!(
                "merge {}:{} overlaps an existing merge",
                cell_ref(first_row, first_col),
                cell_ref(last_row, last_col)
            )));
        }
        self.merges.push(range);
        Ok(())
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    pub fn hide_gridlines(&mut self) {
        self.gridlines_hidden = true;
    }

    pub fn gridlines_hidden(&self) -> bool {
        self.gridlines_hidden
    }
}

// ============================================================================
// Addressing
// ============================================================================

fn check_address(row: u32, col: u16) -> Result<(), ReportError> {
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(ReportError::CellAddress {
            row,
            col: u32::from(col),
        });
    }
    Ok(())
}

/// Convert a 0-based column index to its Excel letter (0 = A, 26 = AA)
pub fn col_to_letter(col: u16) -> String {
    let mut result = String::new();
    let mut n = u32::from(col);
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// A1-style reference for a 0-based cell
pub fn cell_ref(row: u32, col: u16) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

/// Check a worksheet name against Excel's rules
pub fn validate_sheet_name(name: &str) -> Result<(), ReportError> {
    let invalid = name.is_empty()
        || name.chars().count() > MAX_SHEET_NAME_LEN
        || name.contains(FORBIDDEN_NAME_CHARS)
        || name.starts_with('\'')
        || name.ends_with('\'');
    if invalid {
        return Err(ReportError::InvalidSheetName(name.to_string()));
    }
    Ok(())
}
