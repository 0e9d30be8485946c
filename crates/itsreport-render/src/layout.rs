//! Column layout: header row plus one row per record
//!
//! [`RowStyler`] decides the style of every data cell (default cell style,
//! status lookup, amount override) and is shared by the plain layout and
//! both split layouts.

use itsreport_core::{
    ColumnDef, ExportConfig, ExportRecord, ReportError, StatusExtractor, StatusScope,
    StyleDescriptor,
};

use crate::registry::{StyleHandle, StyleRegistry};
use crate::sheet::Sheet;
use crate::status::{register_status_styles, status_style, StatusStyles};

/// Resolved per-cell styling of one report
pub struct RowStyler<R> {
    columns: usize,
    default: StyleHandle,
    amount: Option<StyleHandle>,
    amount_column: usize,
    status_styles: StatusStyles,
    status_column: usize,
    scope: StatusScope,
    extractor: Option<StatusExtractor<R>>,
}

impl<R: ExportRecord> RowStyler<R> {
    /// Register the config's styles and capture its styling rules
    pub fn from_config(
        config: &ExportConfig<R>,
        registry: &mut StyleRegistry,
    ) -> Result<Self, ReportError> {
        let styles = &config.styles;
        Ok(Self {
            columns: config.columns.len(),
            default: registry.register_opt(styles.default_cell.as_ref())?,
            amount: styles
                .amount
                .as_ref()
                .map(|d| registry.register(d))
                .transpose()?,
            amount_column: config.amount_column,
            status_styles: register_status_styles(registry, &styles.status)?,
            status_column: config.status_column,
            scope: config.status_scope,
            extractor: config.status,
        })
    }

    /// Style of cell `col` for a record with the given status
    pub fn style_at(&self, status: Option<&str>, col: usize) -> StyleHandle {
        let status_applies = self.extractor.is_some()
            && (self.scope == StatusScope::Row || col == self.status_column);
        if status_applies {
            if let Some(style) = status_style(status, &self.status_styles) {
                return style;
            }
        }
        match self.amount {
            Some(amount) if col == self.amount_column => amount,
            _ => self.default,
        }
    }

    /// Write one record at `(row, origin_col)`
    ///
    /// Values past the column count are dropped; missing values write
    /// nothing. A cell whose resolved style is NONE keeps any style already
    /// on it.
    pub fn write_row(
        &self,
        sheet: &mut Sheet,
        row: u32,
        origin_col: u16,
        record: &R,
    ) -> Result<(), ReportError> {
        let status = self.extractor.and_then(|extract| extract(record));
        for (index, value) in record.values().into_iter().take(self.columns).enumerate() {
            let col = column_at(origin_col, index)?;
            let style = self.style_at(status.as_deref(), index);
            if style.is_none() {
                sheet.write(row, col, value)?;
            } else {
                sheet.write_styled(row, col, value, style)?;
            }
        }
        Ok(())
    }
}

/// Column index `origin + offset`, checked against the u16 column space
pub(crate) fn column_at(origin: u16, offset: usize) -> Result<u16, ReportError> {
    u16::try_from(offset)
        .ok()
        .and_then(|o| origin.checked_add(o))
        .ok_or(ReportError::CellAddress {
            row: 0,
            col: u32::from(origin).saturating_add(offset as u32),
        })
}

/// Write header labels at `(row, origin_col)` and set each column's width
pub fn write_header(
    sheet: &mut Sheet,
    row: u32,
    origin_col: u16,
    columns: &[ColumnDef],
    style: StyleHandle,
) -> Result<(), ReportError> {
    for (index, column) in columns.iter().enumerate() {
        let col = column_at(origin_col, index)?;
        sheet.write_styled(row, col, column.header.as_str().into(), style)?;
        sheet.set_column_width(col, column.width)?;
    }
    Ok(())
}

/// Write a header row and one row per record, returning the next free row
pub fn render_columns<R: ExportRecord>(
    sheet: &mut Sheet,
    origin: (u32, u16),
    columns: &[ColumnDef],
    records: &[R],
    styler: &RowStyler<R>,
    header: StyleHandle,
) -> Result<u32, ReportError> {
    let (mut row, col) = origin;
    write_header(sheet, row, col, columns, header)?;
    row += 1;
    for record in records {
        styler.write_row(sheet, row, col, record)?;
        row += 1;
    }
    Ok(row)
}

/// Plain single-table layout of an export config
pub(crate) fn render_plain<R: ExportRecord>(
    config: &ExportConfig<R>,
    sheet: &mut Sheet,
    registry: &mut StyleRegistry,
) -> Result<u32, ReportError> {
    let header = registry.register(&StyleDescriptor::header())?;
    let styler = RowStyler::from_config(config, registry)?;
    render_columns(sheet, (0, 0), &config.columns, &config.records, &styler, header)
}
