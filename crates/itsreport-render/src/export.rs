//! Workbook assembly
//!
//! Three entry points share one rendering seam, [`SheetExporter`]:
//!
//! - [`export_standalone`]: fresh workbook, default sheet removed, one report,
//!   serialized to bytes.
//! - [`append_sheet`]: render into a workbook the caller owns; nothing is
//!   deleted or serialized.
//! - [`export_combined`]: a declarative list of reports rendered in order
//!   into one workbook, serialized once. The first failure aborts the whole
//!   export and names the report that caused it.

use itsreport_core::{CalendarConfig, CalendarEvent, ExportConfig, ExportRecord, ReportError};
use tracing::{debug, info};

use crate::calendar::render_calendar;
use crate::registry::StyleRegistry;
use crate::sheet::Sheet;
use crate::split::render_export;
use crate::workbook::{Workbook, DEFAULT_SHEET};

/// MIME type of a generated workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Something that can render itself into one worksheet
pub trait SheetExporter {
    /// Name of the sheet this report is written to when exported alone
    fn sheet_name(&self) -> &str;

    fn render(&self, sheet: &mut Sheet, styles: &mut StyleRegistry) -> Result<(), ReportError>;
}

impl<R: ExportRecord> SheetExporter for ExportConfig<R> {
    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    fn render(&self, sheet: &mut Sheet, styles: &mut StyleRegistry) -> Result<(), ReportError> {
        render_export(self, sheet, styles).map(|_| ())
    }
}

impl<E: CalendarEvent> SheetExporter for CalendarConfig<E> {
    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    fn render(&self, sheet: &mut Sheet, styles: &mut StyleRegistry) -> Result<(), ReportError> {
        render_calendar(self, sheet, styles)
    }
}

impl<T: SheetExporter + ?Sized> SheetExporter for Box<T> {
    fn sheet_name(&self) -> &str {
        (**self).sheet_name()
    }

    fn render(&self, sheet: &mut Sheet, styles: &mut StyleRegistry) -> Result<(), ReportError> {
        (**self).render(sheet, styles)
    }
}

/// Export one report as a single-sheet workbook
pub fn export_standalone(exporter: &dyn SheetExporter) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    workbook.delete_sheet(DEFAULT_SHEET)?;
    append_sheet(&mut workbook, exporter.sheet_name(), exporter)?;

    let bytes = workbook.to_xlsx_bytes()?;
    info!(
        sheet = exporter.sheet_name(),
        bytes = bytes.len(),
        "assembled workbook"
    );
    Ok(bytes)
}

/// Render `exporter` into a new sheet `name` of a caller-owned workbook
///
/// The sheet is rendered detached and joins the workbook only once
/// rendering succeeds; on error the workbook's sheets are unchanged.
pub fn append_sheet(
    workbook: &mut Workbook,
    name: &str,
    exporter: &dyn SheetExporter,
) -> Result<(), ReportError> {
    workbook.ensure_unused(name)?;
    let mut sheet = Sheet::new(name)?;
    exporter.render(&mut sheet, workbook.styles_mut())?;
    workbook.insert_sheet(sheet)?;
    debug!(sheet = name, styles = workbook.styles().len(), "appended sheet");
    Ok(())
}

// ============================================================================
// Combined Export
// ============================================================================

/// Deferred construction of a report's exporter
///
/// Loading happens inside the combined export so that a data failure is
/// reported against the report's name.
pub trait ReportSource {
    fn load(&self) -> Result<Box<dyn SheetExporter>, ReportError>;
}

impl<F> ReportSource for F
where
    F: Fn() -> Result<Box<dyn SheetExporter>, ReportError>,
{
    fn load(&self) -> Result<Box<dyn SheetExporter>, ReportError> {
        self()
    }
}

/// One entry of a combined export: sheet name plus where its data comes from
pub struct ReportEntry {
    pub name: String,
    source: Box<dyn ReportSource>,
}

impl ReportEntry {
    pub fn new(name: impl Into<String>, source: impl ReportSource + 'static) -> Self {
        Self {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Entry for an exporter that is already built
    pub fn ready<X: SheetExporter + Clone + 'static>(name: impl Into<String>, exporter: X) -> Self {
        Self::new(name, move || -> Result<Box<dyn SheetExporter>, ReportError> {
            Ok(Box::new(exporter.clone()))
        })
    }
}

impl std::fmt::Debug for ReportEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportEntry").field("name", &self.name).finish()
    }
}

/// Render every entry, in order, into one workbook
///
/// Each entry's sheet is named after the entry. No bytes are returned
/// unless every report succeeds.
pub fn export_combined(entries: &[ReportEntry]) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    workbook.delete_sheet(DEFAULT_SHEET)?;

    for entry in entries {
        let exporter = entry.source.load().map_err(|e| e.in_report(&entry.name))?;
        append_sheet(&mut workbook, &entry.name, exporter.as_ref())
            .map_err(|e| e.in_report(&entry.name))?;
    }

    let bytes = workbook.to_xlsx_bytes()?;
    info!(
        sheets = entries.len(),
        bytes = bytes.len(),
        "assembled combined workbook"
    );
    Ok(bytes)
}

// ============================================================================
// Transport Conventions
// ============================================================================

pub fn content_type() -> &'static str {
    XLSX_CONTENT_TYPE
}

/// `Content-Disposition` value for downloading `file_name`
pub fn content_disposition(file_name: &str) -> String {
    format!("attachment; filename={}", file_name)
}
