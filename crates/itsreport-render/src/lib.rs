//! # itsreport-render
//!
//! Sheet layout and workbook assembly for itsreport.
//!
//! This crate provides:
//! - A memoizing style registry (`StyleRegistry`, opaque `StyleHandle`s)
//! - An in-memory worksheet model serialized once through rust_xlsxwriter
//! - Column layout with status and amount styling
//! - Vertical and horizontal split-sheet layouts
//! - The full-year calendar grid
//! - Standalone, sheet-append and combined workbook export
//!
//! ## Example
//!
//! ```rust
//! use itsreport_core::{CellValue, ColumnDef, ExportConfig, ExportRecord, SplitMode};
//! use itsreport_render::{content_disposition, export_standalone};
//!
//! struct Memo {
//!     number: &'static str,
//!     subject: &'static str,
//! }
//!
//! impl ExportRecord for Memo {
//!     fn values(&self) -> Vec<CellValue> {
//!         vec![self.number.into(), self.subject.into()]
//!     }
//!
//!     fn category(&self) -> &str {
//!         if self.number.contains("ITS-SAG") { "SAG" } else { "ISO" }
//!     }
//! }
//!
//! let config = ExportConfig::new(
//!     "MEMO",
//!     vec![ColumnDef::new("No Memo", 27.0), ColumnDef::new("Perihal", 40.0)],
//!     vec![Memo { number: "007/ITS-SAG/2024", subject: "Maintenance window" }],
//! )
//! .split(SplitMode::Vertical);
//!
//! let bytes = export_standalone(&config)?;
//! assert_eq!(&bytes[..2], b"PK");
//! assert_eq!(content_disposition("memo.xlsx"), "attachment; filename=memo.xlsx");
//! # Ok::<(), itsreport_core::ReportError>(())
//! ```

pub mod calendar;
pub mod export;
pub mod import;
pub mod layout;
pub mod registry;
pub mod sheet;
pub mod split;
pub mod status;
pub mod workbook;
pub mod xlsx;

pub use calendar::{days_in_month, first_weekday, render_calendar, MONTH_NAMES, WEEKDAY_NAMES};
pub use export::{
    append_sheet, content_disposition, content_type, export_combined, export_standalone,
    ReportEntry, ReportSource, SheetExporter,
};
pub use import::{import_file, import_workbook, read_rows, ImportConfig, ImportReport, RejectedRow};
pub use layout::{render_columns, write_header, RowStyler};
pub use registry::{StyleHandle, StyleRegistry};
pub use sheet::{cell_ref, col_to_letter, Cell, MergeRange, Sheet};
pub use split::{render_export, render_horizontal, render_vertical};
pub use status::{status_style, style_for, StatusStyles};
pub use workbook::{Workbook, DEFAULT_SHEET};
