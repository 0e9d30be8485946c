//! # itsreport-core
//!
//! Core domain model and traits for the itsreport Excel report engine.
//!
//! This crate provides:
//! - Capabilities: `ExportRecord` (tabular rows) and `CalendarEvent` (calendar entries)
//! - Report configuration: `ExportConfig`, `CalendarConfig`, `StyleBundle`
//! - Style descriptors with validated colors
//! - The back-office entity catalog (documents, projects, meetings, agendas)
//! - `ImportRecord` and the date rules for reading uploaded sheets back
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use itsreport_core::{CellValue, ColumnDef, ExportConfig, ExportRecord, SplitMode};
//!
//! struct Letter {
//!     number: String,
//!     subject: String,
//! }
//!
//! impl ExportRecord for Letter {
//!     fn values(&self) -> Vec<CellValue> {
//!         vec![self.number.as_str().into(), self.subject.as_str().into()]
//!     }
//!
//!     fn category(&self) -> &str {
//!         if self.number.contains("ITS-SAG") { "SAG" } else { "ISO" }
//!     }
//! }
//!
//! let config = ExportConfig::new(
//!     "SURAT",
//!     vec![ColumnDef::new("No Surat", 27.0), ColumnDef::new("Perihal", 40.0)],
//!     vec![Letter { number: "001/ITS-SAG/2024".into(), subject: "Kickoff".into() }],
//! )
//! .split(SplitMode::Vertical);
//!
//! assert!(config.validate().is_ok());
//! ```

pub mod catalog;
pub mod config;
pub mod import;
pub mod style;
pub mod time;

pub use config::{
    CalendarConfig, ExportConfig, FillPolicy, ResourceMap, SplitCategories, SplitMode,
    StatusExtractor, StatusScope, StyleBundle, ValueCountPolicy,
};
pub use import::{parse_cell_date, ImportRecord, RowError};
pub use style::{
    Alignment, BorderEdge, BorderLine, BorderSet, Color, ColorError, FontSpec, HAlign,
    StyleDescriptor, VAlign,
};
pub use time::{parse_instant, EventTimeError, ANCHOR_ZONE};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Cell Values
// ============================================================================

/// A single display value written into a worksheet cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Nothing is written
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

// ============================================================================
// Columns
// ============================================================================

/// Header label and width of one report column
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub header: String,
    /// Column width in Excel character units
    pub width: f64,
}

impl ColumnDef {
    pub fn new(header: impl Into<String>, width: f64) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// A row that can be written into a tabular report
pub trait ExportRecord {
    /// Display values, one per configured column, in column order
    fn values(&self) -> Vec<CellValue>;

    /// Category tag used by split layouts (e.g. "SAG" or "ISO")
    fn category(&self) -> &str;
}

/// An entry that can be placed on the calendar grid
pub trait CalendarEvent {
    fn title(&self) -> &str;

    fn start(&self) -> Result<DateTime<FixedOffset>, EventTimeError>;

    fn end(&self) -> Result<DateTime<FixedOffset>, EventTimeError>;

    /// Display color as a hex string (`#RRGGBB` or `RRGGBB`)
    fn color(&self) -> &str;

    fn all_day(&self) -> bool;

    /// Resource the event belongs to; `None` when it has no resource
    fn resource_id(&self) -> Option<u32> {
        None
    }
}

impl<T: ExportRecord + ?Sized> ExportRecord for &T {
    fn values(&self) -> Vec<CellValue> {
        (**self).values()
    }

    fn category(&self) -> &str {
        (**self).category()
    }
}

impl<T: CalendarEvent + ?Sized> CalendarEvent for &T {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn start(&self) -> Result<DateTime<FixedOffset>, EventTimeError> {
        (**self).start()
    }

    fn end(&self) -> Result<DateTime<FixedOffset>, EventTimeError> {
        (**self).end()
    }

    fn color(&self) -> &str {
        (**self).color()
    }

    fn all_day(&self) -> bool {
        (**self).all_day()
    }

    fn resource_id(&self) -> Option<u32> {
        (**self).resource_id()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Report generation error
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Invalid color: {0}")]
    Color(#[from] ColorError),

    #[error("Cell out of range: row {row}, column {col}")]
    CellAddress { row: u32, col: u32 },

    #[error("Invalid sheet name: '{0}'")]
    InvalidSheetName(String),

    #[error("Sheet already exists: {0}")]
    DuplicateSheet(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Column/value count mismatch at record {record}: expected {expected} values, found {found}")]
    ColumnMismatch {
        record: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Event time error: {0}")]
    EventTime(#[from] EventTimeError),

    #[error("Error exporting {name}: {source}")]
    Report {
        name: String,
        #[source]
        source: Box<ReportError>,
    },

    #[error("Xlsx error: {0}")]
    Xlsx(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Wrap an error with the name of the report that produced it
    pub fn in_report(self, name: impl Into<String>) -> Self {
        ReportError::Report {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Name of the failing report, when this error came from a combined export
    pub fn report_name(&self) -> Option<&str> {
        match self {
            ReportError::Report { name, .. } => Some(name),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
