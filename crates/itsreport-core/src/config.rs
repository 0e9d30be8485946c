//! Report configuration
//!
//! An [`ExportConfig`] describes one tabular sheet (columns, rows, split mode
//! and styling); a [`CalendarConfig`] describes one twelve-month calendar
//! sheet. Both are built once per export call and read-only while rendering.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CalendarEvent, ColumnDef, ExportRecord, ReportError, StyleDescriptor};

/// Reference year the calendar grid renders when none is configured
pub const DEFAULT_CALENDAR_YEAR: i32 = 2024;

/// Column that carries the status value by convention (third column)
pub const DEFAULT_STATUS_COLUMN: usize = 2;

/// Column that carries the budget amount by convention (seventh column)
pub const DEFAULT_AMOUNT_COLUMN: usize = 6;

// ============================================================================
// Split & Styling Options
// ============================================================================

/// How records are divided between the two category groups
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// One continuous table
    #[default]
    None,
    /// Two column blocks side by side, separated by a spacer column
    Vertical,
    /// One table with a labelled separator row before each group
    Horizontal,
}

/// The two category groups of a split layout
///
/// Records whose category equals `primary` form the first group; every
/// other record (including unknown categories) forms the second. Fields
/// left out when deserializing keep their `SAG` / `ISO` defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitCategories {
    pub primary: String,
    pub secondary: String,
    /// Separator text for the first group (defaults to `primary`)
    pub primary_label: Option<String>,
    /// Separator text for the second group (defaults to `secondary`)
    pub secondary_label: Option<String>,
}

impl Default for SplitCategories {
    fn default() -> Self {
        Self {
            primary: "SAG".into(),
            secondary: "ISO".into(),
            primary_label: None,
            secondary_label: None,
        }
    }
}

impl SplitCategories {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            primary_label: None,
            secondary_label: None,
        }
    }

    pub fn is_primary(&self, category: &str) -> bool {
        category == self.primary
    }

    pub fn primary_label(&self) -> &str {
        self.primary_label.as_deref().unwrap_or(&self.primary)
    }

    pub fn secondary_label(&self) -> &str {
        self.secondary_label.as_deref().unwrap_or(&self.secondary)
    }
}

/// Which cells a matched status style covers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusScope {
    /// Only the status column
    #[default]
    Column,
    /// Every cell of the record's row
    Row,
}

/// What happens when a record's value count differs from the column count
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueCountPolicy {
    /// Missing values leave cells empty; surplus values are dropped
    #[default]
    Truncate,
    /// Any mismatch rejects the configuration
    Strict,
}

/// Optional styling of a tabular report
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleBundle {
    /// Style of every data cell unless overridden
    #[serde(default)]
    pub default_cell: Option<StyleDescriptor>,
    /// Style of category separator rows
    #[serde(default)]
    pub separator: Option<StyleDescriptor>,
    /// Status value -> style for the status column
    #[serde(default)]
    pub status: HashMap<String, StyleDescriptor>,
    /// Number-format override for the amount column
    #[serde(default)]
    pub amount: Option<StyleDescriptor>,
}

impl StyleBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_cell(mut self, style: StyleDescriptor) -> Self {
        self.default_cell = Some(style);
        self
    }

    pub fn separator(mut self, style: StyleDescriptor) -> Self {
        self.separator = Some(style);
        self
    }

    pub fn status(mut self, status: impl Into<String>, style: StyleDescriptor) -> Self {
        self.status.insert(status.into(), style);
        self
    }

    pub fn amount(mut self, style: StyleDescriptor) -> Self {
        self.amount = Some(style);
        self
    }
}

/// Extracts the status value of a record
pub type StatusExtractor<R> = fn(&R) -> Option<String>;

// ============================================================================
// Tabular Report
// ============================================================================

/// Configuration of one tabular sheet
#[derive(Clone)]
pub struct ExportConfig<R> {
    pub sheet_name: String,
    pub columns: Vec<ColumnDef>,
    pub records: Vec<R>,
    pub split: SplitMode,
    pub categories: SplitCategories,
    pub status: Option<StatusExtractor<R>>,
    pub styles: StyleBundle,
    pub status_column: usize,
    pub status_scope: StatusScope,
    pub amount_column: usize,
    pub value_policy: ValueCountPolicy,
}

impl<R> fmt::Debug for ExportConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("sheet_name", &self.sheet_name)
            .field("columns", &self.columns)
            .field("records", &self.records.len())
            .field("split", &self.split)
            .field("has_status", &self.status.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: ExportRecord> ExportConfig<R> {
    pub fn new(sheet_name: impl Into<String>, columns: Vec<ColumnDef>, records: Vec<R>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns,
            records,
            split: SplitMode::None,
            categories: SplitCategories::default(),
            status: None,
            styles: StyleBundle::default(),
            status_column: DEFAULT_STATUS_COLUMN,
            status_scope: StatusScope::Column,
            amount_column: DEFAULT_AMOUNT_COLUMN,
            value_policy: ValueCountPolicy::Truncate,
        }
    }

    pub fn split(mut self, mode: SplitMode) -> Self {
        self.split = mode;
        self
    }

    pub fn categories(mut self, categories: SplitCategories) -> Self {
        self.categories = categories;
        self
    }

    pub fn styles(mut self, styles: StyleBundle) -> Self {
        self.styles = styles;
        self
    }

    /// Enable status styling with the given extractor
    pub fn status(mut self, extractor: StatusExtractor<R>) -> Self {
        self.status = Some(extractor);
        self
    }

    pub fn status_column(mut self, column: usize) -> Self {
        self.status_column = column;
        self
    }

    pub fn status_scope(mut self, scope: StatusScope) -> Self {
        self.status_scope = scope;
        self
    }

    pub fn amount_column(mut self, column: usize) -> Self {
        self.amount_column = column;
        self
    }

    /// Reject records whose value count differs from the column count
    pub fn strict(mut self) -> Self {
        self.value_policy = ValueCountPolicy::Strict;
        self
    }

    /// Check the configuration before rendering
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.columns.is_empty() {
            return Err(ReportError::InvalidData(format!(
                "report '{}' has no columns",
                self.sheet_name
            )));
        }
        if let Some(column) = self.columns.iter().find(|c| !c.width.is_finite() || c.width < 0.0) {
            return Err(ReportError::InvalidData(format!(
                "column '{}' has invalid width {}",
                column.header, column.width
            )));
        }
        if self.value_policy == ValueCountPolicy::Strict {
            let expected = self.columns.len();
            for (index, record) in self.records.iter().enumerate() {
                let found = record.values().len();
                if found != expected {
                    return Err(ReportError::ColumnMismatch {
                        record: index,
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Calendar Report
// ============================================================================

/// Resource id -> display name
pub type ResourceMap = HashMap<u32, String>;

/// Which event colors a day's detail cell
///
/// Whatever the policy, at most one event paints a cell: the first event
/// listed for that day. Later events never repaint it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// The first event paints the cell only on the day it starts
    #[default]
    FirstEventStartDay,
    /// The first event paints the cell on every day it covers
    FirstEventEveryDay,
}

/// Configuration of one calendar sheet
#[derive(Clone, Debug)]
pub struct CalendarConfig<E> {
    pub sheet_name: String,
    /// File name used in standalone mode
    pub file_name: String,
    pub events: Vec<E>,
    /// Group by resource instead of showing time ranges
    pub use_resource: bool,
    pub resources: ResourceMap,
    /// Rows above the first month band
    pub row_offset: u32,
    /// Columns left of the first month block
    pub col_offset: u16,
    pub year: i32,
    pub fill_policy: FillPolicy,
}

impl<E: CalendarEvent> CalendarConfig<E> {
    pub fn new(sheet_name: impl Into<String>, file_name: impl Into<String>, events: Vec<E>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            file_name: file_name.into(),
            events,
            use_resource: false,
            resources: ResourceMap::new(),
            row_offset: 0,
            col_offset: 0,
            year: DEFAULT_CALENDAR_YEAR,
            fill_policy: FillPolicy::default(),
        }
    }

    /// Group events by resource using the given names
    pub fn with_resources(mut self, resources: ResourceMap) -> Self {
        self.use_resource = true;
        self.resources = resources;
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn offsets(mut self, rows: u32, cols: u16) -> Self {
        self.row_offset = rows;
        self.col_offset = cols;
        self
    }

    pub fn fill_policy(mut self, policy: FillPolicy) -> Self {
        self.fill_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellValue;

    struct Row(Vec<&'static str>, &'static str);

    impl ExportRecord for Row {
        fn values(&self) -> Vec<CellValue> {
            self.0.iter().map(|v| CellValue::from(*v)).collect()
        }

        fn category(&self) -> &str {
            self.1
        }
    }

    fn columns(n: usize) -> Vec<ColumnDef> {
        (0..n).map(|i| ColumnDef::new(format!("C{}", i), 10.0)).collect()
    }

    #[test]
    fn truncate_policy_accepts_short_records() {
        let config = ExportConfig::new("S", columns(4), vec![Row(vec!["a", "b"], "SAG")]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn strict_policy_reports_record_index() {
        let config = ExportConfig::new(
            "S",
            columns(4),
            vec![Row(vec!["a", "b", "c", "d"], "SAG"), Row(vec!["a", "b"], "ISO")],
        )
        .strict();
        match config.validate() {
            Err(ReportError::ColumnMismatch {
                record,
                expected,
                found,
            }) => {
                assert_eq!((record, expected, found), (1, 4, 2));
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn empty_columns_rejected() {
        let config = ExportConfig::new("S", Vec::new(), Vec::<Row>::new());
        assert!(matches!(config.validate(), Err(ReportError::InvalidData(_))));
    }

    #[test]
    fn negative_width_rejected() {
        let config = ExportConfig::new("S", vec![ColumnDef::new("A", -1.0)], Vec::<Row>::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn categories_default_to_sag_iso() {
        let categories = SplitCategories::default();
        assert!(categories.is_primary("SAG"));
        assert!(!categories.is_primary("ISO"));
        assert!(!categories.is_primary("OTHER"));
        assert_eq!(categories.primary_label(), "SAG");
    }

    #[test]
    fn category_labels_override_tags() {
        let categories = SplitCategories {
            primary_label: Some("ITS-SAG".into()),
            ..SplitCategories::default()
        };
        assert_eq!(categories.primary_label(), "ITS-SAG");
        assert_eq!(categories.secondary_label(), "ISO");
    }

    #[test]
    fn split_mode_deserializes_lowercase() {
        let mode: SplitMode = serde_json::from_str("\"horizontal\"").unwrap();
        assert_eq!(mode, SplitMode::Horizontal);
    }

    #[test]
    fn partial_categories_keep_defaults() {
        let categories: SplitCategories =
            serde_json::from_str(r#"{"primary_label": "ITS-SAG"}"#).unwrap();
        assert_eq!(categories.primary, "SAG");
        assert_eq!(categories.secondary, "ISO");
        assert_eq!(categories.primary_label(), "ITS-SAG");

        let categories: SplitCategories = serde_json::from_str(r#"{"secondary": "OPS"}"#).unwrap();
        assert!(categories.is_primary("SAG"));
        assert_eq!(categories.secondary_label(), "OPS");
    }
}
