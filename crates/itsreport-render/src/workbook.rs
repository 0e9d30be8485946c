//! Workbook model: ordered sheets plus their shared style registry

use itsreport_core::ReportError;

use crate::registry::StyleRegistry;
use crate::sheet::{validate_sheet_name, Sheet};
use crate::xlsx;

/// Name of the sheet a fresh workbook starts with
pub const DEFAULT_SHEET: &str = "Sheet1";

/// A workbook under construction
#[derive(Debug)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    styles: StyleRegistry,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook {
    /// New workbook holding the default `Sheet1`, like a spreadsheet app creates
    pub fn new() -> Self {
        Self {
            sheets: vec![Sheet::blank(DEFAULT_SHEET.to_string())],
            styles: StyleRegistry::new(),
        }
    }

    /// Workbook with no sheets at all
    pub fn empty() -> Self {
        Self {
            sheets: Vec::new(),
            styles: StyleRegistry::new(),
        }
    }

    /// Append a sheet; names are unique ignoring ASCII case
    pub fn add_sheet(&mut self, name: &str) -> Result<&mut Sheet, ReportError> {
        validate_sheet_name(name)?;
        self.insert_sheet(Sheet::blank(name.to_string()))
    }

    /// Append a sheet rendered elsewhere
    pub fn insert_sheet(&mut self, sheet: Sheet) -> Result<&mut Sheet, ReportError> {
        self.ensure_unused(sheet.name())?;
        self.sheets.push(sheet);
        let last = self.sheets.len() - 1;
        Ok(&mut self.sheets[last])
    }

    /// Fail when a sheet called `name` already exists
    pub fn ensure_unused(&self, name: &str) -> Result<(), ReportError> {
        match self.position(name) {
            Some(_) => Err(ReportError::DuplicateSheet(name.to_string())),
            None => Ok(()),
        }
    }

    pub fn delete_sheet(&mut self, name: &str) -> Result<Sheet, ReportError> {
        let index = self
            .position(name)
            .ok_or_else(|| ReportError::SheetNotFound(name.to_string()))?;
        Ok(self.sheets.remove(index))
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.position(name).map(|i| &self.sheets[i])
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.position(name).map(|i| &mut self.sheets[i])
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    /// Serialize to `.xlsx` bytes
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>, ReportError> {
        xlsx::to_bytes(self)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sheets
            .iter()
            .position(|s| s.name().eq_ignore_ascii_case(name))
    }
}
