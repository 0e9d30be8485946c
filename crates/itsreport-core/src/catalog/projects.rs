//! Procurement projects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{category_of, date_cell, de_opt_date, text_cell};
use crate::import::{cell, date_at, ImportRecord, RowError};
use crate::{CellValue, ColumnDef, ExportRecord, StyleBundle, StyleDescriptor};
use crate::{BorderEdge, BorderSet, Color};

/// Position of the budget column
pub const ANGGARAN_COLUMN: usize = 6;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub kode_project: Option<String>,
    #[serde(default)]
    pub jenis_pengadaan: Option<String>,
    #[serde(default)]
    pub nama_pengadaan: Option<String>,
    #[serde(default)]
    pub div_inisiasi: Option<String>,
    /// Month of the procurement (day is ignored)
    #[serde(default, deserialize_with = "de_opt_date")]
    pub bulan: Option<NaiveDate>,
    #[serde(default)]
    pub sumber_pendanaan: Option<String>,
    /// Budget as entered, e.g. `"150000000"` or `"150.000.000"`
    #[serde(default)]
    pub anggaran: Option<String>,
    #[serde(default)]
    pub no_izin: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal_izin: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal_tor: Option<NaiveDate>,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub create_by: String,
}

impl Project {
    pub fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Kode Project", 38.0),
            ColumnDef::new("Jenis Pengadaan", 27.0),
            ColumnDef::new("Nama Pengadaan", 40.0),
            ColumnDef::new("Divisi Inisiasi", 20.0),
            ColumnDef::new("Bulan", 10.0),
            ColumnDef::new("Sumber Pendanaan", 20.0),
            ColumnDef::new("Anggaran", 20.0),
            ColumnDef::new("No Izin", 23.0),
            ColumnDef::new("Tgl Izin", 14.0),
            ColumnDef::new("Tgl TOR", 14.0),
            ColumnDef::new("Pic", 16.0),
        ]
    }

    /// Wrapped bordered cells, black separator rows, thousands-separated budget
    pub fn styles() -> StyleBundle {
        let black = BorderSet::all(BorderEdge::thin(Color::BLACK));
        StyleBundle::new()
            .default_cell(StyleDescriptor::new().wrap().borders(black))
            .separator(StyleDescriptor::separator())
            .amount(StyleDescriptor::new().num_format("#,##0").borders(black))
    }
}

impl ExportRecord for Project {
    fn values(&self) -> Vec<CellValue> {
        let bulan = self
            .bulan
            .map(|d| CellValue::Text(d.format("%m/%y").to_string()))
            .unwrap_or(CellValue::Empty);
        vec![
            text_cell(&self.kode_project),
            text_cell(&self.jenis_pengadaan),
            text_cell(&self.nama_pengadaan),
            text_cell(&self.div_inisiasi),
            bulan,
            text_cell(&self.sumber_pendanaan),
            self.anggaran.as_deref().map(parse_amount).unwrap_or(CellValue::Empty),
            text_cell(&self.no_izin),
            date_cell(self.tanggal_izin),
            date_cell(self.tanggal_tor),
            text_cell(&self.pic),
        ]
    }

    fn category(&self) -> &str {
        category_of(self.kode_project.as_deref())
    }
}

impl ImportRecord for Project {
    const MIN_COLUMNS: usize = 2;

    /// The budget is kept as the cell shows it; `Bulan` accepts `MM/YY`
    fn from_row(cells: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            kode_project: cell(cells, 0),
            jenis_pengadaan: cell(cells, 1),
            nama_pengadaan: cell(cells, 2),
            div_inisiasi: cell(cells, 3),
            bulan: date_at(cells, 4, "bulan")?,
            sumber_pendanaan: cell(cells, 5),
            anggaran: cell(cells, ANGGARAN_COLUMN),
            no_izin: cell(cells, 7),
            tanggal_izin: date_at(cells, 8, "tanggal_izin")?,
            tanggal_tor: date_at(cells, 9, "tanggal_tor")?,
            pic: cell(cells, 10),
            ..Self::default()
        })
    }
}

/// Interpret a budget string as a number when possible
///
/// Plain numbers parse directly; grouped amounts (`150.000.000`,
/// `150,000,000`) parse after dropping the separators. Anything else is
/// kept as text.
pub fn parse_amount(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return CellValue::Number(n);
        }
    }
    let digits: String = trimmed.chars().filter(|c| *c != '.' && *c != ',').collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = digits.parse::<f64>() {
            return CellValue::Number(n);
        }
    }
    CellValue::Text(trimmed.to_string())
}
