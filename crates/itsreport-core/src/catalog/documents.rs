//! Document and correspondence registers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{category_of, date_cell, de_opt_date, text_cell};
use crate::import::{cell, date_at, ImportRecord, RowError};
use crate::{CellValue, ColumnDef, ExportRecord};

// ============================================================================
// Numbered letters (Berita Acara, SK, Surat)
// ============================================================================

/// A numbered letter: date, reference number, subject, person in charge
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Letter {
    #[serde(default)]
    pub id: u32,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default)]
    pub no_surat: Option<String>,
    #[serde(default)]
    pub perihal: Option<String>,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default)]
    pub create_by: String,
}

pub type BeritaAcara = Letter;
pub type Sk = Letter;
pub type Surat = Letter;

impl Letter {
    pub fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Tanggal", 20.0),
            ColumnDef::new("No Surat", 27.0),
            ColumnDef::new("Perihal", 40.0),
            ColumnDef::new("PIC", 20.0),
        ]
    }
}

impl ExportRecord for Letter {
    fn values(&self) -> Vec<CellValue> {
        vec![
            date_cell(self.tanggal),
            text_cell(&self.no_surat),
            text_cell(&self.perihal),
            text_cell(&self.pic),
        ]
    }

    fn category(&self) -> &str {
        category_of(self.no_surat.as_deref())
    }
}

// ============================================================================
// Memo
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Memo {
    #[serde(default)]
    pub id: u32,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default)]
    pub no_memo: Option<String>,
    #[serde(default)]
    pub perihal: Option<String>,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default)]
    pub create_by: String,
}

impl Memo {
    pub fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Tanggal", 20.0),
            ColumnDef::new("No Memo", 27.0),
            ColumnDef::new("Perihal", 40.0),
            ColumnDef::new("PIC", 20.0),
        ]
    }
}

impl ExportRecord for Memo {
    fn values(&self) -> Vec<CellValue> {
        vec![
            date_cell(self.tanggal),
            text_cell(&self.no_memo),
            text_cell(&self.perihal),
            text_cell(&self.pic),
        ]
    }

    fn category(&self) -> &str {
        category_of(self.no_memo.as_deref())
    }
}

// ============================================================================
// Perdin (business trips)
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Perdin {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub no_perdin: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default)]
    pub hotel: Option<String>,
    #[serde(default)]
    pub transport: Option<String>,
    #[serde(default)]
    pub create_by: String,
}

impl Perdin {
    /// Headers follow the value order (trip number first)
    pub fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("No Perdin", 27.0),
            ColumnDef::new("Tanggal", 20.0),
            ColumnDef::new("Hotel", 40.0),
            ColumnDef::new("Transport", 20.0),
        ]
    }
}

impl ExportRecord for Perdin {
    fn values(&self) -> Vec<CellValue> {
        vec![
            text_cell(&self.no_perdin),
            date_cell(self.tanggal),
            text_cell(&self.hotel),
            text_cell(&self.transport),
        ]
    }

    fn category(&self) -> &str {
        category_of(self.no_perdin.as_deref())
    }
}

// ============================================================================
// Information registers (Arsip, Surat Masuk, Surat Keluar)
// ============================================================================

/// Archive register entry
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Arsip {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub no_arsip: Option<String>,
    #[serde(default)]
    pub jenis_dokumen: Option<String>,
    #[serde(default)]
    pub no_dokumen: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal_dokumen: Option<NaiveDate>,
    #[serde(default)]
    pub perihal: Option<String>,
    #[serde(default)]
    pub no_box: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal_penyerahan: Option<NaiveDate>,
    #[serde(default)]
    pub keterangan: Option<String>,
    #[serde(default)]
    pub create_by: String,
}

impl Arsip {
    pub fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("No Arsip", 20.0),
            ColumnDef::new("Jenis Dokumen", 27.0),
            ColumnDef::new("No Dokumen", 40.0),
            ColumnDef::new("Perihal", 20.0),
            ColumnDef::new("No Box", 20.0),
            ColumnDef::new("Tanggal Dokumen", 20.0),
            ColumnDef::new("Tanggal Penyerahan", 20.0),
            ColumnDef::new("Keterangan", 20.0),
        ]
    }
}

impl ExportRecord for Arsip {
    fn values(&self) -> Vec<CellValue> {
        vec![
            text_cell(&self.no_arsip),
            text_cell(&self.jenis_dokumen),
            text_cell(&self.no_dokumen),
            text_cell(&self.perihal),
            text_cell(&self.no_box),
            date_cell(self.tanggal_dokumen),
            date_cell(self.tanggal_penyerahan),
            text_cell(&self.keterangan),
        ]
    }

    fn category(&self) -> &str {
        category_of(self.no_arsip.as_deref())
    }
}

/// Incoming letter
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SuratMasuk {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub no_surat: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub related_div: Option<String>,
    #[serde(default)]
    pub destiny_div: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default)]
    pub create_by: String,
}

impl SuratMasuk {
    pub fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Tanggal", 20.0),
            ColumnDef::new("No Surat", 27.0),
            ColumnDef::new("Title", 40.0),
            ColumnDef::new("Related Div", 20.0),
            ColumnDef::new("Destiny Div", 20.0),
        ]
    }
}

impl ExportRecord for SuratMasuk {
    fn values(&self) -> Vec<CellValue> {
        vec![
            date_cell(self.tanggal),
            text_cell(&self.no_surat),
            text_cell(&self.title),
            text_cell(&self.related_div),
            text_cell(&self.destiny_div),
        ]
    }

    fn category(&self) -> &str {
        category_of(self.no_surat.as_deref())
    }
}

/// Outgoing letter
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SuratKeluar {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub no_surat: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default)]
    pub create_by: String,
}

impl SuratKeluar {
    pub fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Tanggal", 20.0),
            ColumnDef::new("No Surat", 27.0),
            ColumnDef::new("Title", 40.0),
            ColumnDef::new("From", 20.0),
            ColumnDef::new("PIC", 20.0),
        ]
    }
}

impl ExportRecord for SuratKeluar {
    fn values(&self) -> Vec<CellValue> {
        vec![
            date_cell(self.tanggal),
            text_cell(&self.no_surat),
            text_cell(&self.title),
            text_cell(&self.from),
            text_cell(&self.pic),
        ]
    }

    fn category(&self) -> &str {
        category_of(self.no_surat.as_deref())
    }
}

// ============================================================================
// Import
// ============================================================================

impl ImportRecord for Letter {
    const MIN_COLUMNS: usize = 1;

    fn from_row(cells: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            tanggal: date_at(cells, 0, "tanggal")?,
            no_surat: cell(cells, 1),
            perihal: cell(cells, 2),
            pic: cell(cells, 3),
            ..Self::default()
        })
    }
}

impl ImportRecord for Memo {
    const MIN_COLUMNS: usize = 1;

    fn from_row(cells: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            tanggal: date_at(cells, 0, "tanggal")?,
            no_memo: cell(cells, 1),
            perihal: cell(cells, 2),
            pic: cell(cells, 3),
            ..Self::default()
        })
    }
}

impl ImportRecord for Perdin {
    const MIN_COLUMNS: usize = 2;

    fn from_row(cells: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            no_perdin: cell(cells, 0),
            tanggal: date_at(cells, 1, "tanggal")?,
            hotel: cell(cells, 2),
            transport: cell(cells, 3),
            ..Self::default()
        })
    }
}

impl ImportRecord for Arsip {
    const MIN_COLUMNS: usize = 2;

    fn from_row(cells: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            no_arsip: cell(cells, 0),
            jenis_dokumen: cell(cells, 1),
            no_dokumen: cell(cells, 2),
            perihal: cell(cells, 3),
            no_box: cell(cells, 4),
            tanggal_dokumen: date_at(cells, 5, "tanggal_dokumen")?,
            tanggal_penyerahan: date_at(cells, 6, "tanggal_penyerahan")?,
            keterangan: cell(cells, 7),
            ..Self::default()
        })
    }
}

impl ImportRecord for SuratMasuk {
    const MIN_COLUMNS: usize = 2;

    fn from_row(cells: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            tanggal: date_at(cells, 0, "tanggal")?,
            no_surat: cell(cells, 1),
            title: cell(cells, 2),
            related_div: cell(cells, 3),
            destiny_div: cell(cells, 4),
            ..Self::default()
        })
    }
}

impl ImportRecord for SuratKeluar {
    const MIN_COLUMNS: usize = 2;

    fn from_row(cells: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            tanggal: date_at(cells, 0, "tanggal")?,
            no_surat: cell(cells, 1),
            title: cell(cells, 2),
            from: cell(cells, 3),
            pic: cell(cells, 4),
            ..Self::default()
        })
    }
}
