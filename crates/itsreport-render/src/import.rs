//! Reading report sheets back into records
//!
//! The reader mirrors the exporter's layouts: a header row on top, one
//! record per row, and for side-by-side sheets a second block of columns
//! after the spacer column. Rows that are too sparse are skipped; rows that
//! fail to parse are logged and collected without stopping the import.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use itsreport_core::{ImportRecord, ReportError, RowError};
use tracing::{debug, info, warn};

/// Which sheet to read and how its rows are laid out
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportConfig {
    pub sheet_name: String,
    /// Rows above the first record
    pub header_rows: usize,
    /// Non-empty cells a row (or block) needs to be parsed
    pub min_columns: usize,
    /// Width of each block of a side-by-side sheet
    pub block_width: Option<usize>,
}

impl ImportConfig {
    /// One header row and the record type's own minimum
    pub fn new<R: ImportRecord>(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            header_rows: 1,
            min_columns: R::MIN_COLUMNS,
            block_width: None,
        }
    }

    pub fn header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    pub fn min_columns(mut self, min: usize) -> Self {
        self.min_columns = min;
        self
    }

    /// Two blocks of `width` columns separated by one spacer column
    pub fn side_by_side(mut self, width: usize) -> Self {
        self.block_width = Some(width);
        self
    }

    /// Cell ranges of one row that each hold a record
    fn blocks(&self, row_len: usize) -> Vec<(usize, usize)> {
        match self.block_width {
            None => vec![(0, row_len)],
            Some(width) => vec![(0, width), (width + 1, 2 * width + 1)],
        }
    }
}

/// A row that could not be imported
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based sheet row
    pub row: usize,
    pub error: RowError,
}

/// Outcome of one import
#[derive(Clone, Debug, PartialEq)]
pub struct ImportReport<R> {
    pub records: Vec<R>,
    /// Rows (or blocks) dropped for having too few cells
    pub skipped: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Read `config.sheet_name` from `.xlsx` bytes into records
pub fn import_workbook<R: ImportRecord>(
    bytes: &[u8],
    config: &ImportConfig,
) -> Result<ImportReport<R>, ReportError> {
    let rows = read_rows(bytes, &config.sheet_name)?;
    debug!(sheet = %config.sheet_name, rows = rows.len(), "read sheet");

    let mut report = ImportReport {
        records: Vec::new(),
        skipped: 0,
        rejected: Vec::new(),
    };

    for (index, cells) in rows.iter().enumerate().skip(config.header_rows) {
        let row = index + 1;
        for (start, end) in config.blocks(cells.len()) {
            let block = cells.get(start..end.min(cells.len())).unwrap_or(&[]);
            let filled = block.iter().filter(|c| !c.trim().is_empty()).count();
            if filled < config.min_columns {
                if filled > 0 {
                    debug!(row, filled, min = config.min_columns, "row skipped");
                }
                report.skipped += 1;
                continue;
            }
            match R::from_row(block) {
                Ok(record) => report.records.push(record),
                Err(error) => {
                    warn!(sheet = %config.sheet_name, row, %error, "row rejected");
                    report.rejected.push(RejectedRow { row, error });
                }
            }
        }
    }

    info!(
        sheet = %config.sheet_name,
        imported = report.records.len(),
        skipped = report.skipped,
        rejected = report.rejected.len(),
        "import finished"
    );
    Ok(report)
}

/// Read an `.xlsx` file from disk and import it
pub fn import_file<R: ImportRecord>(
    path: &Path,
    config: &ImportConfig,
) -> Result<ImportReport<R>, ReportError> {
    let bytes = std::fs::read(path)?;
    import_workbook(&bytes, config)
}

/// Every row of a sheet as display strings, from row 0 / column A
pub fn read_rows(bytes: &[u8], sheet_name: &str) -> Result<Vec<Vec<String>>, ReportError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: calamine::XlsxError| ReportError::Xlsx(e.to_string()))?;

    let name = workbook
        .sheet_names()
        .into_iter()
        .find(|n| n.eq_ignore_ascii_case(sheet_name))
        .ok_or_else(|| ReportError::SheetNotFound(sheet_name.to_string()))?;
    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| ReportError::Xlsx(e.to_string()))?;

    Ok(range_rows(&range))
}

fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((last_row, last_col)) = range.end() else {
        return Vec::new();
    };
    (0..=last_row)
        .map(|row| {
            let mut cells: Vec<String> = (0..=last_col)
                .map(|col| range.get_value((row, col)).map(cell_text).unwrap_or_default())
                .collect();
            while cells.last().is_some_and(String::is_empty) {
                cells.pop();
            }
            cells
        })
        .collect()
}

/// Display string of a cell
///
/// Whole numbers lose their fraction (`45352`, not `45352.0`) so they read
/// as serial dates or plain amounts; date cells become their serial day.
pub fn cell_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => number_text(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => number_text(dt.as_f64().floor()),
        Data::Error(e) => e.to_string(),
    }
}

fn number_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itsreport_core::catalog::{Letter, Memo, Perdin};
    use itsreport_core::{CellValue, ExportConfig, SplitMode, StyleBundle, StyleDescriptor};
    use pretty_assertions::assert_eq;

    use crate::workbook::Workbook;

    fn workbook_with(name: &str, rows: &[&[&str]]) -> Vec<u8> {
        let mut wb = Workbook::empty();
        let sheet = wb.add_sheet(name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet
                        .write(r as u32, c as u16, CellValue::from(*value))
                        .unwrap();
                }
            }
        }
        wb.to_xlsx_bytes().unwrap()
    }

    #[test]
    fn number_cells_read_without_fraction() {
        assert_eq!(cell_text(&Data::Float(45352.0)), "45352");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn header_and_sparse_rows_are_skipped() {
        let bytes = workbook_with(
            "PERDIN",
            &[
                &["No Perdin", "Tanggal", "Hotel", "Transport"],
                &["PD-1", "2024-03-01", "Grand", "Kereta"],
                &["PD-2"],
                &[],
                &["PD-3", "01-03-2024"],
            ],
        );
        let report: ImportReport<Perdin> =
            import_workbook(&bytes, &ImportConfig::new::<Perdin>("PERDIN")).unwrap();

        let numbers: Vec<_> = report
            .records
            .iter()
            .map(|p| p.no_perdin.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(numbers, vec!["PD-1", "PD-3"]);
        assert_eq!(report.skipped, 2);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn bad_rows_are_collected_and_the_rest_imported() {
        let bytes = workbook_with(
            "PERDIN",
            &[
                &["No Perdin", "Tanggal"],
                &["PD-1", "kemarin"],
                &["PD-2", "2024-03-02"],
            ],
        );
        let report: ImportReport<Perdin> =
            import_workbook(&bytes, &ImportConfig::new::<Perdin>("PERDIN")).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].row, 2);
        assert!(matches!(report.rejected[0].error, RowError::InvalidDate { .. }));
    }

    #[test]
    fn missing_sheet_is_an_error() {
        let bytes = workbook_with("MEMO", &[&["Tanggal"]]);
        let result: Result<ImportReport<Letter>, _> =
            import_workbook(&bytes, &ImportConfig::new::<Letter>("SURAT"));
        assert!(matches!(result, Err(ReportError::SheetNotFound(_))));
    }

    #[test]
    fn side_by_side_blocks_yield_separate_records() {
        let letters = vec![
            Letter {
                no_surat: Some("001/ITS-SAG/2024".into()),
                perihal: Some("Kickoff".into()),
                ..Letter::default()
            },
            Letter {
                no_surat: Some("002/ITS-ISO/2024".into()),
                pic: Some("Sari".into()),
                ..Letter::default()
            },
            Letter {
                no_surat: Some("003/ITS-ISO/2024".into()),
                ..Letter::default()
            },
        ];
        let config = ExportConfig::new("SURAT", Letter::columns(), letters)
            .split(SplitMode::Vertical)
            .styles(StyleBundle::new().default_cell(StyleDescriptor::data_region()));
        let bytes = crate::export::export_standalone(&config).unwrap();

        let import = ImportConfig::new::<Letter>("SURAT").side_by_side(Letter::columns().len());
        let report: ImportReport<Letter> = import_workbook(&bytes, &import).unwrap();
        let mut numbers: Vec<_> = report
            .records
            .iter()
            .filter_map(|l| l.no_surat.clone())
            .collect();
        numbers.sort();
        assert_eq!(
            numbers,
            vec!["001/ITS-SAG/2024", "002/ITS-ISO/2024", "003/ITS-ISO/2024"]
        );
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn sheet_lookup_ignores_case_and_cells_are_positional() {
        let bytes = workbook_with("MEMO", &[&["A", "B"], &["", "M-1/ITS-SAG"]]);
        let report: ImportReport<Memo> =
            import_workbook(&bytes, &ImportConfig::new::<Memo>("memo")).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].no_memo.as_deref(), Some("M-1/ITS-SAG"));
        assert_eq!(report.records[0].tanggal, None);
    }
}
