//! Meeting follow-up tracker and weekly meeting schedule

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{date_cell, de_opt_date, text_cell};
use crate::import::{cell, date_at, ImportRecord, RowError};
use crate::{
    BorderEdge, BorderSet, CellValue, Color, ColumnDef, ExportRecord, StyleBundle, StyleDescriptor,
};

/// Status values with a dedicated fill, paired with that fill
pub const MEETING_STATUSES: [(&str, u32); 4] = [
    ("Done", 0x5CB85C),
    ("On Progress", 0xF0AD4E),
    ("Cancel", 0xD9534F),
    ("Reschedule", 0x0275D8),
];

/// Position of the status column in the meeting schedule (column G)
pub const SCHEDULE_STATUS_COLUMN: usize = 6;

// ============================================================================
// Meeting follow-ups
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub tindak_lanjut: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub update_pengerjaan: Option<String>,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal_target: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal_actual: Option<NaiveDate>,
    #[serde(default)]
    pub create_by: String,
}

impl Meeting {
    pub fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("TASK", 25.0),
            ColumnDef::new("TINDAK LANJUT", 40.0),
            ColumnDef::new("STATUS", 17.0),
            ColumnDef::new("UPDATE PENGERJAAN", 27.0),
            ColumnDef::new("PIC", 25.0),
            ColumnDef::new("TANGGAL TARGET", 20.0),
            ColumnDef::new("TANGGAL ACTUAL", 20.0),
        ]
    }

    /// Status extractor for status styling
    pub fn status_of(meeting: &Meeting) -> Option<String> {
        meeting.status.clone()
    }
}

impl ExportRecord for Meeting {
    fn values(&self) -> Vec<CellValue> {
        vec![
            text_cell(&self.task),
            text_cell(&self.tindak_lanjut),
            text_cell(&self.status),
            text_cell(&self.update_pengerjaan),
            text_cell(&self.pic),
            date_cell(self.tanggal_target),
            date_cell(self.tanggal_actual),
        ]
    }

    fn category(&self) -> &str {
        "MEETING"
    }
}

impl ImportRecord for Meeting {
    const MIN_COLUMNS: usize = 2;

    fn from_row(cells: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            task: cell(cells, 0),
            tindak_lanjut: cell(cells, 1),
            status: cell(cells, 2),
            update_pengerjaan: cell(cells, 3),
            pic: cell(cells, 4),
            tanggal_target: date_at(cells, 5, "tanggal_target")?,
            tanggal_actual: date_at(cells, 6, "tanggal_actual")?,
            ..Self::default()
        })
    }
}

// ============================================================================
// Meeting schedule
// ============================================================================

/// One scheduled meeting of the weekly timeline
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingSchedule {
    #[serde(default)]
    pub id: u32,
    /// Day name as stored; shown only when the date is missing
    #[serde(default)]
    pub hari: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default)]
    pub perihal: Option<String>,
    #[serde(default)]
    pub waktu: Option<String>,
    #[serde(default)]
    pub selesai: Option<String>,
    #[serde(default)]
    pub tempat: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default)]
    pub create_by: String,
}

impl MeetingSchedule {
    pub fn columns() -> Vec<ColumnDef> {
        ["Hari", "Tanggal", "Perihal", "Waktu", "Selesai", "Tempat", "Status", "PIC"]
            .into_iter()
            .map(|header| ColumnDef::new(header, 20.0))
            .collect()
    }

    pub fn status_of(meeting: &MeetingSchedule) -> Option<String> {
        meeting.status.clone()
    }

    /// Indonesian day name of the meeting date, else the stored day
    pub fn day_name(&self) -> Option<String> {
        match self.tanggal {
            Some(date) => Some(hari_indonesia(date.weekday()).to_string()),
            None => self.hari.clone(),
        }
    }
}

impl ExportRecord for MeetingSchedule {
    fn values(&self) -> Vec<CellValue> {
        vec![
            self.day_name().map(CellValue::from).unwrap_or(CellValue::Empty),
            date_cell(self.tanggal),
            text_cell(&self.perihal),
            text_cell(&self.waktu),
            text_cell(&self.selesai),
            text_cell(&self.tempat),
            text_cell(&self.status),
            text_cell(&self.pic),
        ]
    }

    fn category(&self) -> &str {
        "MEETING SCHEDULE"
    }
}

impl ImportRecord for MeetingSchedule {
    const MIN_COLUMNS: usize = 3;

    fn from_row(cells: &[String]) -> Result<Self, RowError> {
        let tanggal = date_at(cells, 1, "tanggal")?.ok_or(RowError::Missing("tanggal"))?;
        Ok(Self {
            hari: cell(cells, 0),
            tanggal: Some(tanggal),
            perihal: cell(cells, 2),
            waktu: cell(cells, 3),
            selesai: cell(cells, 4),
            tempat: cell(cells, 5),
            status: cell(cells, 6),
            pic: cell(cells, 7),
            ..Self::default()
        })
    }
}

pub fn hari_indonesia(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

// ============================================================================
// Styles
// ============================================================================

/// Status styles: colored fill, black bold text, centered, black borders
pub fn meeting_status_styles() -> HashMap<String, StyleDescriptor> {
    MEETING_STATUSES
        .iter()
        .map(|(status, fill)| {
            let style = StyleDescriptor::new()
                .fill(Color::rgb(*fill))
                .bold()
                .font_color(Color::BLACK)
                .centered()
                .borders(BorderSet::all(BorderEdge::thin(Color::BLACK)));
            (status.to_string(), style)
        })
        .collect()
}

/// Bordered data cells plus the status fills
pub fn meeting_styles() -> StyleBundle {
    let mut bundle = StyleBundle::new().default_cell(StyleDescriptor::data_region());
    bundle.status = meeting_status_styles();
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_extractor_reads_status() {
        let meeting: Meeting =
            serde_json::from_str(r#"{"task": "Audit", "status": "Done"}"#).unwrap();
        assert_eq!(Meeting::status_of(&meeting).as_deref(), Some("Done"));
        assert_eq!(meeting.values()[2], CellValue::from("Done"));
        assert_eq!(meeting.category(), "MEETING");
    }

    #[test]
    fn every_status_has_a_distinct_fill() {
        let styles = meeting_status_styles();
        assert_eq!(styles.len(), 4);
        assert_eq!(styles["Cancel"].fill, Some(Color::rgb(0xD9534F)));
        assert_ne!(styles["Done"], styles["Reschedule"]);
    }

    #[test]
    fn meeting_cells_are_bordered_by_default() {
        let styles = meeting_styles();
        assert_eq!(styles.default_cell, Some(StyleDescriptor::data_region()));
        assert_eq!(styles.status.len(), MEETING_STATUSES.len());
    }

    #[test]
    fn schedule_day_follows_the_date() {
        let schedule: MeetingSchedule = serde_json::from_str(
            r#"{"hari": "Jumat", "tanggal": "2024-03-04", "perihal": "Weekly sync",
                "waktu": "09:00", "selesai": "10:00", "tempat": "R. Rapat 2",
                "status": "Done", "pic": "Rina"}"#,
        )
        .unwrap();
        let values = schedule.values();
        assert_eq!(values.len(), MeetingSchedule::columns().len());
        assert_eq!(values[0], CellValue::from("Senin"));
        assert_eq!(values[1], CellValue::from("2024-03-04"));
        assert_eq!(values[SCHEDULE_STATUS_COLUMN], CellValue::from("Done"));
    }

    #[test]
    fn schedule_without_date_keeps_stored_day() {
        let schedule = MeetingSchedule {
            hari: Some("Kamis".into()),
            ..MeetingSchedule::default()
        };
        assert_eq!(schedule.values()[0], CellValue::from("Kamis"));
        assert_eq!(MeetingSchedule::default().values()[0], CellValue::Empty);
    }

    #[test]
    fn every_weekday_has_a_name() {
        let week = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let names: Vec<&str> = week
            .iter_days()
            .take(7)
            .map(|d| hari_indonesia(d.weekday()))
            .collect();
        assert_eq!(
            names,
            vec!["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"]
        );
    }

    #[test]
    fn schedule_row_needs_a_date() {
        let row: Vec<String> = ["Senin", "", "Sync"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            MeetingSchedule::from_row(&row),
            Err(RowError::Missing("tanggal"))
        );
    }

    #[test]
    fn meeting_row_parses_both_dates() {
        let row: Vec<String> = ["Backup", "Cek", "Done", "", "Andi", "2024-05-01", "45413"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let meeting = Meeting::from_row(&row).unwrap();
        assert_eq!(meeting.tanggal_target, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(meeting.tanggal_actual, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(meeting.update_pengerjaan, None);
    }
}
