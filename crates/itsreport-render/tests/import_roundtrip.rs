//! Workbooks written by the exporter import back to the same records

use chrono::NaiveDate;
use itsreport_core::catalog::{meeting_styles, Arsip, MeetingSchedule, Project};
use itsreport_core::{ExportConfig, RowError, SplitMode};
use itsreport_render::{export_standalone, import_workbook, ImportConfig, ImportReport};
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn projects_survive_separators_and_numeric_budget() {
    let projects = vec![
        Project {
            kode_project: Some("PRJ/ITS-SAG/01".into()),
            nama_pengadaan: Some("Firewall".into()),
            bulan: date(2024, 3, 1),
            anggaran: Some("150000000".into()),
            tanggal_izin: date(2024, 3, 5),
            pic: Some("Andi".into()),
            ..Project::default()
        },
        Project {
            kode_project: Some("PRJ/ITS-ISO/02".into()),
            jenis_pengadaan: Some("Lisensi".into()),
            bulan: date(2024, 7, 1),
            ..Project::default()
        },
    ];
    let config = ExportConfig::new("PROJECT", Project::columns(), projects.clone())
        .split(SplitMode::Horizontal)
        .styles(Project::styles());
    let bytes = export_standalone(&config).unwrap();

    let report: ImportReport<Project> =
        import_workbook(&bytes, &ImportConfig::new::<Project>("PROJECT")).unwrap();
    assert_eq!(report.records, projects);
    // one separator row per category
    assert_eq!(report.skipped, 2);
    assert!(report.rejected.is_empty());
}

#[test]
fn plain_register_round_trip() {
    let arsip = vec![Arsip {
        no_arsip: Some("A-17".into()),
        jenis_dokumen: Some("Kontrak".into()),
        tanggal_dokumen: date(2023, 11, 30),
        tanggal_penyerahan: date(2024, 1, 2),
        keterangan: Some("Box biru".into()),
        ..Arsip::default()
    }];
    let config = ExportConfig::new("ARSIP", Arsip::columns(), arsip.clone());
    let bytes = export_standalone(&config).unwrap();

    let report: ImportReport<Arsip> =
        import_workbook(&bytes, &ImportConfig::new::<Arsip>("ARSIP")).unwrap();
    assert_eq!(report.records, arsip);
}

#[test]
fn meeting_schedule_round_trip_keeps_day_names() {
    let schedule = vec![
        MeetingSchedule {
            hari: Some("Rabu".into()),
            tanggal: date(2024, 3, 6),
            perihal: Some("Sprint review".into()),
            waktu: Some("09:00".into()),
            status: Some("Done".into()),
            pic: Some("Dewi".into()),
            ..MeetingSchedule::default()
        },
        MeetingSchedule {
            hari: Some("Kamis".into()),
            perihal: Some("Tanpa tanggal".into()),
            status: Some("Cancel".into()),
            ..MeetingSchedule::default()
        },
    ];
    let config = ExportConfig::new("MEETING SCHEDULE", MeetingSchedule::columns(), schedule.clone())
        .styles(meeting_styles())
        .status(MeetingSchedule::status_of)
        .status_column(6);
    let bytes = export_standalone(&config).unwrap();

    let report: ImportReport<MeetingSchedule> = import_workbook(
        &bytes,
        &ImportConfig::new::<MeetingSchedule>("MEETING SCHEDULE"),
    )
    .unwrap();
    assert_eq!(report.records, vec![schedule[0].clone()]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].row, 3);
    assert_eq!(report.rejected[0].error, RowError::Missing("tanggal"));
}

#[test]
fn header_rows_and_minimum_are_configurable() {
    let arsip = vec![
        Arsip {
            no_arsip: Some("A-1".into()),
            perihal: Some("Pertama".into()),
            ..Arsip::default()
        },
        Arsip {
            no_arsip: Some("A-2".into()),
            ..Arsip::default()
        },
    ];
    let bytes = export_standalone(&ExportConfig::new("ARSIP", Arsip::columns(), arsip)).unwrap();

    let strict = ImportConfig::new::<Arsip>("ARSIP").min_columns(2);
    let report: ImportReport<Arsip> = import_workbook(&bytes, &strict).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.skipped, 1);

    let no_header = ImportConfig::new::<Arsip>("ARSIP").header_rows(0).min_columns(1);
    let report: ImportReport<Arsip> = import_workbook(&bytes, &no_header).unwrap();
    // the header row is read as data and its date labels reject it
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].row, 1);
}
