//! Catalog entities deserialized from service dumps

use itsreport_core::catalog::{
    Arsip, Letter, Meeting, Memo, Perdin, Project, SuratKeluar, SuratMasuk, TimelineData,
};
use itsreport_core::{CalendarEvent, CellValue, ColumnDef, ExportConfig, ExportRecord};
use pretty_assertions::assert_eq;

/// Every record of the dump yields exactly one value per column
fn assert_fits<R: ExportRecord + serde::de::DeserializeOwned>(columns: Vec<ColumnDef>, json: &str) {
    let records: Vec<R> = serde_json::from_str(json).unwrap();
    assert!(!records.is_empty());
    let config = ExportConfig::new("S", columns, records).strict();
    config.validate().unwrap();
}

#[test]
fn every_tabular_entity_fills_its_columns() {
    assert_fits::<Letter>(
        Letter::columns(),
        r#"[{"tanggal": "2024-01-02", "no_surat": "1/ITS-SAG", "perihal": "p", "pic": "x"}]"#,
    );
    assert_fits::<Memo>(Memo::columns(), r#"[{"no_memo": "2/ITS-ISO"}]"#);
    assert_fits::<Perdin>(Perdin::columns(), r#"[{"no_perdin": "3", "hotel": "Grand"}]"#);
    assert_fits::<Arsip>(Arsip::columns(), r#"[{"no_arsip": "A-1", "tanggal_dokumen": null}]"#);
    assert_fits::<SuratMasuk>(SuratMasuk::columns(), r#"[{}]"#);
    assert_fits::<SuratKeluar>(SuratKeluar::columns(), r#"[{}]"#);
    assert_fits::<Meeting>(Meeting::columns(), r#"[{"task": "Backup", "status": "Done"}]"#);
    assert_fits::<Project>(Project::columns(), r#"[{"kode_project": "P-9", "bulan": "03/24"}]"#);
}

#[test]
fn letter_dump_to_values() {
    let letters: Vec<Letter> = serde_json::from_str(
        r#"[{"id": 4, "tanggal": "2024-03-01T00:00:00+07:00", "no_surat": "010/ITS-SAG/III/2024",
             "perihal": "Undangan", "pic": null, "create_by": "admin"}]"#,
    )
    .unwrap();
    let letter = &letters[0];
    assert_eq!(
        letter.values(),
        vec![
            CellValue::from("2024-03-01"),
            CellValue::from("010/ITS-SAG/III/2024"),
            CellValue::from("Undangan"),
            CellValue::Empty,
        ]
    );
    assert_eq!(letter.category(), "SAG");
}

#[test]
fn project_month_and_budget() {
    let projects: Vec<Project> = serde_json::from_str(
        r#"[{"kode_project": "PRJ/ITS-ISO/01", "bulan": "2024-03-15", "anggaran": "75000000"}]"#,
    )
    .unwrap();
    let values = projects[0].values();
    assert_eq!(values[4], CellValue::from("03/24"));
    assert_eq!(values[6], CellValue::Number(75_000_000.0));
    assert_eq!(projects[0].category(), "ISO");
}

#[test]
fn unparseable_date_rejects_the_dump() {
    let result: Result<Vec<Letter>, _> = serde_json::from_str(r#"[{"tanggal": "next week"}]"#);
    assert!(result.is_err());
}

#[test]
fn timeline_dump_with_resources() {
    let data: TimelineData = serde_json::from_str(
        r##"{
            "events": [
                {"id": 1, "start": "2024-05-06 08:00:00", "end": "2024-05-06 10:00:00",
                 "resourceId": 2, "title": "Deploy", "bgColor": "#5CB85C"},
                {"id": 2, "start": "2024-05-07 08:00:00", "end": "2024-05-07 09:00:00",
                 "resourceId": 0, "title": "Unassigned", "bgColor": "#F0AD4E"}
            ],
            "resources": [{"id": 2, "name": "Andi", "parent_id": null}]
        }"##,
    )
    .unwrap();

    let resources = data.resource_map();
    assert_eq!(resources.get(&2).map(String::as_str), Some("Andi"));
    assert_eq!(data.events[0].resource_id(), Some(2));
    assert_eq!(data.events[1].resource_id(), None);
    assert!(!data.events[0].all_day());
}
