//! Report catalog: which entity, data file and layout each report uses

use std::path::Path;

use itsreport_core::catalog::{
    meeting_styles, AgendaEvent, Arsip, Letter, Meeting, MeetingSchedule, Memo, Perdin, Project,
    SuratKeluar, SuratMasuk, TimelineData, TimelineEntry, ANGGARAN_COLUMN,
    SCHEDULE_STATUS_COLUMN,
};
use itsreport_core::{
    CalendarConfig, CalendarEvent, ColumnDef, ExportConfig, ExportRecord, ImportRecord,
    ReportError, SplitMode,
};
use itsreport_render::{
    import_workbook, ImportConfig, ImportReport, RejectedRow, ReportEntry, SheetExporter,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;

/// Sheet order of the combined export
pub const EXPORT_ALL_ORDER: [&str; 15] = [
    "BERITA ACARA",
    "MEMO",
    "PERDIN",
    "SK",
    "SURAT",
    "ARSIP",
    "SURAT KELUAR",
    "SURAT MASUK",
    "BOOKING RAPAT",
    "JADWAL CUTI",
    "JADWAL RAPAT",
    "MEETING",
    "TIMELINE DESKTOP",
    "PROJECT",
    "TIMELINE PROJECT",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layout {
    /// Numbered letters split SAG | ISO side by side
    Letters,
    Memo,
    Perdin,
    Arsip,
    SuratKeluar,
    SuratMasuk,
    Meeting,
    MeetingSchedule,
    Project,
    /// Agenda entries on the calendar grid
    Agenda,
    /// Timeline entries on the calendar grid, with clock times
    Timeline,
    /// Timeline entries grouped by resource
    ResourceTimeline,
}

/// One exportable report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportDef {
    /// Sheet name, also the name used on the command line
    pub name: &'static str,
    /// JSON dump the report reads, relative to the data directory
    pub data_file: &'static str,
    /// Stem of the standalone `.xlsx` file
    pub file_stem: &'static str,
    layout: Layout,
}

const fn def(name: &'static str, stem: &'static str, data_file: &'static str, layout: Layout) -> ReportDef {
    ReportDef {
        name,
        data_file,
        file_stem: stem,
        layout,
    }
}

pub static CATALOG: [ReportDef; 16] = [
    def("BERITA ACARA", "berita_acara", "berita_acara.json", Layout::Letters),
    def("MEMO", "memo", "memo.json", Layout::Memo),
    def("PERDIN", "perdin", "perdin.json", Layout::Perdin),
    def("SK", "sk", "sk.json", Layout::Letters),
    def("SURAT", "surat", "surat.json", Layout::Letters),
    def("ARSIP", "arsip", "arsip.json", Layout::Arsip),
    def("SURAT KELUAR", "surat_keluar", "surat_keluar.json", Layout::SuratKeluar),
    def("SURAT MASUK", "surat_masuk", "surat_masuk.json", Layout::SuratMasuk),
    def("BOOKING RAPAT", "booking_rapat", "booking_rapat.json", Layout::Agenda),
    def("JADWAL CUTI", "jadwal_cuti", "jadwal_cuti.json", Layout::Agenda),
    def("JADWAL RAPAT", "jadwal_rapat", "jadwal_rapat.json", Layout::Agenda),
    def("MEETING", "meeting", "meeting.json", Layout::Meeting),
    def("MEETING SCHEDULE", "meeting_schedule", "meeting_schedule.json", Layout::MeetingSchedule),
    def("TIMELINE DESKTOP", "timeline_desktop", "timeline_desktop.json", Layout::Timeline),
    def("PROJECT", "project", "project.json", Layout::Project),
    def("TIMELINE PROJECT", "timeline_project", "timeline_project.json", Layout::ResourceTimeline),
];

/// Look a report up by name
///
/// Case is ignored and `_` / `-` stand for spaces, so `jadwal-cuti` finds
/// `JADWAL CUTI`.
pub fn find(name: &str) -> Option<&'static ReportDef> {
    let wanted: String = name
        .trim()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c.to_ascii_uppercase() })
        .collect();
    CATALOG.iter().find(|def| def.name == wanted)
}

impl ReportDef {
    pub fn file_name(&self) -> String {
        format!("{}.xlsx", self.file_stem)
    }

    pub fn is_calendar(&self) -> bool {
        matches!(
            self.layout,
            Layout::Agenda | Layout::Timeline | Layout::ResourceTimeline
        )
    }

    /// Read the data file at `path` and build the report
    pub fn load(&self, path: &Path, settings: &Settings) -> Result<Box<dyn SheetExporter>, ReportError> {
        let json = std::fs::read_to_string(path)?;
        debug!(report = self.name, path = %path.display(), "loaded data");
        self.build(&json, settings)
    }

    /// Build the report from a JSON dump
    pub fn build(&self, json: &str, settings: &Settings) -> Result<Box<dyn SheetExporter>, ReportError> {
        match self.layout {
            Layout::Letters => self.table(Letter::columns(), self.rows::<Letter>(json)?, settings, true),
            Layout::Memo => self.table(Memo::columns(), self.rows::<Memo>(json)?, settings, true),
            Layout::Perdin => self.table(Perdin::columns(), self.rows::<Perdin>(json)?, settings, true),
            Layout::Arsip => self.table(Arsip::columns(), self.rows::<Arsip>(json)?, settings, false),
            Layout::SuratKeluar => {
                self.table(SuratKeluar::columns(), self.rows::<SuratKeluar>(json)?, settings, false)
            }
            Layout::SuratMasuk => {
                self.table(SuratMasuk::columns(), self.rows::<SuratMasuk>(json)?, settings, false)
            }
            Layout::Meeting => {
                let config = ExportConfig::new(self.name, Meeting::columns(), self.rows::<Meeting>(json)?)
                    .styles(meeting_styles())
                    .status(Meeting::status_of);
                Ok(Box::new(config))
            }
            Layout::MeetingSchedule => {
                let records = self.rows::<MeetingSchedule>(json)?;
                let config = ExportConfig::new(self.name, MeetingSchedule::columns(), records)
                    .styles(meeting_styles())
                    .status(MeetingSchedule::status_of)
                    .status_column(SCHEDULE_STATUS_COLUMN);
                Ok(Box::new(config))
            }
            Layout::Project => {
                let config = ExportConfig::new(self.name, Project::columns(), self.rows::<Project>(json)?)
                    .split(SplitMode::Horizontal)
                    .categories(settings.split.clone())
                    .styles(Project::styles())
                    .amount_column(ANGGARAN_COLUMN);
                Ok(Box::new(config))
            }
            Layout::Agenda => self.calendar(self.rows::<AgendaEvent>(json)?, settings),
            Layout::Timeline => self.calendar(self.rows::<TimelineEntry>(json)?, settings),
            Layout::ResourceTimeline => {
                let data: TimelineData = self.parse(json)?;
                let resources = data.resource_map();
                let config = self
                    .calendar_config(data.events, settings)
                    .with_resources(resources);
                Ok(Box::new(config))
            }
        }
    }

    fn parse<T: DeserializeOwned>(&self, json: &str) -> Result<T, ReportError> {
        serde_json::from_str(json)
            .map_err(|e| ReportError::InvalidData(format!("{}: {}", self.data_file, e)))
    }

    fn rows<T: DeserializeOwned>(&self, json: &str) -> Result<Vec<T>, ReportError> {
        self.parse(json)
    }

    fn table<R: ExportRecord + 'static>(
        &self,
        columns: Vec<ColumnDef>,
        records: Vec<R>,
        settings: &Settings,
        split: bool,
    ) -> Result<Box<dyn SheetExporter>, ReportError> {
        let mut config = ExportConfig::new(self.name, columns, records);
        if split {
            config = config
                .split(SplitMode::Vertical)
                .categories(settings.split.clone());
        }
        Ok(Box::new(config))
    }

    fn calendar_config<E: CalendarEvent>(&self, events: Vec<E>, settings: &Settings) -> CalendarConfig<E> {
        CalendarConfig::new(self.name, self.file_stem, events)
            .year(settings.calendar.year)
            .fill_policy(settings.calendar.fill_policy)
    }

    fn calendar<E: CalendarEvent + 'static>(
        &self,
        events: Vec<E>,
        settings: &Settings,
    ) -> Result<Box<dyn SheetExporter>, ReportError> {
        Ok(Box::new(self.calendar_config(events, settings)))
    }

    /// Read this report's sheet from `.xlsx` bytes into a JSON row dump
    pub fn import(&self, bytes: &[u8]) -> Result<Imported, ReportError> {
        match self.layout {
            Layout::Letters => self.import_split::<Letter>(bytes, Letter::columns().len()),
            Layout::Memo => self.import_split::<Memo>(bytes, Memo::columns().len()),
            Layout::Perdin => self.import_split::<Perdin>(bytes, Perdin::columns().len()),
            Layout::Arsip => self.import_plain::<Arsip>(bytes),
            Layout::SuratKeluar => self.import_plain::<SuratKeluar>(bytes),
            Layout::SuratMasuk => self.import_plain::<SuratMasuk>(bytes),
            Layout::Meeting => self.import_plain::<Meeting>(bytes),
            Layout::MeetingSchedule => self.import_plain::<MeetingSchedule>(bytes),
            // separator rows hold a single label and fall under the minimum
            Layout::Project => self.import_plain::<Project>(bytes),
            Layout::Agenda | Layout::Timeline | Layout::ResourceTimeline => Err(
                ReportError::InvalidData(format!("{} is a calendar and cannot be imported", self.name)),
            ),
        }
    }

    fn import_plain<R: ImportRecord + Serialize>(&self, bytes: &[u8]) -> Result<Imported, ReportError> {
        imported(import_workbook::<R>(bytes, &ImportConfig::new::<R>(self.name))?)
    }

    fn import_split<R: ImportRecord + Serialize>(
        &self,
        bytes: &[u8],
        width: usize,
    ) -> Result<Imported, ReportError> {
        let config = ImportConfig::new::<R>(self.name).side_by_side(width);
        imported(import_workbook::<R>(bytes, &config)?)
    }

    /// Combined-export entry that reads `data_dir/<data_file>` when run
    pub fn entry(&'static self, data_dir: &Path, settings: &Settings) -> ReportEntry {
        let path = data_dir.join(self.data_file);
        let settings = settings.clone();
        ReportEntry::new(self.name, move || self.load(&path, &settings))
    }
}

/// Rows read back from a report sheet
#[derive(Debug)]
pub struct Imported {
    /// Records as a JSON array, the shape `export` reads
    pub json: String,
    pub records: usize,
    pub skipped: usize,
    pub rejected: Vec<RejectedRow>,
}

fn imported<R: Serialize>(report: ImportReport<R>) -> Result<Imported, ReportError> {
    let json = serde_json::to_string_pretty(&report.records)
        .map_err(|e| ReportError::InvalidData(e.to_string()))?;
    Ok(Imported {
        json,
        records: report.records.len(),
        skipped: report.skipped,
        rejected: report.rejected,
    })
}

/// Resolve the configured combined-export order against the catalog
pub fn export_all_entries(
    names: &[String],
    data_dir: &Path,
    settings: &Settings,
) -> Result<Vec<ReportEntry>, ReportError> {
    names
        .iter()
        .map(|name| {
            find(name)
                .map(|def| def.entry(data_dir, settings))
                .ok_or_else(|| ReportError::InvalidData(format!("unknown report '{}'", name)))
        })
        .collect()
}
