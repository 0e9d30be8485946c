//! Calendar entities: agenda entries, timeline entries and their resources

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{parse_instant, CalendarEvent, EventTimeError, ResourceMap};

/// An agenda entry (room booking, leave, meeting schedule)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgendaEvent {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "allDay", default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub status: Option<String>,
}

pub type BookingRapat = AgendaEvent;
pub type JadwalCuti = AgendaEvent;
pub type JadwalRapat = AgendaEvent;

impl CalendarEvent for AgendaEvent {
    fn title(&self) -> &str {
        &self.title
    }

    fn start(&self) -> Result<DateTime<FixedOffset>, EventTimeError> {
        parse_instant(&self.start, "start")
    }

    fn end(&self) -> Result<DateTime<FixedOffset>, EventTimeError> {
        parse_instant(&self.end, "end")
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn all_day(&self) -> bool {
        self.all_day
    }
}

/// A timed entry on a resource timeline
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(default)]
    pub id: u32,
    pub start: String,
    pub end: String,
    /// Owning resource; 0 means none
    #[serde(rename = "resourceId", default)]
    pub resource_id: u32,
    pub title: String,
    #[serde(rename = "bgColor", default)]
    pub bg_color: String,
}

pub type TimelineDesktop = TimelineEntry;
pub type TimelineProject = TimelineEntry;

impl CalendarEvent for TimelineEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn start(&self) -> Result<DateTime<FixedOffset>, EventTimeError> {
        parse_instant(&self.start, "start")
    }

    fn end(&self) -> Result<DateTime<FixedOffset>, EventTimeError> {
        parse_instant(&self.end, "end")
    }

    fn color(&self) -> &str {
        &self.bg_color
    }

    fn all_day(&self) -> bool {
        false
    }

    fn resource_id(&self) -> Option<u32> {
        (self.resource_id != 0).then_some(self.resource_id)
    }
}

/// A timeline resource (team member, workstream)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<u32>,
}

/// Timeline dump: entries plus the resources they reference
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    #[serde(default)]
    pub events: Vec<TimelineEntry>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl TimelineData {
    pub fn resource_map(&self) -> ResourceMap {
        self.resources
            .iter()
            .map(|r| (r.id, r.name.clone()))
            .collect()
    }
}
