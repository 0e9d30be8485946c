//! Full-year calendar grid
//!
//! Twelve month blocks are tiled three per band, four bands deep. Each block
//! is nine columns wide and eighteen rows tall (relative to its origin):
//!
//! ```text
//! row 0      title "February 2024" (merged over three columns)
//! row 2      MINGGU SENIN SELASA RABU KAMIS JUMAT SABTU
//! row 3+2w   day numbers of week w
//! row 4+2w   event details of week w
//! ```
//!
//! Day columns start one column right of the block origin. Weeks start on
//! Sunday and every month gets six week rows.
//!
//! Event dates are compared in the anchor zone (Asia/Jakarta). An event is on
//! a day when `start_date <= day <= end_date`, and clock times are shown in
//! that zone as well. The detail cell stacks one
//! line per event, in input order; only the first event of a day can color
//! the cell (see [`FillPolicy`]).

use std::collections::HashMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use itsreport_core::time::{anchor_date, anchor_offset};
use itsreport_core::{
    BorderEdge, BorderSet, CalendarConfig, CalendarEvent, CellValue, Color, FillPolicy,
    ReportError, ResourceMap, StyleDescriptor,
};
use tracing::{debug, warn};

use crate::registry::{StyleHandle, StyleRegistry};
use crate::sheet::Sheet;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Weekday header labels, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = ["MINGGU", "SENIN", "SELASA", "RABU", "KAMIS", "JUMAT", "SABTU"];

/// Week rows per month block
pub const MAX_WEEKS: u32 = 6;

const MONTHS_PER_BAND: usize = 3;
const BAND_ROWS: u32 = 18;
const BLOCK_COLS: u16 = 9;
const TITLE_SPAN: u16 = 3;

const TITLE_HEIGHT: f64 = 45.0;
const HEADER_HEIGHT: f64 = 22.0;
const DETAIL_HEIGHT: f64 = 30.0;
const DAY_WIDTH: f64 = 15.0;

const ACCENT: Color = Color::rgb(0x1F7F3B);
const HEADER_FILL: Color = Color::rgb(0xE6F4EA);
const GRID_LINE: Color = Color::rgb(0xDADEE0);

// ============================================================================
// Gregorian Arithmetic
// ============================================================================

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Weekday of the first of `month` (1-12), 0 = Sunday
pub fn first_weekday(year: i32, month: u32) -> u32 {
    const OFFSETS: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year - 1 } else { year };
    let m = (month.clamp(1, 12) - 1) as usize;
    (y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + OFFSETS[m] + 1).rem_euclid(7)
        as u32
}

// ============================================================================
// Event Index
// ============================================================================

/// An event with its instants resolved
struct ResolvedEvent<'a> {
    title: &'a str,
    color: &'a str,
    all_day: bool,
    resource: Option<u32>,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    start_date: NaiveDate,
}

/// Events bucketed by the days they cover within one year
struct EventIndex<'a> {
    events: Vec<ResolvedEvent<'a>>,
    by_day: HashMap<NaiveDate, Vec<usize>>,
}

impl<'a> EventIndex<'a> {
    fn empty() -> Self {
        Self {
            events: Vec::new(),
            by_day: HashMap::new(),
        }
    }

    /// Resolve and bucket events; unparseable events are logged and skipped
    fn build<E: CalendarEvent>(events: &'a [E], year: i32, zone: &FixedOffset) -> Self {
        let mut index = Self::empty();
        let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            return index;
        };

        for (position, event) in events.iter().enumerate() {
            let (start, end) = match (event.start(), event.end()) {
                (Ok(start), Ok(end)) => (start, end),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(event = position, title = event.title(), error = %e, "skipping calendar event");
                    continue;
                }
            };
            let start_date = anchor_date(&start, zone);
            let end_date = anchor_date(&end, zone).max(start_date);

            let id = index.events.len();
            index.events.push(ResolvedEvent {
                title: event.title(),
                color: event.color(),
                all_day: event.all_day(),
                resource: event.resource_id(),
                start: start.with_timezone(zone),
                end: end.with_timezone(zone),
                start_date,
            });

            let mut day = start_date.max(first);
            let stop = end_date.min(last);
            while day <= stop {
                index.by_day.entry(day).or_default().push(id);
                match day.succ_opt() {
                    Some(next) => day = next,
                    None => break,
                }
            }
        }
        index
    }

    fn on(&self, day: NaiveDate) -> impl Iterator<Item = &ResolvedEvent<'a>> {
        self.by_day
            .get(&day)
            .into_iter()
            .flatten()
            .map(move |id| &self.events[*id])
    }
}

// ============================================================================
// Styles
// ============================================================================

struct CalendarStyles {
    title: StyleHandle,
    header: StyleHandle,
    date_row: StyleHandle,
    blank: StyleHandle,
}

impl CalendarStyles {
    fn register(registry: &mut StyleRegistry) -> Result<Self, ReportError> {
        let title = StyleDescriptor::new()
            .font_color(ACCENT)
            .bold()
            .font_size(22)
            .font_family("Arial");
        let header = StyleDescriptor::new()
            .font_color(ACCENT)
            .font_size(10)
            .bold()
            .font_family("Arial")
            .fill(HEADER_FILL)
            .centered()
            .borders(BorderSet {
                top: Some(BorderEdge::medium(ACCENT)),
                ..BorderSet::default()
            });
        let date_row = StyleDescriptor::new().borders(BorderSet {
            top: Some(BorderEdge::thin(GRID_LINE)),
            left: Some(BorderEdge::thin(GRID_LINE)),
            right: Some(BorderEdge::thin(GRID_LINE)),
            bottom: None,
        });
        let blank = StyleDescriptor::new()
            .borders(BorderSet {
                left: Some(BorderEdge::thin(GRID_LINE)),
                right: Some(BorderEdge::thin(GRID_LINE)),
                bottom: Some(BorderEdge::thin(GRID_LINE)),
                top: None,
            })
            .font_size(9)
            .wrap();

        Ok(Self {
            title: registry.register(&title)?,
            header: registry.register(&header)?,
            date_row: registry.register(&date_row)?,
            blank: registry.register(&blank)?,
        })
    }
}

/// Style of a detail cell colored by an event
pub fn event_fill(color: Color) -> StyleDescriptor {
    StyleDescriptor::new()
        .fill(color)
        .font_size(11)
        .font_color(Color::WHITE)
        .bold()
        .wrap()
        .borders(BorderSet::all(BorderEdge::thin(GRID_LINE)))
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the twelve-month grid of `config.year` into `sheet`
pub fn render_calendar<E: CalendarEvent>(
    config: &CalendarConfig<E>,
    sheet: &mut Sheet,
    registry: &mut StyleRegistry,
) -> Result<(), ReportError> {
    let index = match anchor_offset() {
        Ok(zone) => EventIndex::build(&config.events, config.year, &zone),
        Err(e) => {
            warn!(error = %e, "rendering calendar without events");
            EventIndex::empty()
        }
    };
    let styles = CalendarStyles::register(registry)?;

    for month_index in 0..MONTH_NAMES.len() {
        let band = (month_index / MONTHS_PER_BAND) as u32;
        let slot = (month_index % MONTHS_PER_BAND) as u16;
        let origin_row = config
            .row_offset
            .checked_add(band * BAND_ROWS)
            .ok_or(ReportError::CellAddress {
                row: u32::MAX,
                col: u32::from(config.col_offset),
            })?;
        let origin_col = config
            .col_offset
            .checked_add(slot * BLOCK_COLS)
            .ok_or(ReportError::CellAddress {
                row: origin_row,
                col: u32::from(config.col_offset) + u32::from(slot * BLOCK_COLS),
            })?;

        let mut month = MonthBlock {
            sheet: &mut *sheet,
            registry: &mut *registry,
            styles: &styles,
            index: &index,
            config,
            year: config.year,
            month: month_index as u32 + 1,
            origin_row,
            origin_col,
        };
        month.render()?;
    }

    sheet.hide_gridlines();
    debug!(
        sheet = sheet.name(),
        year = config.year,
        events = index.events.len(),
        "rendered calendar"
    );
    Ok(())
}

struct MonthBlock<'s, 'i, 'e, E> {
    sheet: &'s mut Sheet,
    registry: &'s mut StyleRegistry,
    styles: &'s CalendarStyles,
    index: &'i EventIndex<'e>,
    config: &'s CalendarConfig<E>,
    year: i32,
    month: u32,
    origin_row: u32,
    origin_col: u16,
}

impl<E: CalendarEvent> MonthBlock<'_, '_, '_, E> {
    fn day_col(&self, weekday: u32) -> u16 {
        self.origin_col + 1 + weekday as u16
    }

    fn date_row(&self, week: u32) -> u32 {
        self.origin_row + 3 + 2 * week
    }

    fn render(&mut self) -> Result<(), ReportError> {
        self.write_frame()?;
        self.write_days()?;
        self.style_unpainted_details()
    }

    /// Title, weekday header, date-row borders, dimensions
    fn write_frame(&mut self) -> Result<(), ReportError> {
        let (row, first) = (self.origin_row, self.day_col(0));
        let last = self.day_col(6);
        let title = format!("{} {}", MONTH_NAMES[self.month as usize - 1], self.year);

        self.sheet
            .write_styled(row, first, title.into(), self.styles.title)?;
        self.sheet
            .set_style_range(row, first, row, first + TITLE_SPAN - 1, self.styles.title)?;
        self.sheet.merge(row, first, row, first + TITLE_SPAN - 1)?;
        self.sheet.set_row_height(row, TITLE_HEIGHT)?;

        let header_row = row + 2;
        for (weekday, name) in WEEKDAY_NAMES.iter().enumerate() {
            self.sheet.write_styled(
                header_row,
                self.day_col(weekday as u32),
                (*name).into(),
                self.styles.header,
            )?;
        }
        self.sheet.set_row_height(header_row, HEADER_HEIGHT)?;

        for week in 0..MAX_WEEKS {
            let date_row = self.date_row(week);
            self.sheet
                .set_style_range(date_row, first, date_row, last, self.styles.date_row)?;
            self.sheet.set_row_height(date_row + 1, DETAIL_HEIGHT)?;
        }
        for col in first..=last {
            self.sheet.set_column_width(col, DAY_WIDTH)?;
        }
        Ok(())
    }

    fn write_days(&mut self) -> Result<(), ReportError> {
        let offset = first_weekday(self.year, self.month);
        let count = days_in_month(self.year, self.month);
        for day in 1..=count {
            let slot = offset + day - 1;
            let (week, weekday) = (slot / 7, slot % 7);
            let Some(date) = NaiveDate::from_ymd_opt(self.year, self.month, day) else {
                continue;
            };
            self.write_day(date, self.date_row(week), self.day_col(weekday))?;
        }
        Ok(())
    }

    fn write_day(&mut self, date: NaiveDate, date_row: u32, col: u16) -> Result<(), ReportError> {
        let (index, config) = (self.index, self.config);
        let day = date.day();
        let mut lines: Vec<String> = Vec::new();
        let mut names: Vec<&str> = Vec::new();

        for event in index.on(date) {
            let line = if event.all_day {
                format!("{}\nAllDay", event.title)
            } else if config.use_resource {
                if let Some(name) = resource_name(&config.resources, event.resource) {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
                event.title.to_string()
            } else {
                format!(
                    "{}\n{} - {}",
                    event.title,
                    event.start.format("%H:%M"),
                    event.end.format("%H:%M")
                )
            };
            lines.push(line);
        }

        let date_value = if names.is_empty() {
            CellValue::from(day)
        } else {
            CellValue::Text(format!("{} {}", day, names.join(", ")))
        };
        self.sheet.write(date_row, col, date_value)?;

        if !lines.is_empty() {
            self.sheet
                .write(date_row + 1, col, CellValue::Text(lines.join("\n")))?;
        }

        if let Some(first) = index.on(date).next() {
            self.paint(first, date, date_row + 1, col)?;
        }
        Ok(())
    }

    /// Color the detail cell with the day's first event, when it qualifies
    fn paint(
        &mut self,
        event: &ResolvedEvent<'_>,
        date: NaiveDate,
        row: u32,
        col: u16,
    ) -> Result<(), ReportError> {
        if event.title.is_empty() {
            return Ok(());
        }
        if self.config.fill_policy == FillPolicy::FirstEventStartDay && date != event.start_date {
            return Ok(());
        }
        match Color::from_hex(event.color) {
            Ok(color) => {
                let handle = self.registry.register(&event_fill(color))?;
                self.sheet.set_style(row, col, handle)
            }
            Err(e) => {
                warn!(title = event.title, %date, error = %e, "leaving event cell uncolored");
                Ok(())
            }
        }
    }

    /// Give every detail cell nobody painted the plain bordered style
    fn style_unpainted_details(&mut self) -> Result<(), ReportError> {
        for week in 0..MAX_WEEKS {
            let row = self.date_row(week) + 1;
            for weekday in 0..7 {
                let col = self.day_col(weekday);
                if self.sheet.style(row, col).is_none() {
                    self.sheet.set_style(row, col, self.styles.blank)?;
                }
            }
        }
        Ok(())
    }
}

fn resource_name(resources: &ResourceMap, id: Option<u32>) -> Option<&str> {
    id.and_then(|id| resources.get(&id))
        .map(String::as_str)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use itsreport_core::EventTimeError;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Debug, Default)]
    struct Ev {
        title: &'static str,
        start: &'static str,
        end: &'static str,
        color: &'static str,
        all_day: bool,
        resource: Option<u32>,
    }

    impl CalendarEvent for Ev {
        fn title(&self) -> &str {
            self.title
        }

        fn start(&self) -> Result<DateTime<FixedOffset>, EventTimeError> {
            itsreport_core::parse_instant(self.start, "start")
        }

        fn end(&self) -> Result<DateTime<FixedOffset>, EventTimeError> {
            itsreport_core::parse_instant(self.end, "end")
        }

        fn color(&self) -> &str {
            self.color
        }

        fn all_day(&self) -> bool {
            self.all_day
        }

        fn resource_id(&self) -> Option<u32> {
            self.resource
        }
    }

    fn render(config: &CalendarConfig<Ev>) -> (Sheet, StyleRegistry) {
        let mut sheet = Sheet::new(config.sheet_name.as_str()).unwrap();
        let mut registry = StyleRegistry::new();
        render_calendar(config, &mut sheet, &mut registry).unwrap();
        (sheet, registry)
    }

    /// (date row, column) of a day in the default tiling
    fn day_cell(year: i32, month: u32, day: u32) -> (u32, u16) {
        let i = month - 1;
        let slot = first_weekday(year, month) + day - 1;
        let row = (i / 3) * BAND_ROWS + 3 + 2 * (slot / 7);
        let col = (i % 3) as u16 * BLOCK_COLS + 1 + (slot % 7) as u16;
        (row, col)
    }

    #[test]
    fn month_lengths_match_chrono() {
        for year in [1900, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
                };
                assert_eq!(days_in_month(year, month) as i64, (next - first).num_days());
                assert_eq!(
                    first_weekday(year, month),
                    first.weekday().num_days_from_sunday(),
                    "{}-{}",
                    year,
                    month
                );
            }
        }
    }

    #[test]
    fn february_2024_starts_thursday() {
        assert_eq!(first_weekday(2024, 2), Weekday::Thu.num_days_from_sunday());
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn every_day_of_the_year_is_written_once() {
        let config = CalendarConfig::new("CAL", "cal", Vec::<Ev>::new());
        let (sheet, _) = render(&config);
        for month in 1..=12 {
            for day in 1..=days_in_month(2024, month) {
                let (row, col) = day_cell(2024, month, day);
                assert_eq!(sheet.value(row, col), Some(&CellValue::from(day)));
            }
        }
        let numbers = sheet
            .cells()
            .filter(|(_, c)| c.value.as_number().is_some())
            .count();
        assert_eq!(numbers, 366);
    }

    #[test]
    fn titles_headers_and_dimensions() {
        let config = CalendarConfig::new("CAL", "cal", Vec::<Ev>::new());
        let (sheet, _) = render(&config);

        assert_eq!(sheet.value(0, 1), Some(&CellValue::from("January 2024")));
        assert_eq!(sheet.value(0, 10), Some(&CellValue::from("February 2024")));
        assert_eq!(sheet.value(18, 1), Some(&CellValue::from("April 2024")));
        assert_eq!(sheet.value(54, 19), Some(&CellValue::from("December 2024")));
        assert_eq!(sheet.value(2, 1), Some(&CellValue::from("MINGGU")));
        assert_eq!(sheet.value(2, 7), Some(&CellValue::from("SABTU")));
        assert_eq!(sheet.merges().len(), 12);
        assert_eq!(sheet.row_height(0), Some(TITLE_HEIGHT));
        assert_eq!(sheet.row_height(2), Some(HEADER_HEIGHT));
        assert_eq!(sheet.row_height(4), Some(DETAIL_HEIGHT));
        assert_eq!(sheet.row_height(14), Some(DETAIL_HEIGHT));
        assert_eq!(sheet.column_width(1), Some(DAY_WIDTH));
        assert_eq!(sheet.column_width(0), None);
        assert!(sheet.gridlines_hidden());
    }

    #[test]
    fn offsets_shift_the_grid() {
        let config = CalendarConfig::new("CAL", "cal", Vec::<Ev>::new()).offsets(2, 1);
        let (sheet, _) = render(&config);
        assert_eq!(sheet.value(2, 2), Some(&CellValue::from("January 2024")));
        assert_eq!(sheet.value(2, 11), Some(&CellValue::from("February 2024")));
    }

    #[test]
    fn timed_events_stack_and_first_wins_color() {
        let events = vec![
            Ev {
                title: "Standup",
                start: "2024-03-05 09:00:00",
                end: "2024-03-05 09:30:00",
                color: "#0275D8",
                ..Ev::default()
            },
            Ev {
                title: "Review",
                start: "2024-03-05T14:00:00+07:00",
                end: "2024-03-05T15:00:00+07:00",
                color: "#D9534F",
                ..Ev::default()
            },
        ];
        let config = CalendarConfig::new("CAL", "cal", events);
        let (sheet, registry) = render(&config);
        let (row, col) = day_cell(2024, 3, 5);

        assert_eq!(
            sheet.value(row + 1, col),
            Some(&CellValue::from("Standup\n09:00 - 09:30\nReview\n14:00 - 15:00"))
        );
        let style = registry.get(sheet.style(row + 1, col)).unwrap();
        assert_eq!(style, &event_fill(Color::rgb(0x0275D8)));
    }

    #[test]
    fn times_display_in_anchor_zone() {
        let events = vec![Ev {
            title: "Call",
            start: "2024-06-03T02:00:00Z",
            end: "2024-06-03T03:15:00Z",
            color: "#123456",
            ..Ev::default()
        }];
        let config = CalendarConfig::new("CAL", "cal", events);
        let (sheet, _) = render(&config);
        let (row, col) = day_cell(2024, 6, 3);
        assert_eq!(
            sheet.value(row + 1, col),
            Some(&CellValue::from("Call\n09:00 - 10:15"))
        );
    }

    #[test]
    fn untitled_first_event_does_not_paint() {
        let events = vec![
            Ev {
                title: "",
                start: "2024-01-08",
                end: "2024-01-08",
                color: "#FF0000",
                all_day: true,
                ..Ev::default()
            },
            Ev {
                title: "Later",
                start: "2024-01-08",
                end: "2024-01-08",
                color: "#00FF00",
                all_day: true,
                ..Ev::default()
            },
        ];
        let config = CalendarConfig::new("CAL", "cal", events);
        let (sheet, registry) = render(&config);
        let (row, col) = day_cell(2024, 1, 8);
        let style = registry.get(sheet.style(row + 1, col)).unwrap();
        assert_eq!(style.fill, None);
        assert_eq!(style.font.as_ref().and_then(|f| f.size), Some(9));
    }

    #[test]
    fn every_day_policy_paints_whole_span() {
        let events = vec![Ev {
            title: "Cuti",
            start: "2024-02-10",
            end: "2024-02-12",
            color: "#FF0000",
            all_day: true,
            ..Ev::default()
        }];
        let config =
            CalendarConfig::new("CAL", "cal", events).fill_policy(FillPolicy::FirstEventEveryDay);
        let (sheet, registry) = render(&config);
        for day in 10..=12 {
            let (row, col) = day_cell(2024, 2, day);
            let style = registry.get(sheet.style(row + 1, col)).unwrap();
            assert_eq!(style.fill, Some(Color::rgb(0xFF0000)));
        }
    }

    #[test]
    fn invalid_color_leaves_blank_style() {
        let events = vec![Ev {
            title: "Oops",
            start: "2024-04-02",
            end: "2024-04-02",
            color: "purple",
            all_day: true,
            ..Ev::default()
        }];
        let config = CalendarConfig::new("CAL", "cal", events);
        let (sheet, registry) = render(&config);
        let (row, col) = day_cell(2024, 4, 2);
        assert_eq!(sheet.value(row + 1, col), Some(&CellValue::from("Oops\nAllDay")));
        assert_eq!(registry.get(sheet.style(row + 1, col)).unwrap().fill, None);
    }

    #[test]
    fn unparseable_event_is_skipped() {
        let events = vec![
            Ev {
                title: "Broken",
                start: "someday",
                end: "2024-01-02",
                ..Ev::default()
            },
            Ev {
                title: "Fine",
                start: "2024-01-02",
                end: "2024-01-02",
                color: "#FF0000",
                all_day: true,
                ..Ev::default()
            },
        ];
        let config = CalendarConfig::new("CAL", "cal", events);
        let (sheet, _) = render(&config);
        let (row, col) = day_cell(2024, 1, 2);
        assert_eq!(sheet.value(row + 1, col), Some(&CellValue::from("Fine\nAllDay")));
    }

    #[test]
    fn events_outside_the_year_are_ignored() {
        let events = vec![Ev {
            title: "New Year",
            start: "2023-12-31",
            end: "2024-01-01",
            color: "#FF0000",
            all_day: true,
            ..Ev::default()
        }];
        let config = CalendarConfig::new("CAL", "cal", events);
        let (sheet, registry) = render(&config);
        let (row, col) = day_cell(2024, 1, 1);
        assert_eq!(sheet.value(row + 1, col), Some(&CellValue::from("New Year\nAllDay")));
        // started in 2023, so Jan 1 is not its start day
        assert_eq!(registry.get(sheet.style(row + 1, col)).unwrap().fill, None);
    }

    #[test]
    fn resource_mode_lists_distinct_names() {
        let events = vec![
            Ev {
                title: "Deploy",
                start: "2024-05-06 08:00:00",
                end: "2024-05-06 17:00:00",
                color: "#5CB85C",
                resource: Some(1),
                ..Ev::default()
            },
            Ev {
                title: "Patch",
                start: "2024-05-06 10:00:00",
                end: "2024-05-07 12:00:00",
                color: "#F0AD4E",
                resource: Some(2),
                ..Ev::default()
            },
            Ev {
                title: "Verify",
                start: "2024-05-06 13:00:00",
                end: "2024-05-06 14:00:00",
                color: "#F0AD4E",
                resource: Some(1),
                ..Ev::default()
            },
        ];
        let mut resources = ResourceMap::new();
        resources.insert(1, "Andi".to_string());
        resources.insert(2, "Sari".to_string());
        let config = CalendarConfig::new("CAL", "cal", events).with_resources(resources);
        let (sheet, _) = render(&config);

        let (row, col) = day_cell(2024, 5, 6);
        assert_eq!(sheet.value(row, col), Some(&CellValue::from("6 Andi, Sari")));
        assert_eq!(
            sheet.value(row + 1, col),
            Some(&CellValue::from("Deploy\nPatch\nVerify"))
        );

        let (row, col) = day_cell(2024, 5, 7);
        assert_eq!(sheet.value(row, col), Some(&CellValue::from("7 Sari")));
    }

    #[test]
    fn unknown_resource_keeps_day_number() {
        let events = vec![Ev {
            title: "Orphan",
            start: "2024-05-08 08:00:00",
            end: "2024-05-08 09:00:00",
            color: "#5CB85C",
            resource: Some(99),
            ..Ev::default()
        }];
        let config = CalendarConfig::new("CAL", "cal", events).with_resources(ResourceMap::new());
        let (sheet, _) = render(&config);
        let (row, col) = day_cell(2024, 5, 8);
        assert_eq!(sheet.value(row, col), Some(&CellValue::from(8u32)));
        assert_eq!(sheet.value(row + 1, col), Some(&CellValue::from("Orphan")));
    }

    #[test]
    fn configured_year_changes_titles() {
        let config = CalendarConfig::new("CAL", "cal", Vec::<Ev>::new()).year(2025);
        let (sheet, _) = render(&config);
        assert_eq!(sheet.value(0, 1), Some(&CellValue::from("January 2025")));
        let (row, col) = day_cell(2025, 2, 28);
        assert_eq!(sheet.value(row, col), Some(&CellValue::from(28u32)));
        let (row, col) = day_cell(2025, 3, 1);
        assert_eq!(sheet.value(row, col), Some(&CellValue::from(1u32)));
    }
}
