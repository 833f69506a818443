//! Reading exported calendars back, using the icalendar crate's parser.

use chrono::{NaiveDateTime, NaiveTime};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{read_calendar, unfold},
};

use crate::error::{DaybookError, DaybookResult};

/// The parts of a VEVENT the exporter writes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarEntry {
    pub summary: String,
    pub start: NaiveDateTime,
    pub uid: Option<String>,
}

/// Parse every VEVENT in an ICS document into a `CalendarEntry`.
/// VEVENTs without a usable DTSTART are skipped.
pub fn read_entries(content: &str) -> DaybookResult<Vec<CalendarEntry>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded)
        .map_err(|e| DaybookError::InvalidInput(format!("Could not parse calendar: {}", e)))?;

    let entries = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(|vevent| {
            let start = to_naive(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);
            let summary = vevent
                .find_prop("SUMMARY")
                .map(|p| p.val.to_string())
                .unwrap_or_default();
            let uid = vevent.find_prop("UID").map(|p| p.val.to_string());

            Some(CalendarEntry {
                summary,
                start,
                uid,
            })
        })
        .collect();

    Ok(entries)
}

fn to_naive(dpt: DatePerhapsTime) -> NaiveDateTime {
    match dpt {
        DatePerhapsTime::Date(d) => d.and_time(NaiveTime::MIN),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Floating(naive) => naive,
            CalendarDateTime::Utc(dt) => dt.naive_utc(),
            CalendarDateTime::WithTimezone { date_time, .. } => date_time,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//daybook//daybook//EN\r\n\
BEGIN:VEVENT\r\n\
UID:event-1@daybook\r\n\
DTSTAMP:20240101T120000Z\r\n\
SUMMARY:Lunch\\, then walk\r\n\
DTSTART:20240102T120000\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:other\r\n\
SUMMARY:All day\r\n\
DTSTART;VALUE=DATE:20240103\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn test_read_entries_extracts_summary_and_start() {
        let entries = read_entries(SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].summary, "Lunch, then walk");
        assert_eq!(
            entries[0].start,
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
        assert_eq!(entries[0].uid.as_deref(), Some("event-1@daybook"));

        assert_eq!(
            entries[1].start,
            NaiveDate::from_ymd_opt(2024, 1, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_read_entries_keeps_escaped_backslash() {
        let content = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:event-9@daybook\r\n\
SUMMARY:back\\\\slash\\;semi\r\n\
DTSTART:20240102T120000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let entries = read_entries(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].summary, "back\\slash;semi");
    }
}
