//! ICS file generation.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::record::Event;

/// Generate a complete VCALENDAR holding one VEVENT per event.
///
/// Each VEVENT carries only UID, DTSTAMP, SUMMARY and a floating DTSTART.
/// `stamp` becomes the DTSTAMP of every entry.
pub fn generate_calendar(events: &[Event], stamp: DateTime<Utc>) -> String {
    let mut cal = Calendar::new();
    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid());
        ics_event.summary(&event.name);
        ics_event.add_property("DTSTAMP", &dtstamp);

        // Floating datetime (no Z, no TZID)
        ics_event.add_property("DTSTART", event.time.format("%Y%m%dT%H%M%S").to_string());

        cal.push(ics_event.done());
    }

    strip_ics_bloat(&cal.done().to_string())
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:-//daybook//daybook//EN\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
