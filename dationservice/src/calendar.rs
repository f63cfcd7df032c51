//! iCalendar (RFC 5545) export of a student's schedule

use crate::models::{AgendaItem, Schedule};
use chrono::{DateTime, TimeZone, Utc};

/// Default `PRODID` of the generated calendars
pub const DEFAULT_PRODID: &str = "-//Dation ICS feed//loriancoltof.nl//";

/// MIME type of the generated document
pub const CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

/// Maximum line length in octets, line break excluded
const MAX_LINE_OCTETS: usize = 75;

/// Render `schedule` as an iCalendar document
///
/// One `VEVENT` per agenda item, in schedule order. Times are written in
/// UTC; `stamp` is used as `DTSTAMP` of every event.
pub fn render_calendar<Tz: TimeZone>(
    schedule: &Schedule,
    prodid: &str,
    stamp: &DateTime<Tz>,
) -> String {
    let location = schedule.address.one_line();
    let stamp = format_utc(stamp);

    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_property(&mut out, "PRODID", prodid);
    push_line(&mut out, "VERSION:2.0");
    for item in &schedule.items {
        push_event(&mut out, item, &location, &stamp);
    }
    push_line(&mut out, "END:VCALENDAR");
    out
}

fn push_event(out: &mut String, item: &AgendaItem, location: &str, stamp: &str) {
    let description = format!(
        "Instructeur: {}\nPakket: {} ({})",
        item.instructor, item.course_info.type_name, item.course_info.category
    );

    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}", event_uid(item)));
    push_property(out, "SUMMARY", &item.name);
    push_line(out, &format!("DTSTART:{}", format_utc(&item.start_time)));
    push_line(out, &format!("DTEND:{}", format_utc(&item.stop_time)));
    push_line(out, &format!("DTSTAMP:{}", stamp));
    push_property(out, "DESCRIPTION", &description);
    push_property(out, "LOCATION", location);
    push_line(out, "END:VEVENT");
}

/// Stable identifier of an agenda item across refreshes
pub fn event_uid(item: &AgendaItem) -> String {
    format!("{}-{}@dationics", item.course_info.id, item.id)
}

fn format_utc<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

fn push_property(out: &mut String, name: &str, text: &str) {
    push_line(out, &format!("{}:{}", name, escape_text(text)));
}

/// Escape a TEXT value (RFC 5545 §3.3.11)
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Append a content line, folded at 75 octets without splitting characters
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            // La continuation commence par une espace, comptée dans la ligne
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
}
