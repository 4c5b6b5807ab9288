use chrono::{Duration, NaiveDate, NaiveTime};

use crate::models::grid::SLOT_MINUTES;

use super::{ExportOptions, ExportRow};

pub(super) fn render(rows: &[ExportRow], options: &ExportOptions) -> String {
    let tzid = options.timezone.name();
    let date = options.date.format("%Y%m%d").to_string();
    let stamp = options.generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    let mut ics = String::new();
    ics.push_str("BEGIN:VCALENDAR\r\n");
    ics.push_str("VERSION:2.0\r\n");
    ics.push_str("PRODID:-//MindFrame//EN\r\n");
    ics.push_str("CALSCALE:GREGORIAN\r\n");
    ics.push_str("METHOD:PUBLISH\r\n");
    ics.push_str(&format!("X-WR-TIMEZONE:{}\r\n", tzid));

    for row in rows {
        ics.push_str("BEGIN:VEVENT\r\n");
        ics.push_str(&format!("UID:{}-{}@mindframe\r\n", row.task_id, date));
        ics.push_str(&format!("DTSTAMP:{}\r\n", stamp));
        ics.push_str(&format!(
            "DTSTART;TZID={}:{}\r\n",
            tzid,
            format_slot(options.date, row.start_index)
        ));
        ics.push_str(&format!(
            "DTEND;TZID={}:{}\r\n",
            tzid,
            format_slot(options.date, row.end_index)
        ));
        ics.push_str(&format!("SUMMARY:{}\r\n", escape_text(&row.title)));
        ics.push_str(&format!("DESCRIPTION:Priority {}\r\n", row.priority));
        ics.push_str("END:VEVENT\r\n");
    }

    ics.push_str("END:VCALENDAR\r\n");
    ics
}

/// Local date-time of a slot boundary; slot 96 rolls over to the next day.
fn format_slot(date: NaiveDate, index: u32) -> String {
    let at = date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(index * SLOT_MINUTES));
    at.format("%Y%m%dT%H%M%S").to_string()
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
