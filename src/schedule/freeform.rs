use super::models::{
    DayKey, NurseHeader, ParseIssue, RenderRow, ScheduleRecord, ShiftEntry, ShiftPeriod,
    ShiftStyle, OFF,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

lazy_static! {
    static ref HEADER: Regex = Regex::new(r"Schedule for (.+) \(ID: (.+)\)").unwrap();
    static ref DAY_LINE: Regex =
        Regex::new(r"([0-9A-Za-z_]+)\s+([0-9]{4}-[0-9]{2}-[0-9]{2})\s+([0-9A-Za-z_]+):\s*(.+)")
            .unwrap();
    static ref LABEL_VALUE: Regex = Regex::new(r"(.+?):\s*(.+)").unwrap();
}

/// Index of the first body line; line 1 is the "=====" separator
const BODY_START: usize = 2;

/// Parse the text the backend sends for "my schedule"
///
/// ```text
/// Schedule for Alice Tan (ID: N001):
/// ==================================================
/// Monday 2024-01-15 Morning: On Duty - GW
/// Monday 2024-01-15 Evening: Off
/// ```
///
/// Never fails: a bad header is left out, unmatched lines are dropped and
/// recorded as issues on the returned record.
pub fn parse_freeform_schedule(text: &str) -> ScheduleRecord {
    let mut record = ScheduleRecord::new(ShiftStyle::Full);
    let lines: Vec<&str> = text.lines().collect();

    if let Some(header_line) = lines.first() {
        match parse_header(header_line) {
            Some(header) => record.header = Some(header),
            None => {
                debug!("Schedule text has no recognizable header");
                record.issues.push(ParseIssue::MalformedHeader {
                    line: header_line.to_string(),
                });
            }
        }
    }

    for (index, raw_line) in lines.iter().enumerate().skip(BODY_START) {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if !line.contains(':') || !parse_body_line(&mut record, line) {
            record.issues.push(ParseIssue::UnmatchedLine {
                line_number: index + 1,
                line: line.to_string(),
            });
        }
    }

    let unmatched = record
        .issues
        .iter()
        .filter(|issue| matches!(issue, ParseIssue::UnmatchedLine { .. }))
        .count();
    if unmatched > 0 {
        warn!("Dropped {} schedule line(s) that did not match", unmatched);
    }

    debug!(
        "Parsed freeform schedule: {} day(s), {} note(s)",
        record.days.len(),
        record.notes.len()
    );

    record
}

/// Extract the nurse name and id from the first line
pub fn parse_header(line: &str) -> Option<NurseHeader> {
    if !line.contains("Schedule for") {
        return None;
    }

    let caps = HEADER.captures(line)?;
    Some(NurseHeader {
        nurse_name: caps[1].to_string(),
        nurse_id: caps[2].to_string(),
    })
}

/// Returns false when the line fits neither the day grammar nor the
/// label/value fallback
fn parse_body_line(record: &mut ScheduleRecord, line: &str) -> bool {
    if let Some(caps) = DAY_LINE.captures(line) {
        let key = DayKey::new(&caps[1], &caps[2]);
        let period = ShiftPeriod::parse(&caps[3]);
        let assignment = &caps[4];

        let day = record.day_mut(key);
        if assignment != OFF {
            day.shifts.push(ShiftEntry::new(period, assignment));
        }
        return true;
    }

    // Lines from older backends, e.g. "Monday (2024-01-15): Morning: GW"
    if let Some(caps) = LABEL_VALUE.captures(line) {
        let value = &caps[2];
        if value != OFF {
            record.notes.push(RenderRow::note(&caps[1], value));
        }
        return true;
    }

    false
}
