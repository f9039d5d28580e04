use super::models::{
    DayKey, NurseHeader, ParseIssue, ScheduleRecord, ShiftEntry, ShiftPeriod, ShiftStyle, OFF,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, info};

lazy_static! {
    static ref DAY_COLUMN: Regex =
        Regex::new(r"([0-9A-Za-z_]+)\s+([0-9]{4}-[0-9]{2}-[0-9]{2})\s+([0-9A-Za-z_]+)").unwrap();
}

/// Column holding the nurse id
pub const NURSE_ID_COLUMN: &str = "Nurse_ID";
/// Column holding the nurse name
pub const NAME_COLUMN: &str = "Name";

/// Parse one nurse row of the full schedule table
///
/// Columns are named like `"Monday 2024-01-15 Morning"`; columns that do not
/// look like that are ignored.
pub fn parse_tabular_schedule(row: &Map<String, Value>) -> ScheduleRecord {
    let mut record = ScheduleRecord::new(ShiftStyle::Code);

    record.header = Some(NurseHeader {
        nurse_name: cell_text(row.get(NAME_COLUMN)).unwrap_or_else(|| "Unknown".to_string()),
        nurse_id: cell_text(row.get(NURSE_ID_COLUMN)).unwrap_or_else(|| "N/A".to_string()),
    });

    for (column, value) in row {
        if column == NURSE_ID_COLUMN || column == NAME_COLUMN {
            continue;
        }

        let Some(caps) = DAY_COLUMN.captures(column) else {
            debug!("Ignoring non-schedule column {:?}", column);
            continue;
        };

        let day = record.day_mut(DayKey::new(&caps[1], &caps[2]));
        if let Some(assignment) = cell_text(Some(value)) {
            if assignment != OFF {
                day.shifts
                    .push(ShiftEntry::new(ShiftPeriod::parse(&caps[3]), &assignment));
            }
        }
    }

    if record.days.is_empty() {
        record.issues.push(ParseIssue::NoMatchingColumns);
    }

    record
}

/// Parse every nurse row of the admin full schedule
pub fn parse_full_schedule(rows: &[Map<String, Value>]) -> Vec<ScheduleRecord> {
    info!("Parsing full schedule for {} nurse(s)", rows.len());
    rows.iter().map(parse_tabular_schedule).collect()
}

/// Text of a cell, or `None` for cells that count as empty
/// (null, "", false and numeric zero)
fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}
