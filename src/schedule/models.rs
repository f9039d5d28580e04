use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Monday-first weekday table used for ordering day groups
pub const DAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Assignment value meaning the nurse has no shift
pub const OFF: &str = "Off";

/// Prefix the backend puts in front of ward assignments
pub const ON_DUTY_PREFIX: &str = "On Duty - ";

/// Remove a leading "On Duty - " from an assignment
pub fn strip_on_duty(assignment: &str) -> &str {
    assignment.strip_prefix(ON_DUTY_PREFIX).unwrap_or(assignment)
}

/// Period of the day a shift belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftPeriod {
    Morning,
    Evening,
    Night,
    /// Any other word found in the shift position
    Other(String),
}

impl ShiftPeriod {
    /// Parse the shift word exactly as it appears in the schedule
    pub fn parse(word: &str) -> Self {
        match word {
            "Morning" => ShiftPeriod::Morning,
            "Evening" => ShiftPeriod::Evening,
            "Night" => ShiftPeriod::Night,
            other => ShiftPeriod::Other(other.to_string()),
        }
    }

    /// Single-letter code used in the compact table view
    pub fn code(&self) -> &str {
        match self {
            ShiftPeriod::Morning => "M",
            ShiftPeriod::Evening => "E",
            ShiftPeriod::Night => "N",
            ShiftPeriod::Other(_) => "",
        }
    }

    /// Label as written in the schedule text
    pub fn label(&self) -> &str {
        match self {
            ShiftPeriod::Morning => "Morning",
            ShiftPeriod::Evening => "Evening",
            ShiftPeriod::Night => "Night",
            ShiftPeriod::Other(label) => label,
        }
    }
}

/// Hospital ward an assignment refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ward {
    /// Emergency department
    Ed,
    /// Intensive care unit
    Icu,
    /// General ward
    Gw,
}

impl Ward {
    /// Detect the ward mentioned in an assignment text
    pub fn detect(assignment: &str) -> Option<Self> {
        if assignment.contains("ED") {
            Some(Ward::Ed)
        } else if assignment.contains("ICU") {
            Some(Ward::Icu)
        } else if assignment.contains("GW") {
            Some(Ward::Gw)
        } else {
            None
        }
    }
}

/// One shift within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEntry {
    pub period: ShiftPeriod,
    /// Assignment with the "On Duty - " prefix already removed
    pub assignment: String,
}

impl ShiftEntry {
    pub fn new(period: ShiftPeriod, assignment: &str) -> Self {
        Self {
            period,
            assignment: strip_on_duty(assignment).to_string(),
        }
    }

    pub fn ward(&self) -> Option<Ward> {
        Ward::detect(&self.assignment)
    }

    /// Format the shift for display in the given style
    pub fn format(&self, style: ShiftStyle) -> String {
        match style {
            ShiftStyle::Full => format!("{}: {}", self.period.label(), self.assignment),
            ShiftStyle::Code => format!("{}: {}", self.period.code(), self.assignment),
        }
    }
}

/// How shift periods are written in the rendered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftStyle {
    /// "Morning: GW"
    Full,
    /// "M: GW"
    Code,
}

/// Weekday name and ISO date identifying a day group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayKey {
    pub weekday: String,
    pub date: String,
}

impl DayKey {
    pub fn new(weekday: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            weekday: weekday.into(),
            date: date.into(),
        }
    }

    /// Position in the Monday-first table, `None` for unknown weekday names
    pub fn weekday_index(&self) -> Option<usize> {
        DAY_ORDER.iter().position(|day| *day == self.weekday)
    }

    /// Calendar date, if the captured text is a real date
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.date)
    }
}

/// Shifts grouped under one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub key: DayKey,
    pub shifts: Vec<ShiftEntry>,
}

impl DaySchedule {
    /// Distinct wards across the day's shifts, in shift order
    pub fn wards(&self) -> Vec<Ward> {
        let mut wards = Vec::new();
        for ward in self.shifts.iter().filter_map(ShiftEntry::ward) {
            if !wards.contains(&ward) {
                wards.push(ward);
            }
        }
        wards
    }

    /// Comma-joined shift text, or "Off" when there is nothing scheduled
    pub fn format(&self, style: ShiftStyle) -> String {
        if self.shifts.is_empty() {
            return OFF.to_string();
        }

        self.shifts
            .iter()
            .map(|shift| shift.format(style))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Name and id shown above a nurse's schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NurseHeader {
    pub nurse_name: String,
    pub nurse_id: String,
}

/// What kind of line a render row is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// A grouped day and its shifts
    Day,
    /// A label/value line that did not fit the day grammar
    Note,
    /// Stands in for an empty schedule
    Placeholder,
}

/// Which week a day falls in relative to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekBucket {
    CurrentWeek,
    NextWeek,
    Other,
}

/// A single line handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRow {
    pub label: String,
    pub value: String,
    pub kind: RowKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<WeekBucket>,
    /// Wards mentioned by the row's shifts, for styling
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wards: Vec<Ward>,
}

/// Label of the row shown when there is nothing to display
pub const NO_SCHEDULE_DATA: &str = "No schedule data available";

impl RenderRow {
    pub fn note(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            kind: RowKind::Note,
            week: None,
            wards: Vec::new(),
        }
    }

    pub fn placeholder() -> Self {
        Self {
            label: NO_SCHEDULE_DATA.to_string(),
            value: String::new(),
            kind: RowKind::Placeholder,
            week: None,
            wards: Vec::new(),
        }
    }
}

/// Non-fatal problems met while parsing; they never stop a render
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseIssue {
    #[error("header line does not look like 'Schedule for NAME (ID: X)': {line:?}")]
    MalformedHeader { line: String },

    #[error("line {line_number} does not match the schedule grammar: {line:?}")]
    UnmatchedLine { line_number: usize, line: String },

    #[error("no column matches '<Weekday> <YYYY-MM-DD> <Shift>'")]
    NoMatchingColumns,
}

/// A nurse's schedule as parsed from one backend response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub header: Option<NurseHeader>,
    /// Day groups in first-seen order; ordering happens when rendering
    pub days: Vec<DaySchedule>,
    /// Label/value lines from the compatibility fallback, in input order
    pub notes: Vec<RenderRow>,
    pub style: ShiftStyle,
    pub issues: Vec<ParseIssue>,
}

impl ScheduleRecord {
    pub fn new(style: ShiftStyle) -> Self {
        Self {
            header: None,
            days: Vec::new(),
            notes: Vec::new(),
            style,
            issues: Vec::new(),
        }
    }

    /// Get the day group for a key, creating an empty one on first sight
    pub fn day_mut(&mut self, key: DayKey) -> &mut DaySchedule {
        let index = match self.days.iter().position(|day| day.key == key) {
            Some(index) => index,
            None => {
                self.days.push(DaySchedule {
                    key,
                    shifts: Vec::new(),
                });
                self.days.len() - 1
            }
        };
        &mut self.days[index]
    }

    /// Look up a day group by its weekday and date
    pub fn day(&self, weekday: &str, date: &str) -> Option<&DaySchedule> {
        self.days
            .iter()
            .find(|day| day.key.weekday == weekday && day.key.date == date)
    }

    /// True when there is neither a day group nor a note to show
    pub fn is_empty(&self) -> bool {
        self.days.is_empty() && self.notes.is_empty()
    }
}
