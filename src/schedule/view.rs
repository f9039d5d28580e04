use super::models::{NurseHeader, RenderRow, RowKind, ScheduleRecord, WeekBucket};
use super::week::classify_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which days of a schedule to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekFilter {
    /// Every day in the response
    #[default]
    All,
    CurrentWeek,
    NextWeek,
}

impl FromStr for WeekFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "full" => Ok(WeekFilter::All),
            "current" | "current_week" => Ok(WeekFilter::CurrentWeek),
            "next" | "next_week" => Ok(WeekFilter::NextWeek),
            other => Err(format!("unknown week filter '{}'", other)),
        }
    }
}

/// How day rows are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOrder {
    /// Stable sort on the weekday name only. The same weekday from two
    /// different weeks keeps the order it had in the response.
    #[default]
    Weekday,
    /// Sort on the date, then on the weekday table position
    Chronological,
}

impl FromStr for DayOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekday" => Ok(DayOrder::Weekday),
            "date" | "chronological" => Ok(DayOrder::Chronological),
            other => Err(format!("unknown day order '{}'", other)),
        }
    }
}

/// Options applied when turning a record into display rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub week_filter: WeekFilter,
    pub day_order: DayOrder,
    /// Date the current and next week are computed from
    pub reference_date: NaiveDate,
}

impl ViewOptions {
    pub fn new(week_filter: WeekFilter, day_order: DayOrder, reference_date: NaiveDate) -> Self {
        Self {
            week_filter,
            day_order,
            reference_date,
        }
    }
}

/// Rendering-ready schedule: optional header plus ordered rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<NurseHeader>,
    pub rows: Vec<RenderRow>,
}

impl ScheduleView {
    /// True when the only row is the "no schedule data" placeholder
    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [row] if row.kind == RowKind::Placeholder)
    }
}

impl ScheduleRecord {
    /// Order, classify and format the record for display
    pub fn render(&self, options: &ViewOptions) -> ScheduleView {
        let mut days: Vec<_> = self.days.iter().collect();

        match options.day_order {
            DayOrder::Weekday => days.sort_by_key(|day| day.key.weekday_index()),
            DayOrder::Chronological => days.sort_by(|a, b| {
                a.key
                    .date
                    .cmp(&b.key.date)
                    .then_with(|| a.key.weekday_index().cmp(&b.key.weekday_index()))
            }),
        }

        let mut rows = self.notes.clone();

        for day in days {
            let bucket = day
                .key
                .naive_date()
                .map(|date| classify_date(date, options.reference_date))
                .unwrap_or(WeekBucket::Other);
            let keep = match options.week_filter {
                WeekFilter::All => true,
                WeekFilter::CurrentWeek => bucket == WeekBucket::CurrentWeek,
                WeekFilter::NextWeek => bucket == WeekBucket::NextWeek,
            };
            if !keep {
                continue;
            }

            rows.push(RenderRow {
                label: day.key.to_string(),
                value: day.format(self.style),
                kind: RowKind::Day,
                week: Some(bucket),
                wards: day.wards(),
            });
        }

        if rows.is_empty() {
            rows.push(RenderRow::placeholder());
        }

        ScheduleView {
            header: self.header.clone(),
            rows,
        }
    }
}

impl fmt::Display for ScheduleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.header {
            writeln!(f, "{} ({})", header.nurse_name, header.nurse_id)?;
        }

        for row in &self.rows {
            match row.kind {
                RowKind::Placeholder => writeln!(f, "  {}", row.label)?,
                _ => writeln!(f, "  {}: {}", row.label, row.value)?,
            }
        }

        Ok(())
    }
}
