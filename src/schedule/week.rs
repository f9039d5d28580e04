use super::models::WeekBucket;
use chrono::{Datelike, Duration, NaiveDate};

/// Monday and Sunday of the week containing `reference`
///
/// A Sunday belongs to the week that started six days earlier.
pub fn week_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = reference
        .checked_sub_signed(Duration::days(
            reference.weekday().num_days_from_monday() as i64,
        ))
        .unwrap_or(reference);

    let sunday = monday
        .checked_add_signed(Duration::days(6))
        .unwrap_or(monday);

    (monday, sunday)
}

/// Bucket a calendar date relative to the week of `reference`
pub fn classify_date(date: NaiveDate, reference: NaiveDate) -> WeekBucket {
    let (monday, _) = week_bounds(reference);
    let offset = date.signed_duration_since(monday).num_days();

    match offset {
        0..=6 => WeekBucket::CurrentWeek,
        7..=13 => WeekBucket::NextWeek,
        _ => WeekBucket::Other,
    }
}

/// Bucket a `YYYY-MM-DD` string; anything unparseable is `Other`
pub fn classify_week(date: &str, reference: NaiveDate) -> WeekBucket {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(date) => classify_date(date, reference),
        Err(_) => WeekBucket::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_bounds() {
        // Monday
        assert_eq!(week_bounds(ymd(2024, 1, 15)), (ymd(2024, 1, 15), ymd(2024, 1, 21)));
        // Wednesday
        assert_eq!(week_bounds(ymd(2024, 1, 17)), (ymd(2024, 1, 15), ymd(2024, 1, 21)));
        // Sunday goes back six days
        assert_eq!(week_bounds(ymd(2024, 1, 21)), (ymd(2024, 1, 15), ymd(2024, 1, 21)));
        // Across a year boundary
        assert_eq!(week_bounds(ymd(2025, 1, 1)), (ymd(2024, 12, 30), ymd(2025, 1, 5)));
    }

    #[test]
    fn test_classify_week() {
        let wednesday = ymd(2024, 1, 17);

        assert_eq!(classify_week("2024-01-15", wednesday), WeekBucket::CurrentWeek);
        assert_eq!(classify_week("2024-01-21", wednesday), WeekBucket::CurrentWeek);
        assert_eq!(classify_week("2024-01-22", wednesday), WeekBucket::NextWeek);
        assert_eq!(classify_week("2024-01-28", wednesday), WeekBucket::NextWeek);
        assert_eq!(classify_week("2024-01-29", wednesday), WeekBucket::Other);
        assert_eq!(classify_week("2024-01-14", wednesday), WeekBucket::Other);
    }

    #[test]
    fn test_classify_week_from_sunday() {
        let sunday = ymd(2024, 1, 21);

        assert_eq!(classify_week("2024-01-15", sunday), WeekBucket::CurrentWeek);
        assert_eq!(classify_week("2024-01-22", sunday), WeekBucket::NextWeek);
    }

    #[test]
    fn test_classify_week_bad_dates() {
        let today = ymd(2024, 1, 17);

        assert_eq!(classify_week("2024-02-30", today), WeekBucket::Other);
        assert_eq!(classify_week("not a date", today), WeekBucket::Other);
        assert_eq!(classify_week("", today), WeekBucket::Other);
    }
}
