//! Monthly due-date rollover
//!
//! /renewsub advances a subscription to the next month's occurrence of the
//! same day-of-month. When the target month is shorter than the source day,
//! the day clamps to the last valid day of the target month — uniformly, for
//! every month pair, including February 29th in leap years. Time-of-day is
//! preserved.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Number of days in a month, leap years accounted for.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// The next month's occurrence of `due`'s day-of-month.
///
/// December rolls into January of the following year. Days past the end of
/// the target month clamp to its last day.
pub fn next_monthly_due(due: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if due.month() == 12 {
        (due.year() + 1, 1)
    } else {
        (due.year(), due.month() + 1)
    };

    let day = due.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(due.time()))
        .and_then(|naive| Utc.from_local_datetime(&naive).single())
        .unwrap_or(due)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_plain_month_advance() {
        assert_eq!(next_monthly_due(date(2025, 12, 15)), date(2026, 1, 15));
        assert_eq!(next_monthly_due(date(2025, 3, 7)), date(2025, 4, 7));
    }

    #[test]
    fn test_january_31_clamps_to_february_end() {
        assert_eq!(next_monthly_due(date(2025, 1, 31)), date(2025, 2, 28));
    }

    #[test]
    fn test_leap_year_february_gets_29th() {
        // Uniform clamp-to-month-end rule: in a leap year January 31st rolls
        // to February 29th, not an unconditional 28th.
        assert_eq!(next_monthly_due(date(2024, 1, 31)), date(2024, 2, 29));
    }

    #[test]
    fn test_day_preserved_when_target_is_longer() {
        // April 30th -> May 30th, not May 31st
        assert_eq!(next_monthly_due(date(2025, 4, 30)), date(2025, 5, 30));
    }

    #[test]
    fn test_31st_clamps_into_30_day_month() {
        assert_eq!(next_monthly_due(date(2025, 3, 31)), date(2025, 4, 30));
        assert_eq!(next_monthly_due(date(2025, 8, 31)), date(2025, 9, 30));
    }

    #[test]
    fn test_time_of_day_is_preserved() {
        let due = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap();
        let next = next_monthly_due(due);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }
}
