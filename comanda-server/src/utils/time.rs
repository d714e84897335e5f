//! Time helpers - business timezone conversion
//!
//! Handlers turn calendar dates into Unix millis here; repositories only see `i64`.

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::{AppError, AppResult, ErrorCode};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid date format: {date}"))
        })
}

/// Local midnight of `date` → Unix millis.
///
/// DST gap fallback: a local time that does not exist is read as UTC.
pub fn local_midnight_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Day start (00:00 local) → Unix millis
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    local_midnight_millis(date, tz)
}

/// Day end → next day 00:00 local, Unix millis.
///
/// Callers compare with `< end`.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    local_midnight_millis(next_day, tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-03-15").is_ok());
        let err = parse_date("15/03/2024").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_lima_day_bounds() {
        let tz: Tz = "America/Lima".parse().unwrap();
        let date = parse_date("2024-03-15").unwrap();
        // 00:00 in Lima is 05:00 UTC
        assert_eq!(day_start_millis(date, tz), 1_710_478_800_000);
        assert_eq!(
            day_end_millis(date, tz) - day_start_millis(date, tz),
            24 * 60 * 60 * 1000
        );
    }

    #[test]
    fn test_utc_day_bounds() {
        let date = parse_date("2024-01-01").unwrap();
        assert_eq!(day_start_millis(date, Tz::UTC), 1_704_067_200_000);
        assert_eq!(day_end_millis(date, Tz::UTC), 1_704_153_600_000);
    }
}
