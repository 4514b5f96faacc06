//! Calendar logic for week identification and navigation.
//!
//! A week is identified by the date of its Monday, formatted `YYYY-MM-DD`.
//! Sunday belongs to the week of the *previous* Monday. Week IDs compare
//! chronologically as plain strings, which the week store relies on for
//! ordering and seeding.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};

/// Date format used for week IDs
pub const WEEK_ID_FORMAT: &str = "%Y-%m-%d";

/// Week ID of the week containing `date`
pub fn week_id_for_date(date: NaiveDate) -> String {
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    monday.format(WEEK_ID_FORMAT).to_string()
}

/// Week ID of the week containing today
pub fn current_week_id() -> String {
    week_id_for_date(Local::now().date_naive())
}

/// Parse a week ID back into its Monday date
pub fn parse_week_id(week_id: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(week_id, WEEK_ID_FORMAT)
        .with_context(|| format!("Invalid week id: {}", week_id))
}

/// Shift a week ID by a whole number of weeks
pub fn shift_week_id(week_id: &str, weeks: i64) -> Result<String> {
    let monday = parse_week_id(week_id)?;
    Ok((monday + Duration::weeks(weeks)).format(WEEK_ID_FORMAT).to_string())
}

/// Furthest week forward navigation may reach: one week beyond today's week
pub fn forward_navigation_limit() -> String {
    week_id_for_date(Local::now().date_naive() + Duration::weeks(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_maps_to_itself() {
        // 2024-01-15 is a Monday
        assert_eq!(week_id_for_date(date(2024, 1, 15)), "2024-01-15");
    }

    #[test]
    fn test_midweek_maps_to_monday() {
        // Wednesday and Saturday of the same week
        assert_eq!(week_id_for_date(date(2024, 1, 17)), "2024-01-15");
        assert_eq!(week_id_for_date(date(2024, 1, 20)), "2024-01-15");
    }

    #[test]
    fn test_sunday_belongs_to_previous_monday() {
        // 2024-01-21 is a Sunday
        assert_eq!(week_id_for_date(date(2024, 1, 21)), "2024-01-15");
        // The next day starts a new week
        assert_eq!(week_id_for_date(date(2024, 1, 22)), "2024-01-22");
    }

    #[test]
    fn test_week_id_crosses_month_and_year_boundaries() {
        // 2024-01-01 is a Monday; the preceding Sunday falls in 2023
        assert_eq!(week_id_for_date(date(2023, 12, 31)), "2023-12-25");
        assert_eq!(week_id_for_date(date(2024, 1, 1)), "2024-01-01");
    }

    #[test]
    fn test_shift_week_id() {
        assert_eq!(shift_week_id("2024-01-15", 1).unwrap(), "2024-01-22");
        assert_eq!(shift_week_id("2024-01-15", -1).unwrap(), "2024-01-08");
        assert_eq!(shift_week_id("2024-01-01", -1).unwrap(), "2023-12-25");
    }

    #[test]
    fn test_parse_week_id_rejects_garbage() {
        assert!(parse_week_id("not-a-date").is_err());
        assert!(parse_week_id("2024/01/15").is_err());
        assert!(parse_week_id("").is_err());
    }

    #[test]
    fn test_week_ids_order_as_strings() {
        let a = week_id_for_date(date(2024, 1, 8));
        let b = week_id_for_date(date(2024, 1, 15));
        assert!(a < b);
    }

    #[test]
    fn test_forward_navigation_limit_is_one_week_out() {
        let today = current_week_id();
        let limit = forward_navigation_limit();
        assert_eq!(shift_week_id(&today, 1).unwrap(), limit);
    }
}
