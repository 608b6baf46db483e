//! Calendar policy: non-matching days and period resets.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

use super::geometry::days_since_epoch;

/// Saturday or Sunday.
pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// True when no matching happens today: weekends and configured days off.
pub fn is_non_matching_day(today: NaiveDate, days_off: &HashSet<NaiveDate>) -> bool {
    is_weekend(today) || days_off.contains(&today)
}

/// True when today starts a new period, i.e. the number of days since the
/// epoch is a multiple of `week_period` weeks.
///
/// A `week_period` of zero never resets.
pub fn is_period_reset_day(today: NaiveDate, epoch: NaiveDate, week_period: u32) -> bool {
    let cycle = i64::from(week_period) * 7;
    if cycle == 0 {
        return false;
    }
    days_since_epoch(today, epoch).rem_euclid(cycle) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_weekend_is_off() {
        let days_off = HashSet::new();
        assert!(is_non_matching_day(date("2024-01-06"), &days_off)); // Saturday
        assert!(is_non_matching_day(date("2024-01-07"), &days_off)); // Sunday
    }

    #[test]
    fn test_weekday_is_on() {
        let days_off = HashSet::new();
        for day in ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"] {
            assert!(!is_non_matching_day(date(day), &days_off), "{} should be a matching day", day);
        }
    }

    #[test]
    fn test_configured_day_off() {
        let days_off: HashSet<NaiveDate> = [date("2024-12-25")].into_iter().collect();
        assert!(is_non_matching_day(date("2024-12-25"), &days_off));
        assert!(!is_non_matching_day(date("2024-12-24"), &days_off));
    }

    #[test]
    fn test_reset_on_epoch() {
        assert!(is_period_reset_day(date("2024-01-01"), date("2024-01-01"), 1));
        assert!(is_period_reset_day(date("2024-01-01"), date("2024-01-01"), 3));
    }

    #[test]
    fn test_reset_every_week_period() {
        let epoch = date("2024-01-01");
        assert!(is_period_reset_day(date("2024-01-15"), epoch, 2));
        assert!(!is_period_reset_day(date("2024-01-08"), epoch, 2));
        assert!(is_period_reset_day(date("2024-01-08"), epoch, 1));
    }

    #[test]
    fn test_reset_exactly_once_per_cycle() {
        let epoch = date("2024-01-01");
        for week_period in 1..=4u32 {
            let cycle = i64::from(week_period) * 7;
            let resets: Vec<i64> = (0..cycle * 3)
                .filter(|offset| is_period_reset_day(epoch + chrono::Duration::days(*offset), epoch, week_period))
                .collect();
            assert_eq!(resets, vec![0, cycle, cycle * 2]);
        }
    }

    #[test]
    fn test_zero_week_period_never_resets() {
        assert!(!is_period_reset_day(date("2024-01-01"), date("2024-01-01"), 0));
    }
}
