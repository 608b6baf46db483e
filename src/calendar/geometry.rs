//! Period geometry: working days left in the current cycle.
//!
//! Assumes the epoch is a Monday. With a misaligned epoch the count is skewed
//! by the number of weekend days that fall differently; this is not corrected.

use chrono::NaiveDate;

/// Working days in one week.
pub const WORKDAYS_PER_WEEK: i64 = 5;

/// Whole days from the epoch to today (negative before the epoch).
pub fn days_since_epoch(today: NaiveDate, epoch: NaiveDate) -> i64 {
    (today - epoch).num_days()
}

/// Working days remaining in the current period, today included.
///
/// One weekend is subtracted for every elapsed seven-day block, then the
/// position inside the `week_period * 5` working-day cycle is taken. The result
/// is in `[1, week_period * 5]`: the maximum on the first day of a cycle, 1 on
/// its last working day. A `week_period` of zero is treated as one week.
pub fn working_days_remaining(today: NaiveDate, epoch: NaiveDate, week_period: u32) -> u32 {
    let cycle = i64::from(week_period.max(1)) * WORKDAYS_PER_WEEK;
    let days = days_since_epoch(today, epoch);
    let weekends_elapsed = days.div_euclid(7);
    let worked = (days - weekends_elapsed * 2).rem_euclid(cycle);

    // worked is in [0, cycle), so the difference always fits
    (cycle - worked) as u32
}
