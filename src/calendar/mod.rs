//! Calendar module: when to match and how much period is left.
//!
//! This module provides:
//! - **Calendar policy**: weekends and configured days off are non-matching days,
//!   and the day a new period starts is a reset day.
//! - **Period geometry**: how many working days remain in the current period.
//! - **PeriodState**: the derived (today, epoch, week_period) view recomputed
//!   on every run. Nothing here is persisted.
//!
//! All arithmetic is relative to the epoch, which is day zero of a repeating
//! `week_period`-week cycle. The working-day count assumes the epoch is a Monday.

mod geometry;
mod policy;

pub use geometry::{WORKDAYS_PER_WEEK, days_since_epoch, working_days_remaining};
pub use policy::{is_non_matching_day, is_period_reset_day, is_weekend};

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Period state derived for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodState {
    pub today: NaiveDate,
    pub epoch: NaiveDate,
    pub week_period: u32,
}

impl PeriodState {
    pub fn new(today: NaiveDate, epoch: NaiveDate, week_period: u32) -> Self {
        Self {
            today,
            epoch,
            week_period,
        }
    }

    pub fn days_since_epoch(&self) -> i64 {
        days_since_epoch(self.today, self.epoch)
    }

    pub fn is_reset_day(&self) -> bool {
        is_period_reset_day(self.today, self.epoch, self.week_period)
    }

    pub fn is_off(&self, days_off: &HashSet<NaiveDate>) -> bool {
        is_non_matching_day(self.today, days_off)
    }

    pub fn working_days_left(&self) -> u32 {
        working_days_remaining(self.today, self.epoch, self.week_period)
    }

    /// Whether the epoch satisfies the Monday alignment the day count relies on.
    pub fn epoch_is_aligned(&self) -> bool {
        self.epoch.weekday() == Weekday::Mon
    }
}
