//! Simulated clock: hour of day, day of week, and a running timestamp
//!
//! Time advances by an arbitrary number of elapsed hours per step. Predicates
//! for work days, lunch, daytime and sleep windows are pure functions of the
//! current hour and day.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_WEEK: u8 = 7;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    /// Hour of day in [0, 24)
    hour: f64,
    /// Day of week, 0 = Monday .. 6 = Sunday
    day: u8,
    /// Hours since the start of the simulated week zero
    timestamp: f64,
}

impl Clock {
    pub fn new(hour: f64, day: u8) -> Self {
        let hour = hour.rem_euclid(HOURS_PER_DAY);
        let day = day % DAYS_PER_WEEK;
        Self {
            hour,
            day,
            timestamp: hour + f64::from(day) * HOURS_PER_DAY,
        }
    }

    /// Advance by `elapsed_hours` (caller guarantees it is non-negative)
    pub fn advance(&mut self, elapsed_hours: f64) {
        self.timestamp += elapsed_hours;
        let total = self.hour + elapsed_hours;
        let days = total.div_euclid(HOURS_PER_DAY) as u64;
        self.hour = total.rem_euclid(HOURS_PER_DAY);
        let day = (u64::from(self.day) + days % u64::from(DAYS_PER_WEEK)) % u64::from(DAYS_PER_WEEK);
        self.day = day as u8;
    }

    pub fn hour(&self) -> f64 {
        self.hour
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn is_work_day(&self) -> bool {
        self.day < 5
    }

    pub fn is_weekend(&self) -> bool {
        !self.is_work_day()
    }

    pub fn is_lunch_time(&self) -> bool {
        (12.0..14.0).contains(&self.hour)
    }

    /// Daytime window in which shops are worth walking to
    pub fn is_day_time(&self) -> bool {
        (7.0..20.0).contains(&self.hour)
    }

    pub fn is_sleep_time(&self) -> bool {
        self.hour >= 22.0 || self.hour < 6.0
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(6.9, 0)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.hour.floor() as u32;
        let minutes = ((self.hour - self.hour.floor()) * 60.0).floor() as u32;
        write!(
            f,
            "{} {:02}:{:02}",
            DAY_NAMES[usize::from(self.day)],
            hours,
            minutes
        )
    }
}
