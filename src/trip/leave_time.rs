//! Leave-by time arithmetic

use crate::parser::TimeOfDay;
use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

const SECONDS_PER_DAY: u64 = 86_400;

/// When to leave so that a trip of `travel` ends at `arrive_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveTime {
    pub leave_at: NaiveTime,
    pub arrive_at: NaiveTime,
    /// Travel time rounded to whole seconds
    pub travel_seconds: u64,
    /// How many calendar days before the arrival day the departure falls
    pub days_before: u64,
}

impl LeaveTime {
    pub fn compute(arrival: TimeOfDay, travel: Duration) -> Self {
        let arrive_at = arrival.to_naive_time();
        let travel_seconds =
            travel.as_secs().saturating_add(u64::from(travel.subsec_nanos() >= 500_000_000));
        let arrive_seconds = u64::from(arrive_at.num_seconds_from_midnight());

        let (leave_seconds, days_before) = match arrive_seconds.checked_sub(travel_seconds) {
            Some(leave) => (leave, 0),
            None => {
                let deficit = travel_seconds - arrive_seconds;
                let rem = deficit % SECONDS_PER_DAY;
                let days = deficit / SECONDS_PER_DAY + u64::from(rem != 0);
                ((SECONDS_PER_DAY - rem) % SECONDS_PER_DAY, days)
            }
        };

        // leave_seconds is always below one day.
        let leave_at = NaiveTime::from_num_seconds_from_midnight_opt(leave_seconds as u32, 0)
            .unwrap_or(NaiveTime::MIN);
        Self { leave_at, arrive_at, travel_seconds, days_before }
    }

    pub fn leave_display(&self) -> String {
        format_twelve_hour(self.leave_at)
    }

    pub fn arrive_display(&self) -> String {
        format_twelve_hour(self.arrive_at)
    }
}

impl fmt::Display for LeaveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You should leave at {}", self.leave_display())?;
        match self.days_before {
            0 => {}
            1 => write!(f, " the day before")?,
            n => write!(f, " {} days before", n)?,
        }
        write!(f, " to arrive at {}", self.arrive_display())
    }
}

/// `8:05 AM` style rendering
pub fn format_twelve_hour(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Human readable travel duration, e.g. `1h 05m` or `12m`
pub fn format_travel(seconds: u64) -> String {
    let minutes = seconds / 60 + u64::from(seconds % 60 >= 30);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, m) => format!("{}h {:02}m", h, m),
    }
}
