//! Arrival time parsing
//!
//! Turns the free-form time a user types ("8:30am", "14:30", "9") into a
//! validated [`TimeOfDay`]. Input is classified once into a [`TimeShape`] and
//! only then normalized and range checked.

use chrono::NaiveTime;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hour, optional `:MM`, optional two-letter suffix.
static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?(?P<suffix>[A-Za-z]{2})?$").unwrap()
});

/// Errors produced while parsing a time string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("'{input}' is not a recognized time format")]
    UnparsableFormat { input: String },
    #[error("time {hour}:{minute:02} is out of range")]
    OutOfRange { hour: u32, minute: u32 },
}

/// AM/PM designator of a 12-hour time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_uppercase().as_str() {
            "AM" => Some(Period::Am),
            "PM" => Some(Period::Pm),
            _ => None,
        }
    }
}

/// The lexical shape an input matched, with the fields it carried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeShape {
    /// `2:30pm`
    FullTime { hour: u32, minute: u32, period: Period },
    /// `2pm`
    HourPeriod { hour: u32, period: Period },
    /// `14:30`
    HourMinute { hour: u32, minute: u32 },
    /// `9`
    HourOnly { hour: u32 },
}

impl TimeShape {
    /// Classify raw input into exactly one shape
    pub fn classify(input: &str) -> Result<Self, TimeParseError> {
        let unparsable = || TimeParseError::UnparsableFormat { input: input.to_string() };

        let caps = TIME_RE.captures(input).ok_or_else(unparsable)?;
        // Both groups are at most two ASCII digits.
        let hour: u32 = caps["hour"].parse().map_err(|_| unparsable())?;
        let minute = match caps.name("minute") {
            Some(m) => Some(m.as_str().parse::<u32>().map_err(|_| unparsable())?),
            None => None,
        };
        let period = match caps.name("suffix") {
            Some(s) => Some(Period::from_suffix(s.as_str()).ok_or_else(unparsable)?),
            None => None,
        };

        let shape = match (minute, period) {
            (Some(minute), Some(period)) => TimeShape::FullTime { hour, minute, period },
            (None, Some(period)) => TimeShape::HourPeriod { hour, period },
            (Some(minute), None) => TimeShape::HourMinute { hour, minute },
            (None, None) => TimeShape::HourOnly { hour },
        };
        debug!("Classified '{}' as {:?}", input, shape);
        Ok(shape)
    }

    /// Convert the extracted fields to 24-hour form and validate them
    pub fn normalize(self) -> Result<TimeOfDay, TimeParseError> {
        let (hour, minute) = match self {
            TimeShape::FullTime { hour, minute, period } => {
                (twelve_to_twenty_four(hour, minute, period)?, minute)
            }
            TimeShape::HourPeriod { hour, period } => (twelve_to_twenty_four(hour, 0, period)?, 0),
            TimeShape::HourMinute { hour, minute } => (hour, minute),
            TimeShape::HourOnly { hour } => (if hour == 12 { 0 } else { hour }, 0),
        };
        TimeOfDay::new(hour, minute)
    }
}

/// Rejects period-qualified hours outside 1..=12 before converting them.
fn twelve_to_twenty_four(hour: u32, minute: u32, period: Period) -> Result<u32, TimeParseError> {
    if !(1..=12).contains(&hour) {
        return Err(TimeParseError::OutOfRange { hour, minute });
    }
    Ok(match period {
        Period::Am if hour == 12 => 0,
        Period::Pm if hour != 12 => hour + 12,
        _ => hour,
    })
}

/// A validated time of day, independent of any date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeOfDay")]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

#[derive(Deserialize)]
struct RawTimeOfDay {
    hour: u32,
    minute: u32,
}

impl TryFrom<RawTimeOfDay> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(raw: RawTimeOfDay) -> Result<Self, Self::Error> {
        TimeOfDay::new(raw.hour, raw.minute)
    }
}

impl TimeOfDay {
    /// Build a time of day, rejecting hours above 23 and minutes above 59
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeParseError> {
        if hour > 23 || minute > 59 {
            debug!("Rejecting out of range time {}:{:02}", hour, minute);
            return Err(TimeParseError::OutOfRange { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Render in the full-time-with-period shape, e.g. `2:30PM` or `12:05AM`
    pub fn to_twelve_hour(&self) -> String {
        let (hour, period) = match self.hour {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        format!("{}:{:02}{}", hour, self.minute, period)
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // Bounds are enforced by `new`, so this never falls back.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

/// Parse a user-typed time into a [`TimeOfDay`]
///
/// # Arguments
///
/// * `time_str` - The already trimmed input (e.g. "8pm", "10:30am", "14:30", "9")
///
/// # Returns
///
/// * `Result<TimeOfDay, TimeParseError>` - The time in 24-hour form, or why it was rejected
pub fn parse_time(time_str: &str) -> Result<TimeOfDay, TimeParseError> {
    let time = TimeShape::classify(time_str)?.normalize()?;
    debug!("Parsed '{}' as {}", time_str, time);
    Ok(time)
}
