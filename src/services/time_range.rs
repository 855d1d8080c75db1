use chrono::{NaiveTime, Timelike};
use std::fmt;
use tracing::debug;

const TIME_FORMAT: &str = "%H:%M";

/// A wall-clock time within a single day, at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Returns `None` when the hour or minute is out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Parses a single 24-hour `HH:MM` segment.
    pub fn parse(segment: &str) -> Result<Self, TimeRangeError> {
        NaiveTime::parse_from_str(segment, TIME_FORMAT)
            .map(TimeOfDay)
            .map_err(|_| TimeRangeError::InvalidTimeFormat {
                segment: segment.to_string(),
            })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

/// A half-open `[start, end)` interval of a day. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeInterval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, TimeRangeError> {
        if end <= start {
            return Err(TimeRangeError::NonPositiveDuration { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Touching intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// The text did not split into exactly two `-` separated parts.
    Malformed { input: String },
    InvalidTimeFormat { segment: String },
    NonPositiveDuration { start: TimeOfDay, end: TimeOfDay },
}

impl fmt::Display for TimeRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRangeError::Malformed { input } => {
                write!(f, "malformed time range '{input}', expected e.g. 10:00-11:00")
            }
            TimeRangeError::InvalidTimeFormat { segment } => {
                write!(f, "invalid time '{segment}', expected 24-hour HH:MM")
            }
            TimeRangeError::NonPositiveDuration { start, end } => {
                write!(f, "end time {end} must be after start time {start}")
            }
        }
    }
}

impl std::error::Error for TimeRangeError {}

/// Parse free text of the shape `"<start>-<end>"` into a validated interval.
pub fn parse_time_range(text: &str) -> Result<TimeInterval, TimeRangeError> {
    let parts: Vec<&str> = text.split('-').map(str::trim).collect();

    let [start_str, end_str] = parts.as_slice() else {
        debug!("Time range '{}' split into {} parts", text, parts.len());
        return Err(TimeRangeError::Malformed {
            input: text.to_string(),
        });
    };

    let start = TimeOfDay::parse(start_str)?;
    let end = TimeOfDay::parse(end_str)?;

    TimeInterval::new(start, end)
}

pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.overlaps(b)
}
