use std::fmt;
use tracing::{debug, warn};

use crate::models::booking::{BookingRecord, Room};
use crate::services::time_range::{parse_time_range, TimeInterval, TimeRangeError};

/// The booking being requested, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// `YYYY-MM-DD`, compared to stored dates as plain text.
    pub date: String,
    pub room: Room,
    pub interval: TimeInterval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictResult {
    NoConflict,
    /// The first overlapping booking found, in snapshot order.
    Conflict(BookingRecord),
}

/// A stored row for the candidate's date and room whose time text could not
/// be parsed. The row is left out of the overlap scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRowWarning {
    pub row: usize,
    pub time: String,
    pub error: TimeRangeError,
}

impl fmt::Display for StoredRowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stored booking #{} has unreadable time '{}': {}",
            self.row + 1,
            self.time,
            self.error
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub result: ConflictResult,
    pub warnings: Vec<StoredRowWarning>,
}

/// Pair every stored record with the outcome of parsing its `Time` column.
pub fn parse_snapshot(
    records: &[BookingRecord],
) -> Vec<(&BookingRecord, Result<TimeInterval, TimeRangeError>)> {
    records
        .iter()
        .map(|record| (record, parse_time_range(&record.time)))
        .collect()
}

/// Look for an existing booking that overlaps the candidate.
///
/// Only records with the same date text and room are compared. The first
/// overlap wins and ends the scan. Records in scope whose interval failed to
/// parse are skipped and reported as warnings instead of failing the check.
pub fn resolve<'a, I>(candidate: &Candidate, existing: I) -> Resolution
where
    I: IntoIterator<Item = (&'a BookingRecord, Result<TimeInterval, TimeRangeError>)>,
{
    let mut warnings = Vec::new();

    for (row, (record, parsed)) in existing.into_iter().enumerate() {
        if record.date != candidate.date || record.room != candidate.room.as_str() {
            continue;
        }

        match parsed {
            Ok(interval) if interval.overlaps(&candidate.interval) => {
                debug!(
                    "Requested {} in {} on {} overlaps booking {} by {}",
                    candidate.interval, candidate.room, candidate.date, record.time, record.booked_by
                );
                return Resolution {
                    result: ConflictResult::Conflict(record.clone()),
                    warnings,
                };
            }
            Ok(_) => {}
            Err(error) => {
                let warning = StoredRowWarning {
                    row,
                    time: record.time.clone(),
                    error,
                };
                warn!("Skipping stored booking: {}", warning);
                warnings.push(warning);
            }
        }
    }

    Resolution {
        result: ConflictResult::NoConflict,
        warnings,
    }
}
