use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::models::booking::{BookingRecord, Room, DATE_FORMAT};
use crate::services::conflict::{parse_snapshot, resolve, Candidate, ConflictResult};
use crate::services::store::{BookingStore, StoreError};
use crate::services::time_range::parse_time_range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The booking was appended to the store.
    Success(BookingRecord),
    RejectedConflict { booked_by: String, time: String },
    RejectedInvalidInput { reason: String },
}

/// Outcome of one booking attempt, plus any stored rows that had to be
/// skipped while checking for conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReport {
    pub outcome: BookingOutcome,
    pub warnings: Vec<String>,
}

type SlotKey = (String, Room);

pub struct BookingService {
    store: Arc<dyn BookingStore>,
    // One lock per (date, room); held across the read-check-append sequence
    slot_locks: DashMap<SlotKey, Arc<Mutex<()>>>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self {
            store,
            slot_locks: DashMap::new(),
        }
    }

    // Run `f` while holding the lock for `key`. The entry is dropped again
    // once no other attempt holds or waits on it.
    fn with_slot_lock<T>(
        &self,
        key: &SlotKey,
        f: impl FnOnce() -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let lock = self.slot_locks.entry(key.clone()).or_default().clone();

        let result = match lock.lock() {
            Ok(_guard) => f(),
            Err(e) => Err(StoreError::Lock(e.to_string())),
        };

        drop(lock);
        self.slot_locks
            .remove_if(key, |_, entry| Arc::strong_count(entry) == 1);

        result
    }

    /// Number of (date, room) locks currently tracked.
    pub fn tracked_slots(&self) -> usize {
        self.slot_locks.len()
    }

    /// Try to book `room` on `date` for the time range in `time_text`.
    ///
    /// Invalid input is rejected before the store is touched. Otherwise the
    /// store is read, the snapshot checked for an overlapping booking in the
    /// same room on the same date, and the new booking appended only when
    /// there is none. Attempts for the same date and room are serialized.
    pub fn attempt_booking(
        &self,
        date: NaiveDate,
        room: Room,
        time_text: &str,
        booked_by: &str,
    ) -> Result<BookingReport, StoreError> {
        let interval = match parse_time_range(time_text) {
            Ok(interval) => interval,
            Err(e) => {
                info!("Rejected booking input '{}': {}", time_text, e);
                return Ok(BookingReport {
                    outcome: BookingOutcome::RejectedInvalidInput {
                        reason: e.to_string(),
                    },
                    warnings: Vec::new(),
                });
            }
        };

        let candidate = Candidate {
            date: date.format(DATE_FORMAT).to_string(),
            room,
            interval,
        };

        let key = (candidate.date.clone(), room);
        self.with_slot_lock(&key, || self.check_and_append(date, &candidate, booked_by))
    }

    fn check_and_append(
        &self,
        date: NaiveDate,
        candidate: &Candidate,
        booked_by: &str,
    ) -> Result<BookingReport, StoreError> {
        let room = candidate.room;
        let snapshot = self.store.fetch_all()?;
        debug!(
            "Checking {} in {} on {} against {} stored bookings",
            candidate.interval,
            room,
            candidate.date,
            snapshot.len()
        );

        let resolution = resolve(candidate, parse_snapshot(&snapshot));
        let warnings = resolution
            .warnings
            .iter()
            .map(ToString::to_string)
            .collect();

        let outcome = match resolution.result {
            ConflictResult::Conflict(blocker) => {
                warn!(
                    "Room {} on {} at {} is already booked by {} at {}",
                    room, candidate.date, candidate.interval, blocker.booked_by, blocker.time
                );
                BookingOutcome::RejectedConflict {
                    booked_by: blocker.booked_by,
                    time: blocker.time,
                }
            }
            ConflictResult::NoConflict => {
                let record =
                    BookingRecord::new(date, candidate.interval.to_string(), room, booked_by);
                self.store.append(&record)?;
                info!(
                    "Booked {} on {} at {} for {}",
                    room, record.date, record.time, record.booked_by
                );
                BookingOutcome::Success(record)
            }
        };

        Ok(BookingReport { outcome, warnings })
    }

    /// Every stored booking, optionally narrowed to an exact date text and a
    /// room, in store order.
    pub fn list_bookings(
        &self,
        date: Option<&str>,
        room: Option<Room>,
    ) -> Result<Vec<BookingRecord>, StoreError> {
        let bookings = self
            .store
            .fetch_all()?
            .into_iter()
            .filter(|record| date.map_or(true, |d| record.date == d))
            .filter(|record| room.map_or(true, |r| record.room == r.as_str()))
            .collect();

        Ok(bookings)
    }
}
