use chrono::NaiveDate;
use tempfile::tempdir;

use crate::models::booking::Room;
use crate::services::booking::BookingOutcome;
use crate::services::conflict::{parse_snapshot, resolve, Candidate, ConflictResult};
use crate::services::store::BookingStore;
use crate::services::time_range::parse_time_range;
use crate::tests::common::fixtures::{generate_test_record, open_service, write_legacy_bookings};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
}

#[test]
fn test_booking_day_in_one_room() {
    let dir = tempdir().unwrap();
    let (store, service) = open_service(&dir.path().join("bookings.csv"));

    let first = service
        .attempt_booking(day(), Room::Atlantic, "09:00-10:00", "Niran")
        .unwrap();
    assert!(matches!(first.outcome, BookingOutcome::Success(_)));

    // Back-to-back is fine
    let second = service
        .attempt_booking(day(), Room::Atlantic, "10:00-11:00", "Ploy")
        .unwrap();
    assert!(matches!(second.outcome, BookingOutcome::Success(_)));

    let clash = service
        .attempt_booking(day(), Room::Atlantic, "09:30-09:45", "Ploy")
        .unwrap();
    assert_eq!(
        clash.outcome,
        BookingOutcome::RejectedConflict {
            booked_by: "Niran".to_string(),
            time: "09:00-10:00".to_string(),
        }
    );

    // Same slot, different room
    let elsewhere = service
        .attempt_booking(day(), Room::Pacific, "09:30-09:45", "Ploy")
        .unwrap();
    assert!(matches!(elsewhere.outcome, BookingOutcome::Success(_)));

    let stored = store.fetch_all().unwrap();
    assert_eq!(
        stored,
        vec![
            generate_test_record("2024-01-05", "09:00-10:00", "ATLANTIC", "Niran"),
            generate_test_record("2024-01-05", "10:00-11:00", "ATLANTIC", "Ploy"),
            generate_test_record("2024-01-05", "09:30-09:45", "PACIFIC", "Ploy"),
        ]
    );
}

#[test]
fn test_legacy_rows_degrade_gracefully() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bookings.csv");
    write_legacy_bookings(
        &path,
        &[
            "2024-01-05,all day,ARCTIC,Facilities",
            "2024-01-05,9-10,ATLANTIC,Old Sheet",
            "2024-01-05,13:00-14:00,ATLANTIC,Mali",
        ],
    );
    let (_store, service) = open_service(&path);

    // Unrelated bad row: nothing to warn about
    let pacific = service
        .attempt_booking(day(), Room::Pacific, "09:00-10:00", "Ploy")
        .unwrap();
    assert!(matches!(pacific.outcome, BookingOutcome::Success(_)));
    assert!(pacific.warnings.is_empty());

    // Bad row in the same room and date is skipped with a warning
    let atlantic = service
        .attempt_booking(day(), Room::Atlantic, "09:00-10:00", "Ploy")
        .unwrap();
    assert!(matches!(atlantic.outcome, BookingOutcome::Success(_)));
    assert_eq!(atlantic.warnings.len(), 1);
    assert!(atlantic.warnings[0].contains("9-10"));

    // Valid rows still block
    let blocked = service
        .attempt_booking(day(), Room::Atlantic, "13:30-15:00", "Ploy")
        .unwrap();
    assert!(matches!(
        blocked.outcome,
        BookingOutcome::RejectedConflict { ref booked_by, .. } if booked_by == "Mali"
    ));
}

#[test]
fn test_resolve_against_stored_snapshot_is_repeatable() {
    let dir = tempdir().unwrap();
    let (store, service) = open_service(&dir.path().join("bookings.csv"));
    service
        .attempt_booking(day(), Room::Arctic, "15:00-16:00", "Niran")
        .unwrap();

    let snapshot = store.fetch_all().unwrap();
    let candidate = Candidate {
        date: "2024-01-05".to_string(),
        room: Room::Arctic,
        interval: parse_time_range("15:30-16:30").unwrap(),
    };

    let first = resolve(&candidate, parse_snapshot(&snapshot));
    let second = resolve(&candidate, parse_snapshot(&snapshot));

    assert_eq!(first, second);
    assert_eq!(first.result, ConflictResult::Conflict(snapshot[0].clone()));
    assert_eq!(store.fetch_all().unwrap().len(), 1);
}
