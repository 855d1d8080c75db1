use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::models::booking::BookingRecord;
use crate::services::booking::BookingService;
use crate::services::store::CsvBookingStore;

/// Generate a stored booking row for testing purposes
pub fn generate_test_record(date: &str, time: &str, room: &str, booked_by: &str) -> BookingRecord {
    BookingRecord {
        date: date.to_string(),
        time: time.to_string(),
        room: room.to_string(),
        booked_by: booked_by.to_string(),
    }
}

/// Write a bookings file holding `rows` verbatim, the way an older or
/// hand-edited sheet might look.
pub fn write_legacy_bookings(path: &Path, rows: &[&str]) {
    let mut contents = String::from("Date,Time,Room,Booked By\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(path, contents).unwrap();
}

/// Open a booking service over the CSV file at `path`
pub fn open_service(path: &Path) -> (Arc<CsvBookingStore>, BookingService) {
    let store = Arc::new(CsvBookingStore::open(path).unwrap());
    let service = BookingService::new(store.clone());
    (store, service)
}
