use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::models::booking::{BookingRecord, RECORD_HEADERS};

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Csv(csv::Error),
    Lock(String),
    /// The file exists but does not start with the store's column row.
    Header { found: Vec<String> },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "booking store I/O error: {e}"),
            StoreError::Csv(e) => write!(f, "booking store CSV error: {e}"),
            StoreError::Lock(e) => write!(f, "booking store lock poisoned: {e}"),
            StoreError::Header { found } => write!(
                f,
                "booking store header is {:?}, expected {:?}",
                found, RECORD_HEADERS
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Csv(e) => Some(e),
            StoreError::Lock(_) | StoreError::Header { .. } => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::Csv(e)
    }
}

/// Persistent tabular store of bookings.
///
/// `fetch_all` returns the full current set of rows; `append` durably adds a
/// single row or fails as a whole.
#[cfg_attr(test, mockall::automock)]
pub trait BookingStore: Send + Sync {
    fn fetch_all(&self) -> Result<Vec<BookingRecord>, StoreError>;

    fn append(&self, record: &BookingRecord) -> Result<(), StoreError>;
}

// Booking store backed by a CSV file with the four store columns
pub struct CsvBookingStore {
    csv_path: PathBuf,
    file_mutex: Mutex<()>,
}

impl CsvBookingStore {
    /// Open the store at `csv_path`. A missing or empty file gets the header
    /// row written; any other file must already start with it.
    pub fn open(csv_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let csv_path = csv_path.as_ref().to_path_buf();

        let is_empty = match std::fs::metadata(&csv_path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if is_empty {
            info!("Creating new bookings file at {}", csv_path.display());

            let file = File::create(&csv_path)?;
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
            writer.write_record(RECORD_HEADERS)?;
            writer.flush()?;
        } else {
            check_header(&csv_path)?;
        }

        Ok(Self {
            csv_path,
            file_mutex: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.csv_path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.file_mutex
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }
}

fn decode_field(record: &ByteRecord, idx: usize) -> String {
    record
        .get(idx)
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .unwrap_or_default()
}

fn check_header(csv_path: &Path) -> Result<(), StoreError> {
    let file = File::open(csv_path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut first = ByteRecord::new();
    reader.read_byte_record(&mut first)?;

    let found: Vec<String> = (0..first.len()).map(|idx| decode_field(&first, idx)).collect();
    if found != RECORD_HEADERS {
        return Err(StoreError::Header { found });
    }

    Ok(())
}

// Convert a raw row to a BookingRecord. Missing trailing fields become empty
// text and invalid UTF-8 is replaced, so one bad row cannot fail the whole
// fetch.
fn byte_record_to_booking(row: usize, record: &ByteRecord) -> BookingRecord {
    if record.len() < RECORD_HEADERS.len() {
        warn!(
            "Stored row {} has {} fields, expected {}",
            row + 1,
            record.len(),
            RECORD_HEADERS.len()
        );
    }

    if std::str::from_utf8(record.as_slice()).is_err() {
        warn!("Stored row {} is not valid UTF-8, reading it lossily", row + 1);
    }

    BookingRecord {
        date: decode_field(record, 0),
        time: decode_field(record, 1),
        room: decode_field(record, 2),
        booked_by: decode_field(record, 3),
    }
}

impl BookingStore for CsvBookingStore {
    fn fetch_all(&self) -> Result<Vec<BookingRecord>, StoreError> {
        let _lock = self.lock()?;

        let file = File::open(&self.csv_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut bookings = Vec::new();
        for (row, result) in reader.byte_records().enumerate() {
            let record = result?;
            bookings.push(byte_record_to_booking(row, &record));
        }

        debug!(
            "Fetched {} bookings from {}",
            bookings.len(),
            self.csv_path.display()
        );

        Ok(bookings)
    }

    fn append(&self, record: &BookingRecord) -> Result<(), StoreError> {
        let _lock = self.lock()?;

        let file = OpenOptions::new().append(true).open(&self.csv_path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        writer.serialize(record)?;
        writer.flush()?;

        info!(
            "Stored booking for {} in {} on {} at {}",
            record.booked_by, record.room, record.date, record.time
        );

        Ok(())
    }
}

/// Open the CSV booking store configured for this process.
pub fn create_booking_store(config: &AppConfig) -> Result<Arc<CsvBookingStore>, StoreError> {
    if let Some(dir) = config.database_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    Ok(Arc::new(CsvBookingStore::open(&config.database_path)?))
}
