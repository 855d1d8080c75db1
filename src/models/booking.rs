use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used for the `Date` column of the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The fixed set of bookable meeting rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Room {
    Atlantic,
    Pacific,
    Arctic,
    Southern,
}

impl Room {
    pub const ALL: [Room; 4] = [Room::Atlantic, Room::Pacific, Room::Arctic, Room::Southern];

    pub fn as_str(&self) -> &'static str {
        match self {
            Room::Atlantic => "ATLANTIC",
            Room::Pacific => "PACIFIC",
            Room::Arctic => "ARCTIC",
            Room::Southern => "SOUTHERN",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoom(pub String);

impl fmt::Display for UnknownRoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown room: {}", self.0)
    }
}

impl std::error::Error for UnknownRoom {}

impl FromStr for Room {
    type Err = UnknownRoom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Room::ALL
            .into_iter()
            .find(|room| room.as_str() == s)
            .ok_or_else(|| UnknownRoom(s.to_string()))
    }
}

/// One row of the booking store. Every column is kept as text, exactly as
/// the store holds it; parsing happens in the services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Room")]
    pub room: String,
    #[serde(rename = "Booked By")]
    pub booked_by: String,
}

// Column headers, in store order
pub const RECORD_HEADERS: [&str; 4] = ["Date", "Time", "Room", "Booked By"];

impl BookingRecord {
    pub fn new(date: NaiveDate, time: String, room: Room, booked_by: &str) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            time,
            room: room.as_str().to_string(),
            booked_by: booked_by.to_string(),
        }
    }
}

// Request body for the booking endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub room: Room,
    pub time: String,
    pub booked_by: String,
}

// The booking that blocked a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictInfo {
    pub booked_by: String,
    pub time: String,
}

// Response structure for the booking endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<ConflictInfo>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

// Response structure for the booking list endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingListResponse {
    pub total_count: usize,
    pub current_page: usize,
    pub total_page: usize,
    pub bookings: Vec<BookingRecord>,
}
