use serde::Deserialize;

use crate::models::booking::Room;

// Query parameters for listing stored bookings
#[derive(Debug, Deserialize)]
pub struct BookingListParams {
    pub date: Option<String>,
    pub room: Option<Room>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

pub fn default_page() -> usize {
    1
}

pub fn default_page_size() -> usize {
    20
}
