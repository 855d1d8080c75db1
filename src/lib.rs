//! Meeting Room Booking Service
//!
//! This library books one of a fixed set of meeting rooms for a date and a
//! time range, refusing any booking that overlaps an existing one for the
//! same room and date. It also exposes the booking flow as a small web
//! service.
//!
//! # Modules
//!
//! - `services::time_range`: parsing and validating `HH:MM-HH:MM` text
//! - `services::conflict`: overlap detection against a snapshot of bookings
//! - `services::store`: the booking store seam and its CSV implementation
//! - `services::booking`: the serialized read-check-append booking flow
//! - `handlers` / `routes`: the HTTP surface
//! - `config`: environment-driven settings
//!
//! # Storage
//!
//! Bookings are kept as four text columns (`Date`, `Time`, `Room`,
//! `Booked By`). Stored times are parsed again on every check, and rows whose
//! time cannot be read are skipped with a warning.

pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod tests;

// Re-export the main types for ease of use
pub use config::AppConfig;
pub use handlers::api::AppState;
pub use models::booking::{BookingRecord, Room};
pub use routes::create_router;
pub use services::booking::{BookingOutcome, BookingReport, BookingService};
pub use services::store::{BookingStore, CsvBookingStore, StoreError};
