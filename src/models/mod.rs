pub mod booking;
pub mod common;
