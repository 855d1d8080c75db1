pub mod booking;
pub mod conflict;
pub mod store;
pub mod time_range;

#[cfg(test)]
mod time_range_test;
