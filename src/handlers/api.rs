use axum::{
    extract::{Json as ExtractJson, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::models::booking::{
    BookingListResponse, BookingRequest, BookingResponse, ConflictInfo, Room,
};
use crate::models::common::BookingListParams;
use crate::services::booking::{BookingOutcome, BookingReport, BookingService};

// AppState struct containing shared resources
pub struct AppState {
    pub service: Arc<BookingService>,
}

// List rooms endpoint
pub async fn list_rooms() -> Json<Vec<Room>> {
    Json(Room::ALL.to_vec())
}

fn booking_response(report: BookingReport) -> (StatusCode, BookingResponse) {
    let warnings = report.warnings;

    match report.outcome {
        BookingOutcome::Success(record) => (
            StatusCode::CREATED,
            BookingResponse {
                success: true,
                message: format!(
                    "Room {} booked on {} at {}",
                    record.room, record.date, record.time
                ),
                booking: Some(record),
                conflict: None,
                warnings,
            },
        ),
        BookingOutcome::RejectedConflict { booked_by, time } => (
            StatusCode::CONFLICT,
            BookingResponse {
                success: false,
                message: format!("Room is already booked by {} at {}", booked_by, time),
                booking: None,
                conflict: Some(ConflictInfo { booked_by, time }),
                warnings,
            },
        ),
        BookingOutcome::RejectedInvalidInput { reason } => (
            StatusCode::BAD_REQUEST,
            BookingResponse {
                success: false,
                message: format!("Invalid time range, e.g. 10:00-11:00 ({})", reason),
                booking: None,
                conflict: None,
                warnings,
            },
        ),
    }
}

// Booking endpoint
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), StatusCode> {
    info!(
        "Received booking request for {} on {} at '{}' by {}",
        request.room, request.date, request.time, request.booked_by
    );

    let service = Arc::clone(&state.service);
    let report = tokio::task::spawn_blocking(move || {
        service.attempt_booking(
            request.date,
            request.room,
            &request.time,
            &request.booked_by,
        )
    })
    .await
    .map_err(|err| {
        error!("Booking task failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|err| {
        error!("Failed to complete booking: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let (status, response) = booking_response(report);
    Ok((status, Json(response)))
}

// List bookings endpoint
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookingListParams>,
) -> Result<Json<BookingListResponse>, StatusCode> {
    info!(
        "Received request to list bookings with date={:?}, room={:?}, page={}, page_size={}",
        params.date, params.room, params.page, params.page_size
    );

    let service = Arc::clone(&state.service);
    let date = params.date.clone();
    let room = params.room;
    let bookings = tokio::task::spawn_blocking(move || service.list_bookings(date.as_deref(), room))
        .await
        .map_err(|err| {
            error!("Listing task failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|err| {
            error!("Failed to read bookings: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let page_size = params.page_size.max(1);
    let page = params.page.max(1);
    let total_count = bookings.len();
    let total_page = total_count.div_ceil(page_size);

    let bookings = bookings
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    Ok(Json(BookingListResponse {
        total_count,
        current_page: page,
        total_page,
        bookings,
    }))
}
