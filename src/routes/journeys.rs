/**
 * Journey Routes
 * Listing, lookup, and slot booking for exclusive experiences
 */
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routes::{verify_auth, ErrorResponse};
use crate::store::{models::Journey, SharedStore, StoreError};

/// Response for GET /api/journeys
#[derive(Debug, Serialize, Deserialize)]
pub struct JourneyListResponse {
    pub journeys: Vec<Journey>,
    pub count: usize,
}

/// Response for a successful booking
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub message: String,
    pub journey: Journey,
}

/// GET /api/journeys - List all journeys
pub async fn list_journeys(State(store): State<SharedStore>) -> Response {
    let journeys = store.journeys().await;
    let count = journeys.len();
    (StatusCode::OK, Json(JourneyListResponse { journeys, count })).into_response()
}

/// GET /api/journeys/{id} - Get a single journey
pub async fn get_journey(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    match store.journey(&id).await {
        Some(journey) => (StatusCode::OK, Json(journey)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Journey not found")),
        )
            .into_response(),
    }
}

/// POST /api/journeys/{id}/book - Claim a slot (auth required).
/// A journey with no slots left rejects the booking outright.
pub async fn book_journey(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(err_response) = verify_auth(&headers) {
        return err_response.into_response();
    }

    match store.book_journey(&id).await {
        Ok(journey) => {
            tracing::info!(journey_id = %journey.id, slots_left = journey.slots_left, "journey booked");
            (
                StatusCode::OK,
                Json(BookingResponse {
                    message: "Journey booked successfully".to_string(),
                    journey,
                }),
            )
                .into_response()
        }
        Err(StoreError::NoSlotsLeft) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No slots available")),
        )
            .into_response(),
        Err(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Journey not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Unexpected store error booking journey: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to book journey")),
            )
                .into_response()
        }
    }
}
