/**
 * Event Routes
 * CRUD API endpoints for events; mutations require a bearer token
 */
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routes::{verify_auth, ErrorResponse, MessageResponse};
use crate::store::{
    models::{Event, EventPayload},
    SharedStore, StoreError,
};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/events
#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    pub category: Option<String>,
}

/// Response for event list endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<Event>,
    pub count: usize,
}

// ============================================================================
// Validation
// ============================================================================

fn validate_payload(payload: &EventPayload) -> Result<(), &'static str> {
    if payload.title.trim().is_empty() {
        return Err("Title is required");
    }
    if payload.location.trim().is_empty() {
        return Err("Location is required");
    }
    if payload.category.trim().is_empty() {
        return Err("Category is required");
    }
    Ok(())
}

fn parse_body(
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Result<EventPayload, Response> {
    let Json(payload) = payload.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_message(
                "Invalid request body",
                rejection.body_text(),
            )),
        )
            .into_response()
    })?;
    if let Err(msg) = validate_payload(&payload) {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response());
    }
    Ok(payload)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/events?category= - List events, optionally filtered by category.
/// An unknown category is not an error; it just matches nothing.
pub async fn list_events(
    State(store): State<SharedStore>,
    Query(query): Query<EventListQuery>,
) -> Response {
    let events = match query.category.as_deref() {
        Some(category) if !category.is_empty() => store.events_by_category(category).await,
        _ => store.events().await,
    };
    let count = events.len();
    (StatusCode::OK, Json(EventListResponse { events, count })).into_response()
}

/// GET /api/events/live - List only events currently live
pub async fn list_live_events(State(store): State<SharedStore>) -> Response {
    let events = store.live_events().await;
    let count = events.len();
    (StatusCode::OK, Json(EventListResponse { events, count })).into_response()
}

/// GET /api/events/{id} - Get a single event
pub async fn get_event(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    match store.event(&id).await {
        Some(event) => (StatusCode::OK, Json(event)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Event not found")),
        )
            .into_response(),
    }
}

/// POST /api/events - Create a new event (auth required).
/// Any client-supplied id/createdAt is ignored; the store assigns both.
pub async fn create_event(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Response {
    if let Err(err_response) = verify_auth(&headers) {
        return err_response.into_response();
    }
    let payload = match parse_body(payload) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let event = store.insert_event(payload).await;
    tracing::info!(event_id = %event.id, "event created");
    (StatusCode::CREATED, Json(event)).into_response()
}

/// PUT /api/events/{id} - Replace an existing event (auth required).
/// All fields except id and createdAt are overwritten.
pub async fn update_event(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Response {
    if let Err(err_response) = verify_auth(&headers) {
        return err_response.into_response();
    }
    let payload = match parse_body(payload) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match store.replace_event(&id, payload).await {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Event not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Unexpected store error updating event: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to update event")),
            )
                .into_response()
        }
    }
}

/// DELETE /api/events/{id} - Delete an event (auth required)
pub async fn delete_event(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(err_response) = verify_auth(&headers) {
        return err_response.into_response();
    }

    match store.remove_event(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Event deleted".to_string(),
            }),
        )
            .into_response(),
        Err(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Event not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Unexpected store error deleting event: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to delete event")),
            )
                .into_response()
        }
    }
}
