/**
 * Merch Routes
 * Read-only endpoints over the merchandise catalogue
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routes::ErrorResponse;
use crate::store::{models::MerchItem, SharedStore};

/// Response for GET /api/merch
#[derive(Debug, Serialize, Deserialize)]
pub struct MerchListResponse {
    pub items: Vec<MerchItem>,
    pub count: usize,
}

/// GET /api/merch - List all merch items
pub async fn list_merch_items(State(store): State<SharedStore>) -> Response {
    let items = store.merch_items().await;
    let count = items.len();
    (StatusCode::OK, Json(MerchListResponse { items, count })).into_response()
}

/// GET /api/merch/{id} - Get a single merch item
pub async fn get_merch_item(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    match store.merch_item(&id).await {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Merch item not found")),
        )
            .into_response(),
    }
}
