/**
 * Category Routes
 * Read-only endpoints over the curated category set
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routes::ErrorResponse;
use crate::store::{models::Category, SharedStore};

/// Response for GET /api/categories
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
    pub count: usize,
}

/// GET /api/categories - List all categories
pub async fn list_categories(State(store): State<SharedStore>) -> Response {
    let categories = store.categories().await;
    let count = categories.len();
    (
        StatusCode::OK,
        Json(CategoryListResponse { categories, count }),
    )
        .into_response()
}

/// GET /api/categories/{slug} - Get a single category by its slug
pub async fn get_category_by_slug(
    State(store): State<SharedStore>,
    Path(slug): Path<String>,
) -> Response {
    match store.category_by_slug(&slug).await {
        Some(category) => (StatusCode::OK, Json(category)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Category not found")),
        )
            .into_response(),
    }
}
