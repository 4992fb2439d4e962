/**
 * Routes Module
 * API route handlers and shared response types
 */

pub mod auth;
pub mod categories;
pub mod events;
pub mod health;
pub mod journeys;
pub mod merch;

use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Error response body shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}

/// Plain message body (delete confirmations and the like)
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Auth gate for mutating routes: extract the bearer token, verify it, and
/// yield the caller's user id. Missing, invalid, and expired tokens all map
/// to the same 401 response.
pub fn verify_auth(headers: &HeaderMap) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(t) => match auth::verify_access_token(t) {
            Ok(claims) => Ok(claims.sub),
            Err(_) => Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid or expired token")),
            )),
        },
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Authorization required")),
        )),
    }
}
