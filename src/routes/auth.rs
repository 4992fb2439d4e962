/**
 * Authentication Routes
 * JWT-based authentication: register, login, current user
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::routes::ErrorResponse;
use crate::store::{models::User, SharedStore, StoreError};

// ============================================================================
// Configuration
// ============================================================================

lazy_static::lazy_static! {
    /// JWT secret key from environment
    pub static ref JWT_SECRET: String = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "default-jwt-secret-change-in-production".to_string());
}

/// Token expiry in days. Tokens carry no revocation state; a token is valid
/// until this window passes.
const TOKEN_EXPIRY_DAYS: i64 = 7;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 8;

// ============================================================================
// Types
// ============================================================================

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // User ID
    pub exp: i64,    // Expiry timestamp
    pub iat: i64,    // Issued at timestamp
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by both register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

// ============================================================================
// Token helpers
// ============================================================================

/// Create a signed, time-bounded access token for a user id
pub fn create_access_token(user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::days(TOKEN_EXPIRY_DAYS);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
}

/// Verify and decode an access token. Fails on bad signature or expiry.
pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

// ============================================================================
// Validation
// ============================================================================

fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() {
        return Err("Email is required");
    }
    if !email.contains('@') {
        return Err("Invalid email format");
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/register
/// Create a new user account and issue a token
pub async fn register(
    State(store): State<SharedStore>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message(
                    "Invalid request body",
                    rejection.body_text(),
                )),
            )
                .into_response();
        }
    };

    if let Err(msg) = validate_email(&payload.email) {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response();
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Password must be at least 8 characters long",
            )),
        )
            .into_response();
    }
    if payload.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Name is required")),
        )
            .into_response();
    }

    // Hash password — bcrypt is intentionally CPU-intensive; run it outside
    // the async executor so it doesn't block other in-flight tasks.
    let password = payload.password.clone();
    let password_hash =
        match tokio::task::spawn_blocking(move || hash(&password, DEFAULT_COST)).await {
            Ok(Ok(h)) => h,
            Ok(Err(e)) => {
                tracing::error!("Failed to hash password: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Failed to process password")),
                )
                    .into_response();
            }
            Err(e) => {
                tracing::error!("spawn_blocking panic during hash: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Failed to process password")),
                )
                    .into_response();
            }
        };

    let user = match store
        .insert_user(payload.email, password_hash, payload.name)
        .await
    {
        Ok(user) => user,
        Err(StoreError::EmailTaken) => {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse::new("Email already registered")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Unexpected store error during registration: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to create account")),
            )
                .into_response();
        }
    };

    let token = match create_access_token(&user.id) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to create access token: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to generate token")),
            )
                .into_response();
        }
    };

    tracing::info!("User registered: {}", user.email);

    (StatusCode::CREATED, Json(AuthResponse { user, token })).into_response()
}

/// POST /api/auth/login
/// Authenticate a user and issue a fresh token. Unknown email and wrong
/// password produce the identical response so neither case is leaked.
pub async fn login(
    State(store): State<SharedStore>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message(
                    "Invalid request body",
                    rejection.body_text(),
                )),
            )
                .into_response();
        }
    };

    if let Err(msg) = validate_email(&payload.email) {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response();
    }
    if payload.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Password is required")),
        )
            .into_response();
    }

    let invalid_credentials = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid credentials")),
        )
            .into_response()
    };

    let user = match store.user_by_email(&payload.email).await {
        Some(user) => user,
        None => {
            tracing::warn!("Login attempt for unknown user");
            return invalid_credentials();
        }
    };

    // Verify password — bcrypt is CPU-bound; keep the async executor free.
    let password = payload.password.clone();
    let stored_hash = user.password_hash.clone();
    let password_ok =
        tokio::task::spawn_blocking(move || verify(&password, &stored_hash).unwrap_or(false))
            .await
            .unwrap_or(false);
    if !password_ok {
        tracing::warn!("Failed login attempt for: {}", user.email);
        return invalid_credentials();
    }

    let token = match create_access_token(&user.id) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to create access token: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to generate token")),
            )
                .into_response();
        }
    };

    tracing::info!("Successful login for user: {}", user.email);

    (StatusCode::OK, Json(AuthResponse { user, token })).into_response()
}

/// GET /api/auth/me
/// Return the authenticated user's info. A valid token whose user no longer
/// exists yields 404 — unreachable today since users are never deleted, but
/// handled all the same.
pub async fn current_user(State(store): State<SharedStore>, headers: HeaderMap) -> Response {
    let user_id = match crate::routes::verify_auth(&headers) {
        Ok(id) => id,
        Err(err_response) => return err_response.into_response(),
    };

    match store.user_by_id(&user_id).await {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found")),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{get, post};
    use axum::Router;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn auth_router(store: SharedStore) -> Router {
        Router::new()
            .route("/api/auth/register", post(register))
            .route("/api/auth/login", post(login))
            .route("/api/auth/me", get(current_user))
            .with_state(store)
    }

    async fn post_json(
        app: Router,
        uri: &str,
        json: &impl serde::Serialize,
    ) -> (StatusCode, serde_json::Value) {
        let body = Body::from(serde_json::to_vec(json).unwrap());
        let req = Request::post(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_with_token(
        app: Router,
        uri: &str,
        token: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::get(uri);
        if let Some(t) = token {
            builder = builder.header("authorization", format!("Bearer {}", t));
        }
        let res = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn register_body(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "longenough".to_string(),
            name: "A".to_string(),
        }
    }

    #[test]
    fn test_token_round_trip_yields_same_user_id() {
        let token = create_access_token("user-123").unwrap();
        let claims = verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
    }

    #[test]
    fn test_tampered_signature_fails_verification() {
        let token = create_access_token("user-123").unwrap();
        let mut tampered: Vec<char> = token.chars().collect();
        let last = tampered.last_mut().unwrap();
        *last = if *last == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();
        assert!(verify_access_token(&tampered).is_err());
    }

    #[test]
    fn test_expired_token_fails_verification() {
        let now = Utc::now();
        let claims = Claims {
            sub: "user-123".to_string(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_access_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_register_then_me_then_duplicate_conflict() {
        let store = Arc::new(Store::empty());

        let (status, body) = post_json(
            auth_router(store.clone()),
            "/api/auth/register",
            &register_body("a@x.com"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["email"], "a@x.com");
        assert!(body["user"].get("passwordHash").is_none());
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) =
            get_with_token(auth_router(store.clone()), "/api/auth/me", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@x.com");

        // Same email again, different password and name: still a conflict.
        let (status, body) = post_json(
            auth_router(store),
            "/api/auth/register",
            &RegisterRequest {
                email: "a@x.com".to_string(),
                password: "different-password".to_string(),
                name: "Somebody Else".to_string(),
            },
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already registered");
    }

    #[tokio::test]
    async fn test_register_short_password_returns_bad_request() {
        let store = Arc::new(Store::empty());
        let (status, _) = post_json(
            auth_router(store),
            "/api/auth/register",
            &RegisterRequest {
                email: "a@x.com".to_string(),
                password: "short".to_string(),
                name: "A".to_string(),
            },
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_invalid_email_returns_bad_request() {
        let store = Arc::new(Store::empty());
        let (status, _) = post_json(
            auth_router(store),
            "/api/auth/register",
            &register_body("no-at-sign"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_missing_field_returns_bad_request() {
        let store = Arc::new(Store::empty());
        let (status, _) = post_json(
            auth_router(store),
            "/api/auth/register",
            &serde_json::json!({"email": "a@x.com", "password": "longenough"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_look_identical() {
        let store = Arc::new(Store::empty());
        let (status, _) = post_json(
            auth_router(store.clone()),
            "/api/auth/register",
            &register_body("a@x.com"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (wrong_pw_status, wrong_pw_body) = post_json(
            auth_router(store.clone()),
            "/api/auth/login",
            &LoginRequest {
                email: "a@x.com".to_string(),
                password: "wrong-password".to_string(),
            },
        )
        .await;
        let (unknown_status, unknown_body) = post_json(
            auth_router(store),
            "/api/auth/login",
            &LoginRequest {
                email: "nobody@x.com".to_string(),
                password: "longenough".to_string(),
            },
        )
        .await;

        assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_pw_body, unknown_body);
    }

    #[tokio::test]
    async fn test_login_success_returns_user_and_token() {
        let store = Arc::new(Store::empty());
        post_json(
            auth_router(store.clone()),
            "/api/auth/register",
            &register_body("a@x.com"),
        )
        .await;

        let (status, body) = post_json(
            auth_router(store),
            "/api/auth/login",
            &LoginRequest {
                email: "a@x.com".to_string(),
                password: "longenough".to_string(),
            },
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "a@x.com");
        let claims = verify_access_token(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());
    }

    #[tokio::test]
    async fn test_me_without_token_returns_unauthorized() {
        let store = Arc::new(Store::empty());
        let (status, _) = get_with_token(auth_router(store), "/api/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_with_valid_token_for_absent_user_returns_not_found() {
        let store = Arc::new(Store::empty());
        let token = create_access_token("ghost-user").unwrap();
        let (status, body) =
            get_with_token(auth_router(store), "/api/auth/me", Some(&token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }
}
