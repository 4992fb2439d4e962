//! Nitrous API - library for app logic and testing

pub mod logging;
pub mod routes;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::store::{SharedStore, Store};

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN, falling back
/// to the dev and deployed frontend origins.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            vec![
                "http://localhost:3000".parse().unwrap(),
                "https://nitrous.vercel.app".parse().unwrap(),
            ]
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Create and configure the application router over a shared store.
pub fn create_app(store: SharedStore) -> Router {
    let cors = configure_cors();

    Router::new()
        .route("/health", get(routes::health::health_ping))
        .route(
            "/api/events",
            get(routes::events::list_events).post(routes::events::create_event),
        )
        .route("/api/events/live", get(routes::events::list_live_events))
        .route(
            "/api/events/{id}",
            get(routes::events::get_event)
                .put(routes::events::update_event)
                .delete(routes::events::delete_event),
        )
        .route("/api/categories", get(routes::categories::list_categories))
        .route(
            "/api/categories/{slug}",
            get(routes::categories::get_category_by_slug),
        )
        .route("/api/journeys", get(routes::journeys::list_journeys))
        .route("/api/journeys/{id}", get(routes::journeys::get_journey))
        .route(
            "/api/journeys/{id}/book",
            post(routes::journeys::book_journey),
        )
        .route("/api/merch", get(routes::merch::list_merch_items))
        .route("/api/merch/{id}", get(routes::merch::get_merch_item))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/me", get(routes::auth::current_user))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        // Global 2 MB request body cap
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
        .with_state(store)
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Guards MUST be held for the programme's lifetime; dropping them early
    // shuts down background log-writer threads and loses buffered log lines.
    let _log_guards = logging::init();

    // Refuse to start in production with the insecure default JWT secret.
    let environment = std::env::var("ENVIRONMENT").unwrap_or_default();
    if environment == "production" {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        if secret.is_empty() || secret == "default-jwt-secret-change-in-production" {
            panic!(
                "FATAL: JWT_SECRET must be set to a secure, unique value in production. \
                 Refusing to start with the default secret."
            );
        }
    }

    let store = Arc::new(Store::seeded());
    tracing::info!("In-memory store initialized with seed data");

    let app = create_app(store);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST/PORT configuration");
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> (SharedStore, Router) {
        let store = Arc::new(Store::seeded());
        (store.clone(), create_app(store))
    }

    async fn send(
        app: &Router,
        request: Request<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let res = app.clone().oneshot(request).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, json: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_, app) = app();
        let (status, body) = send(
            &app,
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Nitrous API is running");
    }

    #[tokio::test]
    async fn test_register_me_duplicate_flow() {
        let (_, app) = app();

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/register",
                serde_json::json!({"email": "a@x.com", "password": "longenough", "name": "A"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Request::get("/api/auth/me")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@x.com");

        let (status, _) = send(
            &app,
            post_json(
                "/api/auth/register",
                serde_json::json!({"email": "a@x.com", "password": "longenough", "name": "A"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_booking_flow_through_full_app() {
        let (store, app) = app();
        let journey = store
            .journeys()
            .await
            .into_iter()
            .find(|j| j.slots_left == 3)
            .unwrap();

        let (status, body) = send(
            &app,
            Request::get(format!("/api/journeys/{}", journey.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slotsLeft"], 3);

        let (_, register_body) = send(
            &app,
            post_json(
                "/api/auth/register",
                serde_json::json!({"email": "b@x.com", "password": "longenough", "name": "B"}),
            ),
        )
        .await;
        let token = register_body["token"].as_str().unwrap().to_string();

        for expected in [2, 1, 0] {
            let (status, body) = send(
                &app,
                Request::post(format!("/api/journeys/{}/book", journey.id))
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["journey"]["slotsLeft"], expected);
        }

        let (status, _) = send(
            &app,
            Request::post(format!("/api/journeys/{}/book", journey.id))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mutating_event_routes_require_auth() {
        let (store, app) = app();
        let id = store.events().await[0].id.clone();

        let (status, _) = send(
            &app,
            post_json("/api/events", serde_json::json!({"title": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            Request::delete(format!("/api/events/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
