use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use sleeptrack_api::config::{AppEnv, AuthConfig, ServerConfig};
use sleeptrack_api::routes;
use sleeptrack_api::state::AppState;
use sleeptrack_db::backend::{Repositories, StorageBackend};
use sleeptrack_db::file_store::FileStore;

pub const TEST_TOKEN: &str = "TEST-TOKEN";
pub const TEST_USER: &str = "u1";

/// Build a test `ServerConfig` pointing the file backend at `dir`.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        env: AppEnv::Development,
        storage: StorageBackend::File {
            sleep_file: dir.path().join("sleep_logs.json"),
            goals_file: dir.path().join("goals.json"),
        },
        auth: AuthConfig {
            token: TEST_TOKEN.to_string(),
            user_id: TEST_USER.to_string(),
            user_name: "Test User".to_string(),
        },
    }
}

/// A file-backed application in a throwaway directory.
///
/// Keep it alive for the duration of the test; dropping it removes the
/// data files.
pub struct TestApp {
    pub dir: TempDir,
    state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let store = match &config.storage {
            StorageBackend::File {
                sleep_file,
                goals_file,
            } => FileStore::open(sleep_file.clone(), goals_file.clone())
                .await
                .unwrap(),
            StorageBackend::Postgres { .. } => unreachable!(),
        };
        let state = AppState::new(config, Repositories::from_store(Arc::new(store)));
        Self { dir, state }
    }

    /// Build the full application router with all middleware layers.
    ///
    /// This mirrors the router construction in `main.rs` so integration
    /// tests exercise the same middleware stack that production uses.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(["http://localhost:5173".parse().unwrap()])
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600));

        let request_id_header = HeaderName::from_static("x-request-id");

        Router::new()
            .merge(routes::health::router())
            .nest("/api/v1", routes::api_routes())
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Authenticated GET.
    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
            .body(Body::empty())
            .unwrap();
        self.router().oneshot(request).await.unwrap()
    }

    /// Authenticated POST with a JSON body.
    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router().oneshot(request).await.unwrap()
    }

    /// Send an arbitrary request.
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router().oneshot(request).await.unwrap()
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
