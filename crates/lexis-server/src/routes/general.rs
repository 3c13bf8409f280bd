//! Service info and health routes.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/favicon.ico", get(favicon))
}

/// GET / — basic service info.
async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Lexis Text Processor API",
        "version": VERSION,
        "status": "running",
    }))
}

/// GET /health — liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "lexis",
        "version": VERSION,
    }))
}

async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{get, send, test_app};

    #[tokio::test]
    async fn test_home() {
        let (app, _dir) = test_app();
        let (status, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Lexis Text Processor API");
        assert_eq!(body["status"], "running");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = test_app();
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "lexis");
    }

    #[tokio::test]
    async fn test_favicon_no_content() {
        let (app, _dir) = test_app();
        let (status, body) = send(&app, get("/favicon.ico")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());
    }
}
