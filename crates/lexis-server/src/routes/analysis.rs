//! Analysis routes: analyze-and-store, search, lookup by id.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use lexis_core::{Error, Result, Sentiment};
use lexis_store::{SearchQuery, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};

use super::{error_response, error_status};
use crate::state::AppState;

/// Longest accepted input, in characters.
pub const MAX_TEXT_CHARS: usize = 10_000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/search", get(search))
        .route("/{id}", get(get_analysis))
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Deserialize)]
struct SearchParams {
    keyword: Option<String>,
    sentiment: Option<Sentiment>,
    limit: Option<i64>,
    offset: Option<i64>,
}

fn validate_text(text: &str) -> Result<()> {
    let len = text.chars().count();
    if len == 0 {
        return Err(Error::Validation("text must not be empty".into()));
    }
    if len > MAX_TEXT_CHARS {
        return Err(Error::Validation(format!(
            "text must be at most {} characters, got {}",
            MAX_TEXT_CHARS, len
        )));
    }
    Ok(())
}

fn validate_search(params: SearchParams) -> Result<SearchQuery> {
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT as i64);
    if !(1..=MAX_SEARCH_LIMIT as i64).contains(&limit) {
        return Err(Error::Validation(format!(
            "limit must be between 1 and {}",
            MAX_SEARCH_LIMIT
        )));
    }
    let offset = params.offset.unwrap_or(0);
    if offset < 0 {
        return Err(Error::Validation(
            "offset must be greater than or equal to 0".into(),
        ));
    }
    Ok(SearchQuery {
        keyword: params.keyword,
        sentiment: params.sentiment,
        limit: limit as usize,
        offset: offset as usize,
    })
}

/// POST /analysis/analyze — analyze text and persist the result.
async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
        }
    };
    if let Err(e) = validate_text(&req.text) {
        return error_response(error_status(&e), e.to_string());
    }

    let analysis = match state.orchestrator.analyze_text(&req.text).await {
        Ok(analysis) => analysis,
        Err(e) => {
            error!(error = %e, "Error analyzing text");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to analyze text");
        }
    };

    match state.store.add_analysis(&req.text, &analysis) {
        Ok(record) => {
            info!(id = record.id, sentiment = %record.sentiment, "Analysis stored");
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Error storing analysis");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to analyze text")
        }
    }
}

/// GET /analysis/search — filter by keyword and/or sentiment, paginated.
async fn search(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let query = match params
        .map_err(|r| Error::Validation(r.body_text()))
        .and_then(|Query(p)| validate_search(p))
    {
        Ok(query) => query,
        Err(e) => return error_response(error_status(&e), e.to_string()),
    };

    match state.store.search(&query) {
        Ok(page) => Json(page).into_response(),
        Err(e) => {
            error!(error = %e, "Error searching analyses");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to search analyses")
        }
    }
}

/// GET /analysis/{id} — one stored analysis.
async fn get_analysis(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    let lookup = state
        .store
        .get_analysis(id)
        .and_then(|record| record.ok_or_else(|| Error::NotFound(format!("analysis {}", id))));

    match lookup {
        Ok(record) => Json(record).into_response(),
        Err(e) => {
            if !matches!(e, Error::NotFound(_)) {
                error!(error = %e, id, "Error loading analysis");
            }
            error_response(error_status(&e), e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{get, post_json, send, test_app};

    const TEXT: &str = "The dog chased the cat. The dog caught the cat. A dog is happy.";

    #[tokio::test]
    async fn test_analyze_creates_record() {
        let (app, _dir) = test_app();
        let (status, body) = send(&app, post_json("/analysis/analyze", json!({ "text": TEXT }))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].as_i64().unwrap() > 0);
        assert_eq!(body["text"], TEXT);
        assert!(body["summary"]
            .as_str()
            .unwrap()
            .starts_with("This is a mock summary"));
        assert!(body["metadata"]["title"]
            .as_str()
            .unwrap()
            .starts_with("Mock Title "));
        assert_eq!(body["metadata"]["topics"].as_array().unwrap().len(), 3);
        assert_eq!(body["sentiment"], "neutral");
        assert_eq!(body["keywords"], json!(["dog", "cat"]));
        assert_eq!(body["metadata"]["keywords"], json!(["dog", "cat"]));
        assert!(body["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_rejects_invalid_text() {
        let (app, _dir) = test_app();

        let cases = [
            json!({ "text": "" }),
            json!({}),
            json!({ "text": null }),
            json!({ "text": "a".repeat(10_001) }),
        ];
        for body in cases {
            let (status, resp) = send(&app, post_json("/analysis/analyze", body)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(resp["detail"].is_string());
        }

        let (status, _) = send(
            &app,
            post_json("/analysis/analyze", json!({ "text": "a".repeat(10_000) })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_search_filters_and_paginates() {
        let (app, _dir) = test_app();
        for text in [TEXT, "Rust programs manage memory with ownership.", "Tokio runs async tasks."] {
            let (status, _) = send(&app, post_json("/analysis/analyze", json!({ "text": text }))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, get("/analysis/search")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["offset"], 0);
        assert_eq!(body["results"][0]["text"], "Tokio runs async tasks.");

        let (_, body) = send(&app, get("/analysis/search?keyword=OWNERSHIP")).await;
        assert_eq!(body["total"], 1);

        let (_, body) = send(&app, get("/analysis/search?sentiment=neutral&limit=2&offset=1")).await;
        assert_eq!(body["total"], 3);
        assert_eq!(body["results"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, get("/analysis/search?sentiment=positive")).await;
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_get_analysis_by_id() {
        let (app, _dir) = test_app();
        let (_, created) = send(&app, post_json("/analysis/analyze", json!({ "text": TEXT }))).await;
        let id = created["id"].as_i64().unwrap();

        let (status, body) = send(&app, get(&format!("/analysis/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);

        let (status, body) = send(&app, get(&format!("/analysis/{}", id + 1))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], format!("Not found: analysis {}", id + 1));
    }

    #[tokio::test]
    async fn test_search_rejects_invalid_params() {
        let (app, _dir) = test_app();
        for uri in [
            "/analysis/search?limit=0",
            "/analysis/search?limit=101",
            "/analysis/search?offset=-1",
            "/analysis/search?limit=abc",
            "/analysis/search?sentiment=angry",
        ] {
            let (status, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(body["detail"].is_string());
        }
    }
}
