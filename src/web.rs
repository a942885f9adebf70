use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::models::ScrapeRequest;
use crate::scrape::{self, runner::ScraperRunner, ScrapeError};

// ── State ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<dyn ScraperRunner>,
}

// ── Router ───────────────────────────────────────────────────────────────────

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/scrape", post(scrape_endpoint))
        .with_state(state)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn scrape_endpoint(
    State(state): State<AppState>,
    body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    // Any body the request extractor rejects gets the contract's 400 shape,
    // never a framework rejection.
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected request body");
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    let url = match req.url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => return error_response(StatusCode::BAD_REQUEST, "URL is required"),
    };

    match scrape::scrape_listing(state.runner.as_ref(), url).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            let status = match &e {
                ScrapeError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                ScrapeError::ScraperFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
                ScrapeError::ScraperReported(_) => StatusCode::BAD_REQUEST,
                ScrapeError::UnparseableOutput(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, &e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}
