//! REST API endpoints.
//!
//! Axum-based HTTP API exposing the assignment engine and the
//! tournament assignment workflow.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::roster::RosterError;
use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        let message = err.to_string();
        match err {
            StorageError::InvalidPath(_) => ApiError::BadRequest(message),
            _ => ApiError::Internal(message),
        }
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        let message = err.to_string();
        match err {
            RosterError::TournamentNotFound(_) => ApiError::NotFound(message),
            RosterError::TournamentStarted => ApiError::BadRequest(message),
            RosterError::Storage(e) => e.into(),
        }
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}, allowing any", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/api/health", get(routes::assign::health))
        .route("/api/assign", post(routes::assign::assign_players))
        .route("/api/validate", post(routes::assign::validate_team))
        .route(
            "/api/compositions/:mode",
            get(routes::compositions::get_composition),
        )
        .route(
            "/api/tournaments/:id/assign",
            post(routes::tournaments::assign_tournament),
        )
        .route(
            "/api/tournaments/:id/assignments",
            get(routes::tournaments::list_assignments),
        )
        .route(
            "/api/tournaments/:id/statistics",
            get(routes::tournaments::draft_statistics),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
