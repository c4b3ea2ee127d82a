use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::{
    DbErr,
    models::{game::GameError, scoring_event::ScoringEventError},
};
use thiserror::Error;

use crate::versioning::{ApiRules, v1::V1Rules};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    ScoringEvent(#[from] ScoringEventError),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Malformed JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Invalid timestamp for {field}: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Store-side uniqueness and reference checks lost a race with
            // validation; report them the way validation would have.
            ApiError::Game(GameError::AlreadyExists(_)) => StatusCode::BAD_REQUEST,
            ApiError::ScoringEvent(
                ScoringEventError::AlreadyExists(_) | ScoringEventError::GameNotFound(_),
            ) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Game(_)
            | ApiError::ScoringEvent(_)
            | ApiError::Database(_)
            | ApiError::MalformedBody(_)
            | ApiError::InvalidTimestamp { .. }
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders the error with the body format of the given API version. The
    /// underlying message is logged, never returned.
    pub fn into_versioned_response(self, rules: &dyn ApiRules) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(
                status = %status_code,
                api_version = rules.version(),
                error = %self,
                "API request failed"
            );
        } else {
            tracing::debug!(
                status = %status_code,
                api_version = rules.version(),
                error = %self,
                "Rejected request"
            );
        }
        (status_code, Json(rules.error_body(status_code))).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_versioned_response(&V1Rules)
    }
}
