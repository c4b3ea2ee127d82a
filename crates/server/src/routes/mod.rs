use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{AppState, error::ApiError, request::RouteParams, versioning::ApiRules};

pub mod games;
pub mod health;
pub mod scoring_events;

/// Resource routes, served both unprefixed and under `/{version}`.
pub fn router() -> Router<AppState> {
    let resources = Router::new()
        .merge(games::router())
        .merge(scoring_events::router());

    Router::new()
        .merge(resources.clone())
        .nest("/{version}", resources)
}

pub(crate) fn respond(rules: &dyn ApiRules, outcome: Result<Value, ApiError>) -> Response {
    match outcome {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => err.into_versioned_response(rules),
    }
}

/// Method fallback for every resource route.
pub(crate) async fn unsupported_method(
    State(state): State<AppState>,
    params: RouteParams,
) -> Response {
    let rules = state.versions().resolve(params.version());
    ApiError::BadRequest("unsupported method".to_string()).into_versioned_response(rules.as_ref())
}
