use std::collections::HashMap;

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::Method,
    response::Response,
    routing::get,
};
use db::models::scoring_event::ScoringEvent;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    request::{InboundRequest, RouteParams},
    routes::{respond, unsupported_method},
    versioning::ApiRules,
};

pub async fn create_scoring_event(
    State(state): State<AppState>,
    params: RouteParams,
    method: Method,
    body: Bytes,
) -> Response {
    let rules = state.versions().resolve(params.version());
    let outcome = create_scoring_event_inner(&state, rules.as_ref(), method, &body).await;
    respond(rules.as_ref(), outcome)
}

async fn create_scoring_event_inner(
    state: &AppState,
    rules: &dyn ApiRules,
    method: Method,
    body: &[u8],
) -> Result<Value, ApiError> {
    state.db().ensure_schema().await?;

    let request = InboundRequest::from_parts(method, body)?;
    if !rules
        .validate_create_scoring_event(&state.db().conn, &request)
        .await?
    {
        return Err(ApiError::BadRequest(
            "invalid create scoring event payload".to_string(),
        ));
    }
    let body = request
        .body
        .as_ref()
        .ok_or_else(|| ApiError::Internal("validated request has no body".to_string()))?;
    let payload = rules.create_scoring_event_request(body)?;

    let event = ScoringEvent::create(&state.db().conn, &payload).await?;
    tracing::info!(
        scoring_event_id = %event.id,
        game_id = %event.game_id,
        "Created scoring event"
    );
    Ok(rules.created_body(event.id))
}

fn uuid_param(name: &str, value: Option<&str>) -> Result<Uuid, ApiError> {
    let value = value.ok_or_else(|| ApiError::BadRequest(format!("missing {name}")))?;
    Uuid::parse_str(value).map_err(|_| ApiError::BadRequest(format!("invalid {name}: {value}")))
}

pub async fn get_scoring_event(State(state): State<AppState>, params: RouteParams) -> Response {
    let rules = state.versions().resolve(params.version());
    let outcome = get_scoring_event_inner(&state, rules.as_ref(), &params).await;
    respond(rules.as_ref(), outcome)
}

async fn get_scoring_event_inner(
    state: &AppState,
    rules: &dyn ApiRules,
    params: &RouteParams,
) -> Result<Value, ApiError> {
    state.db().ensure_schema().await?;
    let id = uuid_param("id", params.get("id"))?;
    // Absent events render as a null body with 200, not as 404.
    let event = ScoringEvent::find_by_id(&state.db().conn, id, true).await?;
    rules.scoring_event_body(event.as_ref())
}

pub async fn list_scoring_events(
    State(state): State<AppState>,
    params: RouteParams,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let rules = state.versions().resolve(params.version());
    let game_id = query.get("game_id").map(String::as_str).filter(|id| !id.is_empty());
    let outcome = list_scoring_events_inner(&state, rules.as_ref(), game_id).await;
    respond(rules.as_ref(), outcome)
}

async fn list_scoring_events_inner(
    state: &AppState,
    rules: &dyn ApiRules,
    game_id: Option<&str>,
) -> Result<Value, ApiError> {
    state.db().ensure_schema().await?;
    let game_id = uuid_param("game_id", game_id)?;
    let events = ScoringEvent::find_by_game_id(&state.db().conn, game_id, true).await?;
    rules.scoring_events_body(&events)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/scoring-events",
            get(list_scoring_events)
                .post(create_scoring_event)
                .fallback(unsupported_method),
        )
        .route(
            "/scoring-events/{id}",
            get(get_scoring_event).fallback(unsupported_method),
        )
}
