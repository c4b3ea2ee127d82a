use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::Method,
    response::Response,
    routing::get,
};
use db::models::game::{Game, GameOrder};
use serde_json::Value;

use crate::{
    AppState,
    error::ApiError,
    request::{InboundRequest, RouteParams},
    routes::{respond, unsupported_method},
    versioning::ApiRules,
};

pub async fn create_game(
    State(state): State<AppState>,
    params: RouteParams,
    method: Method,
    body: Bytes,
) -> Response {
    let rules = state.versions().resolve(params.version());
    let outcome = create_game_inner(&state, rules.as_ref(), method, &body).await;
    respond(rules.as_ref(), outcome)
}

async fn create_game_inner(
    state: &AppState,
    rules: &dyn ApiRules,
    method: Method,
    body: &[u8],
) -> Result<Value, ApiError> {
    state.db().ensure_schema().await?;

    let request = InboundRequest::from_parts(method, body)?;
    if !rules.validate_create_game(&state.db().conn, &request).await? {
        return Err(ApiError::BadRequest("invalid create game payload".to_string()));
    }
    let body = request
        .body
        .as_ref()
        .ok_or_else(|| ApiError::Internal("validated request has no body".to_string()))?;
    let payload = rules.create_game_request(body)?;

    let game = Game::create(&state.db().conn, &payload).await?;
    tracing::info!(game_id = %game.id, "Created game");
    Ok(rules.created_body(game.id))
}

pub async fn list_games(State(state): State<AppState>, params: RouteParams) -> Response {
    let rules = state.versions().resolve(params.version());
    let outcome = list_games_inner(&state, rules.as_ref()).await;
    respond(rules.as_ref(), outcome)
}

async fn list_games_inner(state: &AppState, rules: &dyn ApiRules) -> Result<Value, ApiError> {
    state.db().ensure_schema().await?;
    let games = Game::find_all(&state.db().conn, GameOrder::StartDescending).await?;
    Ok(rules.games_body(&games))
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/games",
        get(list_games)
            .post(create_game)
            .fallback(unsupported_method),
    )
}
