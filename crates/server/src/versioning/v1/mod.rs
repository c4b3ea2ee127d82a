use async_trait::async_trait;
use axum::http::StatusCode;
use db::{
    DatabaseConnection, DbErr,
    models::{
        game::{CreateGame, Game},
        scoring_event::{CreateScoringEvent, ScoringEvent},
    },
};
use serde_json::Value;
use uuid::Uuid;

use crate::{error::ApiError, request::InboundRequest, versioning::ApiRules};

pub mod dto;
pub mod validation;

use dto::{
    CreateGameBody, CreateScoringEventBody, CreatedResponse, GameResponse, MessageResponse,
    ScoringEventResponse, parse_timestamp,
};

pub const VERSION: &str = "v1";

const BAD_REQUEST_MESSAGE: &str = "Bad request.";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

pub struct V1Rules;

#[async_trait]
impl ApiRules for V1Rules {
    fn version(&self) -> &'static str {
        VERSION
    }

    async fn validate_create_game(
        &self,
        db: &DatabaseConnection,
        request: &InboundRequest,
    ) -> Result<bool, DbErr> {
        validation::validate_create_game(db, request).await
    }

    async fn validate_create_scoring_event(
        &self,
        db: &DatabaseConnection,
        request: &InboundRequest,
    ) -> Result<bool, DbErr> {
        validation::validate_create_scoring_event(db, request).await
    }

    fn create_game_request(&self, body: &Value) -> Result<CreateGame, ApiError> {
        let body: CreateGameBody = serde_json::from_value(body.clone())?;
        Ok(CreateGame {
            id: body.id,
            start: parse_timestamp("start", &body.start)?,
            end: parse_timestamp("end", &body.end)?,
            arrive: parse_timestamp("arrive", &body.arrive)?,
        })
    }

    fn create_scoring_event_request(&self, body: &Value) -> Result<CreateScoringEvent, ApiError> {
        let body: CreateScoringEventBody = serde_json::from_value(body.clone())?;
        Ok(CreateScoringEvent {
            id: body.id,
            game_id: body.game_id,
            timestamp: parse_timestamp("timestamp", &body.timestamp)?,
            data: body.data.into(),
        })
    }

    fn created_body(&self, id: Uuid) -> Value {
        serde_json::json!(CreatedResponse { id })
    }

    fn games_body(&self, games: &[Game]) -> Value {
        let games: Vec<GameResponse> = games.iter().map(GameResponse::from).collect();
        serde_json::json!(games)
    }

    fn scoring_event_body(&self, event: Option<&ScoringEvent>) -> Result<Value, ApiError> {
        let event = event.map(ScoringEventResponse::try_from).transpose()?;
        Ok(serde_json::json!(event))
    }

    fn scoring_events_body(&self, events: &[ScoringEvent]) -> Result<Value, ApiError> {
        let events = events
            .iter()
            .map(ScoringEventResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(serde_json::json!(events))
    }

    fn error_body(&self, status: StatusCode) -> Value {
        let message = if status.is_server_error() {
            INTERNAL_ERROR_MESSAGE
        } else {
            BAD_REQUEST_MESSAGE
        };
        serde_json::json!(MessageResponse { message })
    }
}
