use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use db::{
    models::{
        game::Game,
        scoring_event::{ScorekeepingAttributes, ScorekeepingData, ScoringEvent},
    },
    types::{ScorekeepingCode, ScorekeepingResult},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateGameBody {
    pub id: Uuid,
    pub start: String,
    pub end: String,
    pub arrive: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateScoringEventBody {
    pub id: Uuid,
    pub game_id: Uuid,
    pub timestamp: String,
    pub data: ScorekeepingDataBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScorekeepingDataBody {
    pub code: ScorekeepingCode,
    pub attributes: ScorekeepingAttributesBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScorekeepingAttributesBody {
    pub advances_count: bool,
    pub result: ScorekeepingResult,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub id: Uuid,
    pub start: String,
    pub end: String,
    pub arrive: String,
}

#[derive(Debug, Serialize)]
pub struct ScoringEventResponse {
    pub id: Uuid,
    pub game_id: Uuid,
    pub timestamp: String,
    pub data: ScorekeepingDataBody,
}

/// Wire timestamps are UTC with millisecond precision, e.g.
/// `2024-05-01T18:00:00.000Z`.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts ISO-8601 date-times with or without an offset, and bare dates.
/// Values without an offset are read as UTC; bare dates mean UTC midnight.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(parsed.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| ApiError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

impl From<ScorekeepingDataBody> for ScorekeepingData {
    fn from(body: ScorekeepingDataBody) -> Self {
        Self {
            code: body.code,
            attributes: ScorekeepingAttributes {
                advances_count: body.attributes.advances_count,
                result: body.attributes.result,
            },
        }
    }
}

impl From<&ScorekeepingData> for ScorekeepingDataBody {
    fn from(data: &ScorekeepingData) -> Self {
        Self {
            code: data.code,
            attributes: ScorekeepingAttributesBody {
                advances_count: data.attributes.advances_count,
                result: data.attributes.result,
            },
        }
    }
}

impl From<&Game> for GameResponse {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id,
            start: format_timestamp(&game.start),
            end: format_timestamp(&game.end),
            arrive: format_timestamp(&game.arrive),
        }
    }
}

impl TryFrom<&ScoringEvent> for ScoringEventResponse {
    type Error = ApiError;

    fn try_from(event: &ScoringEvent) -> Result<Self, Self::Error> {
        let data = event.data.as_ref().ok_or_else(|| {
            ApiError::Internal(format!(
                "scoring event {} has no scorekeeping data",
                event.id
            ))
        })?;
        Ok(Self {
            id: event.id,
            game_id: event.game_id,
            timestamp: format_timestamp(&event.timestamp),
            data: data.into(),
        })
    }
}
