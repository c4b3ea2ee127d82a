use std::str::FromStr;

use db::{
    ConnectionTrait, DbErr,
    models::{game::Game, scoring_event::ScoringEvent},
    types::{ScorekeepingCode, ScorekeepingResult},
};
use serde_json::Value;
use uuid::{Uuid, Version};

use crate::request::InboundRequest;

const GAME_TIME_FIELDS: [&str; 3] = ["start", "end", "arrive"];

fn required_str<'a>(object: &'a Value, field: &str) -> Option<&'a str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Ids are client-generated random (v4) UUIDs.
fn required_uuid(object: &Value, field: &str) -> Option<Uuid> {
    required_str(object, field)
        .and_then(|value| Uuid::parse_str(value).ok())
        .filter(|id| id.get_version() == Some(Version::Random))
}

fn required_enum<T: FromStr>(object: &Value, field: &str) -> Option<T> {
    required_str(object, field).and_then(|value| T::from_str(value).ok())
}

fn required_object<'a>(object: &'a Value, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|value| value.is_object())
}

/// Date strings are only type-checked here; their format is checked when the
/// request is converted.
pub async fn validate_create_game<C: ConnectionTrait>(
    db: &C,
    request: &InboundRequest,
) -> Result<bool, DbErr> {
    let Some(body) = request.post_object() else {
        return Ok(false);
    };
    let Some(id) = required_uuid(body, "id") else {
        return Ok(false);
    };
    if GAME_TIME_FIELDS
        .iter()
        .any(|field| required_str(body, field).is_none())
    {
        return Ok(false);
    }

    Ok(!Game::exists(db, id).await?)
}

fn attributes_valid(attributes: &Value) -> bool {
    let advances_count = attributes
        .get("advances_count")
        .is_some_and(Value::is_boolean);
    let result = required_enum::<ScorekeepingResult>(attributes, "result").is_some();
    advances_count && result
}

pub async fn validate_create_scoring_event<C: ConnectionTrait>(
    db: &C,
    request: &InboundRequest,
) -> Result<bool, DbErr> {
    let Some(body) = request.post_object() else {
        return Ok(false);
    };
    let (Some(id), Some(game_id), Some(_)) = (
        required_uuid(body, "id"),
        required_uuid(body, "game_id"),
        required_str(body, "timestamp"),
    ) else {
        return Ok(false);
    };
    let Some(data) = required_object(body, "data") else {
        return Ok(false);
    };
    if required_enum::<ScorekeepingCode>(data, "code").is_none() {
        return Ok(false);
    }
    let Some(attributes) = required_object(data, "attributes") else {
        return Ok(false);
    };

    let attributes_valid = attributes_valid(attributes);
    let game_exists = Game::exists(db, game_id).await?;
    let scoring_event_exists = ScoringEvent::exists(db, id).await?;

    Ok(attributes_valid && game_exists && !scoring_event_exists)
}
