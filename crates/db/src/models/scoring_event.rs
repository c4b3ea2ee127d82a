use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionSession, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    entities::{scorekeeping_data, scoring_event},
    models::{ConstraintViolation, constraint_violation},
    types::{ScorekeepingCode, ScorekeepingResult},
};

#[derive(Debug, Error)]
pub enum ScoringEventError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("Scoring event already exists: {0}")]
    AlreadyExists(Uuid),
    #[error("Game not found: {0}")]
    GameNotFound(Uuid),
}

/// Attribute payload persisted as JSON alongside a scorekeeping code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorekeepingAttributes {
    pub advances_count: bool,
    pub result: ScorekeepingResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorekeepingData {
    pub code: ScorekeepingCode,
    pub attributes: ScorekeepingAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringEvent {
    pub id: Uuid,
    pub game_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Only populated when the read asked for the related scorekeeping row.
    pub data: Option<ScorekeepingData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScoringEvent {
    pub id: Uuid,
    pub game_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub data: ScorekeepingData,
}

impl ScorekeepingData {
    fn from_model(model: scorekeeping_data::Model) -> Result<Self, ScoringEventError> {
        Ok(Self {
            code: model.code,
            attributes: serde_json::from_value(model.attributes)?,
        })
    }
}

impl ScoringEvent {
    fn from_models(
        model: scoring_event::Model,
        data: Option<scorekeeping_data::Model>,
    ) -> Result<Self, ScoringEventError> {
        let data = data.map(ScorekeepingData::from_model).transpose()?;
        Ok(Self {
            id: model.id,
            game_id: model.game_id,
            timestamp: model.timestamp,
            data,
        })
    }

    /// Inserts the event and its scorekeeping row in one transaction.
    pub async fn create<C>(db: &C, data: &CreateScoringEvent) -> Result<Self, ScoringEventError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let now = Utc::now();
        let attributes = serde_json::to_value(data.data.attributes)?;

        let txn = db.begin().await?;
        let inserted = scoring_event::ActiveModel {
            id: Set(data.id),
            game_id: Set(data.game_id),
            timestamp: Set(data.timestamp),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await;
        let event = match inserted {
            Ok(event) => event,
            Err(err) => {
                txn.rollback().await?;
                return Err(Self::classify(err, data));
            }
        };

        let scorekeeping = scorekeeping_data::ActiveModel {
            scoring_event_id: Set(event.id),
            code: Set(data.data.code),
            attributes: Set(attributes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        Self::from_models(event, Some(scorekeeping))
    }

    fn classify(err: DbErr, data: &CreateScoringEvent) -> ScoringEventError {
        match constraint_violation(&err) {
            Some(ConstraintViolation::Unique) => ScoringEventError::AlreadyExists(data.id),
            Some(ConstraintViolation::ForeignKey) => ScoringEventError::GameNotFound(data.game_id),
            None => err.into(),
        }
    }

    pub async fn exists<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, DbErr> {
        let record = scoring_event::Entity::find_by_id(id).one(db).await?;
        Ok(record.is_some())
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        include_data: bool,
    ) -> Result<Option<Self>, ScoringEventError> {
        if include_data {
            let record = scoring_event::Entity::find_by_id(id)
                .find_also_related(scorekeeping_data::Entity)
                .one(db)
                .await?;
            record
                .map(|(event, data)| Self::from_models(event, data))
                .transpose()
        } else {
            let record = scoring_event::Entity::find_by_id(id).one(db).await?;
            record
                .map(|event| Self::from_models(event, None))
                .transpose()
        }
    }

    /// Events for one game, most recent `timestamp` first.
    pub async fn find_by_game_id<C: ConnectionTrait>(
        db: &C,
        game_id: Uuid,
        include_data: bool,
    ) -> Result<Vec<Self>, ScoringEventError> {
        let query = scoring_event::Entity::find()
            .filter(scoring_event::Column::GameId.eq(game_id))
            .order_by_desc(scoring_event::Column::Timestamp);

        if include_data {
            query
                .find_also_related(scorekeeping_data::Entity)
                .all(db)
                .await?
                .into_iter()
                .map(|(event, data)| Self::from_models(event, data))
                .collect()
        } else {
            query
                .all(db)
                .await?
                .into_iter()
                .map(|event| Self::from_models(event, None))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use sea_orm::{Database, DatabaseConnection, PaginatorTrait};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::models::game::{CreateGame, Game};

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db_migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn seed_game(db: &DatabaseConnection) -> Uuid {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();
        let game = Game::create(
            db,
            &CreateGame {
                id: Uuid::new_v4(),
                start,
                end: start + chrono::Duration::hours(3),
                arrive: start - chrono::Duration::minutes(30),
            },
        )
        .await
        .unwrap();
        game.id
    }

    fn pitch(game_id: Uuid, minute: u32) -> CreateScoringEvent {
        CreateScoringEvent {
            id: Uuid::new_v4(),
            game_id,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 18, minute, 0).unwrap(),
            data: ScorekeepingData {
                code: ScorekeepingCode::Pitch,
                attributes: ScorekeepingAttributes {
                    advances_count: true,
                    result: ScorekeepingResult::BallInPlay,
                },
            },
        }
    }

    #[tokio::test]
    async fn create_persists_event_and_scorekeeping_row() {
        let db = setup_db().await;
        let game_id = seed_game(&db).await;
        let data = pitch(game_id, 5);

        let created = ScoringEvent::create(&db, &data).await.unwrap();
        assert_eq!(created.data, Some(data.data));

        let found = ScoringEvent::find_by_id(&db, data.id, true)
            .await
            .unwrap()
            .expect("scoring event");
        assert_eq!(found.game_id, game_id);
        assert_eq!(found.timestamp, data.timestamp);
        assert_eq!(found.data, Some(data.data));

        let without_data = ScoringEvent::find_by_id(&db, data.id, false)
            .await
            .unwrap()
            .expect("scoring event");
        assert_eq!(without_data.data, None);
    }

    #[tokio::test]
    async fn attributes_are_stored_camel_case() {
        let db = setup_db().await;
        let game_id = seed_game(&db).await;
        let data = pitch(game_id, 5);
        ScoringEvent::create(&db, &data).await.unwrap();

        let row = scorekeeping_data::Entity::find()
            .filter(scorekeeping_data::Column::ScoringEventId.eq(data.id))
            .one(&db)
            .await
            .unwrap()
            .expect("scorekeeping row");
        assert_eq!(
            row.attributes,
            serde_json::json!({ "advancesCount": true, "result": "ball_in_play" })
        );
    }

    #[tokio::test]
    async fn missing_game_is_a_constraint_violation() {
        let db = setup_db().await;
        let data = pitch(Uuid::new_v4(), 5);

        let err = ScoringEvent::create(&db, &data).await.unwrap_err();
        assert!(matches!(err, ScoringEventError::GameNotFound(id) if id == data.game_id));
        assert_eq!(scorekeeping_data::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_id_leaves_no_orphan_rows() {
        let db = setup_db().await;
        let game_id = seed_game(&db).await;
        let data = pitch(game_id, 5);
        ScoringEvent::create(&db, &data).await.unwrap();

        let err = ScoringEvent::create(&db, &data).await.unwrap_err();
        assert!(matches!(err, ScoringEventError::AlreadyExists(id) if id == data.id));
        assert_eq!(scorekeeping_data::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_by_game_id_filters_and_orders_newest_first() {
        let db = setup_db().await;
        let game_id = seed_game(&db).await;
        let other_game = seed_game(&db).await;

        let first = pitch(game_id, 1);
        let third = pitch(game_id, 30);
        let second = pitch(game_id, 10);
        for data in [&first, &third, &second] {
            ScoringEvent::create(&db, data).await.unwrap();
        }
        ScoringEvent::create(&db, &pitch(other_game, 20)).await.unwrap();

        let events = ScoringEvent::find_by_game_id(&db, game_id, true).await.unwrap();
        let ids: Vec<Uuid> = events.iter().map(|event| event.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
        assert!(events.iter().all(|event| event.data.is_some()));

        let empty = ScoringEvent::find_by_game_id(&db, Uuid::new_v4(), true)
            .await
            .unwrap();
        assert!(empty.is_empty());
    }
}
