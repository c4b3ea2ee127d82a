use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    entities::game,
    models::{ConstraintViolation, constraint_violation},
};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Game already exists: {0}")]
    AlreadyExists(Uuid),
}

/// A scheduled game. Bookkeeping timestamps stay in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub arrive: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGame {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub arrive: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameOrder {
    #[default]
    StartDescending,
    StartAscending,
}

impl Game {
    fn from_model(model: game::Model) -> Self {
        Self {
            id: model.id,
            start: model.start,
            end: model.end,
            arrive: model.arrive,
        }
    }

    pub async fn create<C: ConnectionTrait>(db: &C, data: &CreateGame) -> Result<Self, GameError> {
        let now = Utc::now();
        let active = game::ActiveModel {
            id: Set(data.id),
            start: Set(data.start),
            end: Set(data.end),
            arrive: Set(data.arrive),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match active.insert(db).await {
            Ok(model) => Ok(Self::from_model(model)),
            Err(err) if constraint_violation(&err) == Some(ConstraintViolation::Unique) => {
                Err(GameError::AlreadyExists(data.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Self>, DbErr> {
        let record = game::Entity::find_by_id(id).one(db).await?;
        Ok(record.map(Self::from_model))
    }

    pub async fn exists<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, DbErr> {
        Ok(Self::find_by_id(db, id).await?.is_some())
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C, order: GameOrder) -> Result<Vec<Self>, DbErr> {
        let query = game::Entity::find();
        let query = match order {
            GameOrder::StartDescending => query.order_by_desc(game::Column::Start),
            GameOrder::StartAscending => query.order_by_asc(game::Column::Start),
        };
        let records = query.all(db).await?;
        Ok(records.into_iter().map(Self::from_model).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use sea_orm::{Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    use super::*;

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db_migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn game_starting_at(hour: u32) -> CreateGame {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap();
        CreateGame {
            id: Uuid::new_v4(),
            start,
            end: start + chrono::Duration::hours(3),
            arrive: start - chrono::Duration::minutes(30),
        }
    }

    #[tokio::test]
    async fn create_then_find_by_id_round_trips_times() {
        let db = setup_db().await;
        let data = game_starting_at(18);

        let created = Game::create(&db, &data).await.unwrap();
        assert_eq!(created.id, data.id);

        let found = Game::find_by_id(&db, data.id).await.unwrap().expect("game");
        assert_eq!(found.start, data.start);
        assert_eq!(found.end, data.end);
        assert_eq!(found.arrive, data.arrive);
        assert!(Game::exists(&db, data.id).await.unwrap());
        assert!(!Game::exists(&db, Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected_by_the_store() {
        let db = setup_db().await;
        let data = game_starting_at(18);
        Game::create(&db, &data).await.unwrap();

        let err = Game::create(&db, &data).await.unwrap_err();
        assert!(matches!(err, GameError::AlreadyExists(id) if id == data.id));
    }

    #[tokio::test]
    async fn find_all_orders_by_start() {
        let db = setup_db().await;
        let early = game_starting_at(12);
        let late = game_starting_at(20);
        let middle = game_starting_at(16);
        for data in [&early, &late, &middle] {
            Game::create(&db, data).await.unwrap();
        }

        let desc: Vec<Uuid> = Game::find_all(&db, GameOrder::StartDescending)
            .await
            .unwrap()
            .into_iter()
            .map(|game| game.id)
            .collect();
        assert_eq!(desc, vec![late.id, middle.id, early.id]);

        let asc = Game::find_all(&db, GameOrder::StartAscending).await.unwrap();
        assert_eq!(asc.first().map(|game| game.id), Some(early.id));
    }
}
