use std::sync::Arc;

use db_migration::Migrator;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tokio::sync::OnceCell;

pub mod entities;
pub mod models;
pub mod types;

pub use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

/// Handle to the relational store shared by every request.
///
/// Built once at startup and cloned into request state; clones share the same
/// connection pool and schema bookkeeping.
#[derive(Clone, Debug)]
pub struct DBService {
    pub conn: DatabaseConnection,
    schema_ready: Arc<OnceCell<()>>,
}

impl DBService {
    pub async fn connect(database_url: &str) -> Result<DBService, DbErr> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options.sqlx_logging(false);
        let conn = Database::connect(options).await?;
        tracing::debug!(backend = ?conn.get_database_backend(), "Connected to database");
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: DatabaseConnection) -> DBService {
        DBService {
            conn,
            schema_ready: Arc::new(OnceCell::new()),
        }
    }

    /// Creates or verifies the games, scoring event and scorekeeping tables.
    ///
    /// Idempotent: migrations already applied are skipped, and after the first
    /// success in this process the call returns without touching the store.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        self.schema_ready
            .get_or_try_init(|| async {
                Migrator::up(&self.conn, None).await?;
                tracing::info!("Database schema is up to date");
                Ok::<(), DbErr>(())
            })
            .await?;
        Ok(())
    }
}
