//! Per-version request validation and response shaping.
//!
//! Every handler resolves an [`ApiRules`] entry from the [`VersionRegistry`]
//! using the `{version}` path segment. Unknown or missing versions resolve to
//! the default entry, so adding a version never changes how existing ones
//! behave.

use std::{collections::HashMap, sync::Arc};

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

use crate::{error::ApiError, request::InboundRequest};

pub mod v1;

pub const DEFAULT_VERSION: &str = v1::VERSION;

#[async_trait]
pub trait ApiRules: Send + Sync {
    fn version(&self) -> &'static str;

    /// True when the request is a well-formed create-game POST whose id is
    /// not taken yet. Reads the store, never writes it.
    async fn validate_create_game(
        &self,
        db: &DatabaseConnection,
        request: &InboundRequest,
    ) -> Result<bool, DbErr>;

    /// True when the request is a well-formed create-scoring-event POST that
    /// references an existing game and whose id is not taken yet.
    async fn validate_create_scoring_event(
        &self,
        db: &DatabaseConnection,
        request: &InboundRequest,
    ) -> Result<bool, DbErr>;

    fn create_game_request(&self, body: &Value) -> Result<CreateGame, ApiError>;

    fn create_scoring_event_request(&self, body: &Value) -> Result<CreateScoringEvent, ApiError>;

    fn created_body(&self, id: Uuid) -> Value;

    fn games_body(&self, games: &[Game]) -> Value;

    fn scoring_event_body(&self, event: Option<&ScoringEvent>) -> Result<Value, ApiError>;

    fn scoring_events_body(&self, events: &[ScoringEvent]) -> Result<Value, ApiError>;

    fn error_body(&self, status: StatusCode) -> Value;
}

pub struct VersionRegistry {
    rules: HashMap<&'static str, Arc<dyn ApiRules>>,
    default: Arc<dyn ApiRules>,
}

impl VersionRegistry {
    pub fn new() -> Self {
        let v1: Arc<dyn ApiRules> = Arc::new(v1::V1Rules);
        let mut registry = Self {
            rules: HashMap::new(),
            default: v1.clone(),
        };
        registry.register(v1);
        registry
    }

    pub fn register(&mut self, rules: Arc<dyn ApiRules>) {
        self.rules.insert(rules.version(), rules);
    }

    pub fn resolve(&self, requested: Option<&str>) -> Arc<dyn ApiRules> {
        match requested.and_then(|version| self.rules.get(version)) {
            Some(rules) => rules.clone(),
            None => {
                if let Some(version) = requested {
                    tracing::debug!(
                        requested = version,
                        fallback = self.default.version(),
                        "Unknown API version, using default rules"
                    );
                }
                self.default.clone()
            }
        }
    }

    pub fn versions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }
}

impl Default for VersionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
