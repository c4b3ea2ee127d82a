use std::sync::Arc;

use db::DBService;

use crate::versioning::VersionRegistry;

pub mod error;
pub mod http;
pub mod request;
pub mod routes;
pub mod versioning;

/// Shared handler state: the store handle and the per-version rule registry.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
    versions: Arc<VersionRegistry>,
}

impl AppState {
    pub fn new(db: DBService) -> Self {
        Self {
            db,
            versions: Arc::new(VersionRegistry::new()),
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn versions(&self) -> &VersionRegistry {
        &self.versions
    }
}
