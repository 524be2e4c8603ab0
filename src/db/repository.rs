use crate::db::client::DbClient;
use std::sync::Arc;

/// Shared state of every repository: the client queries go through.
#[derive(Debug, Clone)]
pub struct BaseSqlRepository {
    db: Arc<DbClient>,
}

impl BaseSqlRepository {
    pub fn new(client: Arc<DbClient>) -> Self {
        Self { db: client }
    }

    pub fn db(&self) -> &DbClient {
        &self.db
    }
}
