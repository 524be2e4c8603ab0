use crate::db::client::DbClient;
use crate::db::connection::{ConnectionConfig, DbType, InitKeyType};
use crate::db::schema::Entity;
use crate::domain::SystemUser;
use crate::error::BlogError;
use std::sync::Arc;
use tracing::info;

pub struct SqlContext;

impl SqlContext {
    /// Create or update the blog tables in the MySQL database at `connection_string`.
    pub async fn init_tables(connection_string: &str) -> Result<(), BlogError> {
        Self::init_tables_for(DbType::MySql, connection_string).await
    }

    pub async fn init_tables_for(db_type: DbType, connection_string: &str) -> Result<(), BlogError> {
        let config = ConnectionConfig {
            connection_string: connection_string.to_string(),
            db_type,
            is_auto_close_connection: true,
            init_key_type: InitKeyType::Attribute,
            max_connections: None,
        };
        let client = DbClient::new(Arc::new(config))?;

        info!(db_type = %db_type, "initializing tables");
        let result = client
            .code_first()
            .init_tables(&[&SystemUser::TABLE])
            .await;
        client.close().await;
        result
    }
}
