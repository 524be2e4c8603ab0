use crate::error::BlogError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Database engine behind a connection string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    #[default]
    MySql,
    Sqlite,
}

impl DbType {
    /// URL schemes sqlx accepts for this engine.
    pub fn schemes(&self) -> &'static [&'static str] {
        match self {
            DbType::MySql => &["mysql", "mariadb"],
            DbType::Sqlite => &["sqlite"],
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbType::MySql => write!(f, "mysql"),
            DbType::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Where primary key information comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitKeyType {
    /// Keys are declared on the entity's table schema.
    #[default]
    Attribute,
    /// Keys are read from the database catalog.
    SystemTable,
}

/// Everything a [`DbClient`](super::DbClient) needs to open its pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub connection_string: String,
    pub db_type: DbType,
    /// Release connections as soon as an operation finishes.
    pub is_auto_close_connection: bool,
    pub init_key_type: InitKeyType,
    /// Pool ceiling; sqlx's default when unset.
    pub max_connections: Option<u32>,
}

impl ConnectionConfig {
    pub fn new(connection_string: impl Into<String>, db_type: DbType) -> Self {
        Self {
            connection_string: connection_string.into(),
            db_type,
            ..Self::default()
        }
    }

    /// Check the config is complete enough to build a client from.
    pub fn validate(&self) -> Result<(), BlogError> {
        let conn = self.connection_string.trim();
        if conn.is_empty() {
            return Err(BlogError::InvalidConnectionConfig(
                "connection string is empty".to_string(),
            ));
        }

        let scheme = conn
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();
        if !self.db_type.schemes().contains(&scheme.as_str()) {
            return Err(BlogError::InvalidConnectionConfig(format!(
                "connection string scheme '{scheme}' does not match database type {}",
                self.db_type
            )));
        }

        if self.max_connections == Some(0) {
            return Err(BlogError::InvalidConnectionConfig(
                "max_connections must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
