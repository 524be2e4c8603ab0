use crate::db::code_first::CodeFirst;
use crate::db::connection::{ConnectionConfig, DbType};
use crate::error::BlogError;
use sqlx::AnyPool;
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Idle timeout used when connections are closed after each operation.
const AUTO_CLOSE_IDLE_TIMEOUT: Duration = Duration::from_secs(1);

/// A constructor a client type declares to the registry.
pub enum ClientConstructor<C> {
    /// Builds the client from the registered [`ConnectionConfig`].
    WithConfig(fn(Arc<ConnectionConfig>) -> Result<C, BlogError>),
    /// Builds the client without any configuration.
    Parameterless(fn() -> C),
}

/// A SQL client that can be registered with `add_sql_client`.
pub trait SqlClient: Send + Sync + Sized + 'static {
    /// Every constructor the type offers.
    fn constructors() -> Vec<ClientConstructor<Self>>;

    /// The constructor that accepts a [`ConnectionConfig`], if any.
    fn config_constructor() -> Option<fn(Arc<ConnectionConfig>) -> Result<Self, BlogError>> {
        Self::constructors().into_iter().find_map(|ctor| match ctor {
            ClientConstructor::WithConfig(f) => Some(f),
            ClientConstructor::Parameterless(_) => None,
        })
    }
}

/// sqlx-backed client for MySQL and SQLite.
///
/// The pool is created lazily: building a client never touches the database,
/// but it must happen inside a Tokio runtime.
#[derive(Debug, Clone)]
pub struct DbClient {
    config: Arc<ConnectionConfig>,
    pool: AnyPool,
}

impl DbClient {
    pub fn new(config: Arc<ConnectionConfig>) -> Result<Self, BlogError> {
        config.validate()?;
        sqlx::any::install_default_drivers();

        let connect_opts = AnyConnectOptions::from_str(config.connection_string.trim())?;
        let mut pool_opts = AnyPoolOptions::new();
        if let Some(max) = config.max_connections {
            pool_opts = pool_opts.max_connections(max);
        }
        pool_opts = if config.is_auto_close_connection {
            pool_opts
                .min_connections(0)
                .idle_timeout(Some(AUTO_CLOSE_IDLE_TIMEOUT))
        } else {
            pool_opts.idle_timeout(None)
        };

        debug!(
            db_type = %config.db_type,
            auto_close = config.is_auto_close_connection,
            max_connections = ?config.max_connections,
            "creating sql client"
        );
        let pool = pool_opts.connect_lazy_with(connect_opts);
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn db_type(&self) -> DbType {
        self.config.db_type
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Schema management driven by entity table declarations.
    pub fn code_first(&self) -> CodeFirst<'_> {
        CodeFirst::new(self)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl SqlClient for DbClient {
    fn constructors() -> Vec<ClientConstructor<Self>> {
        vec![ClientConstructor::WithConfig(DbClient::new)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_lazily_from_valid_config() {
        let mut cfg = ConnectionConfig::new("sqlite:lazy-never-opened.db", DbType::Sqlite);
        cfg.is_auto_close_connection = true;
        cfg.max_connections = Some(2);

        let client = DbClient::new(Arc::new(cfg)).unwrap();
        assert_eq!(client.db_type(), DbType::Sqlite);
        assert_eq!(client.pool().size(), 0);
        assert!(!std::path::Path::new("lazy-never-opened.db").exists());
    }

    #[tokio::test]
    async fn rejects_incomplete_config() {
        let err = DbClient::new(Arc::new(ConnectionConfig::default())).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn db_client_declares_config_constructor() {
        assert!(DbClient::config_constructor().is_some());
    }
}
