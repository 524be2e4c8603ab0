use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BlogError {
    #[error(
        "add_sql_client was called with configuration, but client type '{client}' only declares \
         a parameterless constructor, so the configuration would never be used. '{client}' should \
         declare a constructor that accepts a {config} and pass it to the underlying client"
    )]
    MissingConfigConstructor {
        client: &'static str,
        config: &'static str,
    },

    #[error("Invalid connection config: {0}")]
    InvalidConnectionConfig(String),

    #[error("Service not registered: {0}")]
    ServiceNotRegistered(&'static str),

    #[error("Service type mismatch for {0}")]
    ServiceTypeMismatch(&'static str),

    #[error("Circular dependency while resolving {0}")]
    CircularDependency(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl BlogError {
    /// True for errors raised while wiring the data layer, as opposed to
    /// failures coming back from the database or the registry at runtime.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            BlogError::MissingConfigConstructor { .. } | BlogError::InvalidConnectionConfig(_)
        )
    }
}
