use crate::cache::MemoryCacheOptions;
use crate::db::{ConnectionConfig, DbType, InitKeyType};
use crate::error::BlogError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONFIG_FILE: &str = "fanblog.toml";
pub const ENV_PREFIX: &str = "FANBLOG_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub db_type: DbType,
    pub auto_close_connection: bool,
    pub init_key_type: InitKeyType,
    pub max_connections: Option<u32>,
    pub loglevel: String,
    pub init_tables_on_start: bool,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "mysql://root@localhost:3306/fanblog".to_string(),
            db_type: DbType::MySql,
            auto_close_connection: true,
            init_key_type: InitKeyType::Attribute,
            max_connections: None,
            loglevel: "info".to_string(),
            init_tables_on_start: true,
            cache_ttl_secs: 300,
            cache_max_entries: 10_000,
        }
    }
}

impl Config {
    /// Defaults, then `fanblog.toml`, then `FANBLOG_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, BlogError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, BlogError> {
        Ok(figment.extract()?)
    }

    /// Fill a registry-created config from these settings.
    pub fn apply_to(&self, config: &mut ConnectionConfig) {
        config.connection_string = self.database_url.clone();
        config.db_type = self.db_type;
        config.is_auto_close_connection = self.auto_close_connection;
        config.init_key_type = self.init_key_type;
        config.max_connections = self.max_connections;
    }

    pub fn cache_options(&self) -> MemoryCacheOptions {
        MemoryCacheOptions {
            ttl: Duration::from_secs(self.cache_ttl_secs),
            max_entries: self.cache_max_entries,
        }
    }
}
