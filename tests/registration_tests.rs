use fanblog::BlogError;
use fanblog::cache::MemoryCache;
use fanblog::db::{
    ClientConstructor, ConnectionConfig, DbClient, DbType, SqlClient,
    SqlClientServiceCollectionExt,
};
use fanblog::di::{ServiceCollection, ServiceLifetime};
use fanblog::logging::Logging;
use std::sync::Arc;
use tempfile::TempDir;

struct ParameterlessClient;

impl SqlClient for ParameterlessClient {
    fn constructors() -> Vec<ClientConstructor<Self>> {
        vec![ClientConstructor::Parameterless(|| ParameterlessClient)]
    }
}

/// Application client wrapping the stock one, with both constructor shapes.
struct BlogDb {
    inner: DbClient,
}

impl SqlClient for BlogDb {
    fn constructors() -> Vec<ClientConstructor<Self>> {
        vec![
            ClientConstructor::Parameterless(|| unreachable!("never chosen when configured")),
            ClientConstructor::WithConfig(|config| {
                Ok(BlogDb {
                    inner: DbClient::new(config)?,
                })
            }),
        ]
    }
}

fn sqlite_url(dir: &TempDir) -> String {
    format!("sqlite:{}?mode=rwc", dir.path().join("blog.db").display())
}

#[test]
fn parameterless_client_is_rejected() {
    let mut services = ServiceCollection::new();
    let result = services.add_sql_client::<ParameterlessClient, _>(
        |_, config| config.connection_string = "mysql://localhost/fanblog".to_string(),
        ServiceLifetime::Scoped,
        ServiceLifetime::Scoped,
    );

    match result {
        Err(err @ BlogError::MissingConfigConstructor { .. }) => {
            assert!(err.is_configuration_error());
            let msg = err.to_string();
            assert!(msg.contains("'ParameterlessClient'"), "{msg}");
            assert!(msg.contains("ConnectionConfig"), "{msg}");
        }
        Err(other) => panic!("expected MissingConfigConstructor, got {other}"),
        Ok(_) => panic!("registration should fail"),
    }
    assert!(services.is_empty(), "nothing is registered on failure");
}

#[tokio::test]
async fn parameterized_client_resolves_with_its_config() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);
    let expected = url.clone();

    let mut services = ServiceCollection::new();
    services
        .add_sql_client::<DbClient, _>(
            move |_, config| {
                config.connection_string = url.clone();
                config.db_type = DbType::Sqlite;
                config.is_auto_close_connection = true;
            },
            ServiceLifetime::Scoped,
            ServiceLifetime::Scoped,
        )
        .unwrap();

    let sp = services.build_provider();
    let config = sp.get::<ConnectionConfig>().unwrap();
    let client = sp.get::<DbClient>().unwrap();

    assert_eq!(config.connection_string, expected);
    assert_eq!(client.config(), config.as_ref());
    assert_eq!(client.db_type(), DbType::Sqlite);
}

#[tokio::test]
async fn wrapper_client_uses_config_constructor() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);

    let mut services = ServiceCollection::new();
    services
        .add_sql_client_default::<BlogDb, _>(move |config| {
            config.connection_string = url.clone();
            config.db_type = DbType::Sqlite;
        })
        .unwrap();

    let db = services.build_provider().get::<BlogDb>().unwrap();
    assert_eq!(db.inner.db_type(), DbType::Sqlite);
}

#[test]
fn singleton_client_forces_singleton_config() {
    let mut services = ServiceCollection::new();
    services
        .add_sql_client::<DbClient, _>(|_, _| {}, ServiceLifetime::Singleton, ServiceLifetime::Scoped)
        .unwrap();

    assert_eq!(
        services.lifetime_of::<DbClient>(),
        Some(ServiceLifetime::Singleton)
    );
    assert_eq!(
        services.lifetime_of::<ConnectionConfig>(),
        Some(ServiceLifetime::Singleton)
    );
}

#[test]
fn non_singleton_client_keeps_requested_config_lifetime() {
    let mut services = ServiceCollection::new();
    services
        .add_sql_client::<DbClient, _>(|_, _| {}, ServiceLifetime::Scoped, ServiceLifetime::Transient)
        .unwrap();

    assert_eq!(
        services.lifetime_of::<DbClient>(),
        Some(ServiceLifetime::Scoped)
    );
    assert_eq!(
        services.lifetime_of::<ConnectionConfig>(),
        Some(ServiceLifetime::Transient)
    );
}

#[test]
fn config_factory_applies_exactly_what_the_callback_sets() {
    let mut services = ServiceCollection::new();
    services
        .add_sql_client::<DbClient, _>(
            |_, config| {
                config.connection_string = "X".to_string();
                config.db_type = DbType::MySql;
            },
            ServiceLifetime::Scoped,
            ServiceLifetime::Scoped,
        )
        .unwrap();

    let config = services.build_provider().get::<ConnectionConfig>().unwrap();
    assert_eq!(
        *config,
        ConnectionConfig {
            connection_string: "X".to_string(),
            db_type: DbType::MySql,
            ..ConnectionConfig::default()
        }
    );
}

#[test]
fn config_callback_can_read_other_services() {
    struct Settings {
        url: &'static str,
    }

    let mut services = ServiceCollection::new();
    services.add_instance(Arc::new(Settings {
        url: "mysql://blog@db/fanblog",
    }));
    services
        .add_sql_client::<DbClient, _>(
            |sp, config| {
                if let Ok(settings) = sp.get::<Settings>() {
                    config.connection_string = settings.url.to_string();
                }
            },
            ServiceLifetime::Scoped,
            ServiceLifetime::Scoped,
        )
        .unwrap();

    let config = services.build_provider().get::<ConnectionConfig>().unwrap();
    assert_eq!(config.connection_string, "mysql://blog@db/fanblog");
}

#[test]
fn later_registration_replaces_config() {
    let mut services = ServiceCollection::new();
    services
        .add_sql_client_default::<DbClient, _>(|config| {
            config.connection_string = "mysql://first/db".to_string();
        })
        .unwrap()
        .add_sql_client::<DbClient, _>(
            |_, config| config.connection_string = "mysql://second/db".to_string(),
            ServiceLifetime::Singleton,
            ServiceLifetime::Scoped,
        )
        .unwrap();

    assert_eq!(
        services.lifetime_of::<ConnectionConfig>(),
        Some(ServiceLifetime::Singleton)
    );
    // the client keeps its first registration
    assert_eq!(
        services.lifetime_of::<DbClient>(),
        Some(ServiceLifetime::Scoped)
    );

    let config = services.build_provider().get::<ConnectionConfig>().unwrap();
    assert_eq!(config.connection_string, "mysql://second/db");
}

#[test]
fn registers_cache_and_logging_once() {
    let mut services = ServiceCollection::new();
    services
        .add_sql_client_default::<DbClient, _>(|_| {})
        .unwrap()
        .add_sql_client_default::<DbClient, _>(|_| {})
        .unwrap();

    assert!(services.contains::<MemoryCache>());
    assert!(services.contains::<Logging>());
    assert!(services.contains::<ConnectionConfig>());
    assert!(services.contains::<DbClient>());
    // cache, logging and client once each, one config per call
    assert_eq!(services.len(), 5);
}

#[tokio::test]
async fn scoped_client_is_per_scope() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);

    let mut services = ServiceCollection::new();
    services
        .add_sql_client_default::<DbClient, _>(move |config| {
            config.connection_string = url.clone();
            config.db_type = DbType::Sqlite;
        })
        .unwrap();

    let sp = services.build_provider();
    let scope_a = sp.create_scope();
    let scope_b = sp.create_scope();

    let a1 = scope_a.get::<DbClient>().unwrap();
    let a2 = scope_a.get::<DbClient>().unwrap();
    let b = scope_b.get::<DbClient>().unwrap();
    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(!Arc::ptr_eq(&a1, &b));
}

#[tokio::test]
async fn invalid_config_surfaces_when_client_is_resolved() {
    let mut services = ServiceCollection::new();
    services
        .add_sql_client_default::<DbClient, _>(|config| {
            config.connection_string = "sqlite:blog.db".to_string();
            config.db_type = DbType::MySql;
        })
        .unwrap();

    let err = services.build_provider().get::<DbClient>().unwrap_err();
    assert!(err.is_configuration_error(), "{err}");
}
