use fanblog::cache::MemoryCache;
use fanblog::config::Config;
use fanblog::db::{DbClient, SqlClientServiceCollectionExt, SqlContext, UserRepository};
use fanblog::di::{ServiceCollection, ServiceLifetime};
use fanblog::logging::Logging;
use mimalloc::MiMalloc;
use std::sync::Arc;
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Arc::new(Config::load()?);

    let mut services = ServiceCollection::new();
    services
        .add_instance(Arc::new(Logging::new(cfg.loglevel.clone())))
        .add_instance(Arc::new(MemoryCache::new(cfg.cache_options())));

    let db_cfg = cfg.clone();
    services
        .add_sql_client::<DbClient, _>(
            move |_, config| db_cfg.apply_to(config),
            ServiceLifetime::Singleton,
            ServiceLifetime::Scoped,
        )?
        .add_scoped::<UserRepository, _>(|sp| Ok(Arc::new(UserRepository::new(sp.get()?))));

    let provider = services.build_provider();
    provider.get::<Logging>()?.init();

    info!(
        db_type = %cfg.db_type,
        auto_close = cfg.auto_close_connection,
        init_tables = cfg.init_tables_on_start,
        loglevel = %cfg.loglevel
    );

    if cfg.init_tables_on_start {
        SqlContext::init_tables_for(cfg.db_type, &cfg.database_url).await?;
    }

    let scope = provider.create_scope();
    let users = scope.get::<UserRepository>()?;
    info!(count = users.count().await?, "user store ready");

    provider.get::<DbClient>()?.close().await;
    Ok(())
}
