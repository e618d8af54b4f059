mod commands;
mod config;

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use config::Config;
use quotevault_core::settings::SettingsService;
use quotevault_core::SyncService;
use quotevault_remote::HttpRemoteSource;
use quotevault_storage_sqlite::{Database, SqliteCollectionStore, SqliteSettingsRepository};

fn init_tracing() {
    // Library crates log through the `log` facade; bridge those records
    // into tracing before installing the subscriber.
    let _ = tracing_log::LogTracer::init();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env();

    let db = Database::open(&config.db_path)?;
    let store = Arc::new(SqliteCollectionStore::new(db.clone()));
    let settings = SettingsService::new(Arc::new(SqliteSettingsRepository::new(db)));
    let remote = Arc::new(HttpRemoteSource::new(config.remote.clone()));

    let service = Arc::new(SyncService::new(store, remote, config.fetch_limit));
    let loaded = service.load_or_seed().await?;
    tracing::debug!("Collection ready with {} quotes", loaded);

    let args: Vec<String> = std::env::args().skip(1).collect();
    commands::run(&service, &settings, &config, &args).await
}
