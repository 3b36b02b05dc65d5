use anyhow::Result;
use clap::Parser;
use parley_db::{MemoryMessageStore, MessageStore, SqlMessageStore};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use config::StoreBackend;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("parley=info,tower_http=debug")),
        )
        .init();

    let args = cli::Args::parse();
    let mut config = config::Config::load(&args.config)?;

    // CLI --bind overrides config file
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    let store = build_store(&config).await?;
    tracing::info!(backend = store.kind(), "message store ready");

    let state = parley_core::AppState::new(store);
    let app = parley_api::build_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!("Parley listening on {}", config.server.bind_address);

    let shutdown_signal = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down (ctrl-c)...");
        }
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

async fn build_store(config: &config::Config) -> Result<MessageStore> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory message store; messages are lost on restart");
            Ok(MessageStore::Memory(MemoryMessageStore::new()))
        }
        StoreBackend::Database => {
            ensure_sqlite_dir(&config.database.url);
            let engine: parley_db::DatabaseEngine = config.database.engine.into();
            let pool = parley_db::create_pool_with_engine(
                &config.database.url,
                config.database.max_connections,
                Some(engine),
            )
            .await?;
            parley_db::run_migrations(&pool, engine).await?;
            Ok(MessageStore::Sql(SqlMessageStore::new(pool)))
        }
    }
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_sqlite_dir(url: &str) {
    let Some(rest) = url.strip_prefix("sqlite://") else {
        return;
    };
    let path = rest.split('?').next().unwrap_or(rest);
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create database directory {:?}: {}", parent, e);
            }
        }
    }
}
