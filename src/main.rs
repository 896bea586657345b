use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contacts_api::config::{ContactsConfig, StoreKind};
use contacts_api::store::{MemoryContactStore, PgContactStore};
use contacts_api::{build_router, AppState};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "contacts_api=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ContactsConfig::from_env().context("failed to load configuration")?;
    let state = build_state(&config).await?;

    let app = build_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn build_state(config: &ContactsConfig) -> anyhow::Result<AppState> {
    match config.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory contact store, data is lost on restart");
            Ok(AppState::new(MemoryContactStore::new()))
        }
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_ref()
                .context("DATABASE_URL must be set")?;
            let store = PgContactStore::connect(database_url, config.max_connections)
                .await
                .context("failed to create database pool")?;
            tracing::info!(
                max_connections = config.max_connections,
                "Database pool created"
            );

            if config.run_migrations {
                store.migrate().await.context("failed to run migrations")?;
                tracing::info!("Migrations applied");
            }

            Ok(AppState::new(store))
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
