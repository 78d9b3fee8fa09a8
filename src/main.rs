//! Usuarios server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use usuarios::api::{create_router, AppState};
use usuarios::config::{AppConfig, LogFormat};
use usuarios::db::{self, ConnectionProvider, UrlConnectionProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    config.validate().context("invalid configuration")?;
    let backend = config.database.backend()?;

    let provider: Arc<dyn ConnectionProvider> =
        Arc::new(UrlConnectionProvider::new(config.database.url.clone()));
    tracing::info!(%backend, "Database provider configured");

    if config.database.bootstrap_schema {
        db::ensure_schema(provider.as_ref())
            .await
            .context("failed to bootstrap the usuarios table")?;
    }

    let status_policy = config.api.status_codes;
    tracing::info!(?status_policy, "Status code policy selected");

    let router = create_router(AppState::new(provider, status_policy));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("usuarios=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
