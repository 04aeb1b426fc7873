use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use threadstore_api::app;
use threadstore_api::config::AppConfig;
use threadstore_api::database;
use threadstore_api::services::mailer::Mailer;
use threadstore_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DBUSER, APP_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("loading configuration from environment")?;

    let pool = database::connect(&config.database)
        .await
        .context("connecting to database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("running migrations")?;

    let mailer = Mailer::new(config.mailer.clone()).context("building mail client")?;

    let port = config.server.port;
    let state = AppState {
        config: Arc::new(config),
        pool,
        mailer,
    };

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;

    tracing::info!("threadstore api listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await.context("server")?;

    Ok(())
}
