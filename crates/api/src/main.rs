use anyhow::{Context, Result};
use tracing::info;

use apiary_api::{app, config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics().context("failed to install Prometheus recorder")?;

    info!("Starting Apiary API v{}", env!("CARGO_PKG_VERSION"));

    let tokens = config
        .jwt
        .token_config()
        .context("invalid jwt configuration")?;
    let addr = config.socket_addr()?;

    let db_config: persistence::db::DatabaseConfig = (&config.database).into();
    let pool = persistence::db::create_pool(&db_config).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    services::bootstrap_admin(&pool, &config.admin)
        .await
        .context("superuser bootstrap failed")?;

    let app = app::create_app(config, pool, tokens);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
