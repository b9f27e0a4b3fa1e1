use anyhow::{Context, Result};
use tracing::info;

use project_planner_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging)?;
    middleware::init_metrics()?;

    info!("Starting Project Planner API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database.pool_config())
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;

    persistence::db::run_migrations(&pool).await?;

    tokio::fs::create_dir_all(&config.export.output_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create export directory {}",
                config.export.output_dir.display()
            )
        })?;

    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
