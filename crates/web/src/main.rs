use anyhow::Context;
use storage::Database;
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod routes;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::attempts::handlers::submit_attempt,
        features::attempts::handlers::list_attempts,
        features::leaderboard::handlers::get_leaderboard,
        features::leaderboard::handlers::get_category_ranking,
        features::leaderboard::handlers::list_categories,
    ),
    components(
        schemas(
            storage::dto::attempt::SubmitAttemptRequest,
            storage::dto::attempt::FormNumber,
            storage::dto::attempt::AttemptResponse,
            storage::dto::leaderboard::BestTimeEntry,
            storage::dto::leaderboard::CategoryInfo,
            storage::dto::leaderboard::CategoryLeaderboard,
            storage::dto::leaderboard::LeaderboardResponse,
            storage::models::Attempt,
            storage::models::Category,
            storage::models::Gender,
            storage::models::Discipline,
        )
    ),
    tags(
        (name = "attempts", description = "Race attempt submission and log"),
        (name = "leaderboard", description = "Per-category best times"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting ski race leaderboard");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, routes::router(db.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database");
    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
