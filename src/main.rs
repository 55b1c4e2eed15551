use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recommendations_api::{
    config::{Config, StorageBackend},
    create_router, db,
    repositories::{
        InMemoryRecommendationRepository, PgRecommendationRepository, RecommendationRepository,
    },
    services::RecommendationService,
    AppState, RouterOptions,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recommendations_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let repository: Arc<dyn RecommendationRepository> = match config.storage {
        StorageBackend::Postgres => {
            let pool = db::create_pool(&config.database_url, config.db_max_connections)
                .await
                .context("Failed to connect to database")?;
            db::run_migrations(&pool).await?;
            Arc::new(PgRecommendationRepository::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(InMemoryRecommendationRepository::new())
        }
    };

    let state = AppState::new(RecommendationService::new(repository));
    let app = create_router(
        state,
        RouterOptions {
            enable_test_routes: config.enable_test_routes,
        },
    );

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(
        address = %address,
        storage = ?config.storage,
        test_routes = config.enable_test_routes,
        "Server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
