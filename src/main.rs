use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use video_courses_api::api;
use video_courses_api::config::Config;
use video_courses_api::db::Database;
use video_courses_api::db_storage::{LeadStorage, PgDocumentStore};
use video_courses_api::handlers::AppState;

/// Main entry point for the application.
///
/// Initializes logging, loads configuration, builds the document store
/// handle and starts the Axum server. A missing or unusable store is logged
/// and reported through `/test`; it does not stop the server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "video_courses_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Build the store handle once; requests share it through the state
    let storage = match Database::connect_lazy(&config) {
        Ok(db) => {
            // Reachability is only logged; it must not delay binding the port
            let probe_db = db.clone();
            let limit = config.store_timeout;
            tokio::spawn(async move {
                match probe_db.ping(limit).await {
                    Ok(()) => tracing::info!("✓ Database reachable (schema {})", probe_db.schema),
                    Err(e) => tracing::warn!("Database not reachable at startup: {}", e),
                }
            });
            let store = Arc::new(PgDocumentStore::new(db));
            Some(LeadStorage::new(store, config.store_timeout))
        }
        Err(e) => {
            tracing::warn!("{} - lead submissions will fail until fixed", e);
            None
        }
    };

    let app_state = Arc::new(AppState {
        config: config.clone(),
        storage,
    });

    let app = api::router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
