use std::net::SocketAddr;
use std::sync::Arc;

use sensorhub_core::cache::ThresholdCache;
use sensorhub_core::store::SensorStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sensorhub_api::app::build_app;
use sensorhub_api::config::ServerConfig;
use sensorhub_api::state::AppState;
use sensorhub_db::PgSensorStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensorhub_api=debug,sensorhub_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        broadcast_interval_ms = config.broadcast_interval_ms,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sensorhub_db::create_pool(&database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    sensorhub_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    sensorhub_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    if let Err(e) = sensorhub_db::seed::seed_defaults(&pool).await {
        tracing::warn!(error = %e, "Failed to seed default rows");
    }

    // --- Threshold cache ---
    let store: Arc<dyn SensorStore> = Arc::new(PgSensorStore::new(pool.clone()));
    let cache = Arc::new(ThresholdCache::with_defaults());
    if let Err(e) = cache.load_initial(store.as_ref()).await {
        tracing::warn!(error = %e, "Couldn't load thresholds, using built-in defaults");
    }

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(pool, store, cache, config);
    let sessions = Arc::clone(&state.sessions);

    let app = build_app(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    let count = sessions.connection_count().await;
    tracing::info!(count, "Stopping remaining broadcast sessions");
    sessions.shutdown_all().await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
