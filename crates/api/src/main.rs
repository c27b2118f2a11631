use std::net::SocketAddr;
use std::sync::Arc;

use folio_db::{MemoryProjectStore, PgProjectStore, ProjectStore};
use folio_storage::{LocalMediaStore, MediaStore, MemoryMediaStore, S3MediaStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::config::{MediaBackend, ServerConfig};
use folio_api::router::build_app_router;
use folio_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Project store ---
    let projects: Arc<dyn ProjectStore> = match &config.database_url {
        Some(database_url) => {
            let pool = folio_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            folio_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            folio_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgProjectStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, keeping projects in memory");
            Arc::new(MemoryProjectStore::new())
        }
    };

    // --- Media store ---
    let media: Arc<dyn MediaStore> = match &config.media {
        MediaBackend::Local { root, public_url } => {
            tokio::fs::create_dir_all(root)
                .await
                .expect("Failed to create media root");
            tracing::info!(root = %root.display(), "Using local media store");
            Arc::new(LocalMediaStore::new(root.clone(), public_url.clone()))
        }
        MediaBackend::S3 { bucket, public_url } => {
            tracing::info!(%bucket, "Using S3 media store");
            Arc::new(S3MediaStore::from_env(bucket.clone(), public_url.clone()).await)
        }
        MediaBackend::Memory { public_url } => {
            tracing::warn!("Using in-memory media store, uploads are lost on restart");
            Arc::new(MemoryMediaStore::new(public_url.clone()))
        }
    };

    // --- Router ---
    let state = AppState::new(projects, media, config.clone());
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to start graceful shutdown.
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
