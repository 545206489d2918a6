use std::net::SocketAddr;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use configuration::Settings;
use database::{Database, DatabaseSettings};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

use error::AppError;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Builds the application router: the two health routes, nothing else.
/// Todo routes will mount here once their wire contract is defined.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// CORS for the configured origin list.
///
/// Credentials are allowed, so methods must be enumerated and headers
/// mirrored; tower-http rejects wildcards alongside credentials.
fn cors_layer(settings: &Settings) -> Result<CorsLayer, AppError> {
    let origins = settings
        .cors_origin_list()
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|fault| AppError::InvalidOrigin(fault.to_string()))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// The main function to configure and run the web server.
///
/// Owns the database lifecycle for the process: connect on startup,
/// bootstrap the schema in development, dispose the pool after a
/// graceful shutdown.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr: SocketAddr = settings.server_addr.parse()?;

    let db = Database::connect(&DatabaseSettings::from(&settings)).await?;

    // Only auto-create tables in development. Production schemas change
    // through the versioned migrations, applied explicitly.
    if settings.environment.is_development() {
        db.initialize_schema().await?;
        tracing::info!("Schema bootstrap complete (development environment)");
    }

    let cors = cors_layer(&settings)?;

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = app(AppState { db: db.clone() })
        .layer(cors)
        // This middleware will automatically log information about every
        // incoming request.
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Dispose the pool once the last in-flight request has drained.
    db.shutdown().await;
    tracing::info!("Connection pool disposed; shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_accepts_the_default_origins() {
        let settings = Settings::default();
        assert!(cors_layer(&settings).is_ok());
    }

    #[test]
    fn cors_layer_rejects_an_unparsable_origin() {
        let settings = Settings {
            cors_origins: "http://ok.example.com,bad\u{0000}origin".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            cors_layer(&settings),
            Err(AppError::InvalidOrigin(_))
        ));
    }
}
