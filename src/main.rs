//! agri-ledger server entry point.
//!
//! Starts the Axum HTTP server exposing the three registries.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use agri_ledger::api;
use agri_ledger::app_state::AppState;
use agri_ledger::config::LedgerConfig;
use agri_ledger::domain::Ledger;
use agri_ledger::service::LedgerService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = LedgerConfig::from_env()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        addr = %config.listen_addr,
        genesis_height = config.genesis_height,
        "starting agri-ledger"
    );

    // Build domain + service layer
    let ledger = Ledger::new(config.roles.clone(), config.genesis_height);
    let ledger_service = Arc::new(LedgerService::new(ledger));
    let app_state = AppState { ledger_service };

    // Build router
    let app = Router::new().merge(api::build_router());

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
        )
    };

    let app = app
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
