use api_client::{FplClient, SessionCache};
use axum::{
    Router,
    routing::{get, post},
};
use configuration::Config;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub config: Config,
    pub api: SessionCache<FplClient>,
}

/// The main function to configure and run the dashboard server.
pub async fn run_server(addr: SocketAddr, config: Config) -> anyhow::Result<()> {
    let client = FplClient::new(&config.api)?;
    let app_state = Arc::new(AppState {
        api: SessionCache::new(client),
        config,
    });

    // The dashboard frontend is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/report", get(handlers::get_report))
        .route("/api/tables", get(handlers::get_tables))
        .route("/api/refresh", post(handlers::refresh))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http());

    tracing::info!("Dashboard server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
