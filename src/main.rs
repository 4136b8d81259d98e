//! relaychat relay server
//!
//! Forwards `POST /predict` to the configured inference endpoint, keeping
//! the upstream URL and credential on the server.

use relaychat::config::{load_env_file, RelayConfig};
use relaychat::relay::{create_router, AppState, Relay};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Before logging so RUST_LOG can come from the file too
    let env_file = load_env_file();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relaychat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    if let Some(path) = &env_file {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    // Configuration
    let config = RelayConfig::from_env();
    let port = config.listen_port;

    tracing::info!(
        upstream = %config.upstream_url,
        authenticated = config.bearer_token.is_some(),
        "Relay configured"
    );

    let state = AppState::new(Relay::new(config)?);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Proxy listening at http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
