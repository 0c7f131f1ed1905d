use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_sync::InMemoryUserStore;

mod handlers;

use crate::handlers::{AppState, Backend, health, sync};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("{}=debug,user_sync=debug", env!("CARGO_CRATE_NAME")).into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --memory keeps users in-process instead of calling the backend
    let backend = if std::env::args().any(|arg| arg == "--memory") {
        tracing::info!("Using in-memory user store");
        Backend::Memory(Arc::new(InMemoryUserStore::new()))
    } else {
        tracing::info!("Using HTTP user store from environment");
        Backend::Http
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/sync", post(sync))
        .with_state(AppState { backend });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::debug!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
