use std::net::SocketAddr;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/news", get(handlers::get_news))
        .route("/tts", get(handlers::get_tts))
        .route("/app", get(handlers::interactive_page))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{} (interactive page at /app)", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use nt_core::{Config, Error, Result};
    pub use crate::{create_app, serve, AppState};
}
