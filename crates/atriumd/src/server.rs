//! HTTP server for atriumd

use crate::llm::ChatClient;
use crate::routes;
use anyhow::Result;
use atrium_common::config::PortalConfig;
use atrium_common::store::PortalStore;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub config: PortalConfig,
    pub store: Arc<dyn PortalStore>,
    pub chat: ChatClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: PortalConfig, store: Arc<dyn PortalStore>) -> Self {
        let chat = ChatClient::new(config.llm.clone());
        Self {
            config,
            store,
            chat,
            start_time: Instant::now(),
        }
    }
}

/// Run the HTTP server
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.server.listen_addr.clone();
    let state = Arc::new(state);

    let app = Router::new()
        .merge(routes::health_routes())
        .merge(routes::tenant_routes())
        .merge(routes::session_routes())
        .merge(routes::request_routes())
        .merge(routes::announcement_routes())
        .merge(routes::chat_routes())
        .merge(routes::export_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
