//! Atrium Daemon - Tenant portal service
//!
//! Serves the portal API: tenant registration and sign-in, request
//! submission with priority triage, ticket tracking, announcements,
//! contacts, CSV export, and the building assistant chat.

mod intake;
mod llm;
mod routes;
mod server;

use anyhow::Result;
use atrium_common::config::PortalConfig;
use atrium_common::sample_data;
use atrium_common::store::JsonFileStore;
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Atrium Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = PortalConfig::load()?;
    let store = Arc::new(JsonFileStore::new(&config.server.data_dir)?);
    info!("Record store at {}", config.server.data_dir.display());

    if config.server.seed_sample_data {
        sample_data::seed(store.as_ref())?;
    }

    if config.llm.enabled && config.llm.api_key().is_some() {
        info!("Assistant chat: LLM passthrough ({})", config.llm.model);
    } else {
        info!("Assistant chat: canned responses (no API key configured)");
    }

    let state = server::AppState::new(config, store);
    server::run(state).await
}
