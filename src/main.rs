//! Binary entry-point: wires the in-memory store, identifier policy, and the
//! HTTP server together.

use std::sync::Arc;

use actix_web::{HttpServer, web};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use account_api::domain::ports::AccountStore;
use account_api::inbound::http::AppState;
use account_api::outbound::InMemoryAccountStore;
use account_api::server::{ServerConfig, build_app};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::parse();
    let store: Arc<dyn AccountStore> = Arc::new(InMemoryAccountStore::seeded());
    let state = web::Data::new(AppState::new(store, config.id_policy()));

    info!(host = %config.host, port = config.port, "listening");
    HttpServer::new(move || build_app(state.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
