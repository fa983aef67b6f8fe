mod config;
mod error;
mod models;
mod routes;
mod store;

use std::path::Path;

use actix_web::{web, HttpServer};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use config::{Config, ConfigError};
use store::RecordStore;

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    // before the subscriber, so RUST_LOG may come from the file too
    let env_file = config::load_env_file(Path::new(config::ENV_FILE));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if env_file? {
        tracing::info!(path = config::ENV_FILE, "loaded environment file");
    }

    let config = Config::from_env()?;
    let store = RecordStore::seeded();
    tracing::info!(
        host = %config.host,
        port = config.port,
        records = store.len(),
        "record service starting"
    );

    let store = web::Data::new(RwLock::new(store));
    HttpServer::new(move || routes::build_app(store.clone()))
        .bind(config.bind_addr())?
        .run()
        .await?;

    Ok(())
}
