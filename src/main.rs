//! profstore server binary.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use profstore::adapters::http::{app_router, ProfilesAppState, API_PREFIX};
use profstore::adapters::pprof::PprofCodec;
use profstore::adapters::storage::InMemoryProfileStorage;
use profstore::application::Repository;
use profstore::config::{AppConfig, StorageBackend};
use profstore::ports::ProfileStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;

    // RUST_LOG wins over the configured directive
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))?;
    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let storage: Arc<dyn ProfileStorage> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryProfileStorage::with_max_query_results(
            config.storage.max_query_results,
        )),
    };
    let codec = PprofCodec::new()
        .with_compression_level(config.codec.compression_level)
        .with_max_decoded_bytes(config.codec.max_decoded_bytes);
    let repository = Repository::new(storage, Arc::new(codec));
    let app = app_router(ProfilesAppState::new(Arc::new(repository)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        environment = ?config.server.environment,
        backend = ?config.storage.backend,
        "profstore listening on {}{}",
        addr,
        API_PREFIX
    );
    axum::serve(listener, app).await?;

    Ok(())
}
