//! Mutu Memoir API server entry point.

use std::error::Error;
use std::sync::{Arc, Mutex};

use mutu_api::config::Config;
use mutu_api::error::AppError;
use mutu_api::state::AppState;
use mutu_api::{routes, telemetry};
use mutu_core::clock::{Clock, SystemClock};
use mutu_core::rng::{DeterministicRng, SeededRng};
use mutu_core::store::StateStore;
use mutu_store::{JsonFileStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let provider = telemetry::init()?;

    tracing::info!("Starting Mutu Memoir API server");

    let result = run().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "server stopped with an error");
    }
    telemetry::shutdown(provider);
    result.map_err(Into::into)
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let content = mutu_content::load_from_path(&config.content_path)?;
    tracing::info!(
        path = %config.content_path.display(),
        version = %content.meta.version,
        fingerprint = %content.fingerprint,
        "content document loaded"
    );

    let store: Arc<dyn StateStore> = match &config.state_dir {
        Some(dir) => {
            let store = JsonFileStore::open(dir.clone()).await.map_err(AppError::Store)?;
            tracing::info!(dir = %store.dir().display(), "persisting state to disk");
            Arc::new(store)
        }
        None => {
            tracing::warn!("MUTU_STATE_DIR not set, state will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(SeededRng::from_os()));
    let app_state = AppState::new(Arc::new(content), clock, rng, store);

    let app = routes::app(app_state);

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutdown signal received");
}
