pub mod api;
pub mod config;
pub mod core_state;
pub mod knowledge;
pub mod models;
pub mod pipeline;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ServerError;
use crate::core_state::CoreState;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load shared state, serve until Ctrl-C, then drain.
pub async fn run() -> Result<(), ServerError> {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // Encoder loading may read a large model file.
    let core = tokio::task::spawn_blocking(CoreState::from_config)
        .await
        .map(Arc::new)
        .unwrap_or_else(|e| {
            tracing::error!("Startup loading failed, continuing without collaborators: {e}");
            Arc::new(CoreState::new(
                Arc::new(pipeline::encoder::UnavailableEncoder::new(e.to_string())),
                None,
            ))
        });

    let mut server = api::start_api_server(core, config::bind_addr()).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }

    server.shutdown();
    server.stopped().await;
    Ok(())
}
