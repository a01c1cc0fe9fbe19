//! Listener setup.

use crate::{AppState, Settings, create_router};
use memoir_error::{HttpError, HttpErrorKind};
use std::net::SocketAddr;
use tracing::{info, instrument, warn};

/// Bind the configured address and serve until Ctrl+C.
#[instrument(skip_all, fields(host = %settings.server().host(), port = settings.server().port()))]
pub async fn serve(settings: &Settings, state: AppState) -> Result<(), HttpError> {
    let addr = format!("{}:{}", settings.server().host(), settings.server().port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| {
            HttpError::new(HttpErrorKind::Bind {
                addr: addr.clone(),
                message: e.to_string(),
            })
        })?;

    let local = listener
        .local_addr()
        .map_err(|e| HttpError::new(HttpErrorKind::LocalAddr(e.to_string())))?;
    info!(%local, environment = %state.environment(), "Memoir server listening");

    axum::serve(
        listener,
        create_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| HttpError::new(HttpErrorKind::Serve(e.to_string())))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, stopping gracefully"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C; serving until killed"),
    }
}
