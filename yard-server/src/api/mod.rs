use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::{error::AppError, manager::Manager};

pub mod error;
pub mod routes;

pub fn router(manager: Arc<Manager>) -> Router {
    Router::new()
        .route("/api/vbins", get(routes::list_virtual_bins))
        .route("/api/vbins/:id", get(routes::get_virtual_bin))
        .route("/api/vbins/:id/pbins", get(routes::list_physical_bins))
        .route("/api/vbins/:id/entries", get(routes::list_entries))
        .route("/api/vbins/:id/find", get(routes::find_entry))
        .with_state(manager)
}

pub async fn serve(
    listener: TcpListener,
    manager: Arc<Manager>,
    cancellation: CancellationToken,
) -> Result<(), AppError> {
    match listener.local_addr() {
        Ok(address) => tracing::info!("serving http on {}", address),
        Err(error) => tracing::warn!("resolving local address failed: {:?}", error),
    }

    axum::serve(listener, router(manager))
        .with_graceful_shutdown(async move { cancellation.cancelled().await })
        .await
        .map_err(AppError::Serve)
}
