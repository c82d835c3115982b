use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use yard_walk::FsTraversal;

use crate::{config::Config, error::AppError, manager::Manager};

pub mod api;
pub mod config;
pub mod error;
pub mod manager;
pub mod recycle;

pub async fn run(config: Config, cancellation: CancellationToken) -> Result<(), AppError> {
    let manager = Arc::new(Manager::new(&config, Arc::new(FsTraversal)));

    let listener = TcpListener::bind((config.server_address.as_str(), config.server_port))
        .await
        .map_err(AppError::Bind)?;

    // NOTE: a failed scan is only logged, the api keeps serving what was indexed
    let scanner = manager.clone();
    tokio::spawn(async move {
        match scanner.start().await {
            Ok(summary) => tracing::debug!("indexed recycle bins: {}", summary),
            Err(error) => tracing::error!("scanning recycle bins failed: {:?}", error),
        }
    });

    api::serve(listener, manager, cancellation).await
}
