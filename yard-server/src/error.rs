use std::path::PathBuf;

use thiserror::Error;
use yard_walk::WalkError;

use crate::recycle::BinState;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Binding server address failed")]
    Bind(#[source] std::io::Error),
    #[error("Parsing configuration failed")]
    ConfigParse(#[from] serde_json::Error),
    #[error("Reading configuration {0:?} failed")]
    ConfigRead(PathBuf, #[source] std::io::Error),
    #[error("Configuration is invalid: {0}")]
    InvalidConfig(String),
    #[error("Serving http requests failed")]
    Serve(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cannot start scanning {bin} while {state:?}")]
    InvalidState { bin: String, state: BinState },
    #[error("Walking recycle folder failed")]
    Traversal(#[from] WalkError),
}
