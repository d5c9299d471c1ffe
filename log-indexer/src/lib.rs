//! # Log Indexer
//!
//! Lambda function that writes every invocation event into the OpenSearch
//! log index.
//!
//! This crate provides the invocation handler, the environment configuration,
//! and the dependency wiring used by the `log-indexer` binary.

pub mod config;
pub mod forwarder;

pub use config::{Dependencies, LambdaConfig};
pub use forwarder::EventForwarder;

use thiserror::Error;

/// Errors that can occur during function initialization or invocation.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Index error.
    #[error("Index error: {0}")]
    IndexError(#[from] log_indexer_repository::IndexError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
