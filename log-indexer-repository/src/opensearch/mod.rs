//! OpenSearch implementation of the document indexer.
//!
//! This module provides a concrete implementation of `DocumentIndexer`
//! using OpenSearch as the backend.

mod client;
mod index_config;

pub use client::OpenSearchClient;
pub use index_config::INDEX_NAME;
