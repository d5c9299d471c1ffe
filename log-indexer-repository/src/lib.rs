//! # Log Indexer Repository
//!
//! This crate provides the trait and implementation for writing documents
//! into the search backend. It includes definitions for errors, connection
//! configuration, the `DocumentIndexer` interface, and a concrete
//! implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::{OpenSearchConfig, TlsVerification};
pub use errors::IndexError;
pub use interfaces::DocumentIndexer;
pub use opensearch::{OpenSearchClient, INDEX_NAME};
