//! Error types for the log indexer repository.

mod index_error;

pub use index_error::IndexError;
