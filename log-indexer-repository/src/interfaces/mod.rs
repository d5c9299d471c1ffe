//! Interface definitions for the document indexer.
//!
//! This module defines the abstract `DocumentIndexer` trait that allows
//! for dependency injection and swappable backend implementations.

mod document_indexer;

pub use document_indexer::DocumentIndexer;
