//! Document indexer trait definition.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::IndexError;

/// Abstracts the search backend that receives forwarded documents.
///
/// Implementations are injected into the forwarder so it can be exercised
/// with mock backends in tests.
#[async_trait]
pub trait DocumentIndexer: Send + Sync {
    /// Write one document into `index`, letting the backend assign its id.
    ///
    /// The document is sent exactly as given. Implementations must not add,
    /// remove, or rename fields and must not retry on failure.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the backend acknowledged the write
    /// * `Err(IndexError)` - If the request failed or was rejected
    async fn index_document(&self, index: &str, document: &Value) -> Result<(), IndexError>;
}
