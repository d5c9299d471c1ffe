//! Dependency initialization and wiring for the log indexer.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::LambdaConfig;
use crate::forwarder::EventForwarder;
use crate::IndexingError;
use log_indexer_repository::{OpenSearchClient, TlsVerification, INDEX_NAME};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The forwarder shared by every invocation of this execution environment.
    pub forwarder: Arc<EventForwarder>,
}

impl Dependencies {
    /// Build the OpenSearch client and the forwarder from resolved settings.
    ///
    /// Runs once per cold start. The client is not health-checked here so a
    /// backend outage fails invocations rather than initialization.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If the client cannot be constructed
    pub async fn new(config: &LambdaConfig) -> Result<Self, IndexingError> {
        info!(
            opensearch_host = %config.opensearch.host,
            index = INDEX_NAME,
            "Initializing dependencies"
        );

        if let TlsVerification::ChainOnly { ca_bundle } = &config.opensearch.tls {
            warn!(
                ca_bundle = %ca_bundle.display(),
                "TLS hostname verification is disabled for the OpenSearch connection"
            );
        }

        let search_client = OpenSearchClient::new(&config.opensearch)
            .await
            .map_err(|e| IndexingError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        let forwarder = EventForwarder::new(Arc::new(search_client));

        Ok(Self {
            forwarder: Arc::new(forwarder),
        })
    }
}
