//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `DocumentIndexer`
//! using the OpenSearch Rust client.

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use flate2::{write::GzEncoder, Compression};
use opensearch::{
    cert::{Certificate, CertificateValidation},
    http::{
        headers::{HeaderMap, HeaderValue, CONTENT_ENCODING, CONTENT_TYPE},
        transport::{SingleNodeConnectionPool, TransportBuilder},
        Method, StatusCode,
    },
    OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::config::{OpenSearchConfig, TlsVerification};
use crate::errors::IndexError;
use crate::interfaces::DocumentIndexer;

/// A fully built document-index request, ready to hand to the transport.
#[derive(Debug)]
struct IndexRequest {
    path: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

/// OpenSearch client implementation.
///
/// Cheap to share: the underlying transport pools its connections, so one
/// instance is built at cold start and reused by every invocation.
///
/// # Example
///
/// ```ignore
/// use log_indexer_repository::{OpenSearchClient, OpenSearchConfig, INDEX_NAME};
/// let config = OpenSearchConfig::new("vpc-logs.eu-west-1.es.amazonaws.com");
/// let client = OpenSearchClient::new(&config).await?;
///
/// client.index_document(INDEX_NAME, &json!({"user": "alice"})).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    compress_requests: bool,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the configured host.
    ///
    /// No request is made here; connection failures surface on the first
    /// indexing call.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(IndexError)` - If the URL, the trust anchor, or the transport is invalid
    pub async fn new(config: &OpenSearchConfig) -> Result<Self, IndexError> {
        let url = config.base_url()?;
        let cert_validation = Self::cert_validation(&config.tls).await?;

        let conn_pool = SingleNodeConnectionPool::new(url.clone());
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .cert_validation(cert_validation)
            .build()
            .map_err(|e| IndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            compress_requests = config.compress_requests,
            verify_hostname = matches!(config.tls, TlsVerification::Full),
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            compress_requests: config.compress_requests,
        })
    }

    /// Map the configured verification mode onto the transport's validation.
    async fn cert_validation(tls: &TlsVerification) -> Result<CertificateValidation, IndexError> {
        match tls {
            TlsVerification::Full => Ok(CertificateValidation::Default),
            TlsVerification::ChainOnly { ca_bundle } => {
                let anchor = Self::load_trust_anchor(ca_bundle).await?;
                Ok(CertificateValidation::Certificate(anchor))
            }
        }
    }

    /// Read a PEM trust anchor bundle from disk.
    async fn load_trust_anchor(path: &Path) -> Result<Certificate, IndexError> {
        let pem = tokio::fs::read(path).await.map_err(|e| {
            IndexError::connection(format!(
                "Failed to read CA bundle {}: {}",
                path.display(),
                e
            ))
        })?;

        Certificate::from_pem(&pem).map_err(|e| {
            IndexError::connection(format!(
                "Failed to parse CA bundle {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Build `POST /{index}/_doc` with the serialized document as the body,
    /// gzip-encoded when request compression is on.
    fn build_request(&self, index: &str, document: &Value) -> Result<IndexRequest, IndexError> {
        let json = serde_json::to_vec(document)
            .map_err(|e| IndexError::serialization(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = if self.compress_requests {
            headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
            Self::gzip(&json)?
        } else {
            json
        };

        Ok(IndexRequest {
            path: format!("/{}/_doc", index),
            headers,
            body,
        })
    }

    fn gzip(bytes: &[u8]) -> Result<Vec<u8>, IndexError> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(bytes)
            .map_err(|e| IndexError::serialization(format!("gzip failed: {}", e)))?;
        encoder
            .finish()
            .map_err(|e| IndexError::serialization(format!("gzip failed: {}", e)))
    }

    /// A rejection whose body could not be read is still a failed request.
    fn unreadable_body(status: StatusCode, cause: impl std::fmt::Display) -> IndexError {
        error!(status = %status, error = %cause, "Failed to read index response body");
        IndexError::transport(format!(
            "Failed to read response body for status {}: {}",
            status, cause
        ))
    }

    /// Turn a response status into the indexing outcome.
    fn check_status(status: StatusCode, body: String) -> Result<(), IndexError> {
        if status.is_success() {
            return Ok(());
        }

        error!(status = %status, body = %body, "Index request failed");
        Err(IndexError::rejected(status.as_u16(), body))
    }
}

#[async_trait]
impl DocumentIndexer for OpenSearchClient {
    /// Index a single document, letting OpenSearch generate its id.
    ///
    /// Sends `POST /{index}/_doc` with the document as the body.
    #[instrument(skip(self, document))]
    async fn index_document(&self, index: &str, document: &Value) -> Result<(), IndexError> {
        let request = self.build_request(index, document)?;

        let response = self
            .client
            .send(
                Method::Post,
                &request.path,
                request.headers,
                None::<&()>,
                Some(request.body),
                None,
            )
            .await
            .map_err(|e| IndexError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| Self::unreadable_body(status, e))?;
            return Self::check_status(status, body);
        }

        debug!(status = %status, "Document indexed");
        Ok(())
    }
}
