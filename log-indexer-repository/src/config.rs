//! Connection configuration for the OpenSearch client.

use std::path::PathBuf;

use url::Url;

use crate::errors::IndexError;

/// Standard HTTPS port the backend domain listens on.
pub const DEFAULT_PORT: u16 = 443;

/// Trust bundle shipped with the Amazon Linux Lambda images.
pub const DEFAULT_CA_BUNDLE: &str = "/etc/pki/tls/certs/ca-bundle.crt";

/// How the server certificate presented by the backend is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsVerification {
    /// Validate the certificate chain and match the hostname against it.
    Full,
    /// Validate the certificate chain but skip the hostname match.
    ///
    /// The certificates in `ca_bundle` are added as trust anchors next to the
    /// platform roots.
    ChainOnly { ca_bundle: PathBuf },
}

impl Default for TlsVerification {
    fn default() -> Self {
        Self::ChainOnly {
            ca_bundle: PathBuf::from(DEFAULT_CA_BUNDLE),
        }
    }
}

/// Configuration for the OpenSearchClient.
#[derive(Debug, Clone)]
pub struct OpenSearchConfig {
    /// DNS name or IP of the backend domain endpoint.
    pub host: String,
    /// Port to connect to.
    pub port: u16,
    /// Gzip-compress request bodies.
    pub compress_requests: bool,
    /// Certificate validation mode.
    pub tls: TlsVerification,
}

impl OpenSearchConfig {
    /// Create a config for `host` with the deployment defaults: port 443,
    /// compressed requests, and chain-only certificate validation.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            compress_requests: true,
            tls: TlsVerification::default(),
        }
    }

    /// Replace the certificate validation mode.
    pub fn with_tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }

    /// Build the HTTPS base URL for the configured host and port.
    ///
    /// Domain endpoints are usually bare hostnames, but a leading `https://`
    /// and trailing slashes are tolerated.
    pub fn base_url(&self) -> Result<Url, IndexError> {
        let host = self
            .host
            .trim()
            .trim_start_matches("https://")
            .trim_end_matches('/');

        if host.is_empty() {
            return Err(IndexError::connection("OpenSearch host is empty"));
        }

        Url::parse(&format!("https://{}:{}", host, self.port))
            .map_err(|e| IndexError::connection(format!("Invalid OpenSearch host {}: {}", host, e)))
    }
}
