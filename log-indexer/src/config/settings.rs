//! Environment-sourced settings for the log indexer.

use std::env;
use std::path::PathBuf;

use log_indexer_repository::{config::DEFAULT_CA_BUNDLE, OpenSearchConfig, TlsVerification};

use crate::IndexingError;

/// Backend domain endpoint. Required.
pub const OPENSEARCH_HOST: &str = "OPENSEARCH_HOST";

/// Set to `true` to match the server hostname against its certificate.
pub const OPENSEARCH_VERIFY_HOSTNAME: &str = "OPENSEARCH_VERIFY_HOSTNAME";

/// Trust anchor used when hostname verification is off.
pub const OPENSEARCH_CA_BUNDLE: &str = "OPENSEARCH_CA_BUNDLE";

/// Settings resolved once at cold start and immutable afterwards.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    /// Connection settings for the index backend.
    pub opensearch: OpenSearchConfig,
}

impl LambdaConfig {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_HOST`: backend domain endpoint (required)
    /// - `OPENSEARCH_VERIFY_HOSTNAME`: `true` to verify the hostname (default: false)
    /// - `OPENSEARCH_CA_BUNDLE`: PEM trust anchor (default: /etc/pki/tls/certs/ca-bundle.crt)
    ///
    /// # Returns
    ///
    /// * `Ok(LambdaConfig)` - Resolved settings
    /// * `Err(IndexingError)` - If the host is missing or a value is malformed
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through `lookup`, which returns the raw value for a variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(OPENSEARCH_HOST)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| IndexingError::config(format!("{} is not set", OPENSEARCH_HOST)))?;

        let verify_hostname = match lookup(OPENSEARCH_VERIFY_HOSTNAME) {
            Some(raw) => parse_bool(OPENSEARCH_VERIFY_HOSTNAME, &raw)?,
            None => false,
        };

        let tls = if verify_hostname {
            TlsVerification::Full
        } else {
            let ca_bundle = lookup(OPENSEARCH_CA_BUNDLE)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CA_BUNDLE.to_string());
            TlsVerification::ChainOnly {
                ca_bundle: PathBuf::from(ca_bundle),
            }
        };

        Ok(Self {
            opensearch: OpenSearchConfig::new(host).with_tls(tls),
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, IndexingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(IndexingError::config(format!(
            "{} must be a boolean, got {:?}",
            key, other
        ))),
    }
}
