//! Index error types.
//!
//! This module defines the error types that can occur while writing documents
//! to the search backend.

use thiserror::Error;

/// Errors that can occur during document indexing.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    /// Failed to build the client (bad URL, unreadable TLS material, transport setup).
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request could not be sent or its response could not be read.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The backend answered with a non-success status.
    #[error("Index request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Failed to encode the document body.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl IndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a rejection error from a response status and body.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
