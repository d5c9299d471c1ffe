//! Invocation handler for the log indexer.
//!
//! Each Lambda invocation carries one event. The forwarder writes it, as is,
//! into the log index and reports success or failure back to the runtime.
//! Failures are never retried here; redrive is left to the invoking platform.

use std::sync::Arc;

use lambda_runtime::LambdaEvent;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::IndexingError;
use log_indexer_repository::{DocumentIndexer, INDEX_NAME};

/// Forwards invocation events into the log index.
pub struct EventForwarder {
    indexer: Arc<dyn DocumentIndexer>,
}

impl EventForwarder {
    /// Create a forwarder writing to the `lambda_log` index.
    pub fn new(indexer: Arc<dyn DocumentIndexer>) -> Self {
        Self { indexer }
    }

    /// Handle one Lambda invocation. The invocation context is not used.
    #[instrument(skip(self, event), fields(request_id = %event.context.request_id))]
    pub async fn handle(&self, event: LambdaEvent<Value>) -> Result<(), IndexingError> {
        let (payload, _context) = event.into_parts();
        self.forward(&payload).await
    }

    /// Write `event` into the index as a single document.
    pub async fn forward(&self, event: &Value) -> Result<(), IndexingError> {
        match self.indexer.index_document(INDEX_NAME, event).await {
            Ok(()) => {
                debug!(index = INDEX_NAME, "Event forwarded");
                Ok(())
            }
            Err(e) => {
                error!(index = INDEX_NAME, error = %e, "Failed to forward event");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lambda_runtime::Context;
    use log_indexer_repository::IndexError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock indexer that records every request it receives.
    struct RecordingIndexer {
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl RecordingIndexer {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(String, Value)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentIndexer for RecordingIndexer {
        async fn index_document(&self, index: &str, document: &Value) -> Result<(), IndexError> {
            self.requests
                .lock()
                .unwrap()
                .push((index.to_string(), document.clone()));
            Ok(())
        }
    }

    /// Mock indexer that fails every request.
    struct FailingIndexer {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl DocumentIndexer for FailingIndexer {
        async fn index_document(&self, _index: &str, _document: &Value) -> Result<(), IndexError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(IndexError::transport("connection reset by peer"))
        }
    }

    #[tokio::test]
    async fn test_forwards_event_unmodified() {
        let indexer = Arc::new(RecordingIndexer::new());
        let forwarder = EventForwarder::new(indexer.clone());

        let event = json!({"user": "alice", "action": "login"});
        forwarder.forward(&event).await.unwrap();

        let requests = indexer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "lambda_log");
        assert_eq!(requests[0].1, json!({"user": "alice", "action": "login"}));
    }

    #[tokio::test]
    async fn test_nested_event_unmodified() {
        let indexer = Arc::new(RecordingIndexer::new());
        let forwarder = EventForwarder::new(indexer.clone());

        let event = json!({
            "source": "aws.events",
            "detail": {"items": [1, 2.5, null, true], "empty": {}},
            "unicode": "ünïcødé"
        });
        forwarder.forward(&event).await.unwrap();

        let requests = indexer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, event);
    }

    #[tokio::test]
    async fn test_handle_lambda_event() {
        let indexer = Arc::new(RecordingIndexer::new());
        let forwarder = EventForwarder::new(indexer.clone());

        let event = LambdaEvent::new(json!({"level": "info"}), Context::default());
        forwarder.handle(event).await.unwrap();

        let requests = indexer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, json!({"level": "info"}));
    }

    #[tokio::test]
    async fn test_backend_failure_is_not_retried() {
        let indexer = Arc::new(FailingIndexer {
            attempts: AtomicUsize::new(0),
        });
        let forwarder = EventForwarder::new(indexer.clone());

        let result = forwarder.forward(&json!({"user": "bob"})).await;

        assert!(matches!(
            result,
            Err(IndexingError::IndexError(IndexError::TransportError(_)))
        ));
        assert_eq!(indexer.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_same_event_twice_is_indexed_twice() {
        let indexer = Arc::new(RecordingIndexer::new());
        let forwarder = EventForwarder::new(indexer.clone());

        let event = json!({"user": "alice", "action": "login"});
        forwarder.forward(&event).await.unwrap();
        forwarder.forward(&event).await.unwrap();

        let requests = indexer.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].1, event);
        assert_eq!(requests[1].1, event);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_invocations() {
        let indexer = Arc::new(RecordingIndexer::new());
        let forwarder = Arc::new(EventForwarder::new(indexer.clone()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let forwarder = forwarder.clone();
                tokio::spawn(async move { forwarder.forward(&json!({ "seq": i })).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut seen: Vec<i64> = indexer
            .requests()
            .iter()
            .map(|(_, doc)| doc["seq"].as_i64().unwrap())
            .collect();
        seen.sort_unstable();

        assert_eq!(seen, (0..16).collect::<Vec<i64>>());
    }
}
