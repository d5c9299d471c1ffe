//! OpenSearch index configuration.

/// The index every forwarded event is written to.
pub const INDEX_NAME: &str = "lambda_log";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_name() {
        assert_eq!(INDEX_NAME, "lambda_log");
    }
}
