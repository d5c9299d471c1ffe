//! Lambda entry point for the log indexer.

use dotenv::dotenv;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use log_indexer::{Dependencies, LambdaConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        // CloudWatch stamps ingestion time itself.
        .without_time()
        .with_target(false)
        .with_current_span(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();
    init_tracing();

    let config = LambdaConfig::from_env().inspect_err(|e| {
        error!(error = %e, "Refusing to start");
    })?;

    let deps = Dependencies::new(&config).await.inspect_err(|e| {
        error!(error = %e, "Failed to initialize dependencies");
    })?;

    info!("Log indexer ready");

    let forwarder = deps.forwarder;
    run(service_fn(move |event: LambdaEvent<Value>| {
        let forwarder = forwarder.clone();
        async move { forwarder.handle(event).await.map_err(Error::from) }
    }))
    .await
}
