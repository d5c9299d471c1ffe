//! Configuration and dependency wiring for the log indexer.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::LambdaConfig;
