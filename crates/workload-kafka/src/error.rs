//! Error types for the Kafka upsert benchmark.

use thiserror::Error;

/// Errors that can occur while publishing benchmark messages.
#[derive(Error, Debug)]
pub enum KafkaWorkloadError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Publish error: {0}")]
    Publish(String),
}
