//! Message sinks.

use crate::error::KafkaWorkloadError;
use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use std::time::Duration;

/// Destination of keyed messages.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Publish one message and wait for its delivery.
    async fn publish(&self, topic: &str, key: &[u8], payload: &[u8])
        -> Result<(), KafkaWorkloadError>;
}

/// Publishes to Kafka through an `rdkafka` future producer.
pub struct KafkaSink {
    producer: FutureProducer,
    timeout: Duration,
}

impl KafkaSink {
    /// Create a producer for the given bootstrap brokers.
    pub fn new(brokers: &str) -> Result<Self, KafkaWorkloadError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "30000")
            .set("queue.buffering.max.messages", "100000")
            .set("batch.size", "65536")
            .set("linger.ms", "5")
            .create()
            .map_err(KafkaWorkloadError::Kafka)?;

        Ok(Self {
            producer,
            timeout: Duration::from_secs(30),
        })
    }
}

#[async_trait]
impl MessageSink for KafkaSink {
    async fn publish(
        &self,
        topic: &str,
        key: &[u8],
        payload: &[u8],
    ) -> Result<(), KafkaWorkloadError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);
        self.producer
            .send(record, self.timeout)
            .await
            .map(|_| ())
            .map_err(|(err, _)| KafkaWorkloadError::Kafka(err))
    }
}
