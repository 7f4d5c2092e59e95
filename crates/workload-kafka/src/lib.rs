//! Kafka upsert benchmark for pg-workload.
//!
//! Publishes a stream of JSON-encoded upserts keyed by `(company_id, id)`
//! over a fixed pool of UUIDs, so that consumers see a bounded key space
//! receiving repeated updates.

pub mod args;
pub mod bench;
pub mod error;
pub mod message;
pub mod sink;

pub use args::UpsertBenchArgs;
pub use bench::{BenchMetrics, UpsertBench, UpsertBenchConfig};
pub use error::KafkaWorkloadError;
pub use message::{ComplexData, RecordKey, RecordValue};
pub use sink::{KafkaSink, MessageSink};
