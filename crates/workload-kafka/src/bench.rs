//! Upsert benchmark: a stream of keyed upserts over a fixed key space.

use crate::error::KafkaWorkloadError;
use crate::message::{uuid_pool, RecordKey, RecordValue};
use crate::sink::MessageSink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::info;
use workload_engine::{Pacer, ProgressSink};

/// Default destination topic.
pub const DEFAULT_TOPIC: &str = "rw_qw_customer";

/// Default number of messages.
pub const DEFAULT_RECORD_COUNT: u64 = 100_000_000;

/// Default size of the company id pool.
pub const DEFAULT_COMPANY_COUNT: usize = 100;

/// Default size of the employee id pool.
pub const DEFAULT_EMPLOYEE_COUNT: usize = 1000;

/// Settings of an upsert benchmark run.
#[derive(Debug, Clone)]
pub struct UpsertBenchConfig {
    pub topic: String,
    pub record_count: u64,
    pub company_count: usize,
    pub employee_count: usize,
    /// Optional pacing target in messages per second.
    pub rate: Option<f64>,
    pub seed: u64,
}

impl Default for UpsertBenchConfig {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            record_count: DEFAULT_RECORD_COUNT,
            company_count: DEFAULT_COMPANY_COUNT,
            employee_count: DEFAULT_EMPLOYEE_COUNT,
            rate: None,
            seed: 0,
        }
    }
}

/// Metrics from a benchmark run.
#[derive(Debug, Clone, Default)]
pub struct BenchMetrics {
    /// Number of messages delivered.
    pub messages_published: u64,
    /// Key and payload bytes delivered.
    pub bytes_published: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl BenchMetrics {
    /// Calculate messages per second.
    pub fn messages_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.messages_published as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Generates and publishes the upsert stream.
pub struct UpsertBench {
    config: UpsertBenchConfig,
    rng: StdRng,
    company_ids: Vec<String>,
    employee_ids: Vec<String>,
}

impl UpsertBench {
    /// Validate `config` and generate the key pools.
    pub fn new(config: UpsertBenchConfig) -> Result<Self, KafkaWorkloadError> {
        if config.company_count == 0 || config.employee_count == 0 {
            return Err(KafkaWorkloadError::Config(
                "company and employee counts must be at least 1".to_string(),
            ));
        }
        if let Some(rate) = config.rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(KafkaWorkloadError::Config(format!(
                    "rate {rate} must be a positive number"
                )));
            }
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let company_ids = uuid_pool(&mut rng, config.company_count);
        let employee_ids = uuid_pool(&mut rng, config.employee_count);

        Ok(Self {
            config,
            rng,
            company_ids,
            employee_ids,
        })
    }

    /// Pool of company ids used in keys.
    pub fn company_ids(&self) -> &[String] {
        &self.company_ids
    }

    /// Pool of employee ids used in keys.
    pub fn employee_ids(&self) -> &[String] {
        &self.employee_ids
    }

    /// Generate the next key and value.
    pub fn next_record(&mut self) -> (RecordKey, RecordValue) {
        let value = RecordValue::generate(&mut self.rng);
        let company = self.rng.gen_range(0..self.company_ids.len());
        let employee = self.rng.gen_range(0..self.employee_ids.len());
        let key = RecordKey {
            company_id: self.company_ids[company].clone(),
            id: self.employee_ids[employee].clone(),
        };
        (key, value)
    }

    /// Publish `record_count` messages to `sink`, one at a time.
    ///
    /// The first failed delivery ends the run.
    pub async fn run(
        &mut self,
        sink: &dyn MessageSink,
        progress: &dyn ProgressSink,
    ) -> Result<BenchMetrics, KafkaWorkloadError> {
        let start_time = Instant::now();
        let mut pacer = self.config.rate.map(Pacer::per_second);
        let mut metrics = BenchMetrics::default();

        info!(
            "Publishing {} messages to topic '{}'",
            self.config.record_count, self.config.topic
        );

        for _ in 0..self.config.record_count {
            if let Some(pacer) = pacer.as_mut() {
                pacer.wait().await;
            }

            let (key, value) = self.next_record();
            let key = serde_json::to_vec(&key)?;
            let payload = serde_json::to_vec(&value)?;

            sink.publish(&self.config.topic, &key, &payload).await?;

            metrics.messages_published += 1;
            metrics.bytes_published += (key.len() + payload.len()) as u64;
            progress.advance(1);
        }

        metrics.total_duration = start_time.elapsed();

        info!(
            "Published {} messages in {:?} ({:.0} msgs/sec)",
            metrics.messages_published,
            metrics.total_duration,
            metrics.messages_per_second()
        );

        Ok(metrics)
    }
}
