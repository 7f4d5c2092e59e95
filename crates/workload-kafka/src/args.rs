//! CLI argument definitions for the upsert benchmark.

use crate::bench::{
    UpsertBenchConfig, DEFAULT_COMPANY_COUNT, DEFAULT_EMPLOYEE_COUNT, DEFAULT_RECORD_COUNT,
    DEFAULT_TOPIC,
};
use clap::Args;

/// Upsert benchmark arguments.
#[derive(Args, Clone, Debug)]
pub struct UpsertBenchArgs {
    /// Bootstrap brokers to connect to
    #[arg(long, short = 'b', env = "KAFKA_BROKERS", default_value = "localhost:9092")]
    pub brokers: String,

    /// Destination topic
    #[arg(long, default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Number of messages to publish
    #[arg(long, default_value_t = DEFAULT_RECORD_COUNT)]
    pub record_count: u64,

    /// Number of distinct company ids in message keys
    #[arg(long, default_value_t = DEFAULT_COMPANY_COUNT)]
    pub company_count: usize,

    /// Number of distinct employee ids in message keys
    #[arg(long, default_value_t = DEFAULT_EMPLOYEE_COUNT)]
    pub employee_count: usize,

    /// Target messages per second (unlimited when omitted)
    #[arg(long)]
    pub rate: Option<f64>,

    /// Random seed for generation (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl UpsertBenchArgs {
    /// The configured seed, or a fresh random one.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Benchmark settings with the given seed.
    pub fn bench_config(&self, seed: u64) -> UpsertBenchConfig {
        UpsertBenchConfig {
            topic: self.topic.clone(),
            record_count: self.record_count,
            company_count: self.company_count,
            employee_count: self.employee_count,
            rate: self.rate,
            seed,
        }
    }
}
