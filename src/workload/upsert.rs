//! Upsert benchmark command runner.

use anyhow::Context;
use workload_engine::TracingProgress;
use workload_kafka::{BenchMetrics, KafkaSink, UpsertBench, UpsertBenchArgs};

/// Publish the upsert benchmark stream to Kafka.
pub async fn run_upsert_bench(args: UpsertBenchArgs) -> anyhow::Result<BenchMetrics> {
    let seed = args.seed_or_random();
    let config = args.bench_config(seed);
    let progress = TracingProgress::new(
        format!("Publishing to {}", config.topic),
        config.record_count,
    );

    tracing::info!("Connecting to Kafka brokers: {}", args.brokers);
    let sink = KafkaSink::new(&args.brokers).context("Failed to create Kafka producer")?;

    let mut bench = UpsertBench::new(config).context("Invalid upsert benchmark settings")?;
    let metrics = bench
        .run(&sink, &progress)
        .await
        .context("Upsert benchmark failed")?;
    Ok(metrics)
}
