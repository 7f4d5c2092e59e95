//! Command-line interface for pg-workload
//!
//! # Usage Examples
//!
//! ## Preload
//! ```bash
//! pg-workload preload \
//!   --config-path workload.yaml \
//!   --host 127.0.0.1 --port 5432 --database postgres \
//!   --username postgres --password postgres \
//!   --batch 50 --thread 2
//! ```
//!
//! ## Run
//! ```bash
//! pg-workload run --config-path workload.yaml --username postgres --seed 42
//! ```
//!
//! ## Upsert Benchmark
//! ```bash
//! pg-workload upsert-bench --brokers localhost:9092 --rate 5000
//! ```

use clap::{Parser, Subcommand};
use pg_workload::{run_operations, run_preload, run_upsert_bench};
use workload_engine::{CommonWorkloadArgs, PreloadArgs};
use workload_kafka::UpsertBenchArgs;
use workload_postgresql::PostgreSQLArgs;

#[derive(Parser)]
#[command(name = "pg-workload")]
#[command(about = "A synthetic insert/update workload generator for PostgreSQL")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the workload tables and preload them
    #[command(alias = "p")]
    Preload {
        #[command(flatten)]
        postgresql: PostgreSQLArgs,

        #[command(flatten)]
        args: PreloadArgs,
    },

    /// Run the insert/update mix against preloaded tables
    #[command(alias = "r")]
    Run {
        #[command(flatten)]
        postgresql: PostgreSQLArgs,

        #[command(flatten)]
        args: CommonWorkloadArgs,
    },

    /// Publish a stream of keyed upserts to Kafka
    UpsertBench {
        #[command(flatten)]
        args: UpsertBenchArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Preload { postgresql, args } => {
            run_preload(postgresql, args).await?;
        }
        Commands::Run { postgresql, args } => {
            run_operations(postgresql, args).await?;
        }
        Commands::UpsertBench { args } => {
            run_upsert_bench(args).await?;
        }
    }

    Ok(())
}
