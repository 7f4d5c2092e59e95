//! CLI argument definitions shared by the workload commands.

use crate::operations::{RunOptions, DEFAULT_LOG_INTERVAL};
use crate::preload::{
    PreloadOptions, DEFAULT_BATCH_SIZE, DEFAULT_THREAD_COUNT, LARGE_TABLE_THRESHOLD,
};
use clap::Args;
use std::path::PathBuf;

/// Arguments shared by the preload and run commands.
#[derive(Args, Clone, Debug)]
pub struct CommonWorkloadArgs {
    /// Path to the workload YAML file
    #[arg(long, short = 'c', env = "WORKLOAD_CONFIG_PATH")]
    pub config_path: PathBuf,

    /// Random seed for generation (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Process independent tables concurrently
    #[arg(long)]
    pub parallel_tables: bool,

    /// Dry-run mode: resolve the workload and log statements without executing them
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonWorkloadArgs {
    /// The configured seed, or a fresh random one.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Options of the run phase.
    pub fn run_options(&self, seed: u64) -> RunOptions {
        RunOptions {
            seed,
            parallel_tables: self.parallel_tables,
            log_interval: DEFAULT_LOG_INTERVAL,
        }
    }
}

/// Preload-specific arguments.
#[derive(Args, Clone, Debug)]
pub struct PreloadArgs {
    /// Rows per multi-row INSERT
    #[arg(long = "batch", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Workers per table at or above the parallel threshold
    #[arg(long = "thread", default_value_t = DEFAULT_THREAD_COUNT)]
    pub thread_count: usize,

    /// Row count from which a table is preloaded by parallel workers
    #[arg(long, default_value_t = LARGE_TABLE_THRESHOLD)]
    pub parallel_threshold: u64,

    /// Drop existing tables before creating them
    #[arg(long)]
    pub drop_existing: bool,

    #[command(flatten)]
    pub common: CommonWorkloadArgs,
}

impl PreloadArgs {
    /// Options of the preload phase.
    pub fn preload_options(&self, seed: u64) -> PreloadOptions {
        PreloadOptions {
            batch_size: self.batch_size,
            thread_count: self.thread_count,
            parallel_threshold: self.parallel_threshold,
            seed,
            parallel_tables: self.common.parallel_tables,
        }
    }
}
