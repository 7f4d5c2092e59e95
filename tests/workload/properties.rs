//! Workload-level guarantees checked across option combinations.

use std::sync::Arc;
use workload_core::{ColumnConfig, ResolvedSchema, TableConfig, WorkloadConfig};
use workload_engine::testing::MemoryExecutor;
use workload_engine::{NoopProgress, PreloadOptions, ProgressSink, RunOptions, Workload};

fn orders_and_items() -> Arc<ResolvedSchema> {
    let config = WorkloadConfig::new(vec![
        TableConfig::new("orders")
            .with_column("customer", ColumnConfig::new("varchar"))
            .with_preload_count(1000),
        TableConfig::new("order_items")
            .with_column("order_id", ColumnConfig::reference("bigint", "orders"))
            .with_column("quantity", ColumnConfig::new("integer"))
            .with_operations(2000, 0.0),
    ]);
    Arc::new(ResolvedSchema::resolve(&config).unwrap())
}

fn workload(executor: Arc<MemoryExecutor>, schema: Arc<ResolvedSchema>) -> Workload {
    Workload::new(executor, schema)
        .with_progress(Arc::new(|_: &str, _: u64| Arc::new(NoopProgress) as Arc<dyn ProgressSink>))
}

#[tokio::test]
async fn test_foreign_keys_stay_below_referenced_count() {
    let schema = orders_and_items();
    let executor = Arc::new(MemoryExecutor::new());
    let workload = workload(executor.clone(), schema.clone());

    workload.preload(&PreloadOptions::default()).await.unwrap();
    assert_eq!(schema.get_table("orders").unwrap().state().live_rows(), 1000);

    workload.run(&RunOptions::default()).await.unwrap();

    let mut checked = 0;
    for recorded in executor.statements() {
        if recorded.statement.starts_with("INSERT INTO \"order_items\"") {
            let order_id = recorded.params[0].as_i64().unwrap();
            assert!((0..1000).contains(&order_id), "order_id {order_id}");
            checked += 1;
        }
    }
    assert_eq!(checked, 2000);
}

#[tokio::test]
async fn test_preload_count_for_any_worker_layout() {
    for thread_count in [1, 2, 3, 7] {
        for parallel_threshold in [0, 500, 5000] {
            for parallel_tables in [false, true] {
                let schema = orders_and_items();
                let executor = Arc::new(MemoryExecutor::new());
                let workload = workload(executor.clone(), schema.clone());

                workload
                    .preload(&PreloadOptions {
                        batch_size: 33,
                        thread_count,
                        parallel_threshold,
                        parallel_tables,
                        seed: 5,
                    })
                    .await
                    .unwrap();

                let orders = schema.get_table("orders").unwrap().state();
                assert_eq!(
                    orders.live_rows(),
                    1000,
                    "threads {thread_count}, threshold {parallel_threshold}"
                );
                assert_eq!(executor.param_count(), 1000);
            }
        }
    }
}

#[tokio::test]
async fn test_ten_inserts() {
    let config = WorkloadConfig::new(vec![TableConfig::new("events")
        .with_column("payload", ColumnConfig::new("jsonb"))
        .with_column("at", ColumnConfig::new("timestamp"))
        .with_preload_count(25)
        .with_operations(10, 0.0)]);
    let schema = Arc::new(ResolvedSchema::resolve(&config).unwrap());
    let executor = Arc::new(MemoryExecutor::new());
    let workload = workload(executor.clone(), schema.clone());

    workload.preload(&PreloadOptions::default()).await.unwrap();
    let report = workload.run(&RunOptions::default()).await.unwrap();

    let events = report.table("events").unwrap();
    assert_eq!(events.rows_inserted, 10);
    assert_eq!(events.rows_updated, 0);
    assert_eq!(schema.get_table("events").unwrap().state().live_rows(), 35);
}

#[tokio::test]
async fn test_same_seed_same_statements() {
    let run = |seed: u64| async move {
        let config = WorkloadConfig::new(vec![TableConfig::new("accounts")
            .with_column("owner", ColumnConfig::new("text"))
            .with_column("balance", ColumnConfig::new("numeric"))
            .with_preload_count(120)
            .with_operations(80, 0.4)]);
        let schema = Arc::new(ResolvedSchema::resolve(&config).unwrap());
        let executor = Arc::new(MemoryExecutor::new());
        let workload = workload(executor.clone(), schema);

        workload
            .preload(&PreloadOptions {
                seed,
                ..Default::default()
            })
            .await
            .unwrap();
        workload
            .run(&RunOptions {
                seed,
                ..Default::default()
            })
            .await
            .unwrap();

        executor
            .statements()
            .into_iter()
            .map(|s| (s.statement, s.params))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(9).await, run(9).await);
    assert_ne!(run(9).await, run(10).await);
}

#[tokio::test]
async fn test_self_referencing_table_preloads() {
    let config = WorkloadConfig::new(vec![TableConfig::new("employees")
        .with_column("name", ColumnConfig::new("varchar"))
        .with_column("manager_id", ColumnConfig::reference("bigint", "employees"))
        .with_preload_count(100)
        .with_operations(50, 0.0)]);
    let schema = Arc::new(ResolvedSchema::resolve(&config).unwrap());
    let executor = Arc::new(MemoryExecutor::new());
    let workload = workload(executor.clone(), schema.clone());

    workload.preload(&PreloadOptions::default()).await.unwrap();
    assert_eq!(schema.get_table("employees").unwrap().state().live_rows(), 100);

    workload.run(&RunOptions::default()).await.unwrap();
    assert_eq!(schema.get_table("employees").unwrap().state().live_rows(), 150);

    let mut checked = 0;
    for recorded in executor.statements() {
        for row in recorded.params.chunks(2) {
            let manager_id = row[1].as_i64().unwrap();
            assert!((0..150).contains(&manager_id), "manager_id {manager_id}");
            checked += 1;
        }
    }
    assert_eq!(checked, 150);
}

#[tokio::test]
async fn test_mutually_referencing_tables_preload() {
    for parallel_tables in [false, true] {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("teams")
                .with_column("lead_id", ColumnConfig::reference("bigint", "leads"))
                .with_preload_count(10),
            TableConfig::new("leads")
                .with_column("team_id", ColumnConfig::reference("bigint", "teams"))
                .with_preload_count(10),
        ]);
        let schema = Arc::new(ResolvedSchema::resolve(&config).unwrap());
        let executor = Arc::new(MemoryExecutor::new());
        let workload = workload(executor.clone(), schema.clone());

        workload
            .preload(&PreloadOptions {
                parallel_tables,
                ..Default::default()
            })
            .await
            .unwrap();

        for name in ["teams", "leads"] {
            assert_eq!(schema.get_table(name).unwrap().state().live_rows(), 10);
        }
        assert_eq!(executor.param_count(), 20);
        for recorded in executor.statements() {
            for value in &recorded.params {
                assert!((0..10).contains(&value.as_i64().unwrap()));
            }
        }
    }
}
