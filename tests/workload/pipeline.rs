//! End-to-end preload and run against the in-memory executor.

use pg_workload::{execute_preload, execute_run, load_schema};
use std::path::Path;
use std::sync::Arc;
use workload_core::GeneratedValue;
use workload_engine::testing::MemoryExecutor;
use workload_engine::{EngineError, PreloadOptions, RunOptions};

const FIXTURE: &str = "tests/fixtures/workload.yaml";
const SEED: u64 = 42;

#[tokio::test]
async fn test_preload_then_run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("pg_workload=info,workload_engine=info")
        .try_init()
        .ok();

    let schema = load_schema(Path::new(FIXTURE))?;
    let executor = Arc::new(MemoryExecutor::new());

    let options = PreloadOptions {
        seed: SEED,
        ..Default::default()
    };
    let preload = execute_preload(executor.clone(), schema.clone(), &options, true).await?;

    assert_eq!(
        executor.created_tables(),
        vec!["customers", "orders", "order_items"]
    );
    assert_eq!(
        executor.dropped_tables(),
        vec!["order_items", "orders", "customers"]
    );
    assert_eq!(preload.table("customers").unwrap().rows_inserted, 300);
    assert_eq!(preload.table("orders").unwrap().rows_inserted, 1000);
    assert_eq!(preload.table("order_items").unwrap().rows_inserted, 0);

    let run_options = RunOptions {
        seed: SEED,
        ..Default::default()
    };
    let run = execute_run(executor.clone(), schema.clone(), &run_options).await?;

    let orders = schema.get_table("orders").unwrap().state();
    assert_eq!(orders.inserted() + orders.updated(), 500);
    assert_eq!(orders.live_rows(), 1000 + orders.inserted());

    let items = schema.get_table("order_items").unwrap().state();
    assert_eq!(items.inserted(), 10);
    assert_eq!(items.updated(), 0);
    assert_eq!(items.live_rows(), 10);

    assert_eq!(
        run.total_rows_inserted() + run.total_rows_updated(),
        200 + 500 + 10
    );
    Ok(())
}

#[tokio::test]
async fn test_statements_bind_every_placeholder() -> anyhow::Result<()> {
    let schema = load_schema(Path::new(FIXTURE))?;
    let executor = Arc::new(MemoryExecutor::new());
    let options = PreloadOptions {
        batch_size: 64,
        seed: SEED,
        ..Default::default()
    };

    execute_preload(executor.clone(), schema.clone(), &options, false).await?;
    execute_run(executor.clone(), schema.clone(), &RunOptions::default()).await?;

    for recorded in executor.statements() {
        let placeholders = recorded.statement.matches('$').count();
        assert_eq!(
            placeholders,
            recorded.params.len(),
            "{}",
            recorded.statement
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_generated_values_match_columns() -> anyhow::Result<()> {
    let schema = load_schema(Path::new(FIXTURE))?;
    let executor = Arc::new(MemoryExecutor::new());

    execute_preload(executor.clone(), schema.clone(), &PreloadOptions::default(), false).await?;

    let customers = schema.get_table("customers").unwrap();
    for recorded in executor.statements() {
        if !recorded.statement.starts_with("INSERT INTO \"customers\"") {
            continue;
        }
        for row in recorded.params.chunks(customers.column_count()) {
            for (value, column) in row.iter().zip(&customers.columns) {
                assert!(value.matches_type(column.column_type), "{value:?}");
            }
            match &row[0] {
                GeneratedValue::String(name) => assert_eq!(name.len(), 10),
                other => panic!("unexpected name {other:?}"),
            }
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_execution_failure_aborts_preload() -> anyhow::Result<()> {
    let schema = load_schema(Path::new(FIXTURE))?;
    let executor = Arc::new(MemoryExecutor::failing_at(3));

    let err = execute_preload(executor.clone(), schema.clone(), &PreloadOptions::default(), false)
        .await
        .unwrap_err();

    let engine_error = err.downcast_ref::<EngineError>().unwrap();
    assert!(matches!(engine_error, EngineError::Execution { .. }));
    assert!(format!("{err:#}").contains("Preload failed"));

    // Nothing was written to the referencing tables.
    assert_eq!(schema.get_table("orders").unwrap().state().preloaded(), 0);
    Ok(())
}

#[test]
fn test_unresolved_reference_rejected_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(
        &path,
        r#"tables:
  - name: order_items
    preload_count: 5
    schema:
      order_id: { type: bigint, reference: orders }
"#,
    )
    .unwrap();

    let err = load_schema(&path).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Invalid reference table 'orders'"), "{message}");
}
