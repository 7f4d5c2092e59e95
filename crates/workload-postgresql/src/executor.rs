//! Statement execution over a pool of PostgreSQL clients.

use crate::ddl::{create_table_sql, drop_table_sql};
use crate::error::PostgreSQLWorkloadError;
use crate::params::to_sql_params;
use async_trait::async_trait;
use postgres_types::ToSql;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio_postgres::{Client, NoTls, Statement};
use tracing::{debug, error, info};
use workload_core::{GeneratedValue, ResolvedTable};
use workload_engine::{BoxError, SchemaExecutor, StatementExecutor};

/// Prepared statements kept per connection.
pub const MAX_PREPARED_STATEMENTS: usize = 256;

/// Bounded map from statement text to its prepared form.
///
/// Once full, further texts are not cached and get prepared on every call.
#[derive(Debug)]
pub struct StatementCache<S> {
    entries: Mutex<HashMap<String, S>>,
    capacity: usize,
}

impl<S: Clone> StatementCache<S> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    pub fn get(&self, text: &str) -> Option<S> {
        self.entries.lock().ok()?.get(text).cloned()
    }

    /// Cache `prepared` for `text`. Returns false when the cache is full.
    pub fn insert(&self, text: &str, prepared: S) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        if entries.len() >= self.capacity && !entries.contains_key(text) {
            return false;
        }
        entries.insert(text.to_string(), prepared);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct PooledClient {
    client: Client,
    statements: StatementCache<Statement>,
}

impl PooledClient {
    fn new(client: Client) -> Self {
        Self {
            client,
            statements: StatementCache::new(MAX_PREPARED_STATEMENTS),
        }
    }

    async fn prepared(&self, text: &str) -> Result<Statement, tokio_postgres::Error> {
        if let Some(statement) = self.statements.get(text) {
            return Ok(statement);
        }
        let statement = self.client.prepare(text).await?;
        if !self.statements.insert(text, statement.clone()) {
            debug!("Statement cache full, not caching: {}", text);
        }
        Ok(statement)
    }
}

/// Executes statements against PostgreSQL.
///
/// Statements are spread round-robin over a fixed set of clients. Each
/// client pipelines the statements issued to it concurrently and prepares a
/// given statement text once.
pub struct PostgreSQLExecutor {
    clients: Vec<PooledClient>,
    next: AtomicUsize,
}

impl PostgreSQLExecutor {
    /// Open `connections` connections using a key/value connection string.
    pub async fn connect(
        connection_string: &str,
        connections: usize,
    ) -> Result<Self, PostgreSQLWorkloadError> {
        let connections = connections.max(1);
        let mut clients = Vec::with_capacity(connections);

        for i in 0..connections {
            let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

            // Spawn the connection task
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    error!("PostgreSQL connection {} error: {}", i, e);
                }
            });

            clients.push(client);
        }

        // Test connection
        clients[0]
            .simple_query("SELECT 1")
            .await
            .map_err(|e| PostgreSQLWorkloadError::Connection(e.to_string()))?;

        info!("Opened {} PostgreSQL connections", connections);
        Ok(Self::with_clients(clients))
    }

    /// Create an executor over already connected clients.
    pub fn with_clients(clients: Vec<Client>) -> Self {
        Self {
            clients: clients.into_iter().map(PooledClient::new).collect(),
            next: AtomicUsize::new(0),
        }
    }

    /// Number of clients in the pool.
    pub fn connection_count(&self) -> usize {
        self.clients.len()
    }

    fn client(&self) -> Result<&PooledClient, PostgreSQLWorkloadError> {
        if self.clients.is_empty() {
            return Err(PostgreSQLWorkloadError::Connection(
                "no PostgreSQL clients available".to_string(),
            ));
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.clients.len();
        Ok(&self.clients[idx])
    }
}

#[async_trait]
impl StatementExecutor for PostgreSQLExecutor {
    async fn execute(&self, statement: &str, params: &[GeneratedValue]) -> Result<u64, BoxError> {
        let params = to_sql_params(params)?;
        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let client = self.client()?;
        let prepared = client.prepared(statement).await?;
        let affected = client.client.execute(&prepared, &param_refs).await?;
        Ok(affected)
    }
}

#[async_trait]
impl SchemaExecutor for PostgreSQLExecutor {
    async fn create_table(&self, table: &ResolvedTable) -> Result<(), BoxError> {
        let sql = create_table_sql(table);
        debug!("DDL: {}", sql);
        self.client()?.client.batch_execute(&sql).await?;
        Ok(())
    }

    async fn drop_table(&self, table: &ResolvedTable) -> Result<(), BoxError> {
        let sql = drop_table_sql(table);
        debug!("DDL: {}", sql);
        self.client()?.client.batch_execute(&sql).await?;
        Ok(())
    }
}
