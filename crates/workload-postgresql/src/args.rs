//! CLI argument definitions for the PostgreSQL connection.

use clap::Args;

/// Default number of client connections.
pub const DEFAULT_CONNECTIONS: usize = 4;

/// PostgreSQL connection arguments.
#[derive(Args, Clone, Debug)]
pub struct PostgreSQLArgs {
    /// Database host
    #[arg(long, env = "PGHOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Database port
    #[arg(long, env = "PGPORT", default_value_t = 5432)]
    pub port: u16,

    /// Database name
    #[arg(long, env = "PGDATABASE", default_value = "postgres")]
    pub database: String,

    /// Database user
    #[arg(long, short = 'u', env = "PGUSER")]
    pub username: String,

    /// Database password
    #[arg(long, env = "PGPASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Client connections shared by all workers
    #[arg(long, default_value_t = DEFAULT_CONNECTIONS)]
    pub connections: usize,
}

impl PostgreSQLArgs {
    /// Key/value connection string understood by `tokio_postgres::connect`.
    pub fn connection_string(&self) -> String {
        let mut parts = vec![
            format!("host={}", quote_value(&self.host)),
            format!("port={}", self.port),
            format!("dbname={}", quote_value(&self.database)),
            format!("user={}", quote_value(&self.username)),
        ];
        if !self.password.is_empty() {
            parts.push(format!("password={}", quote_value(&self.password)));
        }
        parts.join(" ")
    }
}

/// Quote a connection string value when it contains spaces, quotes or
/// backslashes.
fn quote_value(value: &str) -> String {
    if !value.is_empty() && !value.contains([' ', '\'', '\\']) {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}
